//! postbox server library logic.
//!
//! Wires the message store and the template renderer to three routes:
//!
//! - `GET /input` renders the empty submission form
//! - `POST /input` stores the form field `message`
//! - `GET /data` lists every stored message, newest first

pub mod api_messages;
pub mod config;
pub mod templates;
pub mod views;

use axum::{extract::DefaultBodyLimit, routing::get, Extension, Router};
use postbox_db::{ensure_schema, DbPool};
use postbox_messages::MessageStore;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use views::TemplateRenderer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Message data access.
    pub store: MessageStore,
    /// Renders the pages from view models.
    pub renderer: Arc<dyn TemplateRenderer>,
}

/// Errors that stop the server from starting or serving.
///
/// Database problems are not among them: an unreachable database only
/// fails individual requests.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Pool(#[from] postbox_db::PoolError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Maximum request body size (64 KiB).
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Ensures the schema exists, logging instead of failing.
///
/// Returns `true` if the schema is in place. Startup continues either way.
pub fn initialize_database(pool: &DbPool) -> bool {
    match ensure_schema(pool) {
        Ok(_) => {
            tracing::info!("database initialized successfully");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "error initializing database");
            false
        }
    }
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/input",
            get(api_messages::input_form_handler).post(api_messages::submit_message_handler),
        )
        .route("/data", get(api_messages::list_messages_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
