#![allow(dead_code)]

use postbox_db::{create_pool, DbSettings};
use postbox_messages::MessageStore;
use postbox_server::views::{DataView, InputView, TemplateRenderer};
use postbox_server::{app, initialize_database, AppState};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Renders views as JSON so tests can assert on the values handed to the
/// templates.
pub struct JsonRenderer;

impl TemplateRenderer for JsonRenderer {
    fn render_input(&self, view: &InputView) -> String {
        serde_json::to_string(view).expect("input view should serialize")
    }

    fn render_data(&self, view: &DataView) -> String {
        serde_json::to_string(view).expect("data view should serialize")
    }
}

pub struct TestApp {
    pub router: axum::Router,
    pub store: MessageStore,
    _dir: TempDir,
}

fn settings_at(path: &Path) -> DbSettings {
    DbSettings {
        name: path.to_str().expect("utf-8 path").to_string(),
        pool_max_size: 4,
        connection_timeout_ms: 250,
        ..DbSettings::default()
    }
}

fn build(path_in: impl FnOnce(&Path) -> std::path::PathBuf, renderer: Arc<dyn TemplateRenderer>) -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = create_pool(&settings_at(&path_in(dir.path()))).expect("failed to create pool");
    initialize_database(&pool);
    let store = MessageStore::new(pool);
    let state = AppState {
        store: store.clone(),
        renderer,
    };
    TestApp {
        router: app(state),
        store,
        _dir: dir,
    }
}

pub fn setup_app() -> TestApp {
    build(|dir| dir.join("app.db"), Arc::new(JsonRenderer))
}

pub fn setup_app_with(renderer: Arc<dyn TemplateRenderer>) -> TestApp {
    build(|dir| dir.join("app.db"), renderer)
}

/// An app whose database file lives under a directory that does not exist.
pub fn setup_unreachable_app() -> TestApp {
    build(
        |dir| dir.join("missing").join("app.db"),
        Arc::new(JsonRenderer),
    )
}
