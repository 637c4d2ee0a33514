//! Handlers for the submission form and the message list.

use crate::views::{DataView, InputView, SUBMIT_BLANK, SUBMIT_FAILURE, SUBMIT_SUCCESS};
use crate::AppState;
use axum::{
    extract::{rejection::FormRejection, Extension, Form},
    response::Html,
};
use std::sync::Arc;
use thiserror::Error;

/// Name of the submitted form field.
const MESSAGE_FIELD: &str = "message";

/// Returns the first value of `name` in a decoded form body.
///
/// Repeated fields are allowed; later values are ignored.
pub fn first_field<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// A submission that cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The `message` field was absent, empty, or only whitespace.
    #[error("{}", SUBMIT_BLANK)]
    Blank,
}

/// Accepts text with at least one non-whitespace character.
///
/// The returned text is the input unchanged; trimming only decides
/// whether it is blank.
pub fn validate_submission(message: Option<&str>) -> Result<&str, ValidationError> {
    match message {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ValidationError::Blank),
    }
}

/// GET /input
pub async fn input_form_handler(Extension(state): Extension<Arc<AppState>>) -> Html<String> {
    Html(state.renderer.render_input(&InputView::default()))
}

/// POST /input
///
/// Always answers with the submission page, carrying a success, failure, or
/// validation message. When `message` appears more than once the first
/// value is used. A body that cannot be decoded as a form counts as a
/// missing `message` field.
pub async fn submit_message_handler(
    Extension(state): Extension<Arc<AppState>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Html<String> {
    let pairs = match form {
        Ok(Form(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable submission body");
            Vec::new()
        }
    };

    let view = match validate_submission(first_field(&pairs, MESSAGE_FIELD)) {
        Ok(text) => {
            let store = state.store.clone();
            let text = text.to_string();
            let stored = tokio::task::spawn_blocking(move || store.insert(&text))
                .await
                .unwrap_or_else(|e| {
                    tracing::error!(error = %e, "insert task join error");
                    false
                });
            if stored {
                InputView::success(SUBMIT_SUCCESS)
            } else {
                InputView::error(SUBMIT_FAILURE)
            }
        }
        Err(e) => InputView::error(&e.to_string()),
    };

    Html(state.renderer.render_input(&view))
}

/// GET /data
///
/// Lists every message, newest first. A database failure yields an empty
/// list; the page does not indicate that anything went wrong.
pub async fn list_messages_handler(Extension(state): Extension<Arc<AppState>>) -> Html<String> {
    let store = state.store.clone();
    let messages = tokio::task::spawn_blocking(move || store.list_all())
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "list task join error");
            Vec::new()
        });

    Html(state.renderer.render_data(&DataView { messages }))
}
