//! View models handed to the template renderer.
//!
//! Handlers never produce markup. They fill in one of these structs and pass
//! it to a [`TemplateRenderer`]. Serialised, the views expose the named
//! values `messages`, `successMessage`, and `errorMessage`.

use postbox_messages::Message;
use serde::Serialize;

/// Shown after a message was stored.
pub const SUBMIT_SUCCESS: &str = "Message submitted successfully!";
/// Shown when the store rejected the message.
pub const SUBMIT_FAILURE: &str = "Failed to submit message. Please try again.";
/// Shown when the submitted text is missing or blank.
pub const SUBMIT_BLANK: &str = "Please enter a message.";

/// The submission page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl InputView {
    pub fn success(message: &str) -> Self {
        Self {
            success_message: Some(message.to_string()),
            error_message: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success_message: None,
            error_message: Some(message.to_string()),
        }
    }
}

/// The message list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataView {
    /// Newest first.
    pub messages: Vec<Message>,
}

/// Turns view models into response bodies.
pub trait TemplateRenderer: Send + Sync {
    fn render_input(&self, view: &InputView) -> String;
    fn render_data(&self, view: &DataView) -> String;
}
