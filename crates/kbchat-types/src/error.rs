use thiserror::Error;

/// Shown when a failure carries no usable description at all
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to get response";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The server answered with an `error` field; shown verbatim
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Http failure response for {url}: {status} {status_text}")]
    Status { status: u16, status_text: String, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Text to surface to the user, falling back to a generic message
    /// when the error renders blank.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            text
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}
