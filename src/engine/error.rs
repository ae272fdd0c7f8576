//! Error types for calls against the task API.

use std::path::PathBuf;

/// Shown when the server rejects a request without saying why.
pub const GENERIC_FAILURE: &str = "The server rejected the request.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Non-2xx response. `message` is the body's `message` field, if any.
    #[error("{endpoint} returned {status}: {}", .message.as_deref().unwrap_or(GENERIC_FAILURE))]
    Rejected {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    #[error("unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
    /// Checked locally before any request is sent.
    #[error("{0}")]
    Precondition(String),
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] super::config::ConfigError),
}

impl ApiError {
    /// The string shown next to the control that failed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Rejected { .. } => GENERIC_FAILURE.to_string(),
            Self::Transport { .. } => "Could not reach the server.".to_string(),
            Self::Decode { .. } => "The server sent an unexpected response.".to_string(),
            Self::Precondition(message) => message.clone(),
            Self::Io { .. } | Self::Config(_) => self.to_string(),
        }
    }

    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}
