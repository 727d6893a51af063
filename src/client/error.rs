use thiserror::Error;

use crate::api::FieldErrors;

const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer. `message` is the body's `message` when it has one.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        field_errors: FieldErrors,
    },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text to show the user; never empty
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ClientError::Status { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }
}
