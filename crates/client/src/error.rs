//! Errors returned by the admin client.

use salon_core::error::FieldErrors;
use serde::Deserialize;

/// Errors from the HTTP layer, the API itself, or the token store.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connection refused, timeout, bad body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        errors: FieldErrors,
    },

    /// An authenticated call was attempted without a token.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Some requests of a bulk operation failed.
    #[error("{failed} of {total} requests failed")]
    Batch { failed: usize, total: usize },

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Token store error: {0}")]
    TokenStore(#[from] std::io::Error),
}

/// The server's JSON error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: FieldErrors,
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a status and raw response body.
    ///
    /// Bodies that are not the server's error shape keep the raw text as the
    /// message, or the status reason when the body is empty.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ClientError::Api {
                status: status.as_u16(),
                message: parsed.message,
                errors: parsed.errors,
            },
            Err(_) => {
                let message = if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    body.trim().to_string()
                };
                ClientError::Api {
                    status: status.as_u16(),
                    message,
                    errors: FieldErrors::new(),
                }
            }
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::NotAuthenticated) || self.status() == Some(401)
    }

    /// Field-level validation messages, empty unless the server sent some.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ClientError::Api { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    /// Text to show the user: the server's own message when there is one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
