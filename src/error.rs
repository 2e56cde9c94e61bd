mod error_kind;

use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError, http::StatusCode};
use anyhow::anyhow;
use serde_json::json;
use std::fmt::{Debug, Display, Formatter};
use tracing::error;

pub use error_kind::ErrorKind;

/// pwdvault native error type.
#[derive(thiserror::Error)]
pub struct Error {
    root_cause: anyhow::Error,
    kind: ErrorKind,
}

impl Error {
    /// Creates a Validation error instance with the given message.
    pub fn validation<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow!(message),
            kind: ErrorKind::Validation,
        }
    }

    /// Creates an Authentication error instance with the given message.
    pub fn authentication<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow!(message),
            kind: ErrorKind::Authentication,
        }
    }

    /// Creates a Decryption error instance with the given root cause.
    pub fn decryption(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Decryption,
        }
    }

    /// Returns the error kind, letting callers react to the error category
    /// without inspecting messages.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.root_cause, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Decryption | ErrorKind::Storage | ErrorKind::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).json(json!({
            "message": match self.kind() {
                ErrorKind::Validation | ErrorKind::Authentication => self.root_cause.to_string(),
                ErrorKind::Decryption | ErrorKind::Storage | ErrorKind::Unknown => {
                    error!("Failed to serve request: {:?}", self.root_cause);
                    "Internal Server Error".to_string()
                }
            }
        }))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Error {
        Error {
            root_cause: anyhow!(err),
            kind: ErrorKind::Storage,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        err.downcast::<Error>().unwrap_or_else(|root_cause| Error {
            root_cause,
            kind: ErrorKind::Unknown,
        })
    }
}
