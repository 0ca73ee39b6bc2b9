//! REST backend errors.

use admissions_core::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend rejected insert ({status}): {message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

pub type RestResult<T> = Result<T, RestError>;

impl From<RestError> for StoreError {
    fn from(e: RestError) -> Self {
        match e {
            RestError::Rejected {
                status, message, ..
            } => StoreError::Rejected {
                status: Some(status),
                message,
            },
            RestError::Json(e) => StoreError::Serialization(e),
            other => StoreError::Transport(other.to_string()),
        }
    }
}
