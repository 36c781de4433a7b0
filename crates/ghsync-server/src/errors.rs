//! Server errors.

use actix_http::StatusCode;
use actix_web::ResponseError;
use ghsync_core::CoreError;
use thiserror::Error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    DomainError { source: CoreError },

    #[error("Could not read request payload,\n  caused by: {}", message)]
    PayloadError { message: String },

    #[error("Could not set up metrics,\n  caused by: {}", message)]
    MetricsError { message: String },

    #[error("Could not build transfer service,\n  caused by: {}", source)]
    TransferSetupError {
        source: ghsync_transfer_http::HttpTransferError,
    },

    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },
}

impl From<CoreError> for ServerError {
    fn from(e: CoreError) -> Self {
        ServerError::DomainError { source: e }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match &self {
            ServerError::DomainError {
                source: CoreError::SignatureMismatch,
            } => StatusCode::FORBIDDEN,
            ServerError::DomainError {
                source: CoreError::PayloadParse { .. },
            }
            | ServerError::PayloadError { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
