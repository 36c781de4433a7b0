//! Transfer errors.

use std::path::PathBuf;

use thiserror::Error;

/// Transfer error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Unexpected status {} while fetching {}", status, url)]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Download of {} timed out", url)]
    Timeout { url: String },

    #[error("I/O error on {},\n  caused by: {}", path.display(), source)]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Result alias for `TransferError`.
pub type Result<T, E = TransferError> = core::result::Result<T, E>;
