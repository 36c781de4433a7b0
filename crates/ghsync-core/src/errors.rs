//! Core errors.

use std::{path::PathBuf, sync::Arc};

use ghsync_transfer_interface::TransferError;
use thiserror::Error;

use crate::constants::SIGNATURE_MISMATCH_MESSAGE;

/// Core error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error while parsing push payload,\n  caused by: {}", source)]
    PayloadParse { source: Arc<serde_json::Error> },

    #[error("{}", SIGNATURE_MISMATCH_MESSAGE)]
    SignatureMismatch,

    #[error("Transfer error,\n  caused by: {}", source)]
    Transfer { source: TransferError },

    #[error("I/O error on {},\n  caused by: {}", path.display(), source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Path leaves the target folder: {}", path)]
    UnsafePath { path: String },

    #[error("Could not write to output,\n  caused by: {}", source)]
    Output { source: std::io::Error },
}

impl From<TransferError> for CoreError {
    fn from(e: TransferError) -> Self {
        CoreError::Transfer { source: e }
    }
}

/// Result alias for `CoreError`.
pub type Result<T, E = CoreError> = core::result::Result<T, E>;
