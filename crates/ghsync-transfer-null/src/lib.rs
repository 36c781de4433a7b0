//! Null driver for file transfers.
//!
//! Downloads are only logged, the destination is never touched.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use ghsync_transfer_interface::{DownloadRequest, Result, TransferService};
use tracing::info;

/// Null transfer service.
#[derive(Clone, Default)]
pub struct NullTransferService {
    _private: (),
}

impl NullTransferService {
    /// Build a null transfer service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl TransferService for NullTransferService {
    async fn download_to_file(&self, request: DownloadRequest) -> Result<u64> {
        info!(
            url = %request.url,
            destination = %request.destination.display(),
            message = "Skipping download"
        );

        Ok(0)
    }
}
