//! Transfer wrappers.

use async_trait::async_trait;
use ghsync_config::Config;
use ghsync_transfer_http::HttpTransferService;
use ghsync_transfer_interface::{DownloadRequest, Result, TransferService};

use crate::{
    metrics::{TRANSFER_CALLS, TRANSFER_FAILURES},
    ServerError,
};

/// HTTP transfer service with metrics.
pub struct MetricsTransferService {
    inner: HttpTransferService,
}

impl MetricsTransferService {
    /// Creates a new service.
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        Ok(Self {
            inner: HttpTransferService::new(config)
                .map_err(|e| ServerError::TransferSetupError { source: e })?,
        })
    }
}

#[async_trait]
impl TransferService for MetricsTransferService {
    async fn download_to_file(&self, request: DownloadRequest) -> Result<u64> {
        TRANSFER_CALLS.inc();
        let result = self.inner.download_to_file(request).await;
        if result.is_err() {
            TRANSFER_FAILURES.inc();
        }

        result
    }
}
