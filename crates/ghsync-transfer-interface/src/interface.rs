use std::path::PathBuf;

use async_trait::async_trait;

use crate::{Credentials, Result};

/// A single raw file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Source URL.
    pub url: String,
    /// Optional basic-auth credentials.
    pub credentials: Option<Credentials>,
    /// Destination file, truncated before the body is written.
    pub destination: PathBuf,
}

/// Outbound file transfer interface.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait TransferService: Send + Sync {
    /// Download a URL into a local file, returning the written byte count.
    async fn download_to_file(&self, request: DownloadRequest) -> Result<u64>;
}
