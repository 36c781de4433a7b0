//! HTTP driver for file transfers.

#![warn(clippy::all)]

mod errors;

use std::time::Duration;

use async_trait::async_trait;
use ghsync_config::Config;
use ghsync_transfer_interface::{DownloadRequest, Result, TransferError, TransferService};
use reqwest::{Client, ClientBuilder};
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub use crate::errors::HttpTransferError;

/// Transfer service streaming raw files over HTTP(S).
#[derive(Clone)]
pub struct HttpTransferService {
    client: Client,
}

impl HttpTransferService {
    /// Build a service from configuration.
    pub fn new(config: &Config) -> Result<Self, HttpTransferError> {
        let client = get_client_builder(config)
            .build()
            .map_err(|e| HttpTransferError::ClientBuildError { source: e })?;

        Ok(Self { client })
    }

    async fn download_inner(&self, request: &DownloadRequest) -> Result<u64> {
        // Truncate first: a failed transfer leaves an empty or partial file behind.
        let mut file = tokio::fs::File::create(&request.destination)
            .await
            .map_err(|e| io_error(request, e))?;

        let mut builder = self.client.get(&request.url);
        if let Some(credentials) = &request.credentials {
            builder = builder.basic_auth(credentials.username(), Some(credentials.password()));
        }

        let mut response = builder
            .send()
            .await
            .map_err(|e| http_error(request, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::UnexpectedStatus {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        let mut written = 0;
        while let Some(chunk) = response.chunk().await.map_err(|e| http_error(request, e))? {
            file.write_all(&chunk)
                .await
                .map_err(|e| io_error(request, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| io_error(request, e))?;
        Ok(written)
    }
}

#[async_trait]
impl TransferService for HttpTransferService {
    #[tracing::instrument(skip_all, fields(url = %request.url))]
    async fn download_to_file(&self, request: DownloadRequest) -> Result<u64> {
        let written = self.download_inner(&request).await?;
        debug!(
            url = %request.url,
            destination = %request.destination.display(),
            bytes = written,
            message = "Download complete"
        );

        Ok(written)
    }
}

/// Get a client builder with the configured timeouts.
pub fn get_client_builder(config: &Config) -> ClientBuilder {
    ClientBuilder::new()
        .connect_timeout(Duration::from_millis(config.transfer.connect_timeout))
        .timeout(Duration::from_millis(config.transfer.timeout))
        .user_agent(format!("{}/{}", config.name, config.version))
}

fn http_error(request: &DownloadRequest, error: reqwest::Error) -> TransferError {
    if error.is_timeout() {
        TransferError::Timeout {
            url: request.url.clone(),
        }
    } else {
        HttpTransferError::from(error).into()
    }
}

fn io_error(request: &DownloadRequest, error: std::io::Error) -> TransferError {
    TransferError::IoError {
        path: request.destination.clone(),
        source: error,
    }
}
