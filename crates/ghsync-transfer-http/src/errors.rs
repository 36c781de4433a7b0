use ghsync_transfer_interface::TransferError;

#[derive(Debug, thiserror::Error)]
pub enum HttpTransferError {
    #[error(transparent)]
    HttpError { source: reqwest::Error },

    #[error("Could not build HTTP client,\n  caused by: {}", source)]
    ClientBuildError { source: reqwest::Error },
}

impl From<reqwest::Error> for HttpTransferError {
    fn from(e: reqwest::Error) -> Self {
        HttpTransferError::HttpError { source: e }
    }
}

impl From<HttpTransferError> for TransferError {
    fn from(e: HttpTransferError) -> Self {
        TransferError::ImplementationError { source: e.into() }
    }
}
