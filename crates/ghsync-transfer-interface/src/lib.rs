//! Transfer interface.

#![warn(clippy::all)]

mod credentials;
mod errors;
mod interface;

pub use credentials::Credentials;
pub use errors::{Result, TransferError};
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockTransferService;
pub use interface::{DownloadRequest, TransferService};
