//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
mod health;
mod metrics;
pub mod server;
pub mod transfer;
pub mod utils;
mod webhook;

pub use errors::{Result, ServerError};
