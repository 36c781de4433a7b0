//! Push-to-folder synchronization core.

#![warn(clippy::all)]

pub mod changes;
pub mod comment;
pub mod constants;
mod errors;
pub mod event_type;
pub mod gate;
pub mod handler;
pub mod request;
pub mod sync;
pub mod types;
mod utils;

pub use changes::{ChangeKind, ChangeRecord, ChangeSet};
pub use errors::{CoreError, Result};
pub use gate::{is_request_secure, on_push_to_branch, validate_secret};
pub use handler::PushHandler;
pub use request::RequestContext;
pub use sync::SyncReport;
