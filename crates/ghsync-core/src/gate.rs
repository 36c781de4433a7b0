//! Entry points turning a request into a push handler.

use ghsync_crypto::Signature;
use tracing::{debug, warn};

use crate::{event_type::EventType, handler::PushHandler, request::RequestContext, CoreError, Result};

/// React to push events on a specific branch.
///
/// Any other event, or a push to another branch, yields an inactive handler.
#[tracing::instrument(skip(ctx), fields(event = %ctx.event_name()))]
pub fn on_push_to_branch(ctx: &RequestContext, branch_name: &str) -> Result<PushHandler> {
    if ctx.event_type() != Some(EventType::Push) {
        debug!(message = "Ignoring non-push event");
        return Ok(PushHandler::inactive());
    }

    let payload = ctx.push_payload()?;
    if payload.reference != format!("refs/heads/{branch_name}") {
        debug!(reference = %payload.reference, message = "Ignoring push to another reference");
        return Ok(PushHandler::inactive());
    }

    Ok(PushHandler::new(
        branch_name,
        &payload.repository.full_name,
        payload.commits.as_deref(),
    ))
}

/// Check the signature header against the raw body.
///
/// A missing signature is never secure.
pub fn is_request_secure(ctx: &RequestContext, secret: &str) -> bool {
    let Some(header) = ctx.signature() else {
        return false;
    };

    let valid = Signature::from_header(header)
        .and_then(|sig| sig.is_valid(ctx.raw_body(), secret));

    match valid {
        Ok(valid) => valid,
        Err(e) => {
            warn!(error = %e, message = "Malformed webhook signature");
            false
        }
    }
}

/// Fail with `SignatureMismatch` when the request is not secure.
pub fn validate_secret(ctx: &RequestContext, secret: &str) -> Result<()> {
    if is_request_secure(ctx, secret) {
        Ok(())
    } else {
        Err(CoreError::SignatureMismatch)
    }
}
