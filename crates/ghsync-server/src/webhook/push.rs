//! Push webhook handlers.

use actix_web::HttpResponse;
use ghsync_core::{on_push_to_branch, RequestContext};
use tracing::debug;

use crate::{metrics::SYNC_RUNS, server::AppContext, Result};

/// Apply a push to the configured folder, answering with the progress lines.
pub(crate) async fn push_event(ctx: &AppContext, request: &RequestContext) -> Result<HttpResponse> {
    let config = &ctx.config;
    let handler = on_push_to_branch(request, &config.sync.branch)?.apply_config(config);

    let mut output: Vec<u8> = vec![];
    if handler.is_active() {
        SYNC_RUNS.inc();
        handler
            .push_changes_to_folder(
                &config.sync.target_dir,
                ctx.transfer_service.as_ref(),
                &mut output,
            )
            .await?;
    } else {
        debug!(message = "Nothing to apply");
    }

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(output))
}
