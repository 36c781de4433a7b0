//! Webhook handlers.

mod ping;
mod push;


use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use ghsync_core::{
    constants::{GITHUB_EVENT_HEADER, GITHUB_SIGNATURE_HEADER},
    event_type::EventType,
    validate_secret, RequestContext,
};

use crate::{server::AppContext, utils::convert_payload_to_bytes, ServerError};

fn build_request_context(req: &HttpRequest, body: Vec<u8>) -> RequestContext {
    [GITHUB_EVENT_HEADER, GITHUB_SIGNATURE_HEADER]
        .into_iter()
        .fold(RequestContext::new(body), |ctx, name| {
            match req.headers().get(name).and_then(|x| x.to_str().ok()) {
                Some(value) => ctx.with_header(name, value),
                None => ctx,
            }
        })
}

#[tracing::instrument(skip_all, fields(event = tracing::field::Empty))]
pub(crate) async fn event_handler(
    req: HttpRequest,
    mut payload: web::Payload,
    ctx: web::Data<AppContext>,
) -> ActixResult<HttpResponse> {
    let body = convert_payload_to_bytes(&mut payload)
        .await
        .map_err(|e| ServerError::PayloadError {
            message: e.to_string(),
        })?;

    let request = build_request_context(&req, body.to_vec());
    tracing::Span::current().record("event", request.event_name().as_str());

    if let Some(secret) = ctx.webhook_secret() {
        validate_secret(&request, secret).map_err(ServerError::from)?;
    }

    match request.event_type() {
        Some(EventType::Ping) => Ok(ping::ping_event()),
        _ => push::push_event(&ctx, &request).await.map_err(Into::into),
    }
}

/// Configure webhook handlers.
pub fn configure_webhook_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(event_handler)));
}
