//! Ping webhook handlers.

use actix_web::HttpResponse;
use tracing::info;

pub(crate) fn ping_event() -> HttpResponse {
    info!(message = "Ping event received");
    HttpResponse::Ok().body("Ping.")
}
