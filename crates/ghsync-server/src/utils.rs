//! Webhook utilities module.

use std::error::Error;

use actix_web::web::{Bytes, BytesMut, Payload};
use futures::stream::StreamExt;

/// Convert Actix payload to bytes.
pub async fn convert_payload_to_bytes(payload: &mut Payload) -> Result<Bytes, Box<dyn Error>> {
    let mut body = BytesMut::new();

    while let Some(chunk) = payload.next().await {
        body.extend_from_slice(&chunk?);
    }

    Ok(body.into())
}
