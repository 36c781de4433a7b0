//! Inbound request context.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use crate::{
    constants::{GITHUB_EVENT_HEADER, GITHUB_SIGNATURE_HEADER},
    event_type::EventType,
    types::GhPushEvent,
    CoreError, Result,
};

/// One inbound webhook delivery.
///
/// Keeps the exact body bytes for signature checks, and decodes them at
/// most once.
#[derive(Debug, Default)]
pub struct RequestContext {
    raw_body: Vec<u8>,
    headers: HashMap<String, String>,
    payload: OnceLock<Result<GhPushEvent, Arc<serde_json::Error>>>,
}

impl RequestContext {
    pub fn new<B: Into<Vec<u8>>>(raw_body: B) -> Self {
        Self {
            raw_body: raw_body.into(),
            ..Default::default()
        }
    }

    /// Add a header. Names are case-insensitive.
    pub fn with_header<N: AsRef<str>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers
            .insert(name.as_ref().to_lowercase(), value.into());
        self
    }

    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Lower-cased event name, empty when the header is missing.
    pub fn event_name(&self) -> String {
        self.header(GITHUB_EVENT_HEADER)
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn event_type(&self) -> Option<EventType> {
        EventType::try_from(self.event_name().as_str()).ok()
    }

    pub fn signature(&self) -> Option<&str> {
        self.header(GITHUB_SIGNATURE_HEADER)
    }

    /// Decoded push payload.
    pub fn push_payload(&self) -> Result<&GhPushEvent> {
        self.payload
            .get_or_init(|| serde_json::from_slice(&self.raw_body).map_err(Arc::new))
            .as_ref()
            .map_err(|e| CoreError::PayloadParse { source: e.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::RequestContext;
    use crate::{event_type::EventType, CoreError};

    #[test]
    fn test_headers_are_case_insensitive() {
        let ctx = RequestContext::new("{}")
            .with_header("x-github-event", "PUSH")
            .with_header("X-HUB-SIGNATURE", "sha1=00");

        assert_eq!(ctx.event_name(), "push");
        assert_eq!(ctx.event_type(), Some(EventType::Push));
        assert_eq!(ctx.signature(), Some("sha1=00"));
    }

    #[test]
    fn test_missing_event_header() {
        let ctx = RequestContext::new("{}");
        assert_eq!(ctx.event_name(), "");
        assert_eq!(ctx.event_type(), None);
    }

    #[test]
    fn test_payload_is_decoded_once() {
        let ctx = RequestContext::new(
            r#"{"ref": "refs/heads/main", "repository": {"full_name": "acme/site"}, "commits": []}"#,
        );

        let first = ctx.push_payload().unwrap();
        let second = ctx.push_payload().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_payload_parse_error() {
        let ctx = RequestContext::new("not json");
        assert!(matches!(
            ctx.push_payload(),
            Err(CoreError::PayloadParse { .. })
        ));
        // The failure is memoized too.
        assert!(ctx.push_payload().is_err());
    }
}
