//! Event types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventTypeError {
    /// Unsupported event.
    #[error("Unsupported event: {}", event)]
    UnsupportedEvent { event: String },
}

/// Event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Ping event.
    Ping,
    /// Push event.
    Push,
}

impl EventType {
    /// Convert event type to static str.
    pub fn to_str(self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl TryFrom<&str> for EventType {
    type Error = EventTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match &value.to_lowercase()[..] {
            "ping" => Ok(Self::Ping),
            "push" => Ok(Self::Push),
            _ => Err(EventTypeError::UnsupportedEvent {
                event: value.to_owned(),
            }),
        }
    }
}

impl From<EventType> for &'static str {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Ping => "ping",
            EventType::Push => "push",
        }
    }
}
