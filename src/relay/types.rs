//! Types shared by relay operations.

use nostr::EventId;

/// Outcome of publishing an event to a set of relays.
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Id of the published event.
    pub event_id: EventId,

    /// Relays that accepted the event.
    pub accepted_by: Vec<String>,

    /// Relays that rejected the event, with their reasons.
    pub rejected_by: Vec<(String, String)>,
}

impl PublishResult {
    /// Returns `true` if at least one relay accepted the event.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.accepted_by.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr::{EventBuilder, Keys, Kind};

    fn test_event_id() -> EventId {
        EventBuilder::new(Kind::TextNote, "test")
            .sign_with_keys(&Keys::generate())
            .unwrap()
            .id
    }

    #[test]
    fn success_when_any_relay_accepted() {
        let result = PublishResult {
            event_id: test_event_id(),
            accepted_by: vec!["wss://relay.example.com".to_string()],
            rejected_by: vec![("wss://other.example.com".to_string(), "spam".to_string())],
        };
        assert!(result.is_success());
    }

    #[test]
    fn failure_when_no_relay_accepted() {
        let result = PublishResult {
            event_id: test_event_id(),
            accepted_by: vec![],
            rejected_by: vec![("wss://relay.example.com".to_string(), "blocked".to_string())],
        };
        assert!(!result.is_success());
    }
}
