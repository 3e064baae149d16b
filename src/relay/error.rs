//! Error types for relay operations.

use thiserror::Error;

/// Errors that can occur during relay communication.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Event publishing failed.
    #[error("Failed to publish event: {0}")]
    Publish(String),

    /// Invalid relay URL.
    #[error("Invalid relay URL: {0}")]
    InvalidUrl(String),

    /// Event fetch failed.
    #[error("Failed to fetch events: {0}")]
    Fetch(String),

    /// Timeout waiting for operation.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// All relays failed.
    #[error("All relays failed to accept the event")]
    AllRelaysFailed,
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_error_display() {
        let error = RelayError::Publish("rate limited".to_string());
        assert_eq!(error.to_string(), "Failed to publish event: rate limited");
    }

    #[test]
    fn invalid_url_error_display() {
        let error = RelayError::InvalidUrl("not-a-url".to_string());
        assert_eq!(error.to_string(), "Invalid relay URL: not-a-url");
    }

    #[test]
    fn fetch_error_display() {
        let error = RelayError::Fetch("connection reset".to_string());
        assert_eq!(error.to_string(), "Failed to fetch events: connection reset");
    }

    #[test]
    fn timeout_error_display() {
        let error = RelayError::Timeout("metadata query".to_string());
        assert_eq!(error.to_string(), "Operation timed out: metadata query");
    }

    #[test]
    fn all_relays_failed_error_display() {
        let error = RelayError::AllRelaysFailed;
        assert_eq!(error.to_string(), "All relays failed to accept the event");
    }
}
