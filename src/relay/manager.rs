//! Relay manager backed by the nostr-sdk client.
//!
//! The core consumes relays through the [`RelayService`] trait; this module
//! provides the bundled implementation. Subscription multiplexing and
//! reconnection live inside the nostr-sdk client, outside this crate's
//! contract.

use std::time::Duration;

use async_trait::async_trait;
use nostr::{Event, Filter, RelayUrl};
use nostr_sdk::Client;

use super::error::{RelayError, RelayResult};
use super::types::PublishResult;
use super::RelayService;

/// Default timeout for relay operations.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Manager for Nostr relay connections.
///
/// Wraps a single nostr-sdk [`Client`] without a signer; all events arrive
/// here already signed by the identity session.
///
/// # Example
///
/// ```rust,ignore
/// use lantern_core::relay::{RelayManager, RelayService};
///
/// let manager = RelayManager::new();
/// let relays = vec!["wss://relay.damus.io".to_string()];
/// let result = manager.publish(&relays, &event).await?;
/// ```
#[derive(Debug, Default)]
pub struct RelayManager {
    client: Client,
}

impl RelayManager {
    /// Creates a relay manager with no connected relays.
    ///
    /// Relays are added lazily per operation from the URL lists callers pass.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::default(),
        }
    }

    /// Adds the given relays to the client and connects.
    async fn connect_relays(&self, relays: &[String]) -> RelayResult<()> {
        let urls = Self::validate_relay_urls(relays)?;

        for url in &urls {
            // Ignore errors when adding relays - they may already be added
            let _: Result<bool, _> = self.client.add_relay(url.as_str()).await;
        }

        self.client.connect().await;
        Ok(())
    }

    /// Validates relay URL syntax.
    fn validate_relay_urls(relays: &[String]) -> RelayResult<Vec<RelayUrl>> {
        let mut urls = Vec::with_capacity(relays.len());

        for relay in relays {
            let url = RelayUrl::parse(relay)
                .map_err(|e| RelayError::InvalidUrl(format!("{relay}: {e}")))?;
            urls.push(url);
        }

        Ok(urls)
    }
}

#[async_trait]
impl RelayService for RelayManager {
    async fn publish(&self, relays: &[String], event: &Event) -> RelayResult<PublishResult> {
        self.connect_relays(relays).await?;

        let send_result = tokio::time::timeout(DEFAULT_TIMEOUT, self.client.send_event(event))
            .await
            .map_err(|_| RelayError::Timeout("event publish".to_string()))?
            .map_err(|e| RelayError::Publish(e.to_string()))?;

        let mut accepted_by = Vec::new();
        let mut rejected_by = Vec::new();

        for url in &send_result.success {
            accepted_by.push(url.to_string());
        }

        for (url, error) in &send_result.failed {
            rejected_by.push((url.to_string(), error.clone()));
        }

        let result = PublishResult {
            event_id: event.id,
            accepted_by,
            rejected_by,
        };

        if result.is_success() {
            Ok(result)
        } else {
            Err(RelayError::AllRelaysFailed)
        }
    }

    async fn query_one(&self, relays: &[String], filter: Filter) -> RelayResult<Option<Event>> {
        self.connect_relays(relays).await?;

        let events = self
            .client
            .fetch_events(filter, DEFAULT_TIMEOUT)
            .await
            .map_err(|e| RelayError::Fetch(e.to_string()))?;

        Ok(events.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_relay_urls_accepts_wss() {
        let relays = vec!["wss://relay.damus.io".to_string()];
        let result = RelayManager::validate_relay_urls(&relays);

        assert!(result.is_ok());
    }

    #[test]
    fn validate_relay_urls_accepts_multiple() {
        let relays = vec![
            "wss://relay.damus.io".to_string(),
            "wss://relay.nostr.wine".to_string(),
            "wss://nos.lol".to_string(),
        ];
        let result = RelayManager::validate_relay_urls(&relays);

        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 3);
    }

    #[test]
    fn validate_relay_urls_empty_list() {
        let relays: Vec<String> = vec![];
        let result = RelayManager::validate_relay_urls(&relays);

        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn validate_relay_urls_invalid_url_format() {
        let relays = vec!["not-a-url".to_string()];
        let result = RelayManager::validate_relay_urls(&relays);

        assert!(matches!(result, Err(RelayError::InvalidUrl(_))));
    }
}
