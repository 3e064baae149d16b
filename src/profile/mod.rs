//! Profile metadata resolution with memoization.
//!
//! [`ProfileDirectory`] resolves a public key to its published metadata event
//! (kind 0) through a [`RelayService`] and caches the result. The cache is
//! keyed by public key, holds at most one entry per key, and keeps the first
//! successful fetch forever: entries are never invalidated or refreshed.
//!
//! Lookup failures are logged and swallowed; callers receive `None` and must
//! treat it as "unknown profile", never as a hard failure.

use std::collections::HashMap;
use std::sync::Arc;

use nostr::{Event, Filter, JsonUtil, Kind, Metadata, PublicKey};
use tokio::sync::RwLock;

use crate::relay::RelayService;

/// Memoizing directory of profile metadata events.
///
/// # Concurrency
///
/// Two simultaneous resolutions for the same key may both miss the cache and
/// both query; the first write wins and the race is benign because the value
/// is equivalent. The cache lock is never held across an await point.
pub struct ProfileDirectory {
    relay: Arc<dyn RelayService>,
    relays: Vec<String>,
    cache: RwLock<HashMap<PublicKey, Event>>,
}

impl ProfileDirectory {
    /// Creates a directory that queries the given relays.
    #[must_use]
    pub fn new(relay: Arc<dyn RelayService>, relays: Vec<String>) -> Self {
        Self {
            relay,
            relays,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves a public key to its most recent metadata event.
    ///
    /// Checks the cache first; on a miss, queries the relays for a single
    /// kind-0 event authored by `public_key`. `None` means no relay has the
    /// metadata (or the lookup failed, which is logged here and swallowed).
    pub async fn resolve(&self, public_key: &PublicKey) -> Option<Event> {
        if let Some(event) = self.cache.read().await.get(public_key) {
            return Some(event.clone());
        }

        let filter = Filter::new()
            .author(*public_key)
            .kind(Kind::Metadata)
            .limit(1);

        match self.relay.query_one(&self.relays, filter).await {
            Ok(Some(event)) => {
                let mut cache = self.cache.write().await;
                // First successful fetch wins
                let cached = cache.entry(*public_key).or_insert(event);
                Some(cached.clone())
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    public_key = %public_key,
                    error = %e,
                    "profile metadata lookup failed"
                );
                None
            }
        }
    }

    /// Resolves a public key to typed profile metadata.
    ///
    /// Convenience over [`resolve`](Self::resolve): parses the event content
    /// as NIP-01 metadata. A cached event with unparseable content is logged
    /// and reported as `None`.
    pub async fn resolve_metadata(&self, public_key: &PublicKey) -> Option<Metadata> {
        let event = self.resolve(public_key).await?;

        match Metadata::from_json(&event.content) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                tracing::warn!(
                    public_key = %public_key,
                    error = %e,
                    "profile metadata content is not valid JSON"
                );
                None
            }
        }
    }
}
