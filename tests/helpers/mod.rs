//! Reusable test helpers: in-memory collaborators for the identity session
//! and the profile directory.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use lantern_core::identity::{
    ExternalSigner, IdentityError, NotificationSink, SessionStore, SignerDiscovery, SignerError,
};
use lantern_core::relay::{PublishResult, RelayResult, RelayService};
use nostr::{Event, EventBuilder, Filter, Keys, Metadata};

/// In-memory durable slot shared across simulated restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, IdentityError> {
        let data = self
            .data
            .read()
            .map_err(|e| IdentityError::Storage(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), IdentityError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| IdentityError::Storage(e.to_string()))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), IdentityError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| IdentityError::Storage(e.to_string()))?;
        data.remove(key);
        Ok(())
    }
}

/// Discovery that never finds an external signer, forcing the local-key path.
pub struct AbsentDiscovery;

#[async_trait]
impl SignerDiscovery for AbsentDiscovery {
    async fn discover(&self) -> Result<Arc<dyn ExternalSigner>, SignerError> {
        Err(SignerError::Unavailable("no capability present".to_string()))
    }
}

/// Notifier that records advisories and clipboard writes.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
    pub clipboard: Mutex<Vec<String>>,
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn copy_to_clipboard(&self, text: &str) {
        self.clipboard.lock().unwrap().push(text.to_string());
    }
}

/// Relay mock serving at most one fixed event, with a query counter.
pub struct MockRelay {
    response: Option<Event>,
    pub query_calls: AtomicUsize,
}

impl MockRelay {
    pub fn serving(event: Event) -> Self {
        Self {
            response: Some(event),
            query_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            response: None,
            query_calls: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelayService for MockRelay {
    async fn publish(&self, _relays: &[String], _event: &Event) -> RelayResult<PublishResult> {
        unimplemented!("publish is not exercised by these tests")
    }

    async fn query_one(&self, _relays: &[String], _filter: Filter) -> RelayResult<Option<Event>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Builds a signed kind-0 metadata event for the given keys.
pub fn metadata_event(keys: &Keys, metadata: &Metadata) -> Event {
    EventBuilder::metadata(metadata)
        .sign_with_keys(keys)
        .expect("should sign metadata event")
}
