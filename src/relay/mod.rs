//! Multi-relay publish/query service.
//!
//! The core treats relays as an external collaborator behind the
//! [`RelayService`] trait: fire-and-await publish and single-result query,
//! with no protocol-level retry. [`RelayManager`] is the bundled nostr-sdk
//! implementation.

use async_trait::async_trait;
use nostr::{Event, Filter};

mod error;
mod manager;
mod types;

pub use error::{RelayError, RelayResult};
pub use manager::RelayManager;
pub use types::PublishResult;

/// Contract the core requires from a relay service.
#[async_trait]
pub trait RelayService: Send + Sync {
    /// Publishes a signed event to the given relays.
    ///
    /// # Errors
    ///
    /// Returns an error if no relay accepts the event or the operation
    /// cannot be carried out.
    async fn publish(&self, relays: &[String], event: &Event) -> RelayResult<PublishResult>;

    /// Fetches at most one event matching `filter` from the given relays.
    ///
    /// `Ok(None)` means no relay had a match; that is a normal outcome, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the query itself fails.
    async fn query_one(&self, relays: &[String], filter: Filter) -> RelayResult<Option<Event>>;
}
