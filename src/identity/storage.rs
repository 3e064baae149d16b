//! Durable key-value slot for session persistence.
//!
//! This module defines the [`SessionStore`] trait for the single durable slot
//! holding the hex-encoded session secret. Implementations are provided by the
//! platform layer (browser local storage, OS keychain, etc.); the core never
//! touches storage directly.
//!
//! # Security
//!
//! - Only secret material is persisted, never the public key
//! - The slot is scoped to the process lifetime, not long-term archival storage

use super::error::IdentityError;

/// Storage key for the hex-encoded session secret.
pub const SESSION_SECRET_SLOT: &str = "lantern.session.secret";

/// Trait for the durable key-value slot backing session persistence.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across threads.
pub trait SessionStore: Send + Sync {
    /// Retrieves the value stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the retrieval operation fails.
    fn get(&self, key: &str) -> Result<Option<String>, IdentityError>;

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn set(&self, key: &str, value: &str) -> Result<(), IdentityError>;

    /// Clears the slot for `key`. Clearing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    fn remove(&self, key: &str) -> Result<(), IdentityError>;
}
