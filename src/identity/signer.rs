//! Signing strategies for the active session.
//!
//! A session signs with exactly one of two strategies:
//!
//! - [`SigningStrategy::LocalKey`]: the secret is session-held; signing and
//!   NIP-04 encryption run synchronously against the local keypair.
//! - [`SigningStrategy::External`]: no local secret exists; every operation is
//!   delegated to an [`ExternalSigner`] capability (e.g. a browser extension)
//!   and may fail with [`IdentityError::SignerUnavailable`] or
//!   [`IdentityError::SignerRejected`].
//!
//! External results are never cached: each signing or encryption request
//! re-invokes the capability so the user keeps veto power over every call.

use std::sync::Arc;

use async_trait::async_trait;
use nostr::{Event, PublicKey, UnsignedEvent};
use thiserror::Error;

use super::error::{IdentityError, Result};
use super::keypair::LocalKeypair;

/// Errors surfaced by an external signer capability.
#[derive(Error, Debug)]
pub enum SignerError {
    /// The capability is not reachable (absent, disconnected, timed out).
    #[error("signer unavailable: {0}")]
    Unavailable(String),

    /// The capability (or its user) declined the request.
    #[error("signer rejected: {0}")]
    Rejected(String),
}

impl From<SignerError> for IdentityError {
    fn from(e: SignerError) -> Self {
        match e {
            SignerError::Unavailable(msg) => Self::SignerUnavailable(msg),
            SignerError::Rejected(msg) => Self::SignerRejected(msg),
        }
    }
}

/// A user-controlled signing capability that holds the secret key itself.
///
/// The core never sees the secret; it hands over unsigned payloads and gets
/// back signed/encrypted results. Presence is detected once per login attempt
/// via [`SignerDiscovery`].
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Returns the public key the capability signs for.
    async fn get_public_key(&self) -> std::result::Result<PublicKey, SignerError>;

    /// Signs an unsigned event, producing its id and signature.
    async fn sign_event(
        &self,
        unsigned: UnsignedEvent,
    ) -> std::result::Result<Event, SignerError>;

    /// Encrypts a direct message for `peer`.
    async fn encrypt(
        &self,
        peer: &PublicKey,
        plaintext: &str,
    ) -> std::result::Result<String, SignerError>;

    /// Decrypts a direct message from `peer`.
    async fn decrypt(
        &self,
        peer: &PublicKey,
        ciphertext: &str,
    ) -> std::result::Result<String, SignerError>;
}

/// Detects whether an external signer capability is present.
///
/// Invoked exactly once per `try_login` attempt; the result is not cached
/// across attempts.
#[async_trait]
pub trait SignerDiscovery: Send + Sync {
    /// Attempts to locate an external signer capability.
    async fn discover(&self) -> std::result::Result<Arc<dyn ExternalSigner>, SignerError>;
}

/// The signing capability held by an active session.
///
/// Exactly one strategy is active at a time; a logged-out session holds none.
pub enum SigningStrategy {
    /// Secret is session-held; operations run locally.
    LocalKey(LocalKeypair),

    /// All operations delegated to an external capability.
    External(Arc<dyn ExternalSigner>),
}

impl SigningStrategy {
    /// Signs an unsigned event with the active strategy.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Signing`] for local failures, or
    /// [`IdentityError::SignerUnavailable`] / [`IdentityError::SignerRejected`]
    /// when the external capability fails.
    pub async fn sign_event(&self, unsigned: UnsignedEvent) -> Result<Event> {
        match self {
            Self::LocalKey(keypair) => keypair.sign_event(unsigned),
            Self::External(signer) => signer.sign_event(unsigned).await.map_err(Into::into),
        }
    }

    /// Encrypts a direct message for `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Encryption`] for local failures, or the signer
    /// error variants when delegation fails.
    pub async fn encrypt(&self, peer: &PublicKey, plaintext: &str) -> Result<String> {
        match self {
            Self::LocalKey(keypair) => keypair.encrypt(peer, plaintext),
            Self::External(signer) => signer.encrypt(peer, plaintext).await.map_err(Into::into),
        }
    }

    /// Decrypts a direct message from `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Decryption`] for local failures, or the signer
    /// error variants when delegation fails.
    pub async fn decrypt(&self, peer: &PublicKey, ciphertext: &str) -> Result<String> {
        match self {
            Self::LocalKey(keypair) => keypair.decrypt(peer, ciphertext),
            Self::External(signer) => signer.decrypt(peer, ciphertext).await.map_err(Into::into),
        }
    }
}

impl std::fmt::Debug for SigningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalKey(keypair) => f.debug_tuple("LocalKey").field(keypair).finish(),
            Self::External(_) => f.debug_tuple("External").finish(),
        }
    }
}
