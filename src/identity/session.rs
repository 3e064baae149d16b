//! Identity session state machine.
//!
//! An [`IdentitySession`] is either `LoggedOut` or `Active` with exactly one
//! [`SigningStrategy`] and its public key. Collaborators (persistence slot,
//! signer discovery, notification sink) are injected at construction; there is
//! no process-wide singleton.
//!
//! # Persistence
//!
//! Every transition into `Active` with a local key writes the hex-encoded
//! secret to the durable slot; `sign_out` clears it. At construction the slot
//! is read back and, if non-empty, the session restores to `Active` by
//! re-deriving the public key. The restore performs no writes. External-signer
//! sessions hold no secret and are never persisted.
//!
//! # Reentrancy
//!
//! State transitions take `&mut self`, so concurrent identity-mutating calls
//! within one process are serialized by the borrow checker. Callers sharing a
//! session across tasks must wrap it in their own mutex.

use std::sync::Arc;

use nostr::{Event, EventBuilder, Kind, PublicKey, Tag};

use super::error::{IdentityError, Result};
use super::keypair::LocalKeypair;
use super::notify::NotificationSink;
use super::signer::{SignerDiscovery, SigningStrategy};
use super::storage::{SessionStore, SESSION_SECRET_SLOT};

/// Advisory shown when `try_login` generates a fallback key.
const FALLBACK_KEY_ADVISORY: &str =
    "No external signer was found, so a new key was generated for you. \
     It has been copied to your clipboard - save it somewhere safe.";

/// The session's position in its lifecycle.
enum SessionState {
    /// No identity established.
    LoggedOut,

    /// Exactly one strategy active.
    Active {
        strategy: SigningStrategy,
        public_key: PublicKey,
    },
}

/// A user's identity on the network.
///
/// Constructed once per application instance and passed by reference to all
/// consumers.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use lantern_core::identity::{IdentitySession, SessionStore, SignerDiscovery, NotificationSink};
/// # async fn demo(
/// #     storage: Arc<dyn SessionStore>,
/// #     discovery: Arc<dyn SignerDiscovery>,
/// #     notifier: Arc<dyn NotificationSink>,
/// # ) -> Result<(), lantern_core::IdentityError> {
/// let mut session = IdentitySession::new(storage, discovery, notifier)?;
/// let pubkey = session.try_login().await?;
/// let event = session
///     .make_event(nostr::Kind::TextNote, "hello nostr", vec![])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct IdentitySession {
    storage: Arc<dyn SessionStore>,
    discovery: Arc<dyn SignerDiscovery>,
    notifier: Arc<dyn NotificationSink>,
    state: SessionState,
}

impl IdentitySession {
    /// Creates a session, restoring a persisted local key if one exists.
    ///
    /// The restore is idempotent and side-effect-free: it derives the public
    /// key from the stored secret but never rewrites the slot. A corrupt slot
    /// is logged and left intact; the session then starts `LoggedOut`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Storage`] if the slot cannot be read.
    pub fn new(
        storage: Arc<dyn SessionStore>,
        discovery: Arc<dyn SignerDiscovery>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self> {
        let state = match storage.get(SESSION_SECRET_SLOT)? {
            Some(secret_hex) => match LocalKeypair::from_secret_hex(&secret_hex) {
                Ok(keypair) => {
                    let public_key = keypair.public_key();
                    SessionState::Active {
                        strategy: SigningStrategy::LocalKey(keypair),
                        public_key,
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "persisted session secret is invalid, starting logged out");
                    SessionState::LoggedOut
                }
            },
            None => SessionState::LoggedOut,
        };

        Ok(Self {
            storage,
            discovery,
            notifier,
            state,
        })
    }

    /// Establishes an identity, preferring an external signer.
    ///
    /// No-op success when already `Active`. Otherwise attempts signer
    /// discovery once; on success the session holds only the discovered
    /// public key. On discovery failure or rejection it falls back to a
    /// freshly generated local key, persists it, and raises a one-time
    /// advisory - `try_login` never returns without a usable identity.
    ///
    /// Fallback happens only here, at discovery time. A signer failure on a
    /// later operation never silently replaces an established identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Storage`] if the fallback key cannot be
    /// persisted.
    pub async fn try_login(&mut self) -> Result<PublicKey> {
        if let SessionState::Active { public_key, .. } = &self.state {
            return Ok(*public_key);
        }

        match self.discovery.discover().await {
            Ok(signer) => match signer.get_public_key().await {
                Ok(public_key) => {
                    self.state = SessionState::Active {
                        strategy: SigningStrategy::External(signer),
                        public_key,
                    };
                    Ok(public_key)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "external signer refused public key, falling back to local key");
                    self.fallback_to_local_key()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "no external signer discovered, falling back to local key");
                self.fallback_to_local_key()
            }
        }
    }

    /// Establishes a local-key identity from a hex-encoded secret.
    ///
    /// Overwrites any prior state, including an active external session, and
    /// persists the secret.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MalformedKey`] if the input is not valid hex
    /// of 32 bytes, or [`IdentityError::Storage`] if persistence fails.
    pub fn login_with_secret_hex(&mut self, secret_hex: &str) -> Result<PublicKey> {
        let keypair = LocalKeypair::from_secret_hex(secret_hex)?;
        self.activate_local(keypair)
    }

    /// Ends the session and clears the persisted secret.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Storage`] if the slot cannot be cleared.
    pub fn sign_out(&mut self) -> Result<()> {
        self.storage.remove(SESSION_SECRET_SLOT)?;
        self.state = SessionState::LoggedOut;
        Ok(())
    }

    /// Returns whether an identity is established.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    /// Returns the active public key, if any.
    #[must_use]
    pub const fn public_key(&self) -> Option<PublicKey> {
        match &self.state {
            SessionState::Active { public_key, .. } => Some(*public_key),
            SessionState::LoggedOut => None,
        }
    }

    /// Builds and signs an event with the active strategy.
    ///
    /// Stamps `created_at` with the current Unix time in whole seconds and
    /// `pubkey` with the session key; id and signature are always derived
    /// here, never accepted as input.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::NoActiveSession`] when logged out, otherwise
    /// whatever the active strategy surfaces.
    pub async fn make_event(
        &self,
        kind: Kind,
        content: &str,
        tags: Vec<Tag>,
    ) -> Result<Event> {
        let (strategy, public_key) = self.active()?;

        let unsigned = EventBuilder::new(kind, content)
            .tags(tags)
            .build(*public_key);

        strategy.sign_event(unsigned).await
    }

    /// Encrypts a direct message for `peer` with the active strategy.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::NoActiveSession`] when logged out.
    pub async fn encrypt_dm(&self, peer: &PublicKey, plaintext: &str) -> Result<String> {
        let (strategy, _) = self.active()?;
        strategy.encrypt(peer, plaintext).await
    }

    /// Decrypts a direct message from `peer` with the active strategy.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::NoActiveSession`] when logged out.
    pub async fn decrypt_dm(&self, peer: &PublicKey, ciphertext: &str) -> Result<String> {
        let (strategy, _) = self.active()?;
        strategy.decrypt(peer, ciphertext).await
    }

    /// Generates a local key, persists it, and raises the one-time advisory.
    fn fallback_to_local_key(&mut self) -> Result<PublicKey> {
        let keypair = LocalKeypair::generate();

        // Hand the user an exportable copy before anything else can fail
        let exported = keypair
            .export_nsec()
            .unwrap_or_else(|_| keypair.secret_hex().to_string());

        let public_key = self.activate_local(keypair)?;

        self.notifier.copy_to_clipboard(&exported);
        self.notifier.notify(FALLBACK_KEY_ADVISORY);

        Ok(public_key)
    }

    /// Transitions into `Active(LocalKey)`, persisting the secret.
    fn activate_local(&mut self, keypair: LocalKeypair) -> Result<PublicKey> {
        self.storage
            .set(SESSION_SECRET_SLOT, &keypair.secret_hex())?;

        let public_key = keypair.public_key();
        self.state = SessionState::Active {
            strategy: SigningStrategy::LocalKey(keypair),
            public_key,
        };

        Ok(public_key)
    }

    fn active(&self) -> Result<(&SigningStrategy, &PublicKey)> {
        match &self.state {
            SessionState::Active {
                strategy,
                public_key,
            } => Ok((strategy, public_key)),
            SessionState::LoggedOut => Err(IdentityError::NoActiveSession),
        }
    }
}

impl std::fmt::Debug for IdentitySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            SessionState::LoggedOut => "LoggedOut".to_string(),
            SessionState::Active { public_key, .. } => {
                format!("Active({})", public_key.to_hex())
            }
        };
        f.debug_struct("IdentitySession").field("state", &state).finish()
    }
}
