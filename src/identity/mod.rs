//! Identity management: keys, signing strategies, and the session lifecycle.
//!
//! # Architecture
//!
//! ```text
//! SignerDiscovery ──► try_login ──► IdentitySession::Active
//!                                        │
//!                         SigningStrategy::LocalKey(LocalKeypair)
//!                      or SigningStrategy::External(dyn ExternalSigner)
//!                                        │
//!                          make_event / encrypt_dm / decrypt_dm
//! ```
//!
//! The session persists local-key secrets to a single [`SessionStore`] slot
//! and restores from it at construction. External-signer sessions hold no
//! secret and are re-established on each login.

mod error;
mod keypair;
mod notify;
mod session;
mod signer;
mod storage;

pub use error::{IdentityError, Result};
pub use keypair::LocalKeypair;
pub use notify::{NoopNotifier, NotificationSink};
pub use session::IdentitySession;
pub use signer::{ExternalSigner, SignerDiscovery, SignerError, SigningStrategy};
pub use storage::{SessionStore, SESSION_SECRET_SLOT};
