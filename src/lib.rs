//! Lantern Core Library
//!
//! Core functionality for Lantern - a Nostr social client. This crate manages
//! the user's cryptographic identity, authors signed events, exchanges
//! NIP-04 encrypted direct messages, and requests/verifies Lightning zaps.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

pub mod identity;
pub mod profile;
pub mod relay;
pub mod zap;

pub use identity::{IdentityError, IdentitySession, LocalKeypair, SigningStrategy};
pub use profile::ProfileDirectory;
pub use zap::{Invoice, PaymentVerifier, ZapInvoiceFlow, ZapParams};
