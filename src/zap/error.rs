//! Error types for zap invoice requests and payment verification.

use nostr::PublicKey;
use thiserror::Error;

/// Errors that can occur while requesting a zap invoice or verifying payment.
///
/// Each pipeline stage fails with a distinct variant; the flow aborts on the
/// first failure with no partial retries.
#[derive(Debug, Error)]
pub enum ZapError {
    /// Recipient identifier could not be decoded.
    #[error("Invalid recipient identifier: {0}")]
    InvalidRecipient(String),

    /// No profile metadata is published for the recipient.
    #[error("No profile found for {0}")]
    ProfileNotFound(PublicKey),

    /// The recipient's profile has no resolvable payment endpoint.
    #[error("No payment endpoint: {0}")]
    NoPaymentEndpoint(String),

    /// The invoice endpoint answered with a non-success HTTP status.
    #[error("Invoice request failed with HTTP status {status}")]
    InvoiceRequestFailed {
        /// The HTTP status code returned.
        status: u16,
    },

    /// The verification endpoint answered with a non-success HTTP status.
    #[error("Payment verification failed with HTTP status {status}")]
    VerifyRequestFailed {
        /// The HTTP status code returned.
        status: u16,
    },

    /// An HTTP request could not be carried out.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body was not the expected JSON.
    #[error("Invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for zap operations.
pub type Result<T> = std::result::Result<T, ZapError>;
