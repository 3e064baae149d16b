//! Error types for identity and signing operations.

use thiserror::Error;

/// Errors that can occur during identity, signing, and encryption operations.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Supplied secret key is not valid hex of the expected length.
    #[error("Malformed secret key: {0}")]
    MalformedKey(String),

    /// A signing or encryption operation was attempted without a session.
    #[error("No active session")]
    NoActiveSession,

    /// The external signer capability is not reachable.
    #[error("External signer unavailable: {0}")]
    SignerUnavailable(String),

    /// The external signer (or its user) declined the request.
    #[error("External signer rejected the request: {0}")]
    SignerRejected(String),

    /// Key derivation failed.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Event signing failed.
    #[error("Event signing failed: {0}")]
    Signing(String),

    /// Encryption operation failed.
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Decryption operation failed.
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Bech32 encoding/decoding error.
    #[error("Bech32 error: {0}")]
    Bech32(String),

    /// Session storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_malformed_key() {
        let err = IdentityError::MalformedKey("not hex".to_string());
        assert_eq!(err.to_string(), "Malformed secret key: not hex");
    }

    #[test]
    fn error_display_no_active_session() {
        let err = IdentityError::NoActiveSession;
        assert_eq!(err.to_string(), "No active session");
    }

    #[test]
    fn error_display_signer_unavailable() {
        let err = IdentityError::SignerUnavailable("no extension".to_string());
        assert_eq!(err.to_string(), "External signer unavailable: no extension");
    }

    #[test]
    fn error_display_signer_rejected() {
        let err = IdentityError::SignerRejected("user declined".to_string());
        assert_eq!(
            err.to_string(),
            "External signer rejected the request: user declined"
        );
    }

    #[test]
    fn error_display_storage() {
        let err = IdentityError::Storage("slot unavailable".to_string());
        assert_eq!(err.to_string(), "Storage error: slot unavailable");
    }

    #[test]
    fn error_debug_format() {
        let err = IdentityError::NoActiveSession;
        assert!(format!("{err:?}").contains("NoActiveSession"));
    }
}
