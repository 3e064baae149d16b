//! Local keypair for session-held signing.
//!
//! This module provides [`LocalKeypair`], the secret/public keypair backing a
//! local-key session. The public key is always derived deterministically from
//! the secret; the two are never mutated independently.
//!
//! # Security
//!
//! - Secret bytes are automatically zeroized on drop via [`ZeroizeOnDrop`]
//! - Temporary copies are manually zeroized after use
//! - Debug output never includes secret material
//! - The secret leaves this type only through the explicit export methods

use nostr::prelude::{Keys, PublicKey, ToBech32};
use nostr::{Event, SecretKey, UnsignedEvent};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::error::{IdentityError, Result};

/// A session-held Nostr keypair.
///
/// The secret key bytes are automatically zeroized when dropped. Signing and
/// encryption reconstruct the key object from bytes on demand so no long-lived
/// copy exists outside this struct.
///
/// # Example
///
/// ```
/// use lantern_core::identity::LocalKeypair;
///
/// let keypair = LocalKeypair::generate();
/// assert_eq!(keypair.public_key().to_hex().len(), 64);
/// ```
#[derive(ZeroizeOnDrop)]
pub struct LocalKeypair {
    /// The secret key bytes (zeroized on drop).
    secret_bytes: [u8; 32],

    /// Derived public key (not sensitive, skip zeroization).
    #[zeroize(skip)]
    public_key: PublicKey,
}

impl LocalKeypair {
    /// Generates a new random keypair.
    ///
    /// Uses the operating system's secure random number generator.
    #[must_use]
    pub fn generate() -> Self {
        let keys = Keys::generate();

        Self {
            secret_bytes: keys.secret_key().secret_bytes(),
            public_key: keys.public_key(),
        }
    }

    /// Creates a keypair from a hex-encoded secret key.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MalformedKey`] if the input is not valid hex
    /// of exactly 32 bytes, or does not encode a valid secret key.
    ///
    /// # Example
    ///
    /// ```
    /// use lantern_core::identity::LocalKeypair;
    ///
    /// let generated = LocalKeypair::generate();
    /// let hex = generated.secret_hex();
    /// let restored = LocalKeypair::from_secret_hex(&hex).unwrap();
    /// assert_eq!(generated.public_key(), restored.public_key());
    /// ```
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self> {
        let decoded = hex::decode(secret_hex)
            .map_err(|e| IdentityError::MalformedKey(e.to_string()))?;

        let mut secret_bytes = [0u8; 32];
        if decoded.len() != secret_bytes.len() {
            return Err(IdentityError::MalformedKey(format!(
                "expected 32 bytes, got {}",
                decoded.len()
            )));
        }
        secret_bytes.copy_from_slice(&decoded);

        Self::from_secret_bytes(secret_bytes)
    }

    /// Creates a keypair from raw secret key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MalformedKey`] if the bytes don't represent a
    /// valid secret key scalar.
    pub fn from_secret_bytes(secret_bytes: [u8; 32]) -> Result<Self> {
        let secret_key = SecretKey::from_slice(&secret_bytes)
            .map_err(|e| IdentityError::MalformedKey(e.to_string()))?;

        let keys = Keys::new(secret_key);
        let public_key = keys.public_key();

        Ok(Self {
            secret_bytes,
            public_key,
        })
    }

    /// Returns the derived public key.
    #[must_use]
    pub const fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Returns the secret key hex-encoded, wrapped in `Zeroizing`.
    ///
    /// Used for session persistence. The returned string is wiped when the
    /// wrapper is dropped.
    #[must_use]
    pub fn secret_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret_bytes))
    }

    /// Exports the secret key as nsec (NIP-19 bech32 format).
    ///
    /// # Security Warning
    ///
    /// This exposes the secret key. Only use for user-initiated backup or the
    /// one-time fallback-key advisory.
    ///
    /// # Errors
    ///
    /// Returns an error if bech32 encoding fails.
    pub fn export_nsec(&self) -> Result<String> {
        let mut secret_bytes_copy = self.secret_bytes;

        let result = (|| {
            let secret_key = SecretKey::from_slice(&secret_bytes_copy)
                .map_err(|e| IdentityError::KeyDerivation(e.to_string()))?;

            secret_key
                .to_bech32()
                .map_err(|e| IdentityError::Bech32(e.to_string()))
        })();

        // Zeroize temporary copy
        secret_bytes_copy.zeroize();

        result
    }

    /// Returns the public key as npub (NIP-19 bech32 format).
    ///
    /// # Errors
    ///
    /// Returns an error if bech32 encoding fails.
    pub fn npub(&self) -> Result<String> {
        self.public_key
            .to_bech32()
            .map_err(|e| IdentityError::Bech32(e.to_string()))
    }

    /// Signs an unsigned event, producing its id and signature.
    ///
    /// The input must not already carry an id or signature; both are derived
    /// here from the other fields.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Signing`] if signing fails.
    pub fn sign_event(&self, unsigned: UnsignedEvent) -> Result<Event> {
        let mut secret_bytes_copy = self.secret_bytes;

        let result = (|| {
            let secret_key = SecretKey::from_slice(&secret_bytes_copy)
                .map_err(|e| IdentityError::Signing(e.to_string()))?;

            let keys = Keys::new(secret_key);
            unsigned
                .sign_with_keys(&keys)
                .map_err(|e| IdentityError::Signing(e.to_string()))
        })();

        // Zeroize temporary copy
        secret_bytes_copy.zeroize();

        result
    }

    /// Encrypts a direct message for `peer` using the NIP-04 scheme.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Encryption`] if encryption fails.
    pub fn encrypt(&self, peer: &PublicKey, plaintext: &str) -> Result<String> {
        let mut secret_bytes_copy = self.secret_bytes;

        let result = (|| {
            let secret_key = SecretKey::from_slice(&secret_bytes_copy)
                .map_err(|e| IdentityError::Encryption(e.to_string()))?;

            nostr::nips::nip04::encrypt(&secret_key, peer, plaintext)
                .map_err(|e| IdentityError::Encryption(e.to_string()))
        })();

        secret_bytes_copy.zeroize();

        result
    }

    /// Decrypts a NIP-04 direct message from `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Decryption`] if decryption fails.
    pub fn decrypt(&self, peer: &PublicKey, ciphertext: &str) -> Result<String> {
        let mut secret_bytes_copy = self.secret_bytes;

        let result = (|| {
            let secret_key = SecretKey::from_slice(&secret_bytes_copy)
                .map_err(|e| IdentityError::Decryption(e.to_string()))?;

            nostr::nips::nip04::decrypt(&secret_key, peer, ciphertext)
                .map_err(|e| IdentityError::Decryption(e.to_string()))
        })();

        secret_bytes_copy.zeroize();

        result
    }
}

impl std::fmt::Debug for LocalKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret key
        f.debug_struct("LocalKeypair")
            .field("public_key", &self.public_key.to_hex())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr::{EventBuilder, Kind};

    #[test]
    fn generate_produces_valid_keypair() {
        let keypair = LocalKeypair::generate();
        assert_eq!(keypair.public_key().to_hex().len(), 64);
    }

    #[test]
    fn from_secret_hex_roundtrip() {
        let original = LocalKeypair::generate();
        let hex = original.secret_hex();

        let restored = LocalKeypair::from_secret_hex(&hex).unwrap();
        assert_eq!(original.public_key(), restored.public_key());
    }

    #[test]
    fn from_secret_hex_rejects_non_hex() {
        let result = LocalKeypair::from_secret_hex("zz".repeat(32).as_str());
        assert!(matches!(result, Err(IdentityError::MalformedKey(_))));
    }

    #[test]
    fn from_secret_hex_rejects_wrong_length() {
        let result = LocalKeypair::from_secret_hex("abcd");
        assert!(matches!(result, Err(IdentityError::MalformedKey(_))));

        let too_long = "ab".repeat(33);
        let result = LocalKeypair::from_secret_hex(&too_long);
        assert!(matches!(result, Err(IdentityError::MalformedKey(_))));
    }

    #[test]
    fn from_secret_hex_rejects_empty() {
        let result = LocalKeypair::from_secret_hex("");
        assert!(matches!(result, Err(IdentityError::MalformedKey(_))));
    }

    #[test]
    fn from_secret_bytes_with_all_zeros_fails() {
        let bytes = [0u8; 32];
        assert!(LocalKeypair::from_secret_bytes(bytes).is_err());
    }

    #[test]
    fn from_secret_bytes_with_curve_order_fails() {
        // secp256k1 curve order n (invalid as secret key)
        let curve_order =
            hex::decode("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141")
                .unwrap();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&curve_order);
        assert!(LocalKeypair::from_secret_bytes(bytes).is_err());
    }

    #[test]
    fn same_secret_produces_same_pubkey() {
        let mut bytes = [0u8; 32];
        bytes[0] = 42;

        let keypair1 = LocalKeypair::from_secret_bytes(bytes).unwrap();
        let keypair2 = LocalKeypair::from_secret_bytes(bytes).unwrap();

        assert_eq!(keypair1.public_key(), keypair2.public_key());
    }

    #[test]
    fn different_keypairs_have_different_pubkeys() {
        let keypair1 = LocalKeypair::generate();
        let keypair2 = LocalKeypair::generate();
        assert_ne!(keypair1.public_key(), keypair2.public_key());
    }

    #[test]
    fn nsec_export_is_consistent() {
        let keypair = LocalKeypair::generate();
        let nsec1 = keypair.export_nsec().unwrap();
        let nsec2 = keypair.export_nsec().unwrap();

        assert!(nsec1.starts_with("nsec1"));
        assert_eq!(nsec1, nsec2);
    }

    #[test]
    fn npub_format() {
        let keypair = LocalKeypair::generate();
        let npub = keypair.npub().unwrap();
        assert!(npub.starts_with("npub1"));
    }

    #[test]
    fn sign_event_populates_id_and_signature() {
        let keypair = LocalKeypair::generate();
        let unsigned = EventBuilder::new(Kind::TextNote, "hello")
            .build(keypair.public_key());

        let event = keypair.sign_event(unsigned).unwrap();

        assert_eq!(event.pubkey, keypair.public_key());
        assert!(event.verify().is_ok());
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let alice = LocalKeypair::generate();
        let bob = LocalKeypair::generate();

        let ciphertext = alice.encrypt(&bob.public_key(), "gm bob").unwrap();
        let plaintext = bob.decrypt(&alice.public_key(), &ciphertext).unwrap();

        assert_eq!(plaintext, "gm bob");
    }

    #[test]
    fn decrypt_with_wrong_peer_fails() {
        let alice = LocalKeypair::generate();
        let bob = LocalKeypair::generate();
        let mallory = LocalKeypair::generate();

        let ciphertext = alice.encrypt(&bob.public_key(), "secret").unwrap();
        let result = mallory.decrypt(&alice.public_key(), &ciphertext);

        assert!(result.is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let keypair = LocalKeypair::generate();
        let debug_output = format!("{keypair:?}");
        let secret = keypair.secret_hex();

        assert!(debug_output.contains(&keypair.public_key().to_hex()));
        assert!(!debug_output.contains(secret.as_str()));
    }

    #[test]
    fn implements_zeroize_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<LocalKeypair>();
    }
}
