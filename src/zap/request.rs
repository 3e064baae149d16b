//! Zap request event construction.
//!
//! A zap request (kind 9734) encodes who is zapping whom, for which event,
//! how much, and over which relays. It rides along as metadata on the LNURL
//! callback request rather than being broadcast, so it is built unsigned;
//! id and signature fields are never present.

use nostr::{PublicKey, Timestamp};
use serde::{Deserialize, Serialize};

/// Event kind for zap requests.
pub const KIND_ZAP_REQUEST: u16 = 9734;

/// An unsigned zap request event.
///
/// Serializes to the standard event JSON shape minus `id` and `sig`, which
/// are derivations and never constructed by hand.
///
/// # Structure
///
/// ```json
/// {
///   "kind": 9734,
///   "pubkey": "...",          // Sender public key, hex
///   "created_at": 123456,     // Unix timestamp, whole seconds
///   "tags": [
///     ["relays", "wss://..."],
///     ["amount", "21000"],    // Millisatoshi
///     ["p", "..."],           // Recipient public key, hex
///     ["e", "..."]            // Target event id (optional)
///   ],
///   "content": "comment"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZapRequestEvent {
    /// Event kind (9734).
    pub kind: u16,

    /// Sender public key, hex-encoded.
    pub pubkey: String,

    /// Unix timestamp when the request was created.
    pub created_at: u64,

    /// Event tags: relays, amount, recipient, optional target event.
    pub tags: Vec<Vec<String>>,

    /// The zap comment.
    pub content: String,
}

impl ZapRequestEvent {
    /// Builds a zap request.
    ///
    /// # Arguments
    ///
    /// * `sender` - Public key of the zapping user
    /// * `recipient` - Public key of the profile being zapped
    /// * `target_event_id` - Hex id of the event being zapped, if any
    /// * `amount_msat` - Zap amount in millisatoshi
    /// * `relays` - Relay hints for the eventual zap receipt
    /// * `comment` - Free-form comment carried in the content field
    #[must_use]
    pub fn new(
        sender: &PublicKey,
        recipient: &PublicKey,
        target_event_id: Option<&str>,
        amount_msat: u64,
        relays: &[String],
        comment: &str,
    ) -> Self {
        let mut relays_tag = vec!["relays".to_string()];
        relays_tag.extend(relays.iter().cloned());

        let mut tags = vec![
            relays_tag,
            vec!["amount".to_string(), amount_msat.to_string()],
            vec!["p".to_string(), recipient.to_hex()],
        ];

        if let Some(event_id) = target_event_id {
            tags.push(vec!["e".to_string(), event_id.to_string()]);
        }

        Self {
            kind: KIND_ZAP_REQUEST,
            pubkey: sender.to_hex(),
            created_at: Timestamp::now().as_u64(),
            tags,
            content: comment.to_string(),
        }
    }

    /// Serializes the request to JSON for the `nostr` callback parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
