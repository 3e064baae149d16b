//! Zap invoice request pipeline.
//!
//! # Architecture
//!
//! ```text
//! npub ──decode──► PublicKey ──ProfileDirectory──► Metadata
//!                                     │
//!                          lud16 ──LNURL-pay──► callback URL
//!                                     │
//!            ZapRequestEvent ──query merge──► HTTP GET ──► Invoice
//! ```
//!
//! Each stage's failure aborts the pipeline with a distinct [`ZapError`]
//! variant; there are no partial retries - callers retry the whole flow.
//! Every failure is logged at the flow boundary and re-raised, never
//! swallowed.

use std::sync::Arc;

use nostr::prelude::FromBech32;
use nostr::{Metadata, PublicKey};
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{Result, ZapError};
use super::lnurl::{LightningAddress, PayEndpoint};
use super::request::ZapRequestEvent;
use crate::profile::ProfileDirectory;

/// Inputs to a zap invoice request.
#[derive(Debug, Clone)]
pub struct ZapParams {
    /// Recipient identifier, bech32-encoded (`npub1...`).
    pub recipient: String,

    /// Public key of the zapping user, stamped on the zap request.
    pub sender: PublicKey,

    /// Hex id of the event being zapped, or `None` for a profile zap.
    pub target_event_id: Option<String>,

    /// Zap amount in satoshi; converted to floored millisatoshi.
    pub amount_sat: f64,

    /// Relay hints carried in the zap request.
    pub relays: Vec<String>,

    /// Free-form comment.
    pub comment: String,
}

/// Invoice returned by a payment endpoint.
///
/// The body is processor-defined; the known fields are surfaced and the rest
/// preserved verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// The bolt11 payment request.
    #[serde(default)]
    pub pr: Option<String>,

    /// URL to poll for settlement, when the processor supports LUD-21.
    #[serde(default)]
    pub verify: Option<String>,

    /// Remaining processor-defined fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Orchestrates profile resolution, endpoint discovery, zap request
/// construction, and the invoice fetch.
pub struct ZapInvoiceFlow {
    profiles: Arc<ProfileDirectory>,
    http: reqwest::Client,
}

impl ZapInvoiceFlow {
    /// Creates a flow over the given profile directory.
    #[must_use]
    pub fn new(profiles: Arc<ProfileDirectory>) -> Self {
        Self {
            profiles,
            http: reqwest::Client::new(),
        }
    }

    /// Requests a zap invoice for the given parameters.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidRecipient`] if the recipient identifier does not
    ///   decode
    /// - [`ZapError::ProfileNotFound`] if no metadata is published
    /// - [`ZapError::NoPaymentEndpoint`] if no callback URL can be resolved
    ///   from the profile
    /// - [`ZapError::InvoiceRequestFailed`] on a non-success invoice response
    /// - [`ZapError::Http`] / [`ZapError::Json`] for transport-level failures
    pub async fn request_invoice(&self, params: &ZapParams) -> Result<Invoice> {
        let result = self.run(params).await;

        if let Err(e) = &result {
            tracing::error!(recipient = %params.recipient, error = %e, "zap invoice request failed");
        }

        result
    }

    async fn run(&self, params: &ZapParams) -> Result<Invoice> {
        let recipient = PublicKey::from_bech32(&params.recipient)
            .map_err(|e| ZapError::InvalidRecipient(e.to_string()))?;

        let metadata = self
            .profiles
            .resolve_metadata(&recipient)
            .await
            .ok_or(ZapError::ProfileNotFound(recipient))?;

        let endpoint = self.resolve_pay_endpoint(&metadata).await?;

        let amount_msat = millisats(params.amount_sat);
        let request = ZapRequestEvent::new(
            &params.sender,
            &recipient,
            params.target_event_id.as_deref(),
            amount_msat,
            &params.relays,
            &params.comment,
        );

        let url = build_callback_url(&endpoint.callback, amount_msat, &params.comment, &request)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ZapError::InvoiceRequestFailed {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Resolves the LNURL-pay callback endpoint from profile metadata.
    ///
    /// Any failure along the way - no `lud16` field, unreachable well-known
    /// location, invalid parameters - means the recipient has no resolvable
    /// payment endpoint.
    async fn resolve_pay_endpoint(&self, metadata: &Metadata) -> Result<PayEndpoint> {
        let lud16 = metadata
            .lud16
            .as_deref()
            .ok_or_else(|| ZapError::NoPaymentEndpoint("profile has no lud16 address".to_string()))?;

        let address = LightningAddress::parse(lud16)?;
        let well_known = address.well_known_url()?;

        let response = self
            .http
            .get(well_known)
            .send()
            .await
            .map_err(|e| ZapError::NoPaymentEndpoint(format!("lnurl pay lookup failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZapError::NoPaymentEndpoint(format!(
                "lnurl pay lookup returned HTTP status {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ZapError::NoPaymentEndpoint(format!("invalid lnurl pay parameters: {e}")))
    }
}

/// Converts a satoshi amount to floored millisatoshi.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn millisats(amount_sat: f64) -> u64 {
    (amount_sat * 1000.0).floor().max(0.0) as u64
}

/// Merges the zap parameters into the callback URL.
///
/// Existing query parameters on the callback are preserved; `amount`,
/// `comment`, and the JSON-serialized `nostr` request are appended.
fn build_callback_url(
    callback: &str,
    amount_msat: u64,
    comment: &str,
    request: &ZapRequestEvent,
) -> Result<Url> {
    let mut url = Url::parse(callback)
        .map_err(|e| ZapError::NoPaymentEndpoint(format!("invalid callback URL: {e}")))?;

    let nostr_json = request.to_json()?;

    url.query_pairs_mut()
        .append_pair("amount", &amount_msat.to_string())
        .append_pair("comment", comment)
        .append_pair("nostr", &nostr_json);

    Ok(url)
}
