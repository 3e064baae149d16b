//! LUD-16 payment endpoint resolution.
//!
//! A profile publishes a Lightning address (`name@domain`) in its `lud16`
//! metadata field. The payment parameters live at the well-known LNURL-pay
//! location `https://domain/.well-known/lnurlp/name`; the JSON there names
//! the callback URL invoices are requested from.

use serde::Deserialize;
use url::Url;

use super::error::{Result, ZapError};

/// A parsed `name@domain` Lightning address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightningAddress {
    name: String,
    domain: String,
}

impl LightningAddress {
    /// Parses a LUD-16 address of the form `name@domain`.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::NoPaymentEndpoint`] if the address is not of the
    /// expected shape.
    pub fn parse(address: &str) -> Result<Self> {
        let (name, domain) = address
            .split_once('@')
            .ok_or_else(|| ZapError::NoPaymentEndpoint(format!("malformed lud16 address: {address}")))?;

        if name.is_empty() || domain.is_empty() {
            return Err(ZapError::NoPaymentEndpoint(format!(
                "malformed lud16 address: {address}"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            domain: domain.to_string(),
        })
    }

    /// Returns the well-known LNURL-pay URL for this address.
    ///
    /// Loopback and onion domains get plain http; everything else https,
    /// per the LUD-16 convention.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::NoPaymentEndpoint`] if the domain does not form a
    /// valid URL.
    pub fn well_known_url(&self) -> Result<Url> {
        let host = self.domain.split(':').next().unwrap_or(&self.domain);
        let scheme = if host == "localhost" || host.starts_with("127.") || host.ends_with(".onion")
        {
            "http"
        } else {
            "https"
        };

        Url::parse(&format!(
            "{scheme}://{}/.well-known/lnurlp/{}",
            self.domain, self.name
        ))
        .map_err(|e| ZapError::NoPaymentEndpoint(format!("invalid lud16 domain: {e}")))
    }
}

/// LNURL-pay parameters served at the well-known location.
///
/// Only the fields the flow consumes are modeled; the processor may send
/// more.
#[derive(Debug, Clone, Deserialize)]
pub struct PayEndpoint {
    /// URL invoices are requested from.
    pub callback: String,

    /// Whether the endpoint understands zap requests.
    #[serde(rename = "allowsNostr", default)]
    pub allows_nostr: bool,
}
