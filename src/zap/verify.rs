//! Payment settlement verification.
//!
//! Processors that support verification hand back a verify URL alongside the
//! invoice. [`PaymentVerifier`] performs one check per call; polling cadence,
//! retry, and deadlines are the caller's business.

use super::error::{Result, ZapError};

/// Checks invoice settlement against a processor verify URL.
#[derive(Debug, Clone, Default)]
pub struct PaymentVerifier {
    http: reqwest::Client,
}

impl PaymentVerifier {
    /// Creates a verifier with its own HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the settlement status from `verify_url`.
    ///
    /// The response shape is payment-processor-defined and returned as raw
    /// JSON. Failures are logged here and re-raised, never swallowed.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::VerifyRequestFailed`] on a non-success HTTP
    /// status, or [`ZapError::Http`] if the request cannot be carried out.
    pub async fn check_payment(&self, verify_url: &str) -> Result<serde_json::Value> {
        let result = self.run(verify_url).await;

        if let Err(e) = &result {
            tracing::error!(verify_url, error = %e, "payment verification failed");
        }

        result
    }

    async fn run(&self, verify_url: &str) -> Result<serde_json::Value> {
        let response = self.http.get(verify_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZapError::VerifyRequestFailed {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
