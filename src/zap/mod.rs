//! Lightning zaps: invoice requests and payment verification.
//!
//! A zap ties a Lightning payment to a network event. The invoice request
//! composes profile discovery, LUD-16 payment-endpoint resolution, and an
//! unsigned zap-request payload into one HTTP call; verification later polls
//! the processor's verify URL for settlement.

mod error;
mod flow;
mod lnurl;
mod request;
mod verify;

pub use error::{Result, ZapError};
pub use flow::{Invoice, ZapInvoiceFlow, ZapParams};
pub use lnurl::{LightningAddress, PayEndpoint};
pub use request::{ZapRequestEvent, KIND_ZAP_REQUEST};
pub use verify::PaymentVerifier;
