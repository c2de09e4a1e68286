//! HTTP transport layer.
//!
//! The transport issues one network round trip per call and reports the
//! raw outcome: it attaches the site credentials, sends the serialized XML
//! body, and hands back status code plus body without interpreting either.
//! Interpretation (success, retryable, fatal) belongs to
//! [`classify`](crate::classify::classify).
//!
//! No retries and no timeout policy beyond the underlying client's
//! defaults; connection-level failures surface as
//! [`Fatal`](crate::BillingError::Fatal).

use std::future::Future;

use reqwest::Method;

use crate::config::SiteConfig;
use crate::error::Result;

pub mod http;
mod sealed;

pub use http::HttpTransport;

/// Raw response from one transport round trip.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body, expected to be XML or plain text.
    pub body: String,
}

/// A way to reach the billing service.
///
/// Implementations always attach the site credentials from the supplied
/// [`SiteConfig`]. This trait is sealed; [`HttpTransport`] is the only
/// implementation.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Executes one request against `config.base_url()` + `path`.
    ///
    /// `path` must start with `/`. A `Some` body is sent as
    /// `application/xml`.
    fn request(
        &self,
        config: &SiteConfig,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}
