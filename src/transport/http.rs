//! HTTP transport implementation over reqwest.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use tracing::{debug, instrument};

use crate::config::SiteConfig;
use crate::error::{BillingError, Result};
use crate::transport::{sealed, Transport, TransportResponse};

/// Password paired with the API token for basic authentication.
///
/// The service authenticates on the token alone; the password slot is a
/// fixed placeholder.
const BASIC_AUTH_PASSWORD: &str = "X";

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(100)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// Rejects request paths that could escape the configured site prefix.
fn sanitize_path(path: &str) -> Result<&str> {
    if path.contains("..") || path.contains("//") {
        return Err(BillingError::fatal("invalid path: traversal sequences not allowed"));
    }
    if !path.starts_with('/') {
        return Err(BillingError::fatal("path must start with '/'"));
    }
    Ok(path)
}

/// HTTP transport using reqwest.
///
/// Every request carries basic authentication built from the site's API
/// token and sends/accepts `application/xml`. The transport never inspects
/// status codes or bodies; it reports them verbatim.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport backed by the shared pooled client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: DEFAULT_HTTP_CLIENT.clone() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, config, body), fields(site = config.site_name()))]
    async fn request(
        &self,
        config: &SiteConfig,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<TransportResponse> {
        let path = sanitize_path(path)?;
        let url = format!("{}{path}", config.base_url());

        let mut request = self
            .client
            .request(method, &url)
            .basic_auth(config.token(), Some(BASIC_AUTH_PASSWORD))
            .header(ACCEPT, "application/xml");

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/xml").body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "billing API response");

        Ok(TransportResponse { status, body })
    }
}
