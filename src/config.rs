//! Site configuration.
//!
//! A [`SiteConfig`] identifies one billing site: the site's short name and
//! its API token. It is constructed once, validated up front, and read by
//! every request the client issues; it never changes after construction.

use url::Url;

use crate::error::{BillingError, Result};

/// Default host serving both the REST API and the hosted payment pages.
pub const DEFAULT_HOST: &str = "subs.subrail.com";

/// Configuration for one billing site.
///
/// # Examples
///
/// ```
/// use subrail_client::SiteConfig;
///
/// let config = SiteConfig::new("my-site", "api-token").unwrap();
/// assert_eq!(config.site_name(), "my-site");
/// assert!(!config.is_sandbox());
/// ```
#[derive(Debug, Clone)]
pub struct SiteConfig {
    site_name: String,
    token: String,
    base_url: String,
    sandbox: bool,
}

impl SiteConfig {
    /// Creates a configuration pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Fatal`] if the site name or token is blank,
    /// or if the site name contains characters that are not URL-safe.
    pub fn new(site_name: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let site_name = site_name.into();
        let token = token.into();
        validate_site_name(&site_name)?;
        validate_token(&token)?;

        let base_url = format!("https://{DEFAULT_HOST}/api/v1/{site_name}");
        Ok(Self { site_name, token, base_url, sandbox: false })
    }

    /// Creates a configuration for a sandbox site.
    ///
    /// Sandbox configurations unlock destructive test-only operations such
    /// as [`wipe_subscribers`](crate::SubrailClient::wipe_subscribers).
    ///
    /// # Errors
    ///
    /// Same validation as [`SiteConfig::new`].
    pub fn sandbox(site_name: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let mut config = Self::new(site_name, token)?;
        config.sandbox = true;
        Ok(config)
    }

    /// Replaces the API base URL.
    ///
    /// Intended for pointing the client at a test double. The URL must not
    /// end with a trailing slash mismatch; trailing slashes are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Fatal`] if the URL does not parse.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url)
            .map_err(|e| BillingError::fatal(format!("invalid base URL '{base_url}': {e}")))?;
        self.base_url = base_url.trim_end_matches('/').to_owned();
        Ok(self)
    }

    /// The site's short name, used in API and hosted-page URLs.
    #[must_use]
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// The API token used for basic authentication.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when this configuration targets a sandbox site.
    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }
}

fn validate_site_name(site_name: &str) -> Result<()> {
    if site_name.trim().is_empty() {
        return Err(BillingError::fatal("site name can't be blank"));
    }
    for ch in site_name.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_' {
            return Err(BillingError::fatal(format!(
                "site name contains invalid character '{ch}': {site_name}"
            )));
        }
    }
    Ok(())
}

fn validate_token(token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(BillingError::fatal("API token can't be blank"));
    }
    Ok(())
}
