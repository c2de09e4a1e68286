//! Operations façade.
//!
//! [`SubrailClient`] owns a [`SiteConfig`] and a [`Transport`] and exposes
//! one method per service operation. Every method follows the same shape:
//! build the field map, encode it, run the transport round trip, classify
//! the response, and map the parsed body into a typed resource.

use reqwest::Method;
use rust_decimal::Decimal;
use tracing::instrument;
use url::Url;

use crate::classify::classify;
use crate::config::SiteConfig;
use crate::error::{BillingError, Result};
use crate::resources::{CreditCard, Invoice, InvoiceSubscriber, SubscriptionPlan, Subscriber};
use crate::transport::{HttpTransport, Transport};
use crate::urls;
use crate::xml::{encode, FieldMap, XmlValue};

/// Client for one billing site.
///
/// Cheap to clone is not a goal; construct it once and share it by
/// reference. All methods take `&self`.
///
/// # Examples
///
/// ```no_run
/// use subrail_client::{SiteConfig, SubrailClient};
///
/// # async fn demo() -> subrail_client::Result<()> {
/// let config = SiteConfig::new("my-site", "api-token")?;
/// let client = SubrailClient::new(config);
/// let subscriber = client.find_subscriber("joe").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SubrailClient<T: Transport = HttpTransport> {
    config: SiteConfig,
    transport: T,
}

impl SubrailClient<HttpTransport> {
    /// Creates a client using the default HTTP transport.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self::with_transport(config, HttpTransport::default())
    }
}

impl<T: Transport> SubrailClient<T> {
    /// Creates a client over an explicit transport.
    #[must_use]
    pub fn with_transport(config: SiteConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    async fn call(&self, method: Method, path: &str, body: Option<String>) -> Result<XmlValue> {
        let response = self.transport.request(&self.config, method, path, body).await?;
        classify(response.status, &response.body)
    }

    /// Like [`call`](Self::call), but reads a 404 as "not there" instead of
    /// an error. Used by the `find_*` lookups only.
    async fn call_optional(&self, method: Method, path: &str) -> Result<Option<XmlValue>> {
        let response = self.transport.request(&self.config, method, path, None).await?;
        if response.status == 404 {
            return Ok(None);
        }
        classify(response.status, &response.body).map(Some)
    }

    // ---- subscribers -----------------------------------------------------

    /// Creates a subscriber with the caller-chosen `customer_id`.
    ///
    /// `extra` fields are passed through to the service verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Fatal`] before any network call when the id
    /// is blank, and a server-side `Fatal` mentioning "exists" when the id
    /// is already taken.
    #[instrument(skip(self, extra))]
    pub async fn create_subscriber(
        &self,
        customer_id: &str,
        email: Option<&str>,
        screen_name: Option<&str>,
        extra: FieldMap,
    ) -> Result<Subscriber> {
        if customer_id.trim().is_empty() {
            return Err(BillingError::fatal("customer id can't be blank"));
        }
        let mut fields = FieldMap::new().with("customer_id", customer_id);
        if let Some(email) = email {
            fields.insert("email", email);
        }
        if let Some(screen_name) = screen_name {
            fields.insert("screen_name", screen_name);
        }
        fields.extend(extra);

        let body = encode("subscriber", &fields);
        let parsed = self.call(Method::POST, "/subscribers.xml", Some(body)).await?;
        subscriber_from(&parsed)
    }

    /// Looks up a subscriber by customer id.
    ///
    /// # Errors
    ///
    /// An unknown id is `Ok(None)`, not an error.
    #[instrument(skip(self))]
    pub async fn find_subscriber(&self, customer_id: &str) -> Result<Option<Subscriber>> {
        let path = format!("/subscribers/{}.xml", encode_segment(customer_id));
        match self.call_optional(Method::GET, &path).await? {
            Some(parsed) => subscriber_from(&parsed).map(Some),
            None => Ok(None),
        }
    }

    /// Lists every subscriber on the site.
    #[instrument(skip(self))]
    pub async fn list_subscribers(&self) -> Result<Vec<Subscriber>> {
        let parsed = self.call(Method::GET, "/subscribers.xml", None).await?;
        collect(&parsed, "subscribers", "subscriber", Subscriber::from_xml)
    }

    /// Updates named fields on an existing subscriber.
    ///
    /// Only the fields present in `fields` change; everything else keeps
    /// its current value.
    #[instrument(skip(self, fields))]
    pub async fn update_subscriber(&self, customer_id: &str, fields: FieldMap) -> Result<()> {
        let path = format!("/subscribers/{}.xml", encode_segment(customer_id));
        let body = encode("subscriber", &fields);
        self.call(Method::PUT, &path, Some(body)).await?;
        Ok(())
    }

    /// Deletes a subscriber.
    #[instrument(skip(self))]
    pub async fn delete_subscriber(&self, customer_id: &str) -> Result<()> {
        let path = format!("/subscribers/{}.xml", encode_segment(customer_id));
        self.call(Method::DELETE, &path, None).await?;
        Ok(())
    }

    /// Removes every subscriber from the site. Sandbox sites only.
    ///
    /// # Errors
    ///
    /// Refused with [`BillingError::Fatal`] before any network call unless
    /// the configuration was built with [`SiteConfig::sandbox`].
    #[instrument(skip(self))]
    pub async fn wipe_subscribers(&self) -> Result<()> {
        if !self.config.is_sandbox() {
            return Err(BillingError::fatal(
                "wiping subscribers is only allowed for sandbox sites",
            ));
        }
        self.call(Method::POST, "/subscribers/wipe_clean.xml", None).await?;
        Ok(())
    }

    // ---- subscription lifecycle ------------------------------------------

    /// Grants a complimentary subscription for the given duration.
    ///
    /// Comps accumulate: issuing a second comp extends access rather than
    /// replacing it.
    ///
    /// # Errors
    ///
    /// Both `quantity` and `units` are required; any missing combination
    /// fails before the network call. A stale subscriber id is a
    /// server-side `Fatal` mentioning "exists".
    #[instrument(skip(self))]
    pub async fn comp_subscriber(
        &self,
        customer_id: &str,
        quantity: Option<u32>,
        units: Option<&str>,
        feature_level: Option<&str>,
    ) -> Result<Subscriber> {
        let (Some(quantity), Some(units)) = (quantity, units) else {
            return Err(BillingError::fatal(
                "complimentary subscription failed validation: \
                 duration quantity and duration units are both required",
            ));
        };
        let mut fields = FieldMap::new()
            .with("duration_quantity", quantity)
            .with("duration_units", units);
        if let Some(feature_level) = feature_level {
            fields.insert("feature_level", feature_level);
        }

        let path = format!(
            "/subscribers/{}/complimentary_subscriptions.xml",
            encode_segment(customer_id)
        );
        let body = encode("complimentary_subscription", &fields);
        let parsed = self.call(Method::POST, &path, Some(body)).await?;
        subscriber_from(&parsed)
    }

    /// Activates a recurring plan for the subscriber.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, customer_id: &str, plan_id: i64) -> Result<Subscriber> {
        let path = format!("/subscribers/{}/subscriptions.xml", encode_segment(customer_id));
        let body = encode("subscription", &FieldMap::new().with("plan_id", plan_id));
        let parsed = self.call(Method::POST, &path, Some(body)).await?;
        subscriber_from(&parsed)
    }

    /// Starts a free trial on the given trial plan.
    ///
    /// # Errors
    ///
    /// `None` fails before the network call with a `Fatal` naming the
    /// missing plan. A consumed trial is a server-side `Fatal` mentioning
    /// "not eligible"; a stale plan id, "no longer exists".
    #[instrument(skip(self))]
    pub async fn activate_free_trial(
        &self,
        customer_id: &str,
        plan_id: Option<i64>,
    ) -> Result<Subscriber> {
        let Some(plan_id) = plan_id else {
            return Err(BillingError::fatal("missing subscription plan id"));
        };
        let path =
            format!("/subscribers/{}/subscribe_to_free_trial.xml", encode_segment(customer_id));
        let body = encode("subscription_plan", &FieldMap::new().with("id", plan_id));
        let parsed = self.call(Method::POST, &path, Some(body)).await?;
        subscriber_from(&parsed)
    }

    /// Resets the subscriber's free-trial eligibility.
    #[instrument(skip(self))]
    pub async fn allow_free_trial(&self, customer_id: &str) -> Result<()> {
        let path = format!("/subscribers/{}/allow_free_trial.xml", encode_segment(customer_id));
        self.call(Method::POST, &path, None).await?;
        Ok(())
    }

    /// Turns off auto-renewal without shortening the current period.
    ///
    /// # Errors
    ///
    /// An unknown id is a server-side `Fatal` mentioning "does not exist";
    /// unlike the `find_*` lookups, this never maps to `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn stop_auto_renew(&self, customer_id: &str) -> Result<()> {
        let path = format!("/subscribers/{}/stop_auto_renew.xml", encode_segment(customer_id));
        self.call(Method::POST, &path, None).await?;
        Ok(())
    }

    /// Charges a one-off fee against an active subscriber.
    ///
    /// Fees accumulate; there is no idempotency key.
    #[instrument(skip(self))]
    pub async fn add_fee(
        &self,
        customer_id: &str,
        name: &str,
        amount: Decimal,
        description: Option<&str>,
        group: Option<&str>,
    ) -> Result<()> {
        let mut fields = FieldMap::new().with("name", name).with("amount", amount);
        if let Some(description) = description {
            fields.insert("description", description);
        }
        if let Some(group) = group {
            fields.insert("group", group);
        }
        let path = format!("/subscribers/{}/fees.xml", encode_segment(customer_id));
        let body = encode("fee", &fields);
        self.call(Method::POST, &path, Some(body)).await?;
        Ok(())
    }

    // ---- plans -----------------------------------------------------------

    /// Lists the plans configured on the site.
    #[instrument(skip(self))]
    pub async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>> {
        let parsed = self.call(Method::GET, "/subscription_plans.xml", None).await?;
        collect(&parsed, "subscription_plans", "subscription_plan", SubscriptionPlan::from_xml)
    }

    /// Looks up one plan by id. Unknown ids are `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn find_plan(&self, plan_id: i64) -> Result<Option<SubscriptionPlan>> {
        let path = format!("/subscription_plans/{plan_id}.xml");
        match self.call_optional(Method::GET, &path).await? {
            Some(parsed) => {
                let element = parsed.get("subscription_plan").ok_or_else(|| {
                    BillingError::fatal("plan response is missing subscription_plan element")
                })?;
                SubscriptionPlan::from_xml(element).map(Some)
            }
            None => Ok(None),
        }
    }

    // ---- invoices --------------------------------------------------------

    /// Opens an invoice subscribing `subscriber` to the given plan.
    ///
    /// Creates (or reuses) the subscriber implicitly. The returned invoice
    /// carries one line item on a first subscribe, two when the service
    /// prorates an active plan at a different feature level.
    ///
    /// # Errors
    ///
    /// An unknown plan or an unknown extra subscriber field is a
    /// server-side `Fatal` naming the problem.
    #[instrument(skip(self, subscriber))]
    pub async fn create_invoice(
        &self,
        plan_id: i64,
        subscriber: &InvoiceSubscriber,
    ) -> Result<Invoice> {
        let fields = FieldMap::new()
            .with("subscription_plan_id", plan_id)
            .with("subscriber", subscriber.to_fields());
        let body = encode("invoice", &fields);
        let parsed = self.call(Method::POST, "/invoices.xml", Some(body)).await?;
        invoice_from(&parsed)
    }

    /// Pays an open invoice with the given card.
    #[instrument(skip(self, invoice, card))]
    pub async fn pay_invoice(&self, invoice: &Invoice, card: &CreditCard) -> Result<Invoice> {
        self.pay_invoice_by_token(&invoice.token, card).await
    }

    /// Pays an open invoice addressed by its token.
    ///
    /// Success closes the invoice and activates the subscriber.
    ///
    /// # Errors
    ///
    /// Card validation failures come back as [`BillingError::Retry`] with
    /// the per-field error list and a "Payment verification failed."
    /// summary; a gateway outage as `Retry` with an empty list. A declined
    /// charge ("Charge not authorized") and an unknown token ("Unable to
    /// find invoice") are `Fatal`.
    #[instrument(skip(self, card))]
    pub async fn pay_invoice_by_token(&self, token: &str, card: &CreditCard) -> Result<Invoice> {
        let path = format!("/invoices/{}/pay.xml", encode_segment(token));
        let fields = FieldMap::new().with("credit_card", card.to_fields());
        let body = encode("payment", &fields);
        let parsed = self.call(Method::PUT, &path, Some(body)).await?;
        invoice_from(&parsed)
    }

    // ---- hosted-page URLs ------------------------------------------------

    /// Hosted subscribe-page URL for this site. See [`urls::subscribe_url`].
    #[must_use]
    pub fn subscribe_url(
        &self,
        subscriber_id: &str,
        plan_id: i64,
        screen_name: Option<&str>,
    ) -> String {
        urls::subscribe_url(self.config.site_name(), subscriber_id, plan_id, screen_name)
    }

    /// Hosted subscribe-page URL with pre-filled form fields. See
    /// [`urls::subscribe_url_with_params`].
    #[must_use]
    pub fn subscribe_url_with_params(
        &self,
        subscriber_id: &str,
        plan_id: i64,
        params: &[(&str, &str)],
    ) -> String {
        urls::subscribe_url_with_params(self.config.site_name(), subscriber_id, plan_id, params)
    }

    /// Hosted edit-subscriber-page URL, addressed by the subscriber token.
    /// See [`urls::edit_subscriber_url`].
    #[must_use]
    pub fn edit_subscriber_url(&self, token: &str, return_url: Option<&str>) -> String {
        urls::edit_subscriber_url(self.config.site_name(), token, return_url)
    }
}

/// Percent-encodes one path segment (customer ids and invoice tokens are
/// caller-chosen and may contain spaces or reserved characters).
fn encode_segment(segment: &str) -> String {
    let mut url = Url::parse("https://localhost/").expect("static URL is valid");
    url.path_segments_mut()
        .expect("https URL can be a base")
        .push(segment);
    url.path()[1..].to_owned()
}

fn subscriber_from(parsed: &XmlValue) -> Result<Subscriber> {
    let element = parsed
        .get("subscriber")
        .ok_or_else(|| BillingError::fatal("response is missing subscriber element"))?;
    Subscriber::from_xml(element)
}

fn invoice_from(parsed: &XmlValue) -> Result<Invoice> {
    let element = parsed
        .get("invoice")
        .ok_or_else(|| BillingError::fatal("response is missing invoice element"))?;
    Invoice::from_xml(element)
}

/// Maps `<outer><inner>…</inner>…</outer>` into typed items. An absent or
/// empty collection element is an empty list.
fn collect<R>(
    parsed: &XmlValue,
    outer: &str,
    inner: &str,
    item: impl Fn(&XmlValue) -> Result<R>,
) -> Result<Vec<R>> {
    match parsed.get(outer) {
        Some(list) => list.get_all(inner).into_iter().map(|e| item(e)).collect(),
        None => Ok(Vec::new()),
    }
}
