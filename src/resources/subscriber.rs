//! Subscriber resource.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{parse_bool, parse_datetime, parse_decimal, require_text};
use crate::error::Result;
use crate::xml::XmlValue;

/// One end-customer account on the billing site.
///
/// Identified by the caller-supplied `customer_id`; `token` is the
/// system-generated stable identity alias used in hosted-page URLs.
///
/// The `active`, `active_until`, and `recurring` flags always reflect the
/// most recent successful comp/subscribe/pay/stop-auto-renew operation as
/// reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Caller-chosen unique identifier.
    pub customer_id: String,
    /// Contact email, if set.
    pub email: Option<String>,
    /// Public display name, if set.
    pub screen_name: Option<String>,
    /// Billing first name, if set.
    pub billing_first_name: Option<String>,
    /// Billing last name, if set.
    pub billing_last_name: Option<String>,
    /// Whether the subscriber currently has access.
    pub active: bool,
    /// When access lapses; `None` for inactive or lifetime subscribers.
    pub active_until: Option<DateTime<Utc>>,
    /// Entitlement tier label, if any.
    pub feature_level: Option<String>,
    /// Whether the subscriber is on an auto-renewing plan.
    pub recurring: bool,
    /// Whether the subscriber is currently consuming a free trial.
    pub on_trial: bool,
    /// Outstanding store credit. Currency-exact.
    pub store_credit: Decimal,
    /// When the account was created on the billing site.
    pub created_at: Option<DateTime<Utc>>,
    /// System-generated stable identity alias.
    pub token: Option<String>,
}

impl Subscriber {
    /// Builds a subscriber from its decoded XML element.
    ///
    /// # Errors
    ///
    /// Returns [`Fatal`](crate::BillingError::Fatal) when `customer_id` is
    /// missing or a typed leaf fails to parse.
    pub(crate) fn from_xml(element: &XmlValue) -> Result<Self> {
        let customer_id = require_text(element, "customer_id", "subscriber")?.to_owned();

        let active_until = element
            .child_text("active_until")
            .map(|t| parse_datetime(t, "active_until"))
            .transpose()?;
        let created_at = element
            .child_text("created_at")
            .map(|t| parse_datetime(t, "created_at"))
            .transpose()?;
        let store_credit = element
            .child_text("store_credit")
            .map(|t| parse_decimal(t, "store_credit"))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            customer_id,
            email: element.child_text("email").map(str::to_owned),
            screen_name: element.child_text("screen_name").map(str::to_owned),
            billing_first_name: element.child_text("billing_first_name").map(str::to_owned),
            billing_last_name: element.child_text("billing_last_name").map(str::to_owned),
            active: parse_bool(element.child_text("active")),
            active_until,
            feature_level: element.child_text("feature_level").map(str::to_owned),
            recurring: parse_bool(element.child_text("recurring")),
            on_trial: parse_bool(element.child_text("on_trial")),
            store_credit,
            created_at,
            token: element.child_text("token").map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::decode;

    const FULL: &str = "<subscriber>\
        <customer_id>joe</customer_id>\
        <email>joe@example.com</email>\
        <screen_name>joey</screen_name>\
        <billing_first_name>Joe</billing_first_name>\
        <billing_last_name>Bob</billing_last_name>\
        <active>true</active>\
        <active_until>2026-09-01T00:00:00Z</active_until>\
        <feature_level>Sweet!</feature_level>\
        <recurring>false</recurring>\
        <on_trial>false</on_trial>\
        <store_credit>1.50</store_credit>\
        <created_at>2026-08-01T09:30:00Z</created_at>\
        <token>tok-abc123</token>\
        </subscriber>";

    fn parse(xml: &str) -> Subscriber {
        let doc = decode(xml).unwrap();
        Subscriber::from_xml(doc.get("subscriber").unwrap()).unwrap()
    }

    #[test]
    fn test_full_subscriber_parses() {
        let subscriber = parse(FULL);
        assert_eq!(subscriber.customer_id, "joe");
        assert_eq!(subscriber.email.as_deref(), Some("joe@example.com"));
        assert_eq!(subscriber.screen_name.as_deref(), Some("joey"));
        assert!(subscriber.active);
        assert!(!subscriber.recurring);
        assert_eq!(subscriber.feature_level.as_deref(), Some("Sweet!"));
        assert_eq!(subscriber.store_credit.to_string(), "1.50");
        assert_eq!(subscriber.token.as_deref(), Some("tok-abc123"));
        assert!(subscriber.active_until.is_some());
    }

    #[test]
    fn test_minimal_subscriber_defaults() {
        let subscriber = parse("<subscriber><customer_id>joe</customer_id></subscriber>");
        assert_eq!(subscriber.customer_id, "joe");
        assert_eq!(subscriber.email, None);
        assert!(!subscriber.active);
        assert!(!subscriber.recurring);
        assert!(!subscriber.on_trial);
        assert_eq!(subscriber.active_until, None);
        assert_eq!(subscriber.store_credit, Decimal::ZERO);
    }

    #[test]
    fn test_empty_elements_read_as_absent() {
        let subscriber =
            parse("<subscriber><customer_id>joe</customer_id><email/><active/></subscriber>");
        assert_eq!(subscriber.email, None);
        assert!(!subscriber.active);
    }

    #[test]
    fn test_missing_customer_id_is_fatal() {
        let doc = decode("<subscriber><email>joe@example.com</email></subscriber>").unwrap();
        let result = Subscriber::from_xml(doc.get("subscriber").unwrap());
        assert!(result.unwrap_err().to_string().contains("customer_id"));
    }

    #[test]
    fn test_bad_timestamp_is_fatal() {
        let doc = decode(
            "<subscriber><customer_id>joe</customer_id>\
             <active_until>soon</active_until></subscriber>",
        )
        .unwrap();
        assert!(Subscriber::from_xml(doc.get("subscriber").unwrap()).is_err());
    }
}
