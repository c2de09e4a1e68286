//! Typed domain resources.
//!
//! Each resource knows how to build itself from a decoded [`XmlValue`]
//! element. Scalar leaves arrive as raw strings from the codec; the parsers
//! here are responsible for exact typed conversion: currency amounts go
//! through [`rust_decimal::Decimal`] (never binary floating point),
//! timestamps through RFC 3339, and absent booleans default to `false`.

mod invoice;
mod plan;
mod subscriber;

pub use invoice::{CreditCard, Invoice, InvoiceSubscriber, LineItem};
pub use plan::SubscriptionPlan;
pub use subscriber::Subscriber;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{BillingError, Result};
use crate::xml::XmlValue;

/// Returns the required text of a child element, or a fatal error naming
/// the missing field.
pub(crate) fn require_text<'a>(
    element: &'a XmlValue,
    name: &str,
    context: &str,
) -> Result<&'a str> {
    element
        .child_text(name)
        .ok_or_else(|| BillingError::fatal(format!("{context} response is missing {name}")))
}

/// Parses a currency-exact decimal.
pub(crate) fn parse_decimal(text: &str, field: &str) -> Result<Decimal> {
    text.parse::<Decimal>()
        .map_err(|e| BillingError::fatal(format!("invalid decimal in {field}: {e}")))
}

/// Parses an RFC 3339 timestamp into UTC.
pub(crate) fn parse_datetime(text: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| BillingError::fatal(format!("invalid timestamp in {field}: {e}")))
}

/// Parses an integer id.
pub(crate) fn parse_i64(text: &str, field: &str) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|e| BillingError::fatal(format!("invalid integer in {field}: {e}")))
}

/// Parses a boolean leaf; absent or anything but `true` is `false`.
pub(crate) fn parse_bool(text: Option<&str>) -> bool {
    matches!(text, Some("true"))
}
