//! Invoice, line item, and payment detail resources.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{parse_bool, parse_decimal, parse_i64, require_text};
use crate::error::Result;
use crate::xml::{FieldMap, XmlValue};

/// One charge or credit entry on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Signed amount. Currency-exact; prorated credits are negative.
    pub amount: Decimal,
    /// Human-readable description of the entry.
    pub description: Option<String>,
}

impl LineItem {
    fn from_xml(element: &XmlValue) -> Result<Self> {
        let amount = parse_decimal(require_text(element, "amount", "line item")?, "amount")?;
        Ok(Self { amount, description: element.child_text("description").map(str::to_owned) })
    }
}

/// A billing document referencing one subscriber.
///
/// Open until a successful payment is recorded against it; `closed` is
/// true if and only if such a payment exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Service-assigned numeric identifier.
    pub id: i64,
    /// Opaque token used for payment calls and callbacks.
    pub token: String,
    /// Whether a successful payment has been recorded.
    pub closed: bool,
    /// Customer id of the subscriber this invoice bills.
    pub customer_id: Option<String>,
    /// Charge/credit entries, in service order.
    pub line_items: Vec<LineItem>,
}

impl Invoice {
    /// Builds an invoice from its decoded XML element.
    pub(crate) fn from_xml(element: &XmlValue) -> Result<Self> {
        let id = parse_i64(require_text(element, "id", "invoice")?, "id")?;
        let token = require_text(element, "token", "invoice")?.to_owned();

        let customer_id = element
            .get("subscriber")
            .and_then(|s| s.child_text("customer_id"))
            .map(str::to_owned);

        let line_items = match element.get("line_items") {
            Some(items) => items
                .get_all("line_item")
                .into_iter()
                .map(LineItem::from_xml)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            id,
            token,
            closed: parse_bool(element.child_text("closed")),
            customer_id,
            line_items,
        })
    }
}

/// Subscriber details submitted when opening an invoice.
///
/// Invoice creation creates (or reuses) the subscriber implicitly, so the
/// same fields accepted by subscriber creation apply here. `extra` fields
/// are passed through to the service verbatim; unknown names are rejected
/// server-side, never filtered locally.
#[derive(Debug, Clone, Default)]
pub struct InvoiceSubscriber {
    /// Caller-chosen unique identifier. Mandatory.
    pub customer_id: String,
    /// Contact email.
    pub email: Option<String>,
    /// Public display name.
    pub screen_name: Option<String>,
    /// Additional named fields merged into the request.
    pub extra: FieldMap,
}

impl InvoiceSubscriber {
    /// Creates params for the given customer id.
    #[must_use]
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self { customer_id: customer_id.into(), ..Self::default() }
    }

    pub(crate) fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new().with("customer_id", self.customer_id.as_str());
        if let Some(email) = &self.email {
            fields.insert("email", email.as_str());
        }
        if let Some(screen_name) = &self.screen_name {
            fields.insert("screen_name", screen_name.as_str());
        }
        fields.extend(self.extra.clone());
        fields
    }
}

/// Card details for paying an invoice.
///
/// Sent to the service for verification; never stored by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    /// Primary account number.
    pub number: String,
    /// Card brand, e.g. `visa`.
    pub card_type: String,
    /// CVV/CVC verification value.
    pub verification_value: String,
    /// Expiration month (1-12).
    pub month: u32,
    /// Expiration year, four digits.
    pub year: u32,
    /// Cardholder first name.
    pub first_name: String,
    /// Cardholder last name.
    pub last_name: String,
}

impl CreditCard {
    pub(crate) fn to_fields(&self) -> FieldMap {
        FieldMap::new()
            .with("number", self.number.as_str())
            .with("card_type", self.card_type.as_str())
            .with("verification_value", self.verification_value.as_str())
            .with("month", self.month)
            .with("year", self.year)
            .with("first_name", self.first_name.as_str())
            .with("last_name", self.last_name.as_str())
    }
}
