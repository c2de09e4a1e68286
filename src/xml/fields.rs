//! Dynamic request field maps.

use rust_decimal::Decimal;

/// A single value in a request payload.
///
/// Mirrors what the billing service accepts as element content: scalar
/// strings, numbers, booleans, and nested mappings.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text content, escaped on encode.
    Text(String),
    /// Integer content.
    Int(i64),
    /// Currency-exact decimal content.
    Decimal(Decimal),
    /// Boolean content, rendered as `true`/`false`.
    Bool(bool),
    /// A nested element with its own children.
    Map(FieldMap),
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<FieldMap> for FieldValue {
    fn from(v: FieldMap) -> Self {
        Self::Map(v)
    }
}

/// An ordered mapping of field name to [`FieldValue`].
///
/// Insertion order is preserved so request bodies are deterministic.
/// Field names are rendered exactly as given; the map never filters or
/// renames fields, so extra options flow through to the service untouched.
///
/// # Examples
///
/// ```
/// use subrail_client::xml::{encode, FieldMap};
///
/// let mut fields = FieldMap::new();
/// fields.insert("customer_id", "joe");
/// fields.insert("recurring", false);
///
/// let body = encode("subscriber", &fields);
/// assert!(body.contains("<customer_id>joe</customer_id>"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(Vec<(String, FieldValue)>);

impl FieldMap {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a field, keeping insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.push((name.into(), value.into()));
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends every field of `other` after the existing fields.
    pub fn extend(&mut self, other: FieldMap) {
        self.0.extend(other.0);
    }

    /// True when the map holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
