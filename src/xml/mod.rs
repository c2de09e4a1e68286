//! XML codec for request and response bodies.
//!
//! The wire format is plain UTF-8 XML. Requests are built from dynamic
//! [`FieldMap`]s so callers can merge arbitrary named options into a
//! payload without the client whitelisting field names it does not
//! understand (unknown-field errors must originate server-side). Responses
//! decode into an untyped [`XmlValue`] tree; scalar leaves stay raw strings
//! and typed parsing (decimals, timestamps, booleans) happens in the
//! resource layer.

mod codec;
mod fields;
mod value;

pub use codec::{decode, encode};
pub use fields::{FieldMap, FieldValue};
pub use value::XmlValue;
