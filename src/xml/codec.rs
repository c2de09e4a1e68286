//! Encoding and decoding between XML text and the crate's tree types.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{BillingError, Result};
use crate::xml::{FieldMap, FieldValue, XmlValue};

/// Serializes a field map as an XML document rooted at `tag`.
///
/// Field names are rendered in their original form; text content is
/// escaped. An empty map produces a self-closing root element.
#[must_use]
pub fn encode(tag: &str, fields: &FieldMap) -> String {
    let mut out = String::with_capacity(128);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    write_element(&mut out, tag, fields);
    out
}

fn write_element(out: &mut String, tag: &str, fields: &FieldMap) {
    if fields.is_empty() {
        out.push('<');
        out.push_str(tag);
        out.push_str("/>");
        return;
    }
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for (name, value) in fields.iter() {
        match value {
            FieldValue::Map(nested) => write_element(out, name, nested),
            FieldValue::Text(s) => write_leaf(out, name, &escape(s.as_str())),
            FieldValue::Int(i) => write_leaf(out, name, &i.to_string()),
            FieldValue::Decimal(d) => write_leaf(out, name, &d.to_string()),
            FieldValue::Bool(b) => write_leaf(out, name, if *b { "true" } else { "false" }),
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_leaf(out: &mut String, name: &str, content: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(content);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

struct Node {
    name: String,
    children: Vec<(String, XmlValue)>,
    text: String,
}

impl Node {
    fn new(name: String) -> Self {
        Self { name, children: Vec::new(), text: String::new() }
    }

    fn into_value(self) -> (String, XmlValue) {
        let value = if !self.children.is_empty() {
            XmlValue::Element(self.children)
        } else if self.text.is_empty() {
            XmlValue::Nil
        } else {
            XmlValue::Text(self.text)
        };
        (self.name, value)
    }
}

fn malformed(detail: impl std::fmt::Display) -> BillingError {
    BillingError::fatal(format!("malformed XML response: {detail}"))
}

/// Parses an XML document into an [`XmlValue`] tree.
///
/// The returned value is a document node whose children are the root
/// element(s). Empty and self-closing elements decode to
/// [`XmlValue::Nil`]; repeated sibling elements are preserved in order.
/// Whitespace-only input decodes to [`XmlValue::Nil`].
///
/// # Errors
///
/// Returns [`BillingError::Fatal`] on malformed XML.
pub fn decode(xml: &str) -> Result<XmlValue> {
    if xml.trim().is_empty() {
        return Ok(XmlValue::Nil);
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // Index 0 is a sentinel document node; real elements stack above it.
    let mut stack = vec![Node::new(String::new())];

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(Node::new(name));
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let top = stack.last_mut().ok_or_else(|| malformed("unbalanced document"))?;
                top.children.push((name, XmlValue::Nil));
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(malformed)?;
                let top = stack.last_mut().ok_or_else(|| malformed("unbalanced document"))?;
                top.text.push_str(&text);
            }
            Ok(Event::CData(t)) => {
                let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                let top = stack.last_mut().ok_or_else(|| malformed("unbalanced document"))?;
                top.text.push_str(&text);
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().ok_or_else(|| malformed("unbalanced document"))?;
                let parent = stack.last_mut().ok_or_else(|| malformed("unbalanced document"))?;
                parent.children.push(node.into_value());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(malformed(e)),
        }
    }

    if stack.len() != 1 {
        return Err(malformed("unclosed element"));
    }
    let document = stack.remove(0);
    if document.children.is_empty() {
        return Ok(XmlValue::Nil);
    }
    Ok(XmlValue::Element(document.children))
}
