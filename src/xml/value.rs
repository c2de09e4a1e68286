//! Untyped decoded XML tree.

/// One node of a decoded XML response.
///
/// [`decode`](super::decode) returns a synthetic document node whose single
/// child is the response's root element, so lookups start with
/// `doc.get("subscriber")` and friends. Repeated sibling elements keep
/// their document order and are reachable through
/// [`get_all`](Self::get_all).
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    /// A self-closing or empty element.
    Nil,
    /// An element holding only character data, unescaped but otherwise raw.
    Text(String),
    /// An element with child elements, in document order. Names repeat for
    /// repeated siblings.
    Element(Vec<(String, XmlValue)>),
}

impl XmlValue {
    /// Returns the first child element with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&XmlValue> {
        match self {
            Self::Element(children) => {
                children.iter().find(|(n, _)| n == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Returns every child element with the given name, in document order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&XmlValue> {
        match self {
            Self::Element(children) => {
                children.iter().filter(|(n, _)| n == name).map(|(_, v)| v).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Returns this node's character data, if it is a text leaf.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Shorthand for `get(name).and_then(XmlValue::text)`.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Self::text)
    }

    /// True for empty/self-closing elements.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Name of the single child of a document node, when there is exactly
    /// one. Used by the classifier to recognize `error` roots.
    #[must_use]
    pub fn root_name(&self) -> Option<&str> {
        match self {
            Self::Element(children) if children.len() == 1 => {
                children.first().map(|(n, _)| n.as_str())
            }
            _ => None,
        }
    }
}
