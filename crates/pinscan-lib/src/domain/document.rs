use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;

/// A non-string scalar from a YAML document.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
        }
    }
}

/// A decoded workflow document, or any part of one.
///
/// Accessors never fail on a type mismatch: asking a sequence for a key or a
/// mapping for its string value yields `None`, which callers treat as absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    String(String),
    Sequence(Vec<Node>),
    /// Entries in document order
    Mapping(Vec<(String, Node)>),
    Scalar(Scalar),
}

impl Node {
    /// Look up `key` in a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            Node::Sequence(_) | Node::Mapping(_) | Node::Scalar(_) => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            Node::String(_) | Node::Mapping(_) | Node::Scalar(_) => None,
        }
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Mapping(entries) => Some(entries),
            Node::String(_) | Node::Sequence(_) | Node::Scalar(_) => None,
        }
    }

    /// Short description of the node's shape, for diagnostics.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Node::String(_) => "a string",
            Node::Sequence(_) => "a sequence",
            Node::Mapping(_) => "a mapping",
            Node::Scalar(Scalar::Null) => "an empty document",
            Node::Scalar(_) => "a scalar",
        }
    }

    /// Render a mapping key. Only scalar keys have a textual form.
    fn into_key(self) -> Option<String> {
        match self {
            Node::String(s) => Some(s),
            Node::Scalar(scalar) => Some(scalar.to_string()),
            Node::Sequence(_) | Node::Mapping(_) => None,
        }
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Integer(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        // Out-of-range integers keep their text rather than losing precision
        Ok(i64::try_from(v).map_or_else(
            |_| Node::String(v.to_string()),
            |i| Node::Scalar(Scalar::Integer(i)),
        ))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut entries: Vec<(String, Node)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Node, Node>()? {
            // Complex keys cannot name a job or a field; drop them
            let Some(key) = key.into_key() else {
                continue;
            };
            // A repeated key keeps its first position and takes the last value
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => *existing = value,
                None => entries.push((key, value)),
            }
        }
        Ok(Node::Mapping(entries))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}
