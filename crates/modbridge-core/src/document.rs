//! Store documents of uncertain shape
//!
//! Entries in the remote stores were written by several generations of
//! tooling, so a read can yield an object, some other JSON value, or nothing
//! usable at all. Reads are classified once here and call sites match on the
//! result.

use serde_json::{Map, Value};

/// A document read from a remote store
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Document {
    /// Entry missing or body was not JSON
    #[default]
    Empty,
    /// A JSON object
    Map(Map<String, Value>),
    /// Any other JSON value (array, string, number, bool, null)
    Other(Value),
}

impl Document {
    /// Classify a raw response body; unparsable text counts as absent
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str::<Value>(body).map_or(Self::Empty, Self::from)
    }

    /// Borrow the object, if any
    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Empty | Self::Other(_) => None,
        }
    }

    /// Take the object, substituting an empty one for any other shape
    pub fn into_map_or_empty(self) -> Map<String, Value> {
        match self {
            Self::Map(map) => map,
            Self::Empty | Self::Other(_) => Map::new(),
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Map(map),
            other => Self::Other(other),
        }
    }
}

impl From<Option<Document>> for Document {
    fn from(doc: Option<Document>) -> Self {
        doc.unwrap_or_default()
    }
}
