use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dto::is_truthy;

/// A JSON schema fragment, as found under a request body content type.
///
/// Only `properties` and `required` are interpreted; everything else is kept as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The declared properties, in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// The `required` keyword, either a per-property flag or a list of names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Required>,
    /// Every other keyword (`type`, `format`, `example`, ...).
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// The shapes the `required` keyword takes in the wild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Required {
    /// `required: true` written on a property.
    Flag(bool),
    /// `required: ["a", "b"]` written on an object schema.
    Names(Vec<String>),
    /// Any other value, such as `required: "yes"`; it counts when truthy.
    Other(Value),
}

impl Schema {
    /// Whether this schema, used as a property, is marked as required.
    ///
    /// Only the property's own `required` keyword counts: `Flag(true)`, any list of
    /// names (even empty) or any other truthy value. The `required` list of the
    /// enclosing object is ignored.
    pub fn is_marked_required(&self) -> bool {
        match &self.required {
            Some(Required::Flag(flag)) => *flag,
            Some(Required::Names(_)) => true,
            Some(Required::Other(value)) => is_truthy(value),
            None => false,
        }
    }
}
