use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ApiError;

/// Key prefix reserved for path parameter values, see [`tag_path`].
pub const PATH_TAG_PREFIX: &str = "p/";
/// Key prefix reserved for query parameter values, see [`tag_query`].
pub const QUERY_TAG_PREFIX: &str = "q/";
/// Key prefix reserved for body property values, see [`tag_body`].
pub const BODY_TAG_PREFIX: &str = "b/";

/// Tags a field name as a path parameter.
///
/// Use it when the same name is both a path parameter and a query parameter or a
/// body property, to give each location its own value.
///
/// ```rust
/// use speclink_core::{Dto, tag_path};
///
/// // `id` is a query parameter, `p/id` the path parameter
/// let dto = Dto::new().with("id", 1).with(tag_path("id"), 42);
/// assert_eq!(tag_path("id"), "p/id");
/// ```
pub fn tag_path(name: &str) -> String {
    [PATH_TAG_PREFIX, name].concat()
}

/// Tags a field name as a query parameter, see [`tag_path`].
pub fn tag_query(name: &str) -> String {
    [QUERY_TAG_PREFIX, name].concat()
}

/// Tags a field name as a body property, see [`tag_path`].
pub fn tag_body(name: &str) -> String {
    [BODY_TAG_PREFIX, name].concat()
}

/// The loosely-typed data of one call: path parameters, query parameters and body
/// properties, all in one map.
///
/// Plain keys always win over tagged keys (see [`tag_path`], [`tag_query`],
/// [`tag_body`]).
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use speclink_core::Dto;
///
/// #[derive(Serialize)]
/// struct NewUser {
///     name: String,
///     age: u32,
/// }
///
/// # fn main() -> Result<(), speclink_core::ApiError> {
/// let dto = Dto::from_serialize(&NewUser { name: "test".to_string(), age: 10 })?;
/// assert_eq!(dto, Dto::new().with("name", "test").with("age", 10));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_more::Deref)]
#[serde(transparent)]
pub struct Dto(IndexMap<String, Value>);

impl Dto {
    /// Creates an empty DTO.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, replacing any previous value under the same key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, returning the previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builds a DTO from any value serializing to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::JsonValueError`] if serialization fails, and
    /// [`ApiError::InvalidDto`] if the value is not an object.
    pub fn from_serialize<T>(value: &T) -> Result<Self, ApiError>
    where
        T: Serialize + ?Sized,
    {
        Self::try_from(serde_json::to_value(value)?)
    }

    /// Looks up a path parameter: plain key first, then [`tag_path`].
    pub fn path_value(&self, name: &str) -> Option<&Value> {
        self.0.get(name).or_else(|| self.0.get(&tag_path(name)))
    }

    /// Looks up a query parameter: plain key first, then [`tag_query`].
    pub fn query_value(&self, name: &str) -> Option<&Value> {
        self.0.get(name).or_else(|| self.0.get(&tag_query(name)))
    }

    /// Looks up a body property.
    ///
    /// A truthy plain value wins, then the [`tag_body`] value, then the plain value
    /// even if falsy (so `0` or `false` are still sent).
    pub fn body_value(&self, name: &str) -> Option<&Value> {
        let plain = self.0.get(name);
        if plain.is_some_and(is_truthy) {
            return plain;
        }
        self.0.get(&tag_body(name)).or(plain)
    }
}

impl TryFrom<Value> for Dto {
    type Error = ApiError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            value => Err(ApiError::InvalidDto { value }),
        }
    }
}

impl From<IndexMap<String, Value>> for Dto {
    fn from(value: IndexMap<String, Value>) -> Self {
        Self(value)
    }
}

impl<K, V> FromIterator<(K, V)> for Dto
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// JavaScript-like truthiness of a JSON value.
///
/// `null`, `false`, `0` and `""` are falsy; everything else, including empty arrays
/// and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|it| it.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
