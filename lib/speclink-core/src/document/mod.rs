//! The subset of an OpenAPI document needed to translate requests.
//!
//! The model is deliberately lenient: every field the translators do not read is
//! kept in a flattened `extensions` map, so a full OpenAPI 3.x document (with `info`,
//! `components`, descriptions, tags, ...) loads without loss. References (`$ref`) are
//! not resolved; the document is expected to be already dereferenced.

use http::Method;
use http::header::ACCEPT;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::ApiError;

mod schema;
pub use self::schema::{Required, Schema};

/// Path items indexed by path template (e.g. `/users/{id}`), in document order.
pub type Paths = IndexMap<String, PathItem>;

/// An OpenAPI document, reduced to what request translation needs.
///
/// # Example
///
/// ```rust
/// use speclink_core::OpenApiDocument;
///
/// # fn main() -> Result<(), speclink_core::ApiError> {
/// let document = OpenApiDocument::from_json_str(
///     r#"{
///         "openapi": "3.0.3",
///         "paths": {
///             "/users/{id}": {
///                 "get": {
///                     "parameters": [{ "name": "id", "in": "path", "required": true }]
///                 }
///             }
///         }
///     }"#,
/// )?;
///
/// assert!(document.paths.contains_key("/users/{id}"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// The path items of the document.
    #[serde(default)]
    pub paths: Paths,
    /// Every other top-level entry (`openapi`, `info`, `components`, ...), never consulted.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl OpenApiDocument {
    /// Parses a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DocumentError`] with the failing location when the JSON does not
    /// describe a valid document.
    pub fn from_json_str(json: &str) -> Result<Self, ApiError> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        let document: Self = serde_path_to_error::deserialize(deserializer).map_err(|err| {
            ApiError::DocumentError {
                message: format!("at '{}': {}", err.path(), err.inner()),
            }
        })?;
        debug!(paths = document.paths.len(), "OpenAPI document loaded");
        Ok(document)
    }

    /// Builds a document from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DocumentError`] when the value does not describe a valid document.
    pub fn from_json_value(value: Value) -> Result<Self, ApiError> {
        let document: Self = serde_path_to_error::deserialize(value).map_err(|err| {
            ApiError::DocumentError {
                message: format!("at '{}': {}", err.path(), err.inner()),
            }
        })?;
        debug!(paths = document.paths.len(), "OpenAPI document loaded");
        Ok(document)
    }

    /// Downloads a document served as JSON, for instance by the API itself under
    /// [`DEFAULT_DOCUMENT_PATH`](crate::DEFAULT_DOCUMENT_PATH).
    ///
    /// # Errors
    ///
    /// - [`ApiError::ReqwestError`] if the request fails or the server answers with a failure status
    /// - [`ApiError::DocumentError`] if the payload is not a valid document
    pub async fn fetch(client: &reqwest::Client, url: Url) -> Result<Self, ApiError> {
        debug!(%url, "fetching OpenAPI document");
        let response = client
            .get(url)
            .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
            .send()
            .await?
            .error_for_status()?;
        let json = response.text().await?;
        Self::from_json_str(&json)
    }

    /// Parses a document from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DocumentError`] when the YAML does not describe a valid document.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ApiError> {
        let document: Self = serde_saphyr::from_str(yaml).map_err(|err| ApiError::DocumentError {
            message: err.to_string(),
        })?;
        debug!(paths = document.paths.len(), "OpenAPI document loaded");
        Ok(document)
    }
}

/// The operations available under one path template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// The `GET` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// The `PUT` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// The `POST` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// The `DELETE` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// The `OPTIONS` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// The `HEAD` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// The `PATCH` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// The `TRACE` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
    /// Every other entry (`summary`, `servers`, shared `parameters`, ...), never consulted.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl PathItem {
    /// Iterates over the declared operations with their canonical method.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            (Method::GET, &self.get),
            (Method::PUT, &self.put),
            (Method::POST, &self.post),
            (Method::DELETE, &self.delete),
            (Method::OPTIONS, &self.options),
            (Method::HEAD, &self.head),
            (Method::PATCH, &self.patch),
            (Method::TRACE, &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, operation)| operation.as_ref().map(|op| (method, op)))
    }

    /// Finds the operation for a method, ignoring the ASCII case of the method name.
    ///
    /// Returns the canonical (upper-case) method along with the operation.
    pub fn find_operation(&self, method: &Method) -> Option<(Method, &Operation)> {
        self.operations()
            .find(|(candidate, _)| candidate.as_str().eq_ignore_ascii_case(method.as_str()))
    }

    /// Returns the operation for a method, if declared.
    pub fn operation(&self, method: &Method) -> Option<&Operation> {
        self.find_operation(method).map(|(_, operation)| operation)
    }
}

/// One HTTP method entry under a path template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The parameters, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// The request body, by content type.
    #[serde(
        default,
        rename = "requestBody",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<RequestBody>,
    /// The responses, by status code, in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Response>,
    /// Every other entry (`operationId`, `tags`, `x-*`, ...), never consulted.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Operation {
    /// Returns the request body schema declared for a content type.
    pub fn request_schema(&self, content_type: &str) -> Option<&Schema> {
        self.request_body
            .as_ref()?
            .content
            .get(content_type)?
            .schema
            .as_ref()
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// The parameter name, as used in the path template or the query string.
    pub name: String,
    /// Where the parameter goes.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is mandatory. Not enforced by the translators.
    #[serde(default)]
    pub required: bool,
    /// The parameter schema. Only its presence is meaningful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// The location of a parameter (the OpenAPI `in` field).
///
/// Unknown locations are kept as [`ParameterLocation::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// A `{name}` placeholder in the path template.
    Path,
    /// A query string entry.
    Query,
    /// A request header.
    Header,
    /// A cookie.
    Cookie,
    /// Any other value.
    #[serde(untagged)]
    Other(String),
}

impl ParameterLocation {
    /// The location as written in the document.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
            Self::Other(location) => location,
        }
    }
}

/// A request body declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// The accepted payloads, by content type, in document order.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
    /// Every other entry (`description`, `required`, ...), never consulted.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// A response declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The produced payloads, by content type, in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
    /// Every other entry (`description`, `headers`, ...), never consulted.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// The schema of a payload for one content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// The payload schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Every other entry (`example`, `examples`, ...), never consulted.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}
