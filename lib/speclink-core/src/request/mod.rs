//! Request translation: from a DTO and an operation to a [`RequestDescriptor`].
//!
//! The pipeline is split in small pure steps, each usable on its own:
//!
//! - [`classify_parameters`] - group parameters by location
//! - [`build_url`] - substitute path placeholders and append the query string
//! - [`negotiate_content`] - choose the request and accepted content types
//! - [`build_body`] - project the DTO onto the body schema
//!
//! [`translate_request`] chains them after resolving the operation in the document.

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use serde::Serialize;
use tracing::debug;

use crate::document::OpenApiDocument;
use crate::{ApiError, ClientError, Dto};

mod body;
pub use self::body::{Body, build_body};

mod content;
pub use self::content::{NegotiatedContent, negotiate_content};

mod encoding;
pub use self::encoding::{UNDEFINED, encode_uri_component, stringify};

mod parameters;
pub use self::parameters::{ClassifiedParameters, classify_parameters};

mod url;
pub use self::url::build_url;

/// A transport-independent description of an outgoing request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    /// The upper-case HTTP method.
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    /// The path with substituted placeholders and the query string, relative to the server.
    pub url: String,
    /// The JSON body, if the operation declares a body schema.
    pub body: Option<Body>,
    /// The negotiated content headers.
    pub headers: RequestHeaders,
}

/// The content headers of a [`RequestDescriptor`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestHeaders {
    /// The `accept` header value.
    pub accept: Option<String>,
    /// The `content-type` header value.
    #[serde(rename = "content-type")]
    pub content_type: Option<String>,
}

impl RequestHeaders {
    /// Converts the negotiated headers into an [`HeaderMap`], skipping absent values.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeaderValue`] if a content type is not a valid header value.
    pub fn to_header_map(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(accept) = &self.accept {
            headers.insert(ACCEPT, HeaderValue::from_str(accept)?);
        }
        if let Some(content_type) = &self.content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type)?);
        }
        Ok(headers)
    }
}

fn serialize_method<S>(method: &Method, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(method.as_str())
}

/// Translates a DTO into a request for the operation `method` on `path_key`.
///
/// The operation is resolved first, so an unknown path template or method fails
/// before any URL or body is built.
///
/// # Errors
///
/// - [`ApiError::NotFound`] if the path template or the method is not in the document
/// - [`ApiError::ValidationFailed`] if a required body property has no truthy value
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use speclink_core::{Dto, OpenApiDocument, translate_request};
///
/// # fn main() -> Result<(), speclink_core::ApiError> {
/// let document = OpenApiDocument::from_json_str(r#"{
///     "paths": {
///         "/test": {
///             "post": {
///                 "requestBody": {
///                     "content": {
///                         "application/json": {
///                             "schema": {
///                                 "type": "object",
///                                 "properties": { "name": { "type": "string" }, "age": { "type": "number" } }
///                             }
///                         }
///                     }
///                 }
///             }
///         }
///     }
/// }"#)?;
/// let dto = Dto::new().with("name", "test").with("age", 10);
///
/// let request = translate_request(&dto, &Method::POST, "/test", &document)?;
///
/// assert_eq!(request.url, "/test");
/// assert_eq!(request.headers.content_type.as_deref(), Some("application/json"));
/// assert_eq!(request.body.map(|body| body.len()), Some(2));
/// # Ok(())
/// # }
/// ```
pub fn translate_request(
    dto: &Dto,
    method: &Method,
    path_key: &str,
    document: &OpenApiDocument,
) -> Result<RequestDescriptor, ApiError> {
    let Some(path_item) = document.paths.get(path_key) else {
        return Err(ClientError::PathNotFound {
            path_key: path_key.to_string(),
            paths: Box::new(document.paths.clone()),
        }
        .into());
    };

    let Some((method, operation)) = path_item.find_operation(method) else {
        return Err(ClientError::MethodNotFound {
            method: method.clone(),
            path_item: Box::new(path_item.clone()),
        }
        .into());
    };

    let parameters = classify_parameters(&operation.parameters);
    let url = build_url(dto, path_key, &parameters);

    let NegotiatedContent {
        content_type,
        accept,
    } = negotiate_content(operation);

    let body = content_type
        .as_deref()
        .and_then(|content_type| operation.request_schema(content_type))
        .map(|schema| build_body(dto, schema))
        .transpose()?;

    let request = RequestDescriptor {
        method,
        url,
        body,
        headers: RequestHeaders {
            accept,
            content_type,
        },
    };
    debug!(?request, "request translated");

    Ok(request)
}
