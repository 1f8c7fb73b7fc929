//! # Speclink Core
//!
//! Call an HTTP API described by an OpenAPI document with loosely-typed data.
//!
//! The crate translates a [`Dto`] (a map of field names to JSON values) into a
//! [`RequestDescriptor`] for one operation of the document, and splits the
//! returned [`ResponseDescriptor`] into a payload or an error:
//!
//! - **[`translate_request`]** - resolve the operation, build the URL, the JSON body and the content headers
//! - **[`translate_response`]** - return the payload, or fail for status codes 400 and above
//! - **[`ApiClient`]** - chain both around a [`Transport`], reqwest by default
//!
//! Both translators are pure and synchronous: no I/O, no shared state, safe to
//! call concurrently.
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use speclink_core::{Dto, OpenApiDocument, translate_request};
//!
//! # fn main() -> Result<(), speclink_core::ApiError> {
//! let document = OpenApiDocument::from_json_str(r#"{
//!     "paths": {
//!         "/test/{id}": {
//!             "get": {
//!                 "parameters": [
//!                     { "name": "id", "in": "path", "required": true },
//!                     { "name": "name", "in": "query", "required": true },
//!                     { "name": "age", "in": "query", "required": true }
//!                 ]
//!             }
//!         }
//!     }
//! }"#)?;
//!
//! let dto = Dto::new().with("id", "iddd").with("name", "test").with("age", 10);
//! let request = translate_request(&dto, &Method::GET, "/test/{id}", &document)?;
//!
//! assert_eq!(request.method, Method::GET);
//! assert_eq!(request.url, "/test/iddd?name=test&age=10");
//! assert_eq!(request.body, None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Where values come from
//!
//! | Location | Lookup | Missing value |
//! |----------|--------|---------------|
//! | path     | `name`, then [`tag_path`] | substituted as `undefined` |
//! | query    | `name`, then [`tag_query`] | appended as `name=undefined` |
//! | body     | truthy `name`, then [`tag_body`] | omitted, or [`ApiError::ValidationFailed`] if the property is marked `required: true` |
//!
//! Only the property-level `required: true` flag is checked for bodies, the
//! object-level `required` list is ignored. Values are not validated against
//! their schemas.
//!
//! ## Disambiguating names
//!
//! When the same name is used by several locations, tag the DTO keys:
//!
//! ```rust
//! use speclink_core::{Dto, tag_path, tag_query};
//!
//! // `/items/{id}?id=...`
//! let dto = Dto::new()
//!     .with(tag_path("id"), "item-1")
//!     .with(tag_query("id"), "revision-3");
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`ApiError`]; [`ApiError::kind`] tells translation failures
//! ([`ErrorKind::NotFound`], [`ErrorKind::ValidationFailed`],
//! [`ErrorKind::HttpFailure`]) apart from transport or configuration ones.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (translated requests, received responses,
//! missing path values) and never installs a subscriber.
//!
//! ## Features
//!
//! - `yaml`: load documents from YAML with [`OpenApiDocument::from_yaml_str`]

mod client;
pub use self::client::{
    ApiClient, ApiClientBuilder, DEFAULT_DOCUMENT_PATH, ReqwestTransport, Transport,
};

mod document;
pub use self::document::{
    MediaType, OpenApiDocument, Operation, Parameter, ParameterLocation, PathItem, Paths,
    RequestBody, Required, Response, Schema,
};

mod dto;
pub use self::dto::{
    BODY_TAG_PREFIX, Dto, PATH_TAG_PREFIX, QUERY_TAG_PREFIX, is_truthy, tag_body, tag_path,
    tag_query,
};

mod error;
pub use self::error::{ApiError, ClientError, ErrorKind, HttpException};

mod request;
pub use self::request::{
    Body, ClassifiedParameters, NegotiatedContent, RequestDescriptor, RequestHeaders, UNDEFINED,
    build_body, build_url, classify_parameters, encode_uri_component, negotiate_content,
    stringify, translate_request,
};

mod response;
pub use self::response::{ResponseDescriptor, translate_response, translate_response_as};
