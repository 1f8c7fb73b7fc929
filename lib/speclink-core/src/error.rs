use http::Method;

use crate::document::{PathItem, Paths};
use crate::response::ResponseDescriptor;

/// Errors that can occur when translating requests, responses, or running calls.
///
/// The three translation failures ([`NotFound`](Self::NotFound),
/// [`ValidationFailed`](Self::ValidationFailed) and [`HttpFailure`](Self::HttpFailure))
/// are terminal: nothing in this crate retries them. Use [`ApiError::kind`] to
/// branch on them without destructuring.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiError {
    /// The path template or the method is not part of the OpenAPI document.
    NotFound(ClientError),

    /// A property marked as required in the request body schema has no truthy value in the DTO.
    #[display("Missing required property: {property}")]
    #[from(skip)]
    ValidationFailed {
        /// The name of the missing property.
        property: String,
    },

    /// The server answered with a status code greater than or equal to 400.
    HttpFailure(HttpException),

    /// HTTP client error from the underlying reqwest library.
    ReqwestError(reqwest::Error),

    /// URL parsing error when joining the base URL and the request URL.
    UrlError(url::ParseError),

    /// HTTP protocol error from the http crate.
    HttpError(http::Error),

    /// Invalid HTTP header value.
    ///
    /// Occurs when a negotiated content type cannot be used as a header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization/deserialization error.
    JsonValueError(serde_json::Error),

    /// Response payload deserialization failure.
    #[display("Failed to deserialize JSON at '{path}': {error}")]
    #[from(skip)]
    JsonError {
        /// The JSON path where the error occurred.
        path: String,
        /// The underlying JSON parsing error.
        error: serde_json::Error,
    },

    /// The OpenAPI document could not be loaded.
    #[display("Invalid OpenAPI document: {message}")]
    #[from(skip)]
    DocumentError {
        /// Description of the parsing failure, including its location when known.
        message: String,
    },

    /// The value used to build a DTO is not a JSON object.
    #[display("Invalid DTO, expected an object. Got: {value}")]
    #[from(skip)]
    InvalidDto {
        /// The value that was provided.
        value: serde_json::Value,
    },

    /// Invalid base path configuration.
    #[display("Invalid base path: {error}")]
    #[from(skip)]
    InvalidBasePath {
        /// Description of why the base path is invalid.
        error: String,
    },

    /// The client builder was not given an OpenAPI document.
    #[display("Missing OpenAPI document, use `with_document` on the builder")]
    MissingDocument,
}

/// The kind of an [`ApiError`], for callers that only need to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ApiError::NotFound`].
    NotFound,
    /// See [`ApiError::ValidationFailed`].
    ValidationFailed,
    /// See [`ApiError::HttpFailure`].
    HttpFailure,
    /// Any transport, encoding, or configuration error.
    Other,
}

impl ApiError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::HttpFailure(_) => ErrorKind::HttpFailure,
            _ => ErrorKind::Other,
        }
    }
}

/// Resolution failure of an operation inside the OpenAPI document.
///
/// Each variant carries the object that was searched, for diagnostics.
#[derive(Debug, Clone, derive_more::Error, derive_more::Display)]
pub enum ClientError {
    /// No path item is registered under this template.
    #[display("Path not found: {path_key}")]
    PathNotFound {
        /// The path template that was looked up.
        path_key: String,
        /// The document paths that were searched.
        paths: Box<Paths>,
    },

    /// The path item has no operation for this method.
    #[display("Method not found: {method}")]
    MethodNotFound {
        /// The method that was looked up.
        method: Method,
        /// The path item that was searched.
        path_item: Box<PathItem>,
    },
}

/// A response with a failure status code (400 and above).
#[derive(Debug, Clone, derive_more::Error, derive_more::Display)]
#[display("{message}")]
pub struct HttpException {
    message: String,
    response: Box<ResponseDescriptor>,
}

impl HttpException {
    pub(crate) fn new(response: ResponseDescriptor) -> Self {
        Self {
            message: response.status_text.clone(),
            response: Box::new(response),
        }
    }

    /// The status text of the failed response.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The full failed response.
    pub fn response(&self) -> &ResponseDescriptor {
        &self.response
    }

    /// Consumes the exception and returns the failed response.
    pub fn into_response(self) -> ResponseDescriptor {
        *self.response
    }
}
