use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ApiError, HttpException};

/// A transport-independent description of a received response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDescriptor {
    /// The response status.
    pub status: StatusCode,
    /// The status text, used as message of an [`HttpException`].
    pub status_text: String,
    /// The response headers.
    pub headers: HeaderMap,
    /// The decoded payload.
    pub data: Value,
}

impl ResponseDescriptor {
    /// Creates a response with the canonical reason phrase as status text and no headers.
    pub fn new(status: StatusCode, data: Value) -> Self {
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: HeaderMap::new(),
            data,
        }
    }

    /// Replaces the status text.
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Replaces the headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Whether the status is a failure (400 and above).
    pub fn is_failure(&self) -> bool {
        self.status.as_u16() >= 400
    }
}

/// Returns the payload of a successful response.
///
/// # Errors
///
/// Returns [`ApiError::HttpFailure`] carrying the whole response when the status is 400
/// or above.
///
/// ```rust
/// use http::StatusCode;
/// use serde_json::json;
/// use speclink_core::{ApiError, ResponseDescriptor, translate_response};
///
/// let ok = ResponseDescriptor::new(StatusCode::OK, json!("data"));
/// assert_eq!(translate_response(ok).ok(), Some(json!("data")));
///
/// let ko = ResponseDescriptor::new(StatusCode::BAD_REQUEST, json!(null)).with_status_text("error");
/// let Err(ApiError::HttpFailure(exception)) = translate_response(ko) else { panic!() };
/// assert_eq!(exception.message(), "error");
/// ```
pub fn translate_response(response: ResponseDescriptor) -> Result<Value, ApiError> {
    if response.is_failure() {
        return Err(HttpException::new(response).into());
    }
    Ok(response.data)
}

/// Like [`translate_response`], then deserializes the payload.
///
/// # Errors
///
/// Returns [`ApiError::HttpFailure`] for failure statuses, and [`ApiError::JsonError`]
/// with the failing location when the payload does not match `T`.
pub fn translate_response_as<T>(response: ResponseDescriptor) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let data = translate_response(response)?;
    serde_path_to_error::deserialize(data).map_err(|err| ApiError::JsonError {
        path: err.path().to_string(),
        error: err.into_inner(),
    })
}
