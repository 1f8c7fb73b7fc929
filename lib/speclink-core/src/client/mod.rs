use std::sync::Arc;

use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{
    ApiError, Dto, OpenApiDocument, RequestDescriptor, translate_request, translate_response,
    translate_response_as,
};

mod builder;
pub use self::builder::ApiClientBuilder;

mod transport;
pub use self::transport::{DEFAULT_DOCUMENT_PATH, ReqwestTransport, Transport};

/// An API client driven by an OpenAPI document.
///
/// Each call translates a [`Dto`] into a request, sends it through the
/// [`Transport`], and returns the payload of a successful response. Nothing is
/// retried.
///
/// # Example
///
/// ```rust,no_run
/// use speclink_core::{ApiClient, Dto, OpenApiDocument};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let document = OpenApiDocument::from_json_str(include_str!("../../fixtures/user_api.json"))?;
/// let client = ApiClient::builder()
///     .with_host("api.example.com")
///     .with_document(document)
///     .build()?;
///
/// let user = client
///     .get("/api/v1/user/{id}", &Dto::new().with("id", 1).with("filter", "all"))
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// The document is shared behind an [`Arc`]: cloning a client is cheap and calls
/// can run concurrently.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    document: Arc<OpenApiDocument>,
    transport: T,
}

impl ApiClient {
    /// Creates a builder for a reqwest-backed client.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }
}

impl<T> ApiClient<T>
where
    T: Transport,
{
    /// Creates a client from a document and any transport.
    pub fn new(document: impl Into<Arc<OpenApiDocument>>, transport: T) -> Self {
        Self {
            document: document.into(),
            transport,
        }
    }

    /// The OpenAPI document.
    pub fn document(&self) -> &OpenApiDocument {
        &self.document
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Translates a call without sending it.
    ///
    /// # Errors
    ///
    /// See [`translate_request`].
    pub fn request(
        &self,
        method: &Method,
        path_key: &str,
        dto: &Dto,
    ) -> Result<RequestDescriptor, ApiError> {
        translate_request(dto, method, path_key, &self.document)
    }

    /// Translates, sends, and returns the payload of a successful response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] or [`ApiError::ValidationFailed`] before anything is sent
    /// - any error of the transport
    /// - [`ApiError::HttpFailure`] if the response status is 400 or above
    pub async fn call(&self, method: Method, path_key: &str, dto: &Dto) -> Result<Value, ApiError> {
        let request = self.request(&method, path_key, dto)?;
        let response = self.transport.send(request).await?;
        debug!(%method, path_key, status = %response.status, "call completed");
        translate_response(response)
    }

    /// Like [`ApiClient::call`], then deserializes the payload.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`], plus [`ApiError::JsonError`] if the payload does
    /// not match `R`.
    pub async fn call_as<R>(&self, method: Method, path_key: &str, dto: &Dto) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let request = self.request(&method, path_key, dto)?;
        let response = self.transport.send(request).await?;
        debug!(%method, path_key, status = %response.status, "call completed");
        translate_response_as(response)
    }

    /// Calls the `GET` operation of a path template.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get(&self, path_key: &str, dto: &Dto) -> Result<Value, ApiError> {
        self.call(Method::GET, path_key, dto).await
    }

    /// Calls the `POST` operation of a path template.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn post(&self, path_key: &str, dto: &Dto) -> Result<Value, ApiError> {
        self.call(Method::POST, path_key, dto).await
    }

    /// Calls the `PUT` operation of a path template.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn put(&self, path_key: &str, dto: &Dto) -> Result<Value, ApiError> {
        self.call(Method::PUT, path_key, dto).await
    }

    /// Calls the `PATCH` operation of a path template.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn patch(&self, path_key: &str, dto: &Dto) -> Result<Value, ApiError> {
        self.call(Method::PATCH, path_key, dto).await
    }

    /// Calls the `DELETE` operation of a path template.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn delete(&self, path_key: &str, dto: &Dto) -> Result<Value, ApiError> {
        self.call(Method::DELETE, path_key, dto).await
    }
}
