use std::future::Future;

use http::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::{ApiError, OpenApiDocument, RequestDescriptor, ResponseDescriptor};

/// Where servers usually expose their OpenAPI document, relative to the base URL.
pub const DEFAULT_DOCUMENT_PATH: &str = "/api-docs/openapi.json";

/// Sends a [`RequestDescriptor`] and returns the matching [`ResponseDescriptor`].
///
/// The transport owns the wire: body encoding, connection handling, and payload
/// decoding. It must not interpret the status code, failures are raised by
/// [`translate_response`](crate::translate_response).
pub trait Transport {
    /// Sends the request.
    fn send(
        &self,
        request: RequestDescriptor,
    ) -> impl Future<Output = Result<ResponseDescriptor, ApiError>> + Send;
}

/// A [`Transport`] backed by a [`reqwest::Client`].
///
/// Request URLs are resolved against a base URL, bodies are sent as JSON, and the
/// response payload is decoded as JSON when the request accepts `application/json`,
/// as a JSON string otherwise. A failure response whose body is not JSON (an HTML
/// error page from a proxy, ...) keeps its body as a JSON string.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Creates a transport sending requests relative to `base_url`.
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the OpenAPI document served at [`DEFAULT_DOCUMENT_PATH`].
    ///
    /// # Errors
    ///
    /// See [`OpenApiDocument::fetch`].
    pub async fn fetch_document(&self) -> Result<OpenApiDocument, ApiError> {
        let url = self.request_url(DEFAULT_DOCUMENT_PATH)?;
        OpenApiDocument::fetch(&self.client, url).await
    }

    fn request_url(&self, url: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&[base, url].concat())?;
        Ok(url)
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<ResponseDescriptor, ApiError> {
        debug!(?request, "sending request");
        let RequestDescriptor {
            method,
            url,
            body,
            headers,
        } = request;

        let url = self.request_url(&url)?;
        let accept_json = headers.accept.as_deref().is_some_and(is_json);

        let mut builder = self
            .client
            .request(method, url)
            .headers(headers.to_header_map()?);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        let data = decode_payload(status, accept_json, text)?;
        let response = ResponseDescriptor::new(status, data).with_headers(headers);
        debug!(?response, "response received");

        Ok(response)
    }
}

fn decode_payload(status: StatusCode, accept_json: bool, text: String) -> Result<Value, ApiError> {
    if !accept_json {
        return Ok(Value::String(text));
    }
    if text.is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(&text) {
        Ok(data) => Ok(data),
        Err(error) if status.as_u16() >= 400 => {
            warn!(%status, %error, "failure response is not JSON, keeping it as text");
            Ok(Value::String(text))
        }
        Err(error) => Err(error.into()),
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .is_ok_and(|mime| mime.essence_str() == mime::APPLICATION_JSON.essence_str())
}
