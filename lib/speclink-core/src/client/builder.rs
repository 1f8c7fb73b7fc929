use std::fmt::Debug;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use http::Uri;
use http::uri::{PathAndQuery, Scheme};
use url::Url;

use super::{ApiClient, ReqwestTransport};
use crate::{ApiError, OpenApiDocument};

/// Builder for an [`ApiClient`] sending requests with reqwest.
///
/// # Default Configuration
///
/// - **Scheme**: HTTP (use `with_scheme()` to change to HTTPS)
/// - **Host**: 127.0.0.1 (localhost)
/// - **Port**: 80 (standard HTTP port)
/// - **Base path**: None (request URLs are appended to the root)
/// - **Document**: None, required
///
/// # Example
///
/// ```rust
/// use http::uri::Scheme;
/// use speclink_core::{ApiClient, OpenApiDocument};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let document = OpenApiDocument::from_json_str(r#"{ "paths": {} }"#)?;
///
/// let client = ApiClient::builder()
///     .with_scheme(Scheme::HTTPS)
///     .with_host("api.example.com")
///     .with_port(443)
///     .with_base_path("/v1")?
///     .with_document(document)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    client: reqwest::Client,
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: Option<PathAndQuery>,
    document: Option<Arc<OpenApiDocument>>,
}

impl ApiClientBuilder {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingDocument`] if no document was provided
    /// - [`ApiError::HttpError`] or [`ApiError::UrlError`] if the base URL cannot be built
    pub fn build(self) -> Result<ApiClient<ReqwestTransport>, ApiError> {
        let Self {
            client,
            scheme,
            host,
            port,
            base_path,
            document,
        } = self;

        let document = document.ok_or(ApiError::MissingDocument)?;

        let builder = Uri::builder()
            .scheme(scheme)
            .authority(format!("{host}:{port}"));
        let builder = if let Some(path) = &base_path {
            builder.path_and_query(path.path())
        } else {
            builder.path_and_query("/")
        };
        let base_uri = builder.build()?;
        let base_url = Url::parse(&base_uri.to_string())?;

        let transport = ReqwestTransport::new(client, base_url);
        Ok(ApiClient::new(document, transport))
    }

    /// Sets the HTTP scheme, defaults to `Scheme::HTTP`.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the hostname or IP address of the server, defaults to `127.0.0.1`.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port, defaults to `80`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets a base path prepended to every request URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBasePath`] if the path contains invalid characters
    /// (such as spaces) or cannot be parsed as a valid URI path.
    pub fn with_base_path<P>(mut self, base_path: P) -> Result<Self, ApiError>
    where
        P: TryInto<PathAndQuery>,
        P::Error: Debug + 'static,
    {
        let base_path = base_path
            .try_into()
            .map_err(|err| ApiError::InvalidBasePath {
                error: format!("{err:?}"),
            })?;
        self.base_path = Some(base_path);
        Ok(self)
    }

    /// Uses a preconfigured reqwest client (timeouts, proxies, TLS, default headers...).
    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets the OpenAPI document the client translates calls with.
    pub fn with_document(mut self, document: impl Into<Arc<OpenApiDocument>>) -> Self {
        self.document = Some(document.into());
        self
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            scheme: Scheme::HTTP,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST).to_string(),
            port: 80,
            base_path: None,
            document: None,
        }
    }
}
