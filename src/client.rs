//! ZeroBounce async client implementation.

use crate::middleware::{Next, redact};
use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::{ApiResponse, Config, Error, Result};
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::sync::Arc;

const VALIDATE_ENDPOINT: &str = "validate";
const CREDITS_ENDPOINT: &str = "getcredits";

/// Async client for the ZeroBounce email validation API.
///
/// Use [`Client::new`] with a [`Config`] or [`Client::builder`] to also set a
/// proxy or a custom [`Transport`].
///
/// Both operations return `Err` only when the client is misconfigured
/// (missing API key, unusable host or headers). Service and network failures
/// come back as an [`ApiResponse`] whose [`is_success`](ApiResponse::is_success)
/// is `false`.
pub struct Client {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client that talks to the network with `config`.
    ///
    /// # Examples
    /// ```no_run
    /// # use zerobounce_client::{Client, Config};
    /// # fn main() -> Result<(), zerobounce_client::Error> {
    /// let client = Client::new(Config::with_api_key("my-key"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        ClientBuilder::new().config(config).build()
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate a single email address.
    ///
    /// # Arguments
    /// * `email` - The address to validate; syntax is checked by the service
    /// * `ip_address` - Optional IP the address was submitted from
    ///
    /// # Examples
    /// ```no_run
    /// # use zerobounce_client::{Client, Config};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), zerobounce_client::Error> {
    /// let client = Client::new(Config::new())?;
    /// let response = client.validate_email("someone@example.com", None).await?;
    /// if response.is_valid() {
    ///     println!("deliverable");
    /// } else {
    ///     println!("{:?} {:?}", response.status(), response.errors());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn validate_email(
        &self,
        email: &str,
        ip_address: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut params = vec![("email", email)];
        if let Some(ip) = ip_address {
            params.push(("ip_address", ip));
        }
        self.get_api(VALIDATE_ENDPOINT, &params).await
    }

    /// Get the remaining credit balance of the account.
    ///
    /// # Examples
    /// ```no_run
    /// # use zerobounce_client::{Client, Config};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), zerobounce_client::Error> {
    /// let client = Client::new(Config::new())?;
    /// let response = client.get_credits().await?;
    /// println!("{:?}", response.credits());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_credits(&self) -> Result<ApiResponse> {
        self.get_api(CREDITS_ENDPOINT, &[]).await
    }

    /// Common GET API request pattern.
    async fn get_api(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<ApiResponse> {
        let request = self.build_request(endpoint, params)?;

        let outcome = Next::new(self.config.middleware(), self.transport.as_ref())
            .run(request)
            .await
            .and_then(|mut response| match response.json.take() {
                Some(Value::Object(body)) => Ok(body),
                Some(other) => Err(Error::Decode(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                ))),
                None => Err(Error::Decode(format!(
                    "expected a JSON body from {endpoint}, got {} bytes of {}",
                    response.body.len(),
                    response.content_type().unwrap_or("unknown content"),
                ))),
            });

        Ok(match outcome {
            Ok(body) => ApiResponse::from_body(body, self.config.valid_statuses().clone()),
            Err(err) => {
                tracing::debug!(
                    target: "zerobounce",
                    endpoint,
                    error = %redact(&err.to_string()),
                    "call failed"
                );
                ApiResponse::from_error(&err)
            }
        })
    }

    /// Resolve URL, query and headers. Fails before any I/O when the client
    /// is misconfigured.
    fn build_request(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<HttpRequest> {
        let api_key = self.config.api_key().ok_or(Error::MissingApiKey)?;

        let query = std::iter::once(("api_key", api_key)).chain(params.iter().copied());
        let url = Url::parse_with_params(&self.config.endpoint_url(endpoint), query)
            .map_err(|e| Error::InvalidConfig(format!("host {:?}: {e}", self.config.host())))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "host {:?}: scheme must be http or https",
                self.config.host()
            )));
        }

        let mut request = HttpRequest::get(url);
        request.headers = self.headers()?;
        request.timeout = self.config.timeout();
        Ok(request)
    }

    /// Build headers for API requests.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.config.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidConfig(format!("header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidConfig(format!("header {name}: {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builder for configuring a ZeroBounce client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Default)]
pub struct ClientBuilder {
    config: Option<Config>,
    proxy: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - [`Config::new`] (reads the environment)
    /// - No proxy
    /// - [`ReqwestTransport`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` instead of [`Config::new`].
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080").
    ///
    /// Ignored when a custom transport is supplied.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Replace the network stage, e.g. with an in-memory fake in tests.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client. No request is made.
    ///
    /// # Examples
    /// ```no_run
    /// # use zerobounce_client::{Client, Config};
    /// # fn main() -> Result<(), zerobounce_client::Error> {
    /// let client = Client::builder()
    ///     .config(Config::with_api_key("my-key"))
    ///     .proxy("socks5://127.0.0.1:9050")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.proxy.as_deref())?),
        };

        Ok(Client {
            config: self.config.unwrap_or_default(),
            transport,
        })
    }
}
