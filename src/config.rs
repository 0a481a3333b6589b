//! Client configuration.

use crate::middleware::{self, Middleware};
use crate::{Error, Result, Status};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Public ZeroBounce API endpoint.
pub const DEFAULT_HOST: &str = "https://api.zerobounce.net";
/// API version used in request paths.
pub const DEFAULT_API_VERSION: &str = "v2";
/// Environment variable the API key is read from.
pub const API_KEY_ENV: &str = "ZEROBOUNCE_API_KEY";
/// Environment variable that enables request logging when set.
pub const DEBUG_ENV: &str = "ZEROBOUNCE_API_DEBUG";

const USER_AGENT_VALUE: &str = concat!("ZerobounceRustClient/", env!("CARGO_PKG_VERSION"));

/// Settings used for every request a [`Client`](crate::Client) makes.
///
/// [`Config::new`] reads the API key from `ZEROBOUNCE_API_KEY` and enables
/// request logging if `ZEROBOUNCE_API_DEBUG` is set. Every field can be
/// changed afterwards; the config is moved into the client at build time
/// and stays fixed there.
#[derive(Clone)]
pub struct Config {
    host: String,
    api_version: String,
    api_key: Option<String>,
    headers: HashMap<String, String>,
    middleware: Vec<Arc<dyn Middleware>>,
    valid_statuses: HashSet<Status>,
    timeout: Option<Duration>,
}

impl Config {
    /// Create a configuration with defaults, reading the environment.
    ///
    /// Defaults:
    /// - host `https://api.zerobounce.net`, API version `v2`
    /// - API key from `ZEROBOUNCE_API_KEY` (may be absent)
    /// - a `User-Agent` header naming this client
    /// - no timeout
    /// - valid statuses `valid` and `catch_all`
    pub fn new() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let debug = std::env::var_os(DEBUG_ENV).is_some();

        Self {
            host: DEFAULT_HOST.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key,
            headers: HashMap::from([("User-Agent".to_string(), USER_AGENT_VALUE.to_string())]),
            middleware: middleware::default_chain(debug),
            valid_statuses: Self::default_valid_statuses(),
            timeout: None,
        }
    }

    /// Defaults with an explicit API key instead of the environment one.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let mut config = Self::new();
        config.set_api_key(Some(api_key.into()));
        config
    }

    /// The statuses [`ApiResponse::is_valid`](crate::ApiResponse::is_valid)
    /// accepts unless reconfigured.
    pub fn default_valid_statuses() -> HashSet<Status> {
        HashSet::from([Status::Valid, Status::CatchAll])
    }

    /// The standard middleware chain, with or without request logging.
    pub fn default_middleware(debug: bool) -> Vec<Arc<dyn Middleware>> {
        middleware::default_chain(debug)
    }

    /// Base URL requests are sent to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Point the client at another endpoint, e.g. a sandbox or mock server.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    /// Version segment of request paths, e.g. `v2`.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Use another API version segment.
    pub fn set_api_version(&mut self, api_version: impl Into<String>) {
        self.api_version = api_version.into();
    }

    /// The configured API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Set or clear the API key. A blank key counts as no key.
    pub fn set_api_key(&mut self, api_key: Option<String>) {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to the default headers.
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Replace the default headers.
    pub fn set_headers(&mut self, headers: HashMap<String, String>) {
        self.headers = headers;
    }

    /// The middleware chain, outermost first.
    pub fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }

    /// Replace the middleware chain.
    ///
    /// The replacement must still decode JSON bodies and fail on non-2xx
    /// statuses; see [`crate::middleware`].
    pub fn set_middleware(&mut self, middleware: Vec<Arc<dyn Middleware>>) {
        self.middleware = middleware;
    }

    /// Toggle request logging by rebuilding the default chain.
    pub fn set_debug(&mut self, debug: bool) {
        self.middleware = middleware::default_chain(debug);
    }

    /// Statuses [`ApiResponse::is_valid`](crate::ApiResponse::is_valid) accepts.
    pub fn valid_statuses(&self) -> &HashSet<Status> {
        &self.valid_statuses
    }

    /// Replace the statuses considered valid. An empty set is rejected.
    pub fn set_valid_statuses<I>(&mut self, statuses: I) -> Result<()>
    where
        I: IntoIterator<Item = Status>,
    {
        let statuses: HashSet<Status> = statuses.into_iter().collect();
        if statuses.is_empty() {
            return Err(Error::InvalidConfig(
                "valid statuses must not be empty".to_string(),
            ));
        }
        self.valid_statuses = statuses;
        Ok(())
    }

    /// Per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Maximum time a request may take; `None` leaves it to the transport.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// `{host}/{api_version}/{endpoint}`.
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.host.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            endpoint
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let middleware: Vec<&str> = self.middleware.iter().map(|m| m.name()).collect();
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REMOVED]"))
            .field("headers", &self.headers)
            .field("middleware", &middleware)
            .field("valid_statuses", &self.valid_statuses)
            .field("timeout", &self.timeout)
            .finish()
    }
}
