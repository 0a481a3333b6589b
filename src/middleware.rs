//! Request pipeline.
//!
//! A request travels through an ordered list of [`Middleware`] before it
//! reaches the [`Transport`]; the response travels back through the same
//! list in reverse. The default chain is, outermost first:
//!
//! 1. [`JsonDecoder`] parses JSON bodies.
//! 2. [`DebugLogger`] logs the exchange with credentials redacted (only when
//!    debugging is enabled).
//! 3. [`RaiseHttpError`] turns non-2xx answers into [`Error::Service`](crate::Error::Service).
//!
//! A replacement chain must still decode JSON and raise on non-2xx statuses,
//! otherwise [`ApiResponse`](crate::ApiResponse) cannot tell success from failure.

use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{Result, ServiceError};
use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;
use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

const REDACTED: &str = "[REMOVED]";
const MAX_ERROR_BODY_CHARS: usize = 200;

static JSON_CONTENT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bjson$").expect("content type pattern is valid"));

static API_KEY_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(api_?key=)([^&\s"']+)"#).expect("api key pattern is valid")
});

/// One stage of the request pipeline.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Handle `request`, usually by calling `next.run` and inspecting or
    /// rewriting its outcome.
    async fn handle(&self, request: HttpRequest, next: Next<'_>) -> Result<HttpResponse>;

    /// Short name used in debug output.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// The remainder of the pipeline after the current middleware.
pub struct Next<'a> {
    middleware: &'a [Arc<dyn Middleware>],
    transport: &'a dyn Transport,
}

impl<'a> Next<'a> {
    /// Start a pipeline run over `middleware`, ending at `transport`.
    pub fn new(middleware: &'a [Arc<dyn Middleware>], transport: &'a dyn Transport) -> Self {
        Self {
            middleware,
            transport,
        }
    }

    /// Pass `request` to the next stage, or to the transport at the end of the chain.
    pub async fn run(self, request: HttpRequest) -> Result<HttpResponse> {
        match self.middleware.split_first() {
            Some((current, rest)) => {
                current
                    .handle(request, Next::new(rest, self.transport))
                    .await
            }
            None => self.transport.execute(request).await,
        }
    }
}

/// Build the standard chain; the logger is only included when `debug` is set.
pub fn default_chain(debug: bool) -> Vec<Arc<dyn Middleware>> {
    let mut chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(JsonDecoder)];
    if debug {
        chain.push(Arc::new(DebugLogger));
    }
    chain.push(Arc::new(RaiseHttpError));
    chain
}

/// Replace every `api_key=<value>` (or `apikey=`) occurrence with a marker.
pub fn redact(text: &str) -> Cow<'_, str> {
    API_KEY_PARAM.replace_all(text, format!("${{1}}{REDACTED}"))
}

/// Parses bodies whose content type ends in `json`.
///
/// Empty bodies and other content types pass through untouched; a JSON body
/// that fails to parse is reported as [`Error::Decode`](crate::Error::Decode).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

#[async_trait]
impl Middleware for JsonDecoder {
    async fn handle(&self, request: HttpRequest, next: Next<'_>) -> Result<HttpResponse> {
        let mut response = next.run(request).await?;

        let is_json = response
            .content_type()
            .is_some_and(|ct| JSON_CONTENT_TYPE.is_match(ct));
        if is_json && !response.body.trim().is_empty() {
            response.json = Some(serde_json::from_str(&response.body)?);
        }

        Ok(response)
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Logs requests and responses through `tracing` with credentials redacted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLogger;

#[async_trait]
impl Middleware for DebugLogger {
    async fn handle(&self, request: HttpRequest, next: Next<'_>) -> Result<HttpResponse> {
        let line = format!("{} {}", request.method, request.url);
        tracing::info!(
            target: "zerobounce",
            request = %redact(&line),
            headers = ?request.headers,
            "sending request"
        );

        let result = next.run(request).await;
        match &result {
            Ok(response) => tracing::info!(
                target: "zerobounce",
                status = response.status,
                body = %redact(&response.body),
                "received response"
            ),
            Err(err) => tracing::info!(
                target: "zerobounce",
                error = %redact(&err.to_string()),
                "request failed"
            ),
        }
        result
    }

    fn name(&self) -> &str {
        "logger"
    }
}

/// Fails the request with [`Error::Service`](crate::Error::Service) when the status is not 2xx.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaiseHttpError;

#[async_trait]
impl Middleware for RaiseHttpError {
    async fn handle(&self, request: HttpRequest, next: Next<'_>) -> Result<HttpResponse> {
        let response = next.run(request).await?;
        if response.is_success() {
            return Ok(response);
        }
        Err(ServiceError::new(response.status, error_message(&response)).into())
    }

    fn name(&self) -> &str {
        "raise_http_error"
    }
}

/// Best description of a failed response: the JSON error field, the text
/// body, or the reason phrase.
fn error_message(response: &HttpResponse) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(&response.body) {
        for key in ["error", "Message", "message"] {
            match map.get(key) {
                Some(serde_json::Value::String(text)) => return text.clone(),
                Some(other) => return other.to_string(),
                None => {}
            }
        }
    }

    let text = response.body.trim();
    if !text.is_empty() {
        return text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    }

    StatusCode::from_u16(response.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("unexpected status")
        .to_string()
}
