//! # ZeroBounce Client
//! Asynchronous wrapper around the ZeroBounce email validation HTTP API, providing methods to validate an address and read the account credit balance using [`Client`] and [`Config`].
//!
//! ## Audience and uses
//! For Rust applications that need to check whether an address is deliverable before sending to it: build a [`Config`] (the API key comes from `ZEROBOUNCE_API_KEY` by default), create a [`Client`], call [`Client::validate_email`], then check [`ApiResponse::is_valid`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Setting `ZEROBOUNCE_API_DEBUG` logs every exchange through `tracing` with the API key redacted; install a subscriber to see it.
//!
//! ## Out of scope
//! One request per call: no retries, no caching, no batch validation.
//!
//! ## Errors
//! A missing API key or unusable configuration is returned as `Err` before any request is sent. Everything else, such as a non-2xx answer ([`Error::Service`]) or a timeout ([`Error::Timeout`]), comes back as an [`ApiResponse`] with [`ApiResponse::is_success`] set to `false` and the message in [`ApiResponse::errors`].
//!
//! ## Example
//! ```no_run
//! use zerobounce_client::{Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zerobounce_client::Error> {
//!     let client = Client::new(Config::new())?;
//!
//!     let response = client.validate_email("someone@example.com", None).await?;
//!     println!("{:?} valid={}", response.status(), response.is_valid());
//!
//!     let credits = client.get_credits().await?;
//!     println!("credits left: {:?}", credits.credits());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
pub mod middleware;
mod response;
mod status;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use config::{API_KEY_ENV, Config, DEBUG_ENV, DEFAULT_API_VERSION, DEFAULT_HOST};
pub use error::{Error, ServiceError};
pub use response::ApiResponse;
pub use status::Status;

/// Result type alias for ZeroBounce operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
