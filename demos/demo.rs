//! Validate an address and print the remaining credits.
//!
//! ```text
//! ZEROBOUNCE_API_KEY=... ZEROBOUNCE_API_DEBUG=1 cargo run --example demo -- someone@example.com
//! ```

use std::time::Duration;
use zerobounce_client::{Client, Config};

#[tokio::main]
async fn main() -> Result<(), zerobounce_client::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zerobounce=info".into()),
        )
        .init();

    let email = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "valid@example.com".to_string());

    let mut config = Config::new();
    config.set_timeout(Some(Duration::from_secs(10)));
    let client = Client::new(config)?;

    let response = client.validate_email(&email, None).await?;
    if response.is_success() {
        println!(
            "{email}: status={} sub_status={} valid={}",
            response.status().map(|s| s.to_string()).unwrap_or_default(),
            response.sub_status().unwrap_or("-"),
            response.is_valid()
        );
    } else {
        println!("{email}: request failed: {}", response.errors().join("; "));
    }

    let credits = client.get_credits().await?;
    match credits.credits() {
        Some(left) => println!("credits left: {left}"),
        None => println!("credits unavailable: {}", credits.errors().join("; ")),
    }

    Ok(())
}
