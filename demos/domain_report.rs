//! Full domain report with custom request options, printed as JSON.
//!
//! Run with: cargo run --example domain_report -- example.com

use std::collections::BTreeMap;

use domain_info::{fetch_domain_info, RequestOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("domain_info=debug")
        .init();

    let domain = std::env::args().nth(1).unwrap_or_else(|| "example.com".to_string());

    let mut headers = BTreeMap::new();
    headers.insert("Accept-Language".to_string(), "en".to_string());

    let options = RequestOptions {
        timeout_ms: 5_000,
        headers,
        follow_redirects: true,
        max_redirects: 3,
    };

    let info = fetch_domain_info(&domain, Some(options)).await?;

    if let Some(reason) = &info.whois_error {
        eprintln!("WHOIS unavailable: {}", reason);
    }
    println!("{}", serde_json::to_string_pretty(&info)?);

    Ok(())
}
