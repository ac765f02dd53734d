//! WHOIS lookups through the library, with and without the cache.
//!
//! Run with: cargo run --example whois_lookup --no-default-features

use domain_info::{WhoisClient, WhoisError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("domain_info=info")
        .init();

    println!("WHOIS lookup example");
    println!("====================");

    let client = WhoisClient::new()?;
    let now = chrono::Utc::now();

    for domain in ["google.com", "github.io", "rust-lang.org", "blog.example.com"] {
        println!("\nLooking up: {}", domain);
        println!("{}", "-".repeat(50));

        match client.lookup(domain).await {
            Ok(record) => {
                println!("   Registrar: {}", record.registrar.as_deref().unwrap_or("Unknown"));
                if let Some(created) = record.creation_date {
                    println!(
                        "   Created: {} ({} days ago)",
                        created.format("%Y-%m-%d"),
                        record.days_since_creation(now).unwrap_or_default()
                    );
                }
                if let Some(expires) = record.expiration_date {
                    println!(
                        "   Expires: {} (in {} days)",
                        expires.format("%Y-%m-%d"),
                        record.days_until_expiration(now).unwrap_or_default()
                    );
                }
                for ns in record.name_servers.iter().take(3) {
                    println!("   NS: {}", ns);
                }
            }
            Err(e) if e.is_timeout() => println!("   Timed out: {}", e),
            Err(WhoisError::InvalidDomain(reason)) => println!("   Invalid domain: {}", reason),
            Err(e) => println!("   Failed: {}", e),
        }
    }

    // The second lookup is answered from the cache
    let start = std::time::Instant::now();
    let _ = client.get_whois_data("google.com", true, 3).await;
    println!("\nCached lookup took {:?}", start.elapsed());
    println!("Cache TTL: {:?}", client.cache().ttl());

    Ok(())
}
