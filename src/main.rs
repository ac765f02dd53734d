mod render;

use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use domain_info::{domain, Config, DomainInfoFetcher, RequestOptions};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = "\
Examples:
  domain-info example.com
  domain-info blog.example.com
  domain-info example.com --timeout 5000 --json

For subdomains, A and CNAME records are fetched for the subdomain itself,
while MX, TXT, NS and SOA records come from the root domain.";

#[derive(Parser)]
#[command(name = "domain-info")]
#[command(about = "Fetch SSL, server, DNS and WHOIS information about a domain")]
#[command(version, after_help = AFTER_HELP)]
struct Cli {
    /// Domain name to inspect
    domain: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("domain_info=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(target) = cli.domain else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Arc::new(Config::load()?);
    let mut options = RequestOptions::from_config(&config);
    if let Some(timeout_ms) = cli.timeout {
        options.timeout_ms = timeout_ms;
    }

    if !cli.json {
        announce(&target);
    }

    let fetcher = DomainInfoFetcher::new(config);
    match fetcher.fetch(&target, Some(options)).await {
        Ok(info) if cli.json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Ok(info) => {
            render::print_report(&info, chrono::Utc::now());
        }
        Err(e) if cli.json => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e.to_string().red());
            let hints = render::suggestions(&e);
            if !hints.is_empty() {
                eprintln!("\n{}", "Suggestions:".yellow());
                for hint in hints {
                    eprintln!("  - {}", hint);
                }
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

fn announce(target: &str) {
    println!("{}", format!("Fetching information for {}...", target).blue());

    let parts = domain::split_parts(&domain::normalize(target));
    if let Some(subdomain) = parts.subdomain {
        println!(
            "{}",
            format!("Detected subdomain: {} of {}", subdomain, parts.root_domain).blue()
        );
        println!(
            "{}",
            format!(
                "A and CNAME records are specific to the subdomain, other DNS records come from {}",
                parts.root_domain
            )
            .blue()
        );
    }
}
