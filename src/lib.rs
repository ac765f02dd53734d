//! # Domain Info Library
//!
//! Everything worth knowing about a domain in one call: TLS certificate
//! chain, HTTP `Server` banner and status, DNS records, and a
//! referral-following WHOIS record.
//!
//! ## Features
//!
//! - Static TLD routing table with IANA fallback
//! - Registry-to-registrar referral chasing with a hop bound
//! - Format-tolerant WHOIS parsing with privacy-redaction awareness
//! - In-memory TTL cache keyed by normalized domain
//! - Concurrent SSL / HTTP / DNS / WHOIS collection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_info::WhoisClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WhoisClient::new()?;
//!     let record = client.lookup("google.com").await?;
//!
//!     println!("Registrar: {:?}", record.registrar);
//!     println!("Expires: {:?}", record.expiration_date);
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod dns;
pub mod domain;
pub mod errors;
pub mod http;
pub mod metrics;
pub mod parser;
pub mod report;
pub mod ssl;
pub mod tld_mappings;
pub mod whois;

// Re-export main types for easy access
pub use cache::CacheService;
pub use config::Config;
pub use dns::{DnsData, HickoryDnsProbe, MxRecord, RecordLookup, SoaRecord};
pub use errors::{DomainInfoError, ProbeError, ProbeKind, WhoisError};
pub use http::{HeadResponse, ReqwestProbe};
pub use parser::WhoisParser;
pub use report::{
    fetch_domain_info, shared_fetcher, CertificateProbe, DnsProbe, DomainInfo, DomainInfoFetcher,
    HttpsProbe, RequestOptions,
};
pub use ssl::{CertificateDetails, RustlsProbe, SslData};
pub use whois::{TcpTransport, WhoisResult, WhoisService, WhoisTransport};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Instant};
use tracing::info;

/// Structured view of a WHOIS answer. Every field is optional except the
/// raw text the record was parsed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisRecord {
    pub registrar: Option<String>,
    pub registrar_url: Option<String>,
    pub registrar_iana_id: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrant: Option<Registrant>,
    pub status_codes: Vec<String>,
    pub name_servers: Vec<String>,
    pub raw_text: String,
}

impl WhoisRecord {
    /// Days since creation
    pub fn days_since_creation(&self, now: DateTime<Utc>) -> Option<i64> {
        self.creation_date.map(|created| (now - created).num_days())
    }

    /// Days until expiration (negative if expired)
    pub fn days_until_expiration(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expiration_date.map(|expires| (expires - now).num_days())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// High-level WHOIS client: normalization, caching, referrals and parsing.
#[derive(Clone)]
pub struct WhoisClient {
    service: Arc<WhoisService>,
    parser: WhoisParser,
    cache: CacheService,
    config: Arc<Config>,
}

impl WhoisClient {
    /// Create a new client from environment configuration
    pub fn new() -> Result<Self, WhoisError> {
        let config = Arc::new(Config::load()?);
        Ok(Self::new_with_config(config))
    }

    /// Create a new client speaking TCP port 43 with the given configuration
    pub fn new_with_config(config: Arc<Config>) -> Self {
        let transport = Arc::new(TcpTransport::from_config(&config));
        Self::new_with_transport(config, transport)
    }

    pub fn new_with_transport(config: Arc<Config>, transport: Arc<dyn WhoisTransport>) -> Self {
        let service = Arc::new(WhoisService::new(transport, &config));
        let cache = CacheService::new(&config);

        info!(
            "WhoisClient initialized (timeout {}s, max referrals {}, cache TTL {}s)",
            config.whois_timeout_seconds, config.max_referrals, config.cache_ttl_seconds
        );

        Self {
            service,
            parser: WhoisParser::new(),
            cache,
            config,
        }
    }

    /// Replace the cache, e.g. to share one between several clients.
    pub fn with_cache(mut self, cache: CacheService) -> Self {
        self.cache = cache;
        self
    }

    /// Look up a domain using the cache and the configured referral bound
    pub async fn lookup(&self, domain: &str) -> Result<WhoisRecord, WhoisError> {
        self.get_whois_data(domain, true, self.config.max_referrals).await
    }

    /// Look up a domain, optionally bypassing the cache. A fresh result is
    /// always written back to the cache.
    pub async fn get_whois_data(
        &self,
        domain: &str,
        use_cache: bool,
        max_referrals: usize,
    ) -> Result<WhoisRecord, WhoisError> {
        let start_time = Instant::now();
        let normalized_domain = domain::normalize(domain);
        domain::validate(&normalized_domain)?;

        metrics::increment_requests(&normalized_domain);

        if use_cache {
            if let Some(record) = self.cache.get(&normalized_domain).await {
                metrics::increment_cache_hits();
                return Ok(record);
            }
            metrics::increment_cache_misses();
        }

        // Registries only answer for the registrable name
        let root_domain = domain::split_parts(&normalized_domain).root_domain;

        let result = self
            .service
            .lookup(&root_domain, max_referrals)
            .await
            .map_err(|source| {
                metrics::increment_errors(source.kind());
                WhoisError::Lookup {
                    domain: normalized_domain.clone(),
                    source: Box::new(source),
                }
            })?;

        let record = self.parser.parse(&result.raw_data);
        metrics::record_query_time(start_time.elapsed().as_millis() as u64);

        self.cache.put(&normalized_domain, record.clone()).await;

        Ok(record)
    }

    pub fn cache(&self) -> &CacheService {
        &self.cache
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
