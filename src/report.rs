//! The combined domain report: certificate chain, web server banner, DNS
//! records and WHOIS, collected concurrently.

use crate::{
    config::Config,
    dns::{DnsData, HickoryDnsProbe},
    domain,
    errors::{DomainInfoError, ProbeError, ProbeKind},
    http::{HeadResponse, ReqwestProbe},
    metrics,
    ssl::{RustlsProbe, SslData},
    WhoisClient, WhoisRecord,
};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Outbound HTTPS settings for one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestOptions {
    pub timeout_ms: u64,
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
    pub follow_redirects: bool,
    pub max_redirects: usize,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            headers: BTreeMap::new(),
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl RequestOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout_ms: config.request_timeout_ms,
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[async_trait]
pub trait CertificateProbe: Send + Sync {
    async fn certificate_chain(
        &self,
        domain: &str,
        options: &RequestOptions,
    ) -> Result<SslData, ProbeError>;
}

#[async_trait]
pub trait HttpsProbe: Send + Sync {
    async fn head(
        &self,
        domain: &str,
        options: &RequestOptions,
    ) -> Result<HeadResponse, ProbeError>;
}

#[async_trait]
pub trait DnsProbe: Send + Sync {
    async fn dns_data(&self, domain: &str) -> Result<DnsData, ProbeError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    pub ssl_data: SslData,
    pub server_data: Option<String>,
    pub dns_data: DnsData,
    pub http_status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_data: Option<WhoisRecord>,
    /// Why `whois_data` is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_error: Option<String>,
}

pub struct DomainInfoFetcher {
    certificates: Arc<dyn CertificateProbe>,
    https: Arc<dyn HttpsProbe>,
    dns: Arc<dyn DnsProbe>,
    whois: WhoisClient,
    config: Arc<Config>,
}

impl DomainInfoFetcher {
    /// Fetcher backed by rustls, reqwest, hickory and TCP WHOIS.
    pub fn new(config: Arc<Config>) -> Self {
        let dns = Arc::new(HickoryDnsProbe::new(&config));
        let whois = WhoisClient::new_with_config(config.clone());

        Self {
            certificates: Arc::new(RustlsProbe::new()),
            https: Arc::new(ReqwestProbe::new()),
            dns,
            whois,
            config,
        }
    }

    pub fn with_probes(
        config: Arc<Config>,
        certificates: Arc<dyn CertificateProbe>,
        https: Arc<dyn HttpsProbe>,
        dns: Arc<dyn DnsProbe>,
        whois: WhoisClient,
    ) -> Self {
        Self {
            certificates,
            https,
            dns,
            whois,
            config,
        }
    }

    pub fn whois(&self) -> &WhoisClient {
        &self.whois
    }

    /// Collect every section of the report. Certificate, HEAD and DNS
    /// failures fail the whole report; a WHOIS failure only leaves
    /// `whois_data` empty.
    pub async fn fetch(
        &self,
        domain: &str,
        options: Option<RequestOptions>,
    ) -> Result<DomainInfo, DomainInfoError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(DomainInfoError::EmptyDomain);
        }

        let formatted = domain::normalize(domain);
        if domain::validate(&formatted).is_err() {
            return Err(DomainInfoError::InvalidDomain(domain.to_string()));
        }

        let options = options.unwrap_or_else(|| RequestOptions::from_config(&self.config));
        debug!("Fetching domain info for {}", formatted);

        let (ssl, head, dns, whois) = futures::join!(
            self.certificates.certificate_chain(&formatted, &options),
            self.https.head(&formatted, &options),
            self.dns.dns_data(&formatted),
            self.whois.lookup(&formatted),
        );

        let ssl_data = ssl.map_err(|source| probe_failure(ProbeKind::Ssl, domain, source))?;
        let head = head.map_err(|source| probe_failure(ProbeKind::Server, domain, source))?;
        let dns_data = dns.map_err(|source| probe_failure(ProbeKind::Dns, domain, source))?;

        let (whois_data, whois_error) = match whois {
            Ok(record) => (Some(record), None),
            Err(e) => {
                warn!("WHOIS data fetch failed: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Ok(DomainInfo {
            ssl_data,
            server_data: head.server,
            dns_data,
            http_status: head.status,
            whois_data,
            whois_error,
        })
    }
}

fn probe_failure(kind: ProbeKind, domain: &str, source: ProbeError) -> DomainInfoError {
    metrics::increment_probe_errors(&kind.to_string());
    DomainInfoError::Probe {
        kind,
        domain: domain.to_string(),
        source,
    }
}

static SHARED_FETCHER: OnceCell<DomainInfoFetcher> = OnceCell::new();

/// Process-wide fetcher, built from the environment on first use. Its
/// WHOIS cache lives as long as the process.
pub fn shared_fetcher() -> Result<&'static DomainInfoFetcher, DomainInfoError> {
    SHARED_FETCHER.get_or_try_init(|| {
        let config = Arc::new(Config::load()?);
        Ok(DomainInfoFetcher::new(config))
    })
}

/// Report through the [`shared_fetcher`], so repeated calls reuse cached
/// WHOIS records.
pub async fn fetch_domain_info(
    domain: &str,
    options: Option<RequestOptions>,
) -> Result<DomainInfo, DomainInfoError> {
    shared_fetcher()?.fetch(domain, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::WhoisError,
        whois::{TcpTransport, WhoisTransport},
    };
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    struct FakeCertificates {
        fail: bool,
    }

    #[async_trait]
    impl CertificateProbe for FakeCertificates {
        async fn certificate_chain(
            &self,
            _domain: &str,
            _options: &RequestOptions,
        ) -> Result<SslData, ProbeError> {
            if self.fail {
                return Err(ProbeError::Tls("handshake failure".to_string()));
            }
            Ok(SslData {
                valid: true,
                ..SslData::default()
            })
        }
    }

    /// Remembers the options it was called with.
    #[derive(Default)]
    struct FakeHttps {
        seen: Mutex<Option<RequestOptions>>,
    }

    #[async_trait]
    impl HttpsProbe for FakeHttps {
        async fn head(
            &self,
            _domain: &str,
            options: &RequestOptions,
        ) -> Result<HeadResponse, ProbeError> {
            *self.seen.lock().unwrap() = Some(options.clone());
            Ok(HeadResponse {
                server: Some("nginx".to_string()),
                status: 200,
            })
        }
    }

    struct FakeDns;

    #[async_trait]
    impl DnsProbe for FakeDns {
        async fn dns_data(&self, domain: &str) -> Result<DnsData, ProbeError> {
            Ok(DnsData {
                ns: vec![format!("ns1.{}", domain)],
                ..DnsData::default()
            })
        }
    }

    struct FakeWhois;

    #[async_trait]
    impl WhoisTransport for FakeWhois {
        async fn query(&self, _server: &str, _domain: &str) -> Result<String, WhoisError> {
            Ok(
                "Domain Name: EXAMPLE.COM\r\nRegistrar: Example Registrar, Inc.\r\nDomain Status: ok\r\n"
                    .to_string(),
            )
        }
    }

    #[derive(Default)]
    struct CountingWhois {
        queries: AtomicUsize,
    }

    #[async_trait]
    impl WhoisTransport for CountingWhois {
        async fn query(&self, server: &str, domain: &str) -> Result<String, WhoisError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            FakeWhois.query(server, domain).await
        }
    }

    fn fetcher_with(
        certificates: FakeCertificates,
        https: Arc<FakeHttps>,
        transport: Arc<dyn WhoisTransport>,
    ) -> DomainInfoFetcher {
        let config = Arc::new(Config::default());
        let whois = WhoisClient::new_with_transport(config.clone(), transport);
        DomainInfoFetcher::with_probes(
            config,
            Arc::new(certificates),
            https,
            Arc::new(FakeDns),
            whois,
        )
    }

    #[tokio::test]
    async fn test_repeated_fetch_reuses_cached_whois_record() {
        let transport = Arc::new(CountingWhois::default());
        let https = Arc::new(FakeHttps::default());
        let fetcher = fetcher_with(FakeCertificates { fail: false }, https, transport.clone());

        let first = fetcher.fetch("example.com", None).await.unwrap();
        let second = fetcher.fetch("https://www.example.com/", None).await.unwrap();

        assert_eq!(transport.queries.load(Ordering::SeqCst), 1);
        assert_eq!(first.whois_data, second.whois_data);
        assert!(fetcher.whois().cache().get("example.com").await.is_some());
    }

    #[tokio::test]
    async fn test_shared_fetcher_is_built_once() {
        let first = shared_fetcher().unwrap();
        let second = shared_fetcher().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[tokio::test]
    async fn test_fetch_merges_all_sections() {
        let https = Arc::new(FakeHttps::default());
        let fetcher = fetcher_with(
            FakeCertificates { fail: false },
            https.clone(),
            Arc::new(FakeWhois),
        );

        let info = fetcher.fetch("https://www.Example.com/", None).await.unwrap();

        assert!(info.ssl_data.valid);
        assert_eq!(info.server_data.as_deref(), Some("nginx"));
        assert_eq!(info.http_status, 200);
        assert_eq!(info.dns_data.ns, vec!["ns1.example.com"]);
        let whois = info.whois_data.unwrap();
        assert_eq!(whois.registrar.as_deref(), Some("Example Registrar, Inc."));
        assert_eq!(info.whois_error, None);

        let seen = https.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen, RequestOptions::default());
    }

    #[tokio::test]
    async fn test_explicit_options_are_passed_through() {
        let https = Arc::new(FakeHttps::default());
        let fetcher = fetcher_with(
            FakeCertificates { fail: false },
            https.clone(),
            Arc::new(FakeWhois),
        );

        let options = RequestOptions {
            timeout_ms: 2_500,
            follow_redirects: false,
            ..RequestOptions::default()
        };
        fetcher.fetch("example.com", Some(options.clone())).await.unwrap();

        assert_eq!(https.seen.lock().unwrap().clone(), Some(options));
    }

    #[tokio::test]
    async fn test_certificate_failure_fails_report() {
        let fetcher = fetcher_with(
            FakeCertificates { fail: true },
            Arc::new(FakeHttps::default()),
            Arc::new(FakeWhois),
        );

        let err = fetcher.fetch("example.com", None).await.unwrap_err();

        assert!(matches!(
            err,
            DomainInfoError::Probe {
                kind: ProbeKind::Ssl,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Could not fetch SSL data for domain example.com. Details: TLS handshake failed: handshake failure"
        );
    }

    #[tokio::test]
    async fn test_rejects_empty_and_malformed_domains() {
        let fetcher = fetcher_with(
            FakeCertificates { fail: false },
            Arc::new(FakeHttps::default()),
            Arc::new(FakeWhois),
        );

        let err = fetcher.fetch("   ", None).await.unwrap_err();
        assert!(matches!(err, DomainInfoError::EmptyDomain));
        assert_eq!(err.to_string(), "Domain name cannot be empty");

        let err = fetcher.fetch("localhost", None).await.unwrap_err();
        assert!(matches!(err, DomainInfoError::InvalidDomain(_)));
    }

    /// Points every WHOIS query at a loopback listener that never answers.
    struct StalledWhois {
        inner: TcpTransport,
    }

    #[async_trait]
    impl WhoisTransport for StalledWhois {
        async fn query(&self, _server: &str, domain: &str) -> Result<String, WhoisError> {
            self.inner.query("127.0.0.1", domain).await
        }
    }

    #[tokio::test]
    async fn test_stalled_whois_leaves_report_intact() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let transport = Arc::new(StalledWhois {
            inner: TcpTransport::new(port, Duration::from_millis(200), 1024),
        });
        let fetcher = fetcher_with(
            FakeCertificates { fail: false },
            Arc::new(FakeHttps::default()),
            transport,
        );

        let info = fetcher.fetch("example.com", None).await.unwrap();

        assert_eq!(info.whois_data, None);
        let reason = info.whois_error.unwrap();
        assert!(reason.contains("timed out"), "unexpected reason: {}", reason);
        assert_eq!(info.http_status, 200);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let info = DomainInfo {
            ssl_data: SslData::default(),
            server_data: None,
            dns_data: DnsData::default(),
            http_status: 301,
            whois_data: None,
            whois_error: Some("timeout".to_string()),
        };
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["httpStatus"], 301);
        assert!(json.get("sslData").is_some());
        assert!(json.get("whoisData").is_none());
        assert_eq!(json["whoisError"], "timeout");
    }

    #[test]
    fn test_request_options_from_partial_json() {
        let options: RequestOptions = serde_json::from_str(r#"{"timeoutMs": 500}"#).unwrap();
        assert_eq!(options.timeout(), Duration::from_millis(500));
        assert!(options.follow_redirects);
        assert_eq!(options.max_redirects, 5);
    }
}
