//! A / CNAME / TXT / MX / NS / SOA collection through hickory-resolver.

use crate::{config::Config, domain, errors::ProbeError, report::DnsProbe};
use async_trait::async_trait;
use hickory_resolver::{
    config::ResolverConfig, name_server::TokioConnectionProvider, proto::rr::RecordType,
    ResolveError, TokioResolver,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsData {
    #[serde(rename = "A")]
    pub a: Vec<String>,
    #[serde(rename = "CNAME")]
    pub cname: Option<String>,
    #[serde(rename = "TXT")]
    pub txt: Vec<String>,
    #[serde(rename = "MX")]
    pub mx: Vec<MxRecord>,
    #[serde(rename = "NS")]
    pub ns: Vec<String>,
    #[serde(rename = "SOA")]
    pub soa: Option<SoaRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    pub exchange: String,
    pub priority: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaRecord {
    pub nsname: String,
    pub hostmaster: String,
    pub serial: i64,
    pub refresh: i64,
    pub retry: i64,
    pub expire: i64,
    pub minttl: i64,
}

/// Per-record-type queries. "No records" answers come back empty; NXDOMAIN
/// and transport failures are errors.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn a(&self, name: &str) -> Result<Vec<String>, ProbeError>;
    async fn cname(&self, name: &str) -> Result<Option<String>, ProbeError>;
    async fn txt(&self, name: &str) -> Result<Vec<String>, ProbeError>;
    async fn mx(&self, name: &str) -> Result<Vec<MxRecord>, ProbeError>;
    async fn ns(&self, name: &str) -> Result<Vec<String>, ProbeError>;
    async fn soa(&self, name: &str) -> Result<Option<SoaRecord>, ProbeError>;
}

/// Collect the record set for `domain`.
///
/// For a subdomain the host's own A/CNAME are combined with the zone-level
/// TXT/MX/NS/SOA of its root domain. If any of that fails, everything is
/// retried against the full name.
pub async fn collect_dns_data<L>(lookup: &L, domain: &str) -> Result<DnsData, ProbeError>
where
    L: RecordLookup + ?Sized,
{
    let parts = domain::split_parts(domain);

    if parts.subdomain.is_some() {
        match collect_records(lookup, domain, &parts.root_domain).await {
            Ok(data) => return Ok(data),
            Err(e) => {
                warn!(
                    "Subdomain DNS lookup for {} failed ({}), falling back to the full name",
                    domain, e
                );
            }
        }
    }

    collect_records(lookup, domain, domain).await
}

async fn collect_records<L>(lookup: &L, host: &str, zone: &str) -> Result<DnsData, ProbeError>
where
    L: RecordLookup + ?Sized,
{
    let (a, cname, txt, mx, ns, soa) = futures::try_join!(
        lookup.a(host),
        lookup.cname(host),
        lookup.txt(zone),
        lookup.mx(zone),
        lookup.ns(zone),
        lookup.soa(zone),
    )?;

    Ok(DnsData {
        a,
        cname,
        txt,
        mx,
        ns,
        soa,
    })
}

/// Resolver-backed [`RecordLookup`] using the system configuration.
#[derive(Clone)]
pub struct HickoryDnsProbe {
    resolver: TokioResolver,
}

impl HickoryDnsProbe {
    pub fn new(config: &Config) -> Self {
        let mut builder = match TokioResolver::builder_tokio() {
            Ok(builder) => builder,
            Err(e) => {
                warn!("Failed to load system DNS configuration, falling back to defaults: {}", e);
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
            }
        };
        builder.options_mut().timeout = config.dns_timeout();

        Self {
            resolver: builder.build(),
        }
    }
}

fn no_records_as_empty<T: Default>(result: Result<T, ResolveError>) -> Result<T, ProbeError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_no_records_found() && !e.is_nx_domain() => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

fn trim_root(name: impl ToString) -> String {
    name.to_string().trim_end_matches('.').to_string()
}

#[async_trait]
impl RecordLookup for HickoryDnsProbe {
    async fn a(&self, name: &str) -> Result<Vec<String>, ProbeError> {
        let result = self
            .resolver
            .ipv4_lookup(name)
            .await
            .map(|lookup| lookup.iter().map(|a| a.to_string()).collect());
        no_records_as_empty(result)
    }

    async fn cname(&self, name: &str) -> Result<Option<String>, ProbeError> {
        let result = self.resolver.lookup(name, RecordType::CNAME).await.map(|lookup| {
            lookup
                .record_iter()
                .find_map(|record| record.data().as_cname().map(|cname| trim_root(&cname.0)))
        });
        no_records_as_empty(result)
    }

    async fn txt(&self, name: &str) -> Result<Vec<String>, ProbeError> {
        // One entry per character-string, like the chunks of a flattened TXT set
        let result = self.resolver.txt_lookup(name).await.map(|lookup| {
            lookup
                .iter()
                .flat_map(|txt| {
                    txt.iter()
                        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                        .collect::<Vec<_>>()
                })
                .collect()
        });
        no_records_as_empty(result)
    }

    async fn mx(&self, name: &str) -> Result<Vec<MxRecord>, ProbeError> {
        let result = self.resolver.mx_lookup(name).await.map(|lookup| {
            lookup
                .iter()
                .map(|mx| MxRecord {
                    exchange: trim_root(mx.exchange()),
                    priority: mx.preference(),
                })
                .collect()
        });
        no_records_as_empty(result)
    }

    async fn ns(&self, name: &str) -> Result<Vec<String>, ProbeError> {
        let result = self
            .resolver
            .ns_lookup(name)
            .await
            .map(|lookup| lookup.iter().map(trim_root).collect());
        no_records_as_empty(result)
    }

    async fn soa(&self, name: &str) -> Result<Option<SoaRecord>, ProbeError> {
        let result = self.resolver.soa_lookup(name).await.map(|lookup| {
            lookup.iter().next().map(|soa| SoaRecord {
                nsname: trim_root(soa.mname()),
                hostmaster: trim_root(soa.rname()),
                serial: i64::from(soa.serial()),
                refresh: i64::from(soa.refresh()),
                retry: i64::from(soa.retry()),
                expire: i64::from(soa.expire()),
                minttl: i64::from(soa.minimum()),
            })
        });
        no_records_as_empty(result)
    }
}

#[async_trait]
impl DnsProbe for HickoryDnsProbe {
    async fn dns_data(&self, domain: &str) -> Result<DnsData, ProbeError> {
        debug!("Collecting DNS records for {}", domain);
        collect_dns_data(self, domain).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records which names were asked for each record type.
    #[derive(Default)]
    struct FakeLookup {
        failing_name: Option<&'static str>,
        asked: Mutex<Vec<String>>,
    }

    impl FakeLookup {
        fn answer(&self, kind: &str, name: &str) -> Result<(), ProbeError> {
            self.asked.lock().unwrap().push(format!("{} {}", kind, name));
            if self.failing_name == Some(name) {
                return Err(ProbeError::Timeout);
            }
            Ok(())
        }

        fn asked(&self) -> Vec<String> {
            let mut asked = self.asked.lock().unwrap().clone();
            asked.sort();
            asked
        }
    }

    #[async_trait]
    impl RecordLookup for FakeLookup {
        async fn a(&self, name: &str) -> Result<Vec<String>, ProbeError> {
            self.answer("A", name)?;
            Ok(vec!["192.0.2.10".to_string()])
        }

        async fn cname(&self, name: &str) -> Result<Option<String>, ProbeError> {
            self.answer("CNAME", name)?;
            Ok(None)
        }

        async fn txt(&self, name: &str) -> Result<Vec<String>, ProbeError> {
            self.answer("TXT", name)?;
            Ok(vec![format!("v=spf1 include:{} -all", name)])
        }

        async fn mx(&self, name: &str) -> Result<Vec<MxRecord>, ProbeError> {
            self.answer("MX", name)?;
            Ok(vec![MxRecord {
                exchange: format!("mail.{}", name),
                priority: 10,
            }])
        }

        async fn ns(&self, name: &str) -> Result<Vec<String>, ProbeError> {
            self.answer("NS", name)?;
            Ok(vec![format!("ns1.{}", name)])
        }

        async fn soa(&self, name: &str) -> Result<Option<SoaRecord>, ProbeError> {
            self.answer("SOA", name)?;
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_root_domain_uses_one_name() {
        let lookup = FakeLookup::default();
        let data = collect_dns_data(&lookup, "example.com").await.unwrap();

        assert_eq!(data.a, vec!["192.0.2.10"]);
        assert_eq!(data.mx[0].exchange, "mail.example.com");
        assert!(lookup.asked().iter().all(|q| q.ends_with(" example.com")));
    }

    #[tokio::test]
    async fn test_subdomain_splits_host_and_zone_records() {
        let lookup = FakeLookup::default();
        let data = collect_dns_data(&lookup, "blog.example.com").await.unwrap();

        assert_eq!(data.ns, vec!["ns1.example.com"]);
        assert_eq!(
            lookup.asked(),
            vec![
                "A blog.example.com",
                "CNAME blog.example.com",
                "MX example.com",
                "NS example.com",
                "SOA example.com",
                "TXT example.com",
            ]
        );
    }

    #[tokio::test]
    async fn test_subdomain_failure_falls_back_to_full_name() {
        let lookup = FakeLookup {
            failing_name: Some("example.com"),
            ..FakeLookup::default()
        };
        let data = collect_dns_data(&lookup, "blog.example.com").await.unwrap();

        assert_eq!(data.txt, vec!["v=spf1 include:blog.example.com -all"]);
        assert_eq!(data.ns, vec!["ns1.blog.example.com"]);
    }

    #[tokio::test]
    async fn test_root_failure_is_an_error() {
        let lookup = FakeLookup {
            failing_name: Some("example.com"),
            ..FakeLookup::default()
        };
        let result = collect_dns_data(&lookup, "example.com").await;
        assert!(matches!(result, Err(ProbeError::Timeout)));
    }

    #[test]
    fn test_serializes_with_record_type_keys() {
        let data = DnsData {
            a: vec!["192.0.2.1".to_string()],
            ..DnsData::default()
        };
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["A"][0], "192.0.2.1");
        assert!(json["CNAME"].is_null());
        assert!(json["MX"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_live_lookup() {
        let probe = HickoryDnsProbe::new(&Config::default());
        let data = probe.dns_data("example.com").await.unwrap();
        assert!(!data.a.is_empty());
        assert!(data.soa.is_some());
    }
}
