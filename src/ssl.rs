//! TLS certificate chain inspection over rustls.

use crate::{errors::ProbeError, report::{CertificateProbe, RequestOptions}};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use rustls::crypto::CryptoProvider;
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::ServerName;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use tokio::{net::TcpStream, time::timeout};
use tokio_rustls::TlsConnector;
use tracing::debug;
use x509_parser::prelude::*;

const HTTPS_PORT: u16 = 443;
const PEM_LINE_WIDTH: usize = 64;

/// Certificate summary for the host, plus the chain in PEM form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslData {
    /// Subject attributes keyed by short name (`CN`, `O`, `C`, ...).
    pub subject: BTreeMap<String, String>,
    pub issuer: BTreeMap<String, String>,
    pub valid: bool,
    /// Milliseconds since the Unix epoch.
    pub valid_from: i64,
    pub valid_to: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CertificateDetails>,
}

/// Human-readable rendering of the leaf certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDetails {
    pub subject: String,
    pub issuer: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
}

// A provider may already be installed by the embedding application.
fn ensure_crypto_provider() {
    let _ = CryptoProvider::install_default(rustls::crypto::ring::default_provider());
}

/// Completes a TLS handshake on port 443 and reads the peer's chain.
#[derive(Clone)]
pub struct RustlsProbe {
    connector: TlsConnector,
    port: u16,
}

impl RustlsProbe {
    pub fn new() -> Self {
        ensure_crypto_provider();

        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Self {
            connector: TlsConnector::from(Arc::new(config)),
            port: HTTPS_PORT,
        }
    }

    pub async fn fetch(
        &self,
        domain: &str,
        options: &RequestOptions,
    ) -> Result<SslData, ProbeError> {
        let server_name = ServerName::try_from(domain.to_string())
            .map_err(|e| ProbeError::Tls(format!("invalid server name {}: {}", domain, e)))?;

        let stream = timeout(options.timeout(), TcpStream::connect((domain, self.port))).await??;

        let tls_stream = timeout(options.timeout(), self.connector.connect(server_name, stream))
            .await?
            .map_err(|e| ProbeError::Tls(e.to_string()))?;

        let (_, connection) = tls_stream.get_ref();
        let chain: Vec<&[u8]> = connection
            .peer_certificates()
            .map(|certs| certs.iter().map(|cert| cert.as_ref()).collect())
            .unwrap_or_default();

        debug!("Received {} certificate(s) from {}", chain.len(), domain);

        ssl_data_from_chain(&chain, Utc::now())
    }
}

impl Default for RustlsProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CertificateProbe for RustlsProbe {
    async fn certificate_chain(
        &self,
        domain: &str,
        options: &RequestOptions,
    ) -> Result<SslData, ProbeError> {
        self.fetch(domain, options).await
    }
}

/// Build [`SslData`] from a DER chain ordered leaf first.
pub fn ssl_data_from_chain(chain: &[&[u8]], now: DateTime<Utc>) -> Result<SslData, ProbeError> {
    let leaf_der = chain
        .first()
        .ok_or_else(|| ProbeError::Certificate("server presented no certificate".to_string()))?;

    let (_, leaf) = X509Certificate::from_der(leaf_der)
        .map_err(|e| ProbeError::Certificate(format!("failed to parse certificate: {}", e)))?;

    let subject = name_attributes(leaf.subject());
    let issuer = name_attributes(leaf.issuer());

    let not_before = leaf.validity().not_before.timestamp();
    let not_after = leaf.validity().not_after.timestamp();
    let valid_from = not_before.saturating_mul(1000);
    let valid_to = not_after.saturating_mul(1000);

    let details = match (
        DateTime::from_timestamp(not_before, 0),
        DateTime::from_timestamp(not_after, 0),
    ) {
        (Some(from), Some(to)) => Some(CertificateDetails {
            subject: subject_summary(&subject),
            issuer: issuer_summary(&issuer),
            valid_from: from,
            valid_to: to,
        }),
        _ => None,
    };

    Ok(SslData {
        valid: valid_to > now.timestamp_millis(),
        valid_from,
        valid_to,
        certificate: Some(to_pem(leaf_der)),
        intermediate_certificate: chain.get(1).map(|der| to_pem(der)),
        root_certificate: chain.get(2).map(|der| to_pem(der)),
        details,
        subject,
        issuer,
    })
}

fn name_attributes(name: &X509Name<'_>) -> BTreeMap<String, String> {
    let mut attributes: BTreeMap<String, String> = BTreeMap::new();

    for attribute in name.iter_attributes() {
        let Ok(value) = attribute.as_str() else { continue };
        let key = short_name(&attribute.attr_type().to_id_string());

        // Repeated attributes (several OUs) are joined
        attributes
            .entry(key)
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    attributes
}

fn short_name(oid: &str) -> String {
    let name = match oid {
        "2.5.4.3" => "CN",
        "2.5.4.6" => "C",
        "2.5.4.7" => "L",
        "2.5.4.8" => "ST",
        "2.5.4.10" => "O",
        "2.5.4.11" => "OU",
        "2.5.4.5" => "serialNumber",
        "1.2.840.113549.1.9.1" => "emailAddress",
        other => other,
    };
    name.to_string()
}

/// Common name, or every attribute value when there is none.
pub fn subject_summary(subject: &BTreeMap<String, String>) -> String {
    subject
        .get("CN")
        .cloned()
        .unwrap_or_else(|| join_values(subject))
}

/// Issuing organization, then common name, then every attribute value.
pub fn issuer_summary(issuer: &BTreeMap<String, String>) -> String {
    issuer
        .get("O")
        .or_else(|| issuer.get("CN"))
        .cloned()
        .unwrap_or_else(|| join_values(issuer))
}

fn join_values(attributes: &BTreeMap<String, String>) -> String {
    attributes.values().cloned().collect::<Vec<_>>().join(", ")
}

/// PEM armor with 64-column base64 lines.
pub fn to_pem(der: &[u8]) -> String {
    let encoded = STANDARD.encode(der);
    let body = encoded
        .as_bytes()
        .chunks(PEM_LINE_WIDTH)
        .map(|line| std::str::from_utf8(line).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n");

    format!("-----BEGIN CERTIFICATE-----\n{}\n-----END CERTIFICATE-----", body)
}
