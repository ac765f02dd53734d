use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhoisError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("WHOIS query to {server} timed out")]
    Timeout { server: String },

    #[error("WHOIS query to {server} failed: {source}")]
    Network {
        server: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Response from {0} too large")]
    ResponseTooLarge(String),

    #[error("Could not fetch WHOIS data for domain {domain}. Details: {source}")]
    Lookup {
        domain: String,
        #[source]
        source: Box<WhoisError>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl WhoisError {
    /// True when the failure (or the failure it wraps) was a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            WhoisError::Timeout { .. } => true,
            WhoisError::Lookup { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            WhoisError::InvalidDomain(_) => "invalid_domain",
            WhoisError::Timeout { .. } => "timeout",
            WhoisError::Network { .. } => "network",
            WhoisError::EmptyResponse(_) => "empty_response",
            WhoisError::ResponseTooLarge(_) => "response_too_large",
            WhoisError::Lookup { source, .. } => source.kind(),
            WhoisError::ConfigError(_) => "config",
        }
    }
}

/// Failure of one of the SSL / HTTP / DNS collaborators.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("connection timed out")]
    Timeout,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("TLS handshake failed: {0}")]
    Tls(String),

    #[error("certificate error: {0}")]
    Certificate(String),

    #[error("invalid request header: {0}")]
    InvalidHeader(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("DNS error: {0}")]
    Dns(#[from] hickory_resolver::ResolveError),
}

impl From<tokio::time::error::Elapsed> for ProbeError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        ProbeError::Timeout
    }
}

/// Which data source of the domain report failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Ssl,
    Server,
    Dns,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProbeKind::Ssl => "SSL",
            ProbeKind::Server => "server",
            ProbeKind::Dns => "DNS",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum DomainInfoError {
    #[error("Domain name cannot be empty")]
    EmptyDomain,

    #[error("Invalid domain name format: {0}")]
    InvalidDomain(String),

    #[error("Could not fetch {kind} data for domain {domain}. Details: {source}")]
    Probe {
        kind: ProbeKind,
        domain: String,
        #[source]
        source: ProbeError,
    },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_message_wraps_cause() {
        let err = WhoisError::Lookup {
            domain: "example.com".to_string(),
            source: Box::new(WhoisError::Timeout {
                server: "whois.verisign-grs.com".to_string(),
            }),
        };

        assert_eq!(
            err.to_string(),
            "Could not fetch WHOIS data for domain example.com. Details: WHOIS query to whois.verisign-grs.com timed out"
        );
        assert!(err.is_timeout());
        assert_eq!(err.kind(), "timeout");
    }

    #[test]
    fn test_probe_error_message() {
        let err = DomainInfoError::Probe {
            kind: ProbeKind::Ssl,
            domain: "example.com".to_string(),
            source: ProbeError::Timeout,
        };

        assert_eq!(
            err.to_string(),
            "Could not fetch SSL data for domain example.com. Details: connection timed out"
        );
    }
}
