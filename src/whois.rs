use crate::{config::Config, errors::WhoisError, metrics, tld_mappings};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{collections::HashSet, sync::Arc, time::Duration};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    time::timeout,
};
use tracing::{debug, info, warn};
use url::Url;

const READ_BUFFER_SIZE: usize = 4096;

// Tried in order; the first marker yielding a usable host wins.
static REFERRAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)WHOIS Server:[ \t]*(.+)",
        r"(?i)Referral URL:[ \t]*(.+)",
        r"(?i)refer:[ \t]*(.+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static referral pattern must compile"))
    .collect()
});

/// One request/response exchange with a WHOIS server.
#[async_trait]
pub trait WhoisTransport: Send + Sync {
    async fn query(&self, server: &str, domain: &str) -> Result<String, WhoisError>;
}

/// Plain-text WHOIS over TCP (RFC 3912): send the query line, read until the
/// server closes the connection.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    port: u16,
    timeout: Duration,
    max_response_size: usize,
}

impl TcpTransport {
    pub fn new(port: u16, timeout: Duration, max_response_size: usize) -> Self {
        Self {
            port,
            timeout,
            max_response_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.whois_port,
            config.whois_timeout(),
            config.max_response_size,
        )
    }

    async fn execute_query(&self, server: &str, domain: &str) -> Result<String, WhoisError> {
        let network = |source| WhoisError::Network {
            server: server.to_string(),
            source,
        };

        let mut stream = TcpStream::connect((server, self.port))
            .await
            .map_err(network)?;

        if let Err(e) = stream.set_nodelay(true) {
            debug!("Failed to set TCP_NODELAY: {}", e);
        }

        let query_line = format!("{}\r\n", domain);
        stream
            .write_all(query_line.as_bytes())
            .await
            .map_err(network)?;

        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let mut response = Vec::new();

        loop {
            let n = stream.read(&mut buffer).await.map_err(network)?;
            if n == 0 {
                break;
            }
            response.extend_from_slice(&buffer[..n]);
            if response.len() > self.max_response_size {
                return Err(WhoisError::ResponseTooLarge(server.to_string()));
            }
        }

        // Registries are not consistent about encoding
        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

#[async_trait]
impl WhoisTransport for TcpTransport {
    async fn query(&self, server: &str, domain: &str) -> Result<String, WhoisError> {
        debug!("Querying {}:{} for {}", server, self.port, domain);

        // One deadline covers connect, write and the whole read.
        match timeout(self.timeout, self.execute_query(server, domain)).await {
            Ok(result) => result,
            Err(_) => Err(WhoisError::Timeout {
                server: server.to_string(),
            }),
        }
    }
}

/// Concatenated text of one query chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoisResult {
    /// Server whose answer was accepted last.
    pub server: String,
    /// Every server whose answer is part of `raw_data`, in query order.
    pub servers: Vec<String>,
    pub raw_data: String,
}

struct ReferralState {
    current_server: String,
    hops_taken: usize,
    accumulated_text: String,
    latest_response: String,
    servers: Vec<String>,
    visited: HashSet<String>,
}

impl ReferralState {
    fn start(server: &str, response: String) -> Self {
        Self {
            current_server: server.to_string(),
            hops_taken: 0,
            accumulated_text: response.clone(),
            latest_response: response,
            servers: vec![server.to_string()],
            visited: HashSet::from([server.to_string()]),
        }
    }

    fn accept(&mut self, server: String, response: String) {
        self.accumulated_text.push_str("\n\n# ");
        self.accumulated_text.push_str(&server);
        self.accumulated_text.push_str("\n\n");
        self.accumulated_text.push_str(&response);
        self.latest_response = response;
        self.visited.insert(server.clone());
        self.servers.push(server.clone());
        self.current_server = server;
    }

    fn finish(self) -> WhoisResult {
        WhoisResult {
            server: self.current_server,
            servers: self.servers,
            raw_data: self.accumulated_text,
        }
    }
}

/// Routes a domain to its registry server and follows registrar referrals.
pub struct WhoisService {
    transport: Arc<dyn WhoisTransport>,
    min_referral_response_len: usize,
}

impl WhoisService {
    pub fn new(transport: Arc<dyn WhoisTransport>, config: &Config) -> Self {
        Self {
            transport,
            min_referral_response_len: config.min_referral_response_len,
        }
    }

    /// Query the registry for `domain` and chase up to `max_referrals`
    /// referrals. Only the first query can fail the lookup; a failed or
    /// implausibly short referral answer ends the chain with what was
    /// gathered so far.
    pub async fn lookup(
        &self,
        domain: &str,
        max_referrals: usize,
    ) -> Result<WhoisResult, WhoisError> {
        let initial_server = tld_mappings::server_for(domain);
        let response = self.transport.query(initial_server, domain).await?;

        if response.trim().is_empty() {
            return Err(WhoisError::EmptyResponse(initial_server.to_string()));
        }

        let mut state = ReferralState::start(initial_server, response);

        while state.hops_taken < max_referrals {
            let Some(next_server) = find_referral(&state.latest_response, &state.current_server)
            else {
                break;
            };

            if state.visited.contains(&next_server) {
                debug!("Referral to {} would revisit a queried server", next_server);
                break;
            }

            state.hops_taken += 1;
            debug!(
                "Following referral from {} to {}",
                state.current_server, next_server
            );

            match self.transport.query(&next_server, domain).await {
                Ok(response) if response.chars().count() > self.min_referral_response_len => {
                    metrics::increment_referrals();
                    state.accept(next_server, response);
                }
                Ok(response) => {
                    debug!(
                        "Ignoring {} character answer from referral server {}",
                        response.chars().count(),
                        next_server
                    );
                    break;
                }
                Err(e) => {
                    warn!("Failed to query referral server {}: {}", next_server, e);
                    break;
                }
            }
        }

        info!(
            "WHOIS for {} answered by {} ({} referral hops)",
            domain, state.current_server, state.hops_taken
        );

        Ok(state.finish())
    }
}

/// The more specific WHOIS server a response points to, if any.
pub fn find_referral(response: &str, current_server: &str) -> Option<String> {
    REFERRAL_PATTERNS.iter().find_map(|pattern| {
        let captures = pattern.captures(response)?;
        let host = referral_host(captures.get(1)?.as_str())?;
        (host != current_server).then_some(host)
    })
}

fn referral_host(value: &str) -> Option<String> {
    let value = value.trim();

    let host = if value.contains("://") {
        Url::parse(value).ok()?.host_str()?.to_string()
    } else {
        value
            .split(|c: char| c == '/' || c == ':' || c.is_whitespace())
            .next()?
            .to_string()
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let host = host.trim_end_matches('.').to_lowercase();

    host.contains('.').then_some(host)
}
