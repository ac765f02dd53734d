//! HEAD request against the domain's HTTPS endpoint.

use crate::{
    errors::ProbeError,
    report::{HttpsProbe, RequestOptions},
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, SERVER},
    redirect::Policy,
    Client,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// What a HEAD request tells us about the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadResponse {
    /// First `Server` header value, if any.
    pub server: Option<String>,
    pub status: u16,
}

#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    scheme: String,
}

impl ReqwestProbe {
    pub fn new() -> Self {
        Self {
            scheme: "https".to_string(),
        }
    }

    /// Use another URL scheme, e.g. plain `http` against a local test server.
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    fn client(options: &RequestOptions) -> Result<Client, ProbeError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ProbeError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ProbeError::InvalidHeader(format!("{}: {}", name, e)))?;
            headers.insert(name, value);
        }

        let redirect = if options.follow_redirects {
            Policy::limited(options.max_redirects)
        } else {
            Policy::none()
        };

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(redirect)
            .timeout(options.timeout())
            .build()?;

        Ok(client)
    }

    pub async fn head(
        &self,
        domain: &str,
        options: &RequestOptions,
    ) -> Result<HeadResponse, ProbeError> {
        let client = Self::client(options)?;
        let url = format!("{}://{}", self.scheme, domain);

        let response = client.head(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout
            } else {
                ProbeError::Http(e)
            }
        })?;

        let server = response
            .headers()
            .get(SERVER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let status = response.status().as_u16();

        debug!("HEAD {} -> {} (server: {:?})", url, status, server);

        Ok(HeadResponse { server, status })
    }
}

impl Default for ReqwestProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpsProbe for ReqwestProbe {
    async fn head(
        &self,
        domain: &str,
        options: &RequestOptions,
    ) -> Result<HeadResponse, ProbeError> {
        ReqwestProbe::head(self, domain, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    async fn http_server(reply: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.ends_with(b"\r\n\r\n") {
                let n = socket.read(&mut buffer).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..n]);
            }
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (address, handle)
    }

    #[tokio::test]
    async fn test_head_reports_status_and_server() {
        let (address, server) = http_server(
            "HTTP/1.1 204 No Content\r\nServer: test-server/1.0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let mut options = RequestOptions::default();
        options
            .headers
            .insert("X-Probe".to_string(), "yes".to_string());

        let probe = ReqwestProbe::new().with_scheme("http");
        let response = probe.head(&address, &options).await.unwrap();

        assert_eq!(response.status, 204);
        assert_eq!(response.server.as_deref(), Some("test-server/1.0"));

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("head / http/1.1"));
        assert!(request.contains("x-probe: yes"));
    }

    #[tokio::test]
    async fn test_missing_server_header() {
        let (address, _server) =
            http_server("HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;

        let probe = ReqwestProbe::new().with_scheme("http");
        let response = probe.head(&address, &RequestOptions::default()).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.server, None);
    }

    #[tokio::test]
    async fn test_invalid_header_is_rejected_before_connecting() {
        let mut options = RequestOptions::default();
        options
            .headers
            .insert("bad header".to_string(), "x".to_string());

        let result = ReqwestProbe::new().head("127.0.0.1:9", &options).await;
        assert!(matches!(result, Err(ProbeError::InvalidHeader(_))));
    }
}
