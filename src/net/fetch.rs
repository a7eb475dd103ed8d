use serde_json::Value;
use url::Url;

use super::CatalogSource;
use crate::config::ServiceConfig;
use crate::error::{CatalogError, Result};

/// HTTP client for the catalog service.
///
/// No retries and no timeout of its own: a failed request is reported once
/// and the caller picks the recovery.
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| CatalogError::Transport(format!("Client error: {}", e)))?;

        Ok(Self::with_http_client(config, http))
    }

    /// Reuse an already configured `reqwest::Client`.
    pub fn with_http_client(config: &ServiceConfig, http: reqwest::Client) -> Self {
        Self {
            base_url: normalize_base(&config.base_url),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base}{path}?{query}`.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", joined, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// GET `path` and parse the body as JSON.
    pub async fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint(path, query)?;
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::RemoteService {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Transport(format!("Failed to read body: {}", e)))?;

        serde_json::from_slice(&body).map_err(CatalogError::from)
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        CatalogClient::fetch_json(self, path, query).await
    }
}

/// Default to plain http when no scheme was given; the catalog is usually a
/// local service.
fn normalize_base(base: &str) -> String {
    if !base.starts_with("http://") && !base.starts_with("https://") {
        format!("http://{}", base)
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn client(base: &str) -> CatalogClient {
        // Loopback test servers must not be routed through an ambient proxy.
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        CatalogClient::with_http_client(&ServiceConfig::new(base), http)
    }

    /// Serve one canned HTTP response; the request head is sent back on the
    /// channel.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = sock.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
            let resp = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            let _ = sock.shutdown().await;
        });

        (format!("http://{}", addr), rx)
    }

    #[test]
    fn endpoint_joins_path_and_query() {
        let c = client("http://localhost:8000/");
        let url = c
            .endpoint("/api/coordenadas-confirmadas", &[("limit", "50".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/coordenadas-confirmadas?limit=50"
        );
    }

    #[test]
    fn endpoint_keeps_base_prefix() {
        let c = client("https://example.org/catalog");
        let url = c.endpoint("/api/x", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/catalog/api/x");
    }

    #[test]
    fn base_without_scheme_defaults_to_http() {
        assert_eq!(client("localhost:8000").base_url(), "http://localhost:8000");
    }

    #[test]
    fn bad_base_is_invalid_url() {
        let c = client("http://exa mple.org");
        assert!(matches!(
            c.endpoint("/api/x", &[]),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn parses_json_body_and_sends_query() {
        let (base, head) = serve_once("200 OK", r#"[{"kepoi_name":"K1","X":1.0}]"#).await;
        let body = client(&base)
            .fetch_json("/api/coordenadas-confirmadas", &[("limit", "3".to_string())])
            .await
            .unwrap();
        assert_eq!(body[0]["kepoi_name"], "K1");

        let head = head.await.unwrap();
        assert!(head.starts_with("GET /api/coordenadas-confirmadas?limit=3 HTTP/1.1"));
    }

    #[tokio::test]
    async fn non_success_status_is_remote_error() {
        let (base, _head) = serve_once("503 Service Unavailable", "{}").await;
        let err = client(&base).fetch_json("/api/x", &[]).await.unwrap_err();
        assert!(matches!(err, CatalogError::RemoteService { status: 503 }));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let (base, _head) = serve_once("200 OK", "<html>nope</html>").await;
        let err = client(&base).fetch_json("/api/x", &[]).await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
            l.local_addr().unwrap().port()
        };
        let err = client(&format!("http://127.0.0.1:{}", port))
            .fetch_json("/api/x", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }
}
