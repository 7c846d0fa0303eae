use super::{FetchError, ShowFetcher};
use crate::config::ExplorerConfig;
use crate::model::{SearchHit, ShowId, ShowSummary};
use reqwest::StatusCode;
use std::time::Duration;

/// HTTP client for the TVmaze REST API.
#[derive(Debug, Clone)]
pub struct TvMazeClient {
    http: reqwest::Client,
    base_url: String,
}

impl TvMazeClient {
    pub fn new(config: &ExplorerConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}/search/shows", self.base_url)
    }

    fn show_url(&self, id: ShowId) -> String {
        format!("{}/shows/{}", self.base_url, id)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        not_found: impl FnOnce() -> String,
    ) -> Result<T, FetchError> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(not_found()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl ShowFetcher for TvMazeClient {
    async fn search_by_name(&self, name: &str) -> Result<Vec<SearchHit>, FetchError> {
        let request = self.http.get(self.search_url()).query(&[("q", name)]);
        let hits: Vec<SearchHit> = self
            .get_json(request, || format!("shows matching \"{}\"", name))
            .await?;
        tracing::debug!(name, count = hits.len(), "search response decoded");
        Ok(hits)
    }

    async fn get_by_id(&self, id: ShowId) -> Result<ShowSummary, FetchError> {
        let request = self.http.get(self.show_url(id));
        self.get_json(request, || format!("show {}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return a client for it.
    async fn serve_once(status_line: &str, body: &str) -> TvMazeClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        let config = ExplorerConfig {
            api_base_url: format!("http://{addr}"),
            request_timeout_secs: 5,
            ..ExplorerConfig::default()
        };
        TvMazeClient::new(&config).unwrap()
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let config = ExplorerConfig {
            api_base_url: "http://localhost:8080/".to_string(),
            ..ExplorerConfig::default()
        };
        let client = TvMazeClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.search_url(), "http://localhost:8080/search/shows");
        assert_eq!(client.show_url(ShowId(5)), "http://localhost:8080/shows/5");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error_not_a_panic() {
        let config = ExplorerConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..ExplorerConfig::default()
        };
        let client = TvMazeClient::new(&config).unwrap();

        let result = client.search_by_name("harry").await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }

    #[tokio::test]
    async fn test_search_keeps_response_order() {
        let body = r#"[
            {"score": 0.4, "show": {"id": 8, "name": "Lost Girl", "image": null, "summary": null}},
            {"score": 0.9, "show": {"id": 3, "name": "Lost", "image": {"medium": "https://img/m.jpg", "original": "https://img/o.jpg"}, "summary": "<p>Survivors.</p>", "language": "English"}}
        ]"#;
        let client = serve_once("200 OK", body).await;

        let hits = client.search_by_name("lost").await.unwrap();

        let ids: Vec<u64> = hits.iter().map(|h| h.show.id.0).collect();
        assert_eq!(ids, vec![8, 3]);
        assert_eq!(hits[1].show.name, "Lost");
        assert!(hits[1].show.image.is_some());
    }

    #[tokio::test]
    async fn test_missing_show_is_not_found() {
        let client = serve_once("404 Not Found", r#"{"name":"Not Found"}"#).await;

        let err = client.get_by_id(ShowId(999_999)).await.unwrap_err();

        assert!(matches!(err, FetchError::NotFound(ref what) if what == "show 999999"));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_server_error_is_retryable_status() {
        let client = serve_once("503 Service Unavailable", "").await;

        let err = client.search_by_name("lost").await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let client = serve_once("200 OK", r#"[{"score": 1.0, "show": "#).await;

        let err = client.search_by_name("lost").await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!err.is_retryable());
    }
}
