// src/transport/http.rs
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use tracing::debug;

use crate::config::Config;

use super::traits::{ApiResponse, Transport, TransportError};

/// Kibana rejects state-changing requests without this header.
const XSRF_HEADER: &str = "kbn-xsrf";

/// reqwest implementation of the Transport trait.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    username: Option<String>,
    password: Option<String>,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        Self::with_client(
            &config.kibana_url,
            config.username.clone(),
            config.password.clone(),
            client,
        )
    }

    /// Build a transport around an existing reqwest client.
    pub fn with_client(
        base_url: &str,
        username: Option<String>,
        password: Option<String>,
        client: reqwest::Client,
    ) -> Result<Self, TransportError> {
        // Url::join drops the last segment unless the base ends in '/'
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');

        let base_url =
            Url::parse(&base).map_err(|e| TransportError::InvalidUrl(format!("{base}: {e}")))?;

        Ok(Self {
            base_url,
            username,
            password,
            client,
        })
    }

    /// Base URL that request paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.url(path)?;

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(XSRF_HEADER, "true")
            .header(CONTENT_TYPE, "application/json");

        if let Some(ref username) = self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!(%method, path, status, bytes = body.len(), "Detection API call");

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: Option<Vec<u8>>) -> Result<ApiResponse, TransportError> {
        self.send(Method::POST, path, body).await
    }

    async fn delete(
        &self,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, TransportError> {
        self.send(Method::DELETE, path, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::with_client(base, None, None, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn test_url_join_keeps_base_path() {
        let t = transport("http://localhost:5601/kibana");

        assert_eq!(
            t.url("api/detection_engine/index").unwrap().as_str(),
            "http://localhost:5601/kibana/api/detection_engine/index"
        );
    }

    #[test]
    fn test_url_join_tolerates_slashes() {
        let t = transport("http://localhost:5601/");

        assert_eq!(
            t.url("/api/detection_engine/signals/search").unwrap().as_str(),
            "http://localhost:5601/api/detection_engine/signals/search"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpTransport::with_client("not a url", None, None, reqwest::Client::new());
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            kibana_url: "https://kibana.internal:5601".to_string(),
            username: Some("elastic".to_string()),
            password: Some("changeme".to_string()),
            ..Default::default()
        };

        let t = HttpTransport::new(&config).unwrap();

        assert_eq!(t.base_url().as_str(), "https://kibana.internal:5601/");
        assert_eq!(t.username.as_deref(), Some("elastic"));
    }
}
