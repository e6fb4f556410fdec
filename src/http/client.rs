// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::debug;

use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Per-request timeout; targets are untrusted and may hang
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!). Off by default; recon
    /// targets are often self-hosted test sites with broken TLS, so the
    /// operator may opt in explicitly.
    pub accept_invalid_certs: bool,
    /// Salesforce `sid` session cookie value for authenticated calls
    pub session_cookie: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            session_cookie: None,
        }
    }
}

impl HttpClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session cookie
    pub fn session_cookie(mut self, sid: impl Into<String>) -> Self {
        self.session_cookie = Some(sid.into());
        self
    }

    /// Opt in to accepting invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client shared across all pipeline stages
///
/// One reqwest client (and connection pool) per recon session. Calls are
/// single-attempt; retrying against a broken target wastes the operator's
/// time more than it helps.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .cookie_store(false) // the sid cookie is attached manually
            .build()
            .map_err(|e| Error::transport("<client setup>", e))?;

        Ok(Self { client, config })
    }

    /// Execute a GET request and return the response body as text
    ///
    /// `with_cookie` controls whether the configured `sid` cookie is sent;
    /// redirect-target fetches are assumed to be public login pages and
    /// omit it.
    pub async fn get(&self, url: &str, with_cookie: bool) -> Result<String> {
        debug!(url, with_cookie, "GET");

        let mut builder = self.client.get(url);
        if with_cookie {
            if let Some(cookie) = self.cookie_header() {
                builder = builder.header("cookie", cookie);
            }
        }

        let response = builder.send().await.map_err(|e| Error::transport(url, e))?;
        response.text().await.map_err(|e| Error::transport(url, e))
    }

    /// Execute a form-encoded POST and return the response body as text
    ///
    /// `values` is sent as `application/x-www-form-urlencoded`; an empty
    /// slice yields an empty body (used by the endpoint probe).
    pub async fn post_form(
        &self,
        url: &str,
        values: &[(&str, &str)],
        with_cookie: bool,
    ) -> Result<String> {
        debug!(url, fields = values.len(), with_cookie, "POST");

        let mut builder = self.client.post(url).form(values);
        if with_cookie {
            if let Some(cookie) = self.cookie_header() {
                builder = builder.header("cookie", cookie);
            }
        }

        let response = builder.send().await.map_err(|e| Error::transport(url, e))?;
        response.text().await.map_err(|e| Error::transport(url, e))
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn cookie_header(&self) -> Option<String> {
        self.config
            .session_cookie
            .as_ref()
            .map(|sid| format!("sid={}", sid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert!(!client.config().accept_invalid_certs);
    }

    #[test]
    fn test_cookie_header() {
        let client =
            HttpClient::with_config(HttpClientConfig::new().session_cookie("00Dxx!secret"))
                .unwrap();
        assert_eq!(client.cookie_header().as_deref(), Some("sid=00Dxx!secret"));
    }

    #[tokio::test]
    async fn test_get_sends_cookie_when_asked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/s"))
            .and(header("cookie", "sid=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            HttpClient::with_config(HttpClientConfig::new().session_cookie("abc")).unwrap();
        let body = client.get(&format!("{}/s", server.uri()), true).await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_post_form_encodes_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/aura"))
            .and(body_string("message=%7B%7D&aura.token="))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let body = client
            .post_form(
                &format!("{}/aura", server.uri()),
                &[("message", "{}"), ("aura.token", "")],
                false,
            )
            .await
            .unwrap();
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn test_transport_error_carries_url() {
        let client = HttpClient::new().unwrap();
        // Nothing listens on this port.
        let err = client
            .get("http://127.0.0.1:1/s", false)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.url(), Some("http://127.0.0.1:1/s"));
    }
}
