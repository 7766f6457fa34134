//! Async HTTP client wrapping reqwest.
//!
//! Used by the text search providers. Follows redirects and applies a
//! per-request timeout; it never retries, the search chain's provider order
//! is the only fallback.

use anyhow::{bail, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;

/// Response from an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header.
    pub content_type: Option<String>,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail unless the status is 2xx.
    pub fn ensure_success(self) -> Result<Self> {
        if !self.is_success() {
            bail!("HTTP {} from {}", self.status, self.url);
        }
        Ok(self)
    }

    /// Fail when the Content-Type header is present and matches none of
    /// `expected`. A missing header is accepted.
    pub fn ensure_content(self, expected: &[&str]) -> Result<Self> {
        if let Some(ct) = &self.content_type {
            let ct = ct.to_ascii_lowercase();
            if !expected.iter().any(|e| ct.contains(e)) {
                bail!("unexpected content type {} from {}", ct, self.final_url);
            }
        }
        Ok(self)
    }
}

/// HTTP client for the search providers.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client that presents itself as a desktop browser.
    pub fn new(user_agent: &str, timeout_ms: u64) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,application/json;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self {
            client,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// GET `url` with the given query parameters.
    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        let r = self
            .client
            .get(url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?;
        Self::read(url, r).await
    }

    /// POST url-encoded form fields to `url`.
    pub async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse> {
        let r = self
            .client
            .post(url)
            .form(form)
            .timeout(self.timeout)
            .send()
            .await?;
        Self::read(url, r).await
    }

    async fn read(url: &str, r: reqwest::Response) -> Result<HttpResponse> {
        let status = r.status().as_u16();
        let final_url = r.url().to_string();
        let content_type = r
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = r.text().await?;

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status,
            content_type,
            body,
        })
    }
}
