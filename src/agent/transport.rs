//! HTTP transport seam for the agent.
//!
//! The agent never talks to reqwest directly; it goes through [`Transport`]
//! so runs can be driven against a recording transport in tests.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::discovery::HttpMethod;

/// An outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }
}

/// A received response; the body is kept as text until the caller decides how to read it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }
}

/// Something that can carry one request to a server.
///
/// An `Err` means the request never produced a response (connection refused,
/// timeout, DNS failure); HTTP error statuses come back as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut req = self
            .client
            .request(method, &request.url)
            .header("Accept", "application/json");
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = resp.text().await.map_err(|e| e.to_string())?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_helpers() {
        let resp = HttpResponse {
            status: 201,
            content_type: Some("application/json; charset=utf-8".into()),
            body: "{}".into(),
        };
        assert!(resp.is_success());
        assert!(resp.is_json());

        let resp = HttpResponse {
            status: 502,
            content_type: None,
            body: "bad gateway".into(),
        };
        assert!(!resp.is_success());
        assert!(!resp.is_json());
    }

    #[tokio::test]
    async fn test_reqwest_transport_reports_unreachable_host() {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .no_proxy()
            .build()
            .unwrap();
        let transport = ReqwestTransport::from_client(client);
        // Port 9 (discard) on localhost is closed in test environments.
        let result = transport
            .send(HttpRequest::get("http://127.0.0.1:9/.well-known/uap"))
            .await;
        assert!(result.is_err());
    }
}
