//! HTTP transport abstraction
//!
//! The fetcher only needs "send this request, give me status and body".
//! Keeping that behind a trait lets tests drive the pipeline without a
//! network, while [`ReqwestTransport`] is what pages use in practice.

use crate::client::endpoint::Method;
use crate::core::error::FetchError;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

/// A fully resolved request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
}

/// Raw response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends exactly one request per call, no retry
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// [`Transport`] backed by a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with a request timeout
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
