use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use std::fmt::Display;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Transport used by [`crate::feed::RemoteFeedLoader`].
///
/// An `Err` means no response was obtained at all. Any response, whatever
/// its status, is an `Ok`. A body that fails to arrive after the status line
/// is reported as an empty body.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    user_agent: String,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .gzip(true)
            .build()
            .map_err(|e| Error::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::HttpError(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map(|bytes| bytes.to_vec());

        Ok(response_with_body(status, body, url))
    }
}

fn response_with_body<E: Display>(
    status: u16,
    body: std::result::Result<Vec<u8>, E>,
    url: &Url,
) -> HttpResponse {
    let body = body.unwrap_or_else(|e| {
        warn!("Failed to read response body from {}: {}", url, e);
        Vec::new()
    });

    debug!("Received HTTP {} with {} bytes from {}", status, body.len(), url);
    HttpResponse::new(status, body)
}
