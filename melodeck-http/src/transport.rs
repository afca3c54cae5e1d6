//! The network seam the client sends requests through.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use std::time::Duration;

use crate::config::Method;
use crate::error::TransportError;

/// User agent for requests
const USER_AGENT: &str = concat!("Melodeck/", env!("CARGO_PKG_VERSION"));

/// Connect timeout of the default transport
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// A fully resolved request, ready for the wire
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// A response with its body already read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Sends one request attempt.
///
/// Dropping the returned future must abort the in-flight call; the client
/// relies on this for timeouts and cancellation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError>;
}

/// Default [`Transport`] backed by `reqwest` with middleware support
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ClientWithMiddleware,
}

impl ReqwestTransport {
    /// Create a transport with the default user agent and connect timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let base_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self::from_client(ClientBuilder::new(base_client).build()))
    }

    /// Use a preconfigured client, e.g. one with extra middleware
    #[must_use]
    pub const fn from_client(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), &request.url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
