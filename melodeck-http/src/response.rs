use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::RequestConfig;

/// Response body, decoded according to its content type
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// `application/json` content
    Json(serde_json::Value),
    /// Any `text/*` content
    Text(String),
    /// Everything else
    Binary(Vec<u8>),
}

impl Body {
    /// Decode raw bytes using the response's `Content-Type` header.
    ///
    /// An empty JSON body decodes to `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON content type carries invalid JSON.
    pub fn decode(headers: &HeaderMap, bytes: Vec<u8>) -> Result<Self, serde_json::Error> {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.contains("application/json") {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Self::Json(serde_json::Value::Null));
            }
            serde_json::from_slice(&bytes).map(Self::Json)
        } else if content_type.contains("text") {
            Ok(Self::Text(String::from_utf8_lossy(&bytes).into_owned()))
        } else {
            Ok(Self::Binary(bytes))
        }
    }

    /// Lossy fallback used when a JSON body on an error response does not parse
    pub(crate) fn text_lossy(bytes: &[u8]) -> Self {
        Self::Text(String::from_utf8_lossy(bytes).into_owned())
    }

    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// A completed HTTP response
#[derive(Debug, Clone)]
pub struct ResponseData {
    pub body: Body,
    pub status: StatusCode,
    pub status_text: String,
    pub headers: HeaderMap,
    /// Config the request was sent with, after request interceptors ran
    pub config: RequestConfig,
}

impl ResponseData {
    /// Deserialize the body into `T`.
    ///
    /// JSON bodies are converted directly; text bodies are parsed as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not match `T` or is binary.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.body {
            Body::Json(value) => T::deserialize(value),
            Body::Text(text) => serde_json::from_str(text),
            Body::Binary(bytes) => serde_json::from_slice(bytes),
        }
    }
}
