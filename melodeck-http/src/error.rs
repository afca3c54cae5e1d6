use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

use crate::config::RequestConfig;
use crate::response::ResponseData;

/// Failure category attached to every rejected request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The request timer fired before the call settled
    Timeout,
    /// The caller's cancel signal fired
    Cancelled,
    /// The server answered with a non-2xx status
    Http(StatusCode),
    /// Transport failure after retries were exhausted
    Network,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("TIMEOUT"),
            Self::Cancelled => f.write_str("CANCELLED"),
            Self::Http(status) => write!(f, "HTTP_{}", status.as_u16()),
            Self::Network => f.write_str("NETWORK_ERROR"),
        }
    }
}

/// Error raised by the underlying transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP middleware failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    #[error("{0}")]
    Other(String),
}

/// The single error type returned by a failed request
#[derive(Debug, Clone, Error)]
#[error("{message} ({code})")]
pub struct HttpError {
    message: String,
    code: ErrorCode,
    response: Option<Box<ResponseData>>,
    config: RequestConfig,
}

impl HttpError {
    pub(crate) fn timeout(config: RequestConfig) -> Self {
        Self {
            message: "Request timeout".into(),
            code: ErrorCode::Timeout,
            response: None,
            config,
        }
    }

    pub(crate) fn cancelled(config: RequestConfig) -> Self {
        let message = match config.signal.as_ref().and_then(|s| s.reason()) {
            Some(reason) => format!("Request cancelled: {reason}"),
            None => "Request cancelled".into(),
        };
        Self {
            message,
            code: ErrorCode::Cancelled,
            response: None,
            config,
        }
    }

    pub(crate) fn network(message: impl Into<String>, config: RequestConfig) -> Self {
        Self {
            message: message.into(),
            code: ErrorCode::Network,
            response: None,
            config,
        }
    }

    pub(crate) fn from_status(response: ResponseData) -> Self {
        Self {
            message: format!("Request failed with status {}", response.status.as_u16()),
            code: ErrorCode::Http(response.status),
            config: response.config.clone(),
            response: Some(Box::new(response)),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// The full response, present for non-2xx statuses
    #[must_use]
    pub fn response(&self) -> Option<&ResponseData> {
        self.response.as_deref()
    }

    #[must_use]
    pub const fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Response status, if the server answered
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(|r| r.status)
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self.code, ErrorCode::Timeout)
    }

    #[must_use]
    pub const fn is_cancel(&self) -> bool {
        matches!(self.code, ErrorCode::Cancelled)
    }
}
