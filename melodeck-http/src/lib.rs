pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod interceptor;
mod query;
pub mod response;
pub mod retry;
pub mod transport;

pub use cancel::{CancelSignal, CancelToken};
pub use client::HttpClient;
pub use config::{
    Backoff, ClientOptions, Method, ParamValue, RequestBody, RequestConfig, DEFAULT_RETRY_DELAY,
    DEFAULT_TIMEOUT,
};
pub use error::{ErrorCode, HttpError, TransportError};
pub use interceptor::{ErrorInterceptor, InterceptorHandle, RequestInterceptor, ResponseInterceptor};
pub use response::{Body, ResponseData};
pub use retry::FixedInterval;
pub use transport::{PreparedRequest, RawResponse, ReqwestTransport, Transport};

/// Re-export header types used to build requests
pub use reqwest::header;
pub use reqwest::StatusCode;
