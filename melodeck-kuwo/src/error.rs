use melodeck_http::{HttpError, TransportError};
use thiserror::Error;

/// Errors from the Kuwo catalog
#[derive(Debug, Error)]
pub enum KuwoError {
    /// The HTTP client could not be created
    #[error("Failed to create Kuwo HTTP client: {0}")]
    Transport(#[from] TransportError),

    /// The request failed (timeout, cancellation, HTTP status or network)
    #[error("Kuwo request failed: {0}")]
    Http(#[from] HttpError),

    /// The response body did not match the expected envelope
    #[error("Unexpected Kuwo response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope carried a non-200 code
    #[error("Kuwo API returned code {code}")]
    Api { code: i64 },

    /// The envelope reported success without a payload
    #[error("Kuwo API returned no data")]
    MissingData,
}

/// Convenience type alias for Results with `KuwoError`.
pub type Result<T> = std::result::Result<T, KuwoError>;
