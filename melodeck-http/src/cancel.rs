//! Caller-triggered request cancellation.

use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;

/// Observable side of a [`CancelToken`], attached to a request config
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    token: CancellationToken,
    reason: Arc<OnceLock<String>>,
}

impl CancelSignal {
    /// Whether cancellation has been requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Reason given to the first [`CancelToken::cancel_with_reason`] call, if any
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.get().map(String::as_str)
    }

    /// Resolves once cancellation has been requested
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}

/// A signal/cancel pair for aborting in-flight requests.
///
/// Cancelling is idempotent: only the first call has an effect.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    signal: CancelSignal,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal to pass to [`RequestConfig::signal`](crate::RequestConfig::signal)
    #[must_use]
    pub fn signal(&self) -> CancelSignal {
        self.signal.clone()
    }

    /// Cancel every request observing this token's signal
    pub fn cancel(&self) {
        self.signal.token.cancel();
    }

    /// Cancel with a reason that ends up in the error message
    pub fn cancel_with_reason(&self, reason: impl Into<String>) {
        if !self.signal.is_cancelled() {
            let _ = self.signal.reason.set(reason.into());
        }
        self.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }
}
