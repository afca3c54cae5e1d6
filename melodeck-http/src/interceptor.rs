//! Request, response and error interceptor chains.
//!
//! Interceptors run sequentially in registration order. Async closures
//! implement the traits directly, so most callers never name them.

use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::config::RequestConfig;
use crate::error::HttpError;
use crate::response::ResponseData;

/// Runs before a request is sent and may rewrite its config
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn on_request(&self, config: RequestConfig) -> RequestConfig;
}

/// Runs after a successful response and may rewrite it
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn on_response(&self, response: ResponseData) -> ResponseData;
}

/// Observes a failed request before the error reaches the caller
#[async_trait]
pub trait ErrorInterceptor: Send + Sync {
    async fn on_error(&self, error: &HttpError);
}

#[async_trait]
impl<F, Fut> RequestInterceptor for F
where
    F: Fn(RequestConfig) -> Fut + Send + Sync,
    Fut: Future<Output = RequestConfig> + Send + 'static,
{
    async fn on_request(&self, config: RequestConfig) -> RequestConfig {
        self(config).await
    }
}

#[async_trait]
impl<F, Fut> ResponseInterceptor for F
where
    F: Fn(ResponseData) -> Fut + Send + Sync,
    Fut: Future<Output = ResponseData> + Send + 'static,
{
    async fn on_response(&self, response: ResponseData) -> ResponseData {
        self(response).await
    }
}

#[async_trait]
impl<F, Fut> ErrorInterceptor for F
where
    F: Fn(HttpError) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn on_error(&self, error: &HttpError) {
        self(error.clone()).await;
    }
}

/// Ordered list of interceptors of one kind
pub(crate) struct Registry<T: ?Sized> {
    next_id: AtomicU64,
    entries: Arc<Mutex<Vec<(u64, Arc<T>)>>>,
}

impl<T: ?Sized + Send + Sync + 'static> Registry<T> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn register(&self, interceptor: Arc<T>) -> InterceptorHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, interceptor));

        let entries: Weak<Mutex<Vec<(u64, Arc<T>)>>> = Arc::downgrade(&self.entries);
        InterceptorHandle {
            id,
            remove: Box::new(move || {
                if let Some(entries) = entries.upgrade() {
                    entries
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .retain(|(entry_id, _)| *entry_id != id);
                }
            }),
        }
    }

    /// Interceptors registered right now, in order
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, interceptor)| Arc::clone(interceptor))
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Deregistration handle returned when adding an interceptor.
///
/// Dropping the handle keeps the interceptor registered; call
/// [`InterceptorHandle::remove`] to take it out.
#[must_use = "dropping the handle makes the interceptor permanent"]
pub struct InterceptorHandle {
    id: u64,
    remove: Box<dyn FnOnce() + Send + Sync>,
}

impl InterceptorHandle {
    /// Remove exactly the interceptor this handle was returned for
    pub fn remove(self) {
        (self.remove)();
    }
}

impl fmt::Debug for InterceptorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
