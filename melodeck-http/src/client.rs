//! HTTP client with timeout, retry, cancellation and interceptors.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest_retry::{RetryDecision, RetryPolicy};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;
use tracing::{debug, warn};

use crate::cancel::{CancelSignal, CancelToken};
use crate::config::{ClientOptions, Defaults, Method, RequestBody, RequestConfig};
use crate::error::{HttpError, TransportError};
use crate::interceptor::{
    ErrorInterceptor, InterceptorHandle, Registry, RequestInterceptor, ResponseInterceptor,
};
use crate::query::build_url;
use crate::response::{Body, ResponseData};
use crate::retry;
use crate::transport::{PreparedRequest, RawResponse, ReqwestTransport, Transport};

/// HTTP client holding per-instance defaults and interceptor chains.
///
/// Instances share nothing with each other. Wrap one in an `Arc` to use it
/// from several tasks.
pub struct HttpClient {
    defaults: RwLock<Defaults>,
    transport: Arc<dyn Transport>,
    request_interceptors: Registry<dyn RequestInterceptor>,
    response_interceptors: Registry<dyn ResponseInterceptor>,
    error_interceptors: Registry<dyn ErrorInterceptor>,
}

impl HttpClient {
    /// Create a client backed by [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(options: ClientOptions) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            options,
            Arc::new(ReqwestTransport::new()?),
        ))
    }

    /// Create a client sending requests through a custom [`Transport`]
    #[must_use]
    pub fn with_transport(options: ClientOptions, transport: Arc<dyn Transport>) -> Self {
        let mut defaults = Defaults::default();
        defaults.apply(options);

        Self {
            defaults: RwLock::new(defaults),
            transport,
            request_interceptors: Registry::new(),
            response_interceptors: Registry::new(),
            error_interceptors: Registry::new(),
        }
    }

    /// Update the client defaults; `None` fields are left unchanged
    pub fn set_defaults(&self, options: ClientOptions) {
        self.defaults
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(options);
    }

    fn defaults(&self) -> Defaults {
        self.defaults
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register an interceptor that runs before every request
    pub fn add_request_interceptor<I: RequestInterceptor + 'static>(
        &self,
        interceptor: I,
    ) -> InterceptorHandle {
        self.request_interceptors.register(Arc::new(interceptor))
    }

    /// Register an interceptor that runs on every successful response
    pub fn add_response_interceptor<I: ResponseInterceptor + 'static>(
        &self,
        interceptor: I,
    ) -> InterceptorHandle {
        self.response_interceptors.register(Arc::new(interceptor))
    }

    /// Register an interceptor that observes every failed request
    pub fn add_error_interceptor<I: ErrorInterceptor + 'static>(
        &self,
        interceptor: I,
    ) -> InterceptorHandle {
        self.error_interceptors.register(Arc::new(interceptor))
    }

    /// Create a token whose signal can be attached to requests
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn create_cancel_token(&self) -> CancelToken {
        CancelToken::new()
    }

    /// GET request
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(&self, config: impl Into<RequestConfig>) -> Result<ResponseData, HttpError> {
        self.request(config.into().method(Method::Get)).await
    }

    /// POST request with a body
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(
        &self,
        config: impl Into<RequestConfig>,
        body: impl Into<RequestBody>,
    ) -> Result<ResponseData, HttpError> {
        self.request(config.into().method(Method::Post).body(body))
            .await
    }

    /// PUT request with a body
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put(
        &self,
        config: impl Into<RequestConfig>,
        body: impl Into<RequestBody>,
    ) -> Result<ResponseData, HttpError> {
        self.request(config.into().method(Method::Put).body(body))
            .await
    }

    /// DELETE request
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(
        &self,
        config: impl Into<RequestConfig>,
    ) -> Result<ResponseData, HttpError> {
        self.request(config.into().method(Method::Delete)).await
    }

    /// PATCH request with a body
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn patch(
        &self,
        config: impl Into<RequestConfig>,
        body: impl Into<RequestBody>,
    ) -> Result<ResponseData, HttpError> {
        self.request(config.into().method(Method::Patch).body(body))
            .await
    }

    /// Perform one logical request.
    ///
    /// Runs request interceptors, sends with timeout, retries transport
    /// failures, decodes the body and runs response interceptors. On any
    /// failure the error interceptors observe the error before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] tagged `TIMEOUT`, `CANCELLED`, `HTTP_<status>`
    /// or `NETWORK_ERROR`.
    pub async fn request(&self, config: RequestConfig) -> Result<ResponseData, HttpError> {
        let result = self.execute(config).await;

        if let Err(error) = &result {
            warn!(
                "{} {} failed: {}",
                error.config().method,
                error.config().url,
                error
            );
            for interceptor in self.error_interceptors.snapshot() {
                interceptor.on_error(error).await;
            }
        }

        result
    }

    async fn execute(&self, config: RequestConfig) -> Result<ResponseData, HttpError> {
        let defaults = self.defaults();

        let fallback = config.clone();
        let signal = config.signal.clone();
        let Some(config) =
            until_cancelled(self.run_request_interceptors(config), signal.as_ref()).await
        else {
            return Err(HttpError::cancelled(fallback));
        };

        let signal = config.signal.clone();
        let timeout = config.timeout.unwrap_or(defaults.timeout);
        let policy = retry::policy_for(
            config.backoff,
            config.retry.unwrap_or(defaults.retry),
            config.retry_delay.unwrap_or(defaults.retry_delay),
        );
        let prepared = prepare(&config, &defaults.base_url);

        debug!("{} {} (timeout: {:?})", prepared.method, prepared.url, timeout);

        let raw = tokio::select! {
            biased;
            () = cancelled(signal.as_ref()) => return Err(HttpError::cancelled(config)),
            () = tokio::time::sleep(timeout) => return Err(HttpError::timeout(config)),
            result = self.send_with_retry(&prepared, policy.as_ref()) => match result {
                Ok(raw) => raw,
                Err(e) => return Err(HttpError::network(e.to_string(), config)),
            },
        };

        debug!("{} {} -> {}", prepared.method, prepared.url, raw.status);

        let response = into_response(raw, config)?;
        if !response.status.is_success() {
            return Err(HttpError::from_status(response));
        }

        let fallback = response.config.clone();
        until_cancelled(self.run_response_interceptors(response), signal.as_ref())
            .await
            .ok_or_else(|| HttpError::cancelled(fallback))
    }

    async fn run_request_interceptors(&self, mut config: RequestConfig) -> RequestConfig {
        for interceptor in self.request_interceptors.snapshot() {
            config = interceptor.on_request(config).await;
        }
        config
    }

    async fn run_response_interceptors(&self, mut response: ResponseData) -> ResponseData {
        for interceptor in self.response_interceptors.snapshot() {
            response = interceptor.on_response(response).await;
        }
        response
    }

    /// Send, retrying transport failures as scheduled by `policy`
    async fn send_with_retry(
        &self,
        request: &PreparedRequest,
        policy: &(dyn RetryPolicy + Send + Sync),
    ) -> Result<RawResponse, TransportError> {
        let start = SystemTime::now();
        let mut past_retries = 0;

        loop {
            match self.transport.send(request).await {
                Ok(response) => return Ok(response),
                Err(e) => match policy.should_retry(start, past_retries) {
                    RetryDecision::Retry { execute_after } => {
                        past_retries += 1;
                        let wait = retry::wait_until(execute_after);
                        warn!(
                            "{} {} failed ({}), retry {} in {:?}",
                            request.method, request.url, e, past_retries, wait
                        );
                        tokio::time::sleep(wait).await;
                    }
                    RetryDecision::DoNotRetry => return Err(e),
                },
            }
        }
    }
}

/// Resolve headers, address and body for the wire
fn prepare(config: &RequestConfig, base_url: &str) -> PreparedRequest {
    let mut headers = config.headers.clone();
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    PreparedRequest {
        method: config.method,
        url: build_url(base_url, &config.url, &config.params),
        headers,
        body: config.body.as_ref().map(RequestBody::to_wire),
    }
}

/// Decode the body of a raw response.
///
/// A success response whose JSON does not parse fails the request; an error
/// response falls back to the raw text so the status error can still be raised.
fn into_response(raw: RawResponse, config: RequestConfig) -> Result<ResponseData, HttpError> {
    let status_text = raw
        .status
        .canonical_reason()
        .unwrap_or_default()
        .to_string();

    let body = if raw.status.is_success() {
        match Body::decode(&raw.headers, raw.body) {
            Ok(body) => body,
            Err(e) => {
                return Err(HttpError::network(
                    format!("Failed to decode response body: {e}"),
                    config,
                ))
            }
        }
    } else {
        Body::decode(&raw.headers, raw.body.clone())
            .unwrap_or_else(|_| Body::text_lossy(&raw.body))
    };

    Ok(ResponseData {
        body,
        status: raw.status,
        status_text,
        headers: raw.headers,
        config,
    })
}

/// Resolves when `signal` is cancelled, never if there is no signal
async fn cancelled(signal: Option<&CancelSignal>) {
    match signal {
        Some(signal) => signal.cancelled().await,
        None => std::future::pending().await,
    }
}

/// Run `future` unless `signal` fires first
async fn until_cancelled<F: Future>(future: F, signal: Option<&CancelSignal>) -> Option<F::Output> {
    tokio::select! {
        biased;
        () = cancelled(signal) => None,
        output = future => Some(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Backoff, ParamValue};
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone)]
    enum Reply {
        Respond(u16, &'static str, &'static str),
        Fail,
        Hang,
    }

    /// Replays scripted replies; the last one repeats forever
    struct FakeTransport {
        replies: Vec<Reply>,
        seen: Mutex<Vec<PreparedRequest>>,
    }

    impl FakeTransport {
        fn new(replies: Vec<Reply>) -> Arc<Self> {
            Arc::new(Self {
                replies,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn attempts(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        fn last_request(&self) -> PreparedRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
            let reply = {
                let mut seen = self.seen.lock().unwrap();
                seen.push(request.clone());
                let index = (seen.len() - 1).min(self.replies.len() - 1);
                self.replies[index].clone()
            };

            match reply {
                Reply::Respond(status, content_type, body) => {
                    let mut headers = HeaderMap::new();
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
                    Ok(RawResponse {
                        status: StatusCode::from_u16(status).unwrap(),
                        headers,
                        body: body.as_bytes().to_vec(),
                    })
                }
                Reply::Fail => Err(TransportError::Other("connection refused".into())),
                Reply::Hang => std::future::pending().await,
            }
        }
    }

    fn ok_json(body: &'static str) -> Reply {
        Reply::Respond(200, "application/json", body)
    }

    fn client(fake: &Arc<FakeTransport>) -> HttpClient {
        HttpClient::with_transport(
            ClientOptions::default().base_url("https://api.test"),
            Arc::clone(fake) as Arc<dyn Transport>,
        )
    }

    const X_TRACE: &str = "x-trace";

    fn append_marker(mut config: RequestConfig, marker: &str) -> RequestConfig {
        let current = config
            .headers
            .get(X_TRACE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        config.headers.insert(
            X_TRACE,
            HeaderValue::from_str(&format!("{current}{marker}")).unwrap(),
        );
        config
    }

    #[tokio::test]
    async fn test_get_resolves_url_and_decodes_json() {
        let fake = FakeTransport::new(vec![ok_json(r#"{"code":200,"data":[1,2]}"#)]);
        let client = client(&fake);

        let response = client
            .get(
                RequestConfig::new("/search")
                    .param("name", "a b")
                    .param("page", ParamValue::Null),
            )
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.status_text, "OK");
        assert_eq!(response.body.as_json().unwrap()["data"][1], 2);
        assert_eq!(response.config.url, "/search");

        let sent = fake.last_request();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://api.test/search?name=a%20b");
        assert_eq!(sent.headers[CONTENT_TYPE], "application/json");
        assert_eq!(sent.body, None);
    }

    #[tokio::test]
    async fn test_body_serialization_and_content_type_override() {
        let fake = FakeTransport::new(vec![Reply::Respond(201, "text/plain", "created")]);
        let client = client(&fake);

        let response = client
            .post("/songs", serde_json::json!({"name": "x"}))
            .await
            .unwrap();
        assert_eq!(response.body.as_text(), Some("created"));
        assert_eq!(fake.last_request().body.as_deref(), Some(r#"{"name":"x"}"#));

        client
            .put(
                RequestConfig::new("/songs/1")
                    .header(CONTENT_TYPE, HeaderValue::from_static("text/plain")),
                "raw text",
            )
            .await
            .unwrap();
        let sent = fake.last_request();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.body.as_deref(), Some("raw text"));
        assert_eq!(sent.headers[CONTENT_TYPE], "text/plain");
    }

    #[tokio::test]
    async fn test_absolute_url_bypasses_base() {
        let fake = FakeTransport::new(vec![ok_json("{}")]);
        client(&fake)
            .delete("http://other.test/items/1")
            .await
            .unwrap();

        let sent = fake.last_request();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, "http://other.test/items/1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_retries_then_network_error() {
        let fake = FakeTransport::new(vec![Reply::Fail]);
        let client = client(&fake);

        let err = client
            .get(RequestConfig::new("/x").retry(2))
            .await
            .unwrap_err();

        assert_eq!(fake.attempts(), 3);
        assert_eq!(err.code(), ErrorCode::Network);
        assert_eq!(err.code().to_string(), "NETWORK_ERROR");
        assert!(err.message().contains("connection refused"));
        assert!(!err.is_timeout());
        assert!(!err.is_cancel());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_waits_fixed_delay() {
        let fake = FakeTransport::new(vec![Reply::Fail, Reply::Fail, ok_json("{}")]);
        let client = client(&fake);

        let started = tokio::time::Instant::now();
        client
            .get(
                RequestConfig::new("/x")
                    .retry(3)
                    .retry_delay(Duration::from_secs(2)),
            )
            .await
            .unwrap();

        assert_eq!(fake.attempts(), 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(3900), "{elapsed:?}");
        assert!(elapsed <= Duration::from_secs(4), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_retry_comes_from_client() {
        let fake = FakeTransport::new(vec![Reply::Fail]);
        let client = client(&fake);
        client.set_defaults(ClientOptions::default().retry(1));

        client.get("/x").await.unwrap_err();
        assert_eq!(fake.attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exponential_backoff_still_bounded_by_retry() {
        let fake = FakeTransport::new(vec![Reply::Fail]);
        let client = client(&fake);

        let err = client
            .get(
                RequestConfig::new("/x")
                    .retry(2)
                    .retry_delay(Duration::from_millis(100))
                    .backoff(Backoff::Exponential {
                        max_delay: Duration::from_secs(1),
                    }),
            )
            .await
            .unwrap_err();

        assert_eq!(fake.attempts(), 3);
        assert_eq!(err.code(), ErrorCode::Network);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_aborts_without_retry() {
        let fake = FakeTransport::new(vec![Reply::Hang]);
        let client = client(&fake);

        let err = client
            .get(
                RequestConfig::new("/slow")
                    .timeout(Duration::from_secs(5))
                    .retry(3),
            )
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(err.code().to_string(), "TIMEOUT");
        assert_eq!(fake.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_covers_retry_delays() {
        let fake = FakeTransport::new(vec![Reply::Fail]);
        let client = client(&fake);

        let err = client
            .get(
                RequestConfig::new("/x")
                    .timeout(Duration::from_secs(15))
                    .retry(5)
                    .retry_delay(Duration::from_secs(10)),
            )
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(fake.attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_in_flight_request() {
        let fake = FakeTransport::new(vec![Reply::Hang]);
        let client = client(&fake);
        let token = client.create_cancel_token();

        let (result, ()) = tokio::join!(
            client.get(RequestConfig::new("/slow").signal(token.signal())),
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                token.cancel_with_reason("track changed");
                token.cancel();
            }
        );

        let err = result.unwrap_err();
        assert!(err.is_cancel());
        assert!(!err.is_timeout());
        assert_eq!(err.code(), ErrorCode::Cancelled);
        assert_eq!(err.message(), "Request cancelled: track changed");
        assert_eq!(fake.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_retry_delay() {
        let fake = FakeTransport::new(vec![Reply::Fail]);
        let client = client(&fake);
        let token = CancelToken::new();

        let (result, ()) = tokio::join!(
            client.get(
                RequestConfig::new("/x")
                    .retry(10)
                    .retry_delay(Duration::from_secs(1))
                    .signal(token.signal()),
            ),
            async {
                tokio::time::sleep(Duration::from_millis(1500)).await;
                token.cancel();
            }
        );

        assert!(result.unwrap_err().is_cancel());
        assert_eq!(fake.attempts(), 2);
    }

    #[tokio::test]
    async fn test_already_cancelled_signal_never_sends() {
        let fake = FakeTransport::new(vec![ok_json("{}")]);
        let client = client(&fake);
        let token = client.create_cancel_token();
        token.cancel();

        let err = client
            .get(RequestConfig::new("/x").signal(token.signal()))
            .await
            .unwrap_err();

        assert!(err.is_cancel());
        assert_eq!(fake.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_http_error_status_is_not_retried() {
        let fake = FakeTransport::new(vec![Reply::Respond(
            404,
            "application/json",
            r#"{"msg":"missing"}"#,
        )]);
        let client = client(&fake);

        let err = client
            .get(RequestConfig::new("/missing").retry(3))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Http(StatusCode::NOT_FOUND));
        assert_eq!(err.code().to_string(), "HTTP_404");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        let response = err.response().unwrap();
        assert_eq!(response.status.as_u16(), 404);
        assert_eq!(response.body.as_json().unwrap()["msg"], "missing");
        assert_eq!(fake.attempts(), 1);
    }

    #[tokio::test]
    async fn test_error_status_with_broken_json_keeps_text() {
        let fake = FakeTransport::new(vec![Reply::Respond(500, "application/json", "oops")]);
        let err = client(&fake).get("/x").await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::Http(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.response().unwrap().body.as_text(), Some("oops"));
    }

    #[tokio::test]
    async fn test_invalid_json_on_success_is_network_error() {
        let fake = FakeTransport::new(vec![ok_json("{not json")]);
        let err = client(&fake).get("/x").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Network);
        assert_eq!(fake.attempts(), 1);
    }

    #[tokio::test]
    async fn test_request_interceptors_run_in_order() {
        let fake = FakeTransport::new(vec![ok_json("{}")]);
        let client = client(&fake);

        let _a = client.add_request_interceptor(|config: RequestConfig| async move {
            tokio::task::yield_now().await;
            append_marker(config, "a")
        });
        let _b = client.add_request_interceptor(|config: RequestConfig| async move {
            append_marker(config, "b")
        });

        let response = client.get("/x").await.unwrap();

        assert_eq!(fake.last_request().headers[X_TRACE], "ab");
        assert_eq!(response.config.headers[X_TRACE], "ab");
    }

    #[tokio::test]
    async fn test_removed_interceptor_no_longer_runs() {
        let fake = FakeTransport::new(vec![ok_json("{}")]);
        let client = client(&fake);

        let a = client.add_request_interceptor(|config: RequestConfig| async move {
            append_marker(config, "a")
        });
        let _b = client.add_request_interceptor(|config: RequestConfig| async move {
            append_marker(config, "b")
        });
        a.remove();

        client.get("/x").await.unwrap();
        assert_eq!(fake.last_request().headers[X_TRACE], "b");
    }

    #[tokio::test]
    async fn test_response_interceptors_transform_in_order() {
        let fake = FakeTransport::new(vec![ok_json("{}")]);
        let client = client(&fake);

        let _first = client.add_response_interceptor(|mut response: ResponseData| async move {
            response.status_text.push_str(" first");
            response
        });
        let _second = client.add_response_interceptor(|mut response: ResponseData| async move {
            response.status_text.push_str(" second");
            response
        });

        let response = client.get("/x").await.unwrap();
        assert_eq!(response.status_text, "OK first second");
    }

    #[tokio::test]
    async fn test_error_interceptors_observe_then_error_is_returned() {
        let fake = FakeTransport::new(vec![Reply::Respond(503, "text/plain", "busy")]);
        let client = client(&fake);
        let observed = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&observed);
        let _errors = client.add_error_interceptor(move |error: HttpError| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(error.code().to_string());
            }
        });
        let response_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&response_calls);
        let _responses = client.add_response_interceptor(move |response: ResponseData| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { response }
        });

        let err = client.get("/x").await.unwrap_err();

        assert_eq!(err.code().to_string(), "HTTP_503");
        assert_eq!(*observed.lock().unwrap(), vec!["HTTP_503".to_string()]);
        assert_eq!(response_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_set_defaults_changes_base_url() {
        let fake = FakeTransport::new(vec![ok_json("{}")]);
        let client = client(&fake);
        client.set_defaults(ClientOptions::default().base_url("https://v2.api.test"));

        client.patch("/user", "{}").await.unwrap();
        let sent = fake.last_request();
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, "https://v2.api.test/user");
    }

    #[tokio::test]
    async fn test_instances_do_not_share_interceptors() {
        let fake = FakeTransport::new(vec![ok_json("{}")]);
        let first = client(&fake);
        let second = client(&fake);

        let _a = first.add_request_interceptor(|config: RequestConfig| async move {
            append_marker(config, "a")
        });

        second.get("/x").await.unwrap();
        assert!(fake.last_request().headers.get(X_TRACE).is_none());
    }
}
