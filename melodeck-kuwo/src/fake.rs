//! Scripted transport for tests.

use async_trait::async_trait;
use melodeck_http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use melodeck_http::{PreparedRequest, RawResponse, StatusCode, Transport, TransportError};
use std::sync::{Arc, Mutex};

/// Answers every request with the same JSON body and records what was sent
pub struct FakeTransport {
    status: u16,
    body: &'static str,
    seen: Mutex<Vec<PreparedRequest>>,
}

impl FakeTransport {
    pub fn json(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn attempts(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last_request(&self) -> PreparedRequest {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(RawResponse {
            status: StatusCode::from_u16(self.status).unwrap(),
            headers,
            body: self.body.as_bytes().to_vec(),
        })
    }
}
