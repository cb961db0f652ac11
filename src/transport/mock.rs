// src/transport/mock.rs
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use super::traits::{ApiResponse, Transport, TransportError};

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedMethod {
    Post,
    Delete,
}

/// A request as seen by the mock transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: RecordedMethod,
    pub path: String,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    /// Request body as UTF-8 text (for assertions).
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

/// Mock transport for testing.
///
/// Responses are served in the order they were queued. Once the queue is
/// empty every call answers 200 with an empty body.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body (for testing).
    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .push_back(Ok(ApiResponse::new(status, body)));
    }

    /// Queue a transport-level failure (for testing).
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .push_back(Err(TransportError::Connection(message.into())));
    }

    /// Get recorded requests (for assertions).
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn respond(
        &self,
        method: RecordedMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, TransportError> {
        self.requests.lock().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });

        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(200, Vec::new())))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, path: &str, body: Option<Vec<u8>>) -> Result<ApiResponse, TransportError> {
        self.respond(RecordedMethod::Post, path, body)
    }

    async fn delete(
        &self,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, TransportError> {
        self.respond(RecordedMethod::Delete, path, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_responses_served_in_order() {
        let transport = MockTransport::new();
        transport.push_response(200, "first");
        transport.push_error("connection refused");

        let first = transport.post("a", None).await.unwrap();
        assert_eq!(first.body_text(), "first");

        let second = transport.delete("b", Some(b"[]".to_vec())).await;
        assert!(matches!(second, Err(TransportError::Connection(_))));

        let requests = transport.get_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, RecordedMethod::Post);
        assert_eq!(requests[1].method, RecordedMethod::Delete);
        assert_eq!(requests[1].body_text().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_default_response() {
        let transport = MockTransport::new();

        let response = transport.post("anything", None).await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
    }
}
