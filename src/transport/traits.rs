// src/transport/traits.rs
use async_trait::async_trait;
use thiserror::Error;

/// Raw outcome of one HTTP round trip that produced a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    /// Body as text, lossily decoded for diagnostics.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failures that happen before a status code is obtained.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("connection failed: {0}")]
    Connection(String),
}

/// HTTP collaborator the rules client talks through.
///
/// Paths are relative to the configured API base, e.g.
/// `api/detection_engine/index`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, path: &str, body: Option<Vec<u8>>) -> Result<ApiResponse, TransportError>;
    async fn delete(&self, path: &str, body: Option<Vec<u8>>)
        -> Result<ApiResponse, TransportError>;
}
