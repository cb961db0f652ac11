use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::signal::{CLOSE_OPEN_SIGNALS, OPEN_SIGNALS_QUERY};
use crate::domain::{DetectionRule, RuleIdOnly, SearchResult};
use crate::observability::{CallOutcome, MetricsRegistry, TimingGuard};
use crate::transport::Transport;

use super::error::ClientError;

pub const DETECTION_INDEX_PATH: &str = "api/detection_engine/index";
pub const BULK_CREATE_PATH: &str = "api/detection_engine/rules/_bulk_create";
pub const BULK_DELETE_PATH: &str = "api/detection_engine/rules/_bulk_delete";
pub const SIGNALS_SEARCH_PATH: &str = "api/detection_engine/signals/search";
pub const SIGNALS_STATUS_PATH: &str = "api/detection_engine/signals/status";

const STATUS_OK: u16 = 200;

#[derive(Debug, Clone, Copy)]
enum Method {
    Post,
    Delete,
}

/// Client for the detection engine rule and signal endpoints.
///
/// Every operation is a fixed sequence of round trips through the
/// transport; nothing is retried and no state is kept between calls.
pub struct RulesClient<T> {
    transport: T,
    metrics: Arc<MetricsRegistry>,
}

impl<T: Transport> RulesClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_metrics(transport, Arc::new(MetricsRegistry::new()))
    }

    /// Create a client that records into a shared metrics registry.
    pub fn with_metrics(transport: T, metrics: Arc<MetricsRegistry>) -> Self {
        RulesClient { transport, metrics }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Create the signals index. Safe to call when it already exists.
    pub async fn ensure_detection_index(&self) -> Result<(), ClientError> {
        self.call(
            Method::Post,
            DETECTION_INDEX_PATH,
            None,
            "create detection index",
        )
        .await?;
        Ok(())
    }

    /// Create detection rules from a raw JSON array of rule objects.
    ///
    /// Empty input is a no-op. Otherwise the detection index is ensured
    /// first; a failure there stops before any rule is sent.
    pub async fn bulk_create(&self, rules: &[u8]) -> Result<Vec<RuleIdOnly>, ClientError> {
        if rules.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_detection_index().await?;

        let body = self
            .call(
                Method::Post,
                BULK_CREATE_PATH,
                Some(rules.to_vec()),
                "bulk create rules",
            )
            .await?;

        let created: Vec<RuleIdOnly> =
            self.decode(&body, "unmarshal bulk create response")?;

        info!(count = created.len(), "Detection rules created");
        Ok(created)
    }

    /// Typed variant of [`bulk_create`](Self::bulk_create).
    pub async fn bulk_create_rules(
        &self,
        rules: &[DetectionRule],
    ) -> Result<Vec<RuleIdOnly>, ClientError> {
        if rules.is_empty() {
            return Ok(Vec::new());
        }

        let body = serde_json::to_vec(rules).map_err(|source| ClientError::Encode {
            action: "marshal detection rules",
            source,
        })?;

        self.bulk_create(&body).await
    }

    /// Delete detection rules by `rule_id`. Empty input is a no-op.
    pub async fn bulk_delete(&self, rules: &[RuleIdOnly]) -> Result<(), ClientError> {
        if rules.is_empty() {
            return Ok(());
        }

        let body = serde_json::to_vec(rules).map_err(|source| ClientError::Encode {
            action: "marshal bulk detection rules",
            source,
        })?;

        self.call(
            Method::Delete,
            BULK_DELETE_PATH,
            Some(body),
            "bulk delete rules",
        )
        .await?;

        info!(count = rules.len(), "Detection rules deleted");
        Ok(())
    }

    /// Search for open signals.
    pub async fn get_hits(&self) -> Result<SearchResult, ClientError> {
        let body = self
            .call(
                Method::Post,
                SIGNALS_SEARCH_PATH,
                Some(OPEN_SIGNALS_QUERY.as_bytes().to_vec()),
                "search for hits",
            )
            .await?;

        let result: SearchResult = self.decode(&body, "unmarshal search results")?;

        debug!(total = result.total(), returned = result.hits.hits.len(), "Open signals");
        Ok(result)
    }

    /// Close every open signal. The response body is not inspected.
    pub async fn close_signals(&self) -> Result<(), ClientError> {
        self.call(
            Method::Post,
            SIGNALS_STATUS_PATH,
            Some(CLOSE_OPEN_SIGNALS.as_bytes().to_vec()),
            "close signals",
        )
        .await?;
        Ok(())
    }

    /// Perform one round trip and classify the outcome.
    ///
    /// Returns the response body when the status is 200.
    async fn call(
        &self,
        method: Method,
        path: &'static str,
        body: Option<Vec<u8>>,
        action: &'static str,
    ) -> Result<Vec<u8>, ClientError> {
        let _timer = TimingGuard::new(&self.metrics);

        let result = match method {
            Method::Post => self.transport.post(path, body).await,
            Method::Delete => self.transport.delete(path, body).await,
        };

        let response = match result {
            Ok(response) => response,
            Err(source) => {
                self.metrics.record_outcome(CallOutcome::TransportError);
                warn!(path, error = %source, "Detection API call failed");
                return Err(ClientError::Transport { action, source });
            }
        };

        if response.status != STATUS_OK {
            self.metrics.record_outcome(CallOutcome::ApiError);
            let body = response.body_text();
            warn!(path, status = response.status, body = %body, "Detection API returned error status");
            return Err(ClientError::Api {
                action,
                status: response.status,
                body,
            });
        }

        self.metrics.record_outcome(CallOutcome::Ok);
        debug!(?method, path, status = response.status, "Detection API call succeeded");
        Ok(response.body)
    }

    fn decode<D: DeserializeOwned>(
        &self,
        body: &[u8],
        action: &'static str,
    ) -> Result<D, ClientError> {
        serde_json::from_slice(body).map_err(|source| {
            self.metrics.record_outcome(CallOutcome::DecodeError);
            ClientError::Decode { action, source }
        })
    }
}
