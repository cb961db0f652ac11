use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// How a single API call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Ok,
    TransportError,
    ApiError,
    DecodeError,
}

/// Metrics registry for API calls made by the client.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Total API calls attempted
    pub requests_total: AtomicU64,

    /// API calls by outcome
    pub requests_ok: AtomicU64,
    pub transport_errors: AtomicU64,
    pub api_errors: AtomicU64,
    pub decode_errors: AtomicU64,

    /// Call latency buckets
    pub latency_under_50ms: AtomicU64,
    pub latency_50_250ms: AtomicU64,
    pub latency_250ms_1s: AtomicU64,
    pub latency_1_5s: AtomicU64,
    pub latency_over_5s: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    /// Record a call outcome.
    ///
    /// A decode error follows an ok transport outcome for the same call, so
    /// it is counted separately and does not bump `requests_total`.
    pub fn record_outcome(&self, outcome: CallOutcome) {
        match outcome {
            CallOutcome::Ok => {
                self.requests_total.fetch_add(1, Ordering::Relaxed);
                self.requests_ok.fetch_add(1, Ordering::Relaxed);
            }
            CallOutcome::TransportError => {
                self.requests_total.fetch_add(1, Ordering::Relaxed);
                self.transport_errors.fetch_add(1, Ordering::Relaxed);
            }
            CallOutcome::ApiError => {
                self.requests_total.fetch_add(1, Ordering::Relaxed);
                self.api_errors.fetch_add(1, Ordering::Relaxed);
            }
            CallOutcome::DecodeError => {
                self.decode_errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record call latency.
    pub fn record_latency(&self, start: Instant) {
        let millis = start.elapsed().as_millis() as u64;

        if millis < 50 {
            self.latency_under_50ms.fetch_add(1, Ordering::Relaxed);
        } else if millis < 250 {
            self.latency_50_250ms.fetch_add(1, Ordering::Relaxed);
        } else if millis < 1000 {
            self.latency_250ms_1s.fetch_add(1, Ordering::Relaxed);
        } else if millis < 5000 {
            self.latency_1_5s.fetch_add(1, Ordering::Relaxed);
        } else {
            self.latency_over_5s.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP detectr_requests_total Total detection API calls
# TYPE detectr_requests_total counter
detectr_requests_total {}

# HELP detectr_requests Detection API calls by outcome
# TYPE detectr_requests counter
detectr_requests{{outcome="ok"}} {}
detectr_requests{{outcome="transport_error"}} {}
detectr_requests{{outcome="api_error"}} {}

# HELP detectr_decode_errors_total Responses that failed to decode
# TYPE detectr_decode_errors_total counter
detectr_decode_errors_total {}

# HELP detectr_request_latency_bucket Detection API call latency histogram
# TYPE detectr_request_latency_bucket counter
detectr_request_latency_bucket{{le="0.05"}} {}
detectr_request_latency_bucket{{le="0.25"}} {}
detectr_request_latency_bucket{{le="1"}} {}
detectr_request_latency_bucket{{le="5"}} {}
detectr_request_latency_bucket{{le="+Inf"}} {}
"#,
            self.requests_total.load(Ordering::Relaxed),
            self.requests_ok.load(Ordering::Relaxed),
            self.transport_errors.load(Ordering::Relaxed),
            self.api_errors.load(Ordering::Relaxed),
            self.decode_errors.load(Ordering::Relaxed),
            self.latency_under_50ms.load(Ordering::Relaxed),
            self.latency_50_250ms.load(Ordering::Relaxed),
            self.latency_250ms_1s.load(Ordering::Relaxed),
            self.latency_1_5s.load(Ordering::Relaxed),
            self.latency_over_5s.load(Ordering::Relaxed),
        )
    }
}

/// Guard for timing operations.
pub struct TimingGuard<'a> {
    registry: &'a MetricsRegistry,
    start: Instant,
}

impl<'a> TimingGuard<'a> {
    pub fn new(registry: &'a MetricsRegistry) -> Self {
        TimingGuard {
            registry,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for TimingGuard<'a> {
    fn drop(&mut self) {
        self.registry.record_latency(self.start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcome() {
        let metrics = MetricsRegistry::new();

        metrics.record_outcome(CallOutcome::Ok);
        metrics.record_outcome(CallOutcome::Ok);
        metrics.record_outcome(CallOutcome::ApiError);
        metrics.record_outcome(CallOutcome::DecodeError);

        assert_eq!(metrics.requests_total.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.requests_ok.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.api_errors.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.decode_errors.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_timing_guard() {
        let metrics = MetricsRegistry::new();

        {
            let _guard = TimingGuard::new(&metrics);
        }

        assert_eq!(metrics.latency_under_50ms.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_prometheus_format() {
        let metrics = MetricsRegistry::new();
        metrics.record_outcome(CallOutcome::TransportError);

        let output = metrics.to_prometheus();

        assert!(output.contains("detectr_requests_total 1"));
        assert!(output.contains("detectr_requests{outcome=\"transport_error\"} 1"));
    }
}
