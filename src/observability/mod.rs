pub mod metrics;
pub mod tracing;

pub use metrics::{CallOutcome, MetricsRegistry, TimingGuard};
pub use tracing::init_tracing;
