pub mod client;
pub mod config;
pub mod domain;
pub mod observability;
pub mod rules;
pub mod transport;

pub use client::{ClientError, ErrorKind, RulesClient};
pub use config::Config;
pub use domain::{DetectionRule, RuleIdOnly, RuleNameOnly, SearchResult};
pub use transport::{ApiResponse, HttpTransport, Transport, TransportError};
