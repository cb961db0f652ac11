use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

/// Command line entry point.
#[derive(Debug, Parser)]
#[command(name = "detectr")]
#[command(about = "Manage detection rules and signals through the Kibana detection engine API")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the detection signals index if it does not exist
    EnsureIndex,

    /// Create detection rules from a YAML or JSON file
    Create {
        /// Rule file (a list of rules)
        path: PathBuf,
    },

    /// Delete detection rules by rule_id
    Delete {
        /// Take rule_ids from this rule file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Rule ids to delete
        rule_ids: Vec<String>,
    },

    /// List open signals and the rules that raised them
    Hits,

    /// Close every open signal
    CloseSignals,
}

/// Client configuration.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Kibana base URL
    #[arg(long, default_value = "http://127.0.0.1:5601", env = "DETECTR_KIBANA_URL")]
    pub kibana_url: String,

    /// Basic auth username (no auth if unset)
    #[arg(long, env = "DETECTR_USERNAME")]
    pub username: Option<String>,

    /// Basic auth password
    #[arg(long, env = "DETECTR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30", env = "DETECTR_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// Skip TLS certificate verification
    #[arg(long, env = "DETECTR_INSECURE")]
    pub insecure: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Print request metrics in Prometheus text format on exit
    #[arg(long, env = "DETECTR_PRINT_METRICS")]
    pub print_metrics: bool,
}

impl Config {
    /// Get request timeout as Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            kibana_url: "http://127.0.0.1:5601".to_string(),
            username: None,
            password: None,
            request_timeout_secs: 30,
            insecure: false,
            log_level: "info".to_string(),
            print_metrics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.kibana_url, "http://127.0.0.1:5601");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.username.is_none());
        assert!(!config.insecure);
    }

    #[test]
    fn test_parse_delete_command() {
        let cli = Cli::try_parse_from([
            "detectr",
            "--kibana-url",
            "https://kibana:5601",
            "--username",
            "elastic",
            "--request-timeout-secs",
            "5",
            "delete",
            "r1",
            "r2",
        ])
        .unwrap();

        assert_eq!(cli.config.kibana_url, "https://kibana:5601");
        assert_eq!(cli.config.username.as_deref(), Some("elastic"));
        assert_eq!(cli.config.request_timeout(), Duration::from_secs(5));

        match cli.command {
            Command::Delete { file, rule_ids } => {
                assert!(file.is_none());
                assert_eq!(rule_ids, vec!["r1", "r2"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_close_signals() {
        let cli = Cli::try_parse_from(["detectr", "close-signals"]).unwrap();
        assert!(matches!(cli.command, Command::CloseSignals));
    }
}
