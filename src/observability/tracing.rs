use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the CLI's log subscriber.
///
/// `default_level` comes from `--log-level`; a `RUST_LOG` directive wins
/// (e.g. `RUST_LOG=detectr::transport=debug` to see every detection API
/// call with its status). Logs go to stderr, command output to stdout.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();
}

/// Route client logs into the test harness output (idempotent).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("detectr=debug")
        .with_test_writer()
        .try_init();
}
