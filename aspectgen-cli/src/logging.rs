//! Tracing subscriber setup.
//!
//! Logging is off unless `ASPECTGEN_LOG` or `RUST_LOG` is set. Output goes
//! to stderr so it never mixes with dry-run content on stdout.

use tracing_subscriber::EnvFilter;

/// Variable holding the filter directives, read before `RUST_LOG`.
pub const LOG_ENV: &str = "ASPECTGEN_LOG";

fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber when logging was requested.
pub fn init_tracing() {
    if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    // A subscriber installed by an embedding process wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
