use tracing_subscriber::{EnvFilter, fmt};

/// Install the global `tracing` subscriber for a CLI run.
///
/// Logs go to stderr so that stdout stays free for reports. `RUST_LOG` wins when
/// set; otherwise `info`, or `debug` when `verbose` is on.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. from tests driving `main`-like code) is harmless.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
