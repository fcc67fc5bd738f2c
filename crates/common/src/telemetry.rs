use tracing_subscriber::EnvFilter;

/// Install the global JSON tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise everything logs at `debug` when
/// `verbose` is set and at `info` when it is not.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    tracing::debug!("Logger initialization successful");
}
