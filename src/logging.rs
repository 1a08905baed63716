use tracing::debug;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "blockswap=debug"
    } else {
        "blockswap=info"
    }
}

/// Initialize the tracing subscriber
///
/// Logs go to stderr so stdout only carries status lines.
/// `RUST_LOG` wins over `verbose` when it is set.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let result = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(verbose)
        .try_init();

    if let Err(e) = result {
        // Already initialized, e.g. when called twice from tests
        eprintln!("Warning: Logger initialization failed: {}", e);
        return;
    }

    debug!("blockswap v{} logging initialized", crate::version());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "blockswap=info");
        assert_eq!(default_filter(true), "blockswap=debug");
    }
}
