//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given verbosity.
///
/// Library crates follow the requested level; dependencies stay at `warn`.
pub(crate) fn directive(verbose: u8, quiet: bool) -> String {
    let level = match (quiet, verbose) {
        (true, _) => return "error".to_string(),
        (false, 0) => return "warn".to_string(),
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    format!("warn,secfetch={level},secfetch_data={level},secfetch_output={level}")
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the command-line verbosity.
pub(crate) fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbose, quiet)));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false, "warn")]
    #[case(3, true, "error")]
    #[case(1, false, "warn,secfetch=debug,secfetch_data=debug,secfetch_output=debug")]
    #[case(2, false, "warn,secfetch=trace,secfetch_data=trace,secfetch_output=trace")]
    fn test_directive(#[case] verbose: u8, #[case] quiet: bool, #[case] expected: &str) {
        assert_eq!(directive(verbose, quiet), expected);
        assert!(EnvFilter::try_new(expected).is_ok());
    }
}
