//! Process-wide logging setup.
//!
//! The subscriber is installed once from `main` before any pipeline step runs;
//! every other module only uses the `tracing` macros.

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::VerbosityLevel;

/// Log level used when neither `-v` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Filter directive for the given verbosity.
pub fn level_for(verbosity: VerbosityLevel) -> &'static str {
    match verbosity {
        VerbosityLevel::Normal => DEFAULT_LOG_LEVEL,
        VerbosityLevel::Verbose => "debug",
    }
}

/// Install the global fmt subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag when it is set.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_logging(verbosity: VerbosityLevel) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;

    if verbosity == VerbosityLevel::Verbose {
        debug!("Verbose mode activated");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(VerbosityLevel::Normal), "info");
        assert_eq!(level_for(VerbosityLevel::Verbose), "debug");
    }

    #[test]
    fn test_second_initialization_fails() {
        // Another test may have installed the subscriber first; either way the
        // second call in this test must be rejected.
        let _ = init_logging(VerbosityLevel::Normal);
        assert!(init_logging(VerbosityLevel::Verbose).is_err());
    }
}
