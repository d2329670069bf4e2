//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--verbose` (debug) or `--quiet` (error)
//! 2. `FOLDERMON_LOG` environment variable (any `EnvFilter` directive)
//! 3. default to `warn`, keeping the interactive session readable

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FOLDERMON_LOG";

/// Picks the filter directive from the CLI flags and environment.
#[must_use]
pub fn filter_directive(verbose: bool, quiet: bool, env: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    if quiet {
        return "error".to_string();
    }
    match env.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ => "warn".to_string(),
    }
}

/// Initialise the global logging subscriber, writing to stderr.
///
/// Call once at startup.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a subscriber is
/// already installed.
pub fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(verbose, quiet, env.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{directive}': {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_win_over_env() {
        assert_eq!(filter_directive(true, false, Some("trace")), "debug");
        assert_eq!(filter_directive(false, true, Some("trace")), "error");
    }

    #[test]
    fn test_env_and_default() {
        assert_eq!(
            filter_directive(false, false, Some("foldermon=trace")),
            "foldermon=trace"
        );
        assert_eq!(filter_directive(false, false, Some("  ")), "warn");
        assert_eq!(filter_directive(false, false, None), "warn");
    }
}
