//! Logging configuration for quickrag
//!
//! Console output goes to stderr so stdout only carries the prompt and the answer.

use std::path::Path;

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::config::LoggingConfig;
use crate::Result;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "quickrag.log";

fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("warn,quickrag={level}"))
}

/// Build the filter for `level`, letting `RUST_LOG` win when it is set
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| crate_filter(level))
}

/// Filter for the binary: `--verbose` beats `RUST_LOG`, which beats the config
fn startup_filter(level: &str, verbose: bool) -> EnvFilter {
    if verbose {
        crate_filter("debug")
    } else {
        env_filter(level)
    }
}

/// Initialize logging from the `[logging]` config section.
///
/// `verbose` forces the `debug` level regardless of the configured one and of
/// `RUST_LOG`.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { config.level.as_str() };

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let file_layer = if config.file_output {
        let logs_dir = Path::new(LOG_DIR);
        if !logs_dir.exists() {
            std::fs::create_dir_all(logs_dir)?;
        }

        let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // The guard flushes on drop; logging lives as long as the process.
        std::mem::forget(guard);

        Some(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(non_blocking)
                .with_ansi(false),
        )
    } else {
        None
    };

    Registry::default()
        .with(startup_filter(level, verbose))
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Logging initialized with level: {}", level);
    if config.file_output {
        tracing::debug!("Log files will be saved to: {}/{}.YYYY-MM-DD", LOG_DIR, LOG_FILE);
    }

    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_logging_is_idempotent() {
        init_simple_logging();
        init_simple_logging();
        tracing::info!("still alive");
    }

    #[test]
    fn test_verbose_ignores_rust_log() {
        // Same result whatever RUST_LOG the runner was started with
        let filter = startup_filter("warn", true).to_string().to_lowercase();
        assert!(filter.contains("quickrag=debug"));
    }

    #[test]
    fn test_crate_filter_uses_level() {
        let filter = crate_filter("trace").to_string().to_lowercase();
        assert!(filter.contains("quickrag=trace"));
        assert!(filter.contains("warn"));
    }
}
