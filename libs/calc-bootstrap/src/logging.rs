//! Global `tracing` subscriber setup.

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Installs the process-wide subscriber and bridges `log` records into it.
///
/// `RUST_LOG` wins over `logging.level` when set. Output goes to stderr so
/// that stdout stays clean for `--print-config` and `openapi`.
///
/// # Errors
/// Returns an error if a global subscriber or logger is already installed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(&config.level);
    let registry = Registry::default().with(filter);

    match config.format {
        LogFormat::Text => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().with_writer(std::io::stderr).with_target(true)),
        ),
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(false),
            ),
        ),
    }
    .context("failed to install tracing subscriber")?;

    tracing_log::LogTracer::init().context("failed to bridge log records")?;

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|e| {
            eprintln!("invalid log level '{level}' ({e}), falling back to 'info'");
            EnvFilter::new("info")
        })
}
