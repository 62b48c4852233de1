//! Centralized logging initialization with environment variable support

use crate::{AppConfig, LogFormat};
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing subscriber with environment variable support
///
/// Environment variables (in priority order):
/// - `RUST_LOG`: Standard Rust log filter (takes precedence over all)
/// - `LOG_LEVEL`: Set log level (trace, debug, info, warn, error)
/// - `LOG_FORMAT`: Override format (json, pretty)
///
/// # Examples
///
/// ```bash
/// # See every rewritten clause
/// LOG_LEVEL=debug rehome fix --dry-run
///
/// # Structured logs for CI
/// LOG_FORMAT=json rehome fix --check
///
/// # Module-specific filtering
/// RUST_LOG=rehome_core::quote_repair=debug rehome repair
/// ```
pub fn initialize(config: &AppConfig) {
    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse().ok())
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(tracing::Level::WARN);

    // RUST_LOG directives are kept; the level acts as the default
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|f| match f.to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" | "human" => Some(LogFormat::Pretty),
            _ => None,
        })
        .unwrap_or_else(|| config.logging.format.clone());

    // Always write to stderr to keep stdout clean for reports
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Create a span for processing a single file
///
/// All logs emitted while the span is entered carry the file path, so the
/// engine itself never needs to know which file it is working on.
///
/// # Example
///
/// ```rust
/// use rehome_config::logging::file_span;
/// use std::path::Path;
///
/// let span = file_span(Path::new("src/routes/index.tsx"));
/// let _enter = span.enter();
/// tracing::debug!("Rewriting imports");
/// ```
pub fn file_span(path: &Path) -> tracing::Span {
    tracing::info_span!("file", path = %path.display())
}
