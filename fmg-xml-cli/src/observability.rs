//! Logging setup for the command-line runner.
//!
//! Logs go to stderr so stdout carries only the operation payload.

use std::io;

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log format configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format for interactive use.
    Pretty,
    /// JSON format for log aggregation.
    Json,
}

impl LogFormat {
    /// Determines log format from the `LOG_FORMAT` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("LOG_FORMAT").unwrap_or_default())
    }

    /// Maps `json` (any case) to [`Json`](Self::Json), anything else to
    /// [`Pretty`](Self::Pretty).
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") { Self::Json } else { Self::Pretty }
    }
}

/// Initializes structured logging.
///
/// # Environment Variables
///
/// - `LOG_FORMAT`: `json` or `pretty` (default: `pretty`)
/// - `RUST_LOG`: Log level filter (default: `default_level`)
///
/// The `fmg_error` target carries one event per failed operation.
pub fn init_observability(format: LogFormat, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => {
            subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_thread_names(false)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
        LogFormat::Json => {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_thread_names(false)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("unknown"), LogFormat::Pretty);
    }
}
