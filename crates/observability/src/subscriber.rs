//! Subscriber construction.
//!
//! Filter comes from `RUST_LOG` (default `info`). Output is JSON unless
//! `POOLQUOTE_LOG_FORMAT=pretty`, which is easier to read when running the
//! normalizer by hand.

use tracing_subscriber::EnvFilter;

const FORMAT_VAR: &str = "POOLQUOTE_LOG_FORMAT";
const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" | "text" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset or invalid.
    pub default_directive: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            default_directive: DEFAULT_DIRECTIVE.to_string(),
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        let format = std::env::var(FORMAT_VAR)
            .ok()
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        Self {
            format,
            ..Self::default()
        }
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(settings: LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
