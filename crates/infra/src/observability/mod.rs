//! Logging setup
//!
//! The connector emits `tracing` events everywhere; hosts that do not install
//! their own subscriber can call [`init_tracing`] once at startup. The filter
//! comes from `RUST_LOG` and defaults to `info`.

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human-readable output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Install a global fmt subscriber.
///
/// Returns `false` when a global subscriber was already set, in which case
/// nothing changes.
pub fn init_tracing(format: LogFormat) -> bool {
    let filter = env_filter();
    let installed = match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).pretty().try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(%format, "tracing subscriber installed");
    }
    installed.is_ok()
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
