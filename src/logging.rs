//! Logging setup for the fitcheck service.
//!
//! Built on `tracing` and `tracing-subscriber`. The `FITCHECK_LOG` environment variable, when
//! set, takes precedence over the level passed in code.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "FITCHECK_LOG";

/// Log levels understood by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

fn default_filter(level: LogLevel) -> String {
    format!("fitcheck={}", level.to_tracing_level())
}

/// Initialize logging at the given level.
///
/// Call once at startup. Later calls are ignored.
///
/// ```no_run
/// use fitcheck::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// tracing::debug!("visible");
/// ```
///
/// `FITCHECK_LOG=fitcheck=trace` overrides the level given here.
pub fn init_logging(level: LogLevel) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("fitcheck logging initialized at level: {:?}", level);
    }
}

/// Initialize logging with a custom filter directive, e.g. `"fitcheck=debug,axum=info"`.
pub fn init_logging_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| {
        eprintln!("Invalid log filter '{filter}', falling back to fitcheck=info");
        EnvFilter::new(default_filter(LogLevel::Info))
    });

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("fitcheck logging initialized with custom filter: {}", filter);
    }
}
