//! Service configuration, read from the environment (and a `.env` file if present).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};

use crate::backend::{OpenAIClient, openai::DEFAULT_BASE_URL};
use crate::error::{FitcheckError, Result};
use crate::logging::LogLevel;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_UPLOAD_MB: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub openai_temperature: f32,
    pub openai_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub log_level: String,
}

/// Read a `.env` file from the working directory, if there is one.
///
/// Variables already set in the environment win. Returns the file that was loaded.
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Level to start logging at, read from `LOG_LEVEL` before the rest of the configuration.
///
/// Unknown values fall back to `info`; the problem is returned alongside so it can be
/// logged once the subscriber is installed.
pub fn startup_log_level<F>(lookup: F) -> (LogLevel, Option<String>)
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("LOG_LEVEL") {
        Some(raw) if !raw.trim().is_empty() => match raw.parse::<LogLevel>() {
            Ok(level) => (level, None),
            Err(e) => (LogLevel::Info, Some(format!("Invalid LOG_LEVEL: {e}; using info"))),
        },
        _ => (LogLevel::Info, None),
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {} value '{}'; using default.", name, value);
            default
        }),
        None => default,
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first. Invalid values are logged
    /// and replaced by defaults, so install logging before calling this.
    pub fn from_env() -> Result<Self> {
        if let Some(path) = load_env_file() {
            debug!("Environment file {} loaded", path.display());
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |name: &str, default: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let openai_api_key = lookup("OPEN_AI_TOKEN")
            .or_else(|| lookup("OPENAI_API_KEY"))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                FitcheckError::ConfigError(
                    "OPEN_AI_TOKEN (or OPENAI_API_KEY) must be set".to_string(),
                )
            })?;

        let max_upload_mb = parse_or(
            "MAX_UPLOAD_MB",
            lookup("MAX_UPLOAD_MB"),
            DEFAULT_MAX_UPLOAD_MB,
        );

        Ok(Self {
            openai_api_key,
            openai_model: string("OPENAI_MODEL", DEFAULT_MODEL),
            openai_base_url: string("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            openai_temperature: parse_or("OPENAI_TEMPERATURE", lookup("OPENAI_TEMPERATURE"), 0.0),
            openai_timeout: Duration::from_secs(parse_or(
                "OPENAI_TIMEOUT_SECS",
                lookup("OPENAI_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )),
            host: string("HOST", DEFAULT_HOST),
            port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT),
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            log_level: string("LOG_LEVEL", "info"),
        })
    }

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| FitcheckError::ConfigError(format!("Invalid HOST/PORT: {e}")))
    }

    /// Build the OpenAI client described by this configuration.
    pub fn openai_client(&self) -> Result<OpenAIClient> {
        Ok(OpenAIClient::new(self.openai_api_key.clone())?
            .model(self.openai_model.as_str())
            .base_url(self.openai_base_url.as_str())
            .temperature(self.openai_temperature)
            .timeout(self.openai_timeout)
            .build())
    }
}
