//! Runtime configuration.
//!
//! Resolved once at startup from the process environment (and a `.env` file,
//! if present), then passed into the services. Nothing reads environment
//! variables after this point.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::analysis::analyzer::{DEFAULT_NEGATION_WINDOW, DEFAULT_PAIN_ALERT_THRESHOLD};
use crate::analysis::AnalyzerConfig;
use crate::error::AppError;

pub const DEFAULT_DB_PATH: &str = "post_care_db.sqlite";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const ENV_DB_PATH: &str = "SQLITE_DB_PATH";
const ENV_MAX_CONNECTIONS: &str = "POSTCARE_MAX_CONNECTIONS";
const ENV_NEGATION_WINDOW: &str = "POSTCARE_NEGATION_WINDOW";
const ENV_PAIN_ALERT_THRESHOLD: &str = "POSTCARE_PAIN_ALERT_THRESHOLD";
const ENV_LOG_FORMAT: &str = "POSTCARE_LOG_FORMAT";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "{} must be 'pretty' or 'json', got '{}'",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

/// Configuration resolved at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub analyzer: AnalyzerConfig,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            analyzer: AnalyzerConfig::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any) and read the configuration from the environment
    pub fn load() -> Result<Self, AppError> {
        // A missing .env file is not an error
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Read the configuration from the current environment only
    pub fn from_env() -> Result<Self, AppError> {
        let database_path = env::var(ENV_DB_PATH)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let max_connections = parse_var(ENV_MAX_CONNECTIONS, DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(AppError::Config(format!(
                "{} must be at least 1",
                ENV_MAX_CONNECTIONS
            )));
        }

        let analyzer = AnalyzerConfig {
            negation_window: parse_var(ENV_NEGATION_WINDOW, DEFAULT_NEGATION_WINDOW)?,
            pain_alert_threshold: parse_var(ENV_PAIN_ALERT_THRESHOLD, DEFAULT_PAIN_ALERT_THRESHOLD)?,
        };
        validator::Validate::validate(&analyzer)
            .map_err(|e| AppError::Config(format!("Invalid analyzer settings: {}", e)))?;

        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => LogFormat::default(),
        };

        Ok(Self {
            database_path,
            max_connections,
            analyzer,
            log_format,
        })
    }

    /// SQLite connection URL for the configured database file
    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.database_path.to_string_lossy())
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid value for {}: '{}' ({})", name, raw, e))),
        _ => Ok(default),
    }
}
