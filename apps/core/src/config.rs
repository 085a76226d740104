use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;
use crate::matcher::selector::{MatchPolicy, DEFAULT_CONFIDENCE_THRESHOLD};

pub const ENV_CATALOG_PATH: &str = "LUNARA_CATALOG_PATH";
pub const ENV_CONFIDENCE_THRESHOLD: &str = "LUNARA_CONFIDENCE_THRESHOLD";
pub const ENV_SHORT_INPUT_GUARD: &str = "LUNARA_SHORT_INPUT_GUARD";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "LUNARA_REQUEST_TIMEOUT_MS";
pub const ENV_LOG_FORMAT: &str = "LUNARA_LOG_FORMAT";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Bunyan,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "bunyan" => Ok(LogFormat::Bunyan),
            other => Err(AppError::Config(format!(
                "{} must be pretty, json or bunyan, got '{}'",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// Every setting has a default, so an empty environment yields the
/// storefront's standard behaviour with the embedded catalog.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog file to load instead of the embedded one.
    pub catalog_path: Option<PathBuf>,
    /// Selector tunables.
    pub policy: MatchPolicy,
    /// How long a caller waits on the session supervisor.
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            policy: MatchPolicy::default(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `LUNARA_CATALOG_PATH`: JSON intent catalog (default: embedded catalog)
    /// - `LUNARA_CONFIDENCE_THRESHOLD`: minimum winning score, at least 1 (default: 10)
    /// - `LUNARA_SHORT_INPUT_GUARD`: `true`/`false` (default: true)
    /// - `LUNARA_REQUEST_TIMEOUT_MS`: supervisor request timeout (default: 5000)
    /// - `LUNARA_LOG_FORMAT`: `pretty`, `json` or `bunyan` (default: pretty)
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let catalog_path = read_var(ENV_CATALOG_PATH).map(PathBuf::from);

        let confidence_threshold = match read_var(ENV_CONFIDENCE_THRESHOLD) {
            Some(raw) => {
                let value: u32 = parse_var(ENV_CONFIDENCE_THRESHOLD, &raw)?;
                if value == 0 {
                    return Err(AppError::Config(format!(
                        "{} must be at least 1",
                        ENV_CONFIDENCE_THRESHOLD
                    )));
                }
                value
            }
            None => DEFAULT_CONFIDENCE_THRESHOLD,
        };

        let short_input_guard = match read_var(ENV_SHORT_INPUT_GUARD) {
            Some(raw) => parse_bool(ENV_SHORT_INPUT_GUARD, &raw)?,
            None => defaults.policy.short_input_guard,
        };

        let request_timeout = match read_var(ENV_REQUEST_TIMEOUT_MS) {
            Some(raw) => Duration::from_millis(parse_var(ENV_REQUEST_TIMEOUT_MS, &raw)?),
            None => defaults.request_timeout,
        };

        let log_format = match read_var(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            catalog_path,
            policy: MatchPolicy {
                confidence_threshold,
                short_input_guard,
                ..defaults.policy
            },
            request_timeout,
            log_format,
        })
    }
}

/// Reads a variable, treating unset and blank the same.
fn read_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", name, raw, e)))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{} must be true or false, got '{}'",
            name, raw
        ))),
    }
}
