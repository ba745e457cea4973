use dotenv::dotenv;
use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use url::Url;

use crate::charts::{clamp_top_n, DEFAULT_TOP_SALESPEOPLE};

/// Endpoint serving the sales dataset
pub const DEFAULT_API_URL: &str = "https://labdados.com/produtos";
pub const DEFAULT_LOG_DIR: &str = "./logs";

pub const API_URL_VAR: &str = "SALES_API_URL";
pub const LOG_DIR_VAR: &str = "SALES_LOG_DIR";
pub const TOP_N_VAR: &str = "SALES_TOP_N";
pub const DEBUG_VAR: &str = "DEBUG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SALES_API_URL is not a valid URL ({value}): {source}")]
    InvalidUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("SALES_API_URL must be an http(s) URL, got {0}")]
    UnsupportedScheme(String),
    #[error("SALES_TOP_N is not a number ({value}): {source}")]
    InvalidTopN {
        value: String,
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: Url,
    pub log_dir: PathBuf,
    pub top_n: usize,
    pub debug: bool,
}

/// Initializes the application configuration from `.env` and the process
/// environment
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = config_from(|key| env::var(key).ok())?;
    tracing::debug!(api_url = %config.api_url, log_dir = %config.log_dir.display(), "Resolved configuration");
    Ok(config)
}

/// Builds the configuration from any key lookup; unset keys fall back to
/// defaults.
pub fn config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
    let api_url = parse_api_url(
        lookup(API_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .as_deref()
            .unwrap_or(DEFAULT_API_URL),
    )?;

    let log_dir = lookup(LOG_DIR_VAR)
        .filter(|value| !value.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_LOG_DIR), PathBuf::from);

    let top_n = match lookup(TOP_N_VAR) {
        Some(value) if !value.trim().is_empty() => {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|source| ConfigError::InvalidTopN {
                    value: value.clone(),
                    source,
                })?;
            clamp_top_n(parsed)
        }
        _ => DEFAULT_TOP_SALESPEOPLE,
    };

    let debug = lookup(DEBUG_VAR).is_some_and(|value| matches!(value.trim(), "1" | "true"));

    Ok(AppConfig {
        api_url,
        log_dir,
        top_n,
        debug,
    })
}

fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(value.to_string())),
    }
}
