#[allow(clippy::module_inception)]
mod config;

pub use config::{
    config_from, init_app_config, AppConfig, ConfigError, API_URL_VAR, DEBUG_VAR,
    DEFAULT_API_URL, DEFAULT_LOG_DIR, LOG_DIR_VAR, TOP_N_VAR,
};
