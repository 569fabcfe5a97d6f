use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Invalid {field} URL: {value}. Must start with http:// or https://")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Invalid relay port: 0")]
    InvalidPort,

    #[error("Invalid debounce_ms: {0}. Must be at most 10000")]
    InvalidDebounce(u64),

    #[error("Invalid min_query_len: 0. Must be at least 1")]
    InvalidMinQueryLen,

    #[error("Summarizer model cannot be empty")]
    EmptyModel,

    #[error("Invalid max_report_chars: 0. Must be at least 1")]
    InvalidMaxReportChars,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .negin/config.yaml (project config)
    /// 3. .negin/local.yaml (local overrides, optional)
    /// 4. Environment variables (NEGIN_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".negin/config.yaml"))
            .merge(Yaml::file(".negin/local.yaml"))
            .merge(Env::prefixed("NEGIN_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring NEGIN_* overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("NEGIN_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if !["daily", "hourly", "never"].contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        for (field, value) in [
            ("gateway", &config.gateway.base_url),
            ("upstream", &config.upstream.base_url),
            ("summarizer", &config.summarizer.base_url),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    field,
                    value: value.clone(),
                });
            }
        }

        if config.relay.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if config.search.debounce_ms > 10_000 {
            return Err(ConfigError::InvalidDebounce(config.search.debounce_ms));
        }

        if config.search.min_query_len == 0 {
            return Err(ConfigError::InvalidMinQueryLen);
        }

        if config.summarizer.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if config.summarizer.max_report_chars == 0 {
            return Err(ConfigError::InvalidMaxReportChars);
        }

        Ok(())
    }
}
