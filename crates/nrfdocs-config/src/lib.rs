#![deny(unsafe_code)]

//! Configuration loading, validation, and credential resolution for nrfdocs.
//!
//! Loads TOML configuration files and validates them against expected schemas.
//! Provides the [`AppConfig`] type as the central configuration structure,
//! and the [`secret`] module for handling the upstream API credential.

/// API credential handling — environment loading and zeroization.
pub mod secret;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use secret::ApiKey;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("missing credential: environment variable {0} is not set or empty")]
    MissingCredential(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream answering API configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for the upstream completions API.
///
/// The API key itself is never stored in the config file. Only the name of
/// the environment variable holding it is configurable; the value is read
/// at startup via [`UpstreamConfig::resolve_api_key`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the bearer credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "sonar".to_string()
}

fn default_base_url() -> String {
    "https://api.perplexity.ai".to_string()
}

fn default_api_key_env() -> String {
    "PERPLEXITY_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl UpstreamConfig {
    /// Resolve the bearer credential from the environment.
    ///
    /// The variable named by `api_key_env` must be set and non-empty;
    /// otherwise startup must abort with [`ConfigError::MissingCredential`].
    pub fn resolve_api_key(&self) -> Result<ApiKey, ConfigError> {
        api_key_from_value(&self.api_key_env, std::env::var(&self.api_key_env).ok())
    }
}

/// Build an [`ApiKey`] from an environment lookup result.
///
/// Split out from [`UpstreamConfig::resolve_api_key`] so the unset/empty
/// handling is testable without mutating the process environment.
fn api_key_from_value(var_name: &str, value: Option<String>) -> Result<ApiKey, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(ApiKey::new(v)),
        _ => Err(ConfigError::MissingCredential(var_name.to_string())),
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.model.is_empty() {
            return Err(ConfigError::Validation(
                "upstream.model must not be empty".to_string(),
            ));
        }
        if self.upstream.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "upstream.base_url must not be empty".to_string(),
            ));
        }
        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "upstream.base_url must be an http(s) URL, got {:?}",
                self.upstream.base_url
            )));
        }
        if self.upstream.api_key_env.is_empty() {
            return Err(ConfigError::Validation(
                "upstream.api_key_env must not be empty".to_string(),
            ));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "upstream.timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
