//! Configuration Module
//!
//! Loads settings from defaults, an optional JSON file and `CCSTATUS_*`
//! environment variables, then validates them.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::cache::Cache;
use crate::client::RetryPolicy;
use crate::error::ConfigError;

// == Log Level ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("logLevel must be DEBUG, INFO, WARN, or ERROR, got {s:?}")),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_directive().to_ascii_uppercase())
    }
}

/// Client configuration parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the status API
    pub api_base_url: String,
    /// Per-attempt timeout in milliseconds
    pub api_timeout_ms: u64,
    /// Total attempts per fetch, including the first
    pub max_attempts: u32,
    /// Backoff unit in milliseconds
    pub retry_delay_ms: u64,
    /// When false, every read goes to the network
    pub cache_enabled: bool,
    /// Default TTL in seconds for cached resources
    pub cache_ttl_secs: u64,
    /// Maximum number of cached resources
    pub cache_max_size: usize,
    pub log_level: LogLevel,
    /// Cap on incidents handed to the presentation layer
    pub max_incidents: usize,
    /// Cap on components handed to the presentation layer
    pub max_components: usize,
}

/// Subset of settings a config file may override.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileConfig {
    api_base_url: Option<String>,
    api_timeout: Option<u64>,
    max_retries: Option<u32>,
    retry_delay_ms: Option<u64>,
    cache_enabled: Option<bool>,
    cache_ttl_seconds: Option<u64>,
    cache_max_size: Option<usize>,
    log_level: Option<LogLevel>,
    max_incidents: Option<usize>,
    max_components: Option<usize>,
}

impl Config {
    /// Loads configuration the way the binary does.
    ///
    /// # Sources (later wins)
    /// 1. Defaults
    /// 2. First existing file of `./ccstatus.config.json`, `./.ccstatus.json`,
    ///    `$HOME/.config/ccstatus/config.json`
    /// 3. Environment variables
    ///
    /// Returns the config and the file it read, if any.
    pub fn load() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_from(&Self::search_paths(), |var| env::var(var).ok())
    }

    /// Same as [`Config::load`] with explicit file candidates and variable lookup.
    pub fn load_from<F>(
        candidates: &[PathBuf],
        lookup: F,
    ) -> Result<(Self, Option<PathBuf>), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let file = candidates.iter().find(|p| p.is_file()).cloned();
        if let Some(path) = &file {
            config.apply_file(path)?;
        }

        config.apply_env(lookup)?;
        config.validate()?;
        Ok((config, file))
    }

    /// Defaults plus environment variables, validated.
    ///
    /// # Environment Variables
    /// - `CCSTATUS_API_BASE_URL` - Status API base URL
    /// - `CCSTATUS_API_TIMEOUT` - Per-attempt timeout in ms (default: 10000)
    /// - `CCSTATUS_MAX_RETRIES` - Attempts per fetch (default: 3)
    /// - `CCSTATUS_RETRY_DELAY` - Backoff unit in ms (default: 1000)
    /// - `CCSTATUS_CACHE_ENABLED` - true/false (default: true)
    /// - `CCSTATUS_CACHE_TTL` - Default cache TTL in seconds (default: 300)
    /// - `CCSTATUS_CACHE_MAX_SIZE` - Maximum cached resources (default: 100)
    /// - `CCSTATUS_LOG_LEVEL` - DEBUG, INFO, WARN or ERROR (default: INFO)
    /// - `CCSTATUS_MAX_INCIDENTS` - (default: 50)
    /// - `CCSTATUS_MAX_COMPONENTS` - (default: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|var| env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("ccstatus.config.json"),
            PathBuf::from(".ccstatus.json"),
        ];
        if let Some(home) = env::var_os("HOME") {
            paths.push(Path::new(&home).join(".config/ccstatus/config.json"));
        }
        paths
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.api_timeout {
            self.api_timeout_ms = v;
        }
        if let Some(v) = file.max_retries {
            self.max_attempts = v;
        }
        if let Some(v) = file.retry_delay_ms {
            self.retry_delay_ms = v;
        }
        if let Some(v) = file.cache_enabled {
            self.cache_enabled = v;
        }
        if let Some(v) = file.cache_ttl_seconds {
            self.cache_ttl_secs = v;
        }
        if let Some(v) = file.cache_max_size {
            self.cache_max_size = v;
        }
        if let Some(v) = file.log_level {
            self.log_level = v;
        }
        if let Some(v) = file.max_incidents {
            self.max_incidents = v;
        }
        if let Some(v) = file.max_components {
            self.max_components = v;
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CCSTATUS_API_BASE_URL") {
            self.api_base_url = v;
        }
        parse_var(&lookup, "CCSTATUS_API_TIMEOUT", &mut self.api_timeout_ms)?;
        parse_var(&lookup, "CCSTATUS_MAX_RETRIES", &mut self.max_attempts)?;
        parse_var(&lookup, "CCSTATUS_RETRY_DELAY", &mut self.retry_delay_ms)?;
        parse_var(&lookup, "CCSTATUS_CACHE_TTL", &mut self.cache_ttl_secs)?;
        parse_var(&lookup, "CCSTATUS_CACHE_MAX_SIZE", &mut self.cache_max_size)?;
        parse_var(&lookup, "CCSTATUS_LOG_LEVEL", &mut self.log_level)?;
        parse_var(&lookup, "CCSTATUS_MAX_INCIDENTS", &mut self.max_incidents)?;
        parse_var(&lookup, "CCSTATUS_MAX_COMPONENTS", &mut self.max_components)?;

        if let Some(v) = lookup("CCSTATUS_CACHE_ENABLED") {
            self.cache_enabled = match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::Env {
                        var: "CCSTATUS_CACHE_ENABLED".to_string(),
                        value: v,
                    })
                }
            };
        }
        Ok(())
    }

    // == Validate ==
    /// Checks every rule and reports all failures at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        match Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push("apiBaseUrl must be a valid http(s) URL".to_string()),
        }
        if !(1_000..=60_000).contains(&self.api_timeout_ms) {
            errors.push("apiTimeout must be between 1000 and 60000ms".to_string());
        }
        if !(1..=10).contains(&self.max_attempts) {
            errors.push("maxRetries must be between 1 and 10".to_string());
        }
        if self.retry_delay_ms > 60_000 {
            errors.push("retryDelayMs must be at most 60000ms".to_string());
        }
        if self.cache_max_size < 1 {
            errors.push("cacheMaxSize must be at least 1".to_string());
        }
        if self.max_incidents < 1 {
            errors.push("maxIncidents must be at least 1".to_string());
        }
        if self.max_components < 1 {
            errors.push("maxComponents must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.retry_delay_ms),
            Duration::from_millis(self.api_timeout_ms),
        )
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Builds an empty cache sized and timed from this config.
    pub fn cache<T>(&self) -> Cache<T> {
        Cache::new(self.cache_max_size, self.cache_ttl())
    }
}

fn parse_var<F, T>(lookup: &F, var: &str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(value) = lookup(var) {
        *target = value.trim().parse().map_err(|_| ConfigError::Env {
            var: var.to_string(),
            value,
        })?;
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://status.anthropic.com/api/v2".to_string(),
            api_timeout_ms: 10_000,
            max_attempts: 3,
            retry_delay_ms: 1_000,
            cache_enabled: true,
            cache_ttl_secs: 300,
            cache_max_size: 100,
            log_level: LogLevel::Info,
            max_incidents: 50,
            max_components: 100,
        }
    }
}
