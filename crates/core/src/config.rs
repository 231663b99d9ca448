//! Configuration management
//!
//! This module handles loading the shell configuration file.
//! The configuration file is TOML with a `[storage]` section describing the
//! endpoint and credentials, and an optional `[shell]` section.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Storage endpoint and credentials
    pub storage: StorageConfig,

    /// Interactive shell settings
    #[serde(default)]
    pub shell: ShellSettings,
}

/// Connection settings for the S3-compatible endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Endpoint, either `host:port` or a full URL
    pub endpoint: String,

    /// Access key ID
    #[serde(default)]
    pub access_key: String,

    /// Secret access key
    #[serde(default)]
    pub secret_key: String,

    /// Use https when the endpoint has no scheme
    #[serde(default)]
    pub use_ssl: bool,

    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,

    /// Bucket lookup style: "auto", "path", or "dns"
    #[serde(default = "default_bucket_lookup")]
    pub bucket_lookup: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket_lookup() -> String {
    "auto".to_string()
}

impl StorageConfig {
    /// Create a new storage config with required fields
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            use_ssl: false,
            region: default_region(),
            bucket_lookup: default_bucket_lookup(),
        }
    }

    /// Resolve the endpoint into a URL, adding a scheme from `use_ssl` if missing
    pub fn endpoint_url(&self) -> Result<Url> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(Error::Config("storage.endpoint cannot be empty".into()));
        }

        let url = if endpoint.contains("://") {
            Url::parse(endpoint)?
        } else {
            let scheme = if self.use_ssl { "https" } else { "http" };
            Url::parse(&format!("{scheme}://{endpoint}"))?
        };
        Ok(url)
    }

    /// Whether requests should use path-style addressing
    pub fn force_path_style(&self) -> bool {
        self.bucket_lookup == "path" || self.bucket_lookup == "auto"
    }

    fn validate(&self) -> Result<()> {
        self.endpoint_url()?;
        match self.bucket_lookup.as_str() {
            "auto" | "path" | "dns" => Ok(()),
            other => Err(Error::Config(format!(
                "storage.bucket_lookup must be one of auto, path, dns (got '{other}')"
            ))),
        }
    }
}

/// Color mode for shell output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when attached to a terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// Settings for the interactive shell
#[derive(Debug, Clone, Deserialize)]
pub struct ShellSettings {
    /// Show the current time in the prompt
    #[serde(default = "default_true")]
    pub timestamp_prompt: bool,

    /// Color mode
    #[serde(default)]
    pub color: ColorMode,

    /// Ask for confirmation before `rm` deletes anything
    #[serde(default)]
    pub confirm_remove: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            timestamp_prompt: true,
            color: ColorMode::Auto,
            confirm_remove: false,
        }
    }
}

/// Configuration manager handles locating and loading config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager for an explicit path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Locate the configuration file
    ///
    /// An explicitly requested path is always used as-is. The default
    /// `config.toml` falls back to `<config dir>/rsh/config.toml` when it
    /// does not exist in the working directory.
    pub fn discover(requested: &Path) -> Self {
        if requested == Path::new(DEFAULT_CONFIG_FILE) && !requested.exists() {
            if let Some(dir) = dirs::config_dir() {
                let fallback = dir.join("rsh").join(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    tracing::debug!("Using configuration from {}", fallback.display());
                    return Self::with_path(fallback);
                }
            }
        }
        Self::with_path(requested)
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load and validate configuration from disk
    ///
    /// Unlike tools with optional configuration, the shell cannot run
    /// without an endpoint, so a missing file is an error.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {}",
                self.config_path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;
        config.storage.validate()?;

        Ok(config)
    }
}
