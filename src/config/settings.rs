//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub rebuild: RebuildConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub token: String,
    /// Public base URL Telegram posts webhook updates to. Polling is used when unset.
    pub domain: Option<String>,
    /// Shared secret accepted by `/auth`
    pub admin_secret: String,
    pub listen_addr: SocketAddr,
    pub reply_timeout_seconds: u64,
}

/// Persisted document locations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub users_path: PathBuf,
    pub lessons_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    pub file_path: Option<String>,
}

/// Self-rebuild configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RebuildConfig {
    pub enabled: bool,
    pub work_dir: PathBuf,
    pub build_command: Vec<String>,
    pub timeout_seconds: u64,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from the named file (extension optional) and environment variables
    pub fn from_file(name: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix("LESSONBOT")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("rebuild.build_command")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::LessonBotError> {
        super::validation::validate_settings(self)
    }
}

impl BotConfig {
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_seconds)
    }

    /// Public URL Telegram should post updates to, when a domain is configured
    pub fn webhook_url(&self) -> Result<Option<url::Url>, url::ParseError> {
        match self.domain.as_deref() {
            Some(domain) if !domain.is_empty() => {
                let base = url::Url::parse(domain)?;
                base.join("webhook").map(Some)
            }
            _ => Ok(None),
        }
    }
}

impl RebuildConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            rebuild: RebuildConfig::default(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            domain: None,
            admin_secret: String::new(),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            reply_timeout_seconds: 10,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_path: PathBuf::from("users.json"),
            lessons_path: PathBuf::from("lessons.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            work_dir: PathBuf::from("."),
            build_command: vec!["cargo".to_string(), "build".to_string(), "--release".to_string()],
            timeout_seconds: 600,
        }
    }
}
