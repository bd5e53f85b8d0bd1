//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{LessonBotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_storage_config(&settings.storage)?;
    validate_logging_config(&settings.logging)?;
    validate_rebuild_config(&settings.rebuild)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(LessonBotError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.admin_secret.is_empty() {
        return Err(LessonBotError::Config(
            "Admin secret is required".to_string()
        ));
    }

    if let Some(domain) = &config.domain {
        let url = url::Url::parse(domain)?;
        if url.scheme() != "https" {
            return Err(LessonBotError::Config(
                format!("Webhook domain must use https: {}", domain)
            ));
        }
    }

    if config.reply_timeout_seconds == 0 {
        return Err(LessonBotError::Config(
            "Reply timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.users_path.as_os_str().is_empty() || config.lessons_path.as_os_str().is_empty() {
        return Err(LessonBotError::Config(
            "Storage paths must not be empty".to_string()
        ));
    }

    if config.users_path == config.lessons_path {
        return Err(LessonBotError::Config(
            "Users and lessons must be stored in different files".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(LessonBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(LessonBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Validate rebuild configuration
fn validate_rebuild_config(config: &super::RebuildConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    if config.build_command.is_empty() {
        return Err(LessonBotError::Config(
            "Rebuild build command is required when rebuild is enabled".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(LessonBotError::Config(
            "Rebuild timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}
