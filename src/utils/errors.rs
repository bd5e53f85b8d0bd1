//! Error handling for LessonBot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for LessonBot application
#[derive(Error, Debug)]
pub enum LessonBotError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Timed out: {0}")]
    Timeout(String),
}

/// Persistence store specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("refusing to overwrite {path}: it held unreadable data at startup")]
    WriteProtected { path: PathBuf },
}

/// Rebuild collaborator errors
#[derive(Error, Debug)]
pub enum RebuildError {
    #[error("rebuild is disabled")]
    Disabled,

    #[error("invalid branch name: {0}")]
    InvalidBranch(String),

    #[error("failed to start `{step}`: {source}")]
    Spawn {
        step: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{step}` exited with {status}: {stderr}")]
    StepFailed {
        step: String,
        status: String,
        stderr: String,
    },

    #[error("`{step}` did not finish within {seconds}s")]
    Timeout { step: String, seconds: u64 },
}

/// Result type alias for LessonBot operations
pub type Result<T> = std::result::Result<T, LessonBotError>;

/// Result type alias for persistence operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type alias for rebuild operations
pub type RebuildResult<T> = std::result::Result<T, RebuildError>;

impl LessonBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            LessonBotError::Telegram(_) => true,
            LessonBotError::Storage(StorageError::WriteProtected { .. }) => false,
            LessonBotError::Storage(_) => true,
            LessonBotError::Config(_) => false,
            LessonBotError::UrlParse(_) => false,
            LessonBotError::Timeout(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LessonBotError::Config(_) => ErrorSeverity::Critical,
            LessonBotError::UrlParse(_) => ErrorSeverity::Critical,
            LessonBotError::Timeout(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
