//! LessonBot Telegram Bot
//!
//! A Telegram bot that serves short lessons and quizzes. This library
//! provides the command router, the user directory and lesson catalog,
//! their JSON persistence, and the session controller tying them together.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{LessonBotError, Result};

// Re-export main components for easy access
pub use services::{LessonCatalog, UserDirectory};
pub use state::{SessionController, ShutdownReason};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
