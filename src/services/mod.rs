//! Services module
//!
//! This module contains business logic services

pub mod lessons;
pub mod rebuild;
pub mod users;

// Re-export commonly used services
pub use lessons::LessonCatalog;
pub use rebuild::{Rebuilder, ShellRebuilder};
pub use users::UserDirectory;
