//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod incoming;
pub mod lesson;
pub mod user;

// Re-export commonly used models
pub use incoming::{Incoming, Sender};
pub use lesson::{Answer, Lesson, LessonDraft, Question};
pub use user::{CurrentLesson, User};

use serde::{Deserialize, Deserializer};

/// Read `null` as the type's default. Older data files store empty
/// collections as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
