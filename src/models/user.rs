//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::incoming::Sender;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub last_visit: DateTime<Utc>,
    pub has_admin_rights: bool,
    pub authorized: bool,
    #[serde(default)]
    pub current_lesson: CurrentLesson,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub completed_lessons: Vec<i64>,
}

/// Lesson the user is reading and the page they stopped at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentLesson {
    pub lesson_id: i64,
    pub page_id: i64,
}

impl User {
    /// Build the record for an identity seen for the first time
    pub fn new(sender: &Sender, now: DateTime<Utc>) -> Self {
        Self {
            id: sender.id,
            username: sender.handle(),
            full_name: sender.full_name(),
            last_visit: now,
            has_admin_rights: false,
            authorized: true,
            current_lesson: CurrentLesson::default(),
            completed_lessons: Vec::new(),
        }
    }

    /// Refresh the profile fields that change between visits
    pub fn apply_visit(&mut self, sender: &Sender, now: DateTime<Utc>) {
        self.last_visit = now;
        self.username = sender.handle();
        self.full_name = sender.full_name();
    }
}
