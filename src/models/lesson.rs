//! Lesson model

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub pages: BTreeMap<u32, String>,
    pub question: Question,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub answers: BTreeMap<u32, Answer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub is_correct: bool,
    pub text: String,
}

/// Lesson payload as submitted by an administrator.
///
/// Carries no identity: any `id` key in the payload is ignored and the
/// catalog assigns one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LessonDraft {
    pub pages: BTreeMap<u32, String>,
    pub question: Question,
}

impl LessonDraft {
    pub fn into_lesson(self, id: i64) -> Lesson {
        Lesson {
            id,
            pages: self.pages,
            question: self.question,
        }
    }
}
