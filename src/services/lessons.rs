//! Lesson catalog implementation
//!
//! Lessons are only ever appended. Identities come from the catalog's own
//! counter, which never goes backwards.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::models::{Lesson, LessonDraft};

/// All lessons keyed by identity, plus the next identity to hand out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonCatalog {
    #[serde(default)]
    last_id: i64,
    #[serde(default)]
    lessons: BTreeMap<i64, Lesson>,
}

impl LessonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` as a lesson and store it under the next identity.
    ///
    /// On a parse error the catalog is left untouched.
    pub fn append(&mut self, raw: &str) -> Result<i64, serde_json::Error> {
        let draft: LessonDraft = serde_json::from_str(raw).map_err(|e| {
            warn!(error = %e, "Rejected malformed lesson payload");
            e
        })?;

        let id = self.last_id;
        self.lessons.insert(id, draft.into_lesson(id));
        self.last_id = id + 1;

        info!(lesson_id = id, total = self.lessons.len(), "Lesson added");
        Ok(id)
    }

    /// Render the whole catalog as JSON text for an administrator
    pub fn snapshot_as_text(&self) -> String {
        match serde_json::to_string_pretty(self) {
            Ok(text) => text,
            Err(e) => format!("failed to render lessons: {}", e),
        }
    }

    pub fn get(&self, lesson_id: i64) -> Option<&Lesson> {
        self.lessons.get(&lesson_id)
    }

    /// Identity the next appended lesson will receive
    pub fn next_id(&self) -> i64 {
        self.last_id
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"{"pages":{"0":"intro"},"question":{"text":"q?","answers":{"0":{"is_correct":true,"text":"a"}}}}"#;

    #[test]
    fn test_append_to_fresh_catalog() {
        let mut catalog = LessonCatalog::new();
        assert_eq!(catalog.next_id(), 0);

        let id = catalog.append(SAMPLE).unwrap();

        assert_eq!(id, 0);
        assert_eq!(catalog.next_id(), 1);
        let lesson = catalog.get(0).unwrap();
        assert_eq!(lesson.id, 0);
        assert_eq!(lesson.pages.get(&0).map(String::as_str), Some("intro"));
        assert_eq!(lesson.question.text, "q?");
        assert!(lesson.question.answers[&0].is_correct);
        assert_eq!(lesson.question.answers[&0].text, "a");
    }

    #[test]
    fn test_snapshot_contains_lesson() {
        let mut catalog = LessonCatalog::new();
        catalog.append(SAMPLE).unwrap();

        let snapshot: serde_json::Value = serde_json::from_str(&catalog.snapshot_as_text()).unwrap();
        assert_eq!(snapshot["last_id"], 1);
        assert_eq!(snapshot["lessons"]["0"]["id"], 0);
        assert_eq!(snapshot["lessons"]["0"]["pages"]["0"], "intro");
        assert_eq!(snapshot["lessons"]["0"]["question"]["text"], "q?");
        assert_eq!(snapshot["lessons"]["0"]["question"]["answers"]["0"]["is_correct"], true);
    }

    #[test]
    fn test_payload_id_is_ignored() {
        let mut catalog = LessonCatalog::new();
        catalog.append(SAMPLE).unwrap();

        let payload = SAMPLE.replacen('{', r#"{"id":99,"#, 1);
        let id = catalog.append(&payload).unwrap();

        assert_eq!(id, 1);
        assert!(catalog.get(99).is_none());
        assert_eq!(catalog.get(1).unwrap().id, 1);
    }

    #[test]
    fn test_malformed_payload_leaves_catalog_unchanged() {
        let mut catalog = LessonCatalog::new();
        catalog.append(SAMPLE).unwrap();
        let before = catalog.clone();

        assert!(catalog.append("not json").is_err());
        assert!(catalog.append(r#"{"pages":{"0":"intro"}}"#).is_err());
        assert!(catalog.append(r#"{"pages":{"x":"bad key"},"question":{"text":"q","answers":{}}}"#).is_err());

        assert_eq!(catalog, before);
    }

    #[test]
    fn test_missing_fields_in_saved_document_default() {
        let catalog: LessonCatalog = serde_json::from_str("{}").unwrap();
        assert_eq!(catalog.next_id(), 0);
        assert!(catalog.is_empty());
    }

    proptest! {
        #[test]
        fn prop_counter_tracks_successful_appends(valid in proptest::collection::vec(any::<bool>(), 0..20)) {
            let mut catalog = LessonCatalog::new();
            for ok in valid {
                let before = catalog.next_id();
                let result = catalog.append(if ok { SAMPLE } else { "{" });
                if ok {
                    prop_assert_eq!(result.unwrap(), before);
                    prop_assert_eq!(catalog.next_id(), before + 1);
                } else {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(catalog.next_id(), before);
                }
            }
            prop_assert_eq!(catalog.len() as i64, catalog.next_id());
        }
    }
}
