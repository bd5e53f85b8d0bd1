//! Test data builders and fakes

use std::sync::Mutex;
use futures::future::BoxFuture;
use LessonBot::models::{Incoming, Sender};
use LessonBot::services::Rebuilder;
use LessonBot::utils::errors::{RebuildError, RebuildResult};

/// The lesson payload used across scenarios
pub const SAMPLE_LESSON: &str =
    r#"{"pages":{"0":"intro"},"question":{"text":"q?","answers":{"0":{"is_correct":true,"text":"a"}}}}"#;

/// Shared secret configured for test sessions
pub const TEST_ADMIN_SECRET: &str = "open-sesame";

/// Create a test sender
pub fn test_sender(id: i64, first_name: &str, username: Option<&str>) -> Sender {
    Sender {
        id,
        first_name: first_name.to_string(),
        last_name: Some("Tester".to_string()),
        username: username.map(str::to_string),
    }
}

/// Create a private-chat message from `sender`
pub fn message_from(sender: &Sender, text: &str) -> Incoming {
    Incoming {
        chat_id: sender.id,
        sender: sender.clone(),
        text: text.to_string(),
    }
}

/// Rebuilder that records branches instead of running git
#[derive(Default)]
pub struct MockRebuilder {
    pub failure: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockRebuilder {
    pub fn failing(stderr: &str) -> Self {
        Self {
            failure: Some(stderr.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Rebuilder for MockRebuilder {
    fn attempt_rebuild<'a>(&'a self, branch: &'a str) -> BoxFuture<'a, RebuildResult<()>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(branch.to_string());
            match &self.failure {
                Some(stderr) => Err(RebuildError::StepFailed {
                    step: format!("git checkout {}", branch),
                    status: "exit status: 1".to_string(),
                    stderr: stderr.clone(),
                }),
                None => Ok(()),
            }
        })
    }
}
