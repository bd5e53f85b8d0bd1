//! Test context setup
//!
//! Builds a session controller whose files live in a temporary directory
//! and whose rebuilds go to a [`MockRebuilder`].

use std::sync::{Arc, Once};
use LessonBot::{Settings, SessionController};
use LessonBot::models::Sender;
use super::test_data::{message_from, MockRebuilder, TEST_ADMIN_SECRET};

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub struct TestContext {
    pub temp_dir: tempfile::TempDir,
    pub settings: Settings,
    pub rebuilder: Arc<MockRebuilder>,
    pub controller: SessionController,
}

impl TestContext {
    /// Fresh context with empty storage
    pub async fn new() -> Self {
        Self::with_rebuilder(MockRebuilder::default()).await
    }

    pub async fn with_rebuilder(rebuilder: MockRebuilder) -> Self {
        init_test_env();
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings = test_settings(temp_dir.path());
        let rebuilder = Arc::new(rebuilder);
        let controller = SessionController::open(&settings, rebuilder.clone())
            .await
            .expect("Failed to open session");

        Self { temp_dir, settings, rebuilder, controller }
    }

    /// Open a second controller over the same files, as a restart would
    pub async fn reopen(&self) -> SessionController {
        SessionController::open(&self.settings, Arc::new(MockRebuilder::default()))
            .await
            .expect("Failed to reopen session")
    }

    /// Send `text` from `sender` and return the reply
    pub async fn send(&self, sender: &Sender, text: &str) -> Option<String> {
        self.controller.handle(&message_from(sender, text)).await
    }
}

/// Settings pointing storage into `dir`
pub fn test_settings(dir: &std::path::Path) -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = "12345:test_token".to_string();
    settings.bot.admin_secret = TEST_ADMIN_SECRET.to_string();
    settings.storage.users_path = dir.join("users.json");
    settings.storage.lessons_path = dir.join("lessons.json");
    settings
}
