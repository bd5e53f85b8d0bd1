//! Session controller
//!
//! Owns the user directory and the lesson catalog for the lifetime of the
//! process. Updates may arrive concurrently from different chats, so both
//! containers sit behind one async mutex; the lock is never held across
//! network I/O or the rebuild.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use crate::config::Settings;
use crate::handlers::commands::command_router;
use crate::handlers::router::{redact_for_log, CommandContext, CommandRouter, Effect};
use crate::models::{Incoming, User};
use crate::services::{LessonCatalog, Rebuilder, UserDirectory};
use crate::storage::{JsonStore, Loaded};
use crate::utils::errors::{Result, StorageError};
use crate::utils::logging::log_user_action;
use super::shutdown::{ShutdownReason, ShutdownSignal};

/// In-memory state guarded by the session lock
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub users: UserDirectory,
    pub lessons: LessonCatalog,
}

/// Serves inbound messages and persists state on shutdown
pub struct SessionController {
    state: Mutex<SessionState>,
    router: CommandRouter,
    users_store: JsonStore,
    lessons_store: JsonStore,
    rebuilder: Arc<dyn Rebuilder>,
    admin_secret: String,
    shutdown: ShutdownSignal,
}

impl SessionController {
    pub fn new(
        state: SessionState,
        users_store: JsonStore,
        lessons_store: JsonStore,
        rebuilder: Arc<dyn Rebuilder>,
        admin_secret: impl Into<String>,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            router: command_router(),
            users_store,
            lessons_store,
            rebuilder,
            admin_secret: admin_secret.into(),
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Load saved state from the configured files and build the controller
    pub async fn open(settings: &Settings, rebuilder: Arc<dyn Rebuilder>) -> Result<Self> {
        let users_store = JsonStore::new("Users", &settings.storage.users_path);
        let lessons_store = JsonStore::new("Lessons", &settings.storage.lessons_path);

        let users = report_load(&users_store, users_store.load::<UserDirectory>().await?);
        let lessons = report_load(&lessons_store, lessons_store.load::<LessonCatalog>().await?);
        info!(users = users.len(), lessons = lessons.len(), next_lesson_id = lessons.next_id(), "State loaded");

        Ok(Self::new(
            SessionState { users, lessons },
            users_store,
            lessons_store,
            rebuilder,
            settings.bot.admin_secret.clone(),
        ))
    }

    /// Ignore commands addressed to bots other than `username`
    pub fn set_bot_username(&mut self, username: &str) {
        self.router.set_bot_username(username);
    }

    /// Handle one inbound message and return the reply to send, if any
    pub async fn handle(&self, incoming: &Incoming) -> Option<String> {
        if self.shutdown.is_requested() {
            debug!(user_id = incoming.sender.id, "Ignoring message during shutdown");
            return None;
        }

        let (user, outcome) = {
            let mut guard = self.state.lock().await;
            let SessionState { users, lessons } = &mut *guard;
            let user = users.find_or_create(&incoming.sender);
            log_user_action(user.id, "message", Some(&*redact_for_log(&incoming.text)));

            let mut ctx = CommandContext {
                user,
                users,
                lessons,
                admin_secret: &self.admin_secret,
            };
            let outcome = self.router.route(&mut ctx, &incoming.text);
            (ctx.user, outcome)
        };

        match outcome.effect {
            Some(Effect::Rebuild { branch }) => Some(self.rebuild(&user, &branch).await),
            None => outcome.reply,
        }
    }

    async fn rebuild(&self, user: &User, branch: &str) -> String {
        info!(user_id = user.id, branch = branch, "Trying to rebuild");
        match self.rebuilder.attempt_rebuild(branch).await {
            Ok(()) => {
                self.shutdown.request(ShutdownReason::Rebuild { branch: branch.to_string() });
                format!("Successfully switched to {} and rebuilt. Restarting.", branch)
            }
            Err(e) => {
                warn!(user_id = user.id, branch = branch, error = %e, "Rebuild failed");
                format!("Rebuild failed: {}", e)
            }
        }
    }

    /// Save both documents. Failures are logged; the first one is returned.
    pub async fn flush(&self) -> std::result::Result<(), StorageError> {
        let state = self.state.lock().await;

        let users = self.users_store.save(&state.users).await;
        if let Err(e) = &users {
            error!(error = %e, "Failed to save users");
        }
        let lessons = self.lessons_store.save(&state.lessons).await;
        if let Err(e) = &lessons {
            error!(error = %e, "Failed to save lessons");
        }

        users.and(lessons)
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Copy of the current in-memory state
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }
}

fn report_load<T: Default>(store: &JsonStore, loaded: Loaded<T>) -> T {
    if let Loaded::Corrupt(e) = &loaded {
        error!(
            kind = store.kind(),
            path = %store.path().display(),
            error = %e,
            "Starting with empty state; saved file is kept untouched"
        );
    }
    loaded.into_document()
}
