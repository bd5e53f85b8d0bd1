//! User directory implementation
//!
//! In-memory mapping of Telegram identity to user profile. Every inbound
//! message passes through `find_or_create`, so the directory always holds
//! the latest name, handle and visit time of everyone who wrote to the bot.

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::models::{Sender, User};

/// All known users keyed by Telegram identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDirectory {
    #[serde(default)]
    users: BTreeMap<i64, User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the sender, creating or refreshing their record
    pub fn find_or_create(&mut self, sender: &Sender) -> User {
        self.find_or_create_at(sender, Utc::now())
    }

    /// Same as [`find_or_create`](Self::find_or_create) with an explicit clock
    pub fn find_or_create_at(&mut self, sender: &Sender, now: DateTime<Utc>) -> User {
        let user = match self.users.get(&sender.id) {
            Some(existing) if existing.authorized => {
                let mut user = existing.clone();
                user.apply_visit(sender, now);
                debug!(user_id = sender.id, "Known user visited");
                user
            }
            _ => {
                info!(user_id = sender.id, "Registering new user");
                User::new(sender, now)
            }
        };

        self.users.insert(user.id, user.clone());
        user
    }

    /// Grant admin rights when `supplied` matches `expected`.
    ///
    /// An empty expected secret never matches.
    pub fn grant_admin(&mut self, user_id: i64, supplied: &str, expected: &str) -> bool {
        if expected.is_empty() || supplied != expected {
            warn!(user_id = user_id, "Admin secret rejected");
            return false;
        }

        match self.users.get_mut(&user_id) {
            Some(user) => {
                user.has_admin_rights = true;
                info!(user_id = user_id, "Admin rights granted");
                true
            }
            None => {
                warn!(user_id = user_id, "Admin grant for unknown user");
                false
            }
        }
    }

    pub fn get(&self, user_id: i64) -> Option<&User> {
        self.users.get(&user_id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
