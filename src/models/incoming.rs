//! Transport-neutral inbound message

use crate::utils::helpers::normalize_whitespace;

/// Author of an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl Sender {
    pub fn full_name(&self) -> String {
        let joined = format!("{} {}", self.first_name, self.last_name.as_deref().unwrap_or(""));
        normalize_whitespace(&joined)
    }

    /// `@username` when the account has one, the full name otherwise
    pub fn handle(&self) -> String {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => format!("@{}", username),
            _ => self.full_name(),
        }
    }
}

/// One text message delivered to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incoming {
    pub chat_id: i64,
    pub sender: Sender,
    pub text: String,
}
