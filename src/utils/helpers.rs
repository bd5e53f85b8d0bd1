//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;
use chrono::{DateTime, Utc};
use regex::Regex;

/// Telegram rejects text messages longer than this many characters
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Breaks on a newline when one is available inside the chunk, otherwise
/// on the character boundary.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max_chars {
        let hard_end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let end = match rest[..hard_end].rfind('\n') {
            Some(idx) if idx > 0 => idx + 1,
            _ => hard_end,
        };
        chunks.push(rest[..end].to_string());
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }

    chunks
}

/// Check that a branch or tag name is safe to hand to git
pub fn is_valid_branch_name(name: &str) -> bool {
    static BRANCH_RE: OnceLock<Regex> = OnceLock::new();
    let re = BRANCH_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/-]*$").expect("branch name pattern is valid")
    });

    re.is_match(name) && !name.contains("..") && !name.ends_with('/') && !name.ends_with(".lock")
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
