//! Lesson command handlers

use tracing::info;
use crate::handlers::router::{CommandContext, Outcome};
use crate::utils::logging::log_admin_action;

pub const LESSON_PLACEHOLDER: &str = "The lesson text will be here";
pub const QUIZ_PLACEHOLDER: &str = "The quiz question will be here";
pub const ADD_LESSON_USAGE: &str = "Send the lesson as JSON: /add_lesson {\"pages\": {...}, \"question\": {...}}";

/// Handle /teach command
pub fn handle_teach(_ctx: &mut CommandContext<'_>, _args: &str) -> Outcome {
    Outcome::reply(LESSON_PLACEHOLDER)
}

/// Handle /check command
pub fn handle_check(_ctx: &mut CommandContext<'_>, _args: &str) -> Outcome {
    Outcome::reply(QUIZ_PLACEHOLDER)
}

/// Handle /add_lesson command (admin only).
///
/// Stays silent on success; malformed payloads are reported back.
pub fn handle_add_lesson(ctx: &mut CommandContext<'_>, args: &str) -> Outcome {
    if args.is_empty() {
        return Outcome::reply(ADD_LESSON_USAGE);
    }

    match ctx.lessons.append(args) {
        Ok(lesson_id) => {
            log_admin_action(ctx.user.id, "add_lesson", Some(&lesson_id.to_string()), None);
            Outcome::silent()
        }
        Err(e) => Outcome::reply(format!("Invalid lesson JSON: {}", e)),
    }
}

/// Handle /print_lessons command (admin only)
pub fn handle_print_lessons(ctx: &mut CommandContext<'_>, _args: &str) -> Outcome {
    info!(user_id = ctx.user.id, lessons = ctx.lessons.len(), "Printing lesson catalog");
    Outcome::reply(ctx.lessons.snapshot_as_text())
}
