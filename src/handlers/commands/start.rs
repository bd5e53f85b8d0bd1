//! Start command handler
//!
//! Handles the /start greeting and the /whoami profile summary

use teloxide::utils::command::BotCommands;
use crate::handlers::router::{CommandContext, Outcome};
use crate::utils::helpers::format_timestamp;
use super::Command;

/// Handle /start command
pub fn handle_start(ctx: &mut CommandContext<'_>, _args: &str) -> Outcome {
    Outcome::reply(format!(
        "Hello {}!\n\n{}",
        ctx.user.full_name,
        Command::descriptions()
    ))
}

/// Handle /whoami command - show the sender's own profile
pub fn handle_whoami(ctx: &mut CommandContext<'_>, _args: &str) -> Outcome {
    let user = &ctx.user;
    let completed = if user.completed_lessons.is_empty() {
        "none".to_string()
    } else {
        user.completed_lessons
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    Outcome::reply(format!(
        "Hello {} ({})\n\
         ID: {}\n\
         Admin: {}\n\
         Authorized: {}\n\
         Current lesson: {} (page {})\n\
         Completed lessons: {}\n\
         Last visit: {}",
        user.full_name,
        user.username,
        user.id,
        if user.has_admin_rights { "yes" } else { "no" },
        if user.authorized { "yes" } else { "no" },
        user.current_lesson.lesson_id,
        user.current_lesson.page_id,
        completed,
        format_timestamp(user.last_visit),
    ))
}
