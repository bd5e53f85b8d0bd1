//! Help and static text handlers

use crate::handlers::router::{CommandContext, Outcome};

pub const HELP_TEXT: &str = "Try /teach, /check or /author";

/// Fallback for plain text and unknown commands
pub fn handle_help(_ctx: &mut CommandContext<'_>, _args: &str) -> Outcome {
    Outcome::reply(HELP_TEXT)
}

/// Handle /author command
pub fn handle_author(_ctx: &mut CommandContext<'_>, _args: &str) -> Outcome {
    Outcome::reply("Arseniy Skurt @skurtars")
}

pub fn handle_muse(_ctx: &mut CommandContext<'_>, _args: &str) -> Outcome {
    Outcome::reply("<3")
}
