//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /teach, etc.

pub mod admin;
pub mod help;
pub mod lessons;
pub mod start;

use teloxide::utils::command::BotCommands;
use super::router::{AdminOnly, CommandRouter};

/// Public commands advertised in the Telegram command menu.
///
/// Admin commands are routed as well but deliberately left out of the menu.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and show this list")]
    Start,
    #[command(description = "Read the current lesson")]
    Teach,
    #[command(description = "Answer the quiz question")]
    Check,
    #[command(description = "Who made this bot")]
    Author,
    #[command(description = "Show your profile")]
    Whoami,
}

/// Router with every command the bot understands
pub fn command_router() -> CommandRouter {
    CommandRouter::new(help::handle_help)
        .register("start", start::handle_start)
        .register("whoami", start::handle_whoami)
        .register("teach", lessons::handle_teach)
        .register("check", lessons::handle_check)
        .register("author", help::handle_author)
        .register("muse", help::handle_muse)
        .register("auth", admin::handle_auth)
        .register("add_lesson", AdminOnly(lessons::handle_add_lesson))
        .register("print_lessons", AdminOnly(lessons::handle_print_lessons))
        .register("rebuild", AdminOnly(admin::handle_rebuild))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_command_is_routed() {
        let router = command_router();
        for command in Command::bot_commands() {
            let keyword = command.command.trim_start_matches('/');
            assert!(router.is_registered(keyword), "{} not routed", keyword);
        }
    }

    #[test]
    fn test_router_keywords() {
        assert_eq!(
            command_router().keywords(),
            vec![
                "add_lesson", "auth", "author", "check", "muse",
                "print_lessons", "rebuild", "start", "teach", "whoami",
            ]
        );
    }
}
