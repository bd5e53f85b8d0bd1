//! Bot handlers module
//!
//! This module contains the Telegram-facing side of the bot:
//! - Command routing and the command handlers
//! - Message handlers bridging teloxide updates to the session

pub mod commands;
pub mod messages;
pub mod router;

// Re-export commonly used handler items
pub use commands::{command_router, Command};
pub use messages::{handle_message, send_reply, ReplyTimeout};
pub use router::{AdminOnly, CommandContext, CommandHandler, CommandRouter, Effect, Outcome};
