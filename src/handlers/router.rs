//! Command routing
//!
//! Commands are looked up by keyword in a table of handlers. Anything that
//! is not a registered command goes to the fallback handler.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};
use crate::models::User;
use crate::services::{LessonCatalog, UserDirectory};

/// Reply sent when a non-admin calls an admin-only command
pub const PERMISSION_DENIED: &str = "Permission denied: this command is for administrators only.";

/// Commands whose arguments carry credentials and never reach the logs
const SECRET_COMMANDS: &[&str] = &["auth"];

/// Everything a handler may look at or change while serving one message
pub struct CommandContext<'a> {
    /// The sender's record as of this message
    pub user: User,
    pub users: &'a mut UserDirectory,
    pub lessons: &'a mut LessonCatalog,
    pub admin_secret: &'a str,
}

/// Work the session must carry out after the state lock is released
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Rebuild { branch: String },
}

/// Result of handling one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Option<String>,
    pub effect: Option<Effect>,
}

impl Outcome {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            effect: None,
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn effect(effect: Effect) -> Self {
        Self {
            reply: None,
            effect: Some(effect),
        }
    }
}

/// A command implementation
pub trait CommandHandler: Send + Sync {
    fn handle(&self, ctx: &mut CommandContext<'_>, args: &str) -> Outcome;
}

impl<F> CommandHandler for F
where
    F: Fn(&mut CommandContext<'_>, &str) -> Outcome + Send + Sync,
{
    fn handle(&self, ctx: &mut CommandContext<'_>, args: &str) -> Outcome {
        self(ctx, args)
    }
}

/// Runs the wrapped handler only for users holding admin rights
pub struct AdminOnly<H>(pub H);

impl<H: CommandHandler> CommandHandler for AdminOnly<H> {
    fn handle(&self, ctx: &mut CommandContext<'_>, args: &str) -> Outcome {
        if !ctx.user.has_admin_rights {
            warn!(user_id = ctx.user.id, "Admin command refused");
            return Outcome::reply(PERMISSION_DENIED);
        }
        self.0.handle(ctx, args)
    }
}

/// A command keyword and the text following it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'t> {
    pub keyword: String,
    /// Bot named after `@`, if any
    pub addressee: Option<&'t str>,
    pub args: &'t str,
}

/// Split `/keyword@botname args` into keyword, addressee and arguments.
///
/// Returns `None` for text that is not a command.
pub fn parse_command(text: &str) -> Option<ParsedCommand<'_>> {
    let body = text.trim_start().strip_prefix('/')?;
    let (head, args) = match body.find(char::is_whitespace) {
        Some(idx) => (&body[..idx], body[idx..].trim()),
        None => (body, ""),
    };
    let (keyword, addressee) = match head.split_once('@') {
        Some((keyword, bot)) => (keyword, Some(bot).filter(|bot| !bot.is_empty())),
        None => (head, None),
    };
    if keyword.is_empty() {
        return None;
    }

    Some(ParsedCommand {
        keyword: keyword.to_lowercase(),
        addressee,
        args,
    })
}

/// Message text as it may appear in logs.
///
/// Arguments of credential-bearing commands are masked.
pub fn redact_for_log(text: &str) -> Cow<'_, str> {
    match parse_command(text) {
        Some(command) if SECRET_COMMANDS.contains(&command.keyword.as_str()) && !command.args.is_empty() => {
            Cow::Owned(format!("/{} <redacted>", command.keyword))
        }
        _ => Cow::Borrowed(text),
    }
}

/// Keyword to handler table
pub struct CommandRouter {
    handlers: HashMap<String, Box<dyn CommandHandler>>,
    fallback: Box<dyn CommandHandler>,
    bot_username: Option<String>,
}

impl CommandRouter {
    pub fn new(fallback: impl CommandHandler + 'static) -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: Box::new(fallback),
            bot_username: None,
        }
    }

    /// Only answer `/command@name` when `name` is this bot
    pub fn set_bot_username(&mut self, username: impl Into<String>) {
        self.bot_username = Some(username.into());
    }

    fn is_for_other_bot(&self, addressee: Option<&str>) -> bool {
        match (addressee, self.bot_username.as_deref()) {
            (Some(addressee), Some(me)) => !addressee.eq_ignore_ascii_case(me),
            _ => false,
        }
    }

    /// Register `handler` under `keyword`, replacing any previous one
    pub fn register(mut self, keyword: &str, handler: impl CommandHandler + 'static) -> Self {
        self.handlers.insert(keyword.to_lowercase(), Box::new(handler));
        self
    }

    pub fn is_registered(&self, keyword: &str) -> bool {
        self.handlers.contains_key(&keyword.to_lowercase())
    }

    /// Sorted list of registered keywords
    pub fn keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keywords.sort_unstable();
        keywords
    }

    /// Handle one message text
    pub fn route(&self, ctx: &mut CommandContext<'_>, text: &str) -> Outcome {
        match parse_command(text) {
            Some(command) if self.is_for_other_bot(command.addressee) => {
                debug!(user_id = ctx.user.id, command = %command.keyword, "Command addressed to another bot");
                Outcome::silent()
            }
            Some(command) => match self.handlers.get(&command.keyword) {
                Some(handler) => {
                    debug!(user_id = ctx.user.id, command = %command.keyword, "Dispatching command");
                    handler.handle(ctx, command.args)
                }
                None => {
                    debug!(user_id = ctx.user.id, command = %command.keyword, "Unknown command");
                    self.fallback.handle(ctx, command.args)
                }
            },
            None => self.fallback.handle(ctx, text),
        }
    }
}

impl fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRouter")
            .field("keywords", &self.keywords())
            .field("bot_username", &self.bot_username)
            .finish()
    }
}
