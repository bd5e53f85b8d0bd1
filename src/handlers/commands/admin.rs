//! Admin command handlers

use crate::handlers::router::{CommandContext, Effect, Outcome};
use crate::utils::logging::log_admin_action;

pub const AUTH_FAILED: &str = "Wrong secret.";
pub const REBUILD_USAGE: &str = "Specify the branch to rebuild from: /rebuild <branch>";

/// Handle /auth command - grant admin rights for the shared secret
pub fn handle_auth(ctx: &mut CommandContext<'_>, args: &str) -> Outcome {
    if !ctx.users.grant_admin(ctx.user.id, args, ctx.admin_secret) {
        return Outcome::reply(AUTH_FAILED);
    }

    ctx.user.has_admin_rights = true;
    log_admin_action(ctx.user.id, "auth", None, None);
    Outcome::reply(format!(
        "Hello {} ({}), you are admin now!",
        ctx.user.full_name, ctx.user.username
    ))
}

/// Handle /rebuild command (admin only).
///
/// Only requests the rebuild; the session runs it once the state is unlocked.
pub fn handle_rebuild(ctx: &mut CommandContext<'_>, args: &str) -> Outcome {
    if args.is_empty() {
        return Outcome::reply(REBUILD_USAGE);
    }

    log_admin_action(ctx.user.id, "rebuild", Some(args), None);
    Outcome::effect(Effect::Rebuild { branch: args.to_string() })
}
