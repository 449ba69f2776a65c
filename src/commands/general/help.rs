use rand::prelude::IndexedRandom;

use crate::commands::{Response, respond};
use crate::{CommandResult, Context};

/// Abby is not in the mood.
pub const HELP_REPLIES: &[&str] = &[
    "Ugh... What?",
    "Let me sleep..",
    "How can I NOT help you today?",
    "Get out!",
    "Seems like a YOU problem..",
];

pub fn handle_help() -> Response {
    let reply = HELP_REPLIES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(HELP_REPLIES[0]);

    Response::reply(reply)
}

/// Ask Abby for help, if she is willing to give it to you
#[poise::command(slash_command, category = "General")]
pub async fn help(ctx: Context<'_>) -> CommandResult {
    respond(ctx, handle_help()).await
}
