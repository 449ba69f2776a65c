//! This module aggregates all the command modules for the bot.
//!
//! Handlers are plain async functions returning a [`Response`], so the text
//! router and the slash commands share them.

use poise::CreateReply;
use poise::serenity_prelude::ChannelId;
use tracing::error;

use crate::{CommandResult, Context, Data, Error};

/// General purpose commands (help, info, gif).
pub mod general;
/// Commands related to music playback.
pub mod music;
/// The persistent message commands.
pub mod persistent;
/// The `!` text command table.
pub mod registry;
/// Dispatch of inbound text messages.
pub mod router;

/// Reply sent when a slash command fails unexpectedly.
pub const COMMAND_FAILURE: &str = "There was an error while executing this command!";

/// What a handler wants delivered to the invoking user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Reply to the invoking message or interaction.
    Reply(String),
    /// Post in a channel, which may differ from the invoking one.
    Post { channel_id: ChannelId, content: String },
    /// Acknowledge a slash invocation. Text invocations stay silent.
    Ack(String),
}

impl Response {
    pub fn reply(content: impl Into<String>) -> Self {
        Response::Reply(content.into())
    }
}

/// Deliver a handler's response to a slash invocation.
pub async fn respond(ctx: Context<'_>, response: Response) -> CommandResult {
    match response {
        Response::Reply(content) => {
            ctx.send(CreateReply::default().content(content)).await?;
        }
        Response::Post {
            channel_id,
            content,
        } if channel_id == ctx.channel_id() => {
            ctx.send(CreateReply::default().content(content)).await?;
        }
        Response::Post {
            channel_id,
            content,
        } => {
            ctx.data().platform.send(channel_id, &content).await?;
            ctx.send(
                CreateReply::default()
                    .content(format!("Sent to <#{}>.", channel_id))
                    .ephemeral(true),
            )
            .await?;
        }
        Response::Ack(content) => {
            ctx.send(CreateReply::default().content(content).ephemeral(true))
                .await?;
        }
    }

    Ok(())
}

/// Every slash command, for registration with poise.
pub fn slash_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        general::help::help(),
        general::gif::gif(),
        music::play::play(),
        music::stop::stop(),
        music::skip::skip(),
        music::shuffle::shuffle(),
        music::pause::pause(),
        music::pause::resume(),
        music::volume::volume(),
    ]
}

/// Framework error hook. Command failures get one ephemeral apology, sent as a
/// follow-up when the interaction was already answered.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {}", ctx.command().name, error);

            let reply = CreateReply::default()
                .content(COMMAND_FAILURE)
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to report command error: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
