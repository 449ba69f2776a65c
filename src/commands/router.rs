use poise::serenity_prelude::{ChannelId, GuildId, Message, MessageId, UserId};
use tracing::{debug, error};

use super::registry::{self, CommandKind};
use super::{Response, general, music, persistent};
use crate::utils::persistent_message::ActivityOutcome;
use crate::utils::platform::ChatPlatform;
use crate::{Context, Data};

/// Who invoked a command, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub author_id: UserId,
}

impl Invocation {
    pub fn from_context(ctx: Context<'_>) -> Self {
        Self {
            guild_id: ctx.guild_id(),
            channel_id: ctx.channel_id(),
            author_id: ctx.author().id,
        }
    }
}

/// A gateway message reduced to what the router needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub author_id: UserId,
    pub content: String,
}

impl InboundMessage {
    pub fn invocation(&self) -> Invocation {
        Invocation {
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            author_id: self.author_id,
        }
    }
}

impl From<&Message> for InboundMessage {
    fn from(message: &Message) -> Self {
        Self {
            guild_id: message.guild_id,
            channel_id: message.channel_id,
            message_id: message.id,
            author_id: message.author.id,
            content: message.content.clone(),
        }
    }
}

/// How the router handled a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Command(CommandKind),
    Activity(ActivityOutcome),
}

/// Route a text message to its command, or count it as channel activity.
pub async fn dispatch(data: &Data, message: &InboundMessage) -> Dispatched {
    let Some((command, args)) = registry::route(&message.content) else {
        let outcome = data
            .tracker
            .observe_activity(data.platform.as_ref(), message.channel_id)
            .await;
        return Dispatched::Activity(outcome);
    };

    debug!(
        "Running !{} for {} in channel {}",
        command.name, message.author_id, message.channel_id
    );
    let response = execute(command.kind, data, &message.invocation(), args).await;
    deliver(data.platform.as_ref(), message, response).await;

    Dispatched::Command(command.kind)
}

/// Run the handler for `kind` with the text that followed its trigger.
pub async fn execute(
    kind: CommandKind,
    data: &Data,
    invocation: &Invocation,
    args: &str,
) -> Response {
    match kind {
        CommandKind::Help => general::help::handle_help(),
        CommandKind::Gif => general::gif::handle_gif_text(data, invocation, args).await,
        CommandKind::Play => music::play::handle_play(data, invocation, args).await,
        CommandKind::Stop => music::stop::handle_stop(data, invocation).await,
        CommandKind::Skip => music::skip::handle_skip(data, invocation).await,
        CommandKind::Shuffle => music::shuffle::handle_shuffle(data, invocation).await,
        CommandKind::Pause => music::pause::handle_pause(data, invocation).await,
        CommandKind::Resume => music::pause::handle_resume(data, invocation).await,
        CommandKind::Volume => {
            let level = music::volume::parse_volume(args);
            music::volume::handle_volume(data, invocation, level).await
        }
        CommandKind::Info => general::info::handle_info(),
        CommandKind::SetMessage => persistent::handle_set_message(data, invocation, args).await,
        CommandKind::StopMessage => persistent::handle_stop_message(data, invocation, args).await,
    }
}

/// Send a handler's response back for a text invocation. Failures are logged.
pub async fn deliver(platform: &dyn ChatPlatform, message: &InboundMessage, response: Response) {
    let result = match response {
        Response::Reply(content) => {
            platform
                .reply(message.channel_id, message.message_id, &content)
                .await
        }
        Response::Post {
            channel_id,
            content,
        } => platform.send(channel_id, &content).await.map(|_| ()),
        Response::Ack(_) => Ok(()),
    };

    if let Err(e) = result {
        error!(
            "Failed to respond to message {} in channel {}: {}",
            message.message_id, message.channel_id, e
        );
    }
}
