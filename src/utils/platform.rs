//! The subset of the Discord API the command handlers depend on.
//!
//! Handlers talk to `ChatPlatform` rather than serenity directly so they can be
//! exercised against mocks.

use std::sync::Arc;

use poise::serenity_prelude::{Cache, ChannelId, CreateMessage, GuildId, Http, MessageId, UserId};
use serenity::async_trait;
use tracing::debug;

use crate::Error;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Reply to a message, threaded to it.
    async fn reply(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<(), Error>;

    /// Post a message in a channel and return its id.
    async fn send(&self, channel_id: ChannelId, content: &str) -> Result<MessageId, Error>;

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId)
    -> Result<(), Error>;

    /// Whether the bot can see the channel.
    async fn channel_exists(&self, channel_id: ChannelId) -> bool;

    /// The voice channel a member is currently connected to, if any.
    fn user_voice_channel(&self, guild_id: GuildId, user_id: UserId) -> Option<ChannelId>;
}

/// `ChatPlatform` backed by the serenity HTTP client and gateway cache.
pub struct SerenityPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }
}

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    async fn reply(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<(), Error> {
        let message = CreateMessage::new()
            .content(content)
            .reference_message((channel_id, message_id));

        channel_id.send_message(&self.http, message).await?;
        Ok(())
    }

    async fn send(&self, channel_id: ChannelId, content: &str) -> Result<MessageId, Error> {
        let message = channel_id.say(&self.http, content).await?;
        debug!("Sent message {} in channel {}", message.id, channel_id);
        Ok(message.id)
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), Error> {
        self.http
            .delete_message(channel_id, message_id, None)
            .await?;
        debug!("Deleted message {} in channel {}", message_id, channel_id);
        Ok(())
    }

    async fn channel_exists(&self, channel_id: ChannelId) -> bool {
        if self.cache.channel(channel_id).is_some() {
            return true;
        }
        self.http.get_channel(channel_id).await.is_ok()
    }

    fn user_voice_channel(&self, guild_id: GuildId, user_id: UserId) -> Option<ChannelId> {
        self.cache.guild(guild_id).and_then(|guild| {
            guild
                .voice_states
                .get(&user_id)
                .and_then(|voice_state| voice_state.channel_id)
        })
    }
}
