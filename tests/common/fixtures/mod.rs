//! Sample ids and messages used in tests

use abby::commands::router::InboundMessage;
use poise::serenity_prelude::{ChannelId, GuildId, MessageId, UserId};

pub const GUILD: GuildId = GuildId::new(123456789);
pub const GENERAL: ChannelId = ChannelId::new(987654321);
pub const ANNOUNCEMENTS: ChannelId = ChannelId::new(987654322);
pub const VOICE: ChannelId = ChannelId::new(555555555);
pub const MEMBER: UserId = UserId::new(111111111);

/// A guild message from `MEMBER`.
pub fn message_in(channel_id: ChannelId, content: &str) -> InboundMessage {
    InboundMessage {
        guild_id: Some(GUILD),
        channel_id,
        message_id: MessageId::new(42),
        author_id: MEMBER,
        content: content.to_string(),
    }
}

/// A direct message from `MEMBER`.
pub fn direct_message(content: &str) -> InboundMessage {
    InboundMessage {
        guild_id: None,
        ..message_in(GENERAL, content)
    }
}

/// `<#id>` as Discord renders a channel mention.
pub fn mention(channel_id: ChannelId) -> String {
    format!("<#{}>", channel_id)
}
