use std::sync::LazyLock;

use poise::serenity_prelude::ChannelId;
use regex::Regex;

use super::platform::ChatPlatform;

/// Matches a raw channel mention such as `<#123456789012345678>`.
static CHANNEL_MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<#(\d+)>$").expect("valid channel mention regex"));

/// The channel a command should act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelTarget {
    /// No mention given; use the channel the command was sent in.
    Current,
    /// A mention was given. `None` when its id could not be read.
    Mentioned(Option<ChannelId>),
}

/// Parse a single token as a channel mention.
pub fn parse_channel_mention(token: &str) -> Option<ChannelId> {
    let captures = CHANNEL_MENTION_REGEX.captures(token)?;
    captures[1]
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(ChannelId::new)
}

/// Split a leading `<#channel>` token off command arguments.
///
/// Returns the target and the remaining, trimmed text. Any first token shaped
/// like `<#...>` counts as a mention attempt, even when the id inside is bogus.
pub fn split_channel_mention(args: &str) -> (ChannelTarget, &str) {
    let args = args.trim();
    let (first, rest) = args
        .split_once(char::is_whitespace)
        .unwrap_or((args, ""));

    if first.starts_with("<#") && first.ends_with('>') {
        (
            ChannelTarget::Mentioned(parse_channel_mention(first)),
            rest.trim(),
        )
    } else {
        (ChannelTarget::Current, args)
    }
}

/// Resolve a target to a channel the bot can post in.
pub async fn resolve_target(
    platform: &dyn ChatPlatform,
    current: ChannelId,
    target: ChannelTarget,
) -> Option<ChannelId> {
    match target {
        ChannelTarget::Current => Some(current),
        ChannelTarget::Mentioned(Some(channel_id)) if channel_id == current => Some(current),
        ChannelTarget::Mentioned(Some(channel_id)) => platform
            .channel_exists(channel_id)
            .await
            .then_some(channel_id),
        ChannelTarget::Mentioned(None) => None,
    }
}
