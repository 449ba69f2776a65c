use poise::serenity_prelude as serenity;
use rand::prelude::IndexedRandom;
use tracing::{error, info};

use crate::commands::router::Invocation;
use crate::commands::{Response, respond};
use crate::utils::mentions::{ChannelTarget, resolve_target, split_channel_mention};
use crate::{CommandResult, Context, Data};

/// Searched when no terms are given.
pub const DEFAULT_SEARCH_TERM: &str = "bored";

/// Post a random GIF for `terms` in the target channel.
pub async fn handle_gif(
    data: &Data,
    invocation: &Invocation,
    target: ChannelTarget,
    terms: &str,
) -> Response {
    let Some(channel_id) =
        resolve_target(data.platform.as_ref(), invocation.channel_id, target).await
    else {
        return Response::reply("I couldn't find the specified channel.");
    };

    let term = if terms.is_empty() {
        DEFAULT_SEARCH_TERM
    } else {
        terms
    };

    let urls = match data.gifs.search(term).await {
        Ok(urls) => urls,
        Err(e) => {
            error!("Error fetching GIF: {}", e);
            return Response::reply("Sorry, I couldn't find a GIF right now.");
        }
    };

    let picked = urls.choose(&mut rand::rng()).cloned();
    match picked {
        Some(url) => {
            info!("Posting GIF for \"{}\" in channel {}", term, channel_id);
            Response::Post {
                channel_id,
                content: url,
            }
        }
        None => Response::Reply(format!("No GIFs found for \"{}\".", term)),
    }
}

/// `!gif [#channel] [terms]`
pub async fn handle_gif_text(data: &Data, invocation: &Invocation, args: &str) -> Response {
    let (target, terms) = split_channel_mention(args);
    handle_gif(data, invocation, target, terms).await
}

/// Search for a GIF and post it
#[poise::command(slash_command, category = "General")]
pub async fn gif(
    ctx: Context<'_>,
    #[description = "What to search for"] query: Option<String>,
    #[description = "Channel to post the GIF in"] channel: Option<serenity::GuildChannel>,
) -> CommandResult {
    let target = match channel {
        Some(channel) => ChannelTarget::Mentioned(Some(channel.id)),
        None => ChannelTarget::Current,
    };
    let terms = query.unwrap_or_default();

    let response = handle_gif(
        ctx.data(),
        &Invocation::from_context(ctx),
        target,
        terms.trim(),
    )
    .await;
    respond(ctx, response).await
}
