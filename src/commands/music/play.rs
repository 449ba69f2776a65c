use super::*;
use crate::commands::music::utils::{
    event_handlers::MusicEvent,
    music_manager::{PlayOutcome, PlayRequest},
};

pub async fn handle_play(data: &Data, invocation: &Invocation, query: &str) -> Response {
    let Some(guild_id) = invocation.guild_id else {
        return Response::reply(NOT_IN_GUILD);
    };

    let Some(voice_channel_id) = data
        .platform
        .user_voice_channel(guild_id, invocation.author_id)
    else {
        return Response::reply("You need to be in a voice channel to play music!");
    };

    let query = query.trim();
    if query.is_empty() {
        return Response::reply("Please provide a song name or URL.");
    }

    info!("Received play command with query: {}", query);
    let request = PlayRequest {
        guild_id,
        voice_channel_id,
        text_channel_id: invocation.channel_id,
        query: query.to_string(),
    };

    match data.music.play(request).await {
        Ok(PlayOutcome::Track(track)) => Response::Ack(format!("Queued: {}", track.title)),
        Ok(PlayOutcome::Playlist { name, count }) => {
            Response::Ack(format!("Queued {} songs from `{}`.", count, name))
        }
        Err(MusicError::NoResults(query)) => {
            Response::Reply(MusicEvent::SearchNoResult(&query).announcement())
        }
        Err(err @ (MusicError::CannotResolve(_) | MusicError::AudioSourceError(_))) => {
            warn!("Failed to resolve \"{}\": {}", query, err);
            Response::Reply(MusicEvent::Error(&err).announcement())
        }
        Err(err) => {
            error!("Error playing song: {}", err);
            Response::reply("There was an issue playing the song.")
        }
    }
}

/// Play a song or playlist in your voice channel
#[poise::command(slash_command, category = "Music", ephemeral)]
pub async fn play(
    ctx: Context<'_>,
    #[description = "URL or search query"] query: String,
) -> CommandResult {
    // Resolving with yt-dlp can outlast the interaction deadline
    ctx.defer_ephemeral().await?;

    let response = handle_play(ctx.data(), &Invocation::from_context(ctx), &query).await;
    respond(ctx, response).await
}
