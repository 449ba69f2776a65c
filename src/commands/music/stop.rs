use super::*;

/// Stop playback if anything is queued, then leave the voice channel either way.
pub async fn handle_stop(data: &Data, invocation: &Invocation) -> Response {
    let Some(guild_id) = invocation.guild_id else {
        return Response::reply(NOT_IN_GUILD);
    };

    let response = if data.music.has_queue(guild_id).await {
        if let Err(e) = data.music.stop(guild_id).await {
            warn!("Failed to stop playback in guild {}: {}", guild_id, e);
        }
        Response::reply("Stopped the music and I'm leaving the channel!")
    } else {
        Response::reply("There is nothing playing, but I'll leave the voice channel if connected.")
    };

    // Attempt to leave the voice channel, the reply stands regardless
    match data.music.leave(guild_id).await {
        Ok(()) => {}
        Err(MusicError::NotConnected) => debug!("Not connected in guild {}", guild_id),
        Err(e) => warn!("Failed to leave voice channel during stop: {}", e),
    }

    response
}

/// Stop the music and leave the voice channel
#[poise::command(slash_command, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    let response = handle_stop(ctx.data(), &Invocation::from_context(ctx)).await;
    respond(ctx, response).await
}
