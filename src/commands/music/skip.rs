use super::*;

pub async fn handle_skip(data: &Data, invocation: &Invocation) -> Response {
    const NOTHING_TO_SKIP: &str = "There's no song to skip.";

    let Some(guild_id) = invocation.guild_id else {
        return Response::reply(NOT_IN_GUILD);
    };
    if !data.music.has_queue(guild_id).await {
        return Response::reply(NOTHING_TO_SKIP);
    }

    match data.music.skip(guild_id).await {
        Ok(()) => Response::reply("Skipped the song!"),
        Err(MusicError::NoQueue) => Response::reply(NOTHING_TO_SKIP),
        Err(e) => unexpected(e),
    }
}

/// Skip the currently playing song
#[poise::command(slash_command, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    let response = handle_skip(ctx.data(), &Invocation::from_context(ctx)).await;
    respond(ctx, response).await
}
