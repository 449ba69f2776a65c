use super::*;

pub async fn handle_pause(data: &Data, invocation: &Invocation) -> Response {
    const NOTHING_PLAYING: &str = "There's no music playing to pause.";

    let Some(guild_id) = invocation.guild_id else {
        return Response::reply(NOT_IN_GUILD);
    };
    if !data.music.has_queue(guild_id).await {
        return Response::reply(NOTHING_PLAYING);
    }

    match data.music.pause(guild_id).await {
        Ok(()) => Response::reply("Paused the music!"),
        Err(MusicError::NoQueue) => Response::reply(NOTHING_PLAYING),
        Err(e) => unexpected(e),
    }
}

pub async fn handle_resume(data: &Data, invocation: &Invocation) -> Response {
    const NOTHING_PAUSED: &str = "There's no music paused.";

    let Some(guild_id) = invocation.guild_id else {
        return Response::reply(NOT_IN_GUILD);
    };
    if !data.music.has_queue(guild_id).await {
        return Response::reply(NOTHING_PAUSED);
    }

    match data.music.resume(guild_id).await {
        Ok(()) => Response::reply("Resumed the music!"),
        Err(MusicError::NoQueue) => Response::reply(NOTHING_PAUSED),
        Err(e) => unexpected(e),
    }
}

/// Pause the current song
#[poise::command(slash_command, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    let response = handle_pause(ctx.data(), &Invocation::from_context(ctx)).await;
    respond(ctx, response).await
}

/// Resume the paused song
#[poise::command(slash_command, category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    let response = handle_resume(ctx.data(), &Invocation::from_context(ctx)).await;
    respond(ctx, response).await
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::music::utils::music_manager::MockMusicEngine;
    use crate::test_support::{direct_invocation, guild_invocation, music_data};

    #[tokio::test]
    async fn test_pause() {
        let mut music = MockMusicEngine::new();
        music.expect_has_queue().returning(|_| true);
        music.expect_pause().times(1).returning(|_| Ok(()));

        let response = handle_pause(&music_data(music), &guild_invocation()).await;

        assert_eq!(response, Response::reply("Paused the music!"));
    }

    #[tokio::test]
    async fn test_pause_without_queue() {
        let mut music = MockMusicEngine::new();
        music.expect_has_queue().returning(|_| false);
        music.expect_pause().never();

        let response = handle_pause(&music_data(music), &guild_invocation()).await;

        assert_eq!(response, Response::reply("There's no music playing to pause."));
    }

    #[tokio::test]
    async fn test_resume() {
        let mut music = MockMusicEngine::new();
        music.expect_has_queue().returning(|_| true);
        music.expect_resume().times(1).returning(|_| Ok(()));

        let response = handle_resume(&music_data(music), &guild_invocation()).await;

        assert_eq!(response, Response::reply("Resumed the music!"));
    }

    #[tokio::test]
    async fn test_resume_queue_emptied_meanwhile() {
        let mut music = MockMusicEngine::new();
        music.expect_has_queue().returning(|_| true);
        music
            .expect_resume()
            .returning(|_| Err(MusicError::NoQueue));

        let response = handle_resume(&music_data(music), &guild_invocation()).await;

        assert_eq!(response, Response::reply("There's no music paused."));
    }

    #[tokio::test]
    async fn test_resume_outside_guild() {
        let mut music = MockMusicEngine::new();
        music.expect_has_queue().never();

        let response = handle_resume(&music_data(music), &direct_invocation()).await;

        assert_eq!(response, Response::reply(NOT_IN_GUILD));
    }
}
