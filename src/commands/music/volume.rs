use super::*;

const OUT_OF_RANGE: &str = "Please specify a volume between 1 and 100.";

/// Read a leading integer from the first argument, ignoring anything after
/// the digits ("40%" reads as 40).
pub fn parse_volume(args: &str) -> Option<i64> {
    let token = args.split_whitespace().next()?;
    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let value = unsigned[..end].parse::<i64>().ok()?;

    Some(if negative { -value } else { value })
}

/// Set the volume. The range is checked before anything else, so an invalid
/// level never reaches the engine.
pub async fn handle_volume(data: &Data, invocation: &Invocation, level: Option<i64>) -> Response {
    let Some(volume) = level
        .filter(|level| (1..=100).contains(level))
        .and_then(|level| u8::try_from(level).ok())
    else {
        return Response::reply(OUT_OF_RANGE);
    };

    let Some(guild_id) = invocation.guild_id else {
        return Response::reply(NOT_IN_GUILD);
    };
    if !data.music.has_queue(guild_id).await {
        return Response::reply("There is no music playing right now.");
    }

    match data.music.set_volume(guild_id, volume).await {
        Ok(()) => Response::Reply(format!("Volume set to {}%", volume)),
        Err(MusicError::NoQueue) => Response::reply("There is no music playing right now."),
        Err(e) => unexpected(e),
    }
}

/// Adjust the music volume between 1 and 100
#[poise::command(slash_command, category = "Music")]
pub async fn volume(
    ctx: Context<'_>,
    #[description = "Volume level (1-100)"] level: i64,
) -> CommandResult {
    let response = handle_volume(ctx.data(), &Invocation::from_context(ctx), Some(level)).await;
    respond(ctx, response).await
}
