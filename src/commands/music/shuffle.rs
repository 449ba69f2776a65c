use super::*;

pub async fn handle_shuffle(data: &Data, invocation: &Invocation) -> Response {
    let Some(guild_id) = invocation.guild_id else {
        return Response::reply(NOT_IN_GUILD);
    };
    if !data.music.has_queue(guild_id).await {
        return Response::reply("There is no queue to shuffle!");
    }

    match data.music.shuffle(guild_id).await {
        Ok(()) => Response::reply("The queue has been shuffled!"),
        Err(e) => {
            error!("Error shuffling the queue: {}", e);
            Response::reply("Oops.. couldn't shuffle the queue.")
        }
    }
}

/// Shuffle the upcoming songs
#[poise::command(slash_command, category = "Music")]
pub async fn shuffle(ctx: Context<'_>) -> CommandResult {
    let response = handle_shuffle(ctx.data(), &Invocation::from_context(ctx)).await;
    respond(ctx, response).await
}
