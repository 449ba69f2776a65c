use poise::serenity_prelude as serenity;
use tracing::{debug, info};

use crate::commands::router::{self, InboundMessage};
use crate::{Data, Error};

/// Gateway events outside of slash commands.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Ready! Logged in as {}", data_about_bot.user.tag());
        }
        serenity::FullEvent::Message { new_message } => {
            if new_message.author.id == ctx.cache.current_user().id {
                return Ok(());
            }

            let message = InboundMessage::from(new_message);
            let dispatched = router::dispatch(data, &message).await;
            debug!("Message {} handled as {:?}", message.message_id, dispatched);
        }
        _ => {}
    }

    Ok(())
}
