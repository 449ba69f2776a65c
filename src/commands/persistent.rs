//! `!message` and `!stopmessage`, the text front-end of the persistent message tracker.

use tracing::error;

use super::Response;
use super::router::Invocation;
use crate::Data;
use crate::utils::mentions::{resolve_target, split_channel_mention};
use crate::utils::persistent_message::StopOutcome;

/// `!message [#channel] <text>`
pub async fn handle_set_message(data: &Data, invocation: &Invocation, args: &str) -> Response {
    let (target, text) = split_channel_mention(args);
    if text.is_empty() {
        return Response::reply("Please provide a message to send.");
    }

    let platform = data.platform.as_ref();
    let Some(channel_id) = resolve_target(platform, invocation.channel_id, target).await else {
        return Response::reply("I couldn't find the specified channel.");
    };

    match data.tracker.set(platform, channel_id, text.to_string()).await {
        Ok(_) => Response::Reply(format!("Persistent message set for <#{}>.", channel_id)),
        Err(e) => {
            error!("Error setting persistent message: {}", e);
            Response::reply("Failed to set a persistent message.")
        }
    }
}

/// `!stopmessage [#channel]`
pub async fn handle_stop_message(data: &Data, invocation: &Invocation, args: &str) -> Response {
    let (target, _) = split_channel_mention(args);
    let platform = data.platform.as_ref();
    let channel_id = resolve_target(platform, invocation.channel_id, target).await;

    match data.tracker.stop(platform, channel_id).await {
        StopOutcome::Stopped(channel_id) => Response::Reply(format!(
            "Persistent message in <#{}> has been stopped.",
            channel_id
        )),
        StopOutcome::NotActive => Response::reply("No active persistent message to stop."),
        StopOutcome::WrongChannel => {
            Response::reply("I couldn't find an active persistent message in that channel.")
        }
    }
}
