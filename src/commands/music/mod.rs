pub mod pause;
pub mod play;
pub mod shuffle;
pub mod skip;
pub mod stop;
pub mod utils;
pub mod volume;

use tracing::{debug, error, info, warn};

use crate::commands::router::Invocation;
use crate::commands::{Response, respond};
use crate::{CommandResult, Context, Data};
use utils::music_manager::MusicError;

/// Reply for music commands used outside a guild.
pub const NOT_IN_GUILD: &str = "This command can only be used in a server.";

/// Reply for an engine failure the handler has no specific wording for.
fn unexpected(error: MusicError) -> Response {
    error!("Music engine error: {}", error);
    Response::Reply(utils::event_handlers::MusicEvent::Error(&error).announcement())
}
