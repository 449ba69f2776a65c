use crate::commands::Response;
use crate::commands::registry::command_listing;

/// Lists the described text commands. Text only; slash commands are listed by Discord.
pub fn handle_info() -> Response {
    Response::Reply(command_listing())
}
