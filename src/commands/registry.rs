//! The fixed table of `!`-prefixed text commands.

/// How a text command is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The whole message must equal the trigger.
    Exact(&'static str),
    /// The message must equal the trigger or continue with whitespace.
    Prefix(&'static str),
}

impl Trigger {
    /// Returns the argument text if `content` fires this trigger.
    pub fn strip<'a>(&self, content: &'a str) -> Option<&'a str> {
        match *self {
            Trigger::Exact(text) => (content == text).then_some(""),
            Trigger::Prefix(text) => {
                let rest = content.strip_prefix(text)?;
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    Some(rest.trim())
                } else {
                    None
                }
            }
        }
    }

    pub fn text(&self) -> &'static str {
        match *self {
            Trigger::Exact(text) | Trigger::Prefix(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Gif,
    Play,
    Stop,
    Skip,
    Shuffle,
    Pause,
    Resume,
    Volume,
    Info,
    SetMessage,
    StopMessage,
}

#[derive(Debug)]
pub struct TextCommand {
    pub name: &'static str,
    pub trigger: Trigger,
    /// Line shown by `!info`. Unlisted commands have none.
    pub description: Option<&'static str>,
    pub kind: CommandKind,
}

/// Every text command, in matching order. The first match wins.
pub static TEXT_COMMANDS: &[TextCommand] = &[
    TextCommand {
        name: "help",
        trigger: Trigger::Exact("!help"),
        description: Some("Asks Abby for help, if she is willing to give it to you."),
        kind: CommandKind::Help,
    },
    TextCommand {
        name: "gif",
        trigger: Trigger::Prefix("!gif"),
        description: Some("Searches for a GIF based on your query."),
        kind: CommandKind::Gif,
    },
    TextCommand {
        name: "play",
        trigger: Trigger::Prefix("!play"),
        description: Some("Plays a song or playlist in a voice channel."),
        kind: CommandKind::Play,
    },
    TextCommand {
        name: "stop",
        trigger: Trigger::Exact("!stop"),
        description: Some("Stops the music and disconnects the bot."),
        kind: CommandKind::Stop,
    },
    TextCommand {
        name: "skip",
        trigger: Trigger::Exact("!skip"),
        description: Some("Skips the currently playing song."),
        kind: CommandKind::Skip,
    },
    TextCommand {
        name: "shuffle",
        trigger: Trigger::Exact("!shuffle"),
        description: Some("Shuffles the music queue."),
        kind: CommandKind::Shuffle,
    },
    TextCommand {
        name: "pause",
        trigger: Trigger::Exact("!pause"),
        description: Some("Pauses the current song."),
        kind: CommandKind::Pause,
    },
    TextCommand {
        name: "resume",
        trigger: Trigger::Exact("!resume"),
        description: Some("Resumes the paused song."),
        kind: CommandKind::Resume,
    },
    TextCommand {
        name: "volume",
        trigger: Trigger::Prefix("!volume"),
        description: Some("Adjusts the music volume between 1 and 100."),
        kind: CommandKind::Volume,
    },
    TextCommand {
        name: "info",
        trigger: Trigger::Exact("!info"),
        description: None,
        kind: CommandKind::Info,
    },
    TextCommand {
        name: "message",
        trigger: Trigger::Prefix("!message"),
        description: None,
        kind: CommandKind::SetMessage,
    },
    TextCommand {
        name: "stopmessage",
        trigger: Trigger::Prefix("!stopmessage"),
        description: None,
        kind: CommandKind::StopMessage,
    },
];

/// Find the command `content` invokes, along with its argument text.
pub fn route(content: &str) -> Option<(&'static TextCommand, &str)> {
    TEXT_COMMANDS
        .iter()
        .find_map(|command| command.trigger.strip(content).map(|args| (command, args)))
}

/// The reply to `!info`.
pub fn command_listing() -> String {
    let lines: Vec<String> = TEXT_COMMANDS
        .iter()
        .filter_map(|command| {
            let description = command.description?;
            Some(format!("`!{}` : {}", command.name, description))
        })
        .collect();

    format!("Here are all the available commands:\n\n{}", lines.join("\n"))
}
