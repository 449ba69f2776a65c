use std::sync::Arc;

use poise::serenity_prelude::{ChannelId, Http};
use serenity::async_trait;
use songbird::tracks::PlayMode;
use songbird::{Event, EventContext, EventHandler};
use tracing::{error, warn};

use super::music_manager::MusicError;
use super::track_metadata::TrackMetadata;

/// Something the music engine reports back to the text channel it was asked from.
#[derive(Debug)]
pub enum MusicEvent<'a> {
    PlaySong(&'a TrackMetadata),
    AddSong(&'a TrackMetadata),
    AddList { name: &'a str, count: usize },
    SearchNoResult(&'a str),
    Error(&'a MusicError),
}

impl MusicEvent<'_> {
    pub fn announcement(&self) -> String {
        match self {
            MusicEvent::PlaySong(track) => {
                format!("Playing: {} - `{}`", track.title, track.formatted_duration())
            }
            MusicEvent::AddSong(track) => format!(
                "Added to queue: {} - `{}`",
                track.title,
                track.formatted_duration()
            ),
            MusicEvent::AddList { name, count } => format!(
                "Playlist `{}` with {} songs has been added to the queue!",
                name, count
            ),
            MusicEvent::SearchNoResult(query) => format!("No results found for \"{}\".", query),
            MusicEvent::Error(MusicError::CannotResolve(_)) => {
                "I couldn't find the song you requested. Please try another search term."
                    .to_string()
            }
            MusicEvent::Error(error) => format!("An unexpected error occurred: {}", error),
        }
    }
}

/// Post an announcement, logging instead of failing.
pub async fn announce(http: &Http, channel_id: ChannelId, event: MusicEvent<'_>) {
    if let Err(e) = channel_id.say(http, event.announcement()).await {
        warn!("Failed to announce in channel {}: {}", channel_id, e);
    }
}

/// Announces a track once, when it starts playing.
pub struct TrackStartAnnouncer {
    pub http: Arc<Http>,
    pub channel_id: ChannelId,
    pub track: TrackMetadata,
}

#[async_trait]
impl EventHandler for TrackStartAnnouncer {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(_) = ctx {
            announce(&self.http, self.channel_id, MusicEvent::PlaySong(&self.track)).await;
        }
        Some(Event::Cancel)
    }
}

/// Reports tracks that fail while loading or playing.
pub struct TrackErrorNotifier {
    pub http: Arc<Http>,
    pub channel_id: ChannelId,
    pub track: TrackMetadata,
}

#[async_trait]
impl EventHandler for TrackErrorNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(tracks) = ctx {
            for (state, _) in tracks.iter() {
                if let PlayMode::Errored(e) = &state.playing {
                    error!("Track '{}' failed: {}", self.track.title, e);
                    let error = MusicError::AudioSourceError(e.to_string());
                    announce(&self.http, self.channel_id, MusicEvent::Error(&error)).await;
                }
            }
        }
        None
    }
}
