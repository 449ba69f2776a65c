use std::sync::Arc;

use dashmap::DashMap;
use poise::serenity_prelude::{ChannelId, GuildId, Http};
use rand::seq::SliceRandom;
use serenity::async_trait;
use serenity::prelude::Mutex as SerenityMutex;
use songbird::input::YoutubeDl;
use songbird::tracks::Track;
use songbird::{Call, Event, Songbird, TrackEvent};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::event_handlers::{self, MusicEvent, TrackErrorNotifier, TrackStartAnnouncer};
use super::track_metadata::{self, ResolvedQuery, TrackMetadata};

/// Volume for guilds that never set one, in percent.
pub const DEFAULT_VOLUME: u8 = 50;

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("No queue")]
    NoQueue,

    #[error("No results found for {0}")]
    NoResults(String),

    #[error("Cannot resolve {0}")]
    CannotResolve(String),

    #[error("Audio source error: {0}")]
    AudioSourceError(String),

    #[error("Playback control failed: {0}")]
    ControlError(String),
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

/// A request to play something in a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub guild_id: GuildId,
    /// The voice channel of the member who asked.
    pub voice_channel_id: ChannelId,
    /// Where announcements for these tracks are posted.
    pub text_channel_id: ChannelId,
    pub query: String,
}

/// What a play request added to the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    Track(TrackMetadata),
    Playlist { name: String, count: usize },
}

/// Playback control as seen by the command handlers.
///
/// Every method except `play` acts on the guild's current queue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MusicEngine: Send + Sync {
    /// Resolve the query, join the voice channel if needed and enqueue the result.
    async fn play(&self, request: PlayRequest) -> MusicResult<PlayOutcome>;

    /// Whether the guild has anything playing or queued.
    async fn has_queue(&self, guild_id: GuildId) -> bool;

    async fn stop(&self, guild_id: GuildId) -> MusicResult<()>;

    /// Disconnect from the guild's voice channel.
    async fn leave(&self, guild_id: GuildId) -> MusicResult<()>;

    async fn skip(&self, guild_id: GuildId) -> MusicResult<()>;

    /// Shuffle upcoming tracks. The current track keeps playing.
    async fn shuffle(&self, guild_id: GuildId) -> MusicResult<()>;

    async fn pause(&self, guild_id: GuildId) -> MusicResult<()>;

    async fn resume(&self, guild_id: GuildId) -> MusicResult<()>;

    /// Set the volume in percent, 1 to 100.
    async fn set_volume(&self, guild_id: GuildId, volume: u8) -> MusicResult<()>;
}

/// `MusicEngine` backed by songbird's builtin track queue and `yt-dlp`.
pub struct SongbirdEngine {
    songbird: Arc<Songbird>,
    http: Arc<Http>,
    client: reqwest::Client,
    volumes: DashMap<GuildId, u8>,
}

impl SongbirdEngine {
    pub fn new(songbird: Arc<Songbird>, http: Arc<Http>, client: reqwest::Client) -> Self {
        Self {
            songbird,
            http,
            client,
            volumes: DashMap::new(),
        }
    }

    fn volume(&self, guild_id: GuildId) -> f32 {
        let percent = self
            .volumes
            .get(&guild_id)
            .map(|volume| *volume)
            .unwrap_or(DEFAULT_VOLUME);
        f32::from(percent) / 100.0
    }

    /// Get the current voice channel call handle
    fn get_call(&self, guild_id: GuildId) -> MusicResult<Arc<SerenityMutex<Call>>> {
        self.songbird.get(guild_id).ok_or(MusicError::NotConnected)
    }

    /// Get the call for a guild that has something queued.
    async fn get_queued_call(&self, guild_id: GuildId) -> MusicResult<Arc<SerenityMutex<Call>>> {
        let call = self.get_call(guild_id).map_err(|_| MusicError::NoQueue)?;
        if call.lock().await.queue().is_empty() {
            return Err(MusicError::NoQueue);
        }
        Ok(call)
    }

    /// Join the voice channel if not already connected, or get the existing call
    async fn confirm_voice_connection(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        if let Some(call) = self.songbird.get(guild_id) {
            return Ok(call);
        }

        self.songbird.join(guild_id, channel_id).await.map_err(|err| {
            error!(
                "Failed to join voice channel {} for guild {}: {}",
                channel_id, guild_id, err
            );
            MusicError::JoinError(err.to_string())
        })
    }

    async fn enqueue(
        &self,
        call: &SerenityMutex<Call>,
        request: &PlayRequest,
        tracks: &[TrackMetadata],
    ) -> bool {
        let volume = self.volume(request.guild_id);
        let mut handler = call.lock().await;
        let was_empty = handler.queue().is_empty();

        for metadata in tracks {
            let input = YoutubeDl::new(self.client.clone(), metadata.url.clone());
            let track = Track::from(input).volume(volume);

            let handle = handler.enqueue(track).await;

            let announcer = TrackStartAnnouncer {
                http: self.http.clone(),
                channel_id: request.text_channel_id,
                track: metadata.clone(),
            };
            if let Err(e) = handle.add_event(Event::Track(TrackEvent::Play), announcer) {
                warn!("Failed to attach announcer to '{}': {}", metadata.title, e);
            }

            let notifier = TrackErrorNotifier {
                http: self.http.clone(),
                channel_id: request.text_channel_id,
                track: metadata.clone(),
            };
            if let Err(e) = handle.add_event(Event::Track(TrackEvent::Error), notifier) {
                warn!("Failed to attach error notifier to '{}': {}", metadata.title, e);
            }
        }
        debug!(
            "Enqueued {} tracks for guild {}, queue length now {}",
            tracks.len(),
            request.guild_id,
            handler.queue().len()
        );

        was_empty
    }
}

#[async_trait]
impl MusicEngine for SongbirdEngine {
    async fn play(&self, request: PlayRequest) -> MusicResult<PlayOutcome> {
        info!(
            "Play request for guild {}: {}",
            request.guild_id, request.query
        );
        let ResolvedQuery { playlist, tracks } = track_metadata::resolve(&request.query).await?;

        let call = self
            .confirm_voice_connection(request.guild_id, request.voice_channel_id)
            .await?;
        let was_empty = self.enqueue(&call, &request, &tracks).await;

        let outcome = match playlist {
            Some(name) => PlayOutcome::Playlist {
                name,
                count: tracks.len(),
            },
            None => match tracks.into_iter().next() {
                Some(track) => PlayOutcome::Track(track),
                None => return Err(MusicError::NoResults(request.query)),
            },
        };

        match &outcome {
            PlayOutcome::Playlist { name, count } => {
                let event = MusicEvent::AddList {
                    name: name.as_str(),
                    count: *count,
                };
                event_handlers::announce(&self.http, request.text_channel_id, event).await;
            }
            PlayOutcome::Track(track) if !was_empty => {
                let event = MusicEvent::AddSong(track);
                event_handlers::announce(&self.http, request.text_channel_id, event).await;
            }
            PlayOutcome::Track(_) => {}
        }

        Ok(outcome)
    }

    async fn has_queue(&self, guild_id: GuildId) -> bool {
        self.get_queued_call(guild_id).await.is_ok()
    }

    async fn stop(&self, guild_id: GuildId) -> MusicResult<()> {
        let call = self.get_call(guild_id).map_err(|_| MusicError::NoQueue)?;
        call.lock().await.queue().stop();
        info!("Stopped playback for guild {}", guild_id);
        Ok(())
    }

    async fn leave(&self, guild_id: GuildId) -> MusicResult<()> {
        if self.songbird.get(guild_id).is_none() {
            return Err(MusicError::NotConnected);
        }

        self.songbird
            .remove(guild_id)
            .await
            .map_err(|e| MusicError::JoinError(format!("Failed to leave voice channel: {}", e)))?;
        info!("Left voice channel in guild {}", guild_id);
        Ok(())
    }

    async fn skip(&self, guild_id: GuildId) -> MusicResult<()> {
        let call = self.get_queued_call(guild_id).await?;
        call.lock()
            .await
            .queue()
            .skip()
            .map_err(|e| MusicError::ControlError(e.to_string()))
    }

    async fn shuffle(&self, guild_id: GuildId) -> MusicResult<()> {
        let call = self.get_queued_call(guild_id).await?;
        call.lock().await.queue().modify_queue(|queue| {
            if queue.len() > 2 {
                queue.make_contiguous()[1..].shuffle(&mut rand::rng());
            }
        });
        debug!("Shuffled queue for guild {}", guild_id);
        Ok(())
    }

    async fn pause(&self, guild_id: GuildId) -> MusicResult<()> {
        let call = self.get_queued_call(guild_id).await?;
        call.lock()
            .await
            .queue()
            .pause()
            .map_err(|e| MusicError::ControlError(e.to_string()))
    }

    async fn resume(&self, guild_id: GuildId) -> MusicResult<()> {
        let call = self.get_queued_call(guild_id).await?;
        call.lock()
            .await
            .queue()
            .resume()
            .map_err(|e| MusicError::ControlError(e.to_string()))
    }

    async fn set_volume(&self, guild_id: GuildId, volume: u8) -> MusicResult<()> {
        let call = self.get_queued_call(guild_id).await?;
        self.volumes.insert(guild_id, volume);
        let level = self.volume(guild_id);

        for handle in call.lock().await.queue().current_queue() {
            if let Err(e) = handle.set_volume(level) {
                warn!("Failed to set volume on a track in guild {}: {}", guild_id, e);
            }
        }
        info!("Volume for guild {} set to {}%", guild_id, volume);
        Ok(())
    }
}
