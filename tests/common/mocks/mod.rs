//! Recording fakes for the bot's collaborators

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use abby::Error;
use abby::commands::music::utils::music_manager::{
    MusicEngine, MusicError, MusicResult, PlayOutcome, PlayRequest,
};
use abby::commands::music::utils::track_metadata::TrackMetadata;
use abby::utils::platform::ChatPlatform;
use abby::utils::tenor::{GifSearch, TenorError};
use async_trait::async_trait;
use poise::serenity_prelude::{ChannelId, GuildId, MessageId, UserId};
use tokio::sync::Semaphore;

/// A call made against the fake platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Reply {
        channel_id: ChannelId,
        content: String,
    },
    Send {
        channel_id: ChannelId,
        content: String,
        message_id: MessageId,
    },
    Delete {
        channel_id: ChannelId,
        message_id: MessageId,
    },
}

#[derive(Default)]
pub struct FakePlatform {
    calls: Mutex<Vec<PlatformCall>>,
    sent: AtomicU64,
    hidden_channels: Mutex<HashSet<ChannelId>>,
    failing_sends: AtomicBool,
    voice_channel: Mutex<Option<ChannelId>>,
    holding_sends: AtomicBool,
    held_sends: AtomicU64,
    send_gate: SendGate,
}

/// Starts closed.
struct SendGate(Semaphore);

impl Default for SendGate {
    fn default() -> Self {
        Self(Semaphore::new(0))
    }
}

impl FakePlatform {
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn replies(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Reply { content, .. } => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn last_reply(&self) -> Option<String> {
        self.replies().pop()
    }

    pub fn sends(&self) -> Vec<(ChannelId, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Send {
                    channel_id,
                    content,
                    ..
                } => Some((channel_id, content)),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<(ChannelId, MessageId)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Delete {
                    channel_id,
                    message_id,
                } => Some((channel_id, message_id)),
                _ => None,
            })
            .collect()
    }

    /// Make a channel invisible to the bot.
    pub fn hide_channel(&self, channel_id: ChannelId) {
        self.hidden_channels.lock().unwrap().insert(channel_id);
    }

    pub fn fail_sends(&self, failing: bool) {
        self.failing_sends.store(failing, Ordering::SeqCst);
    }

    /// Park every following send until [`FakePlatform::release_sends`].
    pub fn hold_sends(&self) {
        self.holding_sends.store(true, Ordering::SeqCst);
    }

    pub fn release_sends(&self) {
        self.holding_sends.store(false, Ordering::SeqCst);
        self.send_gate.0.add_permits(1);
    }

    /// Number of sends that have been parked so far.
    pub fn held_sends(&self) -> u64 {
        self.held_sends.load(Ordering::SeqCst)
    }

    /// Put every member in `channel_id`.
    pub fn join_voice(&self, channel_id: ChannelId) {
        *self.voice_channel.lock().unwrap() = Some(channel_id);
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn reply(
        &self,
        channel_id: ChannelId,
        _message_id: MessageId,
        content: &str,
    ) -> Result<(), Error> {
        self.record(PlatformCall::Reply {
            channel_id,
            content: content.to_string(),
        });
        Ok(())
    }

    async fn send(&self, channel_id: ChannelId, content: &str) -> Result<MessageId, Error> {
        // Give concurrent events a chance to interleave
        tokio::task::yield_now().await;

        if self.holding_sends.load(Ordering::SeqCst) {
            self.held_sends.fetch_add(1, Ordering::SeqCst);
            let _permit = self.send_gate.0.acquire().await?;
        }

        if self.failing_sends.load(Ordering::SeqCst) {
            return Err("Missing Permissions".into());
        }

        let message_id = MessageId::new(1000 + self.sent.fetch_add(1, Ordering::SeqCst));
        self.record(PlatformCall::Send {
            channel_id,
            content: content.to_string(),
            message_id,
        });
        Ok(message_id)
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), Error> {
        tokio::task::yield_now().await;
        self.record(PlatformCall::Delete {
            channel_id,
            message_id,
        });
        Ok(())
    }

    async fn channel_exists(&self, channel_id: ChannelId) -> bool {
        !self.hidden_channels.lock().unwrap().contains(&channel_id)
    }

    fn user_voice_channel(&self, _guild_id: GuildId, _user_id: UserId) -> Option<ChannelId> {
        *self.voice_channel.lock().unwrap()
    }
}

/// A call made against the fake music engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MusicCall {
    Play(PlayRequest),
    Stop,
    Leave,
    Skip,
    Shuffle,
    Pause,
    Resume,
    SetVolume(u8),
}

/// A music engine with a single boolean queue.
#[derive(Default)]
pub struct FakeMusicEngine {
    playing: AtomicBool,
    calls: Mutex<Vec<MusicCall>>,
}

impl FakeMusicEngine {
    pub fn playing() -> Self {
        let engine = Self::default();
        engine.playing.store(true, Ordering::SeqCst);
        engine
    }

    pub fn calls(&self) -> Vec<MusicCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: MusicCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn queued(&self) -> MusicResult<()> {
        if self.playing.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(MusicError::NoQueue)
        }
    }
}

#[async_trait]
impl MusicEngine for FakeMusicEngine {
    async fn play(&self, request: PlayRequest) -> MusicResult<PlayOutcome> {
        let title = request.query.clone();
        self.record(MusicCall::Play(request));
        self.playing.store(true, Ordering::SeqCst);

        Ok(PlayOutcome::Track(TrackMetadata {
            title,
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            duration: Some(Duration::from_secs(180)),
        }))
    }

    async fn has_queue(&self, _guild_id: GuildId) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    async fn stop(&self, _guild_id: GuildId) -> MusicResult<()> {
        self.record(MusicCall::Stop);
        self.queued()?;
        self.playing.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn leave(&self, _guild_id: GuildId) -> MusicResult<()> {
        self.record(MusicCall::Leave);
        Ok(())
    }

    async fn skip(&self, _guild_id: GuildId) -> MusicResult<()> {
        self.record(MusicCall::Skip);
        self.queued()
    }

    async fn shuffle(&self, _guild_id: GuildId) -> MusicResult<()> {
        self.record(MusicCall::Shuffle);
        self.queued()
    }

    async fn pause(&self, _guild_id: GuildId) -> MusicResult<()> {
        self.record(MusicCall::Pause);
        self.queued()
    }

    async fn resume(&self, _guild_id: GuildId) -> MusicResult<()> {
        self.record(MusicCall::Resume);
        self.queued()
    }

    async fn set_volume(&self, _guild_id: GuildId, volume: u8) -> MusicResult<()> {
        self.record(MusicCall::SetVolume(volume));
        self.queued()
    }
}

/// GIF search with canned results.
#[derive(Default)]
pub struct FakeGifSearch {
    results: Vec<String>,
    failing: bool,
    queries: Mutex<Vec<String>>,
}

impl FakeGifSearch {
    pub fn returning(results: &[&str]) -> Self {
        Self {
            results: results.iter().map(|url| url.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl GifSearch for FakeGifSearch {
    async fn search(&self, query: &str) -> Result<Vec<String>, TenorError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.failing {
            let error = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
            return Err(TenorError::Json(error));
        }
        Ok(self.results.clone())
    }
}
