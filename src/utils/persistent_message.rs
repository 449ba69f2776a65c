//! A bot-owned message that is kept at the bottom of one channel.
//!
//! Once more than [`REPOST_THRESHOLD`] other messages have been posted in the
//! tracked channel, the message is deleted and sent again. The state lock is
//! only held while deciding what to do and while recording the result; the
//! Discord calls themselves run unlocked, so a slow call never holds up
//! messages in other channels. At most one repost is in flight at a time, and
//! a repost or set that was overtaken by a later `set`/`stop` discards its
//! result instead of overwriting the newer state.

use poise::serenity_prelude::{ChannelId, MessageId};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::platform::ChatPlatform;
use crate::Error;

/// Messages tolerated after the persistent message before it is reposted.
pub const REPOST_THRESHOLD: u32 = 5;

/// Snapshot of the tracker. When `active` is false every other field is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistentMessageState {
    pub active: bool,
    pub target_channel_id: Option<ChannelId>,
    pub last_message_id: Option<MessageId>,
    pub content: Option<String>,
    pub messages_since_repost: u32,
}

/// What an observed message did to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityOutcome {
    /// Tracker inactive, or the message was in another channel.
    Ignored,
    /// Counted; holds the new counter value.
    Counted(u32),
    /// The message was posted again under a new id.
    Reposted(MessageId),
    /// Reposting failed; the next qualifying message retries.
    RepostFailed,
    /// The tracker was set or stopped while reposting, so the repost was dropped.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped(ChannelId),
    NotActive,
    /// Active, but not in the requested channel (or it could not be resolved).
    WrongChannel,
}

#[derive(Debug, Default)]
struct TrackerInner {
    state: PersistentMessageState,
    /// Bumped by every `set` and `stop`.
    generation: u64,
    reposting: bool,
}

#[derive(Debug, Default)]
pub struct PersistentMessageTracker {
    inner: Mutex<TrackerInner>,
}

impl PersistentMessageTracker {
    pub async fn snapshot(&self) -> PersistentMessageState {
        self.inner.lock().await.state.clone()
    }

    /// Post `content` in `channel_id` and start tracking it, replacing any
    /// previous persistent message.
    ///
    /// The previous message is deleted before sending. If the send fails the
    /// tracker keeps its previous channel and content, without a message id.
    pub async fn set(
        &self,
        platform: &dyn ChatPlatform,
        channel_id: ChannelId,
        content: String,
    ) -> Result<MessageId, Error> {
        let (previous, generation) = {
            let mut inner = self.inner.lock().await;
            inner.generation += 1;
            inner.reposting = false;
            let previous_channel = inner.state.target_channel_id;
            let previous = previous_channel.zip(inner.state.last_message_id.take());
            (previous, inner.generation)
        };

        if let Some((previous_channel, previous_message)) = previous {
            if let Err(e) = platform
                .delete_message(previous_channel, previous_message)
                .await
            {
                warn!(
                    "Failed to delete previous persistent message {} in channel {}: {}",
                    previous_message, previous_channel, e
                );
            }
        }

        let message_id = platform.send(channel_id, &content).await?;

        let superseded = {
            let mut inner = self.inner.lock().await;
            if inner.generation == generation {
                inner.state = PersistentMessageState {
                    active: true,
                    target_channel_id: Some(channel_id),
                    last_message_id: Some(message_id),
                    content: Some(content),
                    messages_since_repost: 0,
                };
                false
            } else {
                true
            }
        };

        if superseded {
            debug!(
                "Persistent message {} was replaced before it was recorded",
                message_id
            );
            discard(platform, channel_id, message_id).await;
        } else {
            info!("Persistent message set in channel {}", channel_id);
        }

        Ok(message_id)
    }

    /// Count a non-command message, reposting once the threshold is exceeded.
    ///
    /// Messages arriving while a repost is in flight are only counted.
    pub async fn observe_activity(
        &self,
        platform: &dyn ChatPlatform,
        channel_id: ChannelId,
    ) -> ActivityOutcome {
        let (content, previous, generation) = {
            let mut inner = self.inner.lock().await;
            let state = &mut inner.state;

            if !state.active || state.target_channel_id != Some(channel_id) {
                return ActivityOutcome::Ignored;
            }

            state.messages_since_repost += 1;
            let count = state.messages_since_repost;
            if count <= REPOST_THRESHOLD || inner.reposting {
                return ActivityOutcome::Counted(count);
            }

            let Some(content) = inner.state.content.clone() else {
                return ActivityOutcome::Ignored;
            };
            inner.reposting = true;
            (content, inner.state.last_message_id.take(), inner.generation)
        };

        if let Some(previous_message) = previous {
            // Someone may already have deleted it
            if let Err(e) = platform.delete_message(channel_id, previous_message).await {
                debug!(
                    "Could not delete persistent message {}: {}",
                    previous_message, e
                );
            }
        }

        let sent = platform.send(channel_id, &content).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            drop(inner);
            if let Ok(message_id) = sent {
                discard(platform, channel_id, message_id).await;
            }
            return ActivityOutcome::Superseded;
        }

        inner.reposting = false;
        match sent {
            Ok(message_id) => {
                inner.state.last_message_id = Some(message_id);
                inner.state.messages_since_repost = 0;
                debug!("Reposted persistent message in channel {}", channel_id);
                ActivityOutcome::Reposted(message_id)
            }
            Err(e) => {
                error!("Error managing persistent message: {}", e);
                ActivityOutcome::RepostFailed
            }
        }
    }

    /// Stop tracking and delete the last posted message.
    ///
    /// `channel_id` is the channel the caller asked to stop, `None` if it could
    /// not be resolved.
    pub async fn stop(
        &self,
        platform: &dyn ChatPlatform,
        channel_id: Option<ChannelId>,
    ) -> StopOutcome {
        let (channel_id, last_message_id) = {
            let mut inner = self.inner.lock().await;

            if !inner.state.active {
                return StopOutcome::NotActive;
            }
            let Some(channel_id) =
                channel_id.filter(|id| inner.state.target_channel_id == Some(*id))
            else {
                return StopOutcome::WrongChannel;
            };

            let last_message_id = inner.state.last_message_id;
            inner.state = PersistentMessageState::default();
            inner.generation += 1;
            inner.reposting = false;
            (channel_id, last_message_id)
        };

        if let Some(message_id) = last_message_id {
            if let Err(e) = platform.delete_message(channel_id, message_id).await {
                error!("Error deleting persistent message during stop: {}", e);
            }
        }
        info!("Persistent message in channel {} stopped", channel_id);

        StopOutcome::Stopped(channel_id)
    }
}

/// Delete a message that lost the race against a newer `set` or `stop`.
async fn discard(platform: &dyn ChatPlatform, channel_id: ChannelId, message_id: MessageId) {
    if let Err(e) = platform.delete_message(channel_id, message_id).await {
        warn!("Failed to delete stale persistent message {}: {}", message_id, e);
    }
}
