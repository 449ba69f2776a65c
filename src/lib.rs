//! Abby, a Discord bot that answers a handful of text and slash commands,
//! proxies music playback to songbird and keeps a persistent message fresh.

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use serenity::{ClientBuilder, GatewayIntents};
use songbird::{SerenityInit, Songbird};
use tracing::{debug, info};

pub mod commands;
pub mod config;
pub mod events;
pub mod utils;

use commands::music::utils::music_manager::{MusicEngine, SongbirdEngine};
use config::Config;
use utils::persistent_message::PersistentMessageTracker;
use utils::platform::{ChatPlatform, SerenityPlatform};
use utils::tenor::{GifSearch, TenorClient};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data shared by every command invocation and gateway event.
pub struct Data {
    pub platform: Arc<dyn ChatPlatform>,
    pub music: Arc<dyn MusicEngine>,
    pub gifs: Arc<dyn GifSearch>,
    pub tracker: PersistentMessageTracker,
}

impl Data {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        music: Arc<dyn MusicEngine>,
        gifs: Arc<dyn GifSearch>,
    ) -> Self {
        Self {
            platform,
            music,
            gifs,
            tracker: PersistentMessageTracker::default(),
        }
    }
}

/// Connect to Discord and process events until the client stops or Ctrl-C is received.
pub async fn run(config: Config) -> Result<(), Error> {
    let intents = GatewayIntents::non_privileged()
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_VOICE_STATES;

    let songbird = Songbird::serenity();
    let voice = Arc::clone(&songbird);
    let http_client = reqwest::Client::new();
    let gifs = TenorClient::new(
        http_client.clone(),
        config.tenor_base_url.clone(),
        config.tenor_api_key.clone(),
        config.tenor_client_key.clone(),
    );

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::slash_commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(commands::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                debug!(
                    "Registered {} slash commands",
                    framework.options().commands.len()
                );

                let platform = SerenityPlatform::new(ctx.http.clone(), ctx.cache.clone());
                let music = SongbirdEngine::new(voice, ctx.http.clone(), http_client);

                Ok(Data::new(
                    Arc::new(platform),
                    Arc::new(music),
                    Arc::new(gifs),
                ))
            })
        })
        .build();

    let mut client = ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .register_songbird_with(songbird)
        .await?;

    tokio::select! {
        result = client.start() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}
