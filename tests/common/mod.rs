//! Common test utilities, fixtures, and fakes
//! This module contains shared functionality used by the integration tests

#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;

use std::sync::{Arc, Once};

use abby::Data;
use tracing::Level;

use mocks::{FakeGifSearch, FakeMusicEngine, FakePlatform};

static INIT: Once = Once::new();

/// Initialize tracing for tests
pub fn init() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .init();
    });
}

/// The bot's shared data wired to fakes, plus handles to inspect them.
pub struct TestBot {
    pub data: Arc<Data>,
    pub platform: Arc<FakePlatform>,
    pub music: Arc<FakeMusicEngine>,
    pub gifs: Arc<FakeGifSearch>,
}

impl TestBot {
    pub fn new() -> Self {
        Self::with(FakeMusicEngine::default(), FakeGifSearch::default())
    }

    pub fn with(music: FakeMusicEngine, gifs: FakeGifSearch) -> Self {
        init();

        let platform = Arc::new(FakePlatform::default());
        let music = Arc::new(music);
        let gifs = Arc::new(gifs);
        let data = Data::new(platform.clone(), music.clone(), gifs.clone());

        Self {
            data: Arc::new(data),
            platform,
            music,
            gifs,
        }
    }
}
