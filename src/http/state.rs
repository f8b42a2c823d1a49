use crate::config::{Config, RecognizerSettings};
use crate::playback::{Player, SinkFactory};
use crate::session::SpeechSession;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active speech sessions (session_id → session)
    pub sessions: Arc<RwLock<HashMap<String, Arc<SpeechSession>>>>,

    /// Recognition engine settings used when creating sessions
    pub recognizer: RecognizerSettings,

    /// Fire-and-forget audio playback
    pub player: Arc<Player>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let sink = SinkFactory::create(&config.playback)?;

        Ok(Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            recognizer: config.recognizer.clone(),
            player: Arc::new(Player::new(sink)),
        })
    }
}
