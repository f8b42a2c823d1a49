use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub recognizer: RecognizerSettings,
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecognizerSettings {
    /// Recognition engine kind ("nats" is the only production engine)
    pub engine: String,
    pub nats_url: String,
    pub locale: String,
    pub silence_limit_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Sink kind: "wav-file" or "null"
    pub sink: String,
    pub output_dir: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "speech-session".to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8090,
        }
    }
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            engine: "nats".to_string(),
            nats_url: "nats://localhost:4222".to_string(),
            locale: "ja-JP".to_string(),
            silence_limit_ms: 20_000,
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            sink: "wav-file".to_string(),
            output_dir: "playback".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
