use anyhow::Result;
use tokio::sync::mpsc;

/// A single recognition segment inside a result window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedSegment {
    /// Transcribed text for this segment
    pub text: String,
    /// Whether the engine will revise this segment further
    pub is_final: bool,
}

/// One result event from the engine
///
/// The engine reports only the newly-changed window of segments, not the
/// whole session history. The finality of the *last* segment decides whether
/// the window is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEvent {
    pub segments: Vec<RecognizedSegment>,
}

/// Event emitted by a recognition backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// A window of interim/final recognition segments
    Result(ResultEvent),
    /// The engine terminated the recognition stream, for any reason
    Ended,
}

/// Configuration for a recognition backend
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// NATS server URL for the remote engine
    pub nats_url: String,
    /// Recognition locale (e.g. "ja-JP")
    pub locale: String,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            nats_url: "nats://localhost:4222".to_string(),
            locale: "ja-JP".to_string(),
        }
    }
}

/// Recognition backend trait
///
/// Models the external continuous, interim-enabled recognition engine as an
/// opaque capability. Implementations:
/// - NATS: remote STT engine reached over NATS subjects
/// - Test doubles: scripted backends driven from integration tests
#[async_trait::async_trait]
pub trait RecognizerBackend: Send + Sync {
    /// Activate recognition
    ///
    /// Returns a channel receiver that will receive recognition events.
    /// Closure of the channel without a prior `Ended` is treated as `Ended`.
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>>;

    /// Deactivate recognition
    async fn stop(&mut self) -> Result<()>;

    /// Check if the backend is currently listening
    fn is_listening(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Recognition engine kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerEngine {
    /// Remote engine over NATS
    Nats,
}

impl RecognizerEngine {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "nats" => Ok(Self::Nats),
            other => anyhow::bail!("unknown recognition engine: {}", other),
        }
    }
}

/// Recognition backend factory
pub struct RecognizerFactory;

impl RecognizerFactory {
    /// Create a backend for the given engine and session
    pub async fn create(
        engine: RecognizerEngine,
        config: RecognizerConfig,
        session_id: &str,
    ) -> Result<Box<dyn RecognizerBackend>> {
        match engine {
            RecognizerEngine::Nats => {
                let backend = super::nats::NatsRecognizer::connect(&config, session_id).await?;
                Ok(Box::new(backend))
            }
        }
    }
}
