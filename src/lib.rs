pub mod config;
pub mod http;
pub mod playback;
pub mod recognizer;
pub mod session;

pub use config::Config;
pub use http::{create_router, AppState};
pub use playback::{AudioClip, AudioSink, NullSink, Player, SinkFactory, WavFileSink};
pub use recognizer::{
    NatsRecognizer, RecognitionEvent, RecognizedSegment, RecognizerBackend, RecognizerConfig,
    RecognizerEngine, RecognizerFactory, ResultEvent,
};
pub use session::{
    RestartPolicy, SessionConfig, SessionEvent, SessionStats, SpeechSession, StopReason,
    Transcript, TranscriptSegment,
};
