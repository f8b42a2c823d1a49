pub mod backend;
pub mod messages;
pub mod nats;

pub use backend::{
    RecognitionEvent, RecognizedSegment, RecognizerBackend, RecognizerConfig, RecognizerEngine,
    RecognizerFactory, ResultEvent,
};
pub use messages::{ControlMessage, LifecycleMessage, ResultMessage, SegmentMessage};
pub use nats::NatsRecognizer;
