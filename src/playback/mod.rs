//! One-shot audio playback
//!
//! Decodes a base64-encoded audio payload (any container symphonia supports)
//! into PCM and hands it to a configured sink. Playback is fire-and-forget:
//! start and failure are reported via logging only, never to the caller.

mod clip;
mod player;
mod sink;

pub use clip::AudioClip;
pub use player::Player;
pub use sink::{AudioSink, NullSink, SinkFactory, WavFileSink};
