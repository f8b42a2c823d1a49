use std::sync::Arc;
use tracing::{error, info};

use super::clip::AudioClip;
use super::sink::AudioSink;

/// Fire-and-forget playback of base64 audio payloads
///
/// Stateless with respect to speech sessions; safe to use concurrently with
/// active recognition. Decode or playback failure is logged and never
/// propagated.
pub struct Player {
    sink: Arc<dyn AudioSink>,
}

impl Player {
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self { sink }
    }

    /// Decode and play a base64-encoded audio payload asynchronously
    ///
    /// Returns immediately; playback runs on a spawned task.
    pub fn play_base64(&self, payload: &str) {
        let payload = payload.to_string();
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            let clip = match AudioClip::from_base64(&payload) {
                Ok(clip) => clip,
                Err(e) => {
                    error!("Failed to decode audio payload: {:#}", e);
                    return;
                }
            };

            info!(
                "Audio playback started ({:.1}s, {} Hz, {} channels)",
                clip.duration_seconds, clip.sample_rate, clip.channels
            );

            if let Err(e) = sink.play(clip).await {
                error!("Audio playback failed: {:#}", e);
            }
        });
    }
}
