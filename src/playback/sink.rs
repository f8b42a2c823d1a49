use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::clip::AudioClip;
use crate::config::PlaybackSettings;

/// Audio output sink trait
///
/// The physical output device lives behind this seam. Implementations:
/// - WavFileSink: renders clips to WAV files for a downstream player
/// - NullSink: discards clips (hosts without audio output)
#[async_trait::async_trait]
pub trait AudioSink: Send + Sync {
    /// Play a decoded clip to completion
    async fn play(&self, clip: AudioClip) -> Result<()>;

    /// Get sink name for logging
    fn name(&self) -> &str;
}

/// Renders each clip to a WAV file in the output directory
pub struct WavFileSink {
    output_dir: PathBuf,
}

impl WavFileSink {
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&output_dir).context("Failed to create playback output directory")?;
        Ok(Self { output_dir })
    }
}

#[async_trait::async_trait]
impl AudioSink for WavFileSink {
    async fn play(&self, clip: AudioClip) -> Result<()> {
        let path = self
            .output_dir
            .join(format!("playback-{}.wav", uuid::Uuid::new_v4()));

        let spec = hound::WavSpec {
            channels: clip.channels,
            sample_rate: clip.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        // Rendering is blocking file IO; clips are short, keep it simple
        let mut writer = hound::WavWriter::create(&path, spec)
            .with_context(|| format!("Failed to create WAV file: {:?}", path))?;

        for &sample in &clip.samples {
            writer
                .write_sample(sample)
                .context("Failed to write sample to WAV")?;
        }

        writer.finalize().context("Failed to finalize WAV file")?;

        info!(
            "Rendered clip to {:?} ({:.1}s, {} Hz, {} channels)",
            path, clip.duration_seconds, clip.sample_rate, clip.channels
        );

        Ok(())
    }

    fn name(&self) -> &str {
        "wav-file"
    }
}

/// Discards every clip
pub struct NullSink;

#[async_trait::async_trait]
impl AudioSink for NullSink {
    async fn play(&self, clip: AudioClip) -> Result<()> {
        debug!(
            "Discarding clip ({:.1}s, {} Hz, {} channels)",
            clip.duration_seconds, clip.sample_rate, clip.channels
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Audio sink factory
pub struct SinkFactory;

impl SinkFactory {
    /// Create a sink from playback settings
    pub fn create(settings: &PlaybackSettings) -> Result<Arc<dyn AudioSink>> {
        match settings.sink.as_str() {
            "wav-file" => {
                let sink = WavFileSink::new(PathBuf::from(&settings.output_dir))?;
                Ok(Arc::new(sink))
            }
            "null" => Ok(Arc::new(NullSink)),
            other => anyhow::bail!("unknown playback sink: {}", other),
        }
    }
}
