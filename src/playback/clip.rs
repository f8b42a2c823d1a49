use anyhow::{Context, Result};
use base64::Engine;
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::warn;

/// A fully decoded audio asset (interleaved 16-bit PCM)
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_seconds: f64,
}

impl AudioClip {
    /// Decode a base64-encoded audio payload
    pub fn from_base64(payload: &str) -> Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .context("Failed to decode base64 audio payload")?;

        Self::from_bytes(bytes)
    }

    /// Decode an in-memory audio asset (any container symphonia supports)
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let stream = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

        let probed = symphonia::default::get_probe()
            .format(
                &Hint::new(),
                stream,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .context("Unrecognized audio container format")?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .context("No decodable audio track in payload")?;
        let track_id = track.id;

        let sample_rate = track
            .codec_params
            .sample_rate
            .context("Audio track is missing a sample rate")?;
        let channels = track
            .codec_params
            .channels
            .context("Audio track is missing a channel layout")?
            .count() as u16;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .context("Failed to create audio decoder")?;

        let mut samples: Vec<i16> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(e).context("Failed to read audio packet"),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    let mut buffer =
                        SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
                    buffer.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buffer.samples());
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    // Recoverable per the decoder contract; skip the packet
                    warn!("Skipping undecodable audio packet: {}", e);
                }
                Err(e) => return Err(e).context("Failed to decode audio packet"),
            }
        }

        if samples.is_empty() {
            anyhow::bail!("Audio payload contained no samples");
        }

        let duration_seconds =
            samples.len() as f64 / (sample_rate as f64 * channels as f64);

        Ok(Self {
            samples,
            sample_rate,
            channels,
            duration_seconds,
        })
    }
}
