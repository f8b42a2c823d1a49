use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recognizer::ResultEvent;

/// A single transcript segment, as applied from one result event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Concatenated text of the result window
    pub text: String,

    /// When this segment was received
    pub timestamp: DateTime<Utc>,

    /// Whether this window was final (committed)
    pub is_final: bool,
}

/// Accumulated transcript state for one session
///
/// `committed` holds every finalized window, each followed by a single
/// trailing space; it only grows within a session and is reset exactly at
/// session start. `live` is `committed` plus the not-yet-finalized tail of
/// the current utterance, and is what subscribers observe.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    committed: String,
    live: String,
    segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all state for a new session
    pub fn reset(&mut self) {
        self.committed.clear();
        self.live.clear();
        self.segments.clear();
    }

    /// Apply one result window and return the updated live text
    ///
    /// The window's segment texts are concatenated; the finality of the last
    /// segment decides whether the whole window is committed. Finalization is
    /// the only point at which text becomes immune to later revision by the
    /// engine.
    pub fn apply(&mut self, result: &ResultEvent) -> (String, bool) {
        let mut text = String::new();
        for segment in &result.segments {
            text.push_str(&segment.text);
        }

        let is_final = result
            .segments
            .last()
            .map(|segment| segment.is_final)
            .unwrap_or(false);

        if is_final {
            self.committed.push_str(&text);
            self.committed.push(' ');
            self.live = self.committed.clone();
        } else {
            self.live = format!("{}{}", self.committed, text);
        }

        self.segments.push(TranscriptSegment {
            text,
            timestamp: Utc::now(),
            is_final,
        });

        (self.live.clone(), is_final)
    }

    /// The committed (finalized) transcript, raw form with trailing space
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// The live transcript: committed text plus any interim tail
    pub fn live(&self) -> &str {
        &self.live
    }

    /// The final form delivered at stop: committed text only, trimmed
    pub fn final_text(&self) -> String {
        self.committed.trim().to_string()
    }

    /// Per-event history of applied windows
    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }
}
