use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a speech session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Whether the session is currently listening
    pub is_listening: bool,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Total duration in seconds
    pub duration_secs: f64,

    /// Number of result windows applied so far
    pub segment_count: usize,

    /// Length of the committed transcript, in characters
    pub committed_chars: usize,

    /// Number of engine restart attempts in the current session
    pub restarts: u32,
}
