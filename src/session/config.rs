use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Policy for restarting the recognition engine after an uncommanded end
///
/// The engine may unilaterally terminate long-running recognition. Restarts
/// mask that as a transient fault, up to `max_restarts` attempts per session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RestartPolicy {
    /// Maximum consecutive restart attempts; `None` retries indefinitely
    pub max_restarts: Option<u32>,
    /// Delay before each restart attempt
    pub backoff: Duration,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self {
            max_restarts: Some(5),
            backoff: Duration::from_millis(500),
        }
    }
}

/// Configuration for a speech session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g. "session-2025-10-28-practice")
    pub session_id: String,

    /// Recognition locale
    pub locale: String,

    /// Inactivity window after which the session is force-stopped
    /// Default: 20 seconds
    pub silence_limit: Duration,

    /// Engine restart policy
    pub restart: RestartPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            locale: "ja-JP".to_string(),
            silence_limit: Duration::from_secs(20),
            restart: RestartPolicy::default(),
        }
    }
}
