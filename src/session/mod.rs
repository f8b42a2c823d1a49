//! Speech session management
//!
//! This module provides the `SpeechSession` abstraction that manages:
//! - An injected recognition backend (start/stop/auto-restart)
//! - Transcript accumulation across interim/final recognition events
//! - The silence watchdog that force-stops idle sessions
//! - Session event broadcasting and statistics

mod config;
mod events;
mod session;
mod stats;
mod transcript;

pub use config::{RestartPolicy, SessionConfig};
pub use events::{SessionEvent, StopReason};
pub use session::SpeechSession;
pub use stats::SessionStats;
pub use transcript::{Transcript, TranscriptSegment};
