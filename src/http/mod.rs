//! HTTP API server for external control
//!
//! This module provides a REST API for controlling speech sessions:
//! - POST /sessions/start - Create and start a session
//! - POST /sessions/:id/stop - Stop a session, returns the final transcript
//! - GET /sessions/:id/status - Query session status
//! - GET /sessions/:id/text - Current live transcript
//! - GET /sessions/:id/transcript - Per-event transcript history
//! - POST /playback - Decode and play a base64 audio payload
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
