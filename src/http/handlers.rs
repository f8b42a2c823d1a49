use super::state::AppState;
use crate::recognizer::{RecognizerConfig, RecognizerEngine, RecognizerFactory};
use crate::session::{SessionConfig, SessionStats, SpeechSession, TranscriptSegment};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    /// Recognition locale override
    pub locale: Option<String>,

    /// Silence limit override in milliseconds (default from config: 20000)
    pub silence_limit_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub session_id: String,
    pub status: String,
    pub final_text: String,
    pub stats: SessionStats,
}

#[derive(Debug, Serialize)]
pub struct LiveTextResponse {
    pub session_id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayAudioRequest {
    /// Base64-encoded audio asset
    pub audio: String,
}

#[derive(Debug, Serialize)]
pub struct PlayAudioResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions/start
/// Create and start a new speech session
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> impl IntoResponse {
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));

    info!("Starting speech session: {}", session_id);

    // Check if the session already exists
    {
        let sessions = state.sessions.read().await;
        if sessions.contains_key(&session_id) {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Session {} already exists", session_id),
                }),
            )
                .into_response();
        }
    }

    let engine = match RecognizerEngine::parse(&state.recognizer.engine) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Invalid recognizer configuration: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Invalid recognizer configuration: {}", e),
                }),
            )
                .into_response();
        }
    };

    let locale = req
        .locale
        .unwrap_or_else(|| state.recognizer.locale.clone());

    let backend_config = RecognizerConfig {
        nats_url: state.recognizer.nats_url.clone(),
        locale: locale.clone(),
    };

    let backend = match RecognizerFactory::create(engine, backend_config, &session_id).await {
        Ok(backend) => backend,
        Err(e) => {
            error!("Failed to create recognition backend: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create recognition backend: {}", e),
                }),
            )
                .into_response();
        }
    };

    let config = SessionConfig {
        session_id: session_id.clone(),
        locale,
        silence_limit: Duration::from_millis(
            req.silence_limit_ms
                .unwrap_or(state.recognizer.silence_limit_ms),
        ),
        ..SessionConfig::default()
    };

    let session = Arc::new(SpeechSession::new(config, backend));

    if let Err(e) = session.start().await {
        error!("Failed to start session: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to start session: {}", e),
            }),
        )
            .into_response();
    }

    // Store session
    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id.clone(), session);
    }

    info!("Speech session started: {}", session_id);

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id: session_id.clone(),
            status: "listening".to_string(),
            message: format!("Session {} is listening", session_id),
        }),
    )
        .into_response()
}

/// POST /sessions/:session_id/stop
/// Stop a speech session and return the final transcript
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("Stopping speech session: {}", session_id);

    // Find and remove session
    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match session {
        Some(session) => match session.stop().await {
            Ok(final_text) => {
                let stats = session.stats().await;

                info!("Speech session stopped: {}", session_id);
                (
                    StatusCode::OK,
                    Json(StopSessionResponse {
                        session_id,
                        status: "stopped".to_string(),
                        final_text,
                        stats,
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                error!("Failed to stop session: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to stop session: {}", e),
                    }),
                )
                    .into_response()
            }
        },
        None => {
            error!("Session {} not found", session_id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Session {} not found", session_id),
                }),
            )
                .into_response()
        }
    }
}

/// GET /sessions/:session_id/status
/// Get status of a speech session
pub async fn get_session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            let stats = session.stats().await;
            (StatusCode::OK, Json(stats)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /sessions/:session_id/text
/// Get the current live transcript (committed text plus interim tail)
pub async fn get_session_text(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            let text = session.live_text().await;
            (
                StatusCode::OK,
                Json(LiveTextResponse { session_id, text }),
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /sessions/:session_id/transcript
/// Get the per-event transcript history (accumulated so far)
pub async fn get_session_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            let transcript: Vec<TranscriptSegment> = session.transcript().await;
            (StatusCode::OK, Json(transcript)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// POST /playback
/// Decode and play a base64 audio payload (fire-and-forget)
pub async fn play_audio(
    State(state): State<AppState>,
    Json(req): Json<PlayAudioRequest>,
) -> impl IntoResponse {
    state.player.play_base64(&req.audio);

    (
        StatusCode::ACCEPTED,
        Json(PlayAudioResponse {
            status: "accepted".to_string(),
        }),
    )
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
