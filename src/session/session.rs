use super::config::SessionConfig;
use super::events::{SessionEvent, StopReason};
use super::stats::SessionStats;
use super::transcript::{Transcript, TranscriptSegment};
use crate::recognizer::{RecognitionEvent, RecognizerBackend};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// A speech session that manages recognition, transcript accumulation,
/// the silence watchdog, and engine auto-restart
///
/// The session owns an injected `RecognizerBackend` and runs all state
/// transitions on a single event task, so transcript mutations are
/// serialized. Subscribers observe the session through a broadcast channel:
/// a `Transcript` event once at start (empty), on every recognition result
/// (full accumulated text), and a `Stopped` event at the terminal stop with
/// the trimmed committed transcript.
pub struct SpeechSession {
    /// Session configuration
    config: SessionConfig,

    /// Recognition backend; present while idle, moved into the event task
    /// while listening
    backend: Mutex<Option<Box<dyn RecognizerBackend>>>,

    /// When the session (last) started
    started_at: Mutex<DateTime<Utc>>,

    /// Whether the session is currently listening
    is_listening: Arc<AtomicBool>,

    /// True only while a caller-initiated stop (explicit or watchdog) is in
    /// effect; cleared by every start
    user_requested_stop: Arc<AtomicBool>,

    /// Engine restart attempts in the current session
    restarts: Arc<AtomicU32>,

    /// Accumulated transcript state
    transcript: Arc<Mutex<Transcript>>,

    /// Broadcast channel for session events
    events: broadcast::Sender<SessionEvent>,

    /// Signal used by `stop()` to wake the event task
    stop_tx: Mutex<Option<mpsc::Sender<()>>>,

    /// Handle for the event task; resolves to the backend for reuse
    task: Mutex<Option<JoinHandle<Box<dyn RecognizerBackend>>>>,
}

impl SpeechSession {
    /// Create a new session around an injected recognition backend
    pub fn new(config: SessionConfig, backend: Box<dyn RecognizerBackend>) -> Self {
        let (events, _) = broadcast::channel(64);

        Self {
            config,
            backend: Mutex::new(Some(backend)),
            started_at: Mutex::new(Utc::now()),
            is_listening: Arc::new(AtomicBool::new(false)),
            user_requested_stop: Arc::new(AtomicBool::new(false)),
            restarts: Arc::new(AtomicU32::new(0)),
            transcript: Arc::new(Mutex::new(Transcript::new())),
            events,
            stop_tx: Mutex::new(None),
            task: Mutex::new(None),
        }
    }

    /// Subscribe to session events
    ///
    /// Subscribe before `start()` to observe the initial empty transcript
    /// event. Multiple subscribers are supported; dropping the receiver is
    /// the teardown.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Start listening
    ///
    /// Resets the transcript (a new session discards prior text), clears the
    /// stop flag, activates the backend, arms the silence watchdog, and
    /// broadcasts an empty `Transcript` event so subscribers observe a
    /// defined initial state.
    pub async fn start(&self) -> Result<()> {
        if self.is_listening.load(Ordering::SeqCst) {
            anyhow::bail!("Session {} is already listening", self.config.session_id);
        }

        // Reclaim the backend if a previous run ended on its own
        // (watchdog or engine loss)
        if let Some(task) = self.task.lock().await.take() {
            match task.await {
                Ok(backend) => *self.backend.lock().await = Some(backend),
                Err(e) => error!("Session task panicked: {}", e),
            }
        }

        let mut backend = self
            .backend
            .lock()
            .await
            .take()
            .context("Recognition backend unavailable")?;

        let events_rx = backend
            .start()
            .await
            .context("Failed to start recognition backend")?;

        self.user_requested_stop.store(false, Ordering::SeqCst);
        self.restarts.store(0, Ordering::SeqCst);
        self.transcript.lock().await.reset();
        *self.started_at.lock().await = Utc::now();
        self.is_listening.store(true, Ordering::SeqCst);

        let _ = self.events.send(SessionEvent::Transcript {
            text: String::new(),
            is_final: false,
        });

        let (stop_tx, stop_rx) = mpsc::channel(1);
        *self.stop_tx.lock().await = Some(stop_tx);

        let task = self.spawn_event_task(backend, events_rx, stop_rx);
        *self.task.lock().await = Some(task);

        info!("Speech session {} started", self.config.session_id);

        Ok(())
    }

    /// Stop listening and return the final trimmed committed transcript
    ///
    /// Safe to call when already stopped: the final text is returned again
    /// without re-driving the backend.
    pub async fn stop(&self) -> Result<String> {
        self.user_requested_stop.store(true, Ordering::SeqCst);

        let stop_tx = self.stop_tx.lock().await.take();
        if let Some(tx) = stop_tx {
            // Send failure means the event task already stopped itself
            let _ = tx.send(()).await;
        }

        if let Some(task) = self.task.lock().await.take() {
            match task.await {
                Ok(backend) => *self.backend.lock().await = Some(backend),
                Err(e) => error!("Session task panicked: {}", e),
            }
        }

        Ok(self.transcript.lock().await.final_text())
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.config.session_id
    }

    /// Whether the session is currently listening
    pub fn is_listening(&self) -> bool {
        self.is_listening.load(Ordering::SeqCst)
    }

    /// Current live transcript (committed text plus interim tail)
    pub async fn live_text(&self) -> String {
        self.transcript.lock().await.live().to_string()
    }

    /// Current final form of the transcript (committed text, trimmed)
    pub async fn final_text(&self) -> String {
        self.transcript.lock().await.final_text()
    }

    /// Per-event transcript history
    pub async fn transcript(&self) -> Vec<TranscriptSegment> {
        self.transcript.lock().await.segments().to_vec()
    }

    /// Current session statistics
    pub async fn stats(&self) -> SessionStats {
        let started_at = *self.started_at.lock().await;
        let duration = Utc::now().signed_duration_since(started_at);

        let (segment_count, committed_chars) = {
            let transcript = self.transcript.lock().await;
            (
                transcript.segments().len(),
                transcript.committed().chars().count(),
            )
        };

        SessionStats {
            is_listening: self.is_listening.load(Ordering::SeqCst),
            started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            segment_count,
            committed_chars,
            restarts: self.restarts.load(Ordering::SeqCst),
        }
    }

    /// Spawn the event task: a select loop over backend events, the silence
    /// watchdog deadline, and the stop signal
    fn spawn_event_task(
        &self,
        mut backend: Box<dyn RecognizerBackend>,
        mut events_rx: mpsc::Receiver<RecognitionEvent>,
        mut stop_rx: mpsc::Receiver<()>,
    ) -> JoinHandle<Box<dyn RecognizerBackend>> {
        let transcript = Arc::clone(&self.transcript);
        let user_stop = Arc::clone(&self.user_requested_stop);
        let is_listening = Arc::clone(&self.is_listening);
        let restarts = Arc::clone(&self.restarts);
        let events = self.events.clone();
        let silence_limit = self.config.silence_limit;
        let restart_policy = self.config.restart;
        let session_id = self.config.session_id.clone();

        tokio::spawn(async move {
            // The engine stream may be replaced (restart) or go dead
            // (intentional stop in flight)
            let mut stream_active = true;
            let mut deadline = Instant::now() + silence_limit;

            loop {
                tokio::select! {
                    _ = stop_rx.recv() => {
                        if let Err(e) = backend.stop().await {
                            warn!("Failed to stop recognition backend: {:#}", e);
                        }

                        let final_text = transcript.lock().await.final_text();
                        is_listening.store(false, Ordering::SeqCst);
                        let _ = events.send(SessionEvent::Stopped {
                            reason: StopReason::Requested,
                            final_text,
                        });

                        info!("Speech session {} stopped", session_id);
                        break;
                    }

                    _ = tokio::time::sleep_until(deadline) => {
                        info!(
                            "Silence limit reached for session {}, stopping",
                            session_id
                        );
                        user_stop.store(true, Ordering::SeqCst);

                        if let Err(e) = backend.stop().await {
                            warn!("Failed to stop recognition backend: {:#}", e);
                        }

                        let final_text = transcript.lock().await.final_text();
                        is_listening.store(false, Ordering::SeqCst);
                        let _ = events.send(SessionEvent::Stopped {
                            reason: StopReason::SilenceTimeout,
                            final_text,
                        });
                        break;
                    }

                    event = events_rx.recv(), if stream_active => match event {
                        Some(RecognitionEvent::Result(result)) => {
                            let (live, is_final) =
                                transcript.lock().await.apply(&result);
                            let _ = events.send(SessionEvent::Transcript {
                                text: live,
                                is_final,
                            });

                            // Every recognition event proves liveness
                            deadline = Instant::now() + silence_limit;
                        }

                        Some(RecognitionEvent::Ended) | None => {
                            if user_stop.load(Ordering::SeqCst) {
                                // Intentional stop; teardown happens on the
                                // stop signal
                                stream_active = false;
                                continue;
                            }

                            let attempt =
                                restarts.fetch_add(1, Ordering::SeqCst) + 1;

                            if let Some(max) = restart_policy.max_restarts {
                                if attempt > max {
                                    warn!(
                                        "Recognition engine lost for session {} after {} restarts",
                                        session_id, max
                                    );

                                    if let Err(e) = backend.stop().await {
                                        warn!("Failed to stop recognition backend: {:#}", e);
                                    }

                                    let final_text =
                                        transcript.lock().await.final_text();
                                    is_listening.store(false, Ordering::SeqCst);
                                    let _ = events.send(SessionEvent::Stopped {
                                        reason: StopReason::EngineLost,
                                        final_text,
                                    });
                                    break;
                                }
                            }

                            tokio::time::sleep(restart_policy.backoff).await;

                            match backend.start().await {
                                Ok(rx) => {
                                    events_rx = rx;
                                    warn!(
                                        "Recognition ended on its own, restarted session {} (attempt {})",
                                        session_id, attempt
                                    );
                                    let _ = events.send(SessionEvent::Restarted { attempt });
                                }
                                Err(e) => {
                                    warn!("Failed to restart recognition backend: {:#}", e);
                                    // Feed the loop a closed stream so the
                                    // next iteration retries under the same
                                    // budget
                                    let (closed_tx, closed_rx) = mpsc::channel(1);
                                    drop(closed_tx);
                                    events_rx = closed_rx;
                                }
                            }
                        }
                    },
                }
            }

            backend
        })
    }
}
