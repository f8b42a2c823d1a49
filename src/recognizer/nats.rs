use anyhow::{Context, Result};
use async_nats::Client;
use futures::stream::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::backend::{
    RecognitionEvent, RecognizedSegment, RecognizerBackend, RecognizerConfig, ResultEvent,
};
use super::messages::{ControlMessage, LifecycleMessage, ResultMessage};

/// Recognition backend that binds to a remote STT engine over NATS
///
/// Control messages go out on `stt.control.<session>`; result windows arrive
/// on `stt.text.<session>` and lifecycle notices on `stt.session.<session>`.
pub struct NatsRecognizer {
    client: Client,
    session_id: String,
    locale: String,
    listening: bool,
    forwarder: Option<JoinHandle<()>>,
}

impl NatsRecognizer {
    /// Connect to the NATS server backing the recognition engine
    pub async fn connect(config: &RecognizerConfig, session_id: &str) -> Result<Self> {
        info!("Connecting to recognition engine at {}", config.nats_url);

        let client = async_nats::connect(&config.nats_url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to recognition engine");

        Ok(Self {
            client,
            session_id: session_id.to_string(),
            locale: config.locale.clone(),
            listening: false,
            forwarder: None,
        })
    }

    async fn publish_control(&self, action: &str) -> Result<()> {
        let subject = format!("stt.control.{}", self.session_id);

        let message = ControlMessage {
            session_id: self.session_id.clone(),
            action: action.to_string(),
            locale: self.locale.clone(),
            interim: true,
            continuous: true,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish control message")?;

        info!("Published {} control to {}", action, subject);

        Ok(())
    }
}

#[async_trait::async_trait]
impl RecognizerBackend for NatsRecognizer {
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>> {
        let results = self
            .client
            .subscribe(format!("stt.text.{}", self.session_id))
            .await
            .context("Failed to subscribe to result messages")?;

        let lifecycle = self
            .client
            .subscribe(format!("stt.session.{}", self.session_id))
            .await
            .context("Failed to subscribe to lifecycle messages")?;

        self.publish_control("start").await?;

        let (tx, rx) = mpsc::channel(64);

        let session_id = self.session_id.clone();
        self.forwarder = Some(tokio::spawn(forward_events(
            results, lifecycle, tx, session_id,
        )));

        self.listening = true;

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if !self.listening {
            return Ok(());
        }
        self.listening = false;

        self.publish_control("stop").await?;

        // The forwarder has no cleanup of its own; tear it down directly
        if let Some(task) = self.forwarder.take() {
            task.abort();
            let _ = task.await;
        }

        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn name(&self) -> &str {
        "nats"
    }
}

/// Bridge NATS messages onto the recognition event channel
async fn forward_events(
    mut results: async_nats::Subscriber,
    mut lifecycle: async_nats::Subscriber,
    tx: mpsc::Sender<RecognitionEvent>,
    session_id: String,
) {
    loop {
        tokio::select! {
            msg = results.next() => match msg {
                Some(msg) => match serde_json::from_slice::<ResultMessage>(&msg.payload) {
                    Ok(result) => {
                        // Defensive filter: subjects are per-session, but the
                        // payload carries the id too
                        if result.session_id != session_id {
                            continue;
                        }

                        let segments = result
                            .segments
                            .into_iter()
                            .map(|s| RecognizedSegment {
                                text: s.text,
                                is_final: s.is_final,
                            })
                            .collect();

                        let event = RecognitionEvent::Result(ResultEvent { segments });
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to parse result message: {}", e);
                    }
                },
                None => {
                    // Subscription dropped out from under us
                    warn!("Result subscription closed for session {}", session_id);
                    let _ = tx.send(RecognitionEvent::Ended).await;
                    break;
                }
            },

            msg = lifecycle.next() => match msg {
                Some(msg) => match serde_json::from_slice::<LifecycleMessage>(&msg.payload) {
                    Ok(notice) => {
                        if notice.session_id != session_id {
                            continue;
                        }

                        if notice.event == "ended" {
                            info!(
                                "Engine ended session {} ({})",
                                session_id,
                                notice.reason.as_deref().unwrap_or("no reason given")
                            );
                            let _ = tx.send(RecognitionEvent::Ended).await;
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to parse lifecycle message: {}", e);
                    }
                },
                None => {
                    warn!("Lifecycle subscription closed for session {}", session_id);
                    let _ = tx.send(RecognitionEvent::Ended).await;
                    break;
                }
            },
        }
    }
}
