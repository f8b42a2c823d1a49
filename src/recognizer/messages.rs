use serde::{Deserialize, Serialize};

/// Control message published to the recognition engine
#[derive(Debug, Serialize, Deserialize)]
pub struct ControlMessage {
    pub session_id: String,
    pub action: String, // "start" | "stop"
    pub locale: String,
    pub interim: bool,
    pub continuous: bool,
    pub timestamp: String, // RFC3339 timestamp
}

/// One segment inside a result window
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentMessage {
    pub text: String,
    #[serde(rename = "final")]
    pub is_final: bool,
}

/// Result window received from the recognition engine
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultMessage {
    pub session_id: String,
    pub segments: Vec<SegmentMessage>,
    pub timestamp: String,
}

/// Session lifecycle message from the recognition engine
#[derive(Debug, Serialize, Deserialize)]
pub struct LifecycleMessage {
    pub session_id: String,
    pub event: String, // "ended"
    pub reason: Option<String>,
    pub timestamp: String,
}
