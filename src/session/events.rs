use serde::Serialize;

/// Why a session reached its terminal stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The caller asked for the stop
    Requested,
    /// No recognition activity within the silence limit
    SilenceTimeout,
    /// The engine kept terminating and the restart budget ran out
    EngineLost,
}

/// Event broadcast to session subscribers
///
/// `Transcript` events always carry the complete transcript-so-far, never a
/// delta, so subscribers need no accumulation of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The live transcript changed (or the session just started, with empty text)
    Transcript { text: String, is_final: bool },
    /// The engine was reactivated after an uncommanded end
    Restarted { attempt: u32 },
    /// The session reached a terminal stop; `final_text` is the trimmed
    /// committed transcript
    Stopped {
        reason: StopReason,
        final_text: String,
    },
}
