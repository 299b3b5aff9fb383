use serde::Serialize;
use thiserror::Error;

/// Failures surfaced on the engine's event stream.
///
/// Every failure is local and non-fatal: it is either absorbed into a state
/// transition (out-of-range seeks restart from the top, unresolved seeks
/// are ignored, unresolved highlights fall back to a sentinel) or published
/// as an `EngineEvent::Error`. Nothing panics across the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum PlaybackError {
    /// `play` was requested while the document was blank or segmented to
    /// nothing speakable.
    #[error("text to speech text is empty")]
    EmptyInput,
    /// Forwarded verbatim from the speech capability.
    #[error("speech backend reported an error for utterance {0}")]
    SpeechBackend(String),
}
