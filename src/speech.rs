//! The external speech capability consumed by the engine.
//!
//! The crate synthesizes nothing itself; a platform adapter implements
//! [`SpeechBackend`] and feeds its asynchronous callbacks back in as
//! [`SpeechEvent`]s via `Engine::handle_speech_event`.

/// How a new utterance interacts with whatever is already queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Drop any queued or in-flight audio and replace it.
    Flush,
    /// Queue behind the current utterance.
    Append,
}

/// Capability surface a speech adapter must provide.
///
/// Re-entrancy contract: implementations deliver their [`SpeechEvent`]s from
/// their own execution context (a callback thread, an event loop), never
/// synchronously from inside `speak` or `stop`. The engine invokes this
/// trait while holding its state lock and relies on that.
pub trait SpeechBackend: Send {
    fn speak(&mut self, text: &str, queue: QueueMode, utterance_id: &str);
    fn stop(&mut self);
    fn is_speaking(&self) -> bool;
    fn set_pitch(&mut self, pitch: f32);
    fn set_rate(&mut self, rate: f32);
    fn set_language(&mut self, language: &str);
}

/// Asynchronous notifications from the speech capability.
///
/// `RangeSpoken` offsets are byte offsets into the text of the current
/// utterance (not the document), and arrive in non-decreasing `start` order
/// within one utterance; the engine does not reorder them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    UtteranceStarted { utterance_id: String },
    UtteranceDone { utterance_id: String },
    UtteranceError { utterance_id: String },
    RangeSpoken { start: usize, end: usize },
}
