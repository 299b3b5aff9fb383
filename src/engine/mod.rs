//! The playback synchronizer.
//!
//! [`Engine`] is an explicitly constructed, caller-owned handle around the
//! state machine: commands and backend callbacks lock the state, reduce to
//! effects, and execute them (backend calls, event publication) before the
//! lock is released. That single critical section is the serialization
//! point the whole design leans on — a scrub can never interleave with a
//! spoken-range callback.

mod events;
mod reducer;
mod state;

pub use events::EngineEvent;
pub use state::{PlaybackMode, ResumeOffset, Snapshot};

use crate::config::{EngineConfig, MAX_PITCH, MAX_RATE, MIN_PITCH, MIN_RATE};
use crate::speech::{SpeechBackend, SpeechEvent};
use reducer::{Core, Effect};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Utterance id attached to every request the engine issues.
pub const ENGINE_UTTERANCE_ID: &str = "readalong.engine";

/// Caller-owned playback synchronizer; cheap to clone and share.
///
/// No command blocks on the speech capability: `play`, `pause` and `seek`
/// return once the request is issued, and completion is observed through
/// the subscribed event stream.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    core: Core,
    backend: Box<dyn SpeechBackend>,
    subscribers: Vec<Sender<EngineEvent>>,
}

impl Engine {
    /// Build an engine around a speech backend, applying the configured
    /// language, pitch and rate up front.
    pub fn new(mut backend: Box<dyn SpeechBackend>, config: EngineConfig) -> Self {
        let config = config.clamped();
        backend.set_language(&config.language);
        backend.set_pitch(config.pitch);
        backend.set_rate(config.rate);
        info!(
            language = %config.language,
            pitch = config.pitch,
            rate = config.rate,
            "Initializing read-along engine"
        );
        Engine {
            inner: Arc::new(Mutex::new(Inner {
                core: Core::new(),
                backend,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Replace the document, recomputing segmentation and resetting
    /// playback.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.dispatch(move |core, effects| core.set_document(text, effects));
    }

    pub fn play(&self) {
        self.dispatch(Core::handle_play);
    }

    pub fn pause(&self) {
        self.dispatch(Core::handle_pause);
    }

    /// Scrub to an absolute word index, pausing playback.
    pub fn seek(&self, word_index: usize) {
        self.dispatch(move |core, effects| core.handle_seek(word_index, effects));
    }

    pub fn forward(&self) {
        self.dispatch(Core::handle_forward);
    }

    pub fn backward(&self) {
        self.dispatch(Core::handle_backward);
    }

    /// Entry point for backend callbacks. Adapters call this from their own
    /// execution context; the engine marshals the event onto its
    /// serialization point here.
    pub fn handle_speech_event(&self, event: SpeechEvent) {
        self.dispatch(move |core, effects| core.handle_speech_event(event, effects));
    }

    pub fn set_language(&self, language: &str) {
        let mut inner = self.lock();
        inner.backend.set_language(language);
        info!(language, "Updated speech language");
    }

    /// Adjust voice shaping; values are clamped to the supported ranges.
    pub fn set_pitch_and_speed(&self, pitch: f32, rate: f32) {
        let pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);
        let rate = rate.clamp(MIN_RATE, MAX_RATE);
        let mut inner = self.lock();
        inner.backend.set_pitch(pitch);
        inner.backend.set_rate(rate);
        info!(pitch, rate, "Updated speech pitch and rate");
    }

    /// Subscribe to state-change events. Dropped receivers are pruned on
    /// the next publication.
    pub fn subscribe(&self) -> Receiver<EngineEvent> {
        let (tx, rx) = channel();
        self.lock().subscribers.push(tx);
        rx
    }

    /// Read-only copy of the current state for rendering.
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.lock();
        Snapshot {
            mode: inner.core.state.mode,
            cursor: inner.core.state.cursor,
            highlight: inner.core.state.highlight,
            total_words: inner.core.total_words,
            current_segment: inner.core.state.current_segment,
            segments: inner.core.segments.clone(),
        }
    }

    /// Stop any speech and drop subscribers; the engine can be reused by
    /// setting a new document.
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        inner.backend.stop();
        inner.core.reset_playback();
        inner.subscribers.clear();
        info!("Engine shut down");
    }

    fn dispatch(&self, apply: impl FnOnce(&mut Core, &mut Vec<Effect>)) {
        let mut inner = self.lock();
        let mut effects = Vec::new();
        apply(&mut inner.core, &mut effects);
        inner.run_effects(effects);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Speak { text, queue } => {
                    self.backend.speak(&text, queue, ENGINE_UTTERANCE_ID);
                }
                Effect::StopSpeech => {
                    if self.backend.is_speaking() {
                        self.backend.stop();
                    }
                }
                Effect::Emit(event) => self.publish(event),
            }
        }
    }

    fn publish(&mut self, event: EngineEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
