//! Pure transition logic for the playback state machine.
//!
//! Every user command and backend callback reduces to a list of [`Effect`]s;
//! the engine handle executes them against the backend and the subscriber
//! list. Keeping the reducer side-effect free is what makes the state
//! machine testable without a speech capability.

use crate::engine::events::EngineEvent;
use crate::engine::state::{PlaybackMode, PlaybackState, ResumeOffset};
use crate::error::PlaybackError;
use crate::highlight::resolve_span;
use crate::seek::{SeekResolution, resolve_seek};
use crate::segmenter::{Segment, segment_text};
use crate::speech::{QueueMode, SpeechEvent};
use crate::text_utils::count_words;
use tracing::{debug, info, warn};

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Effect {
    Speak { text: String, queue: QueueMode },
    /// Stop the backend iff it reports it is speaking.
    StopSpeech,
    Emit(EngineEvent),
}

pub(crate) struct Core {
    document: String,
    pub(super) segments: Vec<Segment>,
    pub(super) total_words: usize,
    pub(super) state: PlaybackState,
}

impl Core {
    pub(super) fn new() -> Self {
        let document = String::new();
        Core {
            total_words: count_words(&document),
            segments: Vec::new(),
            document,
            state: PlaybackState::new(),
        }
    }

    pub(super) fn set_document(&mut self, text: String, effects: &mut Vec<Effect>) {
        effects.push(Effect::StopSpeech);
        self.document = text;
        self.total_words = count_words(&self.document);
        self.segments = segment_text(&self.document);
        self.state.current_segment = 0;
        self.state.cursor = 0.0;
        self.state.resume = None;
        self.state.highlight = None;
        self.state.utterance.clear();
        self.set_mode(PlaybackMode::Idle, effects);
        effects.push(Effect::Emit(EngineEvent::HighlightChanged { span: None }));
        effects.push(Effect::Emit(EngineEvent::CursorMoved { cursor: 0.0 }));
        info!(
            total_words = self.total_words,
            segment_count = self.segments.len(),
            "Document replaced"
        );
    }

    pub(super) fn handle_play(&mut self, effects: &mut Vec<Effect>) {
        if self.document.trim().is_empty() || self.segments.is_empty() {
            warn!("Play requested with nothing to speak");
            effects.push(Effect::Emit(EngineEvent::Error {
                error: PlaybackError::EmptyInput,
            }));
            return;
        }
        if let Some(resume) = self.state.resume {
            // Spoken prefixes accumulate: each resume slices the tail of the
            // previous utterance, not of the segment text.
            self.state.utterance = self
                .state
                .utterance
                .get(resume.end..)
                .unwrap_or_default()
                .to_string();
        } else {
            self.state.utterance = self.segments[self.state.current_segment].text.clone();
        }
        info!(
            segment = self.state.current_segment,
            resumed = self.state.resume.is_some(),
            "Starting playback"
        );
        effects.push(Effect::Speak {
            text: self.state.utterance.clone(),
            queue: QueueMode::Flush,
        });
        let span = resolve_span(&self.document, &self.segments[self.state.current_segment].text);
        self.state.highlight = Some(span);
        effects.push(Effect::Emit(EngineEvent::HighlightChanged { span: Some(span) }));
        self.set_mode(PlaybackMode::Playing, effects);
    }

    pub(super) fn handle_pause(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::StopSpeech);
        self.set_mode(PlaybackMode::Paused, effects);
    }

    pub(super) fn handle_seek(&mut self, target_word: usize, effects: &mut Vec<Effect>) {
        match resolve_seek(&self.segments, self.total_words, target_word) {
            SeekResolution::OutOfRange => {
                info!(target_word, "Seek past the end; restarting from the top");
                effects.push(Effect::StopSpeech);
                self.state.current_segment = 0;
                self.state.cursor = 0.0;
                self.state.resume = None;
                let segment = &self.segments[0];
                self.state.utterance = segment.text.clone();
                let span = resolve_span(&self.document, &segment.text);
                self.state.highlight = Some(span);
                effects.push(Effect::Emit(EngineEvent::HighlightChanged { span: Some(span) }));
                effects.push(Effect::Emit(EngineEvent::CursorMoved { cursor: 0.0 }));
                self.set_mode(PlaybackMode::Paused, effects);
            }
            SeekResolution::Within {
                segment_index,
                resume_offset,
            } => {
                info!(target_word, segment = segment_index, resume_offset, "Seek into segment");
                effects.push(Effect::StopSpeech);
                self.state.current_segment = segment_index;
                let segment = &self.segments[segment_index];
                self.state.utterance = segment.text.clone();
                self.state.resume = Some(ResumeOffset {
                    start: 0,
                    end: resume_offset,
                });
                self.state.cursor = target_word as f32;
                let span = resolve_span(&self.document, &segment.text);
                self.state.highlight = Some(span);
                effects.push(Effect::Emit(EngineEvent::HighlightChanged { span: Some(span) }));
                effects.push(Effect::Emit(EngineEvent::CursorMoved {
                    cursor: self.state.cursor,
                }));
                self.set_mode(PlaybackMode::Paused, effects);
            }
            // The resolver logs these; the seek changes nothing, not even
            // the playback mode.
            SeekResolution::Unresolved => {}
        }
    }

    pub(super) fn handle_forward(&mut self, effects: &mut Vec<Effect>) {
        if self.state.current_segment + 1 >= self.segments.len() {
            debug!("Already at the last segment");
            return;
        }
        self.step_to(self.state.current_segment + 1, effects);
    }

    pub(super) fn handle_backward(&mut self, effects: &mut Vec<Effect>) {
        if self.state.current_segment == 0 {
            debug!("Already at the first segment");
            return;
        }
        self.step_to(self.state.current_segment - 1, effects);
    }

    pub(super) fn handle_speech_event(&mut self, event: SpeechEvent, effects: &mut Vec<Effect>) {
        match event {
            SpeechEvent::UtteranceStarted { .. } => {
                effects.push(Effect::Emit(EngineEvent::SegmentStarted {
                    index: self.state.current_segment,
                }));
            }
            SpeechEvent::UtteranceDone { .. } => self.handle_utterance_done(effects),
            SpeechEvent::UtteranceError { utterance_id } => {
                warn!(utterance_id = %utterance_id, "Speech backend reported an error");
                effects.push(Effect::Emit(EngineEvent::Error {
                    error: PlaybackError::SpeechBackend(utterance_id),
                }));
            }
            SpeechEvent::RangeSpoken { start, end } => {
                self.handle_range_spoken(start, end, effects);
            }
        }
    }

    pub(super) fn reset_playback(&mut self) {
        self.state = PlaybackState::new();
    }

    fn handle_range_spoken(&mut self, start: usize, end: usize, effects: &mut Vec<Effect>) {
        self.state.resume = Some(ResumeOffset { start, end });
        if self.state.cursor < self.total_words as f32 {
            self.state.cursor += 1.0;
        }
        // Highlight stays segment-level while the cursor walks word by word.
        effects.push(Effect::Emit(EngineEvent::HighlightChanged {
            span: self.state.highlight,
        }));
        effects.push(Effect::Emit(EngineEvent::CursorMoved {
            cursor: self.state.cursor,
        }));
    }

    fn handle_utterance_done(&mut self, effects: &mut Vec<Effect>) {
        if self.segments.is_empty() {
            debug!("Ignoring utterance-done with no document");
            return;
        }
        self.state.resume = None;
        let next = self.state.current_segment + 1;
        if next < self.segments.len() {
            debug!(segment = next, "Advancing to next segment");
            self.state.current_segment = next;
            let segment = &self.segments[next];
            self.state.utterance = segment.text.clone();
            effects.push(Effect::Speak {
                text: self.state.utterance.clone(),
                queue: QueueMode::Flush,
            });
            let span = resolve_span(&self.document, &segment.text);
            let cursor = segment.start_word as f32;
            self.state.highlight = Some(span);
            self.state.cursor = cursor;
            effects.push(Effect::Emit(EngineEvent::HighlightChanged { span: Some(span) }));
            effects.push(Effect::Emit(EngineEvent::CursorMoved { cursor }));
        } else {
            info!("Playback finished at end of document");
            self.state.current_segment = 0;
            self.state.cursor = 0.0;
            self.state.highlight = None;
            self.state.utterance.clear();
            self.set_mode(PlaybackMode::Idle, effects);
            effects.push(Effect::Emit(EngineEvent::HighlightChanged { span: None }));
            effects.push(Effect::Emit(EngineEvent::CursorMoved { cursor: 0.0 }));
            effects.push(Effect::Emit(EngineEvent::Completed));
        }
    }

    fn step_to(&mut self, index: usize, effects: &mut Vec<Effect>) {
        info!(segment = index, "Stepping to segment");
        self.state.resume = None;
        self.state.current_segment = index;
        let segment = &self.segments[index];
        self.state.utterance = segment.text.clone();
        let span = resolve_span(&self.document, &segment.text);
        let cursor = segment.start_word as f32;
        self.state.highlight = Some(span);
        self.state.cursor = cursor;
        if self.state.mode == PlaybackMode::Playing {
            effects.push(Effect::StopSpeech);
            effects.push(Effect::Speak {
                text: self.state.utterance.clone(),
                queue: QueueMode::Flush,
            });
        }
        effects.push(Effect::Emit(EngineEvent::HighlightChanged { span: Some(span) }));
        effects.push(Effect::Emit(EngineEvent::CursorMoved { cursor }));
    }

    fn set_mode(&mut self, mode: PlaybackMode, effects: &mut Vec<Effect>) {
        if self.state.mode != mode {
            self.state.mode = mode;
            effects.push(Effect::Emit(EngineEvent::ModeChanged { mode }));
        }
    }
}
