use crate::highlight::HighlightSpan;
use crate::segmenter::Segment;
use serde::Serialize;

/// Where the playback state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackMode {
    /// Nothing queued; the cursor is reset to 0.
    Idle,
    /// The backend is uttering the current segment or its resumed tail.
    Playing,
    /// Explicitly stopped, resumable from the resume offset.
    Paused,
}

/// Byte range of the current utterance that has already been vocalized.
///
/// `end` is where the next `play` resumes. Offsets index into the in-flight
/// utterance text, which shrinks on every resume, so they are only ever
/// interpreted against the utterance they were reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeOffset {
    pub start: usize,
    pub end: usize,
}

/// Mutable playback state, owned and mutated exclusively by the reducer.
#[derive(Debug)]
pub(crate) struct PlaybackState {
    pub current_segment: usize,
    /// Word-position cursor driving the scrub control, bounded by
    /// `[0, total_words]`.
    pub cursor: f32,
    pub resume: Option<ResumeOffset>,
    pub mode: PlaybackMode,
    /// Highlight of the active segment; `None` once playback completes.
    pub highlight: Option<HighlightSpan>,
    /// Text of the in-flight utterance.
    pub utterance: String,
}

impl PlaybackState {
    pub(crate) fn new() -> Self {
        PlaybackState {
            current_segment: 0,
            cursor: 0.0,
            resume: None,
            mode: PlaybackMode::Idle,
            highlight: None,
            utterance: String::new(),
        }
    }
}

/// Read-only copy of the engine state exposed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub mode: PlaybackMode,
    pub cursor: f32,
    pub highlight: Option<HighlightSpan>,
    pub total_words: usize,
    pub current_segment: usize,
    pub segments: Vec<Segment>,
}
