//! Mapping from segment text back to a document character range.

use serde::Serialize;

/// A byte range inside the full document, used to drive the visual
/// highlight of the segment being spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub start: isize,
    pub end: isize,
}

impl HighlightSpan {
    /// Sentinel returned when the segment text cannot be found verbatim in
    /// the document (e.g. after a normalization divergence).
    pub const UNRESOLVED: HighlightSpan = HighlightSpan { start: -1, end: -1 };

    pub fn is_resolved(&self) -> bool {
        self.start >= 0
    }
}

/// Resolve a segment's text to its first occurrence in the document.
///
/// Returns [`HighlightSpan::UNRESOLVED`] on a miss; the caller keeps playing
/// either way. Repeated sentence text anchors to the earliest occurrence,
/// the same limitation the segmenter has.
pub fn resolve_span(document: &str, segment_text: &str) -> HighlightSpan {
    match document.find(segment_text) {
        Some(start) => HighlightSpan {
            start: start as isize,
            end: (start + segment_text.len()) as isize,
        },
        None => HighlightSpan::UNRESOLVED,
    }
}
