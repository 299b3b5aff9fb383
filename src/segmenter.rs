//! Sentence segmentation with absolute word-index ranges.
//!
//! The strategy here is intentionally simple: a period optionally followed
//! by whitespace ends a segment, and each segment is anchored back into the
//! document by first-occurrence substring search. The logic is isolated so
//! it can be swapped for a real sentence splitter later.

use crate::text_utils::count_words;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

static RE_SEGMENT_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s*").unwrap());

/// One speakable unit of text with its absolute word-index range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Segment text with the terminator stripped.
    pub text: String,
    pub word_count: usize,
    pub start_word: usize,
    pub end_word: usize,
}

/// Split a document into ordered segments.
///
/// Boundary text is consumed, empty fragments are dropped, and each
/// fragment's `start_word` is the word count of the prefix before its
/// *first* occurrence in the document. Two consequences follow and both are
/// kept for index-compatibility rather than corrected:
///
/// - the empty prefix counts as one word, so the first segment starts at
///   word 1, not 0;
/// - a fragment whose text also appears earlier in the document anchors to
///   the earlier occurrence and gets the wrong range.
pub fn segment_text(document: &str) -> Vec<Segment> {
    let segments: Vec<Segment> = RE_SEGMENT_BOUNDARY
        .split(document)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| {
            let anchor = document.find(fragment).unwrap_or(0);
            let start_word = count_words(&document[..anchor]);
            let word_count = count_words(fragment);
            Segment {
                text: fragment.to_string(),
                word_count,
                start_word,
                end_word: start_word + word_count - 1,
            }
        })
        .collect();
    debug!(segment_count = segments.len(), "Segmented document");
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_period_and_discards_boundaries() {
        let segments = segment_text("Hello world. This is fine.");
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello world", "This is fine"]);
    }

    #[test]
    fn word_ranges_start_at_one_for_the_first_segment() {
        let segments = segment_text("Hello world. This is fine.");
        assert_eq!(segments[0].start_word, 1);
        assert_eq!(segments[0].end_word, 2);
        assert_eq!(segments[1].start_word, 2);
        assert_eq!(segments[1].end_word, 4);
    }

    #[test]
    fn word_counts_add_up_for_non_repeating_documents() {
        let document = "Hello world. This is fine.";
        let segments = segment_text(document);
        let sum: usize = segments.iter().map(|s| s.word_count).sum();
        assert_eq!(sum, count_words(document));
    }

    #[test]
    fn empty_fragments_are_dropped() {
        assert!(segment_text("...").is_empty());
        assert!(segment_text("").is_empty());
        assert_eq!(segment_text("One.. Two.").len(), 2);
    }

    #[test]
    fn duplicate_sentences_anchor_to_the_first_occurrence() {
        // Known limitation: both segments get the first occurrence's range.
        let segments = segment_text("Repeat me. Repeat me.");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start_word, segments[1].start_word);
        assert_eq!(segments[0].end_word, segments[1].end_word);
    }

    #[test]
    fn three_short_sentences() {
        let segments = segment_text("One. Two. Three.");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].text, "Two");
        assert_eq!(segments[1].start_word, 1);
        assert_eq!(segments[2].start_word, 2);
    }
}
