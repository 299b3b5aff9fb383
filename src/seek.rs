//! Resolution of slider positions into resumable playback positions.

use crate::segmenter::Segment;
use tracing::debug;

/// Outcome of resolving a target word index against the segment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekResolution {
    /// The target falls inside a segment; playback can resume at
    /// `resume_offset` (a byte offset into that segment's text).
    Within {
        segment_index: usize,
        resume_offset: usize,
    },
    /// The target is at or past the total word count; playback restarts
    /// from the first segment.
    OutOfRange,
    /// No segment owns the target word. The ownership test is
    /// `start_word < target && end_word >= target`, so a target equal to a
    /// segment's `start_word` lands here; callers treat this as a no-op.
    Unresolved,
}

/// Map an absolute target word index to a segment and an in-segment resume
/// offset.
pub fn resolve_seek(segments: &[Segment], total_words: usize, target_word: usize) -> SeekResolution {
    if segments.is_empty() {
        debug!(target_word, "Seek with no segments; ignoring");
        return SeekResolution::Unresolved;
    }
    if target_word >= total_words {
        return SeekResolution::OutOfRange;
    }

    let Some((segment_index, segment)) = segments
        .iter()
        .enumerate()
        .find(|(_, s)| s.start_word < target_word && s.end_word >= target_word)
    else {
        debug!(target_word, "No segment owns the seek target; ignoring");
        return SeekResolution::Unresolved;
    };

    let span = (segment.end_word - segment.start_word + 1) as f64;
    let percentage = (target_word - segment.start_word) as f64 / span;
    let char_count = segment.text.chars().count();
    let split = (percentage * char_count as f64) as usize;

    SeekResolution::Within {
        segment_index,
        resume_offset: align_to_word_start(&segment.text, split),
    }
}

/// Nudge a split point forward so resumption never starts mid-word.
///
/// `split` is a character index; the returned value is a byte offset that is
/// either 0, the end of the text, or immediately preceded by whitespace. A
/// scan that reaches the end of the text saturates there (an empty resumed
/// tail) rather than indexing out of bounds.
fn align_to_word_start(text: &str, split: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    if split == 0 || split >= chars.len() {
        return byte_offset_at(text, split.min(chars.len()));
    }
    let mut idx = split;
    while idx < chars.len() && !chars[idx - 1].is_whitespace() {
        idx += 1;
    }
    byte_offset_at(text, idx)
}

fn byte_offset_at(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::segment_text;
    use crate::text_utils::count_words;

    const DOCUMENT: &str = "The quick brown fox jumps. Over the lazy dog today. Nothing else happens here.";

    fn fixture() -> (Vec<Segment>, usize) {
        (segment_text(DOCUMENT), count_words(DOCUMENT))
    }

    #[test]
    fn at_or_past_total_words_is_out_of_range() {
        let (segments, total_words) = fixture();
        assert_eq!(
            resolve_seek(&segments, total_words, total_words),
            SeekResolution::OutOfRange
        );
        assert_eq!(
            resolve_seek(&segments, total_words, total_words + 5),
            SeekResolution::OutOfRange
        );
    }

    #[test]
    fn first_segment_start_word_is_unresolved() {
        let (segments, total_words) = fixture();
        assert_eq!(
            resolve_seek(&segments, total_words, segments[0].start_word),
            SeekResolution::Unresolved
        );
    }

    #[test]
    fn boundary_words_belong_to_the_earlier_segment() {
        // start_word is exclusive and end_word inclusive, so the word index
        // shared by two adjacent segments resolves into the earlier one.
        let (segments, total_words) = fixture();
        assert_eq!(segments[1].start_word, segments[0].end_word);
        match resolve_seek(&segments, total_words, segments[1].start_word) {
            SeekResolution::Within { segment_index, .. } => assert_eq!(segment_index, 0),
            other => panic!("expected Within, got {other:?}"),
        }
    }

    #[test]
    fn empty_segment_list_is_unresolved() {
        assert_eq!(resolve_seek(&[], 1, 5), SeekResolution::Unresolved);
    }

    #[test]
    fn resolves_to_the_owning_segment() {
        let (segments, total_words) = fixture();
        let target = segments[1].start_word + 1;
        match resolve_seek(&segments, total_words, target) {
            SeekResolution::Within { segment_index, .. } => assert_eq!(segment_index, 1),
            other => panic!("expected Within, got {other:?}"),
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let (segments, total_words) = fixture();
        let target = segments[2].start_word + 1;
        let first = resolve_seek(&segments, total_words, target);
        let second = resolve_seek(&segments, total_words, target);
        assert_eq!(first, second);
    }

    #[test]
    fn resume_offsets_land_on_word_starts() {
        let (segments, total_words) = fixture();
        for segment in &segments {
            for target in segment.start_word + 1..=segment.end_word {
                let SeekResolution::Within { resume_offset, .. } =
                    resolve_seek(&segments, total_words, target)
                else {
                    panic!("in-segment target {target} did not resolve");
                };
                let ok = resume_offset == 0
                    || resume_offset == segment.text.len()
                    || segment.text[..resume_offset]
                        .chars()
                        .next_back()
                        .is_some_and(char::is_whitespace);
                assert!(ok, "offset {resume_offset} splits a word in {:?}", segment.text);
            }
        }
    }

    #[test]
    fn alignment_skips_to_the_next_word() {
        // Char 7 is inside "quick"; the next word starts at byte 10.
        assert_eq!(align_to_word_start("The quick brown", 7), 10);
        // Already at a word start: untouched.
        assert_eq!(align_to_word_start("The quick brown", 4), 4);
        assert_eq!(align_to_word_start("The quick brown", 0), 0);
    }

    #[test]
    fn alignment_saturates_at_the_end_of_text() {
        assert_eq!(align_to_word_start("word", 2), 4);
        assert_eq!(align_to_word_start("word", 9), 4);
    }
}
