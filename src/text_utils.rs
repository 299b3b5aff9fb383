//! Word counting helpers used for all word-index arithmetic.

/// Count words by trimming the surrounding whitespace and splitting on
/// single-space boundaries.
///
/// The splitter is deliberately naive and its quirks are part of the
/// contract: an empty or whitespace-only string counts as one word (the
/// split of an empty string yields one empty token), and runs of multiple
/// spaces produce extra empty tokens that inflate the count. Segment word
/// ranges are computed with this function everywhere, so "fixing" either
/// behavior would shift every index downstream.
pub fn count_words(text: &str) -> usize {
    text.trim().split(' ').count()
}
