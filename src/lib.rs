//! Synchronization core for read-along speech playback.
//!
//! Drives the "speak long-form text while highlighting the spoken portion
//! and letting the user scrub through it" experience. Responsibilities are
//! intentionally narrow:
//!
//! - Segment raw text into speakable units with absolute word ranges.
//! - Track playback progress as a word-position cursor.
//! - Map the active segment back to a document character range for
//!   highlighting.
//! - Resolve slider scrubs into a resumable (segment, offset) position.
//!
//! Speech synthesis itself is an external capability behind the
//! [`speech::SpeechBackend`] trait; rendering is left entirely to whoever
//! subscribes to the [`engine::Engine`]'s event stream.

pub mod config;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod seek;
pub mod segmenter;
pub mod speech;
pub mod text_utils;

pub use config::EngineConfig;
pub use engine::{Engine, EngineEvent, PlaybackMode, Snapshot};
pub use error::PlaybackError;
pub use highlight::HighlightSpan;
pub use segmenter::Segment;
pub use speech::{QueueMode, SpeechBackend, SpeechEvent};
