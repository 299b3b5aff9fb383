use crate::engine::state::PlaybackMode;
use crate::error::PlaybackError;
use crate::highlight::HighlightSpan;
use serde::Serialize;

/// State-change events published to subscribers.
///
/// The presentation layer subscribes and owns its own rendering; the engine
/// never mutates anything across that boundary. Events serialize so they
/// can be shipped to an out-of-process UI as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EngineEvent {
    ModeChanged { mode: PlaybackMode },
    CursorMoved { cursor: f32 },
    HighlightChanged { span: Option<HighlightSpan> },
    /// The backend started uttering the segment at `index`.
    SegmentStarted { index: usize },
    /// The whole document finished; fired exactly once per run-through.
    Completed,
    Error { error: PlaybackError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_for_out_of_process_consumers() {
        let json = serde_json::to_string(&EngineEvent::HighlightChanged {
            span: Some(HighlightSpan { start: 5, end: 8 }),
        })
        .unwrap();
        assert_eq!(json, r#"{"HighlightChanged":{"span":{"start":5,"end":8}}}"#);
    }
}
