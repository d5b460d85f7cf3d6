//! Deterministic speech source replaying a fixed list of segments.

use crate::voice::ports::SpeechSource;
use async_trait::async_trait;
use std::collections::VecDeque;

/// Speech source that yields pre-scripted segments in order.
///
/// Used by tests and headless environments; also doubles as the "platform
/// has no speech support" stand-in via [`ScriptedSpeechSource::unavailable`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpeechSource {
    segments: VecDeque<String>,
    available: bool,
}

impl ScriptedSpeechSource {
    /// Creates a source that will replay the given segments.
    #[must_use]
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            available: true,
        }
    }

    /// Creates a source reporting that speech capture is unsupported.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            segments: VecDeque::new(),
            available: false,
        }
    }
}

#[async_trait]
impl SpeechSource for ScriptedSpeechSource {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn next_segment(&mut self) -> Option<String> {
        self.segments.pop_front()
    }
}
