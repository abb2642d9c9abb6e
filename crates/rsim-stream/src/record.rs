//! Records yielded by [`FrameStream`][crate::FrameStream].

/// One item of the frame stream.
///
/// `Frame` and `Paused` may repeat; exactly one of `Completed`, `Stopped` or
/// `Error` ends the sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputRecord<P> {
    /// A rendered snapshot taken after step `step`.
    Frame { step: u64, payload: P },

    /// The engine is paused; nothing was stepped or rendered.
    Paused { step: u64 },

    /// The run finished, either because every robot reached every goal
    /// (`all_goals_reached`) or because the step budget ran out.
    Completed { step: u64, all_goals_reached: bool },

    /// The run was stopped from a control handle.
    Stopped { step: u64 },

    /// Stepping or rendering failed.  Never retried.
    Error { message: String },
}

impl<P> OutputRecord<P> {
    /// `true` for the records that end the stream.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OutputRecord::Completed { .. } | OutputRecord::Stopped { .. } | OutputRecord::Error { .. }
        )
    }

    /// Wire status string as used by the front-end (`"running"` for frames).
    pub fn status(&self) -> &'static str {
        match self {
            OutputRecord::Frame { .. }     => "running",
            OutputRecord::Paused { .. }    => "paused",
            OutputRecord::Completed { .. } => "completed",
            OutputRecord::Stopped { .. }   => "stopped",
            OutputRecord::Error { .. }     => "error",
        }
    }

    /// The payload, if this is a frame.
    pub fn into_payload(self) -> Option<P> {
        match self {
            OutputRecord::Frame { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
