//! The shared run state and the handle used to drive it from other threads.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::{info, warn};

use crate::{ControlError, ControlResult};

// ── RunState ──────────────────────────────────────────────────────────────────

/// Whether the engine may step.
///
/// `Stopped` and `Completed` are terminal: once reached, nothing moves the
/// engine out of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RunState {
    Running   = 0,
    Paused    = 1,
    Stopped   = 2,
    Completed = 3,
}

impl RunState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Stopped | RunState::Completed)
    }

    #[inline]
    fn from_u8(raw: u8) -> RunState {
        match raw {
            0 => RunState::Running,
            1 => RunState::Paused,
            2 => RunState::Stopped,
            _ => RunState::Completed,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Running   => "running",
            RunState::Paused    => "paused",
            RunState::Stopped   => "stopped",
            RunState::Completed => "completed",
        })
    }
}

// ── SharedRunState ────────────────────────────────────────────────────────────

/// One atomic byte shared between the engine and its control handles.
///
/// Writes use `AcqRel` compare-and-swap and reads use `Acquire`, so a
/// transition made on the control thread is visible to the stepping thread
/// on its next read.
#[derive(Clone, Debug)]
pub(crate) struct SharedRunState(Arc<AtomicU8>);

impl SharedRunState {
    pub(crate) fn new(initial: RunState) -> Self {
        Self(Arc::new(AtomicU8::new(initial as u8)))
    }

    #[inline]
    pub(crate) fn load(&self) -> RunState {
        RunState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Apply `f` atomically.  `f` may be called more than once if another
    /// thread races us; it returns the desired next state or rejects the
    /// transition.  Returns `(previous, current)`.
    pub(crate) fn update<F, E>(&self, mut f: F) -> Result<(RunState, RunState), E>
    where
        F: FnMut(RunState) -> Result<RunState, E>,
    {
        let mut current = self.load();
        loop {
            let next = f(current)?;
            if next == current {
                return Ok((current, current));
            }
            match self.0.compare_exchange_weak(
                current as u8,
                next as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_)       => return Ok((current, next)),
                Err(actual) => current = RunState::from_u8(actual),
            }
        }
    }

    /// [`update`][Self::update] for transitions that always succeed.
    pub(crate) fn transition<F>(&self, mut f: F) -> (RunState, RunState)
    where
        F: FnMut(RunState) -> RunState,
    {
        match self.update(|s| Ok::<_, Infallible>(f(s))) {
            Ok(states) => states,
            Err(never) => match never {},
        }
    }

    /// `Running | Paused → Completed`.  Never overwrites `Stopped`.
    pub(crate) fn complete(&self) -> RunState {
        let (_, now) = self.transition(|s| match s {
            RunState::Running | RunState::Paused => RunState::Completed,
            terminal                             => terminal,
        });
        now
    }
}

// ── ControlHandle ─────────────────────────────────────────────────────────────

/// Cloneable, thread-safe remote control for one engine.
///
/// Obtain with [`SimulationEngine::control`][crate::SimulationEngine::control].
/// Every clone refers to the same run state.
#[derive(Clone, Debug)]
pub struct ControlHandle {
    state: SharedRunState,
}

impl ControlHandle {
    pub(crate) fn new(state: SharedRunState) -> Self {
        Self { state }
    }

    /// Current run state.
    #[inline]
    pub fn state(&self) -> RunState {
        self.state.load()
    }

    /// `Running → Paused`.  Pausing a paused engine is a no-op.
    ///
    /// # Errors
    ///
    /// [`ControlError::InvalidTransition`] if the engine is stopped or
    /// completed.
    pub fn pause(&self) -> ControlResult<()> {
        let result = self.state.update(|s| match s {
            RunState::Running | RunState::Paused => Ok(RunState::Paused),
            from => Err(ControlError::InvalidTransition { from, to: RunState::Paused }),
        });
        log_transition(result)
    }

    /// `Paused → Running`.  Resuming a running engine is a no-op.
    ///
    /// # Errors
    ///
    /// [`ControlError::InvalidTransition`] if the engine is stopped or
    /// completed.
    pub fn resume(&self) -> ControlResult<()> {
        let result = self.state.update(|s| match s {
            RunState::Running | RunState::Paused => Ok(RunState::Running),
            from => Err(ControlError::InvalidTransition { from, to: RunState::Running }),
        });
        log_transition(result)
    }

    /// Request termination.  `Running | Paused → Stopped`.
    ///
    /// Always succeeds.  A completed engine stays `Completed`.  Returns the
    /// state after the call.
    pub fn stop(&self) -> RunState {
        let (from, now) = self.state.transition(|s| match s {
            RunState::Running | RunState::Paused => RunState::Stopped,
            terminal                             => terminal,
        });
        log_change(from, now);
        now
    }
}

fn log_transition(result: ControlResult<(RunState, RunState)>) -> ControlResult<()> {
    match result {
        Ok((from, to)) => {
            log_change(from, to);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "rejected run-state transition");
            Err(e)
        }
    }
}

fn log_change(from: RunState, to: RunState) {
    if from != to {
        info!(%from, %to, "run state changed");
    }
}
