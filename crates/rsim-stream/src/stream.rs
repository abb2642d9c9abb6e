//! `FrameStream`: steps the engine and renders one frame per pull.

use std::iter::FusedIterator;
use std::time::Duration;

use rsim_engine::{
    ControlHandle, EngineError, EngineObserver, NoopObserver, RunState, SimulationEngine,
    StepOutcome,
};
use rsim_motion::{MotionPolicy, SteerToGoal};
use tracing::{error, info, trace};

use crate::{FrameView, OutputRecord, Renderer};

/// What a pull does while the engine is paused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PauseMode {
    /// Return `OutputRecord::Paused` immediately.  The consumer decides how
    /// long to wait before pulling again.
    #[default]
    Emit,

    /// Sleep for the given interval and re-check, repeatedly, until the
    /// engine leaves `Paused`.  The pull then continues with the new state,
    /// so `Paused` records are never yielded.
    Backoff(Duration),
}

/// A finite, non-restartable sequence of [`OutputRecord`]s.
///
/// Each call to `next()`:
///
/// | Run state   | Effect                                                      |
/// |-------------|-------------------------------------------------------------|
/// | `Running`   | one engine step; `Advanced` → render → `Frame`;             |
/// |             | terminal outcome → `Completed` (nothing rendered)           |
/// | `Paused`    | `Paused` record, or wait (see [`PauseMode`])                |
/// | `Stopped`   | `Stopped`                                                   |
/// | `Completed` | `Completed`                                                 |
///
/// Any engine or renderer error yields one `Error` record and stops the
/// engine, so every [`ControlHandle`] sees `Stopped` from then on.  After the
/// first terminal record every call returns `None`; build a new engine and
/// stream to run again.
///
/// The stream owns the engine.  Grab a [`ControlHandle`] with
/// [`control`][Self::control] before moving the stream to its consumer
/// thread.
pub struct FrameStream<R, P = SteerToGoal, O = NoopObserver>
where
    R: Renderer,
    P: MotionPolicy,
    O: EngineObserver,
{
    engine:     SimulationEngine<P>,
    renderer:   R,
    observer:   O,
    pause_mode: PauseMode,
    finished:   bool,
}

impl<R: Renderer, P: MotionPolicy> FrameStream<R, P, NoopObserver> {
    pub fn new(engine: SimulationEngine<P>, renderer: R) -> Self {
        Self {
            engine,
            renderer,
            observer:   NoopObserver,
            pause_mode: PauseMode::default(),
            finished:   false,
        }
    }
}

impl<R, P, O> FrameStream<R, P, O>
where
    R: Renderer,
    P: MotionPolicy,
    O: EngineObserver,
{
    /// Forward every engine step to `observer` (e.g. a trajectory writer).
    pub fn with_observer<O2: EngineObserver>(self, observer: O2) -> FrameStream<R, P, O2> {
        FrameStream {
            engine:     self.engine,
            renderer:   self.renderer,
            observer,
            pause_mode: self.pause_mode,
            finished:   self.finished,
        }
    }

    pub fn pause_mode(mut self, mode: PauseMode) -> Self {
        self.pause_mode = mode;
        self
    }

    /// A handle for pausing, resuming and stopping from another thread.
    pub fn control(&self) -> ControlHandle {
        self.engine.control()
    }

    pub fn engine(&self) -> &SimulationEngine<P> {
        &self.engine
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// `true` once the terminal record has been yielded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Take the engine, renderer and observer back, e.g. to inspect the
    /// final state or flush the observer.
    pub fn into_parts(self) -> (SimulationEngine<P>, R, O) {
        (self.engine, self.renderer, self.observer)
    }

    // ── Pull ──────────────────────────────────────────────────────────────

    fn pull(&mut self) -> OutputRecord<R::Payload> {
        loop {
            match self.engine.run_state() {
                RunState::Paused => match self.pause_mode {
                    PauseMode::Emit => {
                        return OutputRecord::Paused { step: self.engine.step_count() };
                    }
                    PauseMode::Backoff(delay) => std::thread::sleep(delay),
                },

                RunState::Stopped => {
                    info!(step = self.engine.step_count(), "simulation stopped");
                    return OutputRecord::Stopped { step: self.engine.step_count() };
                }

                RunState::Completed => return self.completed(),

                RunState::Running => match self.engine.step_observed(&mut self.observer) {
                    Ok(StepOutcome::Advanced) => return self.render(),
                    Ok(_)                     => return self.completed(),
                    // Paused or stopped between our read and the engine's.
                    Err(EngineError::NotRunning(_)) => continue,
                    Err(e) => {
                        error!(
                            error = %e,
                            step  = self.engine.step_count(),
                            "error during simulation step"
                        );
                        return self.failed(e.to_string());
                    }
                },
            }
        }
    }

    fn render(&mut self) -> OutputRecord<R::Payload> {
        let step = self.engine.step_count();
        let view = FrameView {
            world:  self.engine.world(),
            agents: self.engine.agents(),
            step,
        };
        match self.renderer.render(&view) {
            Ok(payload) => {
                trace!(step, "frame rendered");
                OutputRecord::Frame { step, payload }
            }
            Err(e) => {
                error!(error = %e, step, "error rendering frame");
                self.failed(e.to_string())
            }
        }
    }

    /// The run cannot continue: publish a terminal state for control handles.
    fn failed(&self, message: String) -> OutputRecord<R::Payload> {
        self.engine.stop();
        OutputRecord::Error { message }
    }

    fn completed(&self) -> OutputRecord<R::Payload> {
        let all_goals_reached = self.engine.completed_agents() == self.engine.agents().len();
        OutputRecord::Completed { step: self.engine.step_count(), all_goals_reached }
    }
}

impl<R, P, O> Iterator for FrameStream<R, P, O>
where
    R: Renderer,
    P: MotionPolicy,
    O: EngineObserver,
{
    type Item = OutputRecord<R::Payload>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let record = self.pull();
        if record.is_terminal() {
            self.finished = true;
        }
        Some(record)
    }
}

impl<R, P, O> FusedIterator for FrameStream<R, P, O>
where
    R: Renderer,
    P: MotionPolicy,
    O: EngineObserver,
{
}
