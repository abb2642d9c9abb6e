//! The `SimulationEngine` struct and its step function.

use rsim_core::{RobotId, SimParams, WorldModel};
use rsim_motion::{Advance, AgentState, MotionPolicy, MotionResult, SteerToGoal};
use tracing::{debug, info};

use crate::control::SharedRunState;
use crate::{
    ControlHandle, ControlResult, EngineError, EngineObserver, EngineResult, NoopObserver, RunState,
};

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// Result of one successful [`SimulationEngine::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Robots moved (or arrived) and there is more to do.
    Advanced,
    /// Every robot has visited every goal.
    AllGoalsReached,
    /// The step budget ran out with goals still outstanding.
    MaxStepsReached,
}

impl StepOutcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, StepOutcome::Advanced)
    }
}

// ── SimulationEngine ──────────────────────────────────────────────────────────

/// Owns the world, every robot, and the run state.
///
/// Only the thread holding `&mut SimulationEngine` mutates robots, so robot
/// state needs no locking.  Other threads interact through
/// [`ControlHandle`]s, which touch nothing but the atomic run state.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct SimulationEngine<P: MotionPolicy = SteerToGoal> {
    /// Static obstacles and bounds.
    pub world: WorldModel,

    pub(crate) agents:     Vec<AgentState>,
    pub(crate) policy:     P,
    pub(crate) params:     SimParams,
    pub(crate) step_count: u64,
    pub(crate) state:      SharedRunState,
}

impl<P: MotionPolicy> SimulationEngine<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// A new handle onto this engine's run state.  Cheap; clone freely.
    pub fn control(&self) -> ControlHandle {
        ControlHandle::new(self.state.clone())
    }

    #[inline]
    pub fn run_state(&self) -> RunState {
        self.state.load()
    }

    pub fn pause(&self) -> ControlResult<()> {
        self.control().pause()
    }

    pub fn resume(&self) -> ControlResult<()> {
        self.control().resume()
    }

    pub fn stop(&self) -> RunState {
        self.control().stop()
    }

    /// Number of completed steps.  Starts at 0 and only ever grows.
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    #[inline]
    pub fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    #[inline]
    pub fn agent(&self, id: RobotId) -> Option<&AgentState> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn world(&self) -> &WorldModel {
        &self.world
    }

    #[inline]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// How many robots have visited all of their goals.
    pub fn completed_agents(&self) -> usize {
        self.agents.iter().filter(|a| a.is_done()).count()
    }

    /// Run one step without callbacks.  See [`step_observed`][Self::step_observed].
    pub fn step(&mut self) -> EngineResult<StepOutcome> {
        self.step_observed(&mut NoopObserver)
    }

    /// Advance every unfinished robot once and classify the result.
    ///
    /// The run state is read once, up front.  A `pause()` or `stop()` that
    /// lands while the step is running does not interrupt it; it is seen by
    /// the next call.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotRunning`] if the engine is not `Running`.
    /// - [`EngineError::Motion`] if the motion policy fails for any robot.
    ///   The step is not counted and the run should be abandoned.
    pub fn step_observed<O: EngineObserver>(&mut self, observer: &mut O) -> EngineResult<StepOutcome> {
        let state = self.state.load();
        if state != RunState::Running {
            return Err(EngineError::NotRunning(state));
        }

        let this_step = self.step_count + 1;
        let results   = self.advance_all();

        for (id, result) in results {
            if let Advance::Arrived { goal_index } = result? {
                let agent = &self.agents[id.index()];
                debug!(robot = %agent.name, goal_index, step = this_step, "goal reached");
                observer.on_goal_reached(this_step, agent, goal_index);
            }
        }

        let all_completed = self.agents.iter().all(|a| a.is_done());
        self.step_count = this_step;

        let outcome = if all_completed {
            StepOutcome::AllGoalsReached
        } else if self.step_count >= self.params.max_steps {
            StepOutcome::MaxStepsReached
        } else {
            StepOutcome::Advanced
        };

        observer.on_step_end(this_step, &self.agents);

        if outcome.is_terminal() {
            let now = self.state.complete();
            match outcome {
                StepOutcome::AllGoalsReached => {
                    info!(
                        step      = this_step,
                        run_state = %now,
                        "simulation completed: all robots reached their goals"
                    );
                }
                _ => {
                    info!(
                        step      = this_step,
                        max_steps = self.params.max_steps,
                        remaining = self.agents.len() - self.completed_agents(),
                        run_state = %now,
                        "simulation completed: max steps reached"
                    );
                }
            }
            observer.on_finished(this_step, outcome);
        }

        Ok(outcome)
    }

    // ── Motion phase ──────────────────────────────────────────────────────

    /// Call the motion policy for every unfinished robot.
    ///
    /// Results come back in ascending `RobotId` order on both paths.
    fn advance_all(&mut self) -> Vec<(RobotId, MotionResult<Advance>)> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let policy    = &self.policy;
        let threshold = self.params.goal_threshold;
        let dt        = self.params.time_step;

        #[cfg(not(feature = "parallel"))]
        {
            self.agents
                .iter_mut()
                .filter(|a| !a.is_done())
                .map(|a| (a.id, policy.advance(a, threshold, dt)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.agents
                .par_iter_mut()
                .filter(|a| !a.is_done())
                .map(|a| (a.id, policy.advance(a, threshold, dt)))
                .collect()
        }
    }
}
