//! Engine observer trait for progress reporting and data collection.

use rsim_motion::AgentState;

use crate::StepOutcome;

/// Callbacks invoked by
/// [`SimulationEngine::step_observed`][crate::SimulationEngine::step_observed].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  `step` is always the 1-based number of the
/// step being executed, i.e. the value `step_count` has once it finishes.
///
/// # Example: arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl EngineObserver for ArrivalPrinter {
///     fn on_goal_reached(&mut self, step: u64, agent: &AgentState, goal_index: usize) {
///         println!("step {step}: {} reached goal {goal_index}", agent.name);
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called once per goal arrival, in ascending `RobotId` order.
    fn on_goal_reached(&mut self, _step: u64, _agent: &AgentState, _goal_index: usize) {}

    /// Called after every successful step with the post-step robot states.
    fn on_step_end(&mut self, _step: u64, _agents: &[AgentState]) {}

    /// Called once, on the step that produced a terminal outcome.
    fn on_finished(&mut self, _step: u64, _outcome: StepOutcome) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}

impl<O: EngineObserver + ?Sized> EngineObserver for &mut O {
    fn on_goal_reached(&mut self, step: u64, agent: &AgentState, goal_index: usize) {
        (**self).on_goal_reached(step, agent, goal_index);
    }

    fn on_step_end(&mut self, step: u64, agents: &[AgentState]) {
        (**self).on_step_end(step, agents);
    }

    fn on_finished(&mut self, step: u64, outcome: StepOutcome) {
        (**self).on_finished(step, outcome);
    }
}
