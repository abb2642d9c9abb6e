//! Fluent builder for constructing a [`SimulationEngine`].

use rsim_core::{RobotId, ScenarioConfig, WorldModel};
use rsim_motion::{AgentState, MotionPolicy, SteerToGoal};
use tracing::info;

use crate::control::SharedRunState;
use crate::{EngineResult, RunState, SimulationEngine};

/// Fluent builder for [`SimulationEngine<P>`].
///
/// # Required inputs
///
/// - [`ScenarioConfig`]: world, robots, step parameters
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default        |
/// |---------------|----------------|
/// | `.policy(p)`  | `SteerToGoal`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config).build()?;
/// engine.step()?;
/// ```
pub struct EngineBuilder<P: MotionPolicy = SteerToGoal> {
    config: ScenarioConfig,
    policy: P,
}

impl EngineBuilder<SteerToGoal> {
    /// Create a builder using the default steering policy.
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config, policy: SteerToGoal }
    }
}

impl<P: MotionPolicy> EngineBuilder<P> {
    /// Swap in a different motion policy.
    pub fn policy<Q: MotionPolicy>(self, policy: Q) -> EngineBuilder<Q> {
        EngineBuilder { config: self.config, policy }
    }

    /// Validate the scenario, build the world and robots, and return a
    /// `Running` engine at step 0.
    ///
    /// # Errors
    ///
    /// [`EngineError::Config`][crate::EngineError::Config] if
    /// [`ScenarioConfig::validate`] rejects the scenario.
    pub fn build(self) -> EngineResult<SimulationEngine<P>> {
        self.config.validate()?;

        let world = WorldModel::from_spec(&self.config.world);
        let agents: Vec<AgentState> = self
            .config
            .robots
            .iter()
            .enumerate()
            .map(|(i, spec)| AgentState::from_spec(RobotId(i as u32), spec))
            .collect();

        info!(
            robots    = agents.len(),
            obstacles = world.obstacle_count(),
            max_steps = self.config.simulation.max_steps,
            "simulation engine ready"
        );

        Ok(SimulationEngine {
            world,
            agents,
            policy:     self.policy,
            params:     self.config.simulation,
            step_count: 0,
            state:      SharedRunState::new(RunState::Running),
        })
    }
}
