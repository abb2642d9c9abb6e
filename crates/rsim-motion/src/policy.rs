//! The `MotionPolicy` trait and the default steer-to-goal kinematic.

use crate::{AgentState, MotionError, MotionResult};

/// What a single [`MotionPolicy::advance`] call did to the robot.
///
/// Arrival and motion are mutually exclusive within one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The robot had no goals left; nothing changed.
    Idle,
    /// The robot was within the threshold of goal `goal_index` and has moved
    /// on to the next one.  Its pose is unchanged.
    Arrived { goal_index: usize },
    /// The robot translated toward its current goal.
    Moved,
}

/// Pluggable per-robot motion model.
///
/// The engine calls `advance` once per unfinished robot per step.  The
/// policy must leave finished robots untouched and must never advance
/// `goal_index` by more than one per call.
///
/// `Send + Sync` so the engine can advance robots on Rayon's thread pool
/// with the `parallel` feature.
pub trait MotionPolicy: Send + Sync + 'static {
    fn advance(
        &self,
        agent:          &mut AgentState,
        goal_threshold: f64,
        time_step:      f64,
    ) -> MotionResult<Advance>;
}

/// Straight-line approach at capped speed with an instantaneous heading snap.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteerToGoal;

impl MotionPolicy for SteerToGoal {
    fn advance(
        &self,
        agent:          &mut AgentState,
        goal_threshold: f64,
        time_step:      f64,
    ) -> MotionResult<Advance> {
        let Some(target) = agent.current_goal() else {
            return Ok(Advance::Idle);
        };

        let delta    = agent.position().delta_to(target);
        let distance = delta.length();

        if distance < goal_threshold {
            return Ok(match agent.complete_current_goal() {
                Some(goal_index) => Advance::Arrived { goal_index },
                None             => Advance::Idle,
            });
        }

        // Only reachable with a zero threshold.
        if distance == 0.0 {
            return Err(MotionError::DegenerateDistance(agent.id));
        }

        // Clamp so the robot lands on the goal instead of overshooting it.
        let speed    = (agent.max_linear_speed * time_step).min(distance);
        let position = agent.position() + delta * (speed / distance);
        let theta    = delta.y.atan2(delta.x);

        if !position.is_finite() || !theta.is_finite() {
            return Err(MotionError::NonFinite {
                robot: agent.id,
                x:     position.x,
                y:     position.y,
                theta,
            });
        }

        agent.pose.position = position;
        agent.pose.theta    = theta;
        Ok(Advance::Moved)
    }
}
