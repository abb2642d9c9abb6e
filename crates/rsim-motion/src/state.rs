//! Per-robot state.

use rsim_core::{Pose, RobotId, RobotSpec, Vec2};

/// A waypoint.  Goals are plain points; each robot owns its own sequence.
pub type Goal = Vec2;

/// The full mutable state of one robot.
///
/// `goal_index` points at the goal currently being approached.  It only ever
/// increases, one step at a time, and stops at `goals.len()`, which means
/// the robot is finished and will never move again.  It is private so that
/// invariant cannot be broken from outside; use
/// [`complete_current_goal`][Self::complete_current_goal] to advance it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub id:               RobotId,

    /// Name from the scenario (e.g. `"robot_0"`).
    pub name:             String,

    pub pose:             Pose,

    goal_index:           usize,
    goals:                Vec<Goal>,

    pub color:            String,
    pub radius:           f64,

    /// Distance units per second.
    pub max_linear_speed: f64,
}

impl AgentState {
    /// Build the initial state for robot `id` from its scenario entry.
    pub fn from_spec(id: RobotId, spec: &RobotSpec) -> Self {
        let start = spec.start_position;
        Self {
            id,
            name:             spec.id.clone(),
            pose:             Pose::new(start.x, start.y, start.theta),
            goal_index:       0,
            goals:            spec.goals.clone(),
            color:            spec.color.clone(),
            radius:           spec.radius,
            max_linear_speed: spec.max_speed,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pose.position
    }

    #[inline]
    pub fn goal_index(&self) -> usize {
        self.goal_index
    }

    #[inline]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// The goal currently being approached, or `None` once finished.
    #[inline]
    pub fn current_goal(&self) -> Option<Goal> {
        self.goals.get(self.goal_index).copied()
    }

    /// `true` once every goal has been reached.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.goal_index >= self.goals.len()
    }

    #[inline]
    pub fn remaining_goals(&self) -> usize {
        self.goals.len() - self.goal_index
    }

    /// Mark the current goal reached and move on to the next one.
    ///
    /// Returns the index of the goal just completed, or `None` (and changes
    /// nothing) if the robot was already finished.
    pub fn complete_current_goal(&mut self) -> Option<usize> {
        if self.is_done() {
            return None;
        }
        let reached = self.goal_index;
        self.goal_index += 1;
        Some(reached)
    }
}
