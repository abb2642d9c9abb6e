//! Plain data row types written by output backends.

/// One robot's pose after a step.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseRow {
    pub step:       u64,
    /// The robot's scenario id (`"robot_0"`), not its index.
    pub robot_id:   String,
    pub x:          f64,
    pub y:          f64,
    pub theta:      f64,
    /// Goals completed so far; equals the goal count once the robot is done.
    pub goal_index: usize,
}

/// A robot arriving at one of its goals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalEventRow {
    pub step:       u64,
    pub robot_id:   String,
    /// Index of the goal that was reached.
    pub goal_index: usize,
}
