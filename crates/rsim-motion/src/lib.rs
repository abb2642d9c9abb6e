//! `rsim-motion`: per-robot state and the per-step motion model.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`state`]  | `AgentState`: pose, ordered goals, progress pointer    |
//! | [`policy`] | `MotionPolicy` trait, `SteerToGoal`, `Advance` outcome |
//! | [`error`]  | `MotionError`, `MotionResult<T>`                       |
//!
//! # Movement model (steer-to-target)
//!
//! Each call to [`MotionPolicy::advance`] does exactly one of:
//!
//! 1. nothing, if the robot has already visited every goal;
//! 2. mark the current goal reached, if the robot is within
//!    `goal_threshold` of it (the robot does **not** move that call);
//! 3. translate straight toward the current goal by at most
//!    `max_linear_speed * time_step`, never overshooting, and snap the
//!    heading to the direction of travel.
//!
//! There is no collision avoidance and no angular-rate limit.

pub mod error;
pub mod policy;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{MotionError, MotionResult};
pub use policy::{Advance, MotionPolicy, SteerToGoal};
pub use state::{AgentState, Goal};
