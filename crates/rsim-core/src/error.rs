//! Scenario configuration errors.
//!
//! Sub-crates define their own error enums and wrap `ConfigError` as one
//! variant where construction can fail.

use thiserror::Error;

/// A scenario that the engine cannot run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max_steps must be at least 1")]
    ZeroMaxSteps,

    #[error("{name} must be positive and finite, got {value}")]
    InvalidParam {
        name:  &'static str,
        value: f64,
    },

    #[error("world bounds must be positive and finite, got {width} x {height}")]
    InvalidBounds {
        width:  f64,
        height: f64,
    },

    #[error("robot id {0:?} appears more than once")]
    DuplicateRobotId(String),

    #[error("robot {robot:?} has no goals and would never finish")]
    EmptyGoals { robot: String },

    #[error("robot {robot:?}: invalid {field} ({value})")]
    InvalidRobot {
        robot: String,
        field: &'static str,
        value: f64,
    },

    #[error("obstacle {label:?}: invalid {field} ({value})")]
    InvalidObstacle {
        label: String,
        field: &'static str,
        value: f64,
    },
}

/// Shorthand result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
