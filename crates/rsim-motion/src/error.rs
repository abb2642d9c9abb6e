use rsim_core::RobotId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("robot {0} is exactly on its goal but the goal threshold does not register arrival")]
    DegenerateDistance(RobotId),

    #[error("robot {robot} produced a non-finite pose ({x}, {y}, {theta})")]
    NonFinite {
        robot: RobotId,
        x:     f64,
        y:     f64,
        theta: f64,
    },
}

pub type MotionResult<T> = Result<T, MotionError>;
