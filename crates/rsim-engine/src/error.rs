use rsim_core::ConfigError;
use rsim_motion::MotionError;
use thiserror::Error;

use crate::RunState;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("scenario configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("step() called while the simulation is {0}")]
    NotRunning(RunState),

    #[error("motion error: {0}")]
    Motion(#[from] MotionError),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    #[error("cannot go from {from} to {to}")]
    InvalidTransition {
        from: RunState,
        to:   RunState,
    },
}

pub type ControlResult<T> = Result<T, ControlError>;
