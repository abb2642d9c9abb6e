//! `rsim-engine`: step loop orchestrator for the robot_sim framework.
//!
//! # One step
//!
//! ```text
//! step():
//!   ① Guard: run state must be Running, else EngineError::NotRunning.
//!   ② Advance: MotionPolicy::advance for every unfinished robot
//!                 (parallel with the `parallel` feature).
//!   ③ Report: goal arrivals → observer, in ascending RobotId order.
//!   ④ Count: step_count += 1.
//!   ⑤ Classify: AllGoalsReached › MaxStepsReached › Advanced.
//!                 A terminal outcome publishes RunState::Completed.
//! ```
//!
//! # Run state
//!
//! ```text
//!            pause()             stop()
//!   Running ─────────▶ Paused ──────────▶ Stopped   (terminal)
//!      ▲  ◀─────────     │
//!      │    resume()     │ stop()
//!      │                 ▼
//!      ├──────────────▶ Stopped
//!      └── terminal step outcome ──▶ Completed      (terminal)
//! ```
//!
//! The state lives in one atomic shared with every [`ControlHandle`], so a
//! control thread can pause or stop the run while another thread steps it.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                  |
//! |------------|-----------------------------------------|
//! | `parallel` | Advances robots on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rsim_engine::{EngineBuilder, StepOutcome};
//!
//! let mut engine = EngineBuilder::new(config).build()?;
//! let control = engine.control();          // hand this to another thread
//! while engine.step()? == StepOutcome::Advanced {}
//! ```

pub mod builder;
pub mod control;
pub mod engine;
pub mod error;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use control::{ControlHandle, RunState};
pub use engine::{SimulationEngine, StepOutcome};
pub use error::{ControlError, ControlResult, EngineError, EngineResult};
pub use observer::{EngineObserver, NoopObserver};
