//! `rsim-output`: trajectory output writers for the robot_sim framework.
//!
//! | Writer                  | Files created                        |
//! |-------------------------|--------------------------------------|
//! | [`CsvTrajectoryWriter`] | `robot_poses.csv`, `goal_events.csv` |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`TrajectoryObserver`], which implements `rsim_engine::EngineObserver`
//! and can therefore be attached to an engine directly or to a frame stream.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rsim_output::{CsvTrajectoryWriter, TrajectoryObserver};
//!
//! let writer = CsvTrajectoryWriter::new(Path::new("./output"))?;
//! let mut obs = TrajectoryObserver::new(writer);
//! while !engine.step_observed(&mut obs)?.is_terminal() {}
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvTrajectoryWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TrajectoryObserver;
pub use row::{GoalEventRow, PoseRow};
pub use writer::OutputWriter;
