//! The `OutputWriter` trait implemented by all backend writers.

use crate::{GoalEventRow, OutputResult, PoseRow};

/// A sink for trajectory rows.
///
/// Errors are stored by [`TrajectoryObserver`][crate::TrajectoryObserver]
/// and retrieved with its `take_error` method, since observer callbacks
/// cannot fail.
pub trait OutputWriter {
    /// Write the poses of every robot for one step.
    fn write_poses(&mut self, rows: &[PoseRow]) -> OutputResult<()>;

    /// Write one goal arrival.
    fn write_goal_event(&mut self, row: &GoalEventRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
