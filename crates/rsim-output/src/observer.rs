//! `TrajectoryObserver<W>`: bridges `EngineObserver` to an `OutputWriter`.

use rsim_engine::{EngineObserver, StepOutcome};
use rsim_motion::AgentState;
use tracing::{debug, warn};

use crate::row::{GoalEventRow, PoseRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`EngineObserver`] that writes robot poses and goal arrivals to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].  Only the first error is kept.
pub struct TrajectoryObserver<W: OutputWriter> {
    writer:     W,
    /// Write a pose row for every robot every `pose_every` steps.
    pose_every: u64,
    /// Poses from the latest step, kept until written.
    rows:       Vec<PoseRow>,
    pending:    bool,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TrajectoryObserver<W> {
    /// Record poses after every step.
    pub fn new(writer: W) -> Self {
        Self::with_interval(writer, 1)
    }

    /// Record poses every `pose_every` steps (and always on the final step).
    /// Goal events are written regardless.  An interval of 0 is treated as 1.
    pub fn with_interval(writer: W, pose_every: u64) -> Self {
        Self {
            writer,
            pose_every: pose_every.max(1),
            rows:       Vec::new(),
            pending:    false,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Write any pending poses and flush the writer.  Needed after a stopped
    /// run, which never reaches `on_finished`.  Earlier write errors are
    /// still reported by `take_error`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.flush_poses();
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn collect_poses(&mut self, step: u64, agents: &[AgentState]) {
        self.rows.clear();
        self.rows.extend(agents.iter().map(|a| PoseRow {
            step,
            robot_id:   a.name.clone(),
            x:          a.pose.position.x,
            y:          a.pose.position.y,
            theta:      a.pose.theta,
            goal_index: a.goal_index(),
        }));
        self.pending = !self.rows.is_empty();
    }

    fn flush_poses(&mut self) {
        if self.pending {
            self.pending = false;
            let result = self.writer.write_poses(&self.rows);
            self.store_err(result);
        }
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "trajectory output failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> EngineObserver for TrajectoryObserver<W> {
    fn on_goal_reached(&mut self, step: u64, agent: &AgentState, goal_index: usize) {
        let row = GoalEventRow { step, robot_id: agent.name.clone(), goal_index };
        let result = self.writer.write_goal_event(&row);
        self.store_err(result);
    }

    fn on_step_end(&mut self, step: u64, agents: &[AgentState]) {
        self.collect_poses(step, agents);
        if step % self.pose_every == 0 {
            self.flush_poses();
        }
    }

    fn on_finished(&mut self, step: u64, outcome: StepOutcome) {
        // The final step may fall between intervals.
        self.flush_poses();
        let result = self.writer.finish();
        self.store_err(result);
        debug!(step, ?outcome, "trajectory output finished");
    }
}
