//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `robot_poses.csv`
//! - `goal_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{GoalEventRow, OutputError, OutputResult, PoseRow};

pub const POSES_FILE: &str = "robot_poses.csv";
pub const GOAL_EVENTS_FILE: &str = "goal_events.csv";

/// Writes trajectory output to two CSV files.
pub struct CsvTrajectoryWriter {
    poses:    Writer<File>,
    events:   Writer<File>,
    finished: bool,
}

impl CsvTrajectoryWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut poses = Writer::from_path(dir.join(POSES_FILE))?;
        poses.write_record(["step", "robot_id", "x", "y", "theta", "goal_index"])?;

        let mut events = Writer::from_path(dir.join(GOAL_EVENTS_FILE))?;
        events.write_record(["step", "robot_id", "goal_index"])?;

        Ok(Self { poses, events, finished: false })
    }
}

impl OutputWriter for CsvTrajectoryWriter {
    fn write_poses(&mut self, rows: &[PoseRow]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        for row in rows {
            self.poses.write_record(&[
                row.step.to_string(),
                row.robot_id.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.theta.to_string(),
                row.goal_index.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_goal_event(&mut self, row: &GoalEventRow) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.events.write_record(&[
            row.step.to_string(),
            row.robot_id.clone(),
            row.goal_index.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.poses.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
