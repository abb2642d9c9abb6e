//! Scenario configuration record.
//!
//! The shape mirrors the scenario files the rescue front-end writes:
//!
//! ```text
//! world:      { width, height, map, obstacles: [ { position, radius, label } ] }
//! robots:     [ { id, start_position: { x, y, theta }, goals: [ { x, y } ],
//!                 max_speed, radius, color } ]
//! simulation: { max_steps, time_step, goal_threshold }
//! ```
//!
//! Loading and saving the file is the application's job; this module only
//! defines the in-memory record and [`ScenarioConfig::validate`].

use std::collections::HashSet;

use crate::{ConfigError, ConfigResult, Vec2};

/// Complete input for one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    pub world:      WorldSpec,
    pub robots:     Vec<RobotSpec>,
    pub simulation: SimParams,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSpec {
    pub width:  f64,
    pub height: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub map:    Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub obstacles: Vec<ObstacleSpec>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleSpec {
    pub position: Vec2,
    pub radius:   f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label:    String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseSpec {
    pub x:     f64,
    pub y:     f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub theta: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotSpec {
    /// Human-readable name, unique within the scenario.
    pub id:             String,
    pub start_position: PoseSpec,
    /// Waypoints visited in order.
    pub goals:          Vec<Vec2>,
    /// Distance units per second.
    pub max_speed:      f64,
    pub radius:         f64,
    /// Opaque colour string handed to renderers (e.g. `"#00d9ff"`).
    pub color:          String,
}

/// Step-loop parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    /// Hard cap on the number of steps before the run is declared complete.
    pub max_steps:      u64,
    /// Simulated seconds per step.
    pub time_step:      f64,
    /// A goal counts as reached once the robot is strictly closer than this.
    pub goal_threshold: f64,
}

impl SimParams {
    /// Parameters used by the survivor-rescue front-end.
    pub fn rescue() -> Self {
        Self {
            max_steps:      1_000,
            time_step:      0.1,
            goal_threshold: 15.0,
        }
    }
}

fn positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative_finite(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

impl ScenarioConfig {
    /// Check every field the engine relies on.
    ///
    /// Returns the first problem found; the engine builder refuses to run an
    /// unvalidated scenario.
    pub fn validate(&self) -> ConfigResult<()> {
        let sim = &self.simulation;
        if sim.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        if !positive_finite(sim.time_step) {
            return Err(ConfigError::InvalidParam { name: "time_step", value: sim.time_step });
        }
        if !positive_finite(sim.goal_threshold) {
            return Err(ConfigError::InvalidParam {
                name:  "goal_threshold",
                value: sim.goal_threshold,
            });
        }

        let world = &self.world;
        if !positive_finite(world.width) || !positive_finite(world.height) {
            return Err(ConfigError::InvalidBounds { width: world.width, height: world.height });
        }
        for o in &world.obstacles {
            if !o.position.is_finite() {
                return Err(ConfigError::InvalidObstacle {
                    label: o.label.clone(),
                    field: "position",
                    value: if o.position.x.is_finite() { o.position.y } else { o.position.x },
                });
            }
            if !non_negative_finite(o.radius) {
                return Err(ConfigError::InvalidObstacle {
                    label: o.label.clone(),
                    field: "radius",
                    value: o.radius,
                });
            }
        }

        let mut seen = HashSet::with_capacity(self.robots.len());
        for r in &self.robots {
            if !seen.insert(r.id.as_str()) {
                return Err(ConfigError::DuplicateRobotId(r.id.clone()));
            }
            if r.goals.is_empty() {
                return Err(ConfigError::EmptyGoals { robot: r.id.clone() });
            }
            let robot_field = |field: &'static str, value: f64| ConfigError::InvalidRobot {
                robot: r.id.clone(),
                field,
                value,
            };
            let start = r.start_position;
            for (field, value) in [
                ("start_position.x",     start.x),
                ("start_position.y",     start.y),
                ("start_position.theta", start.theta),
            ] {
                if !value.is_finite() {
                    return Err(robot_field(field, value));
                }
            }
            if !positive_finite(r.max_speed) {
                return Err(robot_field("max_speed", r.max_speed));
            }
            if !non_negative_finite(r.radius) {
                return Err(robot_field("radius", r.radius));
            }
            if let Some(g) = r.goals.iter().find(|g| !g.is_finite()) {
                return Err(robot_field("goals", if g.x.is_finite() { g.y } else { g.x }));
            }
        }

        Ok(())
    }
}
