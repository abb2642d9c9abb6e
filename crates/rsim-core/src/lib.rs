//! `rsim-core`: foundational types for the `robot_sim` framework.
//!
//! This crate is a dependency of every other `rsim-*` crate.  It has no
//! `rsim-*` dependencies and only a handful of external ones (`rand`,
//! `rstar`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `RobotId`, `ObstacleId`                                    |
//! | [`geo`]      | `Vec2`, `Pose`                                             |
//! | [`world`]    | `Obstacle`, `WorldBounds`, `WorldModel` (+ R-tree index)   |
//! | [`config`]   | `ScenarioConfig`, `RobotSpec`, `ObstacleSpec`, `SimParams` |
//! | [`scenario`] | survivor-rescue scenario constructors                      |
//! | [`error`]    | `ConfigError`, `ConfigResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |
//!           | Required to load scenarios from JSON/YAML.                 |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod scenario;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ObstacleSpec, PoseSpec, RobotSpec, ScenarioConfig, SimParams, WorldSpec};
pub use error::{ConfigError, ConfigResult};
pub use geo::{Pose, Vec2};
pub use ids::{ObstacleId, RobotId};
pub use world::{Obstacle, WorldBounds, WorldModel};
