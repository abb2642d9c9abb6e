//! Survivor-rescue scenario constructors.
//!
//! A rescue scenario sends a team of identical robots from a shared start
//! point to visit every survivor in order.  Survivors are also placed in the
//! world as small circular obstacles so renderers can draw them.
//!
//! Colour choice stays with the caller: pass whatever palette the front-end
//! uses and robots cycle through it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{ObstacleSpec, PoseSpec, RobotSpec, ScenarioConfig, SimParams, Vec2, WorldSpec};

pub const RESCUE_WORLD_WIDTH:  f64 = 800.0;
pub const RESCUE_WORLD_HEIGHT: f64 = 600.0;
pub const ROBOT_MAX_SPEED:     f64 = 50.0;
pub const ROBOT_RADIUS:        f64 = 15.0;
pub const SURVIVOR_RADIUS:     f64 = 10.0;

/// Used when the caller supplies an empty palette.
pub const FALLBACK_COLOR: &str = "#ffffff";

/// Keeps random survivors clear of the world edge.
const EDGE_MARGIN: f64 = 20.0;

impl ScenarioConfig {
    /// Build a rescue scenario on the standard 800 × 600 world.
    ///
    /// Robots are named `robot_0 .. robot_{n-1}`, start at `start` facing
    /// +x, and share the same ordered goal list (the survivors).  Survivor
    /// `i` becomes obstacle `survivor_i`.
    pub fn rescue(
        robot_count: usize,
        start:       Vec2,
        survivors:   &[Vec2],
        map:         Option<String>,
        params:      SimParams,
        colors:      &[String],
    ) -> Self {
        let robots = (0..robot_count)
            .map(|i| RobotSpec {
                id:             format!("robot_{i}"),
                start_position: PoseSpec { x: start.x, y: start.y, theta: 0.0 },
                goals:          survivors.to_vec(),
                max_speed:      ROBOT_MAX_SPEED,
                radius:         ROBOT_RADIUS,
                color:          if colors.is_empty() {
                    FALLBACK_COLOR.to_owned()
                } else {
                    colors[i % colors.len()].clone()
                },
            })
            .collect();

        let obstacles = survivors
            .iter()
            .enumerate()
            .map(|(i, &position)| ObstacleSpec {
                position,
                radius: SURVIVOR_RADIUS,
                label:  format!("survivor_{i}"),
            })
            .collect();

        Self {
            world: WorldSpec {
                width:  RESCUE_WORLD_WIDTH,
                height: RESCUE_WORLD_HEIGHT,
                map,
                obstacles,
            },
            robots,
            simulation: params,
        }
    }

    /// A reproducible rescue scenario with `survivor_count` survivors placed
    /// uniformly at random (same `seed` → same scenario).  Robots start near
    /// the lower-left corner.
    pub fn random_rescue(
        seed:           u64,
        robot_count:    usize,
        survivor_count: usize,
        params:         SimParams,
        colors:         &[String],
    ) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let survivors: Vec<Vec2> = (0..survivor_count)
            .map(|_| {
                Vec2::new(
                    rng.gen_range(EDGE_MARGIN..RESCUE_WORLD_WIDTH - EDGE_MARGIN),
                    rng.gen_range(EDGE_MARGIN..RESCUE_WORLD_HEIGHT - EDGE_MARGIN),
                )
            })
            .collect();
        let start = Vec2::new(2.0 * EDGE_MARGIN, 2.0 * EDGE_MARGIN);
        Self::rescue(robot_count, start, &survivors, None, params, colors)
    }
}
