//! Static world: bounds plus circular obstacles.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds obstacle centres.  Overlap queries search
//! within `robot_radius + max_obstacle_radius` and then apply the exact
//! disc-disc test, so obstacles of mixed sizes are handled correctly.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::{ObstacleId, Vec2, WorldSpec};

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// A static circular obstacle.  Immutable once the world is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub id:       ObstacleId,
    pub position: Vec2,
    pub radius:   f64,
    pub label:    String,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct ObstacleEntry {
    point: [f64; 2],
    id:    ObstacleId,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObstacleEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── WorldBounds ───────────────────────────────────────────────────────────────

/// Axis-aligned world rectangle `[0, width] × [0, height]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldBounds {
    pub width:  f64,
    pub height: f64,
}

impl WorldBounds {
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

// ── WorldModel ────────────────────────────────────────────────────────────────

/// World bounds, obstacles, and a spatial index over the obstacles.
///
/// Built once from a [`WorldSpec`]; never mutated afterwards.
pub struct WorldModel {
    pub bounds: WorldBounds,

    /// Name of the background map the scenario was drawn on, if any.
    /// Carried through to renderers untouched.
    pub map: Option<String>,

    /// Obstacles indexed by `ObstacleId`.
    pub obstacles: Vec<Obstacle>,

    spatial_idx: RTree<ObstacleEntry>,
    max_radius:  f64,
}

impl WorldModel {
    /// Build the world from its configuration.  Obstacle ids are assigned in
    /// declaration order.
    pub fn from_spec(spec: &WorldSpec) -> Self {
        let obstacles: Vec<Obstacle> = spec
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| Obstacle {
                id:       ObstacleId(i as u32),
                position: o.position,
                radius:   o.radius,
                label:    o.label.clone(),
            })
            .collect();

        let entries: Vec<ObstacleEntry> = obstacles
            .iter()
            .map(|o| ObstacleEntry { point: [o.position.x, o.position.y], id: o.id })
            .collect();
        let max_radius = obstacles.iter().map(|o| o.radius).fold(0.0, f64::max);

        Self {
            bounds:      WorldBounds { width: spec.width, height: spec.height },
            map:         spec.map.clone(),
            obstacles,
            spatial_idx: RTree::bulk_load(entries),
            max_radius,
        }
    }

    /// A world with the given bounds and no obstacles.
    pub fn empty(width: f64, height: f64) -> Self {
        Self::from_spec(&WorldSpec {
            width,
            height,
            map:       None,
            obstacles: vec![],
        })
    }

    #[inline]
    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.index())
    }

    #[inline]
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Ids of every obstacle whose disc overlaps the disc at `center` with
    /// `radius`, in ascending id order.  Touching edges count as overlap.
    pub fn obstacles_touching(&self, center: Vec2, radius: f64) -> Vec<ObstacleId> {
        let reach = radius + self.max_radius;
        let mut hits: Vec<ObstacleId> = self
            .spatial_idx
            .locate_within_distance([center.x, center.y], reach * reach)
            .map(|e| e.id)
            .filter(|id| {
                let o = &self.obstacles[id.index()];
                o.position.distance(center) <= o.radius + radius
            })
            .collect();
        hits.sort_unstable();
        hits
    }
}

impl std::fmt::Debug for WorldModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldModel")
            .field("bounds", &self.bounds)
            .field("map", &self.map)
            .field("obstacles", &self.obstacles)
            .finish()
    }
}
