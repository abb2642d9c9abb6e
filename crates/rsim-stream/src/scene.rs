//! Structured scene output.
//!
//! [`SceneRenderer`] turns each frame into a [`Scene`]: plain data that a
//! front-end can draw without knowing anything about the engine.
//! [`JsonSceneRenderer`] serialises the same scene to JSON bytes.

use serde::Serialize;

use crate::{FrameView, RenderResult, Renderer};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub step:      u64,
    pub title:     String,
    pub width:     f64,
    pub height:    f64,
    pub map:       Option<String>,
    pub obstacles: Vec<SceneObstacle>,
    pub robots:    Vec<SceneRobot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObstacle {
    pub id:      u32,
    pub x:       f64,
    pub y:       f64,
    pub radius:  f64,
    pub label:   String,
    /// Some robot's body overlaps this obstacle in this frame.
    pub touched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneRobot {
    pub id:           String,
    pub x:            f64,
    pub y:            f64,
    pub theta:        f64,
    pub radius:       f64,
    pub color:        String,
    pub goal_index:   usize,
    pub goal_count:   usize,
    pub current_goal: Option<[f64; 2]>,
    pub done:         bool,
}

impl Scene {
    pub fn from_frame(frame: &FrameView<'_>) -> Self {
        let world = frame.world;

        let mut touched = vec![false; world.obstacle_count()];
        for agent in frame.agents {
            for id in world.obstacles_touching(agent.position(), agent.radius) {
                touched[id.index()] = true;
            }
        }

        let obstacles = world
            .obstacles
            .iter()
            .map(|o| SceneObstacle {
                id:      o.id.0,
                x:       o.position.x,
                y:       o.position.y,
                radius:  o.radius,
                label:   o.label.clone(),
                touched: touched[o.id.index()],
            })
            .collect();

        let robots = frame
            .agents
            .iter()
            .map(|a| SceneRobot {
                id:           a.name.clone(),
                x:            a.pose.position.x,
                y:            a.pose.position.y,
                theta:        a.pose.theta,
                radius:       a.radius,
                color:        a.color.clone(),
                goal_index:   a.goal_index(),
                goal_count:   a.goals().len(),
                current_goal: a.current_goal().map(|g| [g.x, g.y]),
                done:         a.is_done(),
            })
            .collect();

        Scene {
            step: frame.step,
            title: format!("Robot Simulation - Step {}", frame.step),
            width: world.bounds.width,
            height: world.bounds.height,
            map: world.map.clone(),
            obstacles,
            robots,
        }
    }
}

/// Renders each frame to a [`Scene`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneRenderer;

impl Renderer for SceneRenderer {
    type Payload = Scene;

    fn render(&mut self, frame: &FrameView<'_>) -> RenderResult<Scene> {
        Ok(Scene::from_frame(frame))
    }
}

/// Renders each frame to the JSON encoding of its [`Scene`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSceneRenderer {
    pretty: bool,
}

impl JsonSceneRenderer {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Renderer for JsonSceneRenderer {
    type Payload = Vec<u8>;

    fn render(&mut self, frame: &FrameView<'_>) -> RenderResult<Vec<u8>> {
        let scene = Scene::from_frame(frame);
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&scene)?
        } else {
            serde_json::to_vec(&scene)?
        };
        Ok(bytes)
    }
}
