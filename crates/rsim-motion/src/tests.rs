//! Unit tests for rsim-motion.

use rsim_core::{PoseSpec, RobotId, RobotSpec, Vec2};

use crate::{Advance, AgentState, MotionError, MotionPolicy, SteerToGoal};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn agent_at(x: f64, y: f64, goals: Vec<Vec2>, max_speed: f64) -> AgentState {
    let spec = RobotSpec {
        id:             "robot_0".to_owned(),
        start_position: PoseSpec { x, y, theta: 0.0 },
        goals,
        max_speed,
        radius:         1.0,
        color:          "#00d9ff".to_owned(),
    };
    AgentState::from_spec(RobotId(0), &spec)
}

// ── AgentState ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent_state {
    use super::*;

    #[test]
    fn from_spec_starts_at_first_goal() {
        let a = agent_at(1.0, 2.0, vec![Vec2::new(5.0, 5.0), Vec2::new(9.0, 9.0)], 3.0);
        assert_eq!(a.name, "robot_0");
        assert_eq!(a.position(), Vec2::new(1.0, 2.0));
        assert_eq!(a.goal_index(), 0);
        assert_eq!(a.current_goal(), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(a.remaining_goals(), 2);
        assert!(!a.is_done());
    }

    #[test]
    fn complete_current_goal_stops_at_len() {
        let mut a = agent_at(0.0, 0.0, vec![Vec2::new(1.0, 0.0)], 1.0);
        assert_eq!(a.complete_current_goal(), Some(0));
        assert!(a.is_done());
        assert_eq!(a.current_goal(), None);
        assert_eq!(a.complete_current_goal(), None);
        assert_eq!(a.goal_index(), 1);
    }
}

// ── SteerToGoal ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod steer_to_goal {
    use super::*;

    #[test]
    fn scenario_a_moves_then_arrives() {
        let mut a = agent_at(0.0, 0.0, vec![Vec2::new(10.0, 0.0)], 5.0);

        assert_eq!(SteerToGoal.advance(&mut a, 1.0, 1.0), Ok(Advance::Moved));
        assert_eq!(a.position(), Vec2::new(5.0, 0.0));

        assert_eq!(SteerToGoal.advance(&mut a, 1.0, 1.0), Ok(Advance::Moved));
        assert_eq!(a.position(), Vec2::new(10.0, 0.0));

        assert_eq!(SteerToGoal.advance(&mut a, 1.0, 1.0), Ok(Advance::Arrived { goal_index: 0 }));
        assert_eq!(a.position(), Vec2::new(10.0, 0.0));
        assert!(a.is_done());
    }

    #[test]
    fn arrival_does_not_move_toward_next_goal() {
        let mut a = agent_at(0.0, 0.0, vec![Vec2::new(0.5, 0.0), Vec2::new(100.0, 0.0)], 10.0);
        let before = a.pose;
        assert_eq!(SteerToGoal.advance(&mut a, 1.0, 1.0), Ok(Advance::Arrived { goal_index: 0 }));
        assert_eq!(a.pose, before);
        assert_eq!(a.goal_index(), 1);

        assert_eq!(SteerToGoal.advance(&mut a, 1.0, 1.0), Ok(Advance::Moved));
        assert_eq!(a.position(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn never_overshoots() {
        let mut a = agent_at(0.0, 0.0, vec![Vec2::new(3.0, 4.0)], 100.0);
        assert_eq!(SteerToGoal.advance(&mut a, 0.5, 1.0), Ok(Advance::Moved));
        assert!(a.position().distance(Vec2::new(3.0, 4.0)) < 1e-9);
    }

    #[test]
    fn heading_snaps_to_bearing() {
        let mut a = agent_at(0.0, 0.0, vec![Vec2::new(0.0, 10.0)], 1.0);
        SteerToGoal.advance(&mut a, 0.5, 1.0).unwrap();
        assert!((a.pose.theta - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let mut b = agent_at(0.0, 0.0, vec![Vec2::new(-10.0, 0.0)], 1.0);
        SteerToGoal.advance(&mut b, 0.5, 1.0).unwrap();
        assert!((b.pose.theta - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn finished_agent_is_idle() {
        let mut a = agent_at(0.0, 0.0, vec![Vec2::new(0.0, 0.0)], 1.0);
        SteerToGoal.advance(&mut a, 1.0, 1.0).unwrap();
        let before = a.clone();
        assert_eq!(SteerToGoal.advance(&mut a, 1.0, 1.0), Ok(Advance::Idle));
        assert_eq!(a, before);
    }

    #[test]
    fn zero_threshold_on_goal_is_an_error() {
        let mut a = agent_at(2.0, 2.0, vec![Vec2::new(2.0, 2.0)], 1.0);
        assert_eq!(
            SteerToGoal.advance(&mut a, 0.0, 1.0),
            Err(MotionError::DegenerateDistance(RobotId(0))),
        );
        assert_eq!(a.goal_index(), 0);
    }

    #[test]
    fn non_finite_pose_is_an_error() {
        let mut a = agent_at(0.0, 0.0, vec![Vec2::new(10.0, 0.0)], f64::INFINITY);
        // speed = min(inf, 10) = 10, so an infinite speed alone is clamped.
        assert_eq!(SteerToGoal.advance(&mut a, 1.0, 1.0), Ok(Advance::Moved));

        let mut b = agent_at(f64::NAN, 0.0, vec![Vec2::new(10.0, 0.0)], 1.0);
        assert!(matches!(
            SteerToGoal.advance(&mut b, 1.0, 1.0),
            Err(MotionError::NonFinite { .. })
        ));
    }

    #[test]
    fn monotonic_approach_over_many_steps() {
        let goal = Vec2::new(37.0, -12.5);
        let mut a = agent_at(-20.0, 40.0, vec![goal], 3.3);
        let mut prev = a.position().distance(goal);
        while !a.is_done() {
            let outcome = SteerToGoal.advance(&mut a, 2.0, 0.7).unwrap();
            let now = a.position().distance(goal);
            if outcome == Advance::Moved {
                assert!(now <= prev, "distance grew from {prev} to {now}");
            }
            prev = now;
        }
    }
}
