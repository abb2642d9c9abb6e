//! Integration tests for rsim-engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rsim_core::{ConfigError, PoseSpec, RobotSpec, ScenarioConfig, SimParams, Vec2, WorldSpec};
use rsim_motion::{Advance, AgentState, MotionPolicy, MotionResult};

use crate::{
    ControlError, EngineBuilder, EngineError, EngineObserver, RunState, SimulationEngine,
    StepOutcome,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn robot(id: &str, start: (f64, f64), goals: &[(f64, f64)], max_speed: f64) -> RobotSpec {
    RobotSpec {
        id:             id.to_owned(),
        start_position: PoseSpec { x: start.0, y: start.1, theta: 0.0 },
        goals:          goals.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        max_speed,
        radius:         1.0,
        color:          "#00d9ff".to_owned(),
    }
}

fn config(robots: Vec<RobotSpec>, max_steps: u64) -> ScenarioConfig {
    ScenarioConfig {
        world: WorldSpec { width: 1000.0, height: 1000.0, map: None, obstacles: vec![] },
        robots,
        simulation: SimParams { max_steps, time_step: 1.0, goal_threshold: 1.0 },
    }
}

/// Scenario A: one robot at the origin, one goal at (10, 0), speed 5.
fn scenario_a() -> SimulationEngine {
    EngineBuilder::new(config(vec![robot("a", (0.0, 0.0), &[(10.0, 0.0)], 5.0)], 100))
        .build()
        .unwrap()
}

/// A robot that can never finish within a short run.
fn far_away(max_steps: u64) -> SimulationEngine {
    EngineBuilder::new(config(vec![robot("a", (0.0, 0.0), &[(900.0, 900.0)], 1.0)], max_steps))
        .build()
        .unwrap()
}

// ── EngineBuilder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_running_at_step_zero() {
        let engine = scenario_a();
        assert_eq!(engine.run_state(), RunState::Running);
        assert_eq!(engine.step_count(), 0);
        assert_eq!(engine.agents().len(), 1);
        assert_eq!(engine.agents()[0].name, "a");
        assert_eq!(engine.completed_agents(), 0);
    }

    #[test]
    fn robot_without_goals_rejected() {
        let result = EngineBuilder::new(config(vec![robot("idle", (0.0, 0.0), &[], 1.0)], 10)).build();
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::EmptyGoals { .. }))
        ));
    }

    #[test]
    fn zero_threshold_rejected() {
        let mut cfg = config(vec![robot("a", (0.0, 0.0), &[(1.0, 1.0)], 1.0)], 10);
        cfg.simulation.goal_threshold = 0.0;
        assert!(matches!(
            EngineBuilder::new(cfg).build(),
            Err(EngineError::Config(ConfigError::InvalidParam { name: "goal_threshold", .. }))
        ));
    }

    #[test]
    fn robot_ids_follow_config_order() {
        let engine = EngineBuilder::new(config(
            vec![
                robot("first", (0.0, 0.0), &[(1.0, 1.0)], 1.0),
                robot("second", (0.0, 0.0), &[(1.0, 1.0)], 1.0),
            ],
            10,
        ))
        .build()
        .unwrap();
        assert_eq!(engine.agent(rsim_core::RobotId(1)).unwrap().name, "second");
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn scenario_a_reaches_goal_on_step_three() {
        let mut engine = scenario_a();

        assert_eq!(engine.step(), Ok(StepOutcome::Advanced));
        assert_eq!(engine.agents()[0].position(), Vec2::new(5.0, 0.0));

        assert_eq!(engine.step(), Ok(StepOutcome::Advanced));
        assert_eq!(engine.agents()[0].position(), Vec2::new(10.0, 0.0));

        assert_eq!(engine.step(), Ok(StepOutcome::AllGoalsReached));
        assert_eq!(engine.agents()[0].goal_index(), 1);
        assert_eq!(engine.step_count(), 3);
        assert_eq!(engine.run_state(), RunState::Completed);
    }

    #[test]
    fn scenario_c_max_steps_one() {
        let mut engine = far_away(1);
        assert_eq!(engine.step(), Ok(StepOutcome::MaxStepsReached));
        assert_eq!(engine.step_count(), 1);
        assert!(!engine.agents()[0].is_done());
        assert_eq!(engine.run_state(), RunState::Completed);
    }

    #[test]
    fn goal_completion_beats_step_budget() {
        // Already on the goal: arrives on step 1, which is also the last step.
        let mut engine =
            EngineBuilder::new(config(vec![robot("a", (0.0, 0.0), &[(0.0, 0.0)], 1.0)], 1))
                .build()
                .unwrap();
        assert_eq!(engine.step(), Ok(StepOutcome::AllGoalsReached));
    }

    #[test]
    fn step_after_completion_fails_fast() {
        let mut engine = far_away(1);
        engine.step().unwrap();
        assert_eq!(engine.step(), Err(EngineError::NotRunning(RunState::Completed)));
        assert_eq!(engine.step_count(), 1);
    }

    #[test]
    fn finished_robot_stays_put_while_others_move() {
        let mut engine = EngineBuilder::new(config(
            vec![
                robot("near", (0.0, 0.0), &[(0.5, 0.0)], 1.0),
                robot("far", (0.0, 0.0), &[(50.0, 0.0)], 1.0),
            ],
            100,
        ))
        .build()
        .unwrap();

        engine.step().unwrap();
        let parked = engine.agents()[0].clone();
        assert!(parked.is_done());

        for _ in 0..5 {
            assert_eq!(engine.step(), Ok(StepOutcome::Advanced));
            assert_eq!(engine.agents()[0], parked);
        }
        assert_eq!(engine.completed_agents(), 1);
    }

    #[test]
    fn goal_index_and_step_count_invariants_hold_over_a_run() {
        let mut engine = EngineBuilder::new(config(
            vec![
                robot("a", (0.0, 0.0), &[(30.0, 0.0), (30.0, 30.0), (0.0, 0.0)], 4.0),
                robot("b", (100.0, 100.0), &[(90.0, 90.0), (10.0, 80.0)], 7.5),
            ],
            500,
        ))
        .build()
        .unwrap();

        let mut prev_idx: Vec<usize> = engine.agents().iter().map(|a| a.goal_index()).collect();
        let mut prev_dist: Vec<Option<f64>> = engine
            .agents()
            .iter()
            .map(|a| a.current_goal().map(|g| a.position().distance(g)))
            .collect();

        loop {
            let before = engine.step_count();
            let outcome = engine.step().unwrap();
            assert_eq!(engine.step_count(), before + 1);

            for (i, a) in engine.agents().iter().enumerate() {
                assert!(a.goal_index() >= prev_idx[i]);
                assert!(a.goal_index() <= a.goals().len());
                assert!(a.goal_index() - prev_idx[i] <= 1);
                if a.goal_index() == prev_idx[i] {
                    if let (Some(g), Some(d)) = (a.current_goal(), prev_dist[i]) {
                        assert!(a.position().distance(g) <= d);
                    }
                }
                prev_idx[i] = a.goal_index();
                prev_dist[i] = a.current_goal().map(|g| a.position().distance(g));
            }

            if outcome.is_terminal() {
                assert_eq!(outcome, StepOutcome::AllGoalsReached);
                break;
            }
        }
    }

    #[test]
    fn motion_error_is_fatal_and_uncounted() {
        struct Broken;
        impl MotionPolicy for Broken {
            fn advance(&self, agent: &mut AgentState, _: f64, _: f64) -> MotionResult<Advance> {
                Err(rsim_motion::MotionError::DegenerateDistance(agent.id))
            }
        }

        let mut engine = EngineBuilder::new(config(vec![robot("a", (0.0, 0.0), &[(9.0, 9.0)], 1.0)], 10))
            .policy(Broken)
            .build()
            .unwrap();
        assert!(matches!(engine.step(), Err(EngineError::Motion(_))));
        assert_eq!(engine.step_count(), 0);
    }
}

// ── Run-state machine ─────────────────────────────────────────────────────────

#[cfg(test)]
mod control_tests {
    use super::*;

    #[test]
    fn pause_blocks_stepping_until_resume() {
        let mut engine = far_away(100);
        engine.pause().unwrap();
        assert_eq!(engine.run_state(), RunState::Paused);

        for _ in 0..3 {
            assert_eq!(engine.step(), Err(EngineError::NotRunning(RunState::Paused)));
        }
        assert_eq!(engine.step_count(), 0);

        engine.resume().unwrap();
        assert_eq!(engine.step(), Ok(StepOutcome::Advanced));
        assert_eq!(engine.step_count(), 1);
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let engine = far_away(100);
        engine.resume().unwrap();
        assert_eq!(engine.run_state(), RunState::Running);
        engine.pause().unwrap();
        engine.pause().unwrap();
        assert_eq!(engine.run_state(), RunState::Paused);
    }

    #[test]
    fn stop_is_terminal() {
        let mut engine = far_away(100);
        engine.pause().unwrap();
        assert_eq!(engine.stop(), RunState::Stopped);

        assert_eq!(
            engine.resume(),
            Err(ControlError::InvalidTransition { from: RunState::Stopped, to: RunState::Running })
        );
        assert_eq!(
            engine.pause(),
            Err(ControlError::InvalidTransition { from: RunState::Stopped, to: RunState::Paused })
        );
        assert_eq!(engine.step(), Err(EngineError::NotRunning(RunState::Stopped)));
        assert_eq!(engine.stop(), RunState::Stopped);
    }

    #[test]
    fn stop_does_not_rewrite_completed() {
        let mut engine = far_away(1);
        engine.step().unwrap();
        assert_eq!(engine.stop(), RunState::Completed);
        assert!(engine.resume().is_err());
    }

    #[test]
    fn racing_stops_all_report_stopped() {
        let engine = far_away(100);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let control = engine.control();
                std::thread::spawn(move || {
                    // A pause can only lose to a stop that already landed.
                    if i % 2 == 0 && control.pause().is_err() {
                        assert_eq!(control.state(), RunState::Stopped);
                    }
                    control.stop()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), RunState::Stopped);
        }
        assert_eq!(engine.run_state(), RunState::Stopped);
    }

    #[test]
    fn handles_share_one_state_across_threads() {
        let engine = far_away(100);
        let control = engine.control();

        std::thread::spawn(move || {
            control.pause().unwrap();
            control.clone().stop();
        })
        .join()
        .unwrap();

        assert_eq!(engine.run_state(), RunState::Stopped);
    }

    #[test]
    fn concurrent_stop_is_seen_by_the_stepping_thread() {
        // Goal so distant the robot cannot arrive before the stop lands.
        let mut engine = EngineBuilder::new(config(
            vec![robot("a", (0.0, 0.0), &[(1.0e12, 1.0e12)], 1.0)],
            u64::MAX,
        ))
        .build()
        .unwrap();
        let control = engine.control();
        let stepped = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&stepped);

        let stopper = std::thread::spawn(move || {
            while seen.load(Ordering::Acquire) < 10 {
                std::thread::yield_now();
            }
            control.stop();
        });

        let err = loop {
            match engine.step() {
                Ok(_)  => { stepped.fetch_add(1, Ordering::Release); }
                Err(e) => break e,
            }
        };
        stopper.join().unwrap();

        assert_eq!(err, EngineError::NotRunning(RunState::Stopped));
        assert!(engine.step_count() >= 10);
        assert_eq!(engine.step_count() as usize, stepped.load(Ordering::Acquire));
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        arrivals: Vec<(u64, String, usize)>,
        steps:    Vec<u64>,
        finished: Option<(u64, StepOutcome)>,
    }

    impl EngineObserver for Recorder {
        fn on_goal_reached(&mut self, step: u64, agent: &AgentState, goal_index: usize) {
            self.arrivals.push((step, agent.name.clone(), goal_index));
        }
        fn on_step_end(&mut self, step: u64, _agents: &[AgentState]) {
            self.steps.push(step);
        }
        fn on_finished(&mut self, step: u64, outcome: StepOutcome) {
            self.finished = Some((step, outcome));
        }
    }

    #[test]
    fn observer_sees_arrivals_steps_and_finish() {
        let mut engine = scenario_a();
        let mut rec = Recorder::default();
        while !engine.step_observed(&mut rec).unwrap().is_terminal() {}

        assert_eq!(rec.arrivals, vec![(3, "a".to_owned(), 0)]);
        assert_eq!(rec.steps, vec![1, 2, 3]);
        assert_eq!(rec.finished, Some((3, StepOutcome::AllGoalsReached)));
    }

    #[test]
    fn observer_through_mut_reference() {
        let mut engine = far_away(2);
        let mut rec = Recorder::default();
        let mut by_ref = &mut rec;
        engine.step_observed(&mut by_ref).unwrap();
        engine.step_observed(&mut by_ref).unwrap();
        assert_eq!(rec.finished, Some((2, StepOutcome::MaxStepsReached)));
    }
}
