//! Integration tests for sb-sim.

use sb_agent::{AgentStore, AgentStoreBuilder, ScatterSpec};
use sb_controller::StepReport;
use sb_core::{AgentId, KinematicState, SimConfig, Tick, Vec2};

use crate::SimObserver;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        dt:                    0.02,
        total_ticks,
        seed:                  42,
        num_threads:           Some(1),
        output_interval_ticks: 10,
    }
}

fn still_agents(positions: &[Vec2]) -> AgentStore {
    positions
        .iter()
        .fold(AgentStoreBuilder::new(42), |b, &p| b.agent(KinematicState::at_rest(p, 0.0, 1.0)))
        .build()
}

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Counts every callback.
#[derive(Default)]
struct Counter {
    starts:    u64,
    ends:      u64,
    steered:   usize,
    snapshots: Vec<Tick>,
    finished:  Option<Tick>,
    reports:   Vec<(Tick, AgentId)>,
}

impl SimObserver for Counter {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }
    fn on_agent_steered(&mut self, tick: Tick, report: &StepReport) {
        self.reports.push((tick, report.agent));
    }
    fn on_tick_end(&mut self, _tick: Tick, steered: usize) {
        self.ends += 1;
        self.steered += steered;
    }
    fn on_snapshot(&mut self, tick: Tick, _agents: &AgentStore) {
        self.snapshots.push(tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.finished = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use sb_controller::{ControllerConfig, SteeringController};
    use sb_core::{KinematicLimits, SbError};
    use sb_sensor::{BodyKind, BodyTable, LayerMask, Obstacle, SensorSet, SensorShape};

    use super::*;
    use crate::{SimBuilder, SimError};

    #[test]
    fn builds_with_defaults() {
        let agents = still_agents(&[Vec2::ZERO, Vec2::X, Vec2::Y]);
        let sim = SimBuilder::new(test_config(10), agents).build().unwrap();
        assert_eq!(sim.controllers.len(), 3);
        assert_eq!(sim.bodies.len(), 3);
        assert!(sim.controllers.iter().all(|c| c.is_empty()));
    }

    #[test]
    fn agents_join_existing_body_table() {
        let mut bodies = BodyTable::new();
        bodies.add_obstacle(Obstacle::new(Vec2::new(5.0, 5.0), 1.0), LayerMask::layer(1));
        let agents = still_agents(&[Vec2::ZERO]);
        let sim = SimBuilder::new(test_config(10), agents).bodies(bodies).build().unwrap();
        assert_eq!(sim.bodies.len(), 2);
        let body = sim.bodies.body_of_agent(AgentId(0)).unwrap();
        assert_eq!(sim.bodies.kind(body), Some(BodyKind::Agent(AgentId(0))));
    }

    #[test]
    fn controller_count_mismatch_errors() {
        let agents = still_agents(&[Vec2::ZERO, Vec2::X]);
        let one = vec![
            SteeringController::new(KinematicLimits::default(), ControllerConfig::default())
                .unwrap(),
        ];
        let result = SimBuilder::new(test_config(10), agents).controllers(one).build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 2, got: 1, what: "controllers" })
        ));
    }

    #[test]
    fn sensor_with_unknown_owner_errors() {
        let mut sensors = SensorSet::new();
        sensors.add_sensor(AgentId(7), SensorShape::circle(1.0).unwrap(), LayerMask::ALL);
        let result = SimBuilder::new(test_config(10), still_agents(&[Vec2::ZERO]))
            .sensors(sensors)
            .build();
        assert!(matches!(result, Err(SimError::UnknownAgent(AgentId(7)))));
    }

    #[test]
    fn invalid_timestep_errors() {
        let config = SimConfig { dt: 0.0, ..test_config(10) };
        let result = SimBuilder::new(config, still_agents(&[Vec2::ZERO])).build();
        assert!(matches!(result, Err(SimError::Config(SbError::Config(_)))));
    }

    #[test]
    fn invalid_default_limits_error() {
        let limits = KinematicLimits { max_braking_force: -1.0, ..KinematicLimits::default() };
        let result = SimBuilder::new(test_config(10), still_agents(&[Vec2::ZERO]))
            .limits(limits)
            .build();
        assert!(matches!(result, Err(SimError::Controller(_))));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use sb_behavior::{Arrival, Cruise, Target};

    use super::*;
    use crate::{NoopObserver, SimBuilder};

    #[test]
    fn runs_to_end_tick() {
        init_logging();
        let agents = still_agents(&[Vec2::ZERO, Vec2::new(3.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(25), agents).build().unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(sim.clock.current_tick, Tick(25));
        assert_eq!(obs.starts, 25);
        assert_eq!(obs.ends, 25);
        assert_eq!(obs.steered, 50);
        assert_eq!(obs.snapshots, vec![Tick(0), Tick(10), Tick(20)]);
        assert_eq!(obs.finished, Some(Tick(25)));
    }

    #[test]
    fn reports_arrive_in_agent_order() {
        let agents = still_agents(&[Vec2::ZERO, Vec2::X, Vec2::Y]);
        let mut sim = SimBuilder::new(test_config(2), agents).build().unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs).unwrap();
        let expected: Vec<_> = [Tick(0), Tick(1)]
            .into_iter()
            .flat_map(|t| (0..3).map(move |i| (t, AgentId(i))))
            .collect();
        assert_eq!(obs.reports, expected);
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = SimBuilder::new(test_config(2), still_agents(&[Vec2::ZERO])).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
    }

    #[test]
    fn agents_without_behaviours_stay_put() {
        let mut sim = SimBuilder::new(test_config(50), still_agents(&[Vec2::new(1.0, 2.0)]))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.agents.position[0], Vec2::new(1.0, 2.0));
        assert_eq!(sim.agents.velocity[0], Vec2::ZERO);
    }

    #[test]
    fn cruise_accelerates_to_max_speed() {
        let mut sim = SimBuilder::new(test_config(300), still_agents(&[Vec2::ZERO])).build().unwrap();
        sim.controller_mut(AgentId(0)).unwrap().add(Cruise::new(1.0));
        sim.run(&mut NoopObserver).unwrap();

        let v = sim.agents.velocity[0];
        assert!((v.length() - 10.0).abs() < 0.05, "speed {}", v.length());
        // Facing +Y the whole way.
        assert!(v.x.abs() < 1e-4);
        assert!(sim.agents.position[0].y > 0.0);
    }

    #[test]
    fn arrival_settles_on_target() {
        let target = Vec2::new(0.0, 20.0);
        let mut sim = SimBuilder::new(test_config(1_000), still_agents(&[Vec2::ZERO]))
            .build()
            .unwrap();
        sim.controller_mut(AgentId(0))
            .unwrap()
            .add(Arrival::new(Target::Point(target), 10.0, 0.1, 1.0));
        sim.run(&mut NoopObserver).unwrap();

        let d = sim.agents.position[0].distance(target);
        assert!(d < 0.5, "ended {d} from target");
        assert!(sim.agents.velocity[0].length() < 0.5);
    }

    #[test]
    fn heading_is_written_back() {
        let agents = AgentStoreBuilder::new(0)
            .agent(KinematicState {
                velocity: Vec2::new(2.0, 0.0),
                ..KinematicState::default()
            })
            .build();
        assert_eq!(agents.forward[0], Vec2::Y);
        let mut sim = SimBuilder::new(test_config(1), agents).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert!((sim.agents.forward[0] - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn unknown_controller_is_an_error() {
        let mut sim = SimBuilder::new(test_config(1), still_agents(&[Vec2::ZERO])).build().unwrap();
        assert!(sim.controller(AgentId(0)).is_ok());
        assert!(sim.controller_mut(AgentId(1)).is_err());
    }
}

// ── Sensing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sensing_tests {
    use sb_core::SensorId;
    use sb_sensor::{LayerMask, SensorEvent, SensorSet, SensorShape};

    use super::*;
    use crate::{NoopObserver, SimBuilder};

    fn one_sensor() -> (SensorSet, SensorId) {
        let mut sensors = SensorSet::new();
        let id = sensors.add_sensor(AgentId(0), SensorShape::circle(5.0).unwrap(), LayerMask::ALL);
        (sensors, id)
    }

    #[test]
    fn detector_fills_sensors_before_arbitration() {
        let (sensors, id) = one_sensor();
        let agents = still_agents(&[Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(30.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(1), agents).sensors(sensors).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let near = sim.bodies.body_of_agent(AgentId(1)).unwrap();
        let sensor = sim.sensors.get(id).unwrap();
        assert_eq!(sensor.touching_objects().collect::<Vec<_>>(), vec![near]);
    }

    #[test]
    fn detector_reports_exit() {
        let (sensors, id) = one_sensor();
        let agents = still_agents(&[Vec2::ZERO, Vec2::new(3.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(2), agents).sensors(sensors).build().unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.sensors.get(id).unwrap().any_touching());

        sim.agents.position[1] = Vec2::new(50.0, 0.0);
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(!sim.sensors.get(id).unwrap().any_touching());
    }

    #[test]
    fn external_events_apply_next_tick() {
        let (sensors, id) = one_sensor();
        let agents = still_agents(&[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(2), agents)
            .sensors(sensors)
            .detect_overlaps(false)
            .build()
            .unwrap();
        let far = sim.bodies.body_of_agent(AgentId(1)).unwrap();

        let tx = sim.sensor_sender();
        tx.send((id, SensorEvent::Enter(far))).unwrap();
        assert!(!sim.sensors.get(id).unwrap().any_touching());

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        // Far outside the radius, but the detector is off.
        assert!(sim.sensors.get(id).unwrap().collides(far));
    }

    #[test]
    fn unknown_sensor_event_fails_the_tick() {
        let agents = still_agents(&[Vec2::ZERO]);
        let mut sim = SimBuilder::new(test_config(1), agents).build().unwrap();
        let body = sim.bodies.body_of_agent(AgentId(0)).unwrap();
        sim.sensor_sender().send((SensorId(3), SensorEvent::Enter(body))).unwrap();
        assert!(matches!(sim.run(&mut NoopObserver), Err(crate::SimError::Sensor(_))));
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use sb_behavior::{Separation, Wander, WanderConfig};
    use sb_core::AgentRng;
    use sb_sensor::{LayerMask, SensorSet, SensorShape};

    use super::*;
    use crate::{NoopObserver, Sim, SimBuilder};

    fn swarm(seed: u64) -> Sim {
        let agents = AgentStoreBuilder::new(seed)
            .scatter(ScatterSpec { count: 12, radius: 4.0, initial_speed: 2.0, ..ScatterSpec::default() })
            .build();
        let mut sensors = SensorSet::new();
        let ids: Vec<_> = agents
            .agent_ids()
            .map(|a| sensors.add_sensor(a, SensorShape::circle(2.0).unwrap(), LayerMask::ALL))
            .collect();
        let mut sim = SimBuilder::new(test_config(200), agents).sensors(sensors).build().unwrap();
        for (i, sensor) in ids.into_iter().enumerate() {
            let agent = AgentId(i as u32);
            let wander = WanderConfig {
                seed: AgentRng::derive_seed(seed, agent) as u32,
                ..WanderConfig::default()
            };
            let c = sim.controller_mut(agent).unwrap();
            c.add(Wander::new(wander, 1.0).unwrap());
            c.add(Separation::new(sensor, 2.0));
        }
        sim
    }

    #[test]
    fn same_seed_same_trajectories() {
        let mut a = swarm(7);
        let mut b = swarm(7);
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_eq!(a.agents.position, b.agents.position);
        assert_eq!(a.agents.velocity, b.agents.velocity);
        assert_eq!(a.agents.forward, b.agents.forward);
    }

    #[test]
    fn different_seed_diverges() {
        let mut a = swarm(7);
        let mut b = swarm(8);
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_ne!(a.agents.position, b.agents.position);
    }

    #[test]
    fn speeds_stay_bounded() {
        let mut sim = swarm(3);
        sim.run(&mut NoopObserver).unwrap();
        // One tick of overshoot at most, then the governor pulls back.
        for v in &sim.agents.velocity {
            assert!(v.length() <= 10.0 + 0.5, "speed {}", v.length());
            assert!(v.is_finite());
        }
    }
}
