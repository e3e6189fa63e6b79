//! Unit tests for sb-controller.

#[cfg(test)]
mod arbitrate {
    use sb_behavior::LocalForce;
    use sb_core::{KinematicLimits, Vec2};

    use crate::arbitrate::*;

    #[test]
    fn weighted_average_of_contributions() {
        let (f, w) = blend([
            (1.0, 1.0, Some(LocalForce::new(2.0, 0.0))),
            (3.0, 1.0, Some(LocalForce::new(0.0, 0.0))),
        ]);
        assert_eq!(f, LocalForce::new(0.5, 0.0));
        assert_eq!(w, 4.0);
    }

    #[test]
    fn abstaining_behaviours_do_not_dilute() {
        let (f, w) = blend([
            (1.0, 1.0, Some(LocalForce::new(2.0, 4.0))),
            (5.0, 1.0, None),
        ]);
        assert_eq!(f, LocalForce::new(2.0, 4.0));
        assert_eq!(w, 1.0);
    }

    #[test]
    fn all_inactive_is_exactly_zero() {
        let (f, w) = blend([
            (1.0, 0.0, Some(LocalForce::new(7.0, -3.0))),
            (2.0, 1.0, None),
            (0.0, 1.0, Some(LocalForce::new(1.0, 1.0))),
        ]);
        assert_eq!(f, LocalForce::ZERO);
        assert_eq!(w, 0.0);

        let (f, _) = blend(std::iter::empty());
        assert_eq!(f, LocalForce::ZERO);
    }

    #[test]
    #[should_panic]
    fn negative_weight_panics() {
        let _ = blend([(-1.0, 1.0, Some(LocalForce::ZERO))]);
    }

    #[test]
    fn tangent_respects_one_tick_speed_window() {
        let limits = KinematicLimits::default();
        // At rest, braking cannot reverse: lower bound is 0.
        let (lo, hi) = tangent_bounds(0.0, 1.0, 0.1, &limits);
        assert_eq!(lo, 0.0);
        assert_eq!(hi, limits.max_acceleration_force);

        // Just below max speed: acceleration limited to what closes the gap.
        let (_, hi) = tangent_bounds(9.9, 1.0, 0.1, &limits);
        assert!((hi - 1.0).abs() < 1e-4);
    }

    #[test]
    fn overspeed_lower_bound_wins() {
        let limits = KinematicLimits::default();
        let (lo, hi) = tangent_bounds(20.0, 1.0, 0.1, &limits);
        assert_eq!(lo, -limits.max_braking_force);
        assert_eq!(hi, lo);
    }

    #[test]
    fn clamp_is_idempotent() {
        let limits = KinematicLimits::default();
        let cases = [
            (LocalForce::new(500.0, 500.0), 5.0),
            (LocalForce::new(-500.0, -500.0), 5.0),
            (LocalForce::new(3.0, -2.0), 0.0),
            (LocalForce::new(-1.0, 1.0), 12.0),
        ];
        for (force, speed) in cases {
            let once = clamp_local(force, speed, 1.0, 0.02, &limits);
            let twice = clamp_local(once, speed, 1.0, 0.02, &limits);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn normal_cap_ramps_with_speed() {
        let limits = KinematicLimits::default();
        let f = clamp_local(LocalForce::new(100.0, 0.0), 5.0, 1.0, 0.02, &limits);
        assert_eq!(f.normal, 5.0);
        let f = clamp_local(LocalForce::new(-100.0, 0.0), 0.0, 1.0, 0.02, &limits);
        assert_eq!(f.normal, 0.0);
    }

    #[test]
    fn governor_only_above_max_speed() {
        assert_eq!(speed_governor(Vec2::new(0.0, 5.0), 10.0, 1.0), Vec2::ZERO);
        let g = speed_governor(Vec2::new(0.0, 12.0), 10.0, 2.0);
        assert!((g - Vec2::new(0.0, -4.0)).length() < 1e-5);
    }
}

#[cfg(test)]
mod controller {
    use sb_agent::{AgentStore, AgentStoreBuilder};
    use sb_behavior::{
        BehaviorState, Cruise, LocalForce, Seek, SteeringBehavior, SteeringContext, Target, WorldView,
    };
    use sb_core::{AgentId, BehaviorId, KinematicLimits, KinematicState, Vec2};
    use sb_sensor::{BodyTable, SensorSet};

    use crate::{ControllerConfig, ControllerError, SteeringController};

    /// Returns a fixed force with a fixed activation.
    struct Constant {
        force: Option<LocalForce>,
        act:   f32,
        state: BehaviorState,
    }

    impl Constant {
        fn new(weight: f32, act: f32, force: Option<LocalForce>) -> Self {
            Self { force, act, state: BehaviorState::new(weight) }
        }
    }

    impl SteeringBehavior for Constant {
        fn name(&self) -> &'static str {
            "constant"
        }
        fn state(&self) -> &BehaviorState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut BehaviorState {
            &mut self.state
        }
        fn evaluate(&mut self, _ctx: &SteeringContext<'_>) -> Option<LocalForce> {
            self.state.activation = self.act;
            self.force
        }
    }

    struct World {
        agents:  AgentStore,
        bodies:  BodyTable,
        sensors: SensorSet,
    }

    impl World {
        fn with(state: KinematicState) -> Self {
            Self {
                agents:  AgentStoreBuilder::new(0).agent(state).build(),
                bodies:  BodyTable::new(),
                sensors: SensorSet::new(),
            }
        }

        fn view(&self) -> WorldView<'_> {
            WorldView::new(&self.agents, &self.bodies, &self.sensors)
        }
    }

    fn controller() -> SteeringController {
        SteeringController::new(KinematicLimits::default(), ControllerConfig::default()).unwrap()
    }

    fn moving(velocity: Vec2) -> KinematicState {
        KinematicState { velocity, ..KinematicState::default() }
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut c = controller();
        let id = BehaviorId(4);
        assert_eq!(c.register(id, Box::new(Cruise::new(1.0))).unwrap(), 0);
        let err = c.register(id, Box::new(Cruise::new(1.0))).unwrap_err();
        assert!(matches!(err, ControllerError::DuplicateBehavior(BehaviorId(4))));
        // Fresh ids never collide with explicit ones.
        assert_eq!(c.add(Cruise::new(1.0)), BehaviorId(5));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn fresh_ids_survive_extreme_explicit_ids() {
        let mut c = controller();
        c.register(BehaviorId(u32::MAX - 1), Box::new(Cruise::new(1.0))).unwrap();
        // u32::MAX is the invalid sentinel: wrap to the lowest free id.
        assert_eq!(c.add(Cruise::new(1.0)), BehaviorId(0));
        assert_eq!(c.add(Cruise::new(1.0)), BehaviorId(1));

        let mut c = controller();
        c.register(BehaviorId(0), Box::new(Cruise::new(1.0))).unwrap();
        c.register(BehaviorId(u32::MAX), Box::new(Cruise::new(1.0))).unwrap();
        assert_eq!(c.add(Cruise::new(1.0)), BehaviorId(1));
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn unregister_returns_behaviour() {
        let mut c = controller();
        let id = c.add(Cruise::new(2.0));
        let b = c.unregister(id).unwrap();
        assert_eq!(b.weight(), 2.0);
        assert!(c.is_empty());
        assert!(matches!(c.unregister(id), Err(ControllerError::UnknownBehavior(_))));
    }

    #[test]
    fn no_behaviours_no_force() {
        let w = World::with(moving(Vec2::new(0.0, 3.0)));
        let mut c = controller();
        let r = c.compute(AgentId(0), w.view(), 0.02, 0.0).unwrap();
        assert_eq!(r.local, LocalForce::ZERO);
        assert_eq!(r.steering_force, Vec2::ZERO);
        assert_eq!(r.total_force, Vec2::ZERO);
    }

    #[test]
    fn inactive_behaviours_yield_exact_zero() {
        let w = World::with(moving(Vec2::new(0.0, 3.0)));
        let mut c = controller();
        c.add(Constant::new(1.0, 0.0, Some(LocalForce::new(3.0, 3.0))));
        c.add(Constant::new(1.0, 1.0, None));
        let r = c.compute(AgentId(0), w.view(), 0.02, 0.0).unwrap();
        assert_eq!(r.blended, LocalForce::ZERO);
        assert_eq!(r.weight_sum, 0.0);
        assert_eq!(r.steering_force, Vec2::ZERO);
    }

    #[test]
    fn disabled_behaviour_is_skipped() {
        let w = World::with(moving(Vec2::new(0.0, 3.0)));
        let mut c = controller();
        let id = c.add(Constant::new(1.0, 1.0, Some(LocalForce::new(1.0, 1.0))));
        c.set_enabled(id, false).unwrap();
        let r = c.compute(AgentId(0), w.view(), 0.02, 0.0).unwrap();
        assert!(r.contributions.is_empty());
        assert_eq!(r.total_force, Vec2::ZERO);
        assert_eq!(c.activation(id), Some(0.0));
    }

    #[test]
    fn world_force_uses_forward_and_right() {
        // Moving along +X at speed 10: full steering authority.
        let w = World::with(KinematicState {
            velocity: Vec2::new(10.0, 0.0),
            forward:  Vec2::X,
            ..KinematicState::default()
        });
        let mut c = controller();
        c.add(Constant::new(1.0, 1.0, Some(LocalForce::new(2.0, -3.0))));
        let r = c.compute(AgentId(0), w.view(), 0.02, 0.0).unwrap();
        assert_eq!(r.forward, Vec2::X);
        // right of +X is -Y.
        assert!((r.steering_force - Vec2::new(-3.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn forward_follows_velocity_without_hysteresis() {
        let c = controller();
        assert_eq!(c.estimate_forward(Vec2::Y, Vec2::new(0.0, -2.0)), -Vec2::Y);
        assert_eq!(c.estimate_forward(Vec2::Y, Vec2::ZERO), Vec2::Y);
    }

    #[test]
    fn hysteresis_rejects_backward_flip() {
        let config = ControllerConfig { forward_hysteresis: true, ..ControllerConfig::default() };
        let c = SteeringController::new(KinematicLimits::default(), config).unwrap();
        assert_eq!(c.estimate_forward(Vec2::Y, Vec2::new(0.0, -2.0)), Vec2::Y);
        let f = c.estimate_forward(Vec2::Y, Vec2::new(2.0, 0.1));
        assert!((f - Vec2::new(2.0, 0.1).normalize()).length() < 1e-6);
    }

    #[test]
    fn overspeed_adds_governor() {
        let w = World::with(moving(Vec2::new(0.0, 12.0)));
        let mut c = controller();
        let r = c.compute(AgentId(0), w.view(), 0.02, 0.0).unwrap();
        assert!((r.governor_force - Vec2::new(0.0, -2.0)).length() < 1e-5);
        assert_eq!(r.total_force, r.steering_force + r.governor_force);
    }

    #[test]
    fn step_submits_total_force() {
        let w = World::with(moving(Vec2::new(0.0, 1.0)));
        let mut c = controller();
        c.add(Seek::new(Target::Point(Vec2::new(0.0, 50.0)), 1.0));
        let mut sink: Vec<(AgentId, Vec2)> = Vec::new();
        let r = c.step(AgentId(0), w.view(), 0.02, 0.0, &mut sink).unwrap();
        assert_eq!(sink, vec![(AgentId(0), r.total_force)]);
        assert!(r.total_force.y > 0.0);
    }

    #[test]
    fn unknown_agent_and_bad_dt_are_errors() {
        let w = World::with(KinematicState::default());
        let mut c = controller();
        assert!(matches!(
            c.compute(AgentId(3), w.view(), 0.02, 0.0),
            Err(ControllerError::UnknownAgent(AgentId(3)))
        ));
        assert!(c.compute(AgentId(0), w.view(), 0.0, 0.0).is_err());
    }

    #[test]
    fn invalid_limits_rejected() {
        let limits = KinematicLimits { max_speed: f32::NAN, ..KinematicLimits::default() };
        assert!(SteeringController::new(limits, ControllerConfig::default()).is_err());
    }
}
