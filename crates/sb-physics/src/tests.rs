//! Unit tests for sb-physics.

#[cfg(test)]
mod euler {
    use sb_agent::AgentStoreBuilder;
    use sb_core::{AgentId, KinematicState, Vec2};

    use crate::{EulerIntegrator, ForceSink, Integrator, PhysicsError};

    fn one_agent(mass: f32) -> sb_agent::AgentStore {
        AgentStoreBuilder::new(0)
            .agent(KinematicState { mass, ..KinematicState::default() })
            .build()
    }

    #[test]
    fn semi_implicit_step() {
        let mut agents = one_agent(2.0);
        let mut euler = EulerIntegrator::new();
        euler.apply_force(AgentId(0), Vec2::new(4.0, 0.0));
        euler.integrate(&mut agents, 0.5).unwrap();
        // a = 2, v = 1, p = v·dt = 0.5
        assert_eq!(agents.velocity[0], Vec2::new(1.0, 0.0));
        assert_eq!(agents.position[0], Vec2::new(0.5, 0.0));
    }

    #[test]
    fn forces_accumulate_then_clear() {
        let mut agents = one_agent(1.0);
        let mut euler = EulerIntegrator::with_capacity(1);
        euler.apply_force(AgentId(0), Vec2::X);
        euler.apply_force(AgentId(0), Vec2::Y);
        assert_eq!(euler.pending(AgentId(0)), Vec2::ONE);
        euler.integrate(&mut agents, 1.0).unwrap();
        assert_eq!(euler.pending(AgentId(0)), Vec2::ZERO);

        let v = agents.velocity[0];
        euler.integrate(&mut agents, 1.0).unwrap();
        assert_eq!(agents.velocity[0], v, "no force, no change in velocity");
    }

    #[test]
    fn force_on_unknown_agent_is_reported() {
        let mut agents = one_agent(1.0);
        let mut euler = EulerIntegrator::new();
        euler.apply_force(AgentId(3), Vec2::X);
        let err = euler.integrate(&mut agents, 0.1).unwrap_err();
        assert!(matches!(err, PhysicsError::UnknownAgent(AgentId(3))));
    }

    #[test]
    fn rejects_bad_timestep() {
        let mut agents = one_agent(1.0);
        assert!(EulerIntegrator::new().integrate(&mut agents, 0.0).is_err());
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink: Vec<(AgentId, Vec2)> = Vec::new();
        sink.apply_force(AgentId(1), Vec2::X);
        sink.apply_force(AgentId(0), Vec2::Y);
        assert_eq!(sink, vec![(AgentId(1), Vec2::X), (AgentId(0), Vec2::Y)]);
    }
}
