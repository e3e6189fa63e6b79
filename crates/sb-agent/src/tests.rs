//! Unit tests for sb-agent.

#[cfg(test)]
mod store {
    use sb_core::{AgentId, KinematicState, Vec2};

    use crate::AgentStore;

    #[test]
    fn push_assigns_sequential_ids() {
        let mut store = AgentStore::default();
        let a = store.push(KinematicState::default(), 0.5);
        let b = store.push(KinematicState::default(), 0.5);
        assert_eq!((a, b), (AgentId(0), AgentId(1)));
        assert_eq!(store.count, 2);
        assert_eq!(store.agent_ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn state_roundtrip() {
        let mut store = AgentStore::default();
        let id = store.push(KinematicState::default(), 0.5);
        let state = KinematicState {
            position: Vec2::new(1.0, 2.0),
            velocity: Vec2::new(0.0, 3.0),
            forward:  Vec2::Y,
            mass:     2.0,
        };
        store.set_state(id, state);
        assert_eq!(store.state(id), state);
    }

    #[test]
    fn get_unknown_is_none() {
        let store = AgentStore::default();
        assert!(store.get(AgentId(0)).is_none());
        assert!(!store.contains(AgentId(0)));
    }
}

#[cfg(test)]
mod builder {
    use sb_core::{KinematicState, Vec2, math};

    use crate::{AgentStoreBuilder, ScatterSpec};

    #[test]
    fn explicit_agents_keep_hull_radius() {
        let store = AgentStoreBuilder::new(0)
            .hull_radius(0.25)
            .agent(KinematicState::default())
            .build();
        assert_eq!(store.count, 1);
        assert_eq!(store.hull_radius[0], 0.25);
    }

    #[test]
    fn scatter_stays_inside_disk_and_bearing_range() {
        let center = Vec2::new(10.0, -3.0);
        let store = AgentStoreBuilder::new(7)
            .scatter(ScatterSpec {
                count: 50,
                center,
                radius: 2.0,
                bearing_range: (-30.0, 30.0),
                initial_speed: 1.5,
            })
            .build();
        assert_eq!(store.count, 50);
        for i in 0..store.count {
            assert!(store.position[i].distance(center) <= 2.0 + 1e-4);
            let b = math::bearing_deg(store.forward[i]);
            assert!((-30.0 - 1e-3..=30.0 + 1e-3).contains(&b), "bearing {b}");
            assert!((store.velocity[i].length() - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn scatter_is_deterministic_for_seed() {
        let spec = ScatterSpec { count: 10, ..ScatterSpec::default() };
        let a = AgentStoreBuilder::new(99).scatter(spec.clone()).build();
        let b = AgentStoreBuilder::new(99).scatter(spec).build();
        assert_eq!(a.position, b.position);
        assert_eq!(a.forward, b.forward);
    }

    #[test]
    #[should_panic]
    fn zero_mass_is_rejected() {
        let _ = AgentStoreBuilder::new(0).mass(0.0);
    }
}
