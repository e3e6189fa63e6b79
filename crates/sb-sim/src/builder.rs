//! Fluent builder for constructing a [`Sim`].

use sb_agent::AgentStore;
use sb_controller::{ControllerConfig, SteeringController};
use sb_core::{KinematicLimits, SimConfig};
use sb_physics::{EulerIntegrator, Integrator};
use sb_sensor::{BodyTable, LayerMask, ProximityDetector, SensorInbox, SensorSet};
use tracing::debug;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: timestep, total ticks, seed, …
/// - [`AgentStore`]: from [`sb_agent::AgentStoreBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                                       |
/// |---------------------------|-----------------------------------------------|
/// | `.bodies(t)`              | Empty `BodyTable`                             |
/// | `.sensors(s)`             | Empty `SensorSet`                             |
/// | `.agent_layer(m)`         | `LayerMask::default()` (layer 0)              |
/// | `.controllers(v)`         | One empty controller per agent                |
/// | `.limits(l)`              | `KinematicLimits::default()`                  |
/// | `.controller_config(c)`   | `ControllerConfig::default()`                 |
/// | `.integrator(i)`          | `EulerIntegrator`                             |
/// | `.detect_overlaps(b)`     | `true`                                        |
///
/// Every agent is registered as a body in the table on `build`, so sensors
/// can see agents without the caller listing them.
///
/// # Example
///
/// ```rust,ignore
/// let agents = AgentStoreBuilder::new(seed).scatter(spec).build();
/// let mut sim = SimBuilder::new(config, agents)
///     .bodies(obstacles)
///     .limits(KinematicLimits { max_speed: 5.0, ..Default::default() })
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:            SimConfig,
    agents:            AgentStore,
    bodies:            Option<BodyTable>,
    sensors:           Option<SensorSet>,
    agent_layer:       LayerMask,
    controllers:       Option<Vec<SteeringController>>,
    limits:            KinematicLimits,
    controller_config: ControllerConfig,
    integrator:        Option<Box<dyn Integrator>>,
    detect_overlaps:   bool,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, agents: AgentStore) -> Self {
        Self {
            config,
            agents,
            bodies:            None,
            sensors:           None,
            agent_layer:       LayerMask::default(),
            controllers:       None,
            limits:            KinematicLimits::default(),
            controller_config: ControllerConfig::default(),
            integrator:        None,
            detect_overlaps:   true,
        }
    }

    /// Supply a body table, typically pre-filled with obstacles.
    pub fn bodies(mut self, bodies: BodyTable) -> Self {
        self.bodies = Some(bodies);
        self
    }

    /// Supply the sensors.  Every sensor's owner must be an agent in the store.
    pub fn sensors(mut self, sensors: SensorSet) -> Self {
        self.sensors = Some(sensors);
        self
    }

    /// Layer agents are registered on when added to the body table.
    pub fn agent_layer(mut self, layer: LayerMask) -> Self {
        self.agent_layer = layer;
        self
    }

    /// Supply one controller per agent, indexed by `AgentId`.
    ///
    /// Overrides `.limits` and `.controller_config`, which only apply to the
    /// default controllers.
    pub fn controllers(mut self, controllers: Vec<SteeringController>) -> Self {
        self.controllers = Some(controllers);
        self
    }

    /// Limits for the default controllers.
    pub fn limits(mut self, limits: KinematicLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Tuning for the default controllers.
    pub fn controller_config(mut self, config: ControllerConfig) -> Self {
        self.controller_config = config;
        self
    }

    /// Replace the reference Euler integrator.
    pub fn integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrator = Some(integrator);
        self
    }

    /// Turn the built-in proximity detector off when an external collision
    /// system feeds sensor events through [`Sim::sensor_sender`] instead.
    pub fn detect_overlaps(mut self, enabled: bool) -> Self {
        self.detect_overlaps = enabled;
        self
    }

    /// Validate inputs, register agent bodies, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let agent_count = self.agents.count;

        // ── Validate and resolve optional inputs ──────────────────────────
        let controllers = match self.controllers {
            Some(c) => {
                if c.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      c.len(),
                        what:     "controllers",
                    });
                }
                c
            }
            None => (0..agent_count)
                .map(|_| SteeringController::new(self.limits, self.controller_config))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let sensors = self.sensors.unwrap_or_default();
        if let Some((_, orphan)) = sensors.iter().find(|(_, s)| !self.agents.contains(s.owner)) {
            return Err(SimError::UnknownAgent(orphan.owner));
        }

        let mut bodies = self.bodies.unwrap_or_default();
        bodies.add_all_agents(&self.agents, self.agent_layer);

        let integrator = self
            .integrator
            .unwrap_or_else(|| Box::new(EulerIntegrator::with_capacity(agent_count)));

        debug!(
            agents = agent_count,
            bodies = bodies.len(),
            sensors = sensors.len(),
            dt = self.config.dt,
            total_ticks = self.config.total_ticks,
            "built simulation"
        );

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            agents: self.agents,
            bodies,
            sensors,
            controllers,
            inbox: SensorInbox::new(),
            detector: self.detect_overlaps.then(ProximityDetector::new),
            integrator,
        })
    }
}
