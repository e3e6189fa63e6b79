//! The `Sim` struct and its tick loop.

use std::time::Instant;

use sb_agent::AgentStore;
use sb_behavior::WorldView;
use sb_controller::{StepReport, SteeringController};
use sb_core::{AgentId, SimClock, SimConfig, Tick};
use sb_physics::Integrator;
use sb_sensor::{BodyTable, ProximityDetector, SensorEventSender, SensorInbox, SensorSet};
use tracing::{info, trace};

use crate::{SimError, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` holds all simulation state and drives the four-phase tick loop:
///
/// 1. **Sense**: drain externally produced sensor events, then let the
///    [`ProximityDetector`] diff every sensor against current positions.
/// 2. **Arbitrate** (optionally parallel with the `parallel` feature):
///    every agent's [`SteeringController`] computes a [`StepReport`] against
///    one read-only [`WorldView`].  No state outside the controllers changes.
/// 3. **Apply** (sequential, ascending `AgentId` for determinism): store each
///    agent's re-estimated heading and push its total force into the
///    integrator.
/// 4. **Integrate**: advance all bodies by `dt`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (timestep, total ticks, seed, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to seconds.
    pub clock: SimClock,

    /// Kinematic state (SoA arrays).  Read by behaviours through
    /// `WorldView`, written only in the apply and integrate phases.
    pub agents: AgentStore,

    /// Every body sensors can detect: one per agent plus obstacles.
    pub bodies: BodyTable,

    /// Sensor membership sets, updated in the sense phase.
    pub sensors: SensorSet,

    /// One controller per agent, indexed by `AgentId`.
    pub controllers: Vec<SteeringController>,

    pub(crate) inbox:      SensorInbox,
    pub(crate) detector:   Option<ProximityDetector>,
    pub(crate) integrator: Box<dyn Integrator>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let started = Instant::now();
        let first = self.clock.current_tick;
        info!(
            agents = self.agents.count,
            from = %first,
            to = %self.config.end_tick(),
            dt = self.clock.dt,
            "simulation started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.tick(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            ticks = self.clock.current_tick - first,
            sim_secs = self.clock.time_secs(),
            wall_ms = started.elapsed().as_millis() as u64,
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// A sender for an external collision system.  Events pushed through it
    /// are applied at the start of the next tick.
    pub fn sensor_sender(&self) -> SensorEventSender {
        self.inbox.sender()
    }

    pub fn controller(&self, agent: AgentId) -> SimResult<&SteeringController> {
        self.controllers.get(agent.index()).ok_or(SimError::UnknownAgent(agent))
    }

    pub fn controller_mut(&mut self, agent: AgentId) -> SimResult<&mut SteeringController> {
        self.controllers.get_mut(agent.index()).ok_or(SimError::UnknownAgent(agent))
    }

    /// Read-only view of the world as behaviours see it.
    pub fn world(&self) -> WorldView<'_> {
        WorldView::new(&self.agents, &self.bodies, &self.sensors)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let steered = self.process_tick(now, observer)?;
        observer.on_tick_end(now, steered);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.agents);
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        // ── Phase 1: sense ────────────────────────────────────────────────
        //
        // External events first, so the detector's diff is taken against
        // the membership they produced.
        let external = self.inbox.drain_into(&mut self.sensors)?;
        let detected = match self.detector.as_mut() {
            Some(detector) => {
                let events = detector.detect(&self.agents, &self.bodies, &self.sensors)?;
                self.sensors.apply_all(events)?
            }
            None => 0,
        };
        trace!(tick = %now, external, detected, "sensors updated");

        // ── Phase 2: arbitrate (produce) ──────────────────────────────────
        let reports = self.arbitrate()?;

        // ── Phase 3: apply (consume) ──────────────────────────────────────
        //
        // Reports arrive in ascending AgentId order regardless of how the
        // arbitration phase was scheduled.
        for report in &reports {
            self.agents.forward[report.agent.index()] = report.forward;
            self.integrator.apply_force(report.agent, report.total_force);
            observer.on_agent_steered(now, report);
        }

        // ── Phase 4: integrate ────────────────────────────────────────────
        self.integrator.integrate(&mut self.agents, self.clock.dt)?;

        Ok(reports.len())
    }

    /// Compute a [`StepReport`] for every agent.
    ///
    /// With the `parallel` Cargo feature, controllers run on Rayon's thread
    /// pool.  Each controller only mutates its own behaviours, and the world
    /// view is shared read-only, so the result is identical either way.
    fn arbitrate(&mut self) -> SimResult<Vec<StepReport>> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let world       = WorldView::new(&self.agents, &self.bodies, &self.sensors);
        let dt          = self.clock.dt;
        let time        = self.clock.time_secs();
        let controllers = &mut self.controllers;

        #[cfg(not(feature = "parallel"))]
        let reports = controllers
            .iter_mut()
            .enumerate()
            .map(|(i, controller)| controller.compute(AgentId(i as u32), world, dt, time))
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(feature = "parallel")]
        let reports = {
            use rayon::prelude::*;

            controllers
                .par_iter_mut()
                .enumerate()
                .map(|(i, controller)| controller.compute(AgentId(i as u32), world, dt, time))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(reports)
    }
}
