//! swarm: a leader-following flock inside an obstacle ring.
//!
//! Agent 0 follows a looped waypoint path.  Every other agent arrives at the
//! leader while wandering, keeping apart from its neighbours and steering
//! around both agents and the ring of obstacles fencing the arena.  Steering
//! traces and snapshots are written to CSV.
//!
//! ```text
//! RUST_LOG=info cargo run -p swarm --release -- [scenario.json]
//! ```

mod scenario;

use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sb_agent::{AgentStore, AgentStoreBuilder, ScatterSpec};
use sb_behavior::{
    AgentAvoidance, Arrival, ObstacleAvoidance, PathFollowing, Separation, Target, Wander, WanderConfig,
};
use sb_controller::{StepReport, SteeringController};
use sb_core::{AgentId, AgentRng, KinematicState, Tick, Vec2};
use sb_output::{CsvWriter, OutputWriter, SimOutputObserver};
use sb_sensor::{BodyTable, LayerMask, SensorSet, SensorShape, obstacle_ring};
use sb_sim::{SimBuilder, SimObserver};

use scenario::Scenario;

const AGENT_LAYER:    LayerMask = LayerMask::layer(0);
const OBSTACLE_LAYER: LayerMask = LayerMask::layer(1);

// ── Observer wrapper tracking the closest calls ──────────────────────────────

struct SwarmObserver<W: OutputWriter> {
    inner:           SimOutputObserver<W>,
    obstacles:       Vec<(Vec2, f32)>,
    hull_radius:     f32,
    closest_agents:  f32,
    closest_wall:    f32,
    governed_ticks:  u64,
}

impl<W: OutputWriter> SwarmObserver<W> {
    fn new(inner: SimOutputObserver<W>, bodies: &BodyTable, hull_radius: f32) -> Self {
        Self {
            inner,
            obstacles: bodies.obstacles().iter().map(|o| (o.position, o.radius)).collect(),
            hull_radius,
            closest_agents: f32::INFINITY,
            closest_wall: f32::INFINITY,
            governed_ticks: 0,
        }
    }
}

impl<W: OutputWriter> SimObserver for SwarmObserver<W> {
    fn on_agent_steered(&mut self, tick: Tick, report: &StepReport) {
        if report.governor_force != Vec2::ZERO {
            self.governed_ticks += 1;
        }
        self.inner.on_agent_steered(tick, report);
    }

    fn on_tick_end(&mut self, tick: Tick, steered: usize) {
        self.inner.on_tick_end(tick, steered);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        for (i, &p) in agents.position.iter().enumerate() {
            for &q in &agents.position[i + 1..] {
                self.closest_agents = self.closest_agents.min(p.distance(q));
            }
            for &(center, radius) in &self.obstacles {
                self.closest_wall = self.closest_wall.min(p.distance(center) - radius - self.hull_radius);
            }
        }
        self.inner.on_snapshot(tick, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn controller_for(
    scenario: &Scenario,
    agent:    AgentId,
    sensor:   sb_core::SensorId,
) -> Result<SteeringController> {
    let mut c = SteeringController::new(scenario.limits, scenario.controller)?;
    c.add(ObstacleAvoidance::new(sensor, scenario.obstacle_avoidance, 4.0)?);
    c.add(AgentAvoidance::new(sensor, scenario.agent_avoidance, 2.0)?);
    c.add(Separation::new(sensor, 1.5));
    if agent == AgentId(0) {
        c.add(PathFollowing::new(scenario.leader_path.clone(), 2.0));
    } else {
        c.add(Arrival::new(Target::Agent(AgentId(0)), scenario.follow_braking, 0.5, 1.0));
        let wander = WanderConfig {
            seed: AgentRng::derive_seed(scenario.sim.seed, agent) as u32,
            ..scenario.wander
        };
        c.add(Wander::new(wander, 0.5)?);
    }
    Ok(c)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::load(std::path::Path::new(&path))?,
        None => Scenario::default(),
    };

    #[cfg(feature = "parallel")]
    if let Some(n) = scenario.sim.num_threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }

    println!("=== swarm: rust_steer ===");
    println!(
        "Followers: {}  |  Ticks: {} ({:.1} s)  |  Seed: {}",
        scenario.agent_count,
        scenario.sim.total_ticks,
        scenario.sim.total_ticks as f32 * scenario.sim.dt,
        scenario.sim.seed,
    );

    // 1. Agents: the leader on its path, followers scattered around it.
    let start = scenario.leader_path.points.first().copied().unwrap_or(Vec2::ZERO);
    let hull_radius = scenario.obstacle_avoidance.hull_radius;
    let agents = AgentStoreBuilder::new(scenario.sim.seed)
        .hull_radius(hull_radius)
        .agent(KinematicState::at_rest(start, 90.0, 1.0))
        .scatter(ScatterSpec {
            count:         scenario.agent_count,
            center:        start,
            radius:        scenario.spawn_radius,
            bearing_range: (0.0, 180.0),
            initial_speed: 1.0,
        })
        .build();

    // 2. Obstacle ring.
    let mut bodies = BodyTable::new();
    for obstacle in obstacle_ring(Vec2::ZERO, scenario.arena_radii, scenario.obstacle_radius) {
        bodies.add_obstacle(obstacle, OBSTACLE_LAYER);
    }
    println!("Obstacles: {}", bodies.obstacles().len());

    // 3. One sensor per agent, seeing agents and obstacles alike.
    let mut sensors = SensorSet::new();
    let shape = SensorShape::circle(scenario.sensor_radius)?;
    let controllers = agents
        .agent_ids()
        .map(|agent| {
            let sensor = sensors.add_sensor(agent, shape, AGENT_LAYER.union(OBSTACLE_LAYER));
            controller_for(&scenario, agent, sensor)
        })
        .collect::<Result<Vec<_>>>()?;

    // 4. Build sim.
    let mut sim = SimBuilder::new(scenario.sim.clone(), agents)
        .bodies(bodies)
        .sensors(sensors)
        .agent_layer(AGENT_LAYER)
        .controllers(controllers)
        .build()?;

    // 5. Output.
    let writer = CsvWriter::new(&scenario.output_dir)?;
    let inner = SimOutputObserver::new(writer, &scenario.sim);
    let mut obs = SwarmObserver::new(inner, &sim.bodies, hull_radius);

    // 6. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    info!(dir = %scenario.output_dir.display(), "output written");

    // 7. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  closest agent pair       : {:.3}", obs.closest_agents);
    println!("  closest hull-to-obstacle : {:.3}", obs.closest_wall);
    println!("  agent-ticks over speed   : {}", obs.governed_ticks);
    println!();

    let leader = sim.agents.position[0];
    println!("{:<8} {:>9} {:>9} {:>7} {:>10}", "Agent", "x", "y", "speed", "to leader");
    println!("{}", "-".repeat(47));
    for agent in sim.agents.agent_ids().take(10) {
        let s = sim.agents.state(agent);
        println!(
            "{:<8} {:>9.2} {:>9.2} {:>7.2} {:>10.2}",
            agent.0,
            s.position.x,
            s.position.y,
            s.speed(),
            s.position.distance(leader),
        );
    }
    if sim.agents.count > 10 {
        println!("… {} more", sim.agents.count - 10);
    }

    Ok(())
}
