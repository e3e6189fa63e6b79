//! JSON-loadable scenario description.

use std::path::{Path as FsPath, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use sb_behavior::{AgentAvoidanceConfig, ObstacleAvoidanceConfig, Path, WanderConfig};
use sb_controller::ControllerConfig;
use sb_core::{KinematicLimits, SimConfig, Vec2};

/// Everything the demo needs to set up a run.  Every field has a default, so
/// a scenario file only lists what it changes:
///
/// ```json
/// { "agent_count": 40, "sim": { "total_ticks": 3000 } }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub sim:                SimConfig,
    pub limits:             KinematicLimits,
    pub controller:         ControllerConfig,
    /// Followers; the leader is spawned in addition.
    pub agent_count:        usize,
    pub spawn_radius:       f32,
    /// Semi-axes of the obstacle ring fencing the arena.
    pub arena_radii:        Vec2,
    pub obstacle_radius:    f32,
    pub sensor_radius:      f32,
    /// Followers start slowing this far from the leader.
    pub follow_braking:     f32,
    pub leader_path:        Path,
    pub wander:             WanderConfig,
    pub obstacle_avoidance: ObstacleAvoidanceConfig,
    pub agent_avoidance:    AgentAvoidanceConfig,
    pub output_dir:         PathBuf,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                total_ticks:           1_500,
                seed:                  42,
                output_interval_ticks: 5,
                ..SimConfig::default()
            },
            limits:             KinematicLimits { max_speed: 6.0, ..KinematicLimits::default() },
            controller:         ControllerConfig::default(),
            agent_count:        24,
            spawn_radius:       6.0,
            arena_radii:        Vec2::new(40.0, 30.0),
            obstacle_radius:    1.5,
            sensor_radius:      6.0,
            follow_braking:     8.0,
            leader_path: Path::new(
                vec![
                    Vec2::new(-20.0, -15.0),
                    Vec2::new(20.0, -15.0),
                    Vec2::new(20.0, 15.0),
                    Vec2::new(-20.0, 15.0),
                ],
                true,
            ),
            wander:             WanderConfig { angle_range: 90.0, ..WanderConfig::default() },
            obstacle_avoidance: ObstacleAvoidanceConfig::default(),
            agent_avoidance:    AgentAvoidanceConfig::default(),
            output_dir:         PathBuf::from("output/swarm"),
        }
    }
}

impl Scenario {
    pub fn load(path: &FsPath) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }
}
