//! Noise-driven wandering.
//!
//! The agent seeks a point on a circle projected `circle_distance` ahead of
//! it.  The point's angle on the circle is persistent state advanced each
//! tick by a noise sample in `[-1, 1]`.  In [`WanderMode::Integrated`] the
//! sample is the angle's rate of change, which gives smooth, correlated
//! drift; in [`WanderMode::Absolute`] the sample is the offset from the
//! current heading.

use noise::{NoiseFn, Perlin};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sb_core::math;

use crate::steer;
use crate::{BehaviorError, BehaviorResult, BehaviorState, LocalForce, SteeringBehavior, SteeringContext};

/// Where wander samples come from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoiseSource {
    /// 2-D Perlin noise sampled along time.
    #[default]
    Coherent,
    /// `sin(seed + t · frequency)`, with the seed taken modulo 2π.
    Periodic,
    /// Independent uniform samples each tick.
    Uniform,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WanderMode {
    Absolute,
    #[default]
    Integrated,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WanderConfig {
    pub source:          NoiseSource,
    pub mode:            WanderMode,
    /// Degrees per unit of noise (per second when integrated).
    pub angle_range:     f32,
    /// Time scale of the noise.
    pub frequency:       f32,
    pub circle_distance: f32,
    pub circle_radius:   f32,
    pub seed:            u32,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            source:          NoiseSource::Coherent,
            mode:            WanderMode::Integrated,
            angle_range:     180.0,
            frequency:       1.0,
            circle_distance: 5.0,
            circle_radius:   4.0,
            seed:            0,
        }
    }
}

impl WanderConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        let fields = [
            ("angle_range", self.angle_range),
            ("frequency", self.frequency),
            ("circle_distance", self.circle_distance),
            ("circle_radius", self.circle_radius),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(BehaviorError::Config(format!(
                    "wander `{name}` must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Wander {
    pub config: WanderConfig,
    /// World bearing of the target on the wander circle.  Initialised from
    /// the agent's heading on first evaluation.
    angle:      Option<f32>,
    perlin:     Perlin,
    rng:        SmallRng,
    state:      BehaviorState,
}

impl Wander {
    pub fn new(config: WanderConfig, weight: f32) -> BehaviorResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            angle:  None,
            perlin: Perlin::new(config.seed),
            rng:    SmallRng::seed_from_u64(config.seed as u64),
            state:  BehaviorState::new(weight),
        })
    }

    /// Current wander angle, if evaluated at least once.
    pub fn angle(&self) -> Option<f32> {
        self.angle
    }

    /// Noise sample in `[-1, 1]` at simulated time `t`.
    pub fn sample(&mut self, t: f32) -> f32 {
        let phase = t * self.config.frequency;
        let raw = match self.config.source {
            NoiseSource::Coherent => {
                self.perlin.get([0.5, phase as f64 + 0.5]) as f32
            }
            NoiseSource::Periodic => {
                // Reduce the seed to a phase in f64; large seeds swamp `phase` in f32.
                let offset = (self.config.seed as f64).rem_euclid(std::f64::consts::TAU);
                (offset + phase as f64).sin() as f32
            }
            NoiseSource::Uniform => self.rng.gen_range(-1.0..=1.0),
        };
        raw.clamp(-1.0, 1.0)
    }

    fn next_angle(&mut self, ctx: &SteeringContext<'_>) -> f32 {
        let heading = ctx.kinematics.bearing_deg();
        let noise = self.sample(ctx.time);
        let range = self.config.angle_range;
        let next = match self.config.mode {
            WanderMode::Integrated => self.angle.unwrap_or(heading) + noise * range * ctx.dt,
            WanderMode::Absolute => heading + noise * range,
        };
        // Keep the stored bearing bounded over long runs.
        let wrapped = math::delta_angle_deg(0.0, next);
        self.angle = Some(wrapped);
        wrapped
    }
}

impl SteeringBehavior for Wander {
    fn name(&self) -> &'static str {
        "wander"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        let angle = self.next_angle(ctx);
        let target = ctx.position()
            + ctx.forward() * self.config.circle_distance
            + math::from_bearing_deg(angle) * self.config.circle_radius;
        let force = steer::seek(ctx, target, 0.0, 0.0);
        self.state.activation = if force.is_some() { 1.0 } else { 0.0 };
        force
    }
}
