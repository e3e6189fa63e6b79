//! Controller tuning.

use sb_core::{SbError, SbResult};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Gain of the corrective force applied when speed exceeds `max_speed`,
    /// in force per unit of overshoot.
    pub speed_control_rate: f32,

    /// Reject a re-estimated heading that points backwards relative to the
    /// previous one.  Off by default: the heading always follows velocity
    /// once speed exceeds `forward_epsilon`.
    pub forward_hysteresis: bool,

    /// Speed at or below which the previous heading is kept.
    pub forward_epsilon: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed_control_rate: 1.0,
            forward_hysteresis: false,
            forward_epsilon:    1e-3,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> SbResult<()> {
        if !(self.speed_control_rate.is_finite() && self.speed_control_rate >= 0.0) {
            return Err(SbError::Config(format!(
                "speed_control_rate must be finite and >= 0, got {}",
                self.speed_control_rate
            )));
        }
        if !(self.forward_epsilon.is_finite() && self.forward_epsilon >= 0.0) {
            return Err(SbError::Config(format!(
                "forward_epsilon must be finite and >= 0, got {}",
                self.forward_epsilon
            )));
        }
        Ok(())
    }
}
