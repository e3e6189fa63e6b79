//! Force expressed in the agent's local frame.

use std::ops::{Add, AddAssign, Div, Mul};

use sb_core::Vec2;

/// A force in the agent's own frame.
///
/// `normal` is lateral (positive pushes towards the agent's right), `tangent`
/// is along `forward` (positive accelerates, negative brakes).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalForce {
    pub normal:  f32,
    pub tangent: f32,
}

impl LocalForce {
    pub const ZERO: LocalForce = LocalForce { normal: 0.0, tangent: 0.0 };

    #[inline]
    pub const fn new(normal: f32, tangent: f32) -> Self {
        Self { normal, tangent }
    }

    /// Pure lateral force.
    #[inline]
    pub const fn lateral(normal: f32) -> Self {
        Self { normal, tangent: 0.0 }
    }

    /// `tangent · forward + normal · right`.
    #[inline]
    pub fn to_world(self, forward: Vec2, right: Vec2) -> Vec2 {
        forward * self.tangent + right * self.normal
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.normal.is_finite() && self.tangent.is_finite()
    }
}

impl Add for LocalForce {
    type Output = LocalForce;
    fn add(self, rhs: LocalForce) -> LocalForce {
        LocalForce::new(self.normal + rhs.normal, self.tangent + rhs.tangent)
    }
}

impl AddAssign for LocalForce {
    fn add_assign(&mut self, rhs: LocalForce) {
        self.normal += rhs.normal;
        self.tangent += rhs.tangent;
    }
}

impl Mul<f32> for LocalForce {
    type Output = LocalForce;
    fn mul(self, k: f32) -> LocalForce {
        LocalForce::new(self.normal * k, self.tangent * k)
    }
}

impl Div<f32> for LocalForce {
    type Output = LocalForce;
    fn div(self, k: f32) -> LocalForce {
        LocalForce::new(self.normal / k, self.tangent / k)
    }
}
