//! Waypoint paths and the behaviour that follows them.

use sb_core::Vec2;

use crate::steer;
use crate::{BehaviorState, LocalForce, SteeringBehavior, SteeringContext};

/// Ordered waypoints.  A looped path wraps from the last point back to the
/// first.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub points: Vec<Vec2>,
    pub looped: bool,
}

impl Path {
    pub fn new(points: Vec<Vec2>, looped: bool) -> Self {
        Self { points, looped }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Visit a [`Path`]'s waypoints in order.
///
/// The cursor moves on once the agent is within `point_radius` of the
/// current waypoint.  On an open path it stops at the last point, which is
/// the only one approached with arrival braking.
#[derive(Clone, Debug)]
pub struct PathFollowing {
    pub path:              Path,
    pub point_radius:      f32,
    pub slow_near_last:    bool,
    /// Braking radius as a multiple of the agent's stopping distance.
    pub braking_multiplier: f32,
    pub epsilon_radius:    f32,
    cursor:                usize,
    state:                 BehaviorState,
}

impl PathFollowing {
    pub fn new(path: Path, weight: f32) -> Self {
        Self {
            path,
            point_radius:       1.0,
            slow_near_last:     true,
            braking_multiplier: 1.0,
            epsilon_radius:     0.1,
            cursor:             0,
            state:              BehaviorState::new(weight),
        }
    }

    /// Index of the waypoint currently being approached.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    fn is_last(&self) -> bool {
        self.cursor + 1 == self.path.len()
    }
}

impl SteeringBehavior for PathFollowing {
    fn name(&self) -> &'static str {
        "path_following"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let n = self.path.len();
        if n == 0 {
            return None;
        }
        self.cursor = self.cursor.min(n - 1);

        let can_advance = self.path.looped || !self.is_last();
        if can_advance && self.path.points[self.cursor].distance(ctx.position()) < self.point_radius {
            self.cursor = (self.cursor + 1) % n;
        }

        let (braking, epsilon) = if self.slow_near_last && !self.path.looped && self.is_last() {
            let stopping = ctx.limits.max_stopping_distance(ctx.kinematics.mass);
            (stopping * self.braking_multiplier, self.epsilon_radius)
        } else {
            (0.0, 0.0)
        };

        let force = steer::seek(ctx, self.path.points[self.cursor], braking, epsilon)?;
        self.state.activation = 1.0;
        Some(force)
    }
}
