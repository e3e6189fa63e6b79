//! Plain data row types written by output backends.

use sb_controller::{Contribution, StepReport};
use sb_core::{AgentId, KinematicState, Tick, math};

/// One agent's kinematic state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:    u32,
    pub tick:        u64,
    pub time_secs:   f32,
    pub x:           f32,
    pub y:           f32,
    pub vx:          f32,
    pub vy:          f32,
    pub bearing_deg: f32,
}

impl AgentSnapshotRow {
    pub fn new(agent: AgentId, tick: Tick, time_secs: f32, state: &KinematicState) -> Self {
        Self {
            agent_id:    agent.0,
            tick:        tick.0,
            time_secs,
            x:           state.position.x,
            y:           state.position.y,
            vx:          state.velocity.x,
            vy:          state.velocity.y,
            bearing_deg: math::bearing_deg(state.forward),
        }
    }
}

/// The arbitration result for one agent in one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringTraceRow {
    pub agent_id:        u32,
    pub tick:            u64,
    /// Behaviours that did not abstain.
    pub active:          u32,
    pub weight_sum:      f32,
    pub blended_normal:  f32,
    pub blended_tangent: f32,
    pub normal:          f32,
    pub tangent:         f32,
    pub fx:              f32,
    pub fy:              f32,
    pub governor_fx:     f32,
    pub governor_fy:     f32,
}

impl SteeringTraceRow {
    pub fn new(tick: Tick, report: &StepReport) -> Self {
        Self {
            agent_id:        report.agent.0,
            tick:            tick.0,
            active:          report.active().count() as u32,
            weight_sum:      report.weight_sum,
            blended_normal:  report.blended.normal,
            blended_tangent: report.blended.tangent,
            normal:          report.local.normal,
            tangent:         report.local.tangent,
            fx:              report.total_force.x,
            fy:              report.total_force.y,
            governor_fx:     report.governor_force.x,
            governor_fy:     report.governor_force.y,
        }
    }
}

/// One behaviour's output for one agent in one tick.
///
/// An abstaining behaviour is written with empty force columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionRow {
    pub agent_id:    u32,
    pub tick:        u64,
    pub behavior_id: u32,
    pub behavior:    &'static str,
    pub weight:      f32,
    pub activation:  f32,
    pub normal:      Option<f32>,
    pub tangent:     Option<f32>,
}

impl ContributionRow {
    pub fn new(agent: AgentId, tick: Tick, c: &Contribution) -> Self {
        Self {
            agent_id:    agent.0,
            tick:        tick.0,
            behavior_id: c.id.0,
            behavior:    c.name,
            weight:      c.weight,
            activation:  c.activation,
            normal:      c.force.map(|f| f.normal),
            tangent:     c.force.map(|f| f.tangent),
        }
    }
}
