//! Reference collision/trigger system: circle overlap via an R-tree.
//!
//! Each tick the detector indexes every body centre in an `rstar` R-tree,
//! queries it once per sensor with the sensor radius plus the largest body
//! radius, applies the exact circle-overlap test and the layer filter, and
//! diffs the result against the sensor's current membership.  The diff is
//! returned as plain `(SensorId, SensorEvent)` pairs so it can be applied
//! directly or pushed through a [`SensorInbox`](crate::SensorInbox).

use std::collections::BTreeSet;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use sb_agent::AgentStore;
use sb_core::{BodyId, SensorId};

use crate::{BodyTable, SensorError, SensorEvent, SensorResult, SensorSet};

// ── R-tree body entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct BodyEntry {
    point:  [f32; 2],
    radius: f32,
    id:     BodyId,
}

impl RTreeObject for BodyEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for BodyEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ProximityDetector ─────────────────────────────────────────────────────────

/// Stateless apart from the last R-tree it built.
#[derive(Default)]
pub struct ProximityDetector {
    index:      RTree<BodyEntry>,
    max_radius: f32,
}

impl ProximityDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-index every body at its current position.
    pub fn rebuild(&mut self, agents: &AgentStore, bodies: &BodyTable) -> SensorResult<()> {
        let mut entries = Vec::with_capacity(bodies.len());
        let mut max_radius = 0.0f32;
        for body in bodies.body_ids() {
            let (center, radius) = bodies
                .circle(body, agents)
                .ok_or(SensorError::UnknownBody(body))?;
            max_radius = max_radius.max(radius);
            entries.push(BodyEntry { point: center.to_array(), radius, id: body });
        }
        self.index = RTree::bulk_load(entries);
        self.max_radius = max_radius;
        Ok(())
    }

    /// Bodies currently overlapping `sensor`, ascending.
    pub fn overlapping(
        &self,
        sensor: SensorId,
        agents: &AgentStore,
        bodies: &BodyTable,
        sensors: &SensorSet,
    ) -> SensorResult<BTreeSet<BodyId>> {
        let s = sensors.get(sensor).ok_or(SensorError::UnknownSensor(sensor))?;
        let mut out = BTreeSet::new();
        if !agents.contains(s.owner) {
            return Ok(out);
        }
        let center = agents.position[s.owner.index()];
        let own_body = bodies.body_of_agent(s.owner);
        let reach = s.shape.bounding_radius() + self.max_radius;

        for entry in self.index.locate_within_distance(center.to_array(), reach * reach) {
            if Some(entry.id) == own_body {
                continue;
            }
            let layer_ok = bodies
                .layer(entry.id)
                .is_some_and(|layer| layer.intersects(s.filter));
            if !layer_ok {
                continue;
            }
            let limit = s.shape.bounding_radius() + entry.radius;
            if entry.distance_2(&center.to_array()) < limit * limit {
                out.insert(entry.id);
            }
        }
        Ok(out)
    }

    /// Rebuild the index and return the membership diff for every sensor.
    ///
    /// Events are ordered by sensor id; within a sensor exits come before
    /// enters, each in ascending `BodyId` order.
    pub fn detect(
        &mut self,
        agents: &AgentStore,
        bodies: &BodyTable,
        sensors: &SensorSet,
    ) -> SensorResult<Vec<(SensorId, SensorEvent)>> {
        self.rebuild(agents, bodies)?;
        let mut events = Vec::new();
        for (id, sensor) in sensors.iter() {
            let now = self.overlapping(id, agents, bodies, sensors)?;
            for body in sensor.touching_objects().filter(|b| !now.contains(b)) {
                events.push((id, SensorEvent::Exit(body)));
            }
            for body in now.iter().copied().filter(|b| !sensor.collides(*b)) {
                events.push((id, SensorEvent::Enter(body)));
            }
        }
        Ok(events)
    }
}
