//! Overlap sensors and their event plumbing.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use sb_core::{AgentId, BodyId, SensorId};
use tracing::trace;

use crate::{LayerMask, SensorError, SensorResult};

// ── Shape & events ────────────────────────────────────────────────────────────

/// Detection shape, centred on the owning agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorShape {
    Circle { radius: f32 },
}

impl SensorShape {
    /// Validated circle constructor.
    pub fn circle(radius: f32) -> SensorResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(SensorError::InvalidShape(format!("circle radius {radius}")));
        }
        Ok(SensorShape::Circle { radius })
    }

    /// Radius of the smallest circle enclosing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            SensorShape::Circle { radius } => radius,
        }
    }
}

/// Notification from the collision system that a body started or stopped
/// overlapping a sensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SensorEvent {
    Enter(BodyId),
    Exit(BodyId),
}

type Callback = Box<dyn FnMut(BodyId) + Send + Sync>;

// ── Sensor ────────────────────────────────────────────────────────────────────

/// One detection volume and its exact live membership set.
///
/// A body is a member iff it has entered and not yet exited.  Duplicate
/// enters and unmatched exits are ignored, and the enter/exit callbacks fire
/// only when membership actually changes.
pub struct Sensor {
    pub owner:  AgentId,
    pub shape:  SensorShape,
    pub filter: LayerMask,
    touching:   BTreeSet<BodyId>,
    on_enter:   Vec<Callback>,
    on_exit:    Vec<Callback>,
}

impl Sensor {
    pub fn new(owner: AgentId, shape: SensorShape, filter: LayerMask) -> Self {
        Self {
            owner,
            shape,
            filter,
            touching: BTreeSet::new(),
            on_enter: Vec::new(),
            on_exit:  Vec::new(),
        }
    }

    /// Current membership, in ascending `BodyId` order.
    pub fn touching_objects(&self) -> impl ExactSizeIterator<Item = BodyId> + '_ {
        self.touching.iter().copied()
    }

    #[inline]
    pub fn collides(&self, body: BodyId) -> bool {
        self.touching.contains(&body)
    }

    #[inline]
    pub fn any_touching(&self) -> bool {
        !self.touching.is_empty()
    }

    pub fn len(&self) -> usize {
        self.touching.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touching.is_empty()
    }

    pub fn on_enter(&mut self, f: impl FnMut(BodyId) + Send + Sync + 'static) {
        self.on_enter.push(Box::new(f));
    }

    pub fn on_exit(&mut self, f: impl FnMut(BodyId) + Send + Sync + 'static) {
        self.on_exit.push(Box::new(f));
    }

    /// Apply one event.  Returns `true` if membership changed.
    pub fn handle(&mut self, event: SensorEvent) -> bool {
        match event {
            SensorEvent::Enter(body) => {
                if !self.touching.insert(body) {
                    return false;
                }
                for cb in &mut self.on_enter {
                    cb(body);
                }
            }
            SensorEvent::Exit(body) => {
                if !self.touching.remove(&body) {
                    return false;
                }
                for cb in &mut self.on_exit {
                    cb(body);
                }
            }
        }
        true
    }
}

impl fmt::Debug for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sensor")
            .field("owner", &self.owner)
            .field("shape", &self.shape)
            .field("filter", &self.filter)
            .field("touching", &self.touching)
            .field("on_enter", &self.on_enter.len())
            .field("on_exit", &self.on_exit.len())
            .finish()
    }
}

// ── SensorSet ─────────────────────────────────────────────────────────────────

/// Owner of every sensor in the world; `SensorId` indexes into it.
#[derive(Debug, Default)]
pub struct SensorSet {
    sensors: Vec<Sensor>,
}

impl SensorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sensor attached to `owner` and return its handle.
    pub fn add_sensor(&mut self, owner: AgentId, shape: SensorShape, filter: LayerMask) -> SensorId {
        let id = SensorId(self.sensors.len() as u32);
        self.sensors.push(Sensor::new(owner, shape, filter));
        id
    }

    pub fn get(&self, id: SensorId) -> Option<&Sensor> {
        self.sensors.get(id.index())
    }

    pub fn get_mut(&mut self, id: SensorId) -> Option<&mut Sensor> {
        self.sensors.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// `(SensorId, &Sensor)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (SensorId, &Sensor)> {
        self.sensors
            .iter()
            .enumerate()
            .map(|(i, s)| (SensorId(i as u32), s))
    }

    pub fn apply(&mut self, id: SensorId, event: SensorEvent) -> SensorResult<bool> {
        let sensor = self.get_mut(id).ok_or(SensorError::UnknownSensor(id))?;
        let changed = sensor.handle(event);
        if changed {
            trace!(sensor = %id, ?event, "sensor membership changed");
        }
        Ok(changed)
    }

    /// Apply a batch in order.  Returns the number of events that changed
    /// membership.
    pub fn apply_all<I>(&mut self, events: I) -> SensorResult<usize>
    where
        I: IntoIterator<Item = (SensorId, SensorEvent)>,
    {
        let mut changed = 0;
        for (id, ev) in events {
            if self.apply(id, ev)? {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

// ── SensorInbox ───────────────────────────────────────────────────────────────

/// Cloneable producer half of a [`SensorInbox`].
pub type SensorEventSender = Sender<(SensorId, SensorEvent)>;

/// Handoff queue for collision systems that run off the simulation thread.
///
/// Producers push through any number of [`SensorEventSender`]s; the
/// simulation drains the queue into its [`SensorSet`] at the start of a
/// tick, so membership never changes while behaviours are evaluated.
#[derive(Debug)]
pub struct SensorInbox {
    tx: SensorEventSender,
    rx: Receiver<(SensorId, SensorEvent)>,
}

impl Default for SensorInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorInbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> SensorEventSender {
        self.tx.clone()
    }

    /// Apply every queued event.  Events for unknown sensors abort the drain
    /// with an error; the remaining events stay queued.
    pub fn drain_into(&self, sensors: &mut SensorSet) -> SensorResult<usize> {
        let mut changed = 0;
        while let Ok((id, ev)) = self.rx.try_recv() {
            if sensors.apply(id, ev)? {
                changed += 1;
            }
        }
        Ok(changed)
    }
}
