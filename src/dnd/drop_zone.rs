//! Drop zones - regions that accept payloads on release.
//!
//! Bounds are measured through a callback on every check. A zone can move or
//! resize between frames, so nothing about its geometry is cached across a
//! drag.

use super::coordinator::DragCoordinator;
use super::payload::DragPayload;
use super::rules::TargetKind;
use crate::geometry::Rect;
use std::fmt;
use tracing::{debug, trace};

type MeasureFn = Box<dyn Fn() -> Option<Rect>>;
type DropFn = Box<dyn FnMut(&DragPayload)>;

/// A region that accepts payloads of the kinds its target accepts.
pub struct DropZone {
    target: TargetKind,
    measure: MeasureFn,
    on_drop: DropFn,
    hovered: bool,
}

impl fmt::Debug for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropZone")
            .field("target", &self.target)
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}

impl DropZone {
    /// Create a zone. `measure` returns the zone's current screen bounds, or
    /// `None` while it is not laid out.
    pub fn new(
        target: TargetKind,
        measure: impl Fn() -> Option<Rect> + 'static,
        on_drop: impl FnMut(&DragPayload) + 'static,
    ) -> Self {
        Self {
            target,
            measure: Box::new(measure),
            on_drop: Box::new(on_drop),
            hovered: false,
        }
    }

    pub fn target(&self) -> TargetKind {
        self.target
    }

    /// Drop highlight is showing
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Measure the zone now
    pub fn bounds(&self) -> Option<Rect> {
        (self.measure)()
    }

    fn live_position_inside(&self, coordinator: &DragCoordinator) -> bool {
        match (coordinator.session().live_position(), self.bounds()) {
            (Some(position), Some(bounds)) => bounds.contains(position),
            _ => false,
        }
    }

    /// Recompute the hover highlight. Returns `true` when it changed.
    pub fn update_hover(&mut self, coordinator: &DragCoordinator) -> bool {
        let hovered = coordinator.is_valid_target(self.target) && self.live_position_inside(coordinator);
        let changed = hovered != self.hovered;
        if changed {
            trace!(zone = ?self.target, hovered, "drop zone hover changed");
        }
        self.hovered = hovered;
        changed
    }

    /// Handle pointer release. Invokes the drop handler when the payload is
    /// accepted and the live position is inside; the highlight is cleared in
    /// every case. Returns `true` when the payload was dropped here.
    pub fn release(&mut self, coordinator: &DragCoordinator) -> bool {
        let dropped = match coordinator.session().payload() {
            Some(payload)
                if coordinator.is_valid_target(self.target)
                    && self.live_position_inside(coordinator) =>
            {
                debug!(zone = ?self.target, kind = ?payload.kind(), "payload dropped");
                (self.on_drop)(payload);
                true
            }
            _ => false,
        };
        self.hovered = false;
        dropped
    }
}

/// Identifier of a registered drop zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ZoneId(u64);

/// All drop zones currently registered, in registration order.
#[derive(Debug, Default)]
pub struct DropZoneRegistry {
    zones: Vec<(ZoneId, DropZone)>,
    next_id: u64,
}

impl DropZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, zone: DropZone) -> ZoneId {
        let id = ZoneId(self.next_id);
        self.next_id += 1;
        self.zones.push((id, zone));
        id
    }

    pub fn unregister(&mut self, id: ZoneId) -> Option<DropZone> {
        let index = self.zones.iter().position(|(zone_id, _)| *zone_id == id)?;
        Some(self.zones.remove(index).1)
    }

    pub fn get(&self, id: ZoneId) -> Option<&DropZone> {
        self.zones.iter().find(|(zone_id, _)| *zone_id == id).map(|(_, z)| z)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Recompute every zone's hover highlight
    pub fn update_hover(&mut self, coordinator: &DragCoordinator) {
        for (_, zone) in &mut self.zones {
            zone.update_hover(coordinator);
        }
    }

    /// Offer the release to every zone; returns the zones that accepted it
    pub fn release(&mut self, coordinator: &DragCoordinator) -> Vec<ZoneId> {
        self.zones
            .iter_mut()
            .filter_map(|(id, zone)| zone.release(coordinator).then_some(*id))
            .collect()
    }

    pub fn hovered(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.zones
            .iter()
            .filter(|(_, zone)| zone.is_hovered())
            .map(|(id, _)| *id)
    }
}
