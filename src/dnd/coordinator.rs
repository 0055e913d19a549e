//! Drag session and its coordinator.

use super::payload::DragPayload;
use super::rules::{DropRule, TargetKind};
use crate::geometry::Point;
use tracing::{debug, trace};

/// The single in-flight drag.
///
/// `payload` is present exactly when the session is active; there is no
/// separate flag that could disagree with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSession {
    payload: Option<DragPayload>,
    live_position: Option<Point>,
}

impl DragSession {
    pub fn is_active(&self) -> bool {
        self.payload.is_some()
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.payload.as_ref()
    }

    pub fn live_position(&self) -> Option<Point> {
        self.live_position
    }
}

/// Owner and only writer of the drag session.
#[derive(Debug, Default)]
pub struct DragCoordinator {
    session: DragSession,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    /// Begin a drag. Returns `false` without touching the existing session
    /// when a drag is already active.
    pub fn start_drag(&mut self, payload: DragPayload, position: Point) -> bool {
        if self.session.is_active() {
            debug!(
                rejected = ?payload.kind(),
                "drag already active, rejecting second drag"
            );
            return false;
        }
        debug!(kind = ?payload.kind(), id = %payload.id(), "drag started");
        self.session = DragSession {
            payload: Some(payload),
            live_position: Some(position),
        };
        true
    }

    /// Move the live position of the active drag; no-op when idle
    pub fn update_position(&mut self, position: Point) {
        if !self.session.is_active() {
            return;
        }
        trace!(x = position.x, y = position.y, "drag moved");
        self.session.live_position = Some(position);
    }

    /// Clear the session unconditionally, returning the payload if any
    pub fn end_drag(&mut self) -> Option<DragPayload> {
        let payload = std::mem::take(&mut self.session).payload;
        if let Some(ref p) = payload {
            debug!(kind = ?p.kind(), "drag ended");
        }
        payload
    }

    /// Whether the active payload may be dropped on `target`
    pub fn is_valid_target(&self, target: TargetKind) -> bool {
        self.session
            .payload
            .as_ref()
            .is_some_and(|p| DropRule::accepts(target, p.kind()))
    }
}
