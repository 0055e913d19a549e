//! Press-and-move discrimination.
//!
//! A press only arms a drag. The drag session is started once the pointer
//! has moved strictly further than the threshold from the press point, so a
//! plain click never produces visible drag state.
//!
//! ```text
//! Idle -> Armed      (press on a draggable)
//! Armed -> Dragging  (displacement > threshold, session started)
//! Armed -> Idle      (release before threshold: a click)
//! Any -> Idle        (release)
//! ```

use super::coordinator::DragCoordinator;
use super::payload::DragPayload;
use crate::geometry::Point;
use tracing::trace;

/// State of a press-and-move gesture.
#[derive(Debug, Clone, Default)]
pub enum DragGesture {
    #[default]
    Idle,

    /// Pressed on a draggable, threshold not crossed yet
    Armed {
        origin: Point,
        payload: DragPayload,
    },

    /// Threshold crossed, session owned by the coordinator
    Dragging,
}

/// Result of feeding a pointer move into the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStep {
    /// No gesture in progress
    Ignored,
    /// Still below the threshold
    Pending,
    /// Threshold crossed on this move, drag session started
    Started,
    /// Threshold crossed, but another drag was already active
    Rejected,
    /// Ongoing drag, live position updated
    Moved,
}

impl DragGesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging)
    }

    /// Arm a drag for `payload` pressed at `origin`
    pub fn arm(&mut self, payload: DragPayload, origin: Point) {
        *self = Self::Armed { origin, payload };
    }

    /// Feed a pointer move.
    pub fn pointer_moved(
        &mut self,
        position: Point,
        threshold: f32,
        coordinator: &mut DragCoordinator,
    ) -> GestureStep {
        if let Self::Armed { origin, .. } = self {
            if origin.distance(position) <= threshold {
                return GestureStep::Pending;
            }
        }
        match std::mem::take(self) {
            Self::Idle => GestureStep::Ignored,
            Self::Armed { payload, .. } => {
                if coordinator.start_drag(payload, position) {
                    *self = Self::Dragging;
                    GestureStep::Started
                } else {
                    GestureStep::Rejected
                }
            }
            Self::Dragging => {
                *self = Self::Dragging;
                coordinator.update_position(position);
                GestureStep::Moved
            }
        }
    }

    /// Reset on release. Returns `true` when the release ended a real drag
    /// rather than a click.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if self.is_armed() {
            trace!("released below drag threshold, treating as click");
        }
        *self = Self::Idle;
        was_dragging
    }
}
