//! Pointer tracker - a plain mirror of the latest pointer sample.
//!
//! Every gesture recognizer reads the pointer through this tracker instead of
//! caching its own copy. Malformed samples (non-finite coordinates) are
//! dropped without touching the stored state.

use crate::geometry::Point;
use tracing::trace;

/// Latest pointer position and primary button state.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Option<Point>,
    button_down: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer-move sample
    pub fn moved(&mut self, position: Point) {
        if !position.is_finite() {
            trace!(?position, "ignoring malformed pointer sample");
            return;
        }
        self.position = Some(position);
    }

    /// Record a button press at `position`
    pub fn pressed(&mut self, position: Point) {
        self.moved(position);
        self.button_down = true;
    }

    /// Record a button release at `position`
    pub fn released(&mut self, position: Point) {
        self.moved(position);
        self.button_down = false;
    }

    pub fn current_position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_button_down(&self) -> bool {
        self.button_down
    }
}
