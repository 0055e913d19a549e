//! Dwell ("hold to commit") gesture recognizer.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Holding        (cutout drag enters the target)
//! Holding -> Idle        (leaves before the hold elapses: fly-by, nothing happens)
//! Holding -> Fired       (still inside once the hold has elapsed)
//! Fired -> Idle          (leaves the target, or the drag ends)
//! Any -> Idle            (reset, e.g. after a refused commit)
//! ```
//!
//! Time is passed in by the caller, so the recognizer is driven both by
//! pointer moves and by the host's poll tick. Either path runs the same
//! check against the session's latest live position.

use crate::constants::{DWELL_AFFORDANCE_SCALE, DWELL_HOLD_MS, DWELL_POLL_MS};
use crate::dnd::{DragSession, PayloadKind};
use crate::geometry::{Point, Rect};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Where the recognizer is in the hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DwellState {
    #[default]
    Idle,

    /// Inside the target, waiting for the hold to elapse
    Holding { entered_at: Instant },

    /// Fired for the current stay; will not fire again until it leaves
    Fired,
}

/// Something the host should react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DwellEvent {
    Entered,
    Left,
    /// The hold elapsed with the pointer at `position`
    Fired { position: Point },
}

/// Watches a cutout drag against one transition target.
#[derive(Debug, Clone)]
pub struct DwellRecognizer {
    hold: Duration,
    poll_interval: Duration,
    affordance_scale: f32,
    state: DwellState,
}

impl Default for DwellRecognizer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DWELL_HOLD_MS))
    }
}

impl DwellRecognizer {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            poll_interval: Duration::from_millis(DWELL_POLL_MS),
            affordance_scale: DWELL_AFFORDANCE_SCALE,
            state: DwellState::Idle,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_affordance_scale(mut self, scale: f32) -> Self {
        self.affordance_scale = scale;
        self
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    /// How often the host should call `observe` while `is_watching`
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn state(&self) -> DwellState {
        self.state
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, DwellState::Holding { .. })
    }

    /// When the current hold will elapse, if one is running
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DwellState::Holding { entered_at } => Some(entered_at + self.hold),
            _ => None,
        }
    }

    /// Whether `session` is a drag this recognizer cares about
    pub fn is_watching(session: &DragSession) -> bool {
        session.payload().is_some_and(|p| p.kind() == PayloadKind::Cutout)
    }

    /// Scale the target should be drawn at
    pub fn affordance_scale(&self) -> f32 {
        if self.is_holding() {
            self.affordance_scale
        } else {
            1.0
        }
    }

    /// Evaluate the session's live position against the target.
    ///
    /// `target` is the target's bounds measured now; `None` means it is not
    /// on screen. Non-cutout drags and idle sessions reset the recognizer
    /// and produce nothing.
    pub fn observe(&mut self, now: Instant, session: &DragSession, target: Option<Rect>) -> Option<DwellEvent> {
        if !Self::is_watching(session) {
            self.state = DwellState::Idle;
            return None;
        }
        let position = session.live_position()?;
        let inside = target.is_some_and(|bounds| bounds.contains(position));

        match self.state {
            DwellState::Idle if inside => {
                debug!(x = position.x, y = position.y, "dwell target entered");
                self.state = DwellState::Holding { entered_at: now };
                Some(DwellEvent::Entered)
            }
            DwellState::Idle => None,
            DwellState::Holding { .. } | DwellState::Fired if !inside => {
                if self.is_holding() {
                    debug!("dwell target left before hold elapsed");
                }
                self.state = DwellState::Idle;
                Some(DwellEvent::Left)
            }
            DwellState::Holding { entered_at } => {
                if now.saturating_duration_since(entered_at) < self.hold {
                    return None;
                }
                info!(x = position.x, y = position.y, "dwell hold elapsed");
                self.state = DwellState::Fired;
                Some(DwellEvent::Fired { position })
            }
            DwellState::Fired => None,
        }
    }

    /// Forget any hold in progress
    pub fn reset(&mut self) {
        self.state = DwellState::Idle;
    }
}
