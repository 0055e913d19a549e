//! Dwell recognizer timing properties.

use crate::helpers::{TRANSITION_TARGET, payload_of};
use collage::dnd::{DragCoordinator, PayloadKind};
use collage::dwell::{DwellEvent, DwellRecognizer, DwellState};
use collage::geometry::Point;
use std::time::{Duration, Instant};

fn inside() -> Point {
    TRANSITION_TARGET.center()
}

fn outside() -> Point {
    Point::new(10.0, 900.0)
}

fn cutout_drag() -> DragCoordinator {
    let mut coordinator = DragCoordinator::new();
    coordinator.start_drag(payload_of(PayloadKind::Cutout), inside());
    coordinator
}

#[test]
fn test_exit_before_hold_never_fires() {
    let hold = Duration::from_millis(500);
    for exit_ms in (0..500).step_by(10) {
        let t0 = Instant::now();
        let mut dwell = DwellRecognizer::new(hold);
        let mut drag = cutout_drag();

        dwell.observe(t0, drag.session(), Some(TRANSITION_TARGET));
        for ms in (0..exit_ms).step_by(50) {
            let event = dwell.observe(t0 + Duration::from_millis(ms), drag.session(), Some(TRANSITION_TARGET));
            assert!(!matches!(event, Some(DwellEvent::Fired { .. })), "fired at {ms}ms");
        }
        drag.update_position(outside());
        let event = dwell.observe(t0 + Duration::from_millis(exit_ms), drag.session(), Some(TRANSITION_TARGET));
        assert_eq!(event, Some(DwellEvent::Left), "exit at {exit_ms}ms");

        // No partial credit after leaving
        for ms in (exit_ms..2000).step_by(50) {
            let event = dwell.observe(t0 + Duration::from_millis(ms), drag.session(), Some(TRANSITION_TARGET));
            assert_eq!(event, None);
        }
    }
}

#[test]
fn test_continuous_hold_fires_once() {
    let t0 = Instant::now();
    let mut dwell = DwellRecognizer::new(Duration::from_millis(500));
    let mut drag = cutout_drag();
    dwell.observe(t0, drag.session(), Some(TRANSITION_TARGET));

    let mut fired = Vec::new();
    for ms in (10..3000).step_by(10) {
        // Small jitter inside the target keeps position updates coming
        let jitter = (ms % 3) as f32;
        drag.update_position(inside().offset(jitter, -jitter));
        if let Some(DwellEvent::Fired { .. }) =
            dwell.observe(t0 + Duration::from_millis(ms), drag.session(), Some(TRANSITION_TARGET))
        {
            fired.push(ms);
        }
    }
    assert_eq!(fired, vec![500]);
    assert_eq!(dwell.state(), DwellState::Fired);
}

#[test]
fn test_drag_end_resets() {
    let t0 = Instant::now();
    let mut dwell = DwellRecognizer::default();
    let mut drag = cutout_drag();
    dwell.observe(t0, drag.session(), Some(TRANSITION_TARGET));
    assert!(dwell.is_holding());

    drag.end_drag();
    assert_eq!(dwell.observe(t0 + Duration::from_secs(1), drag.session(), Some(TRANSITION_TARGET)), None);
    assert_eq!(dwell.state(), DwellState::Idle);
}

#[test]
fn test_only_cutout_drags_are_watched() {
    for kind in [PayloadKind::Collection, PayloadKind::Page, PayloadKind::Magazine] {
        let mut coordinator = DragCoordinator::new();
        coordinator.start_drag(payload_of(kind), inside());
        let mut dwell = DwellRecognizer::default();
        let t0 = Instant::now();
        assert_eq!(dwell.observe(t0, coordinator.session(), Some(TRANSITION_TARGET)), None);
        assert_eq!(
            dwell.observe(t0 + Duration::from_secs(1), coordinator.session(), Some(TRANSITION_TARGET)),
            None
        );
    }
}
