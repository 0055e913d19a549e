//! Drag coordinator, drop rules and drop zones.

use crate::helpers::{ALL_PAYLOAD_KINDS, payload_of};
use collage::dnd::{
    DragCoordinator, DragGesture, DragPreview, DropRule, DropZone, DropZoneRegistry, GestureStep, TargetKind,
};
use collage::geometry::{Point, Rect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ============================================================================
// Drop rules
// ============================================================================

#[test]
fn test_valid_target_iff_rule_accepts() {
    for kind in ALL_PAYLOAD_KINDS {
        let mut coordinator = DragCoordinator::new();
        coordinator.start_drag(payload_of(kind), Point::default());
        for target in TargetKind::ALL {
            assert_eq!(
                coordinator.is_valid_target(target),
                DropRule::accepted(target).contains(&kind),
                "{kind:?} on {target:?}"
            );
        }
    }
}

#[test]
fn test_no_target_valid_without_session() {
    let coordinator = DragCoordinator::new();
    for target in TargetKind::ALL {
        assert!(!coordinator.is_valid_target(target));
    }
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_second_drag_never_replaces_session() {
    for first in ALL_PAYLOAD_KINDS {
        for second in ALL_PAYLOAD_KINDS {
            let mut coordinator = DragCoordinator::new();
            coordinator.start_drag(payload_of(first), Point::new(1.0, 2.0));
            let before = coordinator.session().clone();

            assert!(!coordinator.start_drag(payload_of(second), Point::new(9.0, 9.0)));
            assert_eq!(coordinator.session(), &before);
        }
    }
}

#[test]
fn test_payload_present_iff_active() {
    let mut coordinator = DragCoordinator::new();
    assert_eq!(coordinator.session().is_active(), coordinator.session().payload().is_some());
    coordinator.start_drag(payload_of(ALL_PAYLOAD_KINDS[0]), Point::default());
    assert_eq!(coordinator.session().is_active(), coordinator.session().payload().is_some());
    coordinator.end_drag();
    assert_eq!(coordinator.session().is_active(), coordinator.session().payload().is_some());
}

#[test]
fn test_previews_by_kind() {
    use collage::dnd::PayloadKind;
    assert!(matches!(payload_of(PayloadKind::Collection).preview(), DragPreview::Cover { .. }));
    assert!(matches!(payload_of(PayloadKind::Magazine).preview(), DragPreview::Cover { .. }));
    assert_eq!(payload_of(PayloadKind::Cutout).preview(), DragPreview::None);
    assert!(matches!(payload_of(PayloadKind::Page).preview(), DragPreview::Page { .. }));
}

// ============================================================================
// Drag start threshold
// ============================================================================

#[test]
fn test_click_never_becomes_drag() {
    let mut coordinator = DragCoordinator::new();
    let mut gesture = DragGesture::default();
    gesture.arm(payload_of(ALL_PAYLOAD_KINDS[0]), Point::new(100.0, 100.0));

    assert_eq!(
        gesture.pointer_moved(Point::new(103.0, 104.0), 5.0, &mut coordinator),
        GestureStep::Pending
    );
    assert!(!coordinator.is_dragging());
    assert!(!gesture.release());
    assert!(!coordinator.is_dragging());
}

#[test]
fn test_threshold_crossing_starts_drag() {
    let mut coordinator = DragCoordinator::new();
    let mut gesture = DragGesture::default();
    gesture.arm(payload_of(ALL_PAYLOAD_KINDS[0]), Point::new(100.0, 100.0));

    assert_eq!(
        gesture.pointer_moved(Point::new(106.0, 100.0), 5.0, &mut coordinator),
        GestureStep::Started
    );
    assert_eq!(coordinator.session().live_position(), Some(Point::new(106.0, 100.0)));
    assert_eq!(
        gesture.pointer_moved(Point::new(200.0, 100.0), 5.0, &mut coordinator),
        GestureStep::Moved
    );
    assert_eq!(coordinator.session().live_position(), Some(Point::new(200.0, 100.0)));
}

// ============================================================================
// Drop zones
// ============================================================================

#[test]
fn test_zone_measures_on_every_check() {
    let bounds = Rc::new(Cell::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)));
    let measured = Rc::clone(&bounds);
    let dropped = Rc::new(Cell::new(0));
    let counter = Rc::clone(&dropped);

    let mut zone = DropZone::new(
        TargetKind::CaptureSurface,
        move || Some(measured.get()),
        move |_| counter.set(counter.get() + 1),
    );

    let mut coordinator = DragCoordinator::new();
    coordinator.start_drag(payload_of(ALL_PAYLOAD_KINDS[0]), Point::new(150.0, 50.0));
    assert!(!zone.update_hover(&coordinator));

    // The zone grows under a stationary pointer
    bounds.set(Rect::from_xywh(0.0, 0.0, 200.0, 100.0));
    assert!(zone.update_hover(&coordinator));
    assert!(zone.is_hovered());

    assert!(zone.release(&coordinator));
    assert_eq!(dropped.get(), 1);
    assert!(!zone.is_hovered());
}

#[test]
fn test_rejected_kind_clears_hover_without_drop() {
    let dropped = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&dropped);
    let mut registry = DropZoneRegistry::new();
    let magazine = registry.register(DropZone::new(
        TargetKind::Magazine,
        || Some(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)),
        move |payload| sink.borrow_mut().push(payload.id()),
    ));

    let mut coordinator = DragCoordinator::new();
    coordinator.start_drag(payload_of(ALL_PAYLOAD_KINDS[0]), Point::new(50.0, 50.0));
    registry.update_hover(&coordinator);
    assert_eq!(registry.hovered().count(), 0);

    assert!(registry.release(&coordinator).is_empty());
    assert!(dropped.borrow().is_empty());
    assert!(!registry.get(magazine).unwrap().is_hovered());
}
