//! Unit tests for notifications module and the notices the studio raises.

use crate::helpers::{FailingRasterizer, StudioBuilder, TRANSITION_TARGET, select};
use collage::geometry::Point;
use collage::notifications::{Toast, ToastManager, ToastVariant};
use collage::studio::DwellOutcome;
use collage::tool::ToolKind;
use futures::executor::block_on;
use std::time::{Duration, Instant};

#[test]
fn test_capture_failure_notice_stays_until_dismissed() {
    let mut studio = StudioBuilder::new().build();
    let job = select(&mut studio, Point::new(10.0, 10.0), Point::new(110.0, 60.0)).unwrap();
    assert!(studio.complete_capture(block_on(job.run(&FailingRasterizer))).is_err());

    let toast = studio.toasts().latest().unwrap();
    assert_eq!(toast.variant, ToastVariant::Error);
    assert!(toast.message.starts_with("Capture failed"));
    let id = toast.id;

    studio.tick(Instant::now() + Duration::from_secs(3600));
    assert_eq!(studio.toasts().count(), 1);
    assert!(studio.toasts_mut().remove(id));
    assert_eq!(studio.toasts().count(), 0);
}

#[test]
fn test_refused_transfer_warning_expires_on_tick() {
    let mut studio = StudioBuilder::new().with_transition_target().build();
    let _job = select(&mut studio, Point::new(100.0, 100.0), Point::new(300.0, 250.0)).unwrap();
    studio.set_tool(ToolKind::Hand);
    let t0 = Instant::now();

    studio.pointer_down(Point::new(130.0, 130.0));
    studio.pointer_move(TRANSITION_TARGET.center(), t0);
    let outcome = studio.tick(t0 + Duration::from_millis(500));
    assert!(matches!(outcome, Some(DwellOutcome::Refused { .. })));

    let warning = studio.toasts().latest().unwrap();
    assert_eq!(warning.variant, ToastVariant::Warning);
    let expires = warning.created_at + ToastVariant::Warning.default_duration();

    studio.pointer_up(TRANSITION_TARGET.center());
    studio.tick(expires + Duration::from_millis(1));
    assert_eq!(studio.toasts().count(), 0);
}

#[test]
fn test_failed_export_notice_outlives_success_notice() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut studio = StudioBuilder::new().build();
    studio.export_to(&dir.path().join("ok.png")).unwrap();
    assert!(studio.export_to(&dir.path().join("missing").join("bad.png")).is_err());

    studio.tick(Instant::now() + Duration::from_secs(60));
    let remaining: Vec<_> = studio.toasts().toasts().iter().map(|t| t.variant).collect();
    assert_eq!(remaining, vec![ToastVariant::Error]);
}

#[test]
fn test_prune_keeps_blocking() {
    let mut manager = ToastManager::new();
    manager.push(Toast::info("transient"));
    manager.push(Toast::error("Capture failed").blocking());
    manager.prune(Instant::now() + Duration::from_secs(60));

    assert_eq!(manager.count(), 1);
    assert!(manager.toasts()[0].is_blocking());
}

#[test]
fn test_variant_durations_ordered_by_severity() {
    assert!(ToastVariant::Info.default_duration() <= ToastVariant::Warning.default_duration());
    assert!(ToastVariant::Warning.default_duration() <= ToastVariant::Error.default_duration());
}
