//! Capture workflow: selection, pending cutout, materialization, failure.

use crate::helpers::{FailingRasterizer, StudioBuilder, capture_ready, select, workspace};
use collage::capture::CapturePhase;
use collage::error::CaptureError;
use collage::geometry::{Extent, Point};
use collage::notifications::ToastVariant;
use collage::tool::ToolKind;
use futures::executor::block_on;
use std::time::Instant;

#[test]
fn test_scenario_selection_becomes_cutout() {
    let mut studio = StudioBuilder::new().with_tool(ToolKind::RectangleCapture).build();

    studio.pointer_down(Point::new(100.0, 100.0));
    studio.pointer_move(Point::new(180.0, 200.0), Instant::now());
    let overlay = studio.capture().overlay().map(|s| s.region());
    assert_eq!(overlay.map(|r| r.size), Some(Extent::new(80.0, 100.0)));

    let job = studio.pointer_up(Point::new(300.0, 250.0)).capture.unwrap();
    let id = job.cutout;

    // Published before any pixels exist
    let cutout = studio.cutout(id).unwrap();
    assert!(cutout.is_pending());
    assert!(cutout.data_url().is_none());
    assert_eq!(cutout.position, Point::new(120.0, 120.0));
    assert_eq!(cutout.size, Extent::new(200.0, 150.0));

    // Overlay is hidden while rasterizing
    assert!(studio.capture().overlay().is_none());
    assert!(!studio.capture().is_overlay_visible());
    assert_eq!(studio.capture().phase(), &CapturePhase::Materializing { cutout: id });

    let outcome = block_on(job.run(&workspace()));
    assert_eq!(studio.complete_capture(outcome).unwrap(), id);

    let cutout = studio.cutout(id).unwrap();
    assert!(cutout.is_ready());
    assert_eq!(cutout.image().unwrap().dimensions(), (200, 150));
    assert!(cutout.data_url().unwrap().starts_with("data:image/png;base64,"));
    assert!(studio.capture().is_idle());
    assert!(studio.capture().is_overlay_visible());
}

#[test]
fn test_failure_keeps_pending_cutout_and_notifies() {
    let mut studio = StudioBuilder::new().build();
    let job = select(&mut studio, Point::new(10.0, 10.0), Point::new(110.0, 60.0)).unwrap();
    let id = job.cutout;

    let result = studio.complete_capture(block_on(job.run(&FailingRasterizer)));
    assert!(matches!(result, Err(CaptureError::Raster(_))));
    assert!(studio.cutout(id).unwrap().is_pending());
    assert!(studio.capture().is_idle());

    let toast = studio.toasts().latest().unwrap();
    assert_eq!(toast.variant, ToastVariant::Error);
    assert!(toast.is_blocking());

    // A new capture is possible straight away
    let other = capture_ready(&mut studio, Point::new(200.0, 200.0), Point::new(260.0, 260.0));
    assert!(studio.cutout(other).unwrap().is_ready());

    let retry = studio.retry_capture(id).unwrap();
    assert_eq!(studio.complete_capture(block_on(retry.run(&workspace()))).unwrap(), id);
    assert!(studio.cutout(id).unwrap().is_ready());
    assert!(studio.retry_capture(id).is_none());
}

#[test]
fn test_deleting_pending_cutout() {
    let mut studio = StudioBuilder::new().build();
    let job = select(&mut studio, Point::new(10.0, 10.0), Point::new(110.0, 60.0)).unwrap();
    let id = job.cutout;
    assert!(studio.delete_cutout(id));
    assert!(!studio.delete_cutout(id));

    let result = studio.complete_capture(block_on(job.run(&workspace())));
    assert!(matches!(result, Err(CaptureError::CutoutGone(_))));
    assert!(studio.cutouts().is_empty());
    assert!(studio.capture().is_idle());
    // Deleting is the user's doing, not a failure to report
    assert_eq!(studio.toasts().count(), 0);
}

#[test]
fn test_deleting_stalled_cutout_frees_capture() {
    let mut studio = StudioBuilder::new().build();
    let stalled = select(&mut studio, Point::new(100.0, 100.0), Point::new(300.0, 250.0)).unwrap();
    assert!(studio.delete_cutout(stalled.cutout));
    assert!(studio.capture().is_idle());
    assert!(studio.capture().is_overlay_visible());
    assert!(studio.retry_capture(stalled.cutout).is_none());

    let next = select(&mut studio, Point::new(400.0, 400.0), Point::new(600.0, 600.0)).unwrap();
    assert_eq!(
        studio.capture().phase(),
        &CapturePhase::Materializing { cutout: next.cutout }
    );

    // The stalled job finally resolves; the running one is unaffected
    let result = studio.complete_capture(block_on(stalled.run(&workspace())));
    assert!(matches!(result, Err(CaptureError::CutoutGone(_))));
    assert!(studio.capture().is_materializing());

    studio.complete_capture(block_on(next.run(&workspace()))).unwrap();
    assert!(studio.capture().is_idle());
    assert_eq!(studio.cutouts().len(), 1);
    assert_eq!(studio.toasts().count(), 0);
}

#[test]
fn test_second_capture_waits_for_first() {
    let mut studio = StudioBuilder::new().build();
    let first = select(&mut studio, Point::new(10.0, 10.0), Point::new(110.0, 60.0)).unwrap();
    assert!(select(&mut studio, Point::new(300.0, 300.0), Point::new(400.0, 400.0)).is_none());
    assert_eq!(studio.cutouts().len(), 1);

    studio.complete_capture(block_on(first.run(&workspace()))).unwrap();
    assert!(select(&mut studio, Point::new(300.0, 300.0), Point::new(400.0, 400.0)).is_some());
}

#[test]
fn test_pointer_tool_does_not_capture() {
    let mut studio = StudioBuilder::new().build();
    studio.pointer_down(Point::new(10.0, 10.0));
    assert!(studio.pointer().is_button_down());
    let release = studio.pointer_up(Point::new(200.0, 200.0));
    assert!(release.capture.is_none());
    assert!(!studio.pointer().is_button_down());
    assert!(studio.cutouts().is_empty());
}

#[test]
fn test_malformed_pointer_samples_ignored() {
    let mut studio = StudioBuilder::new().with_tool(ToolKind::RectangleCapture).build();
    studio.pointer_down(Point::new(10.0, 10.0));
    studio.pointer_move(Point::new(f32::NAN, 40.0), Instant::now());
    assert_eq!(studio.pointer().current_position(), Some(Point::new(10.0, 10.0)));
    let job = studio.pointer_up(Point::new(60.0, 60.0)).capture.unwrap();
    assert_eq!(job.region.size, Extent::new(50.0, 50.0));
}
