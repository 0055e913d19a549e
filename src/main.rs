//! Headless demo: cut a region out of a synthetic workspace, carry it onto
//! the composition surface with a dwell hold, and export the result.

use anyhow::{Context, Result, bail};
use collage::dnd::{DropZone, TargetKind};
use collage::geometry::{Extent, Point, Rect};
use collage::raster::SnapshotRasterizer;
use collage::settings::Settings;
use collage::studio::{DwellOutcome, Screen, Studio};
use collage::tool::ToolKind;
use futures::executor::block_on;
use image::{Rgba, RgbaImage};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

const VIEWPORT: (f32, f32) = (1280.0, 1024.0);
const TRANSITION_TARGET: Rect = Rect::new(Point::new(1180.0, 20.0), Extent::new(80.0, 80.0));

/// A striped workspace so cutouts are recognizable in the output
fn workspace() -> RgbaImage {
    RgbaImage::from_fn(VIEWPORT.0 as u32, VIEWPORT.1 as u32, |x, y| {
        let band = (x / 64 + y / 64) % 3;
        match band {
            0 => Rgba([0xe1, 0x1d, 0x48, 0xff]),
            1 => Rgba([0x25, 0x63, 0xeb, 0xff]),
            _ => Rgba([0xfa, 0xcc, 0x15, 0xff]),
        }
    })
}

fn main() -> Result<()> {
    collage::logging::init();

    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("collage.png"));

    let settings = Settings::load_or_default();
    let hold = settings.dwell_hold();
    let mut studio = Studio::new(settings, Extent::from(VIEWPORT));
    let rasterizer = SnapshotRasterizer::new(workspace());

    studio.set_transition_target(|| Some(TRANSITION_TARGET));
    studio.register_drop_zone(DropZone::new(
        TargetKind::TransitionTarget,
        || Some(TRANSITION_TARGET),
        |payload| info!(id = %payload.id(), "dropped on transition target"),
    ));

    // Cut a region out of the workspace
    studio.set_tool(ToolKind::RectangleCapture);
    studio.pointer_down(Point::new(100.0, 100.0));
    studio.pointer_move(Point::new(200.0, 180.0), Instant::now());
    let job = studio
        .pointer_up(Point::new(300.0, 250.0))
        .capture
        .context("selection was discarded")?;
    let id = studio
        .complete_capture(block_on(job.run(&rasterizer)))
        .context("capture failed")?;
    info!(cutout = %id, "cutout ready");

    // Grab it with the hand tool and hold it over the transition target
    studio.set_tool(ToolKind::Hand);
    let grab = Point::new(130.0, 130.0);
    studio.pointer_down(grab);
    let start = Instant::now();
    let target = TRANSITION_TARGET.center();
    studio.pointer_move(target, start);

    let mut now = start;
    let outcome = loop {
        now += studio.dwell().poll_interval();
        if let Some(outcome) = studio.tick(now) {
            break outcome;
        }
        if now.duration_since(start) > hold * 4 {
            bail!("dwell hold never completed");
        }
    };
    let DwellOutcome::Committed { placement, .. } = outcome else {
        bail!("dwell commit refused: {:?}", outcome);
    };

    // Carry the placement onto the page and let go
    let page = studio.composition().region().bounds();
    studio.pointer_move(page.center(), now + Duration::from_millis(16));
    studio.pointer_up(page.center());
    if studio.screen() != Screen::Composition {
        bail!("expected the composition screen after the transfer");
    }

    studio
        .export_to(&output)
        .with_context(|| format!("failed to export to {}", output.display()))?;
    info!(
        placement = %placement,
        path = %output.display(),
        "collage written"
    );
    Ok(())
}
