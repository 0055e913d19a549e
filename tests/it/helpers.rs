//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `StudioBuilder` - Builder for studios with targets and zones wired up
//! - Payload and cutout fixtures
//! - Rasterizers: a flat workspace snapshot and one that always fails

use collage::capture::CaptureJob;
use collage::collections::{CollectionSummary, PageKind, PageRecord};
use collage::cutout::{Cutout, CutoutId};
use collage::dnd::{CollectionRef, CutoutRef, DragPayload, PageRef, PayloadKind};
use collage::error::RasterError;
use collage::geometry::{Extent, Point, Rect};
use collage::raster::{Rasterizer, SnapshotRasterizer};
use collage::settings::Settings;
use collage::studio::Studio;
use collage::tool::ToolKind;
use futures::executor::block_on;
use image::{Rgba, RgbaImage};

pub const VIEWPORT: Extent = Extent::new(1280.0, 1024.0);

/// Top-right corner target used for dwell transfers
pub const TRANSITION_TARGET: Rect = Rect::new(Point::new(1180.0, 20.0), Extent::new(80.0, 80.0));

pub const ALL_PAYLOAD_KINDS: [PayloadKind; 4] = [
    PayloadKind::Collection,
    PayloadKind::Cutout,
    PayloadKind::Page,
    PayloadKind::Magazine,
];

// ============================================================================
// Rasterizers
// ============================================================================

/// Snapshot of a flat gray workspace the size of the viewport
pub fn workspace() -> SnapshotRasterizer {
    SnapshotRasterizer::new(RgbaImage::from_pixel(
        VIEWPORT.width as u32,
        VIEWPORT.height as u32,
        Rgba([0x80, 0x80, 0x80, 0xff]),
    ))
}

/// Rasterizer that never produces pixels
pub struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    async fn rasterize(&self, _scale: f32) -> Result<RgbaImage, RasterError> {
        Err(RasterError::Failed("surface lost".into()))
    }
}

// ============================================================================
// StudioBuilder
// ============================================================================

/// Builder for test studios.
///
/// # Example
/// ```ignore
/// let studio = StudioBuilder::new()
///     .with_tool(ToolKind::Hand)
///     .with_transition_target()
///     .build();
/// ```
pub struct StudioBuilder {
    settings: Settings,
    viewport: Extent,
    tool: ToolKind,
    transition_target: bool,
}

impl Default for StudioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StudioBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            viewport: VIEWPORT,
            tool: ToolKind::default(),
            transition_target: false,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_viewport(mut self, viewport: Extent) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = tool;
        self
    }

    /// Measure the dwell target at `TRANSITION_TARGET`
    pub fn with_transition_target(mut self) -> Self {
        self.transition_target = true;
        self
    }

    pub fn build(self) -> Studio {
        let mut studio = Studio::new(self.settings, self.viewport);
        studio.set_tool(self.tool);
        if self.transition_target {
            studio.set_transition_target(|| Some(TRANSITION_TARGET));
        }
        studio
    }
}

// ============================================================================
// Capture helpers
// ============================================================================

/// Draw a rectangle selection and return the job it produced
pub fn select(studio: &mut Studio, from: Point, to: Point) -> Option<CaptureJob> {
    let previous = studio.tool();
    studio.set_tool(ToolKind::RectangleCapture);
    studio.pointer_down(from);
    let job = studio.pointer_up(to).capture;
    studio.set_tool(previous);
    job
}

/// Capture a ready cutout from `from` to `to` against the flat workspace
pub fn capture_ready(studio: &mut Studio, from: Point, to: Point) -> CutoutId {
    let job = select(studio, from, to).expect("selection should be accepted");
    studio
        .complete_capture(block_on(job.run(&workspace())))
        .expect("capture should succeed")
}

/// A ready cutout filled with `color`
pub fn ready_cutout(position: Point, size: Extent, color: [u8; 4]) -> Cutout {
    let mut cutout = Cutout::pending(position, size);
    cutout.materialize(RgbaImage::from_pixel(
        size.width as u32,
        size.height as u32,
        Rgba(color),
    ));
    cutout
}

// ============================================================================
// Payload fixtures
// ============================================================================

pub fn summary(id: &str) -> CollectionSummary {
    CollectionSummary {
        id: id.to_string(),
        name: format!("Collection {id}"),
        cover_image_ref: Some(format!("{id}-cover.jpg")),
        page_count: 3,
        owner: "tester".to_string(),
        kind: Default::default(),
    }
}

pub fn page(id: &str) -> PageRecord {
    PageRecord {
        id: id.to_string(),
        kind: PageKind::Image,
        content: format!("{id}.jpg"),
    }
}

/// A payload of the given kind
pub fn payload_of(kind: PayloadKind) -> DragPayload {
    match kind {
        PayloadKind::Collection => DragPayload::Collection(CollectionRef::from(&summary("c1"))),
        PayloadKind::Magazine => DragPayload::Magazine(CollectionRef::from(&summary("m1"))),
        PayloadKind::Page => DragPayload::Page(PageRef {
            collection_id: "c1".to_string(),
            page: page("p1"),
        }),
        PayloadKind::Cutout => DragPayload::Cutout(CutoutRef::from(&Cutout::pending(
            Point::default(),
            Extent::new(10.0, 10.0),
        ))),
    }
}

/// Assert two points are equal within floating point noise
#[track_caller]
pub fn assert_point_near(actual: Point, expected: Point) {
    assert!(
        actual.distance(expected) < 1e-3,
        "expected {expected:?}, got {actual:?}"
    );
}
