//! Studio - the context object that routes host input to every component.
//!
//! The host owns one `Studio` and forwards pointer events, poll ticks, and
//! layout changes to it. Each component keeps its own state; the studio only
//! decides who sees an event and in which order:
//!
//! ```text
//! pointer_down -> PointerTracker, then capture pipeline / cutout grab /
//!                 region resize / placement pick (by screen and tool)
//! pointer_move -> PointerTracker, selection, drag gesture, drop zone
//!                 hover, carried items, dwell recognizer
//! pointer_up   -> selection commit, drop zones, drag end
//! tick         -> dwell recognizer, toast expiry
//! ```
//!
//! Rasterization never runs inside a handler. `pointer_up` and
//! `retry_capture` hand out `CaptureJob`s; the host awaits them and feeds the
//! outcome back through `complete_capture`.

use crate::capture::{CaptureConfig, CaptureJob, CaptureOutcome, CapturePipeline, CaptureSurface};
use crate::composition::{CompositionRegion, CompositionSurface, PlacementId, RegionConfig};
use crate::constants::DEFAULT_VIEWPORT;
use crate::cutout::{Cutout, CutoutId};
use crate::dnd::{
    CutoutRef, DragCoordinator, DragGesture, DragPayload, DragSession, DropZone, DropZoneRegistry, GestureStep,
    ZoneId,
};
use crate::dwell::{DwellEvent, DwellRecognizer};
use crate::error::{CaptureError, CaptureResult, ExportResult};
use crate::export::{self, SurfaceRasterizer};
use crate::geometry::{Extent, Point, Rect};
use crate::notifications::{Toast, ToastManager};
use crate::pointer::PointerTracker;
use crate::settings::Settings;
use crate::tool::ToolKind;
use image::RgbaImage;
use std::fmt;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

type MeasureFn = Box<dyn Fn() -> Option<Rect>>;

/// Which surface is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Capture,
    Composition,
}

impl Screen {
    pub fn toggled(self) -> Self {
        match self {
            Screen::Capture => Screen::Composition,
            Screen::Composition => Screen::Capture,
        }
    }
}

/// Outcome of a dwell hold that reached its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellOutcome {
    /// The cutout moved to the composition surface
    Committed { cutout: CutoutId, placement: PlacementId },
    /// The cutout was still materializing; nothing moved
    Refused { cutout: CutoutId },
}

/// What a pointer release produced.
#[derive(Debug, Default)]
pub struct Release {
    /// Rasterization to run for a freshly committed selection
    pub capture: Option<CaptureJob>,
    /// Drop zones that accepted the dragged payload
    pub dropped_on: Vec<ZoneId>,
    /// The release ended a drag (as opposed to a click)
    pub ended_drag: bool,
}

/// Something following the pointer with a fixed grab offset.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Carried {
    /// A cutout on the capture surface, grabbed with the hand tool
    Cutout { id: CutoutId, grab_offset: Point },
    /// A placement on the composition surface
    Placement { id: PlacementId, grab_offset: Point },
}

/// Top-level interaction context.
pub struct Studio {
    settings: Settings,
    pointer: PointerTracker,
    coordinator: DragCoordinator,
    gesture: DragGesture,
    zones: DropZoneRegistry,
    tool: ToolKind,
    screen: Screen,
    capture: CapturePipeline,
    cutouts: CaptureSurface,
    dwell: DwellRecognizer,
    transition_target: Option<MeasureFn>,
    composition: CompositionSurface,
    carried: Option<Carried>,
    toasts: ToastManager,
}

impl fmt::Debug for Studio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Studio")
            .field("screen", &self.screen)
            .field("tool", &self.tool)
            .field("session", self.coordinator.session())
            .field("capture", self.capture.phase())
            .field("cutouts", &self.cutouts.len())
            .field("placements", &self.composition.len())
            .finish_non_exhaustive()
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(Settings::default(), Extent::from(DEFAULT_VIEWPORT))
    }
}

impl Studio {
    pub fn new(settings: Settings, viewport: Extent) -> Self {
        let region = CompositionRegion::new(
            Rect::new(Point::default(), Extent::from(settings.region_size)),
            RegionConfig::from(&settings),
        );
        let dwell = DwellRecognizer::new(settings.dwell_hold())
            .with_poll_interval(settings.dwell_poll())
            .with_affordance_scale(settings.dwell_affordance_scale);

        Self {
            capture: CapturePipeline::new(CaptureConfig::from(&settings)),
            composition: CompositionSurface::new(region, viewport),
            dwell,
            settings,
            pointer: PointerTracker::new(),
            coordinator: DragCoordinator::new(),
            gesture: DragGesture::default(),
            zones: DropZoneRegistry::new(),
            tool: ToolKind::default(),
            screen: Screen::default(),
            cutouts: CaptureSurface::new(),
            transition_target: None,
            carried: None,
            toasts: ToastManager::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn session(&self) -> &DragSession {
        self.coordinator.session()
    }

    pub fn coordinator(&self) -> &DragCoordinator {
        &self.coordinator
    }

    pub fn zones(&self) -> &DropZoneRegistry {
        &self.zones
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn capture(&self) -> &CapturePipeline {
        &self.capture
    }

    pub fn cutouts(&self) -> &CaptureSurface {
        &self.cutouts
    }

    pub fn cutout(&self, id: CutoutId) -> Option<&Cutout> {
        self.cutouts.get(id)
    }

    pub fn dwell(&self) -> &DwellRecognizer {
        &self.dwell
    }

    pub fn composition(&self) -> &CompositionSurface {
        &self.composition
    }

    pub fn composition_mut(&mut self) -> &mut CompositionSurface {
        &mut self.composition
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.toasts
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn register_drop_zone(&mut self, zone: DropZone) -> ZoneId {
        self.zones.register(zone)
    }

    pub fn unregister_drop_zone(&mut self, id: ZoneId) -> Option<DropZone> {
        self.zones.unregister(id)
    }

    /// Set how to measure the dwell transition target's current bounds
    pub fn set_transition_target(&mut self, measure: impl Fn() -> Option<Rect> + 'static) {
        self.transition_target = Some(Box::new(measure));
    }

    pub fn clear_transition_target(&mut self) {
        self.transition_target = None;
        self.dwell.reset();
    }

    /// Switch tools. An in-progress selection is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tool {
            self.capture.cancel_selection();
            debug!(?tool, "tool changed");
        }
        self.tool = tool;
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        self.capture.cancel_selection();
        self.composition.region_mut().end_resize();
        info!(?screen, "screen changed");
        self.screen = screen;
    }

    pub fn toggle_screen(&mut self) -> Screen {
        self.set_screen(self.screen.toggled());
        self.screen
    }

    /// Toggle the composition region's resize mode; returns the new mode
    pub fn toggle_resize_mode(&mut self) -> bool {
        self.composition.region_mut().toggle_resize_mode()
    }

    /// Host window changed size
    pub fn viewport_resized(&mut self, viewport: Extent) {
        self.composition.viewport_resized(viewport);
    }

    // ========================================================================
    // Pointer events
    // ========================================================================

    /// Press on a draggable host widget (collection card, page thumbnail,
    /// magazine). Nothing is visible until the drag threshold is crossed.
    /// Ignored while another drag is active.
    pub fn press_draggable(&mut self, payload: DragPayload, position: Point) {
        if !position.is_finite() {
            return;
        }
        if self.coordinator.is_dragging() {
            debug!(kind = ?payload.kind(), "press ignored, a drag is already active");
            return;
        }
        self.pointer.pressed(position);
        self.gesture.arm(payload, position);
    }

    pub fn pointer_down(&mut self, position: Point) {
        if !position.is_finite() {
            return;
        }
        self.pointer.pressed(position);

        match self.screen {
            Screen::Capture => self.capture_pointer_down(position),
            Screen::Composition => self.composition_pointer_down(position),
        }
    }

    fn capture_pointer_down(&mut self, position: Point) {
        if self.tool.is_capture() {
            self.capture.pointer_down(self.tool, position);
            return;
        }
        if self.tool != ToolKind::Hand {
            return;
        }
        if let Some(cutout) = self.cutouts.cutout_at(position) {
            debug!(cutout = %cutout.id, "cutout grabbed");
            self.carried = Some(Carried::Cutout {
                id: cutout.id,
                grab_offset: position - cutout.position,
            });
            self.gesture.arm(DragPayload::Cutout(CutoutRef::from(cutout)), position);
        }
    }

    fn composition_pointer_down(&mut self, position: Point) {
        if let Some(handle) = self.composition.region().handle_at(position) {
            self.composition.region_mut().begin_resize(handle, position);
            return;
        }
        match self.composition.hit_test(position) {
            Some(id) => {
                let grab_offset = self
                    .composition
                    .placement(id)
                    .map(|p| position - p.position)
                    .unwrap_or_default();
                self.composition.select(Some(id));
                self.carried = Some(Carried::Placement { id, grab_offset });
            }
            None => self.composition.select(None),
        }
    }

    /// Pointer moved. Returns the dwell outcome if this move completed a hold.
    pub fn pointer_move(&mut self, position: Point, now: Instant) -> Option<DwellOutcome> {
        if !position.is_finite() {
            return None;
        }
        self.pointer.moved(position);
        self.capture.pointer_move(position);
        self.composition.region_mut().update_resize(position);

        let step = self
            .gesture
            .pointer_moved(position, self.settings.drag_start_threshold, &mut self.coordinator);
        if step == GestureStep::Rejected {
            self.carried = None;
        }
        if self.coordinator.is_dragging() {
            self.zones.update_hover(&self.coordinator);
        }
        self.follow_pointer(position);
        self.evaluate_dwell(now)
    }

    fn follow_pointer(&mut self, position: Point) {
        match self.carried {
            Some(Carried::Cutout { id, grab_offset }) if self.coordinator.is_dragging() => {
                self.cutouts.move_cutout(id, position - grab_offset);
            }
            Some(Carried::Placement { id, grab_offset }) => {
                self.composition.move_placement(id, position - grab_offset);
            }
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, position: Point) -> Release {
        let position = if position.is_finite() {
            position
        } else {
            self.pointer.current_position().unwrap_or_default()
        };
        self.pointer.released(position);
        self.coordinator.update_position(position);

        let capture = if self.capture.is_selecting() {
            self.capture.pointer_up(position, &mut self.cutouts)
        } else {
            None
        };
        self.composition.region_mut().end_resize();

        let dropped_on = if self.coordinator.is_dragging() {
            self.zones.release(&self.coordinator)
        } else {
            Vec::new()
        };
        let ended_drag = self.gesture.release();
        self.coordinator.end_drag();
        self.zones.update_hover(&self.coordinator);
        self.dwell.reset();
        self.carried = None;

        Release {
            capture,
            dropped_on,
            ended_drag,
        }
    }

    /// Poll tick. Returns the dwell outcome if the hold completed.
    pub fn tick(&mut self, now: Instant) -> Option<DwellOutcome> {
        self.toasts.prune(now);
        self.evaluate_dwell(now)
    }

    // ========================================================================
    // Dwell transfer
    // ========================================================================

    fn evaluate_dwell(&mut self, now: Instant) -> Option<DwellOutcome> {
        if !DwellRecognizer::is_watching(self.coordinator.session()) {
            self.dwell.reset();
            return None;
        }
        let bounds = self.transition_target.as_ref().and_then(|measure| measure());
        match self.dwell.observe(now, self.coordinator.session(), bounds)? {
            DwellEvent::Fired { position } => self.commit_transfer(position),
            DwellEvent::Entered | DwellEvent::Left => None,
        }
    }

    fn commit_transfer(&mut self, position: Point) -> Option<DwellOutcome> {
        let id = self.coordinator.session().payload()?.as_cutout()?.id;
        let Some(cutout) = self.cutouts.get(id) else {
            debug!(cutout = %id, "dwell fired for a cutout no longer on the capture surface");
            return None;
        };

        if cutout.is_pending() {
            warn!(cutout = %id, "dwell commit refused, cutout still materializing");
            self.toasts
                .push(Toast::warning("Still cutting this out, wait a moment and try again"));
            self.dwell.reset();
            return Some(DwellOutcome::Refused { cutout: id });
        }

        let grab_offset = position - cutout.position;
        let cutout = self.cutouts.remove(id)?;
        self.capture.forget(id);

        let placement = match self.composition.insert_cutout(cutout, position - grab_offset) {
            Ok(placement) => placement,
            Err(cutout) => {
                self.cutouts.insert(*cutout);
                return None;
            }
        };
        self.composition.select(Some(placement));
        self.carried = Some(Carried::Placement {
            id: placement,
            grab_offset,
        });
        self.set_screen(Screen::Composition);
        info!(cutout = %id, placement = %placement, "cutout transferred to composition");
        Some(DwellOutcome::Committed {
            cutout: id,
            placement,
        })
    }

    // ========================================================================
    // Capture lifecycle
    // ========================================================================

    /// Apply the outcome of a capture job.
    ///
    /// Failures leave the cutout pending and raise a blocking notice.
    pub fn complete_capture(&mut self, outcome: CaptureOutcome) -> CaptureResult<CutoutId> {
        let result = self.capture.finish(outcome, &mut self.cutouts);
        match &result {
            Err(CaptureError::CutoutGone(_)) | Ok(_) => {}
            Err(e) => {
                self.toasts
                    .push(Toast::error(format!("Capture failed: {}", e)).blocking());
            }
        }
        result
    }

    /// Re-issue the rasterization of a cutout whose capture failed
    pub fn retry_capture(&mut self, id: CutoutId) -> Option<CaptureJob> {
        self.capture.retry(id, &self.cutouts)
    }

    /// Delete a cutout from the capture surface
    pub fn delete_cutout(&mut self, id: CutoutId) -> bool {
        if self.cutouts.remove(id).is_none() {
            return false;
        }
        self.capture.forget(id);
        if matches!(self.carried, Some(Carried::Cutout { id: carried, .. }) if carried == id) {
            self.carried = None;
        }
        info!(cutout = %id, "cutout deleted");
        true
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Flatten the composition region with the built-in renderer.
    ///
    /// Failures raise a blocking notice; the composition is untouched.
    pub fn export(&mut self) -> ExportResult<RgbaImage> {
        let rasterizer = SurfaceRasterizer::new(
            &self.composition,
            self.settings.surface_background,
            self.settings.region_fill,
        );
        let result = export::flatten_blocking(&self.composition, &rasterizer, self.settings.export_scale);
        if let Err(e) = &result {
            self.toasts
                .push(Toast::error(format!("Export failed: {}", e)).blocking());
        }
        result
    }

    /// Flatten and write a PNG to `path`
    pub fn export_to(&mut self, path: &Path) -> ExportResult<()> {
        let image = self.export()?;
        match export::write_png(&image, path) {
            Ok(()) => {
                self.toasts.push(Toast::success("Collage exported"));
                Ok(())
            }
            Err(e) => {
                self.toasts
                    .push(Toast::error(format!("Export failed: {}", e)).blocking());
                Err(e)
            }
        }
    }
}
