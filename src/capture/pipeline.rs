//! Region capture pipeline.
//!
//! ```text
//! Idle -> Selecting       (pointer down with a capture tool)
//! Selecting -> Idle       (pointer up, selection below minimum: discarded)
//! Selecting -> Materializing
//!                         (pointer up: pending cutout published, job handed out)
//! Materializing -> Idle   (job outcome applied: cutout ready, or left pending on failure)
//! ```
//!
//! The pending cutout exists before any pixels are requested so the host can
//! show it immediately. The rasterization itself runs outside the pipeline:
//! `pointer_up` hands out a `CaptureJob`, the host awaits `CaptureJob::run`
//! while it keeps processing input, and feeds the `CaptureOutcome` back into
//! `finish`.

use super::selection::{Lasso, Selection, SelectionRect};
use super::surface::CaptureSurface;
use crate::cutout::{Cutout, CutoutId};
use crate::error::{CaptureError, CaptureResult};
use crate::geometry::{Point, Rect};
use crate::raster::{Rasterizer, crop_scaled};
use crate::settings::Settings;
use crate::tool::ToolKind;
use image::RgbaImage;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Tunables for the capture pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    /// Selections with a smaller width or height are discarded
    pub min_selection: f32,
    /// Offset of a new cutout from the selection origin
    pub offset: Point,
    /// Scale at which the workspace is rasterized
    pub scale: f32,
}

impl From<&Settings> for CaptureConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            min_selection: settings.min_selection_size,
            offset: Point::from(settings.capture_offset),
            scale: settings.capture_scale,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Current phase of the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CapturePhase {
    #[default]
    Idle,

    /// Pointer is down, selection follows the pointer
    Selecting(Selection),

    /// A pending cutout is waiting for its pixels
    Materializing { cutout: CutoutId },
}

/// Work order for one rasterization.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureJob {
    pub cutout: CutoutId,
    /// Logical region of the workspace to rasterize
    pub region: Rect,
    pub scale: f32,
    lasso: Option<Lasso>,
}

impl CaptureJob {
    /// Rasterize the workspace and cut the job's region out of it.
    pub async fn run<R: Rasterizer>(self, rasterizer: &R) -> CaptureOutcome {
        let result = self.materialize(rasterizer).await;
        CaptureOutcome { job: self, result }
    }

    async fn materialize<R: Rasterizer>(&self, rasterizer: &R) -> CaptureResult<RgbaImage> {
        let frame = rasterizer.rasterize(self.scale).await?;
        let out = self.region.size.to_pixels(1.0);
        let mut image = crop_scaled(&frame, self.region, self.scale, out).ok_or(
            CaptureError::OutOfFrame {
                x: self.region.x(),
                y: self.region.y(),
                width: self.region.width(),
                height: self.region.height(),
            },
        )?;
        if let Some(lasso) = &self.lasso {
            lasso.mask(&mut image, self.region);
        }
        Ok(image)
    }

    pub fn is_freehand(&self) -> bool {
        self.lasso.is_some()
    }
}

/// Result of running a capture job.
#[derive(Debug)]
pub struct CaptureOutcome {
    pub job: CaptureJob,
    pub result: CaptureResult<RgbaImage>,
}

impl CaptureOutcome {
    pub fn cutout(&self) -> CutoutId {
        self.job.cutout
    }
}

/// Turns pointer-drawn selections into cutouts.
#[derive(Debug)]
pub struct CapturePipeline {
    phase: CapturePhase,
    config: CaptureConfig,
    overlay_visible: bool,
    /// Jobs whose rasterization failed, kept for retry
    failed: HashMap<CutoutId, CaptureJob>,
}

impl Default for CapturePipeline {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}

impl CapturePipeline {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            phase: CapturePhase::Idle,
            config,
            overlay_visible: true,
            failed: HashMap::new(),
        }
    }

    pub fn phase(&self) -> &CapturePhase {
        &self.phase
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, CapturePhase::Idle)
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.phase, CapturePhase::Selecting(_))
    }

    pub fn is_materializing(&self) -> bool {
        matches!(self.phase, CapturePhase::Materializing { .. })
    }

    /// The selection overlay to draw, if any. Hidden while a capture is
    /// being rasterized so it never ends up in the cutout.
    pub fn overlay(&self) -> Option<&Selection> {
        match &self.phase {
            CapturePhase::Selecting(selection) if self.overlay_visible => Some(selection),
            _ => None,
        }
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Begin a selection. Returns `false` when the tool does not capture or
    /// another capture is still in progress.
    pub fn pointer_down(&mut self, tool: ToolKind, position: Point) -> bool {
        if !self.is_idle() {
            debug!(phase = ?self.phase, "capture busy, ignoring pointer down");
            return false;
        }
        let selection = match tool {
            ToolKind::RectangleCapture => Selection::Rectangle(SelectionRect::new(position)),
            ToolKind::FreehandCapture => Selection::Freehand(Lasso::new(position)),
            _ => return false,
        };
        debug!(?tool, x = position.x, y = position.y, "selection started");
        self.phase = CapturePhase::Selecting(selection);
        true
    }

    pub fn pointer_move(&mut self, position: Point) {
        if let CapturePhase::Selecting(selection) = &mut self.phase {
            selection.update(position);
        }
    }

    /// Commit the selection.
    ///
    /// Too-small selections are discarded and yield `None`. Otherwise a
    /// pending cutout is inserted into `surface` before the job is returned.
    pub fn pointer_up(&mut self, position: Point, surface: &mut CaptureSurface) -> Option<CaptureJob> {
        let CapturePhase::Selecting(mut selection) = std::mem::take(&mut self.phase) else {
            return None;
        };
        selection.update(position);

        let region = selection.region();
        if region.width() < self.config.min_selection || region.height() < self.config.min_selection {
            debug!(
                width = region.width(),
                height = region.height(),
                "selection below minimum size, discarded"
            );
            return None;
        }

        let position = region.origin + self.config.offset;
        let cutout = Cutout::pending(position, region.size);
        let id = surface.insert(cutout);
        info!(
            cutout = %id,
            width = region.width(),
            height = region.height(),
            "cutout published, materializing"
        );

        let job = CaptureJob {
            cutout: id,
            region,
            scale: self.config.scale,
            lasso: match selection {
                Selection::Freehand(lasso) => Some(lasso),
                Selection::Rectangle(_) => None,
            },
        };
        self.begin_materializing(id);
        Some(job)
    }

    fn begin_materializing(&mut self, cutout: CutoutId) {
        self.overlay_visible = false;
        self.phase = CapturePhase::Materializing { cutout };
    }

    /// Abort an in-progress selection (tool switch, escape)
    pub fn cancel_selection(&mut self) {
        if self.is_selecting() {
            debug!("selection cancelled");
            self.phase = CapturePhase::Idle;
        }
    }

    /// Apply a job outcome.
    ///
    /// On success the cutout becomes ready. On failure it stays pending, the
    /// job is kept for `retry`, and the error is returned for the caller to
    /// surface. Either way the pipeline returns to idle. A stale outcome (its
    /// cutout was deleted, another job may be running) leaves the phase alone.
    pub fn finish(&mut self, outcome: CaptureOutcome, surface: &mut CaptureSurface) -> CaptureResult<CutoutId> {
        let id = outcome.cutout();
        if matches!(self.phase, CapturePhase::Materializing { cutout } if cutout == id) {
            self.phase = CapturePhase::Idle;
            self.overlay_visible = true;
        }

        match outcome.result {
            Ok(image) => {
                let Some(cutout) = surface.get_mut(id) else {
                    warn!(cutout = %id, "cutout deleted before materialization finished");
                    return Err(CaptureError::CutoutGone(id.to_string()));
                };
                cutout.materialize(image);
                self.failed.remove(&id);
                info!(cutout = %id, "cutout ready");
                Ok(id)
            }
            Err(e) => {
                warn!(cutout = %id, "materialization failed: {}", e);
                if surface.get(id).is_some() {
                    self.failed.insert(id, outcome.job);
                }
                Err(e)
            }
        }
    }

    /// Cutouts whose last rasterization failed
    pub fn failed(&self) -> impl Iterator<Item = CutoutId> + '_ {
        self.failed.keys().copied()
    }

    /// Re-issue the job of a failed capture.
    ///
    /// Returns `None` when the cutout has no failed job, has been deleted, or
    /// another capture is in progress.
    pub fn retry(&mut self, id: CutoutId, surface: &CaptureSurface) -> Option<CaptureJob> {
        if !self.is_idle() {
            return None;
        }
        if surface.get(id).is_none_or(|c| c.is_ready()) {
            self.failed.remove(&id);
            return None;
        }
        let job = self.failed.remove(&id)?;
        info!(cutout = %id, "retrying materialization");
        self.begin_materializing(id);
        Some(job)
    }

    /// Forget a deleted cutout. If it was materializing, the pipeline goes
    /// back to idle and the job's eventual outcome is stale.
    pub fn forget(&mut self, id: CutoutId) {
        self.failed.remove(&id);
        if matches!(self.phase, CapturePhase::Materializing { cutout } if cutout == id) {
            debug!(cutout = %id, "materializing cutout deleted, capture released");
            self.phase = CapturePhase::Idle;
            self.overlay_visible = true;
        }
    }
}
