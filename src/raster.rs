//! Rasterization seam.
//!
//! Turning the visual stack into pixels is the host's job and may take
//! several frames, so `Rasterizer` returns a future. Callers own no borrow of
//! interaction state while it is pending; the result is fed back explicitly.
//!
//! Frames are always full-stack: pixel `(0, 0)` is logical `(0, 0)` and one
//! logical pixel spans `scale` frame pixels. Cropping happens here, in one
//! place, for both capture and export.

use crate::error::RasterError;
use crate::geometry::Rect;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::future::Future;
use tracing::trace;

/// Produces a full-stack raster at a given scale.
pub trait Rasterizer {
    fn rasterize(&self, scale: f32) -> impl Future<Output = Result<RgbaImage, RasterError>>;
}

/// Rasterizer over a fixed snapshot of the screen, captured at scale 1.
///
/// Other scales are produced by resampling the snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotRasterizer {
    frame: RgbaImage,
}

impl SnapshotRasterizer {
    pub fn new(frame: RgbaImage) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }
}

impl Rasterizer for SnapshotRasterizer {
    async fn rasterize(&self, scale: f32) -> Result<RgbaImage, RasterError> {
        if self.frame.width() == 0 || self.frame.height() == 0 {
            return Err(RasterError::NoData);
        }
        if (scale - 1.0).abs() < f32::EPSILON {
            return Ok(self.frame.clone());
        }
        let width = (self.frame.width() as f32 * scale).round().max(1.0) as u32;
        let height = (self.frame.height() as f32 * scale).round().max(1.0) as u32;
        Ok(imageops::resize(&self.frame, width, height, FilterType::Triangle))
    }
}

/// Copy `region` (logical coordinates) out of a frame rasterized at `scale`
/// into an image of exactly `out` pixels.
///
/// Parts of the region outside the frame come out transparent. Returns `None`
/// when the region does not overlap the frame at all or `out` is empty.
pub fn crop_scaled(frame: &RgbaImage, region: Rect, scale: f32, out: (u32, u32)) -> Option<RgbaImage> {
    if out.0 == 0 || out.1 == 0 {
        return None;
    }
    let source = region.scaled(scale);
    let frame_rect = Rect::from_xywh(0.0, 0.0, frame.width() as f32, frame.height() as f32);
    source.intersect(&frame_rect)?;

    let source_w = source.width().round().max(1.0) as u32;
    let source_h = source.height().round().max(1.0) as u32;
    let mut cropped = RgbaImage::new(source_w, source_h);
    imageops::replace(
        &mut cropped,
        frame,
        -(source.x().round() as i64),
        -(source.y().round() as i64),
    );
    trace!(
        source_w,
        source_h,
        out_w = out.0,
        out_h = out.1,
        "cropped frame region"
    );

    if (source_w, source_h) == out {
        Some(cropped)
    } else {
        Some(imageops::resize(&cropped, out.0, out.1, FilterType::Triangle))
    }
}
