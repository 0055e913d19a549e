//! Flattening the composition region into a single raster.
//!
//! The whole visual stack is rasterized at a supersampling scale, then the
//! region is cropped out in scaled coordinates and brought back to its
//! logical size. Output dimensions depend only on the region's size.

use crate::composition::CompositionSurface;
use crate::error::{ExportError, ExportResult, RasterError};
use crate::geometry::Rect;
use crate::raster::{Rasterizer, crop_scaled};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Software renderer for the composition surface's visual stack.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceRasterizer<'a> {
    surface: &'a CompositionSurface,
    background: Rgba<u8>,
    region_fill: Rgba<u8>,
}

impl<'a> SurfaceRasterizer<'a> {
    pub fn new(surface: &'a CompositionSurface, background: [u8; 4], region_fill: [u8; 4]) -> Self {
        Self {
            surface,
            background: Rgba(background),
            region_fill: Rgba(region_fill),
        }
    }

    fn fill(frame: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
        let x0 = rect.x().max(0.0).round() as u32;
        let y0 = rect.y().max(0.0).round() as u32;
        let x1 = (rect.right().round().max(0.0) as u32).min(frame.width());
        let y1 = (rect.bottom().round().max(0.0) as u32).min(frame.height());
        for y in y0..y1 {
            for x in x0..x1 {
                frame.put_pixel(x, y, color);
            }
        }
    }
}

impl Rasterizer for SurfaceRasterizer<'_> {
    async fn rasterize(&self, scale: f32) -> Result<RgbaImage, RasterError> {
        let (width, height) = self.surface.viewport().to_pixels(scale);
        if width == 0 || height == 0 {
            return Err(RasterError::NoData);
        }
        let mut frame = RgbaImage::from_pixel(width, height, self.background);
        Self::fill(&mut frame, self.surface.region().bounds().scaled(scale), self.region_fill);

        for placement in self.surface.placements_bottom_up() {
            let target = placement.bounds().scaled(scale);
            let (w, h) = placement.size.to_pixels(scale);
            if w == 0 || h == 0 {
                continue;
            }
            let image: &RgbaImage = placement.image();
            let scaled;
            let pixels = if image.dimensions() == (w, h) {
                image
            } else {
                scaled = imageops::resize(image, w, h, FilterType::Triangle);
                &scaled
            };
            imageops::overlay(
                &mut frame,
                pixels,
                target.x().round() as i64,
                target.y().round() as i64,
            );
        }
        debug!(width, height, scale, "composition rasterized");
        Ok(frame)
    }
}

/// Rasterize the stack at `scale` and crop out the composition region.
///
/// The result is exactly the region's logical size whatever `scale` is.
pub async fn flatten<R: Rasterizer>(surface: &CompositionSurface, rasterizer: &R, scale: f32) -> ExportResult<RgbaImage> {
    let region = surface.region().bounds();
    let frame = rasterizer.rasterize(scale).await?;
    let out = region.size.to_pixels(1.0);
    let image = crop_scaled(&frame, region, scale, out).ok_or(ExportError::OutOfFrame)?;
    info!(
        width = image.width(),
        height = image.height(),
        scale,
        "composition flattened"
    );
    Ok(image)
}

/// Blocking wrapper around `flatten` for callers outside an executor
pub fn flatten_blocking<R: Rasterizer>(surface: &CompositionSurface, rasterizer: &R, scale: f32) -> ExportResult<RgbaImage> {
    futures::executor::block_on(flatten(surface, rasterizer, scale))
}

/// Encode as PNG
pub fn encode_png(image: &RgbaImage) -> ExportResult<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Write a PNG to `path` atomically: the file either appears complete or
/// not at all.
pub fn write_png(image: &RgbaImage, path: &Path) -> ExportResult<()> {
    let bytes = encode_png(image)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.flush()?;
    file.persist(path)?;
    info!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(())
}
