//! Cutout entity - a rasterized clipping of the workspace.
//!
//! A cutout is published the moment a selection is committed, before any
//! pixels exist. Until rasterization delivers its image it stays *pending*;
//! a failed rasterization leaves it pending so the capture can be retried.

use crate::constants::MIN_CUTOUT_SIZE;
use crate::geometry::{Extent, Point, Rect};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier of a cutout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CutoutId(Uuid);

impl CutoutId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CutoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CutoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Materialization state of a cutout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CutoutStatus {
    /// Waiting for rasterized pixels
    Pending,
    /// Pixels are available
    Ready,
}

/// A clipping carried on the capture surface.
#[derive(Clone, Debug)]
pub struct Cutout {
    pub id: CutoutId,
    /// Rasterized pixels; `None` while materializing
    image: Option<Arc<RgbaImage>>,
    pub position: Point,
    pub size: Extent,
}

impl Cutout {
    /// Create a cutout in the pending state
    pub fn pending(position: Point, size: Extent) -> Self {
        Self {
            id: CutoutId::new(),
            image: None,
            position,
            size,
        }
    }

    pub fn status(&self) -> CutoutStatus {
        if self.image.is_some() {
            CutoutStatus::Ready
        } else {
            CutoutStatus::Pending
        }
    }

    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.image.is_none()
    }

    pub fn image(&self) -> Option<&Arc<RgbaImage>> {
        self.image.as_ref()
    }

    /// Store the rasterized pixels, moving the cutout to `Ready`
    pub fn materialize(&mut self, image: RgbaImage) {
        self.image = Some(Arc::new(image));
    }

    /// Size used for display, never below the minimum cutout size
    pub fn display_size(&self) -> Extent {
        self.size.at_least(MIN_CUTOUT_SIZE)
    }

    /// Screen-space bounds using the display size
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.display_size())
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Encode the pixels as a `data:image/png;base64,` URL.
    ///
    /// Returns `None` while the cutout is still pending.
    pub fn data_url(&self) -> Option<String> {
        let image = self.image.as_ref()?;
        let mut bytes = Cursor::new(Vec::new());
        if let Err(e) = image.write_to(&mut bytes, ImageFormat::Png) {
            tracing::warn!(cutout = %self.id, "failed to encode cutout as PNG: {}", e);
            return None;
        }
        Some(format!(
            "data:image/png;base64,{}",
            STANDARD.encode(bytes.into_inner())
        ))
    }
}
