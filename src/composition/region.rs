//! The composition region: the exportable page behind every placement.
//!
//! ## Resize Transitions
//!
//! ```text
//! Locked -> Unlocked             (resize mode toggled on)
//! Unlocked -> Resizing           (pointer down on a handle)
//! Resizing -> Unlocked           (pointer up)
//! Unlocked | Resizing -> Locked  (resize mode toggled off)
//! ```
//!
//! The region never translates on its own. Every size change recomputes
//! the position around the center captured when the resize began.

use crate::constants::{DEFAULT_REGION_SIZE, MIN_REGION_SIZE, RESIZE_DELTA_MULTIPLIER, RESIZE_HANDLE_SIZE};
use crate::geometry::{Extent, Point, Rect};
use crate::settings::Settings;
use tracing::{debug, trace};

/// One of the eight resize handles around the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    /// Sign applied to a horizontal delta; 0 when the handle does not affect width
    fn horizontal(&self) -> f32 {
        match self {
            ResizeHandle::Left | ResizeHandle::TopLeft | ResizeHandle::BottomLeft => -1.0,
            ResizeHandle::Right | ResizeHandle::TopRight | ResizeHandle::BottomRight => 1.0,
            ResizeHandle::Top | ResizeHandle::Bottom => 0.0,
        }
    }

    /// Sign applied to a vertical delta; 0 when the handle does not affect height
    fn vertical(&self) -> f32 {
        match self {
            ResizeHandle::Top | ResizeHandle::TopLeft | ResizeHandle::TopRight => -1.0,
            ResizeHandle::Bottom | ResizeHandle::BottomLeft | ResizeHandle::BottomRight => 1.0,
            ResizeHandle::Left | ResizeHandle::Right => 0.0,
        }
    }

    /// Anchor point of the handle on `bounds`
    pub fn anchor(&self, bounds: Rect) -> Point {
        let c = bounds.center();
        let x = match self.horizontal() {
            h if h < 0.0 => bounds.x(),
            h if h > 0.0 => bounds.right(),
            _ => c.x,
        };
        let y = match self.vertical() {
            v if v < 0.0 => bounds.y(),
            v if v > 0.0 => bounds.bottom(),
            _ => c.y,
        };
        Point::new(x, y)
    }

    pub fn cursor(&self) -> &'static str {
        match self {
            ResizeHandle::Left | ResizeHandle::Right => "ew-resize",
            ResizeHandle::Top | ResizeHandle::Bottom => "ns-resize",
            ResizeHandle::TopLeft | ResizeHandle::BottomRight => "nwse-resize",
            ResizeHandle::TopRight | ResizeHandle::BottomLeft => "nesw-resize",
        }
    }
}

/// Resize interaction state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ResizeState {
    /// Resize mode off; handles are inert
    #[default]
    Locked,

    /// Resize mode on, no handle grabbed
    Unlocked,

    /// A handle is being dragged
    Resizing {
        handle: ResizeHandle,
        /// Pointer position when the handle was grabbed
        start_pointer: Point,
        /// Size when the handle was grabbed
        start_size: Extent,
        /// Center to preserve
        center: Point,
    },
}

/// Tunables for region resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionConfig {
    pub min_size: f32,
    pub delta_multiplier: f32,
    pub handle_size: f32,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_REGION_SIZE,
            delta_multiplier: RESIZE_DELTA_MULTIPLIER,
            handle_size: RESIZE_HANDLE_SIZE,
        }
    }
}

impl From<&Settings> for RegionConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            min_size: settings.min_region_size,
            delta_multiplier: settings.resize_delta_multiplier,
            handle_size: settings.resize_handle_size,
        }
    }
}

/// The single background rectangle of the composition surface.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionRegion {
    bounds: Rect,
    config: RegionConfig,
    resize: ResizeState,
}

impl Default for CompositionRegion {
    fn default() -> Self {
        Self::new(
            Rect::new(Point::default(), Extent::from(DEFAULT_REGION_SIZE)),
            RegionConfig::default(),
        )
    }
}

impl CompositionRegion {
    pub fn new(bounds: Rect, config: RegionConfig) -> Self {
        Self {
            bounds: Rect::new(bounds.origin, bounds.size.at_least(config.min_size)),
            config,
            resize: ResizeState::Locked,
        }
    }

    /// Region of `size` centered in `viewport`
    pub fn centered(viewport: Extent, size: Extent, config: RegionConfig) -> Self {
        let mut region = Self::new(Rect::new(Point::default(), size), config);
        region.recenter(viewport);
        region
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn position(&self) -> Point {
        self.bounds.origin
    }

    pub fn size(&self) -> Extent {
        self.bounds.size
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    pub fn resize_state(&self) -> ResizeState {
        self.resize
    }

    pub fn is_resize_mode(&self) -> bool {
        !matches!(self.resize, ResizeState::Locked)
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.resize, ResizeState::Resizing { .. })
    }

    /// Toggle resize mode; returns the new mode
    pub fn toggle_resize_mode(&mut self) -> bool {
        self.set_resize_mode(!self.is_resize_mode());
        self.is_resize_mode()
    }

    pub fn set_resize_mode(&mut self, enabled: bool) {
        self.resize = if enabled {
            ResizeState::Unlocked
        } else {
            ResizeState::Locked
        };
        debug!(enabled, "region resize mode");
    }

    /// Handle under `point`, if resize mode is on
    pub fn handle_at(&self, point: Point) -> Option<ResizeHandle> {
        if !self.is_resize_mode() {
            return None;
        }
        let half = self.config.handle_size / 2.0;
        // Corners first so they win over the edges they overlap
        let mut handles = ResizeHandle::ALL;
        handles.reverse();
        handles.into_iter().find(|h| {
            let anchor = h.anchor(self.bounds);
            (point.x - anchor.x).abs() <= half && (point.y - anchor.y).abs() <= half
        })
    }

    /// Grab `handle` at `pointer`. Ignored unless resize mode is on.
    pub fn begin_resize(&mut self, handle: ResizeHandle, pointer: Point) -> bool {
        if !matches!(self.resize, ResizeState::Unlocked) {
            return false;
        }
        debug!(?handle, "region resize started");
        self.resize = ResizeState::Resizing {
            handle,
            start_pointer: pointer,
            start_size: self.bounds.size,
            center: self.bounds.center(),
        };
        true
    }

    /// Follow the pointer during a resize. Sizes are computed from the
    /// grab position, not accumulated per move.
    pub fn update_resize(&mut self, pointer: Point) {
        let ResizeState::Resizing {
            handle,
            start_pointer,
            start_size,
            center,
        } = self.resize
        else {
            return;
        };
        let delta = pointer - start_pointer;
        let size = self.resized(start_size, handle, delta);
        self.bounds = Rect::centered_at(center, size);
        trace!(width = size.width, height = size.height, "region resized");
    }

    pub fn end_resize(&mut self) {
        if self.is_resizing() {
            debug!(
                width = self.bounds.width(),
                height = self.bounds.height(),
                "region resize finished"
            );
            self.resize = ResizeState::Unlocked;
        }
    }

    /// Apply one resize step of `delta` along `handle`, keeping the center.
    /// Ignored unless resize mode is on.
    pub fn resize_by(&mut self, handle: ResizeHandle, delta: Point) -> bool {
        if !self.is_resize_mode() {
            return false;
        }
        let center = self.bounds.center();
        let size = self.resized(self.bounds.size, handle, delta);
        self.bounds = Rect::centered_at(center, size);
        true
    }

    fn resized(&self, from: Extent, handle: ResizeHandle, delta: Point) -> Extent {
        let m = self.config.delta_multiplier;
        Extent::new(
            (from.width + handle.horizontal() * delta.x * m).max(self.config.min_size),
            (from.height + handle.vertical() * delta.y * m).max(self.config.min_size),
        )
    }

    /// Center the region in `viewport` at its current size. A resize in
    /// progress continues around the new center.
    pub fn recenter(&mut self, viewport: Extent) {
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.bounds = Rect::centered_at(center, self.bounds.size);
        if let ResizeState::Resizing { center: anchor, .. } = &mut self.resize {
            *anchor = center;
        }
        debug!(
            x = self.bounds.x(),
            y = self.bounds.y(),
            "region recentered"
        );
    }
}
