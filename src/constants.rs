//! Interaction-wide constants.
//!
//! Centralizes thresholds, durations and default dimensions so every
//! gesture recognizer reads from one place. `Settings` uses these as its
//! defaults.

// ============================================================================
// Drag & Drop
// ============================================================================

/// Minimum pointer displacement before a press-and-move becomes a drag
pub const DRAG_START_THRESHOLD: f32 = 5.0;

// ============================================================================
// Capture
// ============================================================================

/// Selections narrower or shorter than this are discarded
pub const MIN_SELECTION_SIZE: f32 = 5.0;

/// Offset applied to a new cutout so it does not cover the area it was cut from
pub const CAPTURE_OFFSET: (f32, f32) = (20.0, 20.0);

/// Scale factor used when rasterizing the workspace for a capture
pub const CAPTURE_SCALE: f32 = 1.0;

/// Smallest width/height a cutout is ever displayed at
pub const MIN_CUTOUT_SIZE: f32 = 5.0;

// ============================================================================
// Dwell Gesture
// ============================================================================

/// How long a cutout must be held over a transition target, in milliseconds
pub const DWELL_HOLD_MS: u64 = 500;

/// Interval at which the host should poll the dwell recognizer, in milliseconds
pub const DWELL_POLL_MS: u64 = 50;

/// Scale applied to the transition target while a hold is in progress
pub const DWELL_AFFORDANCE_SCALE: f32 = 1.25;

// ============================================================================
// Composition Region
// ============================================================================

/// Default composition region size (portrait page)
pub const DEFAULT_REGION_SIZE: (f32, f32) = (600.0, 800.0);

/// Minimum width/height of the composition region
pub const MIN_REGION_SIZE: f32 = 100.0;

/// Multiplier applied to a handle's drag delta before it is added to the extent
pub const RESIZE_DELTA_MULTIPLIER: f32 = 1.0;

/// Size of a resize handle's hit area in pixels
pub const RESIZE_HANDLE_SIZE: f32 = 12.0;

// ============================================================================
// Export
// ============================================================================

/// Supersampling factor used when rasterizing the composition for export
pub const EXPORT_SCALE: f32 = 2.0;

/// Default viewport for headless sessions
pub const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 1024.0);

// ============================================================================
// Colors (RGBA)
// ============================================================================

/// Composition surface backdrop (gray-800)
pub const SURFACE_BACKGROUND: [u8; 4] = [0x1f, 0x29, 0x37, 0xff];

/// Composition region fill
pub const REGION_FILL: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

// ============================================================================
// Notifications
// ============================================================================

/// Maximum number of toasts kept at once
pub const MAX_TOASTS: usize = 5;
