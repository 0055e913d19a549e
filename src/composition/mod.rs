//! Composition surface.
//!
//! A size-constrained page (the region) with ready cutouts placed on top of
//! it. The draw list always keeps the region at the bottom; placements stack
//! in insertion order unless brought to front.

mod region;
mod spatial_index;
mod surface;

pub use region::{CompositionRegion, RegionConfig, ResizeHandle, ResizeState};
pub use spatial_index::SpatialIndex;
pub use surface::{CompositionSurface, Layer, Placement, PlacementId};
