//! Collage - interaction core for clipping cutouts out of a workspace and
//! composing them into a single flattened image.
//!
//! Rendering and windowing belong to the host. This crate owns the state
//! machines in between: the drag session and its drop zones, the capture
//! pipeline, the dwell gesture that carries a cutout across surfaces, the
//! layered composition surface, and export cropping.
//!
//! Most hosts only need [`studio::Studio`], which wires everything to
//! pointer events and poll ticks.

pub mod capture;
pub mod collections;
pub mod composition;
pub mod constants;
pub mod cutout;
pub mod dnd;
pub mod dwell;
pub mod error;
pub mod export;
pub mod geometry;
pub mod logging;
pub mod notifications;
pub mod pointer;
pub mod raster;
pub mod settings;
pub mod studio;
pub mod tool;
