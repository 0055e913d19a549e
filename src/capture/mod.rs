//! Region capture: selection gestures on the capture surface, the pipeline
//! that turns them into cutouts, and the surface holding those cutouts.

mod pipeline;
mod selection;
mod surface;

pub use pipeline::{CaptureConfig, CaptureJob, CaptureOutcome, CapturePhase, CapturePipeline};
pub use selection::{Lasso, Selection, SelectionRect};
pub use surface::CaptureSurface;
