//! Drag-and-drop coordination.
//!
//! A single drag session is shared by every surface. Drop zones and the
//! dwell recognizer read it; only the `DragCoordinator` writes it.
//!
//! ## Flow
//!
//! ```text
//! press  -> DragGesture::Armed        (payload chosen, nothing visible yet)
//! move   -> displacement > threshold  -> DragCoordinator::start_drag
//! move   -> DragCoordinator::update_position, zones update hover
//! release-> DropZoneRegistry::release -> DragCoordinator::end_drag
//! ```
//!
//! ## Modules
//!
//! - `payload` - Tagged drag payloads and their kinds
//! - `rules` - Static drop rules (target kind -> accepted payload kinds)
//! - `coordinator` - The drag session and its single writer
//! - `gesture` - Press-and-move discrimination before a drag starts
//! - `drop_zone` - Regions that accept payloads on release

mod coordinator;
mod drop_zone;
mod gesture;
mod payload;
mod rules;

pub use coordinator::{DragCoordinator, DragSession};
pub use drop_zone::{DropZone, DropZoneRegistry, ZoneId};
pub use gesture::{DragGesture, GestureStep};
pub use payload::{CollectionRef, CutoutRef, DragPayload, DragPreview, PageRef, PayloadKind};
pub use rules::{DropRule, TargetKind};
