//! Drag payloads.

use crate::collections::{CollectionSummary, PageRecord};
use crate::cutout::{Cutout, CutoutId};
use crate::geometry::{Extent, Point};
use serde::{Deserialize, Serialize};

/// Kind tag of a drag payload, used by drop rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadKind {
    Collection,
    Cutout,
    Page,
    Magazine,
}

/// Reference to a collection in the store.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionRef {
    pub id: String,
    pub title: String,
    pub cover_image_ref: Option<String>,
}

impl From<&CollectionSummary> for CollectionRef {
    fn from(summary: &CollectionSummary) -> Self {
        Self {
            id: summary.id.clone(),
            title: summary.name.clone(),
            cover_image_ref: summary.cover_image_ref.clone(),
        }
    }
}

/// Snapshot of a cutout taken when its drag started.
///
/// Readiness is deliberately not part of the snapshot: the cutout may finish
/// materializing mid-drag, so consumers look it up by id.
#[derive(Clone, Debug, PartialEq)]
pub struct CutoutRef {
    pub id: CutoutId,
    pub position: Point,
    pub size: Extent,
}

impl From<&Cutout> for CutoutRef {
    fn from(cutout: &Cutout) -> Self {
        Self {
            id: cutout.id,
            position: cutout.position,
            size: cutout.display_size(),
        }
    }
}

/// Reference to a single page of a collection.
#[derive(Clone, Debug, PartialEq)]
pub struct PageRef {
    pub collection_id: String,
    pub page: PageRecord,
}

/// What is being dragged. Immutable once the drag starts.
#[derive(Clone, Debug, PartialEq)]
pub enum DragPayload {
    Collection(CollectionRef),
    Cutout(CutoutRef),
    Page(PageRef),
    Magazine(CollectionRef),
}

/// What the host should draw under the pointer while dragging.
#[derive(Clone, Debug, PartialEq)]
pub enum DragPreview {
    /// Cover card with title and optional image
    Cover {
        title: String,
        image_ref: Option<String>,
    },
    /// The cutout itself follows the pointer; no separate preview
    None,
    /// Page thumbnail
    Page { content: String },
}

impl DragPayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            DragPayload::Collection(_) => PayloadKind::Collection,
            DragPayload::Cutout(_) => PayloadKind::Cutout,
            DragPayload::Page(_) => PayloadKind::Page,
            DragPayload::Magazine(_) => PayloadKind::Magazine,
        }
    }

    /// Identifier of the dragged thing, unique within its kind
    pub fn id(&self) -> String {
        match self {
            DragPayload::Collection(c) | DragPayload::Magazine(c) => c.id.clone(),
            DragPayload::Cutout(c) => c.id.to_string(),
            DragPayload::Page(p) => p.page.id.clone(),
        }
    }

    pub fn as_cutout(&self) -> Option<&CutoutRef> {
        match self {
            DragPayload::Cutout(c) => Some(c),
            _ => None,
        }
    }

    pub fn preview(&self) -> DragPreview {
        match self {
            DragPayload::Collection(c) | DragPayload::Magazine(c) => DragPreview::Cover {
                title: c.title.clone(),
                image_ref: c.cover_image_ref.clone(),
            },
            DragPayload::Cutout(_) => DragPreview::None,
            DragPayload::Page(p) => DragPreview::Page {
                content: p.page.content.clone(),
            },
        }
    }
}
