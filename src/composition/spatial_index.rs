//! R-tree hit testing for placements on the composition surface.

use super::surface::PlacementId;
use crate::geometry::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// Bounding box of one placement.
#[derive(Debug, Clone, Copy)]
struct SpatialEntry {
    id: PlacementId,
    bounds: Rect,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.x(), self.bounds.y()],
            [self.bounds.right(), self.bounds.bottom()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Point and range queries over placement bounds.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<PlacementId, SpatialEntry>,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the bounds of `id`
    pub fn insert(&mut self, id: PlacementId, bounds: Rect) {
        if let Some(old) = self.entries.remove(&id) {
            self.tree.remove(&old);
        }
        let entry = SpatialEntry { id, bounds };
        self.tree.insert(entry);
        self.entries.insert(id, entry);
    }

    pub fn remove(&mut self, id: PlacementId) -> bool {
        match self.entries.remove(&id) {
            Some(entry) => {
                self.tree.remove(&entry);
                true
            }
            None => false,
        }
    }

    /// Placements whose bounds contain `point`, in no particular order
    pub fn query_point(&self, point: Point) -> Vec<PlacementId> {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([point.x, point.y]))
            .filter(|entry| entry.bounds.contains(point))
            .map(|entry| entry.id)
            .collect()
    }

    /// Placements intersecting `rect`
    pub fn query_rect(&self, rect: Rect) -> Vec<PlacementId> {
        let envelope = AABB::from_corners([rect.x(), rect.y()], [rect.right(), rect.bottom()]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
