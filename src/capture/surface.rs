//! The capture surface's cutout collection.

use crate::cutout::{Cutout, CutoutId};
use crate::geometry::Point;
use tracing::debug;

/// Cutouts living on the capture surface, bottom-most first.
#[derive(Debug, Default)]
pub struct CaptureSurface {
    cutouts: Vec<Cutout>,
}

impl CaptureSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cutout: Cutout) -> CutoutId {
        let id = cutout.id;
        self.cutouts.push(cutout);
        id
    }

    pub fn get(&self, id: CutoutId) -> Option<&Cutout> {
        self.cutouts.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CutoutId) -> Option<&mut Cutout> {
        self.cutouts.iter_mut().find(|c| c.id == id)
    }

    /// Remove a cutout, handing ownership to the caller
    pub fn remove(&mut self, id: CutoutId) -> Option<Cutout> {
        let index = self.cutouts.iter().position(|c| c.id == id)?;
        debug!(cutout = %id, "cutout removed from capture surface");
        Some(self.cutouts.remove(index))
    }

    pub fn cutouts(&self) -> &[Cutout] {
        &self.cutouts
    }

    pub fn len(&self) -> usize {
        self.cutouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cutouts.is_empty()
    }

    /// Top-most cutout under `point`
    pub fn cutout_at(&self, point: Point) -> Option<&Cutout> {
        self.cutouts.iter().rev().find(|c| c.bounds().contains(point))
    }

    pub fn move_cutout(&mut self, id: CutoutId, position: Point) -> bool {
        match self.get_mut(id) {
            Some(cutout) => {
                cutout.move_to(position);
                true
            }
            None => false,
        }
    }
}
