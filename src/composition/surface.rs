//! The layered composition surface.

use super::region::CompositionRegion;
use super::spatial_index::SpatialIndex;
use crate::cutout::{Cutout, CutoutId};
use crate::geometry::{Extent, Point, Rect};
use image::RgbaImage;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Identifier of a placement, unique within one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementId(pub u64);

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A cutout placed on the composition surface.
#[derive(Debug, Clone)]
pub struct Placement {
    pub id: PlacementId,
    /// Cutout this placement was created from
    pub source: CutoutId,
    pub position: Point,
    pub size: Extent,
    image: Arc<RgbaImage>,
}

impl Placement {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn image(&self) -> &Arc<RgbaImage> {
        &self.image
    }
}

/// One entry of the draw list, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Region,
    Placement(PlacementId),
}

impl Layer {
    fn tier(&self) -> u8 {
        match self {
            Layer::Region => 0,
            Layer::Placement(_) => 1,
        }
    }
}

/// Composition region plus the placements arranged on it.
#[derive(Debug)]
pub struct CompositionSurface {
    region: CompositionRegion,
    placements: Vec<Placement>,
    layers: Vec<Layer>,
    selected: Option<PlacementId>,
    index: SpatialIndex,
    viewport: Extent,
    next_id: u64,
}

impl CompositionSurface {
    /// A surface showing `region` recentered in `viewport`
    pub fn new(mut region: CompositionRegion, viewport: Extent) -> Self {
        region.recenter(viewport);
        Self {
            region,
            placements: Vec::new(),
            layers: vec![Layer::Region],
            selected: None,
            index: SpatialIndex::new(),
            viewport,
            next_id: 1,
        }
    }

    pub fn region(&self) -> &CompositionRegion {
        &self.region
    }

    /// Region access for resize interactions
    pub fn region_mut(&mut self) -> &mut CompositionRegion {
        &mut self.region
    }

    pub fn viewport(&self) -> Extent {
        self.viewport
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn selected(&self) -> Option<PlacementId> {
        self.selected
    }

    /// Draw list, bottom first
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Take ownership of a ready cutout and place it at `position`.
    ///
    /// Pending cutouts have no pixels to place and are handed back.
    pub fn insert_cutout(&mut self, cutout: Cutout, position: Point) -> Result<PlacementId, Box<Cutout>> {
        let Some(image) = cutout.image().cloned() else {
            warn!(cutout = %cutout.id, "refusing to place a pending cutout");
            return Err(Box::new(cutout));
        };
        let id = PlacementId(self.next_id);
        self.next_id += 1;

        let placement = Placement {
            id,
            source: cutout.id,
            position,
            size: cutout.display_size(),
            image,
        };
        self.index.insert(id, placement.bounds());
        self.placements.push(placement);
        self.layers.push(Layer::Placement(id));
        debug!(placement = %id, cutout = %cutout.id, "cutout placed");
        self.enforce_layering();
        Ok(id)
    }

    pub fn move_placement(&mut self, id: PlacementId, position: Point) -> bool {
        let Some(placement) = self.placements.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        placement.position = position;
        let bounds = placement.bounds();
        self.index.insert(id, bounds);
        self.enforce_layering();
        true
    }

    /// Change the selection; `None` clears it
    pub fn select(&mut self, id: Option<PlacementId>) {
        self.selected = id.filter(|id| self.placement(*id).is_some());
        self.enforce_layering();
    }

    /// Restack a placement above every other placement
    pub fn bring_to_front(&mut self, id: PlacementId) -> bool {
        let Some(index) = self.layers.iter().position(|l| *l == Layer::Placement(id)) else {
            return false;
        };
        let layer = self.layers.remove(index);
        self.layers.push(layer);
        debug!(placement = %id, "brought to front");
        self.enforce_layering();
        true
    }

    pub fn remove(&mut self, id: PlacementId) -> Option<Placement> {
        let index = self.placements.iter().position(|p| p.id == id)?;
        let placement = self.placements.remove(index);
        self.layers.retain(|l| *l != Layer::Placement(id));
        self.index.remove(id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        debug!(placement = %id, "placement removed");
        self.enforce_layering();
        Some(placement)
    }

    /// Top-most placement under `point`
    pub fn hit_test(&self, point: Point) -> Option<PlacementId> {
        let hits = self.index.query_point(point);
        self.layers.iter().rev().find_map(|layer| match layer {
            Layer::Placement(id) if hits.contains(id) => Some(*id),
            _ => None,
        })
    }

    /// Placements intersecting `rect`, bottom first
    pub fn placements_in(&self, rect: Rect) -> Vec<PlacementId> {
        let hits = self.index.query_rect(rect);
        self.placements_bottom_up()
            .map(|p| p.id)
            .filter(|id| hits.contains(id))
            .collect()
    }

    /// Placements in draw order, bottom first
    pub fn placements_bottom_up(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Placement(id) => self.placement(*id),
            Layer::Region => None,
        })
    }

    /// Host window changed size: recenter the region at its current size
    pub fn viewport_resized(&mut self, viewport: Extent) {
        self.viewport = viewport;
        self.region.recenter(viewport);
    }

    /// Re-check the draw list after a structural change: the region is the
    /// single bottom layer, placements keep their relative order.
    fn enforce_layering(&mut self) {
        let ordered = self.layers.first() == Some(&Layer::Region)
            && self.layers.windows(2).all(|w| w[0].tier() <= w[1].tier());
        debug_assert!(ordered, "region left the bottom of the draw list: {:?}", self.layers);
        if !ordered {
            trace!("restoring region to the bottom of the draw list");
            self.layers.retain(|l| *l != Layer::Region);
            self.layers.insert(0, Layer::Region);
        }
    }

    /// Textual dump of the draw list, bottom first; `*` marks the selection
    pub fn describe_layers(&self) -> String {
        let mut out = String::new();
        for layer in &self.layers {
            match layer {
                Layer::Region => {
                    let b = self.region.bounds();
                    let _ = writeln!(out, "region {}x{} at {},{}", b.width(), b.height(), b.x(), b.y());
                }
                Layer::Placement(id) => {
                    let marker = if self.selected == Some(*id) { "*" } else { "" };
                    if let Some(p) = self.placement(*id) {
                        let _ = writeln!(
                            out,
                            "placement {}{} {}x{} at {},{}",
                            id,
                            marker,
                            p.size.width,
                            p.size.height,
                            p.position.x,
                            p.position.y
                        );
                    }
                }
            }
        }
        out
    }
}
