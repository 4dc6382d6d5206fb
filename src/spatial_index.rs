//! Spatial Index Module
//!
//! R-tree over the reach of every layer (body plus handle hit squares), so
//! pointer hit tests only inspect layers whose box contains the point.

use crate::geometry::{Bounds, HandleGeometry};
use crate::types::{Layer, LayerId};
use rstar::{AABB, RTree, RTreeObject};

/// A layer's axis-aligned reach box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub layer_id: LayerId,
    pub bounds: Bounds,
}

impl SpatialEntry {
    pub fn new(layer: &Layer, handles: &HandleGeometry) -> Self {
        Self {
            layer_id: layer.id,
            bounds: handles.reach_bounds(layer),
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min.x, self.bounds.min.y],
            [self.bounds.max.x, self.bounds.max.y],
        )
    }
}

/// Spatial index of layer reach boxes.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build an index over `layers` in one bulk load.
    pub fn from_layers<'a>(
        layers: impl IntoIterator<Item = &'a Layer>,
        handles: &HandleGeometry,
    ) -> Self {
        let entries: Vec<SpatialEntry> = layers
            .into_iter()
            .map(|layer| SpatialEntry::new(layer, handles))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Layers whose reach box contains the point, in no particular order.
    pub fn query_point(&self, x: f32, y: f32) -> Vec<LayerId> {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .map(|entry| entry.layer_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
