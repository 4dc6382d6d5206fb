//! Hit testing - which element lies under a canvas point.
//!
//! ## Performance Notes
//!
//! Candidates come from the R-tree in [`SpatialIndex`], so only layers whose
//! reach box contains the point are examined in detail. The index is rebuilt
//! lazily, the first time a query sees a collection it has not indexed yet.

use crate::geometry::{HandleGeometry, Point};
use crate::input::ElementId;
use crate::profile_scope;
use crate::spatial_index::SpatialIndex;
use crate::types::{LayerCollection, LayerId};
use std::collections::HashSet;
use tracing::trace;

/// Hit tester with a lazily refreshed spatial index.
pub struct HitTester {
    index: SpatialIndex,
    indexed: Option<LayerCollection>,
    handles: HandleGeometry,
}

impl HitTester {
    pub fn new(handles: HandleGeometry) -> Self {
        Self {
            index: SpatialIndex::new(),
            indexed: None,
            handles,
        }
    }

    pub fn handles(&self) -> &HandleGeometry {
        &self.handles
    }

    /// Change handle layout; the index is rebuilt on the next query.
    pub fn set_handles(&mut self, handles: HandleGeometry) {
        if self.handles != handles {
            self.handles = handles;
            self.indexed = None;
        }
    }

    fn refresh(&mut self, layers: &LayerCollection) {
        if self.indexed.as_ref().is_some_and(|indexed| indexed.same_as(layers)) {
            return;
        }
        profile_scope!("rebuild_spatial_index");
        self.index = SpatialIndex::from_layers(layers, &self.handles);
        self.indexed = Some(layers.clone());
        trace!(layers = layers.len(), "Spatial index rebuilt");
    }

    /// Topmost element under `p` (canvas coordinates).
    ///
    /// Later layers are on top. Within a layer, the rotate handle wins over the
    /// resize handle, which wins over the body. `None` means bare canvas.
    pub fn hit_test(&mut self, layers: &LayerCollection, p: Point) -> Option<ElementId> {
        profile_scope!("hit_test");
        self.refresh(layers);

        let candidates: HashSet<LayerId> = self.index.query_point(p.x, p.y).into_iter().collect();
        if candidates.is_empty() {
            return None;
        }

        let handles = &self.handles;
        layers
            .iter()
            .rev()
            .filter(|layer| candidates.contains(&layer.id))
            .find_map(|layer| {
                if handles.hits_rotate_handle(layer, p) {
                    Some(ElementId::RotateHandle(layer.id))
                } else if handles.hits_resize_handle(layer, p) {
                    Some(ElementId::ResizeHandle(layer.id))
                } else if layer.contains(p) {
                    Some(ElementId::Layer(layer.id))
                } else {
                    None
                }
            })
    }
}

impl Default for HitTester {
    fn default() -> Self {
        Self::new(HandleGeometry::default())
    }
}
