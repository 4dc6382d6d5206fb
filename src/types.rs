//! Core types for the layer canvas.
//!
//! A [`LayerCollection`] is an immutable, cheaply clonable sequence of
//! [`Layer`]s. Transitions build a new collection and leave the old one
//! untouched, so any holder of a previous collection keeps a consistent view.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Stable identifier of a layer for its whole lifetime.
pub type LayerId = u64;

/// A rectangle on the canvas.
///
/// `position_x`/`position_y` are the top-left corner of the unrotated
/// rectangle, in canvas pixels. `rotate` is in radians, clockwise on screen
/// (y grows downward), and turns the rectangle about its center. Hit testing
/// and [`Layer::corners`] use that convention, so a renderer must use the
/// center, not the top-left corner, as its transform origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub width: f32,
    pub height: f32,
    pub position_x: f32,
    pub position_y: f32,
    #[serde(default)]
    pub rotate: f32,
}

impl Layer {
    /// Unrotated layer at `position` with `size`.
    pub fn new(id: LayerId, position: (f32, f32), size: (f32, f32)) -> Self {
        Self {
            id,
            width: size.0,
            height: size.1,
            position_x: position.0,
            position_y: position.1,
            rotate: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotate: f32) -> Self {
        self.rotate = rotate;
        self
    }

    /// The geometric fields a gesture snapshot records.
    pub fn transform(&self) -> Transform {
        Transform {
            width: self.width,
            height: self.height,
            position_x: self.position_x,
            position_y: self.position_y,
            rotate: self.rotate,
        }
    }
}

/// Geometry of a layer captured at gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub width: f32,
    pub height: f32,
    pub position_x: f32,
    pub position_y: f32,
    pub rotate: f32,
}

/// Ordered layers with unique ids.
///
/// Insertion order is kept for iteration; it carries no meaning for the
/// engine. Clones share storage, and [`LayerCollection::same_as`] tells
/// whether two values are the same storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerCollection {
    layers: Arc<[Layer]>,
}

impl LayerCollection {
    /// Build a collection, rejecting duplicated ids.
    pub fn new(layers: impl IntoIterator<Item = Layer>) -> Result<Self, BoardError> {
        let layers: Vec<Layer> = layers.into_iter().collect();
        let mut seen = HashSet::with_capacity(layers.len());
        for layer in &layers {
            if !seen.insert(layer.id) {
                return Err(BoardError::DuplicateLayerId(layer.id));
            }
        }
        Ok(Self {
            layers: layers.into(),
        })
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.iter().map(|layer| layer.id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn as_slice(&self) -> &[Layer] {
        &self.layers
    }

    /// True if both values share the same storage.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.layers, &other.layers)
    }

    /// Copy-on-write update: `f` returns a replacement for the layers it
    /// changes. When it replaces nothing, the same storage is returned.
    pub(crate) fn map_changed(&self, mut f: impl FnMut(&Layer) -> Option<Layer>) -> Self {
        let mut next: Option<Vec<Layer>> = None;
        for (index, layer) in self.layers.iter().enumerate() {
            let Some(updated) = f(layer) else { continue };
            if updated == *layer {
                continue;
            }
            next.get_or_insert_with(|| self.layers.to_vec())[index] = updated;
        }
        match next {
            Some(layers) => Self {
                layers: layers.into(),
            },
            None => self.clone(),
        }
    }

    /// New collection with `layer` appended. Caller guarantees the id is free.
    pub(crate) fn appended(&self, layer: Layer) -> Self {
        let mut layers = self.layers.to_vec();
        layers.push(layer);
        Self {
            layers: layers.into(),
        }
    }
}

impl<'a> IntoIterator for &'a LayerCollection {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
