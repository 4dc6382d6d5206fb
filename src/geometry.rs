//! Geometry primitives and queries for layers and their handles.
//!
//! Layers are axis-aligned rectangles in their own local frame, rotated by
//! `rotate` radians about their center. Every query here works by mapping a
//! point into that local frame, so hit tests follow the layer's rotation.

use crate::constants::{HANDLE_HIT_MARGIN, HANDLE_SIZE, ROTATE_HANDLE_OFFSET};
use crate::types::Layer;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::ops::{Add, Sub};

/// A point (or offset) in canvas or client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Shorthand constructor for [`Point`].
#[inline]
pub const fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rotate this point by `theta` radians around `center`.
    pub fn rotate_around(self, center: Point, theta: f32) -> Point {
        if theta == 0.0 {
            return self;
        }
        let (sin, cos) = theta.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        point(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        point(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        point(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Angle of `pointer` as seen from `pivot`, in `(-π, π]`.
///
/// Rotate gestures call this with the live pointer position on every move
/// rather than accumulating deltas, so the layer follows the pointer exactly.
pub fn rotation_angle(pivot: Point, pointer: Point) -> f32 {
    let angle = (pointer.y - pivot.y).atan2(pointer.x - pivot.x);
    // atan2(-0.0, negative) yields -π; fold it onto the closed end of the range
    if angle <= -PI { PI } else { angle }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Smallest box containing every point. Returns `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |acc, p| Self {
            min: point(acc.min.x.min(p.x), acc.min.y.min(p.y)),
            max: point(acc.max.x.max(p.x), acc.max.y.max(p.y)),
        }))
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(self, amount: f32) -> Self {
        Self {
            min: point(self.min.x - amount, self.min.y - amount),
            max: point(self.max.x + amount, self.max.y + amount),
        }
    }

    /// Square of half-extent `half` centered on `center`.
    pub fn around(center: Point, half: f32) -> Self {
        Self {
            min: point(center.x - half, center.y - half),
            max: point(center.x + half, center.y + half),
        }
    }
}

impl Layer {
    /// Rotation pivot: the center of the unrotated rectangle.
    pub fn center(&self) -> Point {
        point(
            self.position_x + self.width / 2.0,
            self.position_y + self.height / 2.0,
        )
    }

    /// Corners after rotation, clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        let center = self.center();
        let (x, y, w, h) = (self.position_x, self.position_y, self.width, self.height);
        [point(x, y), point(x + w, y), point(x + w, y + h), point(x, y + h)]
            .map(|corner| corner.rotate_around(center, self.rotate))
    }

    /// Axis-aligned bounds of the rotated rectangle.
    pub fn bounds(&self) -> Bounds {
        let [a, b, c, d] = self.corners();
        // Four points are never empty; the fallback only keeps the signature total
        Bounds::from_points([a, b, c, d]).unwrap_or(Bounds { min: a, max: a })
    }

    /// Map a canvas point into this layer's unrotated frame.
    pub fn to_local(&self, p: Point) -> Point {
        p.rotate_around(self.center(), -self.rotate)
    }

    /// True if `p` lies on the layer body. Negative sizes are normalized.
    pub fn contains(&self, p: Point) -> bool {
        let local = self.to_local(p);
        let (x0, x1) = ordered(self.position_x, self.position_x + self.width);
        let (y0, y1) = ordered(self.position_y, self.position_y + self.height);
        local.x >= x0 && local.x <= x1 && local.y >= y0 && local.y <= y1
    }
}

#[inline]
fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Handle layout and hit tolerance.
///
/// The resize handle sits on the bottom-right corner. The rotate handle sits
/// beyond the middle of the right edge, so grabbing it at rest reads as angle 0
/// and the layer does not jump when a rotate gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleGeometry {
    /// Visual edge length of a handle
    pub size: f32,
    /// Invisible margin accepted around a handle
    pub hit_margin: f32,
    /// Distance from the right edge to the rotate handle
    pub rotate_offset: f32,
}

impl Default for HandleGeometry {
    fn default() -> Self {
        Self {
            size: HANDLE_SIZE,
            hit_margin: HANDLE_HIT_MARGIN,
            rotate_offset: ROTATE_HANDLE_OFFSET,
        }
    }
}

impl HandleGeometry {
    /// Half-extent of the hit square around a handle center
    #[inline]
    pub fn reach(&self) -> f32 {
        self.size / 2.0 + self.hit_margin
    }

    fn resize_handle_local(&self, layer: &Layer) -> Point {
        point(layer.position_x + layer.width, layer.position_y + layer.height)
    }

    fn rotate_handle_local(&self, layer: &Layer) -> Point {
        point(
            layer.position_x + layer.width + self.rotate_offset,
            layer.position_y + layer.height / 2.0,
        )
    }

    pub fn resize_handle_center(&self, layer: &Layer) -> Point {
        self.resize_handle_local(layer)
            .rotate_around(layer.center(), layer.rotate)
    }

    pub fn rotate_handle_center(&self, layer: &Layer) -> Point {
        self.rotate_handle_local(layer)
            .rotate_around(layer.center(), layer.rotate)
    }

    pub fn hits_resize_handle(&self, layer: &Layer, p: Point) -> bool {
        Bounds::around(self.resize_handle_local(layer), self.reach()).contains(layer.to_local(p))
    }

    pub fn hits_rotate_handle(&self, layer: &Layer, p: Point) -> bool {
        Bounds::around(self.rotate_handle_local(layer), self.reach()).contains(layer.to_local(p))
    }

    /// Bounds covering the layer body and both handle hit squares.
    pub fn reach_bounds(&self, layer: &Layer) -> Bounds {
        let reach = self.reach();
        let body = layer.bounds();
        let handles = [self.resize_handle_center(layer), self.rotate_handle_center(layer)]
            .into_iter()
            .flat_map(|c| {
                let b = Bounds::around(c, reach);
                [b.min, b.max]
            });
        Bounds::from_points([body.min, body.max].into_iter().chain(handles))
            .unwrap_or(body)
            // rotated handle squares poke out of their axis-aligned box by up to √2
            .inflate(reach * (std::f32::consts::SQRT_2 - 1.0))
    }
}
