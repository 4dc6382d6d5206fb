//! Coordinate conversion between client (host) and canvas space.
//!
//! Pointer events arrive in client pixels. Layers live in canvas pixels,
//! offset by the canvas origin and scaled by zoom.

use crate::constants::DEFAULT_ZOOM;
use crate::geometry::{Point, point};

/// Placement of the canvas inside the host's client area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    /// Client position of canvas (0, 0)
    pub origin: Point,
    pub zoom: f32,
}

impl Default for CanvasFrame {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl CanvasFrame {
    #[inline]
    pub fn new(origin: Point, zoom: f32) -> Self {
        Self { origin, zoom }
    }

    /// Convert client position to canvas position
    #[inline]
    pub fn client_to_canvas(&self, client: Point) -> Point {
        point(
            (client.x - self.origin.x) / self.zoom,
            (client.y - self.origin.y) / self.zoom,
        )
    }

    /// Convert canvas position to client position
    #[inline]
    pub fn canvas_to_client(&self, canvas: Point) -> Point {
        point(
            canvas.x * self.zoom + self.origin.x,
            canvas.y * self.zoom + self.origin.y,
        )
    }

    /// Convert a drag delta from client to canvas units
    #[inline]
    pub fn delta_to_canvas(&self, dx: f32, dy: f32) -> (f32, f32) {
        (dx / self.zoom, dy / self.zoom)
    }
}
