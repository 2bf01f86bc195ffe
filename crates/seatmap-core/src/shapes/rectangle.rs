//! Rectangle shape.

use super::{ShapeAttrs, ShapeId, ShapeTrait};
use crate::floor::FloorId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned box, optionally rotated about its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    #[serde(flatten)]
    pub attrs: ShapeAttrs,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64, floor_id: FloorId) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            rotation: 0.0,
            attrs: ShapeAttrs::new(floor_id),
        }
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn attrs(&self) -> &ShapeAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut ShapeAttrs {
        &mut self.attrs
    }

    fn contains_local(&self, local: Point, tolerance: f64) -> bool {
        Rect::new(0.0, 0.0, self.width, self.height)
            .inflate(tolerance, tolerance)
            .contains(local)
    }
}
