//! Text shape.

use super::{ShapeAttrs, ShapeId, ShapeTrait};
use crate::floor::FloorId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-standing text box (stage labels, section names).
///
/// The displayed string lives in `attrs.label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    #[serde(flatten)]
    pub attrs: ShapeAttrs,
}

impl Text {
    pub const DEFAULT_WIDTH: f64 = 120.0;
    pub const DEFAULT_HEIGHT: f64 = 40.0;

    /// Create a text box with the default size.
    pub fn new(position: Point, label: impl Into<String>, floor_id: FloorId) -> Self {
        let mut attrs = ShapeAttrs::new(floor_id);
        attrs.label = label.into();
        Self {
            id: Uuid::new_v4(),
            position,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            rotation: 0.0,
            attrs,
        }
    }

    pub fn content(&self) -> &str {
        &self.attrs.label
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_creation() {
        let text = Text::new(Point::new(10.0, 10.0), "Stage", Uuid::new_v4());
        assert_eq!(text.content(), "Stage");
        assert_eq!(text.bounds(), Rect::new(10.0, 10.0, 130.0, 50.0));
    }
}
