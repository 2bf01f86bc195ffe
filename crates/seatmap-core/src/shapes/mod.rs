//! Shape definitions for the seat map.

mod polygon;
mod rectangle;
mod text;

pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use text::Text;

use crate::floor::FloorId;
use crate::widget::WidgetState;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Horizontal alignment of a shape's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Presentation of a shape's label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub align: TextAlign,
    pub bold: bool,
    /// CSS-style color string.
    pub color: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            align: TextAlign::Center,
            bold: false,
            color: "#333333".to_string(),
        }
    }
}

/// A seat attached to a shape. The editing core carries it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub label: String,
    /// Position relative to the owning shape, if placed.
    #[serde(default)]
    pub position: Option<Point>,
}

/// Non-geometric properties shared by every shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeAttrs {
    /// Floor this shape belongs to (looked up by id, never owned).
    pub floor_id: FloorId,
    /// Mirror horizontally.
    #[serde(default)]
    pub flip_x: bool,
    /// Mirror vertically.
    #[serde(default)]
    pub flip_y: bool,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub text_style: TextStyle,
    #[serde(default)]
    pub seats: Vec<Seat>,
    /// Selection / editing mode.
    #[serde(default)]
    pub state: WidgetState,
}

impl ShapeAttrs {
    pub fn new(floor_id: FloorId) -> Self {
        Self {
            floor_id,
            flip_x: false,
            flip_y: false,
            label: String::new(),
            text_style: TextStyle::default(),
            seats: Vec::new(),
            state: WidgetState::Normal,
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Unrotated bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Rotation in degrees, clockwise about the box center.
    fn rotation(&self) -> f64;

    /// Shared properties.
    fn attrs(&self) -> &ShapeAttrs;

    /// Mutable shared properties.
    fn attrs_mut(&mut self) -> &mut ShapeAttrs;

    /// Check if a point in the shape's local frame (unrotated, relative to
    /// `position`) hits the shape.
    fn contains_local(&self, local: Point, tolerance: f64) -> bool;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Polygon(Polygon),
    Text(Text),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Polygon(s) => s.id(),
            Shape::Text(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
        }
    }

    pub fn rotation(&self) -> f64 {
        match self {
            Shape::Rectangle(s) => s.rotation(),
            Shape::Polygon(s) => s.rotation(),
            Shape::Text(s) => s.rotation(),
        }
    }

    pub fn attrs(&self) -> &ShapeAttrs {
        match self {
            Shape::Rectangle(s) => s.attrs(),
            Shape::Polygon(s) => s.attrs(),
            Shape::Text(s) => s.attrs(),
        }
    }

    pub fn attrs_mut(&mut self) -> &mut ShapeAttrs {
        match self {
            Shape::Rectangle(s) => s.attrs_mut(),
            Shape::Polygon(s) => s.attrs_mut(),
            Shape::Text(s) => s.attrs_mut(),
        }
    }

    /// Short name of the shape kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Polygon(_) => "polygon",
            Shape::Text(_) => "text",
        }
    }

    /// Top-left of the unrotated bounding box.
    pub fn position(&self) -> Point {
        self.bounds().origin()
    }

    pub fn size(&self) -> Size {
        self.bounds().size()
    }

    /// Center of the bounding box; the rotation pivot.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Rectangle(s) => s.position = position,
            Shape::Polygon(s) => s.position = position,
            Shape::Text(s) => s.position = position,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        let position = self.position() + delta;
        self.set_position(position);
    }

    /// Set the bounding box size. Polygon vertices are left untouched; resize
    /// rescales them separately from the gesture's starting vertices.
    pub fn set_size(&mut self, size: Size) {
        match self {
            Shape::Rectangle(s) => {
                s.width = size.width;
                s.height = size.height;
            }
            Shape::Polygon(s) => {
                s.width = size.width;
                s.height = size.height;
            }
            Shape::Text(s) => {
                s.width = size.width;
                s.height = size.height;
            }
        }
    }

    /// Set the rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        match self {
            Shape::Rectangle(s) => s.rotation = degrees,
            Shape::Polygon(s) => s.rotation = degrees,
            Shape::Text(s) => s.rotation = degrees,
        }
    }

    pub fn state(&self) -> WidgetState {
        self.attrs().state
    }

    pub fn set_state(&mut self, state: WidgetState) {
        self.attrs_mut().state = state;
    }

    pub fn is_selected(&self) -> bool {
        self.state().is_selected()
    }

    pub fn is_editing_vertices(&self) -> bool {
        self.state().is_editing_vertices()
    }

    /// Transform from the local frame (relative to `position`, unrotated) to
    /// canvas coordinates.
    pub fn local_to_canvas(&self) -> Affine {
        Affine::rotate_about(self.rotation().to_radians(), self.center())
            * Affine::translate(self.position().to_vec2())
    }

    /// Map a canvas point into the shape's local frame.
    pub fn to_local(&self, point: Point) -> Point {
        self.local_to_canvas().inverse() * point
    }

    /// Check if a canvas point hits this shape, honoring rotation.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = self.to_local(point);
        match self {
            Shape::Rectangle(s) => s.contains_local(local, tolerance),
            Shape::Polygon(s) => s.contains_local(local, tolerance),
            Shape::Text(s) => s.contains_local(local, tolerance),
        }
    }

    /// Polygon vertices relative to `position`, if this is a polygon.
    pub fn vertices(&self) -> Option<&[Point]> {
        match self {
            Shape::Polygon(p) => Some(&p.vertices),
            _ => None,
        }
    }

    /// Polygon vertices in canvas space (`position + vertex`); empty for
    /// other shape kinds.
    pub fn canvas_vertices(&self) -> Vec<Point> {
        match self {
            Shape::Polygon(p) => p.canvas_vertices().collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Regenerate the shape's ID with a new unique identifier.
    /// Used when pasting so the copy never aliases the original.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Polygon(s) => s.id = new_id,
            Shape::Text(s) => s.id = new_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::EditingKind;

    fn floor() -> FloorId {
        Uuid::new_v4()
    }

    #[test]
    fn test_point_to_segment_dist() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
        assert!((point_to_segment_dist(Point::new(-4.0, 3.0), a, b) - 5.0).abs() < 1e-9);
        assert!((point_to_segment_dist(Point::new(2.0, 2.0), a, a) - 8.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_translate_and_size() {
        let mut shape = Shape::Rectangle(Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0, floor()));
        shape.translate(Vec2::new(5.0, -5.0));
        assert_eq!(shape.position(), Point::new(15.0, 15.0));
        shape.set_size(Size::new(40.0, 30.0));
        assert_eq!(shape.size(), Size::new(40.0, 30.0));
        assert_eq!(shape.center(), Point::new(35.0, 30.0));
    }

    #[test]
    fn test_hit_test_honors_rotation() {
        // 100x20 bar centered at (50, 10); rotated 90° it stands upright.
        let mut shape = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 100.0, 20.0, floor()));
        assert!(shape.hit_test(Point::new(90.0, 10.0), 0.0));
        assert!(!shape.hit_test(Point::new(50.0, 50.0), 0.0));

        shape.set_rotation(90.0);
        assert!(!shape.hit_test(Point::new(90.0, 10.0), 0.0));
        assert!(shape.hit_test(Point::new(50.0, 50.0), 0.0));
    }

    #[test]
    fn test_local_round_trip() {
        let mut shape = Shape::Rectangle(Rectangle::new(Point::new(30.0, 40.0), 60.0, 20.0, floor()));
        shape.set_rotation(30.0);
        let local = Point::new(12.0, 7.0);
        let canvas = shape.local_to_canvas() * local;
        let back = shape.to_local(canvas);
        assert!((back.x - local.x).abs() < 1e-9);
        assert!((back.y - local.y).abs() < 1e-9);
    }

    #[test]
    fn test_state_flags() {
        let mut shape = Shape::Text(Text::new(Point::ZERO, "Stage", floor()));
        assert!(!shape.is_selected());
        shape.set_state(WidgetState::Selected);
        assert!(shape.is_selected());
        shape.set_state(WidgetState::Editing(EditingKind::Vertices));
        assert!(shape.is_editing_vertices());
        assert!(!shape.is_selected());
    }

    #[test]
    fn test_regenerate_id() {
        let mut shape = Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0, floor()));
        let old = shape.id();
        shape.regenerate_id();
        assert_ne!(shape.id(), old);
    }

    #[test]
    fn test_canvas_vertices_only_for_polygons() {
        let rect = Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0, floor()));
        assert!(rect.canvas_vertices().is_empty());
        assert!(rect.vertices().is_none());
    }
}
