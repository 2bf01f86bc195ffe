//! Polygon vertex editing.
//!
//! Vertex coordinates are handled in the shape's unrotated frame: a canvas
//! point maps to `point - position`, and a vertex maps back to
//! `position + vertex`.

use crate::config::EditorConfig;
use crate::shapes::{Polygon, Shape, ShapeId, point_to_segment_dist};
use crate::snap::{Guide, detect_vertex_snap};
use crate::transform::replace_shape;
use crate::widget::{EditingKind, WidgetState};
use kurbo::Point;

/// Put a shape into vertex-edit mode.
///
/// Rectangles become four-vertex polygons; polygons keep their vertices.
/// Text has no outline to edit and yields `None`.
pub fn enter_vertex_edit(shape: &Shape) -> Option<Shape> {
    let mut edited = match shape {
        Shape::Rectangle(rect) => Shape::Polygon(Polygon::from_rectangle(rect.clone())),
        Shape::Polygon(_) => shape.clone(),
        Shape::Text(_) => return None,
    };
    edited.set_state(WidgetState::Editing(EditingKind::Vertices));
    Some(edited)
}

/// Leave vertex-edit mode; the shape becomes selected again.
pub fn exit_vertex_edit(shape: &Shape) -> Shape {
    let mut shape = shape.clone();
    shape.set_state(WidgetState::Selected);
    shape
}

/// Canvas-space vertices of every polygon except `exclude`.
pub fn snap_candidates(shapes: &[Shape], exclude: ShapeId) -> Vec<Point> {
    shapes
        .iter()
        .filter(|s| s.id() != exclude)
        .flat_map(Shape::canvas_vertices)
        .collect()
}

/// Move vertex `index` toward the canvas point `pointer`, snapping to the
/// candidate vertices. Returns the updated shape and the guides to draw.
pub fn move_vertex(
    shape: &Shape,
    index: usize,
    pointer: Point,
    candidates: &[Point],
    threshold: f64,
) -> Option<(Shape, Vec<Guide>)> {
    let snap = detect_vertex_snap(pointer, candidates, threshold);
    let mut shape = shape.clone();
    let origin = shape.position().to_vec2();
    let poly = shape.as_polygon_mut()?;
    if !poly.set_vertex(index, snap.snap.point - origin) {
        return None;
    }
    Some((shape, snap.guides))
}

/// Index of the polygon segment within `tolerance` of a canvas point.
pub fn hit_test_segment(shape: &Shape, point: Point, tolerance: f64) -> Option<usize> {
    let poly = shape.as_polygon()?;
    let local = point - poly.position.to_vec2();
    (0..poly.segment_count()).find(|&i| {
        poly.segment(i)
            .is_some_and(|(a, b)| point_to_segment_dist(local, a, b) <= tolerance)
    })
}

/// Insert a vertex after `segment` at a canvas point.
pub fn insert_vertex(shape: &Shape, segment: usize, point: Point) -> Option<Shape> {
    let mut shape = shape.clone();
    let local = point - shape.position().to_vec2();
    shape
        .as_polygon_mut()?
        .insert_vertex(segment, local)
        .then_some(shape)
}

/// Remove vertex `index`. `None` when the polygon would drop below three
/// vertices or the index is out of range.
pub fn delete_vertex(shape: &Shape, index: usize) -> Option<Shape> {
    let mut shape = shape.clone();
    shape.as_polygon_mut()?.remove_vertex(index).then_some(shape)
}

/// State for dragging a single vertex.
#[derive(Debug, Clone)]
pub struct VertexDragState {
    pub shape_id: ShapeId,
    pub index: usize,
}

impl VertexDragState {
    pub fn new(shapes: &[Shape], shape_id: ShapeId, index: usize) -> Option<Self> {
        let shape = shapes.iter().find(|s| s.id() == shape_id)?;
        if index >= shape.vertices()?.len() {
            return None;
        }
        Some(Self { shape_id, index })
    }

    /// Compute the shape list with the vertex at `pointer`.
    pub fn update(
        &self,
        shapes: &[Shape],
        pointer: Point,
        config: &EditorConfig,
    ) -> Option<(Vec<Shape>, Vec<Guide>)> {
        let shape = shapes.iter().find(|s| s.id() == self.shape_id)?;
        let candidates = snap_candidates(shapes, self.shape_id);
        let (moved, guides) =
            move_vertex(shape, self.index, pointer, &candidates, config.snap_threshold)?;
        Some((replace_shape(shapes, moved), guides))
    }
}
