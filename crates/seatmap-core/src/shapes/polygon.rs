//! Polygon shape.

use super::{Rectangle, ShapeAttrs, ShapeId, ShapeTrait, point_to_segment_dist};
use crate::error::{EditorError, EditorResult};
use crate::floor::FloorId;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A closed polygon.
///
/// Vertices are stored relative to `position`, and `position` is always the
/// top-left of their bounding box, so `(position, width, height, vertices)`
/// stay consistent. Every mutation of the outline goes through
/// [`Polygon::reanchor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Top-left of the vertex bounding box.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Outline, relative to `position`.
    pub vertices: Vec<Point>,
    #[serde(flatten)]
    pub attrs: ShapeAttrs,
}

impl Polygon {
    /// Fewest vertices a polygon may have.
    pub const MIN_VERTICES: usize = 3;

    /// Create a polygon from vertices relative to `position`.
    pub fn new(position: Point, vertices: Vec<Point>, floor_id: FloorId) -> EditorResult<Self> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(EditorError::TooFewVertices {
                min: Self::MIN_VERTICES,
                got: vertices.len(),
            });
        }
        let mut polygon = Self {
            id: Uuid::new_v4(),
            position,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            vertices,
            attrs: ShapeAttrs::new(floor_id),
        };
        polygon.reanchor();
        Ok(polygon)
    }

    /// Convert a rectangle into a four-vertex polygon with the same id,
    /// geometry and attributes.
    pub fn from_rectangle(rect: Rectangle) -> Self {
        let (w, h) = (rect.width, rect.height);
        Self {
            id: rect.id,
            position: rect.position,
            width: w,
            height: h,
            rotation: rect.rotation,
            vertices: vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ],
            attrs: rect.attrs,
        }
    }

    /// Recompute the bounding box from the vertices, move `position` to its
    /// top-left and re-express every vertex relative to it.
    pub fn reanchor(&mut self) {
        let Some(first) = self.vertices.first().copied() else {
            return;
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for v in &self.vertices[1..] {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }
        let shift = Vec2::new(min_x, min_y);
        for v in &mut self.vertices {
            *v -= shift;
        }
        self.position += shift;
        self.width = max_x - min_x;
        self.height = max_y - min_y;
    }

    /// Vertices in canvas space (`position + vertex`).
    pub fn canvas_vertices(&self) -> impl Iterator<Item = Point> + '_ {
        let origin = self.position.to_vec2();
        self.vertices.iter().map(move |v| *v + origin)
    }

    /// Number of segments (equal to the number of vertices).
    pub fn segment_count(&self) -> usize {
        self.vertices.len()
    }

    /// Segment `index`, running from vertex `index` to the next vertex
    /// (wrapping to the first).
    pub fn segment(&self, index: usize) -> Option<(Point, Point)> {
        let n = self.vertices.len();
        if index >= n {
            return None;
        }
        Some((self.vertices[index], self.vertices[(index + 1) % n]))
    }

    /// Move vertex `index` to a local point and re-anchor.
    pub fn set_vertex(&mut self, index: usize, local: Point) -> bool {
        match self.vertices.get_mut(index) {
            Some(v) => {
                *v = local;
                self.reanchor();
                true
            }
            None => false,
        }
    }

    /// Insert a vertex after `segment_index`, between its two endpoints.
    pub fn insert_vertex(&mut self, segment_index: usize, local: Point) -> bool {
        if segment_index >= self.vertices.len() {
            return false;
        }
        self.vertices.insert(segment_index + 1, local);
        self.reanchor();
        true
    }

    /// Remove vertex `index`. Refuses when that would leave fewer than
    /// [`Self::MIN_VERTICES`].
    pub fn remove_vertex(&mut self, index: usize) -> bool {
        if self.vertices.len() <= Self::MIN_VERTICES || index >= self.vertices.len() {
            return false;
        }
        self.vertices.remove(index);
        self.reanchor();
        true
    }

    /// Even-odd point-in-polygon test in the local frame.
    fn encloses(&self, p: Point) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.vertices[i], self.vertices[j]);
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

impl ShapeTrait for Polygon {
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
        if self.vertices.len() < Self::MIN_VERTICES {
            return false;
        }
        if self.encloses(local) {
            return true;
        }
        (0..self.segment_count())
            .filter_map(|i| self.segment(i))
            .any(|(a, b)| point_to_segment_dist(local, a, b) <= tolerance)
    }
}
