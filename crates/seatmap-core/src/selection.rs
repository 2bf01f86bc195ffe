//! Selection and manipulation handle system.

use crate::shapes::Shape;
use crate::widget::{EditingKind, WidgetState};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle size in canvas units.
pub const HANDLE_SIZE: f64 = 8.0;

/// Distance from shape edge to rotation handle (in canvas units).
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// One of the eight resize handles around a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    Corner(Corner),
    Edge(Edge),
}

impl ResizeHandle {
    /// All eight handles, corners first.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Corner(Corner::TopLeft),
        ResizeHandle::Corner(Corner::TopRight),
        ResizeHandle::Corner(Corner::BottomLeft),
        ResizeHandle::Corner(Corner::BottomRight),
        ResizeHandle::Edge(Edge::Top),
        ResizeHandle::Edge(Edge::Right),
        ResizeHandle::Edge(Edge::Bottom),
        ResizeHandle::Edge(Edge::Left),
    ];

    /// Handle moves the left edge.
    pub fn has_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft | Corner::BottomLeft) | ResizeHandle::Edge(Edge::Left)
        )
    }

    /// Handle moves the right edge.
    pub fn has_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopRight | Corner::BottomRight) | ResizeHandle::Edge(Edge::Right)
        )
    }

    /// Handle moves the top edge.
    pub fn has_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft | Corner::TopRight) | ResizeHandle::Edge(Edge::Top)
        )
    }

    /// Handle moves the bottom edge.
    pub fn has_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::BottomLeft | Corner::BottomRight) | ResizeHandle::Edge(Edge::Bottom)
        )
    }

    /// Whether a proportional resize from this handle is driven by the width.
    pub fn drives_width(self) -> bool {
        self.has_left() || self.has_right()
    }

    /// Handle offset from the box center, as fractions of the half extents.
    fn unit_offset(self) -> (f64, f64) {
        let x = if self.has_left() {
            -1.0
        } else if self.has_right() {
            1.0
        } else {
            0.0
        };
        let y = if self.has_top() {
            -1.0
        } else if self.has_bottom() {
            1.0
        } else {
            0.0
        };
        (x, y)
    }
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Resize handle on a selected shape.
    Resize(ResizeHandle),
    /// Rotation handle (positioned above the top edge).
    Rotate,
    /// Polygon vertex in vertex-edit mode.
    Vertex(usize),
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in canvas coordinates) hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Get the handles a shape exposes in its current state.
///
/// Selected shapes get resize and rotate handles; shapes in vertex-edit mode
/// get only their vertex handles. The two sets never appear together.
pub fn get_handles(shape: &Shape) -> Vec<Handle> {
    match shape.state() {
        WidgetState::Selected => transform_handles(shape.bounds(), shape.rotation()),
        WidgetState::Editing(EditingKind::Vertices) => shape
            .canvas_vertices()
            .into_iter()
            .enumerate()
            .map(|(i, p)| Handle::new(p, HandleKind::Vertex(i)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Eight resize handles plus the rotation handle, rotated with the shape.
fn transform_handles(bounds: Rect, rotation_degrees: f64) -> Vec<Handle> {
    let center = bounds.center();
    let half_w = bounds.width() / 2.0;
    let half_h = bounds.height() / 2.0;
    let (sin_r, cos_r) = rotation_degrees.to_radians().sin_cos();

    let rotate_point = |dx: f64, dy: f64| -> Point {
        Point::new(
            center.x + dx * cos_r - dy * sin_r,
            center.y + dx * sin_r + dy * cos_r,
        )
    };

    let mut handles: Vec<Handle> = ResizeHandle::ALL
        .iter()
        .map(|&h| {
            let (ux, uy) = h.unit_offset();
            Handle::new(rotate_point(ux * half_w, uy * half_h), HandleKind::Resize(h))
        })
        .collect();
    handles.push(Handle::new(
        rotate_point(0.0, -half_h - ROTATE_HANDLE_OFFSET),
        HandleKind::Rotate,
    ));
    handles
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(shape: &Shape, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(shape)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}
