//! Drag, resize and rotate gestures.
//!
//! Each gesture captures what it needs at pointer-down and computes a fresh
//! shape list from the live list on every move. Nothing here touches history;
//! the canvas previews every frame and commits once on pointer-up.

use crate::config::EditorConfig;
use crate::selection::ResizeHandle;
use crate::shapes::{Shape, ShapeId};
use crate::snap::{Guide, detect_alignment, normalize_degrees, snap_angle, snap_value};
use kurbo::{Point, Rect, Size, Vec2};

/// Replace the shape with the same id, keeping list order.
pub(crate) fn replace_shape(shapes: &[Shape], updated: Shape) -> Vec<Shape> {
    let id = updated.id();
    let mut updated = Some(updated);
    shapes
        .iter()
        .map(|s| match updated.take_if(|_| s.id() == id) {
            Some(u) => u,
            None => s.clone(),
        })
        .collect()
}

/// One frame of a drag: the moved shapes and the guides to draw.
#[derive(Debug, Clone)]
pub struct DragFrame {
    pub shapes: Vec<Shape>,
    pub guides: Vec<Guide>,
}

/// State for moving one or more shapes.
#[derive(Debug, Clone)]
pub struct DragState {
    /// Pointer-down position.
    start: Point,
    /// Shape under the pointer; its box drives alignment snapping.
    primary: ShapeId,
    primary_bounds: Rect,
    /// Moving shapes and their start positions.
    origins: Vec<(ShapeId, Point)>,
    /// Largest pointer distance from `start` seen so far.
    max_travel: f64,
}

impl DragState {
    /// Start dragging `primary`. If it is selected, every selected shape
    /// moves with it; otherwise it moves alone.
    pub fn new(shapes: &[Shape], primary: ShapeId, start: Point) -> Option<Self> {
        let target = shapes.iter().find(|s| s.id() == primary)?;
        let origins = if target.is_selected() {
            shapes
                .iter()
                .filter(|s| s.is_selected())
                .map(|s| (s.id(), s.position()))
                .collect()
        } else {
            vec![(primary, target.position())]
        };
        Some(Self {
            start,
            primary,
            primary_bounds: target.bounds(),
            origins,
            max_travel: 0.0,
        })
    }

    pub fn primary(&self) -> ShapeId {
        self.primary
    }

    /// Ids of the shapes being moved.
    pub fn moving_ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.origins.iter().map(|(id, _)| *id)
    }

    fn is_moving(&self, id: ShapeId) -> bool {
        self.origins.iter().any(|(m, _)| *m == id)
    }

    /// True while the pointer never left the click radius.
    pub fn is_click(&self, threshold: f64) -> bool {
        self.max_travel <= threshold
    }

    /// Compute the frame for the pointer at `pointer`.
    ///
    /// Alignment snapping corrects the raw delta per axis; with `grid` set,
    /// each final position is then rounded to the grid, so the grid wins.
    pub fn update(
        &mut self,
        shapes: &[Shape],
        pointer: Point,
        grid: bool,
        config: &EditorConfig,
    ) -> DragFrame {
        let mut delta = pointer - self.start;
        self.max_travel = self.max_travel.max(delta.hypot());

        let statics = shapes
            .iter()
            .filter(|s| !self.is_moving(s.id()))
            .map(Shape::bounds);
        let alignment = detect_alignment(
            self.primary_bounds + delta,
            statics,
            config.snap_threshold,
        );
        if let Some(dx) = alignment.offset_x {
            delta.x += dx;
        }
        if let Some(dy) = alignment.offset_y {
            delta.y += dy;
        }

        let shapes = shapes
            .iter()
            .map(|s| {
                let mut s = s.clone();
                if let Some((_, origin)) = self.origins.iter().find(|(id, _)| *id == s.id()) {
                    let mut target = *origin + delta;
                    if grid {
                        target = Point::new(
                            snap_value(target.x, config.grid_size),
                            snap_value(target.y, config.grid_size),
                        );
                    }
                    s.set_position(target);
                }
                s
            })
            .collect();

        DragFrame {
            shapes,
            guides: if grid { Vec::new() } else { alignment.guides },
        }
    }
}

/// Resize a shape from its gesture-start state.
///
/// `screen_delta` is the pointer movement in canvas space; it is rotated by
/// the negative of the shape's rotation so the box is resized in its own
/// frame. Left/top handles keep the opposite edge fixed. Width and height
/// never drop below `min_size`. Polygon vertices are rescaled to the new box.
pub fn apply_resize(
    original: &Shape,
    handle: ResizeHandle,
    screen_delta: Vec2,
    keep_aspect: bool,
    min_size: f64,
) -> Shape {
    let (sin_t, cos_t) = (-original.rotation().to_radians()).sin_cos();
    let dx = screen_delta.x * cos_t - screen_delta.y * sin_t;
    let dy = screen_delta.x * sin_t + screen_delta.y * cos_t;

    let start = original.bounds();
    let (w0, h0) = (start.width(), start.height());

    let mut w = if handle.has_left() {
        w0 - dx
    } else if handle.has_right() {
        w0 + dx
    } else {
        w0
    };
    let mut h = if handle.has_top() {
        h0 - dy
    } else if handle.has_bottom() {
        h0 + dy
    } else {
        h0
    };

    if keep_aspect && w0 > 0.0 && h0 > 0.0 {
        let aspect = w0 / h0;
        if handle.drives_width() {
            h = w / aspect;
        } else {
            w = h * aspect;
        }
    }

    w = w.max(min_size);
    h = h.max(min_size);

    let x = if handle.has_left() { start.x0 + (w0 - w) } else { start.x0 };
    let y = if handle.has_top() { start.y0 + (h0 - h) } else { start.y0 };

    let mut shape = original.clone();
    shape.set_position(Point::new(x, y));
    shape.set_size(Size::new(w, h));
    if let (Some(poly), Some(src)) = (shape.as_polygon_mut(), original.vertices()) {
        let sx = if w0 > 0.0 { w / w0 } else { 1.0 };
        let sy = if h0 > 0.0 { h / h0 } else { 1.0 };
        poly.vertices = src.iter().map(|v| Point::new(v.x * sx, v.y * sy)).collect();
    }
    shape
}

/// State for resizing one shape by a handle.
#[derive(Debug, Clone)]
pub struct ResizeState {
    pub handle: ResizeHandle,
    start: Point,
    original: Shape,
}

impl ResizeState {
    pub fn new(shapes: &[Shape], id: ShapeId, handle: ResizeHandle, start: Point) -> Option<Self> {
        let original = shapes.iter().find(|s| s.id() == id)?.clone();
        Some(Self {
            handle,
            start,
            original,
        })
    }

    pub fn shape_id(&self) -> ShapeId {
        self.original.id()
    }

    pub fn update(
        &self,
        shapes: &[Shape],
        pointer: Point,
        keep_aspect: bool,
        config: &EditorConfig,
    ) -> Vec<Shape> {
        let resized = apply_resize(
            &self.original,
            self.handle,
            pointer - self.start,
            keep_aspect,
            config.min_shape_size,
        );
        replace_shape(shapes, resized)
    }
}

/// Rotation (degrees, [0, 360)) that points the shape's top toward `pointer`.
///
/// `atan2` of the pivot-to-pointer vector plus 90°, so a pointer straight
/// above the pivot yields 0°.
pub fn rotation_from_pointer(pivot: Point, pointer: Point, snap_increment: Option<f64>) -> f64 {
    let v = pointer - pivot;
    let angle = v.y.atan2(v.x).to_degrees() + 90.0;
    match snap_increment {
        Some(inc) => snap_angle(angle, inc),
        None => normalize_degrees(angle),
    }
}

/// State for rotating one shape about its box center.
#[derive(Debug, Clone)]
pub struct RotateState {
    shape_id: ShapeId,
    pivot: Point,
}

impl RotateState {
    pub fn new(shapes: &[Shape], id: ShapeId) -> Option<Self> {
        let shape = shapes.iter().find(|s| s.id() == id)?;
        Some(Self {
            shape_id: id,
            pivot: shape.center(),
        })
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Only the rotation changes; position and size are untouched.
    pub fn update(
        &self,
        shapes: &[Shape],
        pointer: Point,
        snap: bool,
        config: &EditorConfig,
    ) -> Vec<Shape> {
        let angle = rotation_from_pointer(
            self.pivot,
            pointer,
            snap.then_some(config.angle_snap_increment),
        );
        shapes
            .iter()
            .map(|s| {
                let mut s = s.clone();
                if s.id() == self.shape_id {
                    s.set_rotation(angle);
                }
                s
            })
            .collect()
    }
}
