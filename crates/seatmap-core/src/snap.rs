//! Snap functionality for aligning shapes to the grid and to each other.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Grid size for snapping while the grid modifier is held.
pub const GRID_SIZE: f64 = 10.0;

/// Distance below which alignment and vertex snapping engage.
pub const SNAP_THRESHOLD: f64 = 5.0;

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 15.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap an angle to the nearest increment.
/// Returns the snapped angle in degrees (0-360).
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    normalize_degrees((angle_degrees / increment).round() * increment)
}

/// Normalize an angle to [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Round a single coordinate to the grid.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    SnapResult {
        point: Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size)),
        snapped_x: true,
        snapped_y: true,
    }
}

/// A transient alignment line drawn while a gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Guide {
    /// Vertical line at `x`, from `y_start` to `y_end`.
    Vertical { x: f64, y_start: f64, y_end: f64 },
    /// Horizontal line at `y`, from `x_start` to `x_end`.
    Horizontal { y: f64, x_start: f64, x_end: f64 },
}

impl Guide {
    fn vertical(x: f64, a: f64, b: f64) -> Self {
        Guide::Vertical {
            x,
            y_start: a.min(b),
            y_end: a.max(b),
        }
    }

    fn horizontal(y: f64, a: f64, b: f64) -> Self {
        Guide::Horizontal {
            y,
            x_start: a.min(b),
            x_end: a.max(b),
        }
    }
}

/// Left, horizontal center, right.
fn x_refs(r: Rect) -> [f64; 3] {
    [r.x0, r.center().x, r.x1]
}

/// Top, vertical center, bottom.
fn y_refs(r: Rect) -> [f64; 3] {
    [r.y0, r.center().y, r.y1]
}

/// Best candidate on one axis.
#[derive(Debug, Clone, Copy)]
struct AxisMatch {
    offset: f64,
    guide: Guide,
}

/// Outcome of an edge/center alignment query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentSnap {
    /// Correction to add to the moving box's x so the matched lines coincide.
    pub offset_x: Option<f64>,
    /// Correction to add to the moving box's y.
    pub offset_y: Option<f64>,
    /// At most one vertical and one horizontal guide.
    pub guides: Vec<Guide>,
}

impl AlignmentSnap {
    pub fn is_snapped(&self) -> bool {
        self.offset_x.is_some() || self.offset_y.is_some()
    }
}

/// Find the nearest edge/center alignment between `moving` and any of the
/// `statics` boxes, independently per axis.
///
/// A candidate counts only when its distance is strictly below `threshold`
/// and strictly closer than the best match so far on that axis.
pub fn detect_alignment<I>(moving: Rect, statics: I, threshold: f64) -> AlignmentSnap
where
    I: IntoIterator<Item = Rect>,
{
    let mut best_x: Option<AxisMatch> = None;
    let mut best_y: Option<AxisMatch> = None;

    for other in statics {
        for m in x_refs(moving) {
            for s in x_refs(other) {
                let diff = (m - s).abs();
                if diff < threshold && best_x.is_none_or(|b| diff < b.offset.abs()) {
                    best_x = Some(AxisMatch {
                        offset: s - m,
                        guide: Guide::vertical(
                            s,
                            moving.y0.min(other.y0),
                            moving.y1.max(other.y1),
                        ),
                    });
                }
            }
        }
        for m in y_refs(moving) {
            for s in y_refs(other) {
                let diff = (m - s).abs();
                if diff < threshold && best_y.is_none_or(|b| diff < b.offset.abs()) {
                    best_y = Some(AxisMatch {
                        offset: s - m,
                        guide: Guide::horizontal(
                            s,
                            moving.x0.min(other.x0),
                            moving.x1.max(other.x1),
                        ),
                    });
                }
            }
        }
    }

    let guides = best_x.iter().chain(best_y.iter()).map(|m| m.guide).collect();
    AlignmentSnap {
        offset_x: best_x.map(|m| m.offset),
        offset_y: best_y.map(|m| m.offset),
        guides,
    }
}

/// Outcome of a vertex-to-vertex snap query.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSnap {
    pub snap: SnapResult,
    pub guides: Vec<Guide>,
}

/// Snap a canvas-space point to the x and/or y of the nearest candidate
/// vertices. Axes are matched independently.
pub fn detect_vertex_snap(point: Point, candidates: &[Point], threshold: f64) -> VertexSnap {
    let mut best_x: Option<Point> = None;
    let mut best_y: Option<Point> = None;

    for &c in candidates {
        let dx = (point.x - c.x).abs();
        if dx < threshold && best_x.is_none_or(|b| dx < (point.x - b.x).abs()) {
            best_x = Some(c);
        }
        let dy = (point.y - c.y).abs();
        if dy < threshold && best_y.is_none_or(|b| dy < (point.y - b.y).abs()) {
            best_y = Some(c);
        }
    }

    let snapped = Point::new(
        best_x.map_or(point.x, |c| c.x),
        best_y.map_or(point.y, |c| c.y),
    );
    let mut guides = Vec::new();
    if let Some(c) = best_x {
        guides.push(Guide::vertical(c.x, snapped.y, c.y));
    }
    if let Some(c) = best_y {
        guides.push(Guide::horizontal(c.y, snapped.x, c.x));
    }

    VertexSnap {
        snap: SnapResult {
            point: snapped,
            snapped_x: best_x.is_some(),
            snapped_y: best_y.is_some(),
        },
        guides,
    }
}

/// Guide overlay shown while a gesture is running.
///
/// Presentation-only: replaced on every move, cleared when the gesture ends.
#[derive(Debug, Clone, Default)]
pub struct SmartGuides {
    guides: Vec<Guide>,
}

impl SmartGuides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, guides: Vec<Guide>) {
        self.guides = guides;
    }

    pub fn clear(&mut self) {
        self.guides.clear();
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        let result = snap_to_grid(Point::new(14.0, 26.0), GRID_SIZE);
        assert_eq!(result.point, Point::new(10.0, 30.0));
        assert!(result.is_snapped());
    }

    #[test]
    fn test_snap_angle() {
        assert!((snap_angle(7.0, 15.0) - 0.0).abs() < 1e-9);
        assert!((snap_angle(8.0, 15.0) - 15.0).abs() < 1e-9);
        assert!((snap_angle(-20.0, 15.0) - 345.0).abs() < 1e-9);
        assert!((snap_angle(358.0, 15.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize_degrees(450.0) - 90.0).abs() < 1e-9);
        assert!((normalize_degrees(0.0)).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_wins() {
        let moving = Rect::new(100.0, 0.0, 150.0, 40.0);
        let statics = [
            Rect::new(104.0, 500.0, 304.0, 540.0),
            Rect::new(98.0, 600.0, 398.0, 640.0),
        ];
        let snap = detect_alignment(moving, statics, SNAP_THRESHOLD);
        let offset = snap.offset_x.unwrap();
        assert!((100.0 + offset - 98.0).abs() < 1e-9);
        assert_eq!(snap.offset_y, None);
        assert_eq!(snap.guides.len(), 1);
        match snap.guides[0] {
            Guide::Vertical { x, y_start, y_end } => {
                assert!((x - 98.0).abs() < 1e-9);
                assert!((y_start - 0.0).abs() < 1e-9);
                assert!((y_end - 640.0).abs() < 1e-9);
            }
            other => panic!("unexpected guide {other:?}"),
        }
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let moving = Rect::new(100.0, 0.0, 150.0, 40.0);
        let statics = [Rect::new(105.0, 500.0, 305.0, 540.0)];
        let snap = detect_alignment(moving, statics, SNAP_THRESHOLD);
        assert!(!snap.is_snapped());
        assert!(snap.guides.is_empty());
    }

    #[test]
    fn test_center_alignment_on_both_axes() {
        // Centers (125, 20) vs (126, 22): match on both axes.
        let moving = Rect::new(100.0, 0.0, 150.0, 40.0);
        let statics = [Rect::new(76.0, -58.0, 176.0, 102.0)];
        let snap = detect_alignment(moving, statics, SNAP_THRESHOLD);
        assert!((snap.offset_x.unwrap() - 1.0).abs() < 1e-9);
        assert!((snap.offset_y.unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(snap.guides.len(), 2);
    }

    #[test]
    fn test_vertex_snap_per_axis() {
        let candidates = [Point::new(52.0, 300.0), Point::new(400.0, 97.0), Point::new(49.0, 500.0)];
        let snap = detect_vertex_snap(Point::new(50.0, 100.0), &candidates, SNAP_THRESHOLD);
        assert_eq!(snap.snap.point, Point::new(49.0, 97.0));
        assert!(snap.snap.snapped_x && snap.snap.snapped_y);
        assert_eq!(snap.guides.len(), 2);
    }

    #[test]
    fn test_vertex_snap_out_of_range() {
        let snap = detect_vertex_snap(Point::new(50.0, 100.0), &[Point::new(60.0, 110.0)], SNAP_THRESHOLD);
        assert!(!snap.snap.is_snapped());
        assert_eq!(snap.snap.point, Point::new(50.0, 100.0));
        assert!(snap.guides.is_empty());
    }

    #[test]
    fn test_smart_guides_clear() {
        let mut overlay = SmartGuides::new();
        overlay.set(vec![Guide::vertical(1.0, 0.0, 10.0)]);
        assert!(!overlay.is_empty());
        overlay.clear();
        assert!(overlay.guides().is_empty());
    }
}
