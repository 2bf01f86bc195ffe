//! Aligning selected shapes to the canvas edges and center.

use crate::shapes::Shape;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Canvas alignment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    CenterVertical,
    Bottom,
}

impl Alignment {
    pub fn all() -> &'static [Alignment] {
        &[
            Alignment::Left,
            Alignment::CenterHorizontal,
            Alignment::Right,
            Alignment::Top,
            Alignment::CenterVertical,
            Alignment::Bottom,
        ]
    }
}

/// Position `shape` against the canvas on one axis; the other axis is kept.
pub fn align_to_canvas(shape: &mut Shape, alignment: Alignment, canvas: Size) {
    let Point { x, y } = shape.position();
    let size = shape.size();
    let target = match alignment {
        Alignment::Left => Point::new(0.0, y),
        Alignment::CenterHorizontal => Point::new((canvas.width - size.width) / 2.0, y),
        Alignment::Right => Point::new(canvas.width - size.width, y),
        Alignment::Top => Point::new(x, 0.0),
        Alignment::CenterVertical => Point::new(x, (canvas.height - size.height) / 2.0),
        Alignment::Bottom => Point::new(x, canvas.height - size.height),
    };
    shape.set_position(target);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;
    use uuid::Uuid;

    #[test]
    fn test_align_each_side() {
        let canvas = Size::new(1000.0, 700.0);
        let base = Shape::Rectangle(Rectangle::new(Point::new(30.0, 40.0), 100.0, 50.0, Uuid::new_v4()));
        let expected = [
            (Alignment::Left, Point::new(0.0, 40.0)),
            (Alignment::CenterHorizontal, Point::new(450.0, 40.0)),
            (Alignment::Right, Point::new(900.0, 40.0)),
            (Alignment::Top, Point::new(30.0, 0.0)),
            (Alignment::CenterVertical, Point::new(30.0, 325.0)),
            (Alignment::Bottom, Point::new(30.0, 650.0)),
        ];
        for (alignment, position) in expected {
            let mut shape = base.clone();
            align_to_canvas(&mut shape, alignment, canvas);
            assert_eq!(shape.position(), position, "{alignment:?}");
        }
        assert_eq!(Alignment::all().len(), expected.len());
    }
}
