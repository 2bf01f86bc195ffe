//! Floors group shapes by level or category.

use crate::error::{EditorError, EditorResult};
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for floors.
pub type FloorId = Uuid;

/// A floor (level) of the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    /// CSS-style color string, e.g. `#87CEEB`.
    pub color: String,
}

impl Floor {
    /// Create a new floor with a fresh id.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// The floor every new document starts with.
    pub fn default_floor() -> Self {
        Self::new("Default floor", "#87CEEB")
    }
}

/// Repoint shapes whose floor no longer exists to the first floor.
///
/// Returns the number of shapes that were reassigned.
pub fn reassign_orphans(shapes: &mut [Shape], floors: &[Floor]) -> EditorResult<usize> {
    let fallback = floors.first().ok_or(EditorError::NoFloors)?.id;
    let mut reassigned = 0;
    for shape in shapes.iter_mut() {
        let floor_id = shape.attrs().floor_id;
        if !floors.iter().any(|f| f.id == floor_id) {
            shape.attrs_mut().floor_id = fallback;
            reassigned += 1;
        }
    }
    if reassigned > 0 {
        log::info!("Reassigned {} shape(s) to floor '{}'", reassigned, floors[0].name);
    }
    Ok(reassigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;
    use kurbo::Point;

    #[test]
    fn test_orphans_move_to_first_floor() {
        let ground = Floor::new("Ground", "#ffffff");
        let balcony = Floor::new("Balcony", "#000000");
        let removed = Floor::new("Removed", "#ff0000");

        let mut shapes = vec![
            Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0, balcony.id)),
            Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0, removed.id)),
        ];
        let floors = vec![ground.clone(), balcony.clone()];

        let count = reassign_orphans(&mut shapes, &floors).unwrap();
        assert_eq!(count, 1);
        assert_eq!(shapes[0].attrs().floor_id, balcony.id);
        assert_eq!(shapes[1].attrs().floor_id, ground.id);
    }

    #[test]
    fn test_no_floors_is_an_error() {
        let mut shapes = vec![Shape::Rectangle(Rectangle::new(
            Point::ZERO,
            10.0,
            10.0,
            Uuid::new_v4(),
        ))];
        assert!(matches!(
            reassign_orphans(&mut shapes, &[]),
            Err(EditorError::NoFloors)
        ));
    }
}
