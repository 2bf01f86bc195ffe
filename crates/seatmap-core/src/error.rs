//! Error types for the editing core.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Editor errors.
///
/// Most editing guards (undo at the start of history, deleting the third
/// vertex of a triangle, pasting an empty clipboard) are silent no-ops and
/// never surface here.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("At least one floor is required")]
    NoFloors,
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("Shape {0} is not a polygon")]
    NotAPolygon(ShapeId),
    #[error("Polygon needs at least {min} vertices, got {got}")]
    TooFewVertices { min: usize, got: usize },
    #[error("Shape {shape} has no vertex {index}")]
    VertexOutOfRange { shape: ShapeId, index: usize },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
