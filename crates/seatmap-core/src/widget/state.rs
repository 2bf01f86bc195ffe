//! Widget state definitions.

use serde::{Deserialize, Serialize};

/// The UI state of a shape.
///
/// A single enum instead of independent `selected` / `editing` flags: a shape
/// can never show its transform handles and its vertex handles at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WidgetState {
    /// Normal display state - no interaction.
    #[default]
    Normal,
    /// Shape is selected (shows resize/rotate handles, can be moved).
    Selected,
    /// Shape is in an editing mode (vertex handles or in-place text).
    Editing(EditingKind),
}

impl WidgetState {
    /// Check if the shape is selected for transforming.
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected)
    }

    /// Check if the shape is in any editing mode.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Check if the shape exposes its vertices for editing.
    pub fn is_editing_vertices(&self) -> bool {
        matches!(self, Self::Editing(EditingKind::Vertices))
    }
}

/// Kind of editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditingKind {
    /// Polygon vertex editing.
    Vertices,
    /// In-place label editing.
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_are_exclusive() {
        let editing = WidgetState::Editing(EditingKind::Vertices);
        assert!(editing.is_editing_vertices());
        assert!(!editing.is_selected());

        let selected = WidgetState::Selected;
        assert!(selected.is_selected());
        assert!(!selected.is_editing());

        assert_eq!(WidgetState::default(), WidgetState::Normal);
    }
}
