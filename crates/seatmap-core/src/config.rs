//! Editor tuning parameters.

use crate::error::EditorResult;
use crate::snap::{ANGLE_SNAP_INCREMENT, GRID_SIZE, SNAP_THRESHOLD};
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// Tunable constants for gestures and snapping.
///
/// Every field has a serde default, so a partial JSON object only overrides
/// the values it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum distance for alignment and vertex snapping (canvas units).
    pub snap_threshold: f64,
    /// Grid unit used while the grid modifier is held.
    pub grid_size: f64,
    /// Rotation snap increment in degrees.
    pub angle_snap_increment: f64,
    /// Lower bound for width and height during resize.
    pub min_shape_size: f64,
    /// Pointer travel (px) below which a drag is treated as a click.
    pub click_threshold: f64,
    /// Offset applied to pasted shapes.
    pub paste_offset: f64,
    /// Half-thickness of the hit area around polygon segments.
    pub segment_hit_tolerance: f64,
    /// Hit radius of transform and vertex handles.
    pub handle_hit_tolerance: f64,
    /// Canvas width used by canvas alignment.
    pub canvas_width: f64,
    /// Canvas height used by canvas alignment.
    pub canvas_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            grid_size: GRID_SIZE,
            angle_snap_increment: ANGLE_SNAP_INCREMENT,
            min_shape_size: 20.0,
            click_threshold: 3.0,
            paste_offset: 20.0,
            segment_hit_tolerance: 6.0,
            handle_hit_tolerance: 8.0,
            canvas_width: 1000.0,
            canvas_height: 700.0,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Canvas extent as a size.
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Paste offset as a vector (same on both axes).
    pub fn paste_delta(&self) -> Vec2 {
        Vec2::new(self.paste_offset, self.paste_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!((config.snap_threshold - 5.0).abs() < f64::EPSILON);
        assert!((config.grid_size - 10.0).abs() < f64::EPSILON);
        assert!((config.min_shape_size - 20.0).abs() < f64::EPSILON);
        assert!((config.angle_snap_increment - ANGLE_SNAP_INCREMENT).abs() < f64::EPSILON);
        assert!((config.grid_size - GRID_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "grid_size": 25.0 }"#).unwrap();
        assert!((config.grid_size - 25.0).abs() < f64::EPSILON);
        assert!((config.snap_threshold - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.canvas_size(), Size::new(1000.0, 700.0));
    }

    #[test]
    fn test_invalid_json() {
        assert!(EditorConfig::from_json("{ not json").is_err());
    }
}
