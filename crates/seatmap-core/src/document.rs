//! Serializable seat map document.

use crate::error::EditorResult;
use crate::floor::Floor;
use crate::settings::CanvasSettings;
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};

/// Everything an importer/exporter needs: floors, shapes and canvas settings.
///
/// Widget state travels with each shape so a round trip is lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatmapDocument {
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub settings: CanvasSettings,
}

impl Default for SeatmapDocument {
    fn default() -> Self {
        Self {
            floors: vec![Floor::default_floor()],
            shapes: Vec::new(),
            settings: CanvasSettings::default(),
        }
    }
}

impl SeatmapDocument {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
