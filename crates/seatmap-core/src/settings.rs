//! Canvas display settings.

use serde::{Deserialize, Serialize};

/// Zoom change per zoom-in/zoom-out step.
pub const ZOOM_STEP: f64 = 0.1;
/// Smallest allowed zoom (10%).
pub const MIN_ZOOM: f64 = 0.1;

/// Background color and zoom of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    pub background_color: String,
    /// 1.0 = 100%.
    pub zoom: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            zoom: 1.0,
        }
    }
}

impl CanvasSettings {
    pub fn zoom_in(&mut self) {
        self.zoom += ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_out_floor() {
        let mut settings = CanvasSettings::default();
        for _ in 0..20 {
            settings.zoom_out();
        }
        assert!((settings.zoom - MIN_ZOOM).abs() < 1e-9);
        settings.zoom_in();
        assert!((settings.zoom - 0.2).abs() < 1e-9);
        settings.reset_zoom();
        assert!((settings.zoom - 1.0).abs() < f64::EPSILON);
    }
}
