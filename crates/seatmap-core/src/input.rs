//! Keyboard and pointer input helpers.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keyboard event type. Keys use DOM-style names ("z", "Delete", "Escape").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Editor command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Undo,
    Redo,
    Copy,
    Paste,
    /// Delete the selection (or the selected vertex in vertex-edit mode).
    Delete,
    /// Leave vertex-edit mode and cancel any pending gesture.
    Escape,
}

/// Map a key press to an editor command.
///
/// Delete/Backspace are ignored while a text field has focus so typing in
/// the property panel never removes shapes.
pub fn key_command(event: &KeyEvent, modifiers: Modifiers, text_field_focused: bool) -> Option<KeyCommand> {
    let KeyEvent::Pressed(key) = event else {
        return None;
    };
    if modifiers.command() {
        return match key.to_ascii_lowercase().as_str() {
            "z" => Some(KeyCommand::Undo),
            "y" => Some(KeyCommand::Redo),
            "c" => Some(KeyCommand::Copy),
            "v" => Some(KeyCommand::Paste),
            _ => None,
        };
    }
    match key.as_str() {
        "Delete" | "Backspace" if !text_field_focused => Some(KeyCommand::Delete),
        "Escape" => Some(KeyCommand::Escape),
        _ => None,
    }
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(500);
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Detects double clicks from a stream of pointer-down events.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last: Option<(Instant, Point)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click; returns true when it completes a double click.
    pub fn register(&mut self, position: Point, now: Instant) -> bool {
        if let Some((last_time, last_pos)) = self.last {
            let elapsed = now.saturating_duration_since(last_time);
            if elapsed < DOUBLE_CLICK_TIME && (position - last_pos).hypot() < DOUBLE_CLICK_DISTANCE {
                // Reset so a triple click is not a second double click
                self.last = None;
                return true;
            }
        }
        self.last = Some((now, position));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: &str) -> KeyEvent {
        KeyEvent::Pressed(key.to_string())
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(key_command(&press("z"), Modifiers::CTRL, false), Some(KeyCommand::Undo));
        assert_eq!(key_command(&press("Y"), Modifiers::CTRL, false), Some(KeyCommand::Redo));
        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(key_command(&press("c"), cmd, false), Some(KeyCommand::Copy));
        assert_eq!(key_command(&press("v"), cmd, false), Some(KeyCommand::Paste));
        assert_eq!(key_command(&press("z"), Modifiers::NONE, false), None);
        assert_eq!(key_command(&KeyEvent::Released("z".into()), Modifiers::CTRL, false), None);
    }

    #[test]
    fn test_delete_suppressed_in_text_field() {
        assert_eq!(key_command(&press("Delete"), Modifiers::NONE, false), Some(KeyCommand::Delete));
        assert_eq!(key_command(&press("Backspace"), Modifiers::NONE, false), Some(KeyCommand::Delete));
        assert_eq!(key_command(&press("Backspace"), Modifiers::NONE, true), None);
        assert_eq!(key_command(&press("Escape"), Modifiers::NONE, true), Some(KeyCommand::Escape));
    }

    #[test]
    fn test_double_click_detection() {
        let mut clicks = ClickTracker::new();
        let t0 = Instant::now();
        let pos = Point::new(100.0, 100.0);
        assert!(!clicks.register(pos, t0));
        assert!(clicks.register(pos, t0 + Duration::from_millis(200)));
        // Third click starts over.
        assert!(!clicks.register(pos, t0 + Duration::from_millis(300)));
    }

    #[test]
    fn test_double_click_too_far_or_slow() {
        let mut clicks = ClickTracker::new();
        let t0 = Instant::now();
        assert!(!clicks.register(Point::new(100.0, 100.0), t0));
        assert!(!clicks.register(Point::new(200.0, 200.0), t0 + Duration::from_millis(100)));
        assert!(!clicks.register(Point::new(200.0, 200.0), t0 + Duration::from_millis(900)));
    }
}
