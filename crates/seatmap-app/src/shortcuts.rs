//! Keyboard shortcut registry and documentation.

use seatmap_core::input::{KeyCommand, KeyEvent, Modifiers};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    /// Editor command the key resolves to; `None` for pointer gestures.
    pub command: Option<KeyCommand>,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        command: Option<KeyCommand>,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            command,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// The key press that triggers this shortcut, if it is a key at all.
    pub fn key_event(&self) -> Option<(KeyEvent, Modifiers)> {
        self.command?;
        let modifiers = Modifiers {
            ctrl: self.ctrl,
            shift: self.shift,
            ..Modifiers::NONE
        };
        // Letters are listed upper-case but arrive lower-case.
        let key = if self.key.len() == 1 {
            self.key.to_ascii_lowercase()
        } else {
            self.key.to_string()
        };
        Some((KeyEvent::Pressed(key), modifiers))
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo", Some(KeyCommand::Undo)),
            Shortcut::new("Y", true, false, "Redo", Some(KeyCommand::Redo)),
            Shortcut::new("C", true, false, "Copy selected shape", Some(KeyCommand::Copy)),
            Shortcut::new("V", true, false, "Paste shape", Some(KeyCommand::Paste)),
            Shortcut::new("Delete", false, false, "Delete selection or vertex", Some(KeyCommand::Delete)),
            Shortcut::new("Backspace", false, false, "Delete selection or vertex", Some(KeyCommand::Delete)),
            Shortcut::new("Escape", false, false, "Cancel gesture, leave vertex editing", Some(KeyCommand::Escape)),
            Shortcut::new("Click", false, true, "Add to or remove from selection", None),
            Shortcut::new("Drag", false, true, "Snap position to the grid", None),
            Shortcut::new("Resize", false, true, "Maintain aspect ratio", None),
            Shortcut::new("Rotate", false, true, "Snap angle to 15° steps", None),
            Shortcut::new("Double-click", false, false, "Toggle vertex editing", None),
        ]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatmap_core::input::key_command;

    #[test]
    fn test_key_shortcuts_resolve_to_their_command() {
        for shortcut in ShortcutRegistry::all() {
            let Some((event, modifiers)) = shortcut.key_event() else {
                continue;
            };
            assert_eq!(
                key_command(&event, modifiers, false),
                shortcut.command,
                "{}",
                shortcut.format()
            );
        }
    }

    #[test]
    fn test_format() {
        let all = ShortcutRegistry::all();
        assert_eq!(all[0].format(), "Ctrl+Z");
        assert!(all.iter().any(|s| s.format() == "Shift+Drag"));
        assert!(all.iter().filter(|s| s.command.is_none()).all(|s| s.key_event().is_none()));
    }
}
