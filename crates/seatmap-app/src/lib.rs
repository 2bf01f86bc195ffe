//! Seatmap Application
//!
//! Headless shell around the editor core: the shortcut registry and
//! scripted session replay.

mod session;
mod shortcuts;

pub use session::{DEMO_SCRIPT, Session, SessionEvent, parse_script};
pub use shortcuts::{Shortcut, ShortcutRegistry};
