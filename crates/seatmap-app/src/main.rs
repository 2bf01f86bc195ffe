//! Main application entry point.
//!
//! Replays the built-in demo session and prints the resulting document as
//! JSON.

use seatmap_app::{DEMO_SCRIPT, Session, ShortcutRegistry, parse_script};
use seatmap_core::config::EditorConfig;
use seatmap_core::error::EditorError;

fn main() -> Result<(), EditorError> {
    env_logger::init();
    log::info!("Starting seat map editor session");
    ShortcutRegistry::print_all();

    let events = parse_script(DEMO_SCRIPT)?;
    let mut session = Session::new(EditorConfig::default());
    session.replay(&events)?;

    println!("{}", session.canvas().state().document().to_json()?);
    Ok(())
}
