//! Interactive state carried by shapes.
//!
//! Unlike geometry, widget state is a UI concern, but it is recorded in
//! history snapshots so undo restores the selection the user saw.

mod state;

pub use state::{EditingKind, WidgetState};
