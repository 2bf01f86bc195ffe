//! Seatmap Core Library
//!
//! Platform-agnostic shape model, gestures, snapping and history for the
//! seat map editor.

pub mod align;
pub mod canvas;
pub mod config;
pub mod document;
pub mod error;
pub mod floor;
pub mod gesture;
pub mod history;
pub mod input;
pub mod selection;
pub mod settings;
pub mod shapes;
pub mod snap;
pub mod store;
pub mod transform;
pub mod vertex;
pub mod widget;

pub use align::Alignment;
pub use canvas::{Canvas, ShapeListListener};
pub use config::EditorConfig;
pub use document::SeatmapDocument;
pub use error::{EditorError, EditorResult};
pub use floor::{Floor, FloorId};
pub use gesture::{EventRoot, GestureKind, PointerCapture};
pub use history::History;
pub use input::{ClickTracker, KeyCommand, KeyEvent, Modifiers};
pub use selection::{Corner, Edge, Handle, HandleKind, ResizeHandle, get_handles, hit_test_handles};
pub use settings::CanvasSettings;
pub use shapes::{Polygon, Rectangle, Shape, ShapeAttrs, ShapeId, Text};
pub use snap::{Guide, SmartGuides, SnapResult, snap_to_grid, GRID_SIZE};
pub use store::{Action, SeatmapState, ZoomCommand, reduce};
pub use widget::{EditingKind, WidgetState};
