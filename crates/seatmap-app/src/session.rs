//! Scripted editing sessions.
//!
//! A session feeds a recorded stream of input events into a [`Canvas`], the
//! same way a windowing shell would, and counts the redraws it triggers.

use kurbo::Point;
use seatmap_core::align::Alignment;
use seatmap_core::canvas::Canvas;
use seatmap_core::config::EditorConfig;
use seatmap_core::error::EditorResult;
use seatmap_core::input::{ClickTracker, KeyEvent, Modifiers};
use seatmap_core::shapes::Shape;
use seatmap_core::store::ZoomCommand;
use serde::Deserialize;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// One recorded input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    AddRectangle,
    AddText {
        x: f64,
        y: f64,
        label: String,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
        /// Milliseconds since the session started; drives double-click detection.
        #[serde(default)]
        time_ms: u64,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        text_focused: bool,
    },
    Align {
        alignment: Alignment,
    },
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

/// Parse a JSON array of events.
pub fn parse_script(json: &str) -> EditorResult<Vec<SessionEvent>> {
    Ok(serde_json::from_str(json)?)
}

/// A canvas driven by recorded input.
pub struct Session {
    canvas: Canvas,
    clicks: ClickTracker,
    started: Instant,
    redraws: Rc<Cell<usize>>,
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        let mut canvas = Canvas::new(config);
        let redraws = Rc::new(Cell::new(0));
        let counter = Rc::clone(&redraws);
        canvas.set_listener(move |shapes: &[Shape]| {
            counter.set(counter.get() + 1);
            log::trace!("Redraw {} with {} shape(s)", counter.get(), shapes.len());
        });
        Self {
            canvas,
            clicks: ClickTracker::new(),
            started: Instant::now(),
            redraws,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Number of times the shape list listener fired.
    pub fn redraws(&self) -> usize {
        self.redraws.get()
    }

    /// Feed every event in order, stopping at the first error.
    pub fn replay(&mut self, events: &[SessionEvent]) -> EditorResult<()> {
        for event in events {
            self.handle(event)?;
        }
        log::info!(
            "Replayed {} event(s), {} redraw(s), {} history entries",
            events.len(),
            self.redraws(),
            self.canvas.state().history().len()
        );
        Ok(())
    }

    pub fn handle(&mut self, event: &SessionEvent) -> EditorResult<()> {
        log::debug!("Session event {:?}", event);
        match event {
            SessionEvent::AddRectangle => {
                self.canvas.add_rectangle()?;
            }
            SessionEvent::AddText { x, y, label } => {
                self.canvas.add_text(Point::new(*x, *y), label)?;
            }
            SessionEvent::PointerDown { x, y, shift, time_ms } => {
                let point = Point::new(*x, *y);
                let now = self.started + Duration::from_millis(*time_ms);
                if self.clicks.register(point, now) {
                    if let Some(id) = self.canvas.shape_at(point) {
                        self.canvas.double_click(id)?;
                        return Ok(());
                    }
                }
                self.canvas.pointer_down(point, modifiers(*shift))?;
            }
            SessionEvent::PointerMove { x, y, shift } => {
                self.canvas.pointer_move(Point::new(*x, *y), modifiers(*shift))?;
            }
            SessionEvent::PointerUp { x, y, shift } => {
                self.canvas.pointer_up(Point::new(*x, *y), modifiers(*shift))?;
            }
            SessionEvent::Key {
                key,
                ctrl,
                shift,
                text_focused,
            } => {
                let mods = Modifiers {
                    ctrl: *ctrl,
                    shift: *shift,
                    ..Modifiers::NONE
                };
                let command = self
                    .canvas
                    .handle_key(&KeyEvent::Pressed(key.clone()), mods, *text_focused)?;
                if command.is_none() {
                    log::debug!("Unbound key {key}");
                }
            }
            SessionEvent::Align { alignment } => {
                self.canvas.align_selected(*alignment)?;
            }
            SessionEvent::ZoomIn => {
                self.canvas.zoom(ZoomCommand::In)?;
            }
            SessionEvent::ZoomOut => {
                self.canvas.zoom(ZoomCommand::Out)?;
            }
            SessionEvent::ZoomReset => {
                self.canvas.zoom(ZoomCommand::Reset)?;
            }
        }
        Ok(())
    }
}

fn modifiers(shift: bool) -> Modifiers {
    if shift { Modifiers::SHIFT } else { Modifiers::NONE }
}

/// A short session: add a block, move it, reshape a corner, label the stage.
pub const DEMO_SCRIPT: &str = r#"[
    { "event": "add_rectangle" },
    { "event": "pointer_down", "x": 150, "y": 150, "time_ms": 0 },
    { "event": "pointer_up", "x": 150, "y": 150 },
    { "event": "pointer_down", "x": 150, "y": 150, "time_ms": 1000 },
    { "event": "pointer_move", "x": 200, "y": 180 },
    { "event": "pointer_move", "x": 253, "y": 207, "shift": true },
    { "event": "pointer_up", "x": 253, "y": 207, "shift": true },
    { "event": "pointer_down", "x": 260, "y": 250, "time_ms": 2000 },
    { "event": "pointer_up", "x": 260, "y": 250 },
    { "event": "pointer_down", "x": 260, "y": 250, "time_ms": 2200 },
    { "event": "pointer_down", "x": 200, "y": 160, "time_ms": 3000 },
    { "event": "pointer_move", "x": 180, "y": 150 },
    { "event": "pointer_up", "x": 180, "y": 150 },
    { "event": "key", "key": "Escape" },
    { "event": "add_text", "x": 440, "y": 20, "label": "Stage" },
    { "event": "zoom_in" }
]"#;
