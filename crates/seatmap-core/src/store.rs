//! Seat map state and the actions that change it.
//!
//! [`SeatmapState`] is the single owner of shapes, floors, history and the
//! clipboard. Every change goes through an [`Action`]; gestures compute new
//! shape lists and hand them back as `Preview` or `Commit`.

use crate::align::{Alignment, align_to_canvas};
use crate::config::EditorConfig;
use crate::document::SeatmapDocument;
use crate::error::{EditorError, EditorResult};
use crate::floor::{Floor, FloorId, reassign_orphans};
use crate::history::History;
use crate::settings::CanvasSettings;
use crate::shapes::{Polygon, Rectangle, Shape, ShapeId};
use crate::transform::replace_shape;
use crate::vertex;
use crate::widget::WidgetState;
use kurbo::Point;

/// Zoom commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomCommand {
    In,
    Out,
    Reset,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the live shapes and record them in history if they changed.
    Commit(Vec<Shape>),
    /// Replace the live shapes without touching history.
    Preview(Vec<Shape>),
    Undo,
    Redo,
    /// Copy the single selected shape to the clipboard.
    Copy,
    /// Paste an offset copy of the clipboard and select it.
    Paste,
    /// Select a shape; `None` (or an unknown id) clears the selection.
    Select { id: Option<ShapeId>, additive: bool },
    /// Delete one shape, or every selected shape when `None`.
    Delete(Option<ShapeId>),
    DeleteVertex { shape: ShapeId, index: usize },
    AddShape(Shape),
    /// Replace one shape by id (property edits).
    UpdateShape(Shape),
    SetFloors(Vec<Floor>),
    SetSettings(CanvasSettings),
    Zoom(ZoomCommand),
    /// Align every selected shape to the canvas.
    Align(Alignment),
}

/// Editor state.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatmapState {
    /// Live shapes; may be ahead of history during a gesture.
    shapes: Vec<Shape>,
    history: History,
    floors: Vec<Floor>,
    settings: CanvasSettings,
    clipboard: Option<Shape>,
    config: EditorConfig,
}

impl Default for SeatmapState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl SeatmapState {
    /// One default floor, no shapes, a single empty history entry.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            shapes: Vec::new(),
            history: History::default(),
            floors: vec![Floor::default_floor()],
            settings: CanvasSettings::default(),
            clipboard: None,
            config,
        }
    }

    /// Load a document. Its shapes become the first history entry.
    pub fn from_document(document: SeatmapDocument, config: EditorConfig) -> EditorResult<Self> {
        if document.floors.is_empty() {
            return Err(EditorError::NoFloors);
        }
        if let Some(short) = document
            .shapes
            .iter()
            .filter_map(Shape::vertices)
            .find(|v| v.len() < Polygon::MIN_VERTICES)
        {
            return Err(EditorError::TooFewVertices {
                min: Polygon::MIN_VERTICES,
                got: short.len(),
            });
        }
        let mut shapes = document.shapes;
        reassign_orphans(&mut shapes, &document.floors)?;
        Ok(Self {
            history: History::new(shapes.clone()),
            shapes,
            floors: document.floors,
            settings: document.settings,
            clipboard: None,
            config,
        })
    }

    /// Snapshot of the live state as a document.
    pub fn document(&self) -> SeatmapDocument {
        SeatmapDocument {
            floors: self.floors.clone(),
            shapes: self.shapes.clone(),
            settings: self.settings.clone(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn selected_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_selected())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn clipboard(&self) -> Option<&Shape> {
        self.clipboard.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Floor new shapes are placed on.
    pub fn default_floor_id(&self) -> FloorId {
        self.floors.first().map(|f| f.id).unwrap_or_default()
    }

    /// Drop uncommitted preview frames, restoring the current history entry.
    /// Returns true if the live shapes changed.
    pub fn revert_preview(&mut self) -> bool {
        if self.shapes.as_slice() == self.history.current() {
            return false;
        }
        self.shapes = self.history.current().to_vec();
        true
    }

    /// A 150×100 rectangle at (100, 100) on the first floor.
    pub fn new_rectangle(&self) -> Shape {
        Shape::Rectangle(Rectangle::new(
            Point::new(100.0, 100.0),
            150.0,
            100.0,
            self.default_floor_id(),
        ))
    }

    /// Apply an action in place.
    ///
    /// Returns `true` when the live shape list was replaced, so listeners
    /// need to redraw.
    pub fn apply(&mut self, action: Action) -> EditorResult<bool> {
        match action {
            Action::Commit(shapes) => {
                self.commit(shapes);
                Ok(true)
            }
            Action::Preview(shapes) => {
                self.shapes = shapes;
                Ok(true)
            }
            Action::Undo => Ok(self.undo()),
            Action::Redo => Ok(self.redo()),
            Action::Copy => {
                self.copy();
                Ok(false)
            }
            Action::Paste => Ok(self.paste()),
            Action::Select { id, additive } => Ok(self.select(id, additive)),
            Action::Delete(id) => Ok(self.delete(id)),
            Action::DeleteVertex { shape, index } => self.delete_vertex(shape, index),
            Action::AddShape(shape) => {
                self.add_shape(shape);
                Ok(true)
            }
            Action::UpdateShape(shape) => self.update_shape(shape),
            Action::SetFloors(floors) => self.set_floors(floors),
            Action::SetSettings(settings) => {
                self.settings = settings;
                Ok(false)
            }
            Action::Zoom(command) => {
                match command {
                    ZoomCommand::In => self.settings.zoom_in(),
                    ZoomCommand::Out => self.settings.zoom_out(),
                    ZoomCommand::Reset => self.settings.reset_zoom(),
                }
                log::debug!("Zoom set to {:.1}", self.settings.zoom);
                Ok(false)
            }
            Action::Align(alignment) => Ok(self.align(alignment)),
        }
    }

    fn commit(&mut self, shapes: Vec<Shape>) {
        if self.history.commit(&shapes) {
            log::info!(
                "Committed {} shape(s), history entry {}",
                shapes.len(),
                self.history.cursor()
            );
        }
        self.shapes = shapes;
    }

    fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.shapes = snapshot.to_vec();
                log::info!("Undo to history entry {}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.shapes = snapshot.to_vec();
                log::info!("Redo to history entry {}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    fn copy(&mut self) {
        let single = {
            let mut selected = self.selected_shapes();
            match (selected.next(), selected.next()) {
                (Some(shape), None) => Some(shape.clone()),
                _ => None,
            }
        };
        let Some(mut copied) = single else {
            log::debug!("Copy ignored: exactly one shape must be selected");
            return;
        };
        copied.set_state(WidgetState::Normal);
        self.clipboard = Some(copied);
    }

    fn paste(&mut self) -> bool {
        let Some(mut pasted) = self.clipboard.clone() else {
            return false;
        };
        pasted.regenerate_id();
        pasted.translate(self.config.paste_delta());
        pasted.set_state(WidgetState::Selected);

        let mut shapes = self.shapes.clone();
        for shape in shapes.iter_mut().filter(|s| s.is_selected()) {
            shape.set_state(WidgetState::Normal);
        }
        shapes.push(pasted);
        self.commit(shapes);
        true
    }

    fn select(&mut self, id: Option<ShapeId>, additive: bool) -> bool {
        let target = id.filter(|id| self.shape(*id).is_some());
        let shapes = match target {
            None => self
                .shapes
                .iter()
                .map(|s| with_state(s, WidgetState::Normal))
                .collect(),
            Some(id) if additive => self
                .shapes
                .iter()
                .map(|s| {
                    if s.id() != id {
                        s.clone()
                    } else if s.is_selected() {
                        with_state(s, WidgetState::Normal)
                    } else {
                        with_state(s, WidgetState::Selected)
                    }
                })
                .collect(),
            Some(id) => {
                let mut selected = self.selected_shapes();
                let only_this = matches!(
                    (selected.next(), selected.next()),
                    (Some(s), None) if s.id() == id
                );
                if only_this {
                    return false;
                }
                self.shapes
                    .iter()
                    .map(|s| {
                        let state = if s.id() == id {
                            WidgetState::Selected
                        } else {
                            WidgetState::Normal
                        };
                        with_state(s, state)
                    })
                    .collect()
            }
        };
        if shapes == self.shapes {
            return false;
        }
        self.commit(shapes);
        true
    }

    fn delete(&mut self, id: Option<ShapeId>) -> bool {
        let shapes: Vec<Shape> = match id {
            Some(id) => self.shapes.iter().filter(|s| s.id() != id).cloned().collect(),
            None => self.shapes.iter().filter(|s| !s.is_selected()).cloned().collect(),
        };
        if shapes.len() == self.shapes.len() {
            return false;
        }
        log::info!("Deleted {} shape(s)", self.shapes.len() - shapes.len());
        self.commit(shapes);
        true
    }

    fn delete_vertex(&mut self, id: ShapeId, index: usize) -> EditorResult<bool> {
        let shape = self.shape(id).ok_or(EditorError::ShapeNotFound(id))?;
        let polygon: &Polygon = shape.as_polygon().ok_or(EditorError::NotAPolygon(id))?;
        if index >= polygon.vertices.len() {
            log::debug!("Ignored delete of vertex {index}: shape {id} has {}", polygon.vertices.len());
            return Ok(false);
        }
        let Some(updated) = vertex::delete_vertex(shape, index) else {
            log::debug!("Refused to delete vertex {index}: polygon at minimum size");
            return Ok(false);
        };
        let shapes = replace_shape(&self.shapes, updated);
        self.commit(shapes);
        Ok(true)
    }

    fn add_shape(&mut self, mut shape: Shape) {
        if !self.floors.iter().any(|f| f.id == shape.attrs().floor_id) {
            shape.attrs_mut().floor_id = self.default_floor_id();
        }
        log::info!("Added {} {}", shape.kind_name(), shape.id());
        let mut shapes = self.shapes.clone();
        shapes.push(shape);
        self.commit(shapes);
    }

    fn update_shape(&mut self, updated: Shape) -> EditorResult<bool> {
        let id = updated.id();
        if self.shape(id).is_none() {
            return Err(EditorError::ShapeNotFound(id));
        }
        let exclusive = updated.is_selected();
        let mut updated = Some(updated);
        let shapes = self
            .shapes
            .iter()
            .map(|s| match updated.take_if(|_| s.id() == id) {
                Some(u) => u,
                None if exclusive && s.is_selected() => with_state(s, WidgetState::Normal),
                None => s.clone(),
            })
            .collect();
        self.commit(shapes);
        Ok(true)
    }

    fn set_floors(&mut self, floors: Vec<Floor>) -> EditorResult<bool> {
        if floors.is_empty() {
            log::warn!("Rejected empty floor list");
            return Err(EditorError::NoFloors);
        }
        let mut shapes = self.shapes.clone();
        let reassigned = reassign_orphans(&mut shapes, &floors)?;
        self.floors = floors;
        if reassigned == 0 {
            return Ok(false);
        }
        self.commit(shapes);
        Ok(true)
    }

    fn align(&mut self, alignment: Alignment) -> bool {
        if self.selected_shapes().next().is_none() {
            return false;
        }
        let canvas = self.config.canvas_size();
        let shapes = self
            .shapes
            .iter()
            .map(|s| {
                let mut s = s.clone();
                if s.is_selected() {
                    align_to_canvas(&mut s, alignment, canvas);
                }
                s
            })
            .collect();
        self.commit(shapes);
        true
    }
}

fn with_state(shape: &Shape, state: WidgetState) -> Shape {
    let mut shape = shape.clone();
    shape.set_state(state);
    shape
}

/// Pure reducer: the state after `action`, leaving `state` untouched.
pub fn reduce(state: &SeatmapState, action: Action) -> EditorResult<SeatmapState> {
    let mut next = state.clone();
    next.apply(action)?;
    Ok(next)
}
