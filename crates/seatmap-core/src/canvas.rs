//! Editor facade tying pointer and keyboard input to the seat map state.

use crate::align::Alignment;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::floor::Floor;
use crate::gesture::{ActiveGesture, EventRoot, Gesture, GestureKind};
use crate::input::{KeyCommand, KeyEvent, Modifiers, key_command};
use crate::selection::{HandleKind, ResizeHandle, hit_test_handles};
use crate::settings::CanvasSettings;
use crate::shapes::{Shape, ShapeId, Text};
use crate::snap::{Guide, SmartGuides};
use crate::store::{Action, SeatmapState, ZoomCommand};
use crate::transform::{DragState, ResizeState, RotateState, replace_shape};
use crate::vertex::{self, VertexDragState};
use crate::widget::{EditingKind, WidgetState};
use kurbo::Point;

/// Receives the shape list after every preview frame and every commit.
pub trait ShapeListListener {
    fn on_shape_list_changed(&mut self, shapes: &[Shape]);
}

impl<F: FnMut(&[Shape])> ShapeListListener for F {
    fn on_shape_list_changed(&mut self, shapes: &[Shape]) {
        self(shapes)
    }
}

/// What lies under the pointer, topmost first.
enum PointerTarget {
    Handle(ShapeId, HandleKind),
    Segment(ShapeId, usize),
    Body(ShapeId),
    Background,
}

/// Interactive editor state (not persisted).
pub struct Canvas {
    state: SeatmapState,
    root: EventRoot,
    gesture: Option<ActiveGesture>,
    guides: SmartGuides,
    listener: Option<Box<dyn ShapeListListener>>,
    /// Last vertex grabbed in vertex-edit mode; target of the Delete key.
    selected_vertex: Option<(ShapeId, usize)>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Canvas {
    /// Create a canvas with an empty document.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_state(SeatmapState::new(config))
    }

    /// Create a canvas over existing state.
    pub fn with_state(state: SeatmapState) -> Self {
        Self {
            state,
            root: EventRoot::new(),
            gesture: None,
            guides: SmartGuides::new(),
            listener: None,
            selected_vertex: None,
        }
    }

    pub fn set_listener(&mut self, listener: impl ShapeListListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn state(&self) -> &SeatmapState {
        &self.state
    }

    pub fn shapes(&self) -> &[Shape] {
        self.state.shapes()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.state.shape(id)
    }

    /// Guides to draw for the current frame.
    pub fn guides(&self) -> &[Guide] {
        self.guides.guides()
    }

    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.gesture.as_ref().map(ActiveGesture::kind)
    }

    /// Pointer captures currently held on the event root.
    pub fn active_captures(&self) -> usize {
        self.root.active_captures()
    }

    pub fn selected_vertex(&self) -> Option<(ShapeId, usize)> {
        self.selected_vertex
    }

    fn config(&self) -> &EditorConfig {
        self.state.config()
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_shape_list_changed(self.state.shapes());
        }
    }

    fn dispatch(&mut self, action: Action) -> EditorResult<bool> {
        let changed = self.state.apply(action)?;
        if changed {
            self.notify();
        }
        Ok(changed)
    }

    fn require_shape(&self, id: ShapeId) -> EditorResult<&Shape> {
        self.state.shape(id).ok_or(EditorError::ShapeNotFound(id))
    }

    fn start_gesture(&mut self, gesture: Gesture) {
        self.cancel_gesture();
        log::debug!("Begin {:?} on {}", gesture.kind(), gesture.shape_id());
        self.gesture = Some(ActiveGesture::start(&self.root, gesture));
    }

    // --- Gesture entry points -------------------------------------------

    /// Start moving `id` (and the rest of the selection if it is selected).
    pub fn begin_drag(&mut self, pointer: Point, id: ShapeId) -> EditorResult<()> {
        let drag = DragState::new(self.state.shapes(), id, pointer)
            .ok_or(EditorError::ShapeNotFound(id))?;
        self.start_gesture(Gesture::Drag(drag));
        Ok(())
    }

    pub fn begin_resize(&mut self, pointer: Point, id: ShapeId, handle: ResizeHandle) -> EditorResult<()> {
        let resize = ResizeState::new(self.state.shapes(), id, handle, pointer)
            .ok_or(EditorError::ShapeNotFound(id))?;
        self.start_gesture(Gesture::Resize(resize));
        Ok(())
    }

    pub fn begin_rotate(&mut self, _pointer: Point, id: ShapeId) -> EditorResult<()> {
        let rotate = RotateState::new(self.state.shapes(), id).ok_or(EditorError::ShapeNotFound(id))?;
        self.start_gesture(Gesture::Rotate(rotate));
        Ok(())
    }

    pub fn begin_vertex_drag(&mut self, _pointer: Point, id: ShapeId, index: usize) -> EditorResult<()> {
        let shape = self.require_shape(id)?;
        let count = shape.vertices().ok_or(EditorError::NotAPolygon(id))?.len();
        if index >= count {
            return Err(EditorError::VertexOutOfRange { shape: id, index });
        }
        let drag = VertexDragState::new(self.state.shapes(), id, index)
            .ok_or(EditorError::ShapeNotFound(id))?;
        self.selected_vertex = Some((id, index));
        self.start_gesture(Gesture::VertexDrag(drag));
        Ok(())
    }

    /// Drop the running gesture, discarding its preview frames.
    /// Returns false if no gesture was running.
    pub fn cancel_gesture(&mut self) -> bool {
        let Some(active) = self.gesture.take() else {
            return false;
        };
        log::debug!("Cancel {:?}", active.kind());
        drop(active);
        self.guides.clear();
        if self.state.revert_preview() {
            self.notify();
        }
        true
    }

    // --- Pointer events -------------------------------------------------

    fn target_at(&self, point: Point) -> PointerTarget {
        let config = self.config();
        for shape in self.state.shapes().iter().rev() {
            if let Some(kind) = hit_test_handles(shape, point, config.handle_hit_tolerance) {
                return PointerTarget::Handle(shape.id(), kind);
            }
            if shape.is_editing_vertices() {
                if let Some(segment) = vertex::hit_test_segment(shape, point, config.segment_hit_tolerance) {
                    return PointerTarget::Segment(shape.id(), segment);
                }
            }
        }
        self.shape_at(point)
            .map_or(PointerTarget::Background, PointerTarget::Body)
    }

    /// Topmost shape whose body contains `point`.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.state
            .shapes()
            .iter()
            .rev()
            .find(|s| s.hit_test(point, 0.0))
            .map(Shape::id)
    }

    /// Classify a pointer-down and start the matching gesture.
    ///
    /// Handles win over segments, segments over shape bodies. A segment
    /// click inserts a vertex; a background click clears the selection.
    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers) -> EditorResult<Option<GestureKind>> {
        match self.target_at(point) {
            PointerTarget::Handle(id, HandleKind::Resize(handle)) => self.begin_resize(point, id, handle)?,
            PointerTarget::Handle(id, HandleKind::Rotate) => self.begin_rotate(point, id)?,
            PointerTarget::Handle(id, HandleKind::Vertex(index)) => {
                self.begin_vertex_drag(point, id, index)?
            }
            PointerTarget::Segment(id, segment) => {
                self.click_segment(id, segment, point)?;
            }
            PointerTarget::Body(id) => self.begin_drag(point, id)?,
            PointerTarget::Background => {
                if !modifiers.shift {
                    self.select_shape(None, false)?;
                }
            }
        }
        Ok(self.active_gesture())
    }

    /// Shapes and guides for the gesture at `point`; `None` while a drag is
    /// still within the click radius.
    fn gesture_frame(&mut self, point: Point, modifiers: Modifiers) -> Option<(Vec<Shape>, Vec<Guide>)> {
        let active = self.gesture.as_mut()?;
        let shapes = self.state.shapes();
        let config = self.state.config();
        match &mut active.gesture {
            Gesture::Drag(drag) => {
                let frame = drag.update(shapes, point, modifiers.shift, config);
                if drag.is_click(config.click_threshold) {
                    return None;
                }
                Some((frame.shapes, frame.guides))
            }
            Gesture::Resize(resize) => Some((resize.update(shapes, point, modifiers.shift, config), Vec::new())),
            Gesture::Rotate(rotate) => Some((rotate.update(shapes, point, modifiers.shift, config), Vec::new())),
            Gesture::VertexDrag(drag) => drag.update(shapes, point, config),
        }
    }

    /// Preview the running gesture at `point`. History is not touched.
    pub fn pointer_move(&mut self, point: Point, modifiers: Modifiers) -> EditorResult<()> {
        if let Some((shapes, guides)) = self.gesture_frame(point, modifiers) {
            self.guides.set(guides);
            self.dispatch(Action::Preview(shapes))?;
        }
        Ok(())
    }

    /// Finish the running gesture with a single commit.
    ///
    /// A drag that never left the click radius selects its shape instead
    /// (additively with shift).
    pub fn pointer_up(&mut self, point: Point, modifiers: Modifiers) -> EditorResult<()> {
        let frame = self.gesture_frame(point, modifiers);
        let clicked = match self.gesture.as_ref().map(|a| &a.gesture) {
            Some(Gesture::Drag(drag)) if frame.is_none() => Some(drag.primary()),
            _ => None,
        };
        let Some(active) = self.gesture.take() else {
            return Ok(());
        };
        log::debug!("End {:?}", active.kind());
        drop(active);
        self.guides.clear();

        // A plain click on a shape in vertex-edit mode keeps that mode, so a
        // double-click can still toggle it off.
        let keeps_editing = !modifiers.shift
            && clicked.is_some_and(|id| self.state.shape(id).is_some_and(Shape::is_editing_vertices));
        if keeps_editing {
            return Ok(());
        }
        if let Some(id) = clicked {
            self.select_shape(Some(id), modifiers.shift)?;
        } else if let Some((shapes, _)) = frame {
            self.dispatch(Action::Commit(shapes))?;
        }
        Ok(())
    }

    // --- Commands -------------------------------------------------------

    pub fn select_shape(&mut self, id: Option<ShapeId>, additive: bool) -> EditorResult<bool> {
        self.dispatch(Action::Select { id, additive })
    }

    /// Delete `id`, or every selected shape when `None`.
    pub fn delete_shape(&mut self, id: Option<ShapeId>) -> EditorResult<bool> {
        self.cancel_gesture();
        self.dispatch(Action::Delete(id))
    }

    pub fn delete_vertex(&mut self, id: ShapeId, index: usize) -> EditorResult<bool> {
        let deleted = self.dispatch(Action::DeleteVertex { shape: id, index })?;
        if deleted && self.selected_vertex == Some((id, index)) {
            self.selected_vertex = None;
        }
        Ok(deleted)
    }

    pub fn undo(&mut self) -> EditorResult<bool> {
        self.cancel_gesture();
        self.dispatch(Action::Undo)
    }

    pub fn redo(&mut self) -> EditorResult<bool> {
        self.cancel_gesture();
        self.dispatch(Action::Redo)
    }

    pub fn copy(&mut self) -> EditorResult<bool> {
        self.dispatch(Action::Copy)
    }

    pub fn paste(&mut self) -> EditorResult<bool> {
        self.dispatch(Action::Paste)
    }

    pub fn add_shape(&mut self, shape: Shape) -> EditorResult<ShapeId> {
        let id = shape.id();
        self.dispatch(Action::AddShape(shape))?;
        Ok(id)
    }

    /// Add the default 150×100 rectangle.
    pub fn add_rectangle(&mut self) -> EditorResult<ShapeId> {
        let shape = self.state.new_rectangle();
        self.add_shape(shape)
    }

    /// Add a text box on the first floor.
    pub fn add_text(&mut self, position: Point, label: &str) -> EditorResult<ShapeId> {
        let text = Text::new(position, label, self.state.default_floor_id());
        self.add_shape(Shape::Text(text))
    }

    pub fn update_shape(&mut self, shape: Shape) -> EditorResult<bool> {
        self.dispatch(Action::UpdateShape(shape))
    }

    pub fn set_floors(&mut self, floors: Vec<Floor>) -> EditorResult<bool> {
        self.dispatch(Action::SetFloors(floors))
    }

    pub fn set_settings(&mut self, settings: CanvasSettings) -> EditorResult<bool> {
        self.dispatch(Action::SetSettings(settings))
    }

    pub fn zoom(&mut self, command: ZoomCommand) -> EditorResult<bool> {
        self.dispatch(Action::Zoom(command))
    }

    pub fn align_selected(&mut self, alignment: Alignment) -> EditorResult<bool> {
        self.dispatch(Action::Align(alignment))
    }

    // --- Vertex editing -------------------------------------------------

    /// Switch `id` to vertex-edit mode. Text shapes are left alone.
    pub fn enter_vertex_edit(&mut self, id: ShapeId) -> EditorResult<bool> {
        let shape = self.require_shape(id)?;
        let Some(edited) = vertex::enter_vertex_edit(shape) else {
            log::debug!("{} {} has no vertices to edit", shape.kind_name(), id);
            return Ok(false);
        };
        let shapes = replace_shape(self.state.shapes(), edited);
        self.dispatch(Action::Commit(shapes))
    }

    /// Leave vertex-edit mode on `id`; it becomes selected.
    pub fn exit_vertex_edit(&mut self, id: ShapeId) -> EditorResult<bool> {
        let shape = self.require_shape(id)?;
        if !shape.is_editing_vertices() {
            return Ok(false);
        }
        let shapes = replace_shape(self.state.shapes(), vertex::exit_vertex_edit(shape));
        if matches!(self.selected_vertex, Some((v, _)) if v == id) {
            self.selected_vertex = None;
        }
        self.dispatch(Action::Commit(shapes))
    }

    fn exit_all_vertex_edits(&mut self) -> EditorResult<bool> {
        if !self.state.shapes().iter().any(Shape::is_editing_vertices) {
            return Ok(false);
        }
        let shapes = self
            .state
            .shapes()
            .iter()
            .map(|s| {
                if s.is_editing_vertices() {
                    vertex::exit_vertex_edit(s)
                } else {
                    s.clone()
                }
            })
            .collect();
        self.selected_vertex = None;
        self.dispatch(Action::Commit(shapes))
    }

    /// Double-click on a shape body: toggles vertex editing, or starts text
    /// editing on text boxes.
    pub fn double_click(&mut self, id: ShapeId) -> EditorResult<bool> {
        let shape = self.require_shape(id)?;
        if shape.is_editing_vertices() {
            return self.exit_vertex_edit(id);
        }
        if let Shape::Text(_) = shape {
            let mut editing = shape.clone();
            editing.set_state(WidgetState::Editing(EditingKind::Text));
            let shapes = replace_shape(self.state.shapes(), editing);
            return self.dispatch(Action::Commit(shapes));
        }
        self.enter_vertex_edit(id)
    }

    /// Insert a vertex on segment `segment` of `id` at canvas `point`.
    pub fn click_segment(&mut self, id: ShapeId, segment: usize, point: Point) -> EditorResult<bool> {
        let shape = self.require_shape(id)?;
        if shape.as_polygon().is_none() {
            return Err(EditorError::NotAPolygon(id));
        }
        let Some(inserted) = vertex::insert_vertex(shape, segment, point) else {
            return Ok(false);
        };
        let shapes = replace_shape(self.state.shapes(), inserted);
        self.selected_vertex = Some((id, segment + 1));
        self.dispatch(Action::Commit(shapes))
    }

    // --- Keyboard -------------------------------------------------------

    /// Run the command bound to a key, if any.
    pub fn handle_key(
        &mut self,
        event: &KeyEvent,
        modifiers: Modifiers,
        text_field_focused: bool,
    ) -> EditorResult<Option<KeyCommand>> {
        let Some(command) = key_command(event, modifiers, text_field_focused) else {
            return Ok(None);
        };
        match command {
            KeyCommand::Undo => {
                self.undo()?;
            }
            KeyCommand::Redo => {
                self.redo()?;
            }
            KeyCommand::Copy => {
                self.copy()?;
            }
            KeyCommand::Paste => {
                self.paste()?;
            }
            KeyCommand::Delete => {
                let vertex_target = self
                    .selected_vertex
                    .filter(|(id, _)| self.state.shape(*id).is_some_and(Shape::is_editing_vertices));
                match vertex_target {
                    Some((id, index)) => {
                        self.delete_vertex(id, index)?;
                    }
                    None => {
                        self.delete_shape(None)?;
                    }
                }
            }
            KeyCommand::Escape => {
                self.cancel_gesture();
                self.exit_all_vertex_edits()?;
            }
        }
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Corner, Edge};
    use crate::shapes::Rectangle;
    use std::cell::Cell;
    use std::rc::Rc;

    const NONE: Modifiers = Modifiers::NONE;

    fn canvas_with_rect(x: f64, y: f64, w: f64, h: f64) -> (Canvas, ShapeId) {
        let mut canvas = Canvas::default();
        let floor = canvas.state().default_floor_id();
        let id = canvas
            .add_shape(Shape::Rectangle(Rectangle::new(Point::new(x, y), w, h, floor)))
            .unwrap();
        (canvas, id)
    }

    fn counting_listener(canvas: &mut Canvas) -> Rc<Cell<usize>> {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        canvas.set_listener(move |_: &[Shape]| seen.set(seen.get() + 1));
        calls
    }

    #[test]
    fn test_drag_previews_then_commits_once() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 50.0, 50.0);
        let calls = counting_listener(&mut canvas);
        let entries = canvas.state().history().len();

        assert_eq!(canvas.pointer_down(Point::new(10.0, 10.0), NONE).unwrap(), Some(GestureKind::Drag));
        assert_eq!(canvas.active_captures(), 1);
        for step in 1..=5 {
            canvas.pointer_move(Point::new(10.0 + step as f64 * 20.0, 10.0), NONE).unwrap();
        }
        assert_eq!(canvas.state().history().len(), entries);
        canvas.pointer_up(Point::new(110.0, 10.0), NONE).unwrap();

        assert_eq!(canvas.state().history().len(), entries + 1);
        assert_eq!(canvas.shape(id).unwrap().position(), Point::new(100.0, 0.0));
        assert_eq!(calls.get(), 6);
        assert_eq!(canvas.active_captures(), 0);
        assert!(canvas.guides().is_empty());
    }

    #[test]
    fn test_click_adds_no_history_entry() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 50.0, 50.0);
        canvas.select_shape(Some(id), false).unwrap();
        let entries = canvas.state().history().len();

        canvas.pointer_down(Point::new(10.0, 10.0), NONE).unwrap();
        canvas.pointer_move(Point::new(12.0, 11.0), NONE).unwrap();
        canvas.pointer_up(Point::new(12.0, 11.0), NONE).unwrap();

        assert_eq!(canvas.state().history().len(), entries);
        assert_eq!(canvas.shape(id).unwrap().position(), Point::ZERO);
        assert!(canvas.shape(id).unwrap().is_selected());
        assert_eq!(canvas.active_captures(), 0);
    }

    #[test]
    fn test_click_selects_and_shift_click_toggles() {
        let (mut canvas, a) = canvas_with_rect(0.0, 0.0, 50.0, 50.0);
        let b = canvas.add_rectangle().unwrap();

        canvas.pointer_down(Point::new(10.0, 10.0), NONE).unwrap();
        canvas.pointer_up(Point::new(10.0, 10.0), NONE).unwrap();
        assert!(canvas.shape(a).unwrap().is_selected());

        canvas.pointer_down(Point::new(150.0, 150.0), Modifiers::SHIFT).unwrap();
        canvas.pointer_up(Point::new(150.0, 150.0), Modifiers::SHIFT).unwrap();
        assert!(canvas.shape(a).unwrap().is_selected());
        assert!(canvas.shape(b).unwrap().is_selected());

        // Background click clears.
        canvas.pointer_down(Point::new(900.0, 600.0), NONE).unwrap();
        assert_eq!(canvas.state().selected_shapes().count(), 0);
    }

    #[test]
    fn test_resize_via_handle() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 100.0, 50.0);
        canvas.select_shape(Some(id), false).unwrap();

        let kind = canvas.pointer_down(Point::new(100.0, 50.0), NONE).unwrap();
        assert_eq!(kind, Some(GestureKind::Resize));
        canvas.pointer_move(Point::new(130.0, 70.0), NONE).unwrap();
        canvas.pointer_up(Point::new(130.0, 70.0), NONE).unwrap();

        let shape = canvas.shape(id).unwrap();
        assert!((shape.size().width - 130.0).abs() < 1e-9);
        assert!((shape.size().height - 70.0).abs() < 1e-9);
        assert_eq!(shape.position(), Point::ZERO);
    }

    #[test]
    fn test_begin_resize_clamps() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 100.0, 50.0);
        canvas
            .begin_resize(Point::new(0.0, 25.0), id, ResizeHandle::Edge(Edge::Left))
            .unwrap();
        canvas.pointer_up(Point::new(500.0, 25.0), NONE).unwrap();
        let shape = canvas.shape(id).unwrap();
        assert!((shape.size().width - 20.0).abs() < 1e-9);
        assert!((shape.bounds().x1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_commits_once() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 100.0, 50.0);
        let entries = canvas.state().history().len();
        canvas.begin_rotate(Point::new(50.0, -25.0), id).unwrap();
        canvas.pointer_move(Point::new(100.0, -20.0), NONE).unwrap();
        canvas.pointer_move(Point::new(120.0, 20.0), Modifiers::SHIFT).unwrap();
        canvas.pointer_up(Point::new(150.0, 25.0), Modifiers::SHIFT).unwrap();

        assert_eq!(canvas.state().history().len(), entries + 1);
        assert!((canvas.shape(id).unwrap().rotation() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_escape_cancels_and_reverts_preview() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 50.0, 50.0);
        let entries = canvas.state().history().len();
        canvas.begin_drag(Point::new(10.0, 10.0), id).unwrap();
        canvas.pointer_move(Point::new(80.0, 80.0), NONE).unwrap();
        assert_eq!(canvas.shape(id).unwrap().position(), Point::new(70.0, 70.0));

        let command = canvas
            .handle_key(&KeyEvent::Pressed("Escape".into()), NONE, false)
            .unwrap();
        assert_eq!(command, Some(KeyCommand::Escape));
        assert_eq!(canvas.active_captures(), 0);
        assert_eq!(canvas.shape(id).unwrap().position(), Point::ZERO);
        assert_eq!(canvas.state().history().len(), entries);
    }

    #[test]
    fn test_new_gesture_replaces_old_capture() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 50.0, 50.0);
        canvas.begin_drag(Point::ZERO, id).unwrap();
        canvas.begin_rotate(Point::ZERO, id).unwrap();
        canvas
            .begin_resize(Point::ZERO, id, ResizeHandle::Corner(Corner::TopLeft))
            .unwrap();
        assert_eq!(canvas.active_captures(), 1);
        assert_eq!(canvas.active_gesture(), Some(GestureKind::Resize));
        drop(canvas);
    }

    #[test]
    fn test_capture_released_when_canvas_dropped() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 50.0, 50.0);
        let root = canvas.root.clone();
        canvas.begin_drag(Point::ZERO, id).unwrap();
        assert_eq!(root.active_captures(), 1);
        drop(canvas);
        assert_eq!(root.active_captures(), 0);
    }

    #[test]
    fn test_unknown_shape_is_an_error() {
        let mut canvas = Canvas::default();
        let missing = uuid::Uuid::new_v4();
        assert!(matches!(
            canvas.begin_drag(Point::ZERO, missing),
            Err(EditorError::ShapeNotFound(_))
        ));
        assert_eq!(canvas.active_captures(), 0);
    }

    #[test]
    fn test_vertex_drag_needs_a_real_vertex() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 40.0, 20.0);
        assert!(matches!(
            canvas.begin_vertex_drag(Point::ZERO, id, 0),
            Err(EditorError::NotAPolygon(_))
        ));
        canvas.enter_vertex_edit(id).unwrap();
        assert!(matches!(
            canvas.begin_vertex_drag(Point::ZERO, id, 9),
            Err(EditorError::VertexOutOfRange { index: 9, .. })
        ));
        assert_eq!(canvas.active_captures(), 0);
    }

    #[test]
    fn test_vertex_editing_flow() {
        let (mut canvas, id) = canvas_with_rect(100.0, 100.0, 40.0, 20.0);
        assert!(canvas.double_click(id).unwrap());
        assert!(canvas.shape(id).unwrap().is_editing_vertices());

        // Grab the top-left vertex and pull it out.
        let kind = canvas.pointer_down(Point::new(100.0, 100.0), NONE).unwrap();
        assert_eq!(kind, Some(GestureKind::VertexDrag));
        canvas.pointer_move(Point::new(90.0, 95.0), NONE).unwrap();
        canvas.pointer_up(Point::new(90.0, 95.0), NONE).unwrap();
        let shape = canvas.shape(id).unwrap();
        assert_eq!(shape.position(), Point::new(90.0, 95.0));
        assert_eq!(canvas.selected_vertex(), Some((id, 0)));

        // Delete removes the grabbed vertex, not the shape.
        canvas
            .handle_key(&KeyEvent::Pressed("Delete".into()), NONE, false)
            .unwrap();
        assert_eq!(canvas.shape(id).unwrap().vertices().unwrap().len(), 3);

        // Escape leaves vertex mode with the shape selected.
        canvas
            .handle_key(&KeyEvent::Pressed("Escape".into()), NONE, false)
            .unwrap();
        let shape = canvas.shape(id).unwrap();
        assert!(shape.is_selected());
        assert!(!shape.is_editing_vertices());
    }

    #[test]
    fn test_click_keeps_vertex_edit_mode() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 100.0, 60.0);
        canvas.double_click(id).unwrap();
        let entries = canvas.state().history().len();

        canvas.pointer_down(Point::new(50.0, 30.0), NONE).unwrap();
        canvas.pointer_up(Point::new(50.0, 30.0), NONE).unwrap();
        assert!(canvas.shape(id).unwrap().is_editing_vertices());
        assert_eq!(canvas.state().history().len(), entries);

        assert!(canvas.double_click(id).unwrap());
        assert_eq!(canvas.shape(id).unwrap().state(), WidgetState::Selected);
    }

    #[test]
    fn test_segment_click_inserts_vertex() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 100.0, 60.0);
        canvas.enter_vertex_edit(id).unwrap();
        let kind = canvas.pointer_down(Point::new(50.0, 3.0), NONE).unwrap();
        assert_eq!(kind, None);
        let vertices = canvas.shape(id).unwrap().vertices().unwrap().to_vec();
        assert_eq!(vertices.len(), 5);
        assert_eq!(vertices[1], Point::new(50.0, 3.0));
    }

    #[test]
    fn test_text_double_click_edits_text() {
        let mut canvas = Canvas::default();
        let id = canvas.add_text(Point::new(10.0, 10.0), "Stage").unwrap();
        assert!(!canvas.enter_vertex_edit(id).unwrap());
        canvas.double_click(id).unwrap();
        assert_eq!(
            canvas.shape(id).unwrap().state(),
            WidgetState::Editing(EditingKind::Text)
        );
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let (mut canvas, id) = canvas_with_rect(0.0, 0.0, 50.0, 50.0);
        canvas.select_shape(Some(id), false).unwrap();
        let ctrl = Modifiers::CTRL;

        canvas.handle_key(&KeyEvent::Pressed("c".into()), ctrl, false).unwrap();
        canvas.handle_key(&KeyEvent::Pressed("v".into()), ctrl, false).unwrap();
        assert_eq!(canvas.shapes().len(), 2);

        canvas.handle_key(&KeyEvent::Pressed("z".into()), ctrl, false).unwrap();
        assert_eq!(canvas.shapes().len(), 1);
        canvas.handle_key(&KeyEvent::Pressed("y".into()), ctrl, false).unwrap();
        assert_eq!(canvas.shapes().len(), 2);

        // Typing in a field must not delete shapes.
        canvas
            .handle_key(&KeyEvent::Pressed("Backspace".into()), NONE, true)
            .unwrap();
        assert_eq!(canvas.shapes().len(), 2);
        canvas
            .handle_key(&KeyEvent::Pressed("Backspace".into()), NONE, false)
            .unwrap();
        assert_eq!(canvas.shapes().len(), 1);
    }
}
