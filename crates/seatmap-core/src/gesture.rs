//! Pointer capture for in-progress gestures.
//!
//! Once a gesture starts, move and up events are routed from the event root
//! to it regardless of what is under the pointer. The routing lives exactly as
//! long as a [`PointerCapture`] token: dropping the token releases it, whether
//! the gesture ended normally, was cancelled or was replaced.

use crate::shapes::ShapeId;
use crate::transform::{DragState, ResizeState, RotateState};
use crate::vertex::VertexDragState;
use std::cell::RefCell;
use std::rc::Rc;

/// Kind of pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
    Rotate,
    VertexDrag,
}

#[derive(Debug, Default)]
struct CaptureRegistry {
    next_id: u64,
    active: Vec<(u64, GestureKind)>,
}

/// Source of pointer events for the whole canvas.
#[derive(Debug, Clone, Default)]
pub struct EventRoot {
    registry: Rc<RefCell<CaptureRegistry>>,
}

impl EventRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route pointer events to a gesture of `kind` until the token drops.
    pub fn capture(&self, kind: GestureKind) -> PointerCapture {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.active.push((id, kind));
        log::debug!("Pointer captured for {:?}", kind);
        PointerCapture {
            id,
            kind,
            registry: Rc::clone(&self.registry),
        }
    }

    /// Number of live captures.
    pub fn active_captures(&self) -> usize {
        self.registry.borrow().active.len()
    }

    /// Kind of the live capture, if any.
    pub fn captured_kind(&self) -> Option<GestureKind> {
        self.registry.borrow().active.last().map(|(_, kind)| *kind)
    }
}

/// Scoped pointer capture. Released on drop.
#[derive(Debug)]
pub struct PointerCapture {
    id: u64,
    kind: GestureKind,
    registry: Rc<RefCell<CaptureRegistry>>,
}

impl PointerCapture {
    pub fn kind(&self) -> GestureKind {
        self.kind
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        let mut registry = self.registry.borrow_mut();
        registry.active.retain(|(id, _)| *id != self.id);
        log::debug!("Pointer released from {:?}", self.kind);
    }
}

/// Per-kind gesture state.
#[derive(Debug, Clone)]
pub enum Gesture {
    Drag(DragState),
    Resize(ResizeState),
    Rotate(RotateState),
    VertexDrag(VertexDragState),
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::Drag(_) => GestureKind::Drag,
            Gesture::Resize(_) => GestureKind::Resize,
            Gesture::Rotate(_) => GestureKind::Rotate,
            Gesture::VertexDrag(_) => GestureKind::VertexDrag,
        }
    }

    /// Shape the gesture was started on.
    pub fn shape_id(&self) -> ShapeId {
        match self {
            Gesture::Drag(d) => d.primary(),
            Gesture::Resize(r) => r.shape_id(),
            Gesture::Rotate(r) => r.shape_id(),
            Gesture::VertexDrag(v) => v.shape_id,
        }
    }
}

/// A running gesture together with its pointer capture.
#[derive(Debug)]
pub struct ActiveGesture {
    pub gesture: Gesture,
    _capture: PointerCapture,
}

impl ActiveGesture {
    /// Capture the pointer on `root` for `gesture`.
    pub fn start(root: &EventRoot, gesture: Gesture) -> Self {
        let capture = root.capture(gesture.kind());
        Self {
            gesture,
            _capture: capture,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.gesture.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_released_on_drop() {
        let root = EventRoot::new();
        {
            let capture = root.capture(GestureKind::Drag);
            assert_eq!(capture.kind(), GestureKind::Drag);
            assert_eq!(root.active_captures(), 1);
            assert_eq!(root.captured_kind(), Some(GestureKind::Drag));
        }
        assert_eq!(root.active_captures(), 0);
        assert_eq!(root.captured_kind(), None);
    }

    #[test]
    fn test_replacing_capture_releases_previous() {
        let root = EventRoot::new();
        let mut slot = Some(root.capture(GestureKind::Resize));
        // Drop the old capture before taking a new one.
        slot.take();
        slot = Some(root.capture(GestureKind::Rotate));
        assert_eq!(root.active_captures(), 1);
        assert_eq!(root.captured_kind(), Some(GestureKind::Rotate));
        drop(slot);
        assert_eq!(root.active_captures(), 0);
    }

    #[test]
    fn test_out_of_order_release() {
        let root = EventRoot::new();
        let a = root.capture(GestureKind::Drag);
        let b = root.capture(GestureKind::VertexDrag);
        drop(a);
        assert_eq!(root.captured_kind(), Some(GestureKind::VertexDrag));
        drop(b);
        assert_eq!(root.active_captures(), 0);
    }
}
