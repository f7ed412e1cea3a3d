//! Gesture state machine for pointer-driven object manipulation.
//!
//! One tagged state replaces the usual trio of `is_dragging`/`is_resizing`/
//! `is_rotating` flags, so overlapping gestures are unrepresentable. The
//! machine is long-lived: it cycles back to `Idle` after every gesture and
//! never terminates.
//!
//! Pointer-down resolution order: handles of the currently selected object
//! first (the rotate handle floats outside the object's box and would be
//! unreachable otherwise), then topmost object hit, then empty space which
//! clears the selection.

use levelkit_core::constants::MIN_OBJECT_SIZE;

use crate::hit_test::{handle_at, object_at, Handle, HandleKind};
use crate::scene::Scene;

/// Current gesture, with the data recorded at gesture start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving the selected object; offset is pointer minus object center
    /// at pointer-down.
    Dragging { offset_x: f64, offset_y: f64 },
    /// Dragging the resize handle. The size at gesture start anchors the
    /// resize formula for the whole gesture.
    Resizing {
        handle: Handle,
        start_width: f64,
        start_height: f64,
    },
    /// Dragging the rotate handle.
    Rotating,
}

impl InteractionState {
    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, InteractionState::Idle)
    }
}

/// Outcome of a pointer-down, for callers that surface selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDownOutcome {
    /// A handle gesture began on the already-selected object.
    HandleGrabbed(HandleKind),
    /// An object was selected (or re-selected) and a drag began.
    ObjectGrabbed(u64),
    /// Empty space: selection cleared.
    Cleared,
}

/// Applies a pointer-down to the scene, returning the next state.
///
/// Mutates only the selection; geometry changes happen on pointer-move.
pub fn pointer_down(scene: &mut Scene, px: f64, py: f64) -> (InteractionState, PointerDownOutcome) {
    if let Some(selected) = scene.selected() {
        if let Some(handle) = handle_at(px, py, selected) {
            let state = match handle.kind {
                HandleKind::Resize => InteractionState::Resizing {
                    handle,
                    start_width: selected.width,
                    start_height: selected.height,
                },
                HandleKind::Rotate => InteractionState::Rotating,
            };
            return (state, PointerDownOutcome::HandleGrabbed(handle.kind));
        }
    }

    match object_at(scene, px, py) {
        Some(id) => {
            scene.select(id);
            let obj = scene.get(id).expect("hit object present");
            let state = InteractionState::Dragging {
                offset_x: px - obj.x,
                offset_y: py - obj.y,
            };
            (state, PointerDownOutcome::ObjectGrabbed(id))
        }
        None => {
            scene.clear_selection();
            (InteractionState::Idle, PointerDownOutcome::Cleared)
        }
    }
}

/// Applies a pointer-move in the given state to the selected object.
///
/// Returns `true` when the scene was mutated (caller should repaint).
/// `Idle` moves and moves with no selection are ignored.
pub fn pointer_move(scene: &mut Scene, state: &InteractionState, px: f64, py: f64) -> bool {
    let Some(id) = scene.selected_id() else {
        return false;
    };
    let Some(obj) = scene.get_mut(id) else {
        return false;
    };

    match *state {
        InteractionState::Idle => false,
        InteractionState::Dragging { offset_x, offset_y } => {
            obj.x = px - offset_x;
            obj.y = py - offset_y;
            true
        }
        InteractionState::Resizing {
            start_width,
            start_height,
            ..
        } => {
            // Anchored on the gesture-start size: grows from the center
            // outward as the pointer moves past the bottom-right corner.
            obj.width = (px - obj.x + start_width / 2.0).max(MIN_OBJECT_SIZE);
            obj.height = (py - obj.y + start_height / 2.0).max(MIN_OBJECT_SIZE);
            true
        }
        InteractionState::Rotating => {
            obj.rotation = (py - obj.y).atan2(px - obj.x);
            true
        }
    }
}

/// Ends the current gesture (pointer-up or pointer leaving the canvas).
///
/// No snap or commit: the object keeps the live values already written.
pub fn pointer_up() -> InteractionState {
    InteractionState::Idle
}
