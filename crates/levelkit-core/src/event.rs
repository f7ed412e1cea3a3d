//! Editor event dispatch
//!
//! Provides:
//! - Event types for scene and asset state changes
//! - A synchronous dispatcher publishing events to registered listeners
//!
//! The editor core runs on a single thread, so dispatch is a plain callback
//! registry: `emit` invokes every matching listener before returning. Image
//! loads settle on the same thread via their completion callbacks, so no
//! channel or locking is involved.

use serde::{Deserialize, Serialize};

use crate::types::EventCallback;

/// Severity of a surfaced status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusLevel {
    /// Informational (e.g. "scene loaded").
    Info,
    /// Something failed but the editor recovered (e.g. scene not found).
    Warning,
}

/// Editor event types
///
/// Events are cloneable and serializable for logging/replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EditorEvent {
    /// Scene content changed (object added/removed/moved/resized/rotated/loaded)
    SceneChanged,
    /// Selection changed
    SelectionChanged(Option<u64>),
    /// An image load settled (ready or substituted with the placeholder)
    ImageSettled(String),
    /// A status message to surface to the user
    Status(StatusLevel, String),
}

impl std::fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorEvent::SceneChanged => write!(f, "Scene changed"),
            EditorEvent::SelectionChanged(Some(id)) => write!(f, "Selected object {}", id),
            EditorEvent::SelectionChanged(None) => write!(f, "Selection cleared"),
            EditorEvent::ImageSettled(path) => write!(f, "Image settled: {}", path),
            EditorEvent::Status(level, msg) => write!(f, "Status ({:?}): {}", level, msg),
        }
    }
}

/// Handle for a registered editor listener.
///
/// Uniquely identifies a listener registration. Pass it back to
/// [`EventDispatcher::unregister`] to stop receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// Event dispatcher publishing editor events to listeners
///
/// Listeners run synchronously, in registration order, on the calling
/// thread. A listener must not re-enter the dispatcher.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<(ListenerHandle, EventCallback<EditorEvent>)>,
    next_handle: u64,
}

impl EventDispatcher {
    /// Create a new dispatcher with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns a handle for unregistering
    pub fn register<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: Fn(&EditorEvent) + 'static,
    {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push((handle, Box::new(listener)));
        handle
    }

    /// Remove a previously registered listener
    ///
    /// Unknown handles are ignored.
    pub fn unregister(&mut self, handle: ListenerHandle) {
        self.listeners.retain(|(h, _)| *h != handle);
    }

    /// Publish an event to all listeners
    pub fn emit(&self, event: &EditorEvent) {
        tracing::trace!(%event, listeners = self.listeners.len(), "dispatching");
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_all_listeners() {
        let mut dispatcher = EventDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        for _ in 0..3 {
            let count = Rc::clone(&count);
            dispatcher.register(move |_| *count.borrow_mut() += 1);
        }

        dispatcher.emit(&EditorEvent::SceneChanged);
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn unregister_stops_delivery() {
        let mut dispatcher = EventDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        let count2 = Rc::clone(&count);
        let handle = dispatcher.register(move |_| *count2.borrow_mut() += 1);
        dispatcher.emit(&EditorEvent::SceneChanged);
        dispatcher.unregister(handle);
        dispatcher.emit(&EditorEvent::SceneChanged);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(dispatcher.listener_count(), 0);
    }
}
