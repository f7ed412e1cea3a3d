//! Type aliases for commonly used complex types.
//!
//! The editor core is single-threaded and event-driven: all state lives on
//! the UI thread and is shared through `Rc<RefCell<T>>`. These aliases give
//! the pattern one name across crates.

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Use when the editor state must be reachable from several event handlers
/// on the same thread (pointer callbacks, image-settle hooks).
///
/// # Example
/// ```rust,ignore
/// let editor: Shared<Editor> = shared(Editor::new());
/// editor.borrow_mut().pointer_down(10.0, 20.0);
/// ```
pub type Shared<T> = Rc<RefCell<T>>;

/// An optional shared reference, for lazily-initialized shared state.
pub type SharedOption<T> = Rc<RefCell<Option<T>>>;

/// A shared vector for single-threaded collection management.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

/// Wrap a value in a [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create an empty [`SharedOption`].
pub fn shared_none<T>() -> SharedOption<T> {
    Rc::new(RefCell::new(None))
}

/// Create a populated [`SharedOption`].
pub fn shared_some<T>(value: T) -> SharedOption<T> {
    Rc::new(RefCell::new(Some(value)))
}

/// A boxed no-argument callback (e.g. a redraw request hook).
pub type Callback = Box<dyn Fn()>;

/// A boxed callback taking a borrowed event.
pub type EventCallback<E> = Box<dyn Fn(&E)>;
