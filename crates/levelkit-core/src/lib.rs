//! # LevelKit Core
//!
//! Core types, constants, and utilities for LevelKit.
//! Provides the fundamental abstractions shared by the editor:
//! error taxonomy, editor events, and shared-state type aliases.

pub mod constants;
pub mod error;
pub mod event;
pub mod types;

pub use error::{AssetError, Error, ImportError, Result, SceneError, StorageError};

pub use event::{EditorEvent, EventDispatcher, ListenerHandle, StatusLevel};

// Re-export type aliases for convenience
pub use types::{shared, shared_none, shared_some, Callback, EventCallback, Shared, SharedOption, SharedVec};
