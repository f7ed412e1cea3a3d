//! # LevelKit
//!
//! A Rust-based 2D game scene editor core:
//! - Place game objects on a canvas by drag-and-drop from an asset palette
//! - Move, resize, and rotate objects with pointer gestures
//! - Import scenes written with legacy field names; export canonical JSON
//! - Render the editing canvas, selection decoration included, to an
//!   image buffer
//!
//! ## Architecture
//!
//! LevelKit is organized as a workspace with multiple crates:
//!
//! 1. **levelkit-core** - Core types, constants, errors, event dispatch
//! 2. **levelkit-editor** - Scene model, gestures, rendering, persistence
//! 3. **levelkit** - Main binary that integrates the crates
//!
//! The editor core is single-threaded and event-driven: the embedding
//! application forwards pointer events and repaints when the editor says
//! the model changed.

#![allow(dead_code)]

pub use levelkit_editor as editor;

pub use levelkit_core::{
    AssetError, EditorEvent, Error, EventDispatcher, ImportError, ListenerHandle, Result,
    SceneError, StatusLevel, StorageError,
};

pub use levelkit_editor::{
    handle_at, handles_for, object_at, parse_drop_payload, render_scene, Editor, FileSceneStore,
    Handle, HandleKind, ImageState, ImageStore, InteractionState, MemorySceneStore,
    PaletteCatalog, PaletteEntry, Scene, SceneFile, SceneObject, SceneObjectData, SceneStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
