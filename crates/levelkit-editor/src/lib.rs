//! # LevelKit Editor
//!
//! This crate provides the scene-editing core for LevelKit: an in-memory
//! scene of placed game objects, pointer-gesture manipulation, and a 2D
//! renderer for the editing canvas.
//!
//! ## Core Components
//!
//! ### Scene
//! - **Scene model**: ordered objects with position, size, rotation,
//!   image reference, and free-form properties; single selection
//! - **Hit-testing**: topmost-wins object lookup and the two manipulation
//!   handles of the selected object
//! - **Interaction**: a tagged gesture state machine
//!   (Idle/Dragging/Resizing/Rotating) driven by pointer events
//!
//! ### I/O
//! - **Serialization**: canonical JSON export, legacy field-alias
//!   normalization on import, persisted scene files with metadata
//! - **Storage**: the `SceneStore` boundary plus directory and in-memory
//!   implementations
//! - **Images**: path-keyed bitmap cache settling to a placeholder on
//!   load failure
//! - **Palette**: the catalog of placeable object types and the
//!   drag-payload format
//!
//! ### Rendering
//! - **Renderer**: idempotent full-canvas repaint to an image buffer with
//!   selection decoration
//!
//! ## Architecture
//!
//! ```text
//! Editor (facade, dirty flag, status messages)
//!   ├── Scene (objects + selection)
//!   │     └── Hit-test / Interaction (gestures mutate the scene)
//!   ├── ImageStore (path -> bitmap, settle -> redraw hook)
//!   └── Renderer (scene + images -> RgbImage)
//!
//! SceneFile (persisted shape)
//!   └── SceneStore (save/load boundary)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use levelkit_editor::{Editor, PaletteEntry};
//!
//! let mut editor = Editor::new();
//! let entry = PaletteEntry::new("platform", "assets/platform.png");
//! editor.drop_entry(&entry, 100.0, 100.0);
//!
//! // Select and drag it 40px to the right.
//! editor.pointer_down(100.0, 100.0);
//! editor.pointer_move(140.0, 100.0);
//! editor.pointer_up();
//!
//! let frame = editor.render(800, 600);
//! assert_eq!(frame.width(), 800);
//! ```

pub mod editor;
pub mod font_manager;
pub mod hit_test;
pub mod images;
pub mod interaction;
pub mod palette;
pub mod render;
pub mod scene;
pub mod serialization;
pub mod storage;

pub use editor::Editor;
pub use hit_test::{handle_at, handles_for, object_at, Handle, HandleKind};
pub use images::{decode_image, ImageState, ImageStore};
pub use interaction::{InteractionState, PointerDownOutcome};
pub use palette::{parse_drop_payload, PaletteCatalog, PaletteCategory, PaletteEntry};
pub use render::render_scene;
pub use scene::{Scene, SceneObject};
pub use serialization::{
    extract_objects, normalize_object, objects_from_value, SceneFile, SceneMetadata,
    SceneObjectData,
};
pub use storage::{FileSceneStore, MemorySceneStore, SceneStore};
