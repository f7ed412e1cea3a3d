//! Editor-wide constants.
//!
//! Geometry defaults shared by the scene model, hit-testing, and the
//! interaction state machine. All values are canvas pixels.

/// Smallest width/height an object may reach through a resize gesture.
pub const MIN_OBJECT_SIZE: f64 = 20.0;

/// Width/height given to an object dropped from the palette.
pub const DEFAULT_OBJECT_SIZE: f64 = 60.0;

/// Center coordinate used when an imported object carries no position.
pub const DEFAULT_OBJECT_POSITION: f64 = 150.0;

/// Side length of the resize handle square.
pub const RESIZE_HANDLE_SIZE: f64 = 10.0;

/// Side length of the rotate handle square.
pub const ROTATE_HANDLE_SIZE: f64 = 12.0;

/// Vertical gap between an object's top edge and its rotate handle.
pub const ROTATE_HANDLE_GAP: f64 = 20.0;

/// Asset path substituted when an object's image cannot be loaded.
pub const PLACEHOLDER_ASSET: &str = "assets/placeholder.png";
