//! Error handling for LevelKit
//!
//! Provides error types for all layers of the editor:
//! - Import errors (drop payloads, scene normalization)
//! - Asset errors (image loading/decoding)
//! - Storage errors (scene persistence)
//! - Scene errors (model-level misuse)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Import error type
///
/// Represents errors raised while turning external data (drag payloads,
/// persisted scene files) into scene objects.
#[derive(Error, Debug, Clone)]
pub enum ImportError {
    /// Drag-and-drop payload was not valid JSON
    #[error("Malformed drop payload: {reason}")]
    MalformedPayload {
        /// Why the payload could not be parsed.
        reason: String,
    },

    /// The object collection was not an array
    #[error("Scene data does not contain an object array (looked under {keys})")]
    NotAnArray {
        /// The container keys that were probed.
        keys: String,
    },

    /// A field held a value of the wrong type
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField {
        /// The canonical field name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Asset error type
///
/// Represents errors around bitmap resources referenced by scene objects.
/// Decode failures are recoverable: the object keeps rendering with the
/// placeholder bitmap.
#[derive(Error, Debug, Clone)]
pub enum AssetError {
    /// Image bytes could not be decoded
    #[error("Failed to decode image {path}: {reason}")]
    DecodeFailed {
        /// Path of the image resource.
        path: String,
        /// Decoder error message.
        reason: String,
    },

    /// Image file could not be read
    #[error("Failed to read image {path}: {reason}")]
    ReadFailed {
        /// Path of the image resource.
        path: String,
        /// I/O error message.
        reason: String,
    },
}

/// Storage error type
///
/// Represents errors from the scene persistence boundary.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// No candidate location held the named scene
    #[error("Scene '{name}' not found ({attempts} locations tried)")]
    NotFound {
        /// The scene name that was requested.
        name: String,
        /// How many candidate paths were probed.
        attempts: usize,
    },

    /// A scene file existed but could not be parsed
    #[error("Failed to parse scene file {path}: {reason}")]
    ParseFailed {
        /// Path of the offending file.
        path: String,
        /// Parser error message.
        reason: String,
    },

    /// I/O failure while reading or writing a scene file
    #[error("Scene storage I/O error: {reason}")]
    Io {
        /// The underlying I/O error message.
        reason: String,
    },
}

/// Scene error type
///
/// Model-level errors. Public scene operations prefer silent no-ops over
/// these (removing an absent object is not an error); they exist for
/// callers that need to distinguish the cases.
#[derive(Error, Debug, Clone)]
pub enum SceneError {
    /// Referenced object id is not in the scene
    #[error("Object {id} not found in scene")]
    ObjectNotFound {
        /// The missing object id.
        id: u64,
    },
}

/// Main error type for LevelKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Asset error
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an import error
    pub fn is_import_error(&self) -> bool {
        matches!(self, Error::Import(_))
    }

    /// Check if this is a storage error
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// Check if this is a "scene not found" miss rather than a hard failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Storage(StorageError::NotFound { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
