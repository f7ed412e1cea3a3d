//! Serialization and import normalization for scene files.
//!
//! The canonical export shape is an ordered array of objects:
//! `{ type, x, y, width, height, rotation, img, properties }` with integer
//! geometry and full-precision rotation. Import accepts a superset of
//! legacy field names; the alias tables below are the single source of
//! truth for that mapping (no inline conditionals), and alias/canonical
//! equivalence is covered by tests.
//!
//! Persisted scenes wrap the array in a [`SceneFile`] with metadata,
//! using JSON on disk.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::warn;
use uuid::Uuid;

use levelkit_core::constants::{DEFAULT_OBJECT_POSITION, DEFAULT_OBJECT_SIZE};
use levelkit_core::ImportError;

use crate::scene::{Scene, SceneObject};

/// Scene file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Field aliases accepted on import, canonical name first.
const KIND_ALIASES: &[&str] = &["type", "id", "name"];
const X_ALIASES: &[&str] = &["x", "cx"];
const Y_ALIASES: &[&str] = &["y", "cy"];
const WIDTH_ALIASES: &[&str] = &["width", "w", "wid"];
const HEIGHT_ALIASES: &[&str] = &["height", "h", "hgt"];
const ROTATION_ALIASES: &[&str] = &["rotation", "rot"];
const IMG_ALIASES: &[&str] = &["img", "sprite", "file"];
const COLOR_ALIASES: &[&str] = &["color", "fill"];
const PROPERTIES_ALIASES: &[&str] = &["properties", "props"];

/// Container keys probed when the scene data is not a bare array.
const CONTAINER_KEYS: &[&str] = &["objects", "elements", "entities", "items"];

/// One object in the canonical export shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObjectData {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub rotation: f64,
    pub img: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Fallback fill carried for imported template objects; absent from
    /// exports of image-backed objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SceneObjectData {
    /// Canonical record for an in-memory object (geometry rounded).
    pub fn from_object(obj: &SceneObject) -> Self {
        Self {
            kind: obj.kind.clone(),
            x: obj.x.round() as i64,
            y: obj.y.round() as i64,
            width: obj.width.round() as i64,
            height: obj.height.round() as i64,
            rotation: obj.rotation,
            img: obj.image.clone(),
            properties: obj.properties.clone(),
            color: obj.color.clone(),
        }
    }

    /// Builds the in-memory object for this record under the given id.
    pub fn into_object(self, id: u64) -> SceneObject {
        SceneObject {
            id,
            kind: self.kind,
            x: self.x as f64,
            y: self.y as f64,
            width: self.width as f64,
            height: self.height as f64,
            rotation: self.rotation,
            image: self.img,
            color: self.color,
            properties: self.properties,
        }
    }
}

/// Scene metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Complete persisted scene structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub version: String,
    pub id: Uuid,
    pub metadata: SceneMetadata,
    pub objects: Vec<SceneObjectData>,
}

impl SceneFile {
    /// Create a new empty scene file
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            id: Uuid::new_v4(),
            metadata: SceneMetadata {
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            objects: Vec::new(),
        }
    }

    /// Snapshot the given scene under this name
    pub fn from_scene(name: impl Into<String>, scene: &Scene) -> Self {
        let mut file = Self::new(name);
        file.objects = scene.serialize();
        file
    }

    /// Save scene to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize scene")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).context("Failed to create scene directory")?;
        }
        std::fs::write(path.as_ref(), json).context("Failed to write scene file")?;

        Ok(())
    }

    /// Load scene from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read scene file")?;

        let mut file: SceneFile =
            serde_json::from_str(&content).context("Failed to parse scene file")?;

        // Update modified timestamp
        file.metadata.modified = Utc::now();

        Ok(file)
    }
}

/// Finds the object array in imported scene data.
///
/// Accepts a bare array or a container object holding the collection
/// under one of [`CONTAINER_KEYS`]. Anything else is an import error.
pub fn extract_objects(value: &Value) -> std::result::Result<Vec<Value>, ImportError> {
    if let Value::Array(items) = value {
        return Ok(items.clone());
    }

    if let Value::Object(map) = value {
        for key in CONTAINER_KEYS {
            if let Some(Value::Array(items)) = map.get(*key) {
                return Ok(items.clone());
            }
        }
    }

    Err(ImportError::NotAnArray {
        keys: CONTAINER_KEYS.join("/"),
    })
}

/// Normalizes one raw imported object to the canonical record.
///
/// Every field resolves through its alias table; missing numerics take
/// the documented defaults (60x60 at 150,150, no rotation). An `asset`
/// key becomes an `assets/`-prefixed image path. Unrecognized top-level
/// fields are dropped — only a nested properties map is carried over.
pub fn normalize_object(raw: &Map<String, Value>) -> SceneObjectData {
    let kind = first_string(raw, KIND_ALIASES).unwrap_or_else(|| "object".to_string());

    let img = first_string(raw, IMG_ALIASES).or_else(|| {
        raw.get("asset")
            .and_then(Value::as_str)
            .map(|asset| format!("assets/{}", asset))
    });

    let properties = PROPERTIES_ALIASES
        .iter()
        .find_map(|key| raw.get(*key))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    SceneObjectData {
        kind,
        x: first_number(raw, X_ALIASES).unwrap_or(DEFAULT_OBJECT_POSITION).round() as i64,
        y: first_number(raw, Y_ALIASES).unwrap_or(DEFAULT_OBJECT_POSITION).round() as i64,
        width: first_number(raw, WIDTH_ALIASES).unwrap_or(DEFAULT_OBJECT_SIZE).round() as i64,
        height: first_number(raw, HEIGHT_ALIASES).unwrap_or(DEFAULT_OBJECT_SIZE).round() as i64,
        rotation: first_number(raw, ROTATION_ALIASES).unwrap_or(0.0),
        img,
        properties,
        color: first_string(raw, COLOR_ALIASES),
    }
}

/// Normalizes a whole imported document into canonical records.
///
/// Non-object entries in the array are skipped with a warning; a document
/// with no object array at all is an error and leaves the caller's scene
/// untouched.
pub fn objects_from_value(value: &Value) -> std::result::Result<Vec<SceneObjectData>, ImportError> {
    let raw_objects = extract_objects(value)?;

    let mut normalized = Vec::with_capacity(raw_objects.len());
    for raw in &raw_objects {
        match raw.as_object() {
            Some(map) => normalized.push(normalize_object(map)),
            None => warn!(entry = %raw, "skipping non-object scene entry"),
        }
    }

    Ok(normalized)
}

fn first_string(map: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|key| match map.get(*key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn first_number(map: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_applies_defaults() {
        let raw = json!({});
        let data = normalize_object(raw.as_object().unwrap());

        assert_eq!(data.kind, "object");
        assert_eq!((data.x, data.y), (150, 150));
        assert_eq!((data.width, data.height), (60, 60));
        assert_eq!(data.rotation, 0.0);
        assert!(data.img.is_none());
    }

    #[test]
    fn alias_fields_equal_canonical_fields() {
        let canonical = json!({
            "type": "platform", "x": 10, "y": 20,
            "width": 30, "height": 40, "rotation": 0.5,
            "img": "assets/p.png", "properties": {"solid": true}
        });
        let aliased = json!({
            "name": "platform", "cx": 10, "cy": 20,
            "w": 30, "h": 40, "rot": 0.5,
            "sprite": "assets/p.png", "props": {"solid": true}
        });

        let a = normalize_object(canonical.as_object().unwrap());
        let b = normalize_object(aliased.as_object().unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn asset_key_gets_prefixed() {
        let raw = json!({"type": "coin", "asset": "coin.png"});
        let data = normalize_object(raw.as_object().unwrap());
        assert_eq!(data.img.as_deref(), Some("assets/coin.png"));
    }

    #[test]
    fn unknown_top_level_fields_are_dropped() {
        let raw = json!({"type": "coin", "velocity": 12, "properties": {"kept": 1}});
        let data = normalize_object(raw.as_object().unwrap());
        assert!(data.properties.contains_key("kept"));
        assert!(!data.properties.contains_key("velocity"));
    }

    #[test]
    fn extracts_bare_arrays_and_containers() {
        let bare = json!([{"type": "a"}]);
        assert_eq!(extract_objects(&bare).unwrap().len(), 1);

        for key in ["objects", "elements", "entities", "items"] {
            let doc = json!({ key: [{"type": "a"}, {"type": "b"}] });
            assert_eq!(extract_objects(&doc).unwrap().len(), 2, "key {}", key);
        }

        let bad = json!({"level": "one"});
        assert!(extract_objects(&bad).is_err());
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let doc = json!({"objects": [{"type": "a"}, 7, "junk"]});
        let objects = objects_from_value(&doc).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].kind, "a");
    }
}
