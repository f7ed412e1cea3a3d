//! Scene persistence boundary.
//!
//! The editor core only knows the [`SceneStore`] trait: save a named scene
//! file, load one back, where `Ok(None)` means "no such scene, start
//! empty". The transport behind the trait belongs to the embedding
//! application; this module ships a directory-backed store (probing the
//! candidate locations older tooling layouts wrote to) and an in-memory
//! store for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use levelkit_core::{Result, StorageError};

use crate::serialization::{objects_from_value, SceneFile};

/// Save/load boundary for named scenes.
pub trait SceneStore {
    /// Persists the scene under the given name, replacing any previous
    /// version.
    fn save(&self, name: &str, scene: &SceneFile) -> Result<()>;

    /// Loads the named scene. `Ok(None)` means the scene does not exist
    /// and the editor should start empty.
    fn load(&self, name: &str) -> Result<Option<SceneFile>>;
}

/// Directory-backed scene store.
///
/// Loading probes a fixed candidate list under the root so that scenes
/// written by older tooling layouts keep resolving. A candidate that
/// exists but fails to parse is a hard error — the scene is never
/// partially applied.
#[derive(Debug, Clone)]
pub struct FileSceneStore {
    root: PathBuf,
}

impl FileSceneStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate locations for a named scene, in probe order.
    fn candidates(&self, name: &str) -> Vec<PathBuf> {
        vec![
            self.root.join(format!("templates/{name}.json")),
            self.root.join(format!("templates/{name}/{name}.json")),
            self.root.join(format!("templates/{name}/data.json")),
            self.root.join(format!("generated/{name}.json")),
            self.root.join(format!("generated/{name}/{name}.json")),
            self.root.join(format!("generated/{name}/data.json")),
        ]
    }

    fn read_scene_file(path: &Path, name: &str) -> Result<SceneFile> {
        let content = std::fs::read_to_string(path).map_err(|e| StorageError::Io {
            reason: format!("{}: {}", path.display(), e),
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| StorageError::ParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        // Current format first, then legacy template documents (bare
        // arrays or object containers with aliased fields).
        if let Ok(file) = serde_json::from_value::<SceneFile>(value.clone()) {
            return Ok(file);
        }

        let objects = objects_from_value(&value).map_err(|e| StorageError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut file = SceneFile::new(name);
        file.objects = objects;
        Ok(file)
    }
}

impl SceneStore for FileSceneStore {
    fn save(&self, name: &str, scene: &SceneFile) -> Result<()> {
        let path = self.root.join(format!("generated/{name}.json"));
        scene
            .save_to_file(&path)
            .map_err(|e| StorageError::Io {
                reason: format!("{}: {:#}", path.display(), e),
            })?;
        info!(name, path = %path.display(), "scene saved");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<SceneFile>> {
        let candidates = self.candidates(name);
        for path in &candidates {
            if !path.exists() {
                debug!(name, path = %path.display(), "scene candidate missing");
                continue;
            }
            let file = Self::read_scene_file(path, name)?;
            info!(name, path = %path.display(), objects = file.objects.len(), "scene loaded");
            return Ok(Some(file));
        }

        debug!(name, attempts = candidates.len(), "scene not found in any candidate location");
        Ok(None)
    }
}

/// In-memory scene store for tests and previews.
#[derive(Debug, Default)]
pub struct MemorySceneStore {
    scenes: RefCell<HashMap<String, SceneFile>>,
}

impl MemorySceneStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored scenes.
    pub fn len(&self) -> usize {
        self.scenes.borrow().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.scenes.borrow().is_empty()
    }
}

impl SceneStore for MemorySceneStore {
    fn save(&self, name: &str, scene: &SceneFile) -> Result<()> {
        self.scenes
            .borrow_mut()
            .insert(name.to_string(), scene.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<SceneFile>> {
        Ok(self.scenes.borrow().get(name).cloned())
    }
}
