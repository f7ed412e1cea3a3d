//! Editor state manager for UI integration.
//! Owns the scene, the image cache, and the gesture state machine, and
//! exposes the pointer/drop/save/load entry points the embedding event
//! loop calls.
//!
//! Everything runs on the calling thread. Mutations set a dirty flag; the
//! host repaints by calling [`Editor::render`] whenever the flag (or an
//! image settle) says so. Status messages from save/load are queued for
//! the host to drain and display.

use image::RgbImage;
use tracing::{info, warn};

use levelkit_core::{EditorEvent, EventDispatcher, StatusLevel};

use crate::images::ImageStore;
use crate::interaction::{self, InteractionState};
use crate::palette::{self, PaletteEntry};
use crate::render::render_scene;
use crate::scene::Scene;
use crate::serialization::SceneFile;
use crate::storage::SceneStore;

/// Editor state for UI integration
pub struct Editor {
    pub scene: Scene,
    pub images: ImageStore,
    interaction: InteractionState,
    dispatcher: EventDispatcher,
    needs_redraw: bool,
    status_messages: Vec<(StatusLevel, String)>,
    scene_name: String,
}

impl Editor {
    /// Creates an editor with an empty scene.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            images: ImageStore::new(),
            interaction: InteractionState::Idle,
            dispatcher: EventDispatcher::new(),
            needs_redraw: true,
            status_messages: Vec::new(),
            scene_name: "untitled".to_string(),
        }
    }

    /// The event dispatcher; hosts register listeners here.
    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    /// Name used for save operations and status messages.
    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    /// Current gesture state.
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Whether the canvas should be repainted.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Asks for a repaint without a model change (e.g. an image settled).
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    // ---- pointer events -------------------------------------------------

    /// Pointer pressed at canvas coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let before = self.scene.selected_id();
        let (state, _outcome) = interaction::pointer_down(&mut self.scene, x, y);
        self.interaction = state;

        if self.scene.selected_id() != before {
            self.dispatcher
                .emit(&EditorEvent::SelectionChanged(self.scene.selected_id()));
        }
        self.mark_changed();
    }

    /// Pointer moved while pressed (or hovering; idle moves are ignored).
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if interaction::pointer_move(&mut self.scene, &self.interaction, x, y) {
            self.mark_changed();
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        self.interaction = interaction::pointer_up();
    }

    /// Pointer left the canvas: same as release, the gesture ends.
    pub fn pointer_leave(&mut self) {
        self.interaction = interaction::pointer_up();
    }

    // ---- palette drops --------------------------------------------------

    /// Handles a drag-and-drop payload at the drop point.
    ///
    /// A malformed payload is logged and dropped; no object is created.
    pub fn drop_payload(&mut self, payload: &str, x: f64, y: f64) -> Option<u64> {
        match palette::parse_drop_payload(payload) {
            Ok(entry) => Some(self.drop_entry(&entry, x, y)),
            Err(err) => {
                warn!(error = %err, "ignoring invalid drop payload");
                None
            }
        }
    }

    /// Instantiates a palette entry at the drop point.
    pub fn drop_entry(&mut self, entry: &PaletteEntry, x: f64, y: f64) -> u64 {
        let id = self.scene.add_object(entry, x, y);
        self.images.request(&entry.img);
        info!(kind = %entry.name, x, y, "object added");
        self.mark_changed();
        id
    }

    // ---- editing --------------------------------------------------------

    /// Deletes the selected object, if any (Delete/Backspace shortcut).
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.scene.selected_id() {
            self.scene.remove_object(id);
            self.interaction = InteractionState::Idle;
            self.dispatcher.emit(&EditorEvent::SelectionChanged(None));
            self.mark_changed();
        }
    }

    // ---- persistence ----------------------------------------------------

    /// Serializes the scene to the canonical pretty-printed JSON array.
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.scene.serialize())
            .expect("scene serialization is infallible")
    }

    /// Saves the scene under the given name.
    pub fn save_scene(&mut self, store: &dyn SceneStore, name: &str) -> bool {
        let file = SceneFile::from_scene(name, &self.scene);
        match store.save(name, &file) {
            Ok(()) => {
                self.scene_name = name.to_string();
                self.push_status(StatusLevel::Info, format!("Scene \"{name}\" saved"));
                true
            }
            Err(err) => {
                warn!(name, error = %err, "scene save failed");
                self.push_status(StatusLevel::Warning, format!("Save failed: {err}"));
                false
            }
        }
    }

    /// Loads the named scene, replacing the current one on success.
    ///
    /// A missing scene starts empty with a status message; a load error
    /// keeps the current scene untouched (never a partial replacement).
    pub fn load_scene(&mut self, store: &dyn SceneStore, name: &str) -> bool {
        match store.load(name) {
            Ok(Some(file)) => {
                self.apply_scene_file(&file);
                self.scene_name = name.to_string();
                self.push_status(
                    StatusLevel::Info,
                    format!("Scene \"{name}\" loaded ({} objects)", self.scene.len()),
                );
                true
            }
            Ok(None) => {
                self.scene.clear();
                self.images.clear();
                self.interaction = InteractionState::Idle;
                self.scene_name = name.to_string();
                self.push_status(
                    StatusLevel::Warning,
                    format!("Scene \"{name}\" not found, starting empty"),
                );
                self.mark_changed();
                true
            }
            Err(err) => {
                warn!(name, error = %err, "scene load failed");
                self.push_status(StatusLevel::Warning, format!("Load failed: {err}"));
                false
            }
        }
    }

    /// Replaces the scene from an already-parsed file and queues the
    /// image loads its objects reference.
    pub fn apply_scene_file(&mut self, file: &SceneFile) {
        self.scene.load_objects(file.objects.clone());
        self.images.clear();
        for obj in self.scene.objects() {
            if let Some(path) = &obj.image {
                self.images.request(path);
            }
        }
        self.interaction = InteractionState::Idle;
        self.dispatcher.emit(&EditorEvent::SelectionChanged(None));
        self.mark_changed();
    }

    /// Drains queued status messages (newest last).
    pub fn take_status(&mut self) -> Vec<(StatusLevel, String)> {
        std::mem::take(&mut self.status_messages)
    }

    // ---- rendering ------------------------------------------------------

    /// Full repaint of the scene; clears the dirty flag.
    pub fn render(&mut self, width: u32, height: u32) -> RgbImage {
        self.needs_redraw = false;
        render_scene(&self.scene, &self.images, width, height)
    }

    fn mark_changed(&mut self) {
        self.needs_redraw = true;
        self.dispatcher.emit(&EditorEvent::SceneChanged);
    }

    fn push_status(&mut self, level: StatusLevel, message: String) {
        self.dispatcher
            .emit(&EditorEvent::Status(level, message.clone()));
        self.status_messages.push((level, message));
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("scene", &self.scene.len())
            .field("interaction", &self.interaction)
            .field("needs_redraw", &self.needs_redraw)
            .finish()
    }
}
