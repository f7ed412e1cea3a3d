//! Scene model: the ordered collection of placed objects.
//!
//! The scene owns every [`SceneObject`]; the renderer and the interaction
//! state machine only borrow them. Insertion order is paint order (later =
//! on top) and therefore also hit-test priority.

use serde_json::{Map, Value};

use levelkit_core::constants::DEFAULT_OBJECT_SIZE;

use crate::palette::PaletteEntry;
use crate::serialization::SceneObjectData;

/// A placed game entity on the editing canvas.
///
/// `kind` is an open vocabulary ("player", "platform", ...), not an enum:
/// the palette and imported scenes may introduce arbitrary categories.
/// Position is the object's center in canvas pixels.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: u64,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Radians; written by the rotate gesture as atan2 of the pointer offset.
    pub rotation: f64,
    /// Bitmap resource path. The decoded pixels live in the `ImageStore`.
    pub image: Option<String>,
    /// Fallback fill (hex color string) when no image is set.
    pub color: Option<String>,
    /// Free-form metadata carried through import/export untouched.
    pub properties: Map<String, Value>,
}

impl SceneObject {
    /// Creates an object with drop defaults at the given center.
    pub fn new(id: u64, kind: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            kind: kind.into(),
            x,
            y,
            width: DEFAULT_OBJECT_SIZE,
            height: DEFAULT_OBJECT_SIZE,
            rotation: 0.0,
            image: None,
            color: None,
            properties: Map::new(),
        }
    }

    /// Axis-aligned bounding box `(x1, y1, x2, y2)`, rotation ignored.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.x - self.width / 2.0,
            self.y - self.height / 2.0,
            self.x + self.width / 2.0,
            self.y + self.height / 2.0,
        )
    }

    /// Whether the point falls strictly inside the bounding box.
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        let (x1, y1, x2, y2) = self.bounds();
        px > x1 && px < x2 && py > y1 && py < y2
    }
}

/// Ordered object collection plus the current selection.
///
/// At most one object is selected at a time. Removal of the selected
/// object clears the selection.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selected_id: Option<u64>,
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a new unique object ID.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends a new object from a palette entry at the given drop point.
    ///
    /// The object gets the default 60x60 size, zero rotation, and the
    /// entry's image path. Returns the new object's id.
    pub fn add_object(&mut self, entry: &PaletteEntry, x: f64, y: f64) -> u64 {
        let id = self.generate_id();
        let mut obj = SceneObject::new(id, entry.name.clone(), x, y);
        obj.image = Some(entry.img.clone());
        self.objects.push(obj);
        id
    }

    /// Appends an already-built object, assigning it a fresh id.
    pub fn push_object(&mut self, mut obj: SceneObject) -> u64 {
        let id = self.generate_id();
        obj.id = id;
        self.objects.push(obj);
        id
    }

    /// Removes an object by id.
    ///
    /// Clears the selection if the removed object was selected. Removing
    /// an id that is not in the scene is a no-op, not an error.
    pub fn remove_object(&mut self, id: u64) {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        if self.objects.len() != before && self.selected_id == Some(id) {
            self.selected_id = None;
        }
    }

    /// Replaces the whole collection with normalized imported objects.
    ///
    /// All-or-nothing: the previous contents and selection are discarded
    /// only because the caller already has a fully parsed collection in
    /// hand. Fresh ids are assigned in input order so paint order matches
    /// the source array.
    pub fn load_objects(&mut self, objects: Vec<SceneObjectData>) {
        self.objects.clear();
        self.selected_id = None;
        for data in objects {
            let id = self.generate_id();
            self.objects.push(data.into_object(id));
        }
    }

    /// Serializes the scene to the canonical export shape.
    ///
    /// Positions and sizes are rounded to integers; rotation keeps full
    /// float precision.
    pub fn serialize(&self) -> Vec<SceneObjectData> {
        self.objects.iter().map(SceneObjectData::from_object).collect()
    }

    /// Objects in paint order (first = bottom).
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Gets a reference to an object by id.
    pub fn get(&self, id: u64) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Gets a mutable reference to an object by id.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// The selected object's id, if any.
    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    /// The selected object, if any.
    pub fn selected(&self) -> Option<&SceneObject> {
        self.selected_id.and_then(|id| self.get(id))
    }

    /// Selects the object with the given id; unknown ids clear the selection.
    pub fn select(&mut self, id: u64) {
        self.selected_id = if self.get(id).is_some() { Some(id) } else { None };
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes every object and clears the selection.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.selected_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> PaletteEntry {
        PaletteEntry {
            name: name.to_string(),
            img: format!("assets/{}.png", name),
        }
    }

    #[test]
    fn add_object_uses_drop_defaults() {
        let mut scene = Scene::new();
        let id = scene.add_object(&entry("platform"), 100.0, 100.0);

        let obj = scene.get(id).unwrap();
        assert_eq!(obj.kind, "platform");
        assert_eq!((obj.x, obj.y), (100.0, 100.0));
        assert_eq!((obj.width, obj.height), (60.0, 60.0));
        assert_eq!(obj.rotation, 0.0);
        assert_eq!(obj.image.as_deref(), Some("assets/platform.png"));
    }

    #[test]
    fn remove_selected_clears_selection() {
        let mut scene = Scene::new();
        let id = scene.add_object(&entry("coin"), 10.0, 10.0);
        scene.select(id);
        assert_eq!(scene.selected_id(), Some(id));

        scene.remove_object(id);
        assert_eq!(scene.selected_id(), None);
        assert!(scene.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut scene = Scene::new();
        let id = scene.add_object(&entry("coin"), 10.0, 10.0);
        scene.select(id);

        scene.remove_object(9999);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.selected_id(), Some(id));
    }

    #[test]
    fn selecting_unknown_id_clears_selection() {
        let mut scene = Scene::new();
        let id = scene.add_object(&entry("coin"), 10.0, 10.0);
        scene.select(id);
        scene.select(12345);
        assert_eq!(scene.selected_id(), None);
    }
}
