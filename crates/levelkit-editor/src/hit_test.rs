//! Hit-testing and handle geometry.
//!
//! Pure functions mapping a pointer coordinate to the topmost object under
//! it, or to one of the selected object's two manipulation handles.
//! Object hit-testing uses the axis-aligned bounding box with rotation
//! ignored; among overlapping objects the most recently added wins, so
//! iteration runs back-to-front over the paint order.

use levelkit_core::constants::{RESIZE_HANDLE_SIZE, ROTATE_HANDLE_GAP, ROTATE_HANDLE_SIZE};

use crate::scene::{Scene, SceneObject};

/// Which gesture a handle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// Bottom-right corner square; drags change width/height.
    Resize,
    /// Square floating above the top edge; drags change rotation.
    Rotate,
}

/// A handle square attached to the selected object.
///
/// `x`/`y` are the square's top-left corner in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Handle {
    /// Inclusive containment test against the handle square.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.size && py >= self.y && py <= self.y + self.size
    }
}

/// The two fixed handles exposed by a selected object.
///
/// Positions track the object's unrotated bounding box: the resize square
/// sits on the bottom-right corner, the rotate square hangs above the top
/// edge at the object's center column.
pub fn handles_for(obj: &SceneObject) -> [Handle; 2] {
    [
        Handle {
            kind: HandleKind::Resize,
            x: obj.x + obj.width / 2.0 - 8.0,
            y: obj.y + obj.height / 2.0 - 8.0,
            size: RESIZE_HANDLE_SIZE,
        },
        Handle {
            kind: HandleKind::Rotate,
            x: obj.x - 6.0,
            y: obj.y - obj.height / 2.0 - ROTATE_HANDLE_GAP,
            size: ROTATE_HANDLE_SIZE,
        },
    ]
}

/// Returns the handle of `obj` under the pointer, if any.
pub fn handle_at(px: f64, py: f64, obj: &SceneObject) -> Option<Handle> {
    handles_for(obj).into_iter().find(|h| h.contains(px, py))
}

/// Returns the id of the topmost object whose box contains the pointer.
pub fn object_at(scene: &Scene, px: f64, py: f64) -> Option<u64> {
    scene
        .objects()
        .iter()
        .rev()
        .find(|o| o.contains_point(px, py))
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteEntry;

    fn entry(name: &str) -> PaletteEntry {
        PaletteEntry {
            name: name.to_string(),
            img: "assets/placeholder.png".to_string(),
        }
    }

    #[test]
    fn topmost_object_wins() {
        let mut scene = Scene::new();
        let below = scene.add_object(&entry("ground"), 100.0, 100.0);
        let above = scene.add_object(&entry("coin"), 100.0, 100.0);

        assert_eq!(object_at(&scene, 100.0, 100.0), Some(above));

        scene.remove_object(above);
        assert_eq!(object_at(&scene, 100.0, 100.0), Some(below));
    }

    #[test]
    fn box_edges_are_exclusive() {
        let mut scene = Scene::new();
        scene.add_object(&entry("wall"), 100.0, 100.0);

        // 60x60 box spans (70,70)..(130,130)
        assert!(object_at(&scene, 70.0, 100.0).is_none());
        assert!(object_at(&scene, 130.0, 100.0).is_none());
        assert!(object_at(&scene, 71.0, 100.0).is_some());
    }

    #[test]
    fn handle_positions_match_box() {
        let mut scene = Scene::new();
        let id = scene.add_object(&entry("crate"), 100.0, 100.0);
        let obj = scene.get(id).unwrap();

        let [resize, rotate] = handles_for(obj);
        assert_eq!(resize.kind, HandleKind::Resize);
        assert_eq!((resize.x, resize.y), (122.0, 122.0));
        assert_eq!(resize.size, 10.0);

        assert_eq!(rotate.kind, HandleKind::Rotate);
        assert_eq!((rotate.x, rotate.y), (94.0, 50.0));
        assert_eq!(rotate.size, 12.0);
    }

    #[test]
    fn handle_hit_is_inclusive() {
        let mut scene = Scene::new();
        let id = scene.add_object(&entry("crate"), 100.0, 100.0);
        let obj = scene.get(id).unwrap();

        // Resize square corners
        assert_eq!(
            handle_at(122.0, 122.0, obj).map(|h| h.kind),
            Some(HandleKind::Resize)
        );
        assert_eq!(
            handle_at(132.0, 132.0, obj).map(|h| h.kind),
            Some(HandleKind::Resize)
        );
        assert!(handle_at(133.0, 133.0, obj).is_none());

        // Rotate square sits outside the object's box
        assert_eq!(
            handle_at(100.0, 56.0, obj).map(|h| h.kind),
            Some(HandleKind::Rotate)
        );
        assert!(!obj.contains_point(100.0, 56.0));
    }
}
