//! Property tests for the editor invariants

use levelkit_editor::{object_at, Editor, PaletteEntry, Scene};
use proptest::prelude::*;

proptest! {
    // Resize can never push a dimension under the 20px floor, wherever
    // the pointer ends up.
    #[test]
    fn resize_never_under_minimum(
        px in -2000.0f64..2000.0,
        py in -2000.0f64..2000.0,
        moves in prop::collection::vec((-2000.0f64..2000.0, -2000.0f64..2000.0), 0..8)
    ) {
        let mut editor = Editor::new();
        let entry = PaletteEntry::new("crate", "assets/placeholder.png");
        let id = editor.drop_entry(&entry, 100.0, 100.0);

        editor.pointer_down(100.0, 100.0);
        editor.pointer_up();
        // Grab the resize handle (122..132 square).
        editor.pointer_down(127.0, 127.0);
        for (mx, my) in moves {
            editor.pointer_move(mx, my);
        }
        editor.pointer_move(px, py);
        editor.pointer_up();

        let obj = editor.scene.get(id).unwrap();
        prop_assert!(obj.width >= 20.0);
        prop_assert!(obj.height >= 20.0);
    }

    // Among overlapping objects, a point inside only the last-added box
    // resolves to the last-added object.
    #[test]
    fn topmost_wins_for_any_add_sequence(
        centers in prop::collection::vec((0.0f64..400.0, 0.0f64..400.0), 1..12)
    ) {
        let mut scene = Scene::new();
        let entry = PaletteEntry::new("tile", "assets/placeholder.png");

        let mut last = 0;
        for (x, y) in &centers {
            last = scene.add_object(&entry, *x, *y);
        }

        let (lx, ly) = centers[centers.len() - 1];
        prop_assert_eq!(object_at(&scene, lx, ly), Some(last));
    }

    // A rotate gesture lands on atan2 of the final pointer offset no
    // matter the path taken.
    #[test]
    fn rotation_is_path_independent(
        path in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 0..10),
        fx in -500.0f64..500.0,
        fy in -500.0f64..500.0
    ) {
        // Skip the degenerate pointer-on-center case.
        prop_assume!(fx != 100.0 || fy != 100.0);

        let mut editor = Editor::new();
        let entry = PaletteEntry::new("crate", "assets/placeholder.png");
        let id = editor.drop_entry(&entry, 100.0, 100.0);

        editor.pointer_down(100.0, 100.0);
        editor.pointer_up();
        // Rotate handle square spans (94..106, 50..62).
        editor.pointer_down(100.0, 55.0);
        for (mx, my) in path {
            editor.pointer_move(mx, my);
        }
        editor.pointer_move(fx, fy);
        editor.pointer_up();

        let obj = editor.scene.get(id).unwrap();
        prop_assert_eq!(obj.rotation, (fy - 100.0).atan2(fx - 100.0));
    }
}
