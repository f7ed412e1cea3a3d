//! Integration tests for the canvas renderer

use levelkit_editor::{Editor, ImageStore, PaletteEntry, Scene};

fn px(frame: &image::RgbImage, x: u32, y: u32) -> [u8; 3] {
    frame.get_pixel(x, y).0
}

#[test]
fn test_empty_scene_renders_background_only() {
    let scene = Scene::new();
    let images = ImageStore::new();
    let frame = levelkit_editor::render_scene(&scene, &images, 200, 100);

    assert_eq!((frame.width(), frame.height()), (200, 100));
    let corner = px(&frame, 0, 0);
    let center = px(&frame, 100, 50);
    assert_eq!(corner, center);
}

#[test]
fn test_object_pixels_differ_from_background() {
    let mut scene = Scene::new();
    // No image requested: pending state falls back to the neutral rect.
    scene.add_object(&PaletteEntry::new("block", "assets/missing.png"), 100.0, 50.0);

    let images = ImageStore::new();
    let frame = levelkit_editor::render_scene(&scene, &images, 200, 100);

    let background = px(&frame, 5, 5);
    let inside = px(&frame, 100, 50);
    assert_ne!(background, inside);
}

#[test]
fn test_color_fill_used_when_no_image() {
    let mut scene = Scene::new();
    let id = scene.add_object(&PaletteEntry::new("lava", "assets/lava.png"), 100.0, 50.0);
    {
        let obj = scene.get_mut(id).unwrap();
        obj.image = None;
        obj.color = Some("#ff0000".to_string());
    }

    let images = ImageStore::new();
    let frame = levelkit_editor::render_scene(&scene, &images, 200, 100);

    // Sample away from the centered label.
    let [r, g, b] = px(&frame, 80, 40);
    assert!(r > 200, "expected red fill, got ({r},{g},{b})");
    assert!(g < 60 && b < 60, "expected red fill, got ({r},{g},{b})");
}

#[test]
fn test_failed_image_renders_placeholder_bitmap() {
    let mut scene = Scene::new();
    scene.add_object(&PaletteEntry::new("ghost", "assets/ghost.png"), 100.0, 50.0);

    let mut images = ImageStore::new();
    images.load_from_disk("assets/ghost.png"); // no such file -> Failed

    let frame = levelkit_editor::render_scene(&scene, &images, 200, 100);

    // Placeholder body is the dark gray fill.
    let [r, g, b] = px(&frame, 100, 50);
    assert_eq!([r, g, b], [68, 68, 68]);
}

#[test]
fn test_selection_draws_highlight_and_handles() {
    let mut scene = Scene::new();
    let id = scene.add_object(&PaletteEntry::new("crate", "assets/crate.png"), 100.0, 100.0);
    let images = ImageStore::new();

    let unselected = levelkit_editor::render_scene(&scene, &images, 200, 200);
    scene.select(id);
    let selected = levelkit_editor::render_scene(&scene, &images, 200, 200);

    // Highlight stroke on the box edge (x spans 70..130 at y=100).
    assert_ne!(px(&selected, 70, 100), px(&unselected, 70, 100));

    // Resize handle square centered near (127, 127).
    let [r, g, b] = px(&selected, 127, 127);
    assert_eq!([r, g, b], [0, 184, 148]);

    // Rotate handle square above the top edge, near (100, 56).
    let [r, g, b] = px(&selected, 100, 56);
    assert_eq!([r, g, b], [122, 92, 255]);
}

#[test]
fn test_render_is_idempotent() {
    let mut editor = Editor::new();
    editor.drop_entry(&PaletteEntry::new("block", "assets/missing.png"), 60.0, 60.0);
    editor.pointer_down(60.0, 60.0);
    editor.pointer_up();

    let a = editor.render(160, 120);
    let b = editor.render(160, 120);
    assert_eq!(a.as_raw(), b.as_raw());
    assert!(!editor.needs_redraw());
}
