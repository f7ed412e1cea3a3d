//! Canvas renderer for the scene editor.
//! Renders scene objects to an image buffer for display in the UI using
//! tiny-skia for high-quality 2D rendering.
//!
//! The renderer is an idempotent full repaint: clear, then every object in
//! insertion order, then the selection decoration. It reads the scene and
//! the image store and mutates neither; callers repaint after every model
//! mutation (there is no dirty-region diffing).

use image::{Rgb, RgbImage};
use rusttype::{point as rt_point, Scale};
use tiny_skia::{Color, Paint, Pixmap, PixmapPaint, Rect, Stroke, Transform};

use crate::font_manager;
use crate::hit_test::{handles_for, HandleKind};
use crate::images::ImageStore;
use crate::scene::{Scene, SceneObject};

fn bg_color() -> Color {
    Color::from_rgba8(34, 40, 49, 255)
}
fn placeholder_fill() -> Color {
    Color::from_rgba8(68, 68, 68, 255)
}
fn label_color() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}
fn selection_color() -> Color {
    Color::from_rgba8(0, 255, 213, 255)
}
fn resize_handle_color() -> Color {
    Color::from_rgba8(0, 184, 148, 255)
}
fn rotate_handle_color() -> Color {
    Color::from_rgba8(122, 92, 255, 255)
}

/// Renders the scene to an image buffer.
///
/// Per object: the decoded bitmap if its load has settled, else a colored
/// rectangle with the kind label, else a neutral placeholder rectangle
/// with the label. The selected object gets a highlight stroke around its
/// (unrotated) bounding box plus the two handle squares.
pub fn render_scene(scene: &Scene, images: &ImageStore, width: u32, height: u32) -> RgbImage {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbImage::new(width, height);
    };
    pixmap.fill(bg_color());

    for obj in scene.objects() {
        draw_object(&mut pixmap, obj, images);

        if scene.selected_id() == Some(obj.id) {
            draw_selection(&mut pixmap, obj);
        }
    }

    // Convert Pixmap to RgbImage, alpha is opaque throughout
    let data = pixmap.data();
    RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    })
}

fn draw_object(pixmap: &mut Pixmap, obj: &SceneObject, images: &ImageStore) {
    let transform = object_transform(obj);

    let bitmap = obj.image.as_deref().and_then(|path| images.bitmap_for(path));
    if let Some(bitmap) = bitmap {
        draw_bitmap(pixmap, obj, bitmap, transform);
        return;
    }

    if let Some(color) = obj.color.as_deref().and_then(parse_hex_color) {
        fill_object_rect(pixmap, obj, color, transform);
        let label_size = (obj.height / 6.0).floor().max(10.0) as f32;
        draw_label(
            pixmap,
            &obj.kind,
            label_size,
            obj.x as f32,
            obj.y as f32 + 4.0,
            LabelAlign::Center,
        );
        return;
    }

    fill_object_rect(pixmap, obj, placeholder_fill(), transform);
    draw_label(
        pixmap,
        &obj.kind,
        10.0,
        (obj.x - obj.width / 2.0 + 4.0) as f32,
        (obj.y - obj.height / 2.0 + 14.0) as f32,
        LabelAlign::Left,
    );
}

/// Rotation around the object's center.
fn object_transform(obj: &SceneObject) -> Transform {
    Transform::from_rotate_at(obj.rotation.to_degrees() as f32, obj.x as f32, obj.y as f32)
}

fn fill_object_rect(pixmap: &mut Pixmap, obj: &SceneObject, color: Color, transform: Transform) {
    let Some(rect) = Rect::from_xywh(
        (obj.x - obj.width / 2.0) as f32,
        (obj.y - obj.height / 2.0) as f32,
        obj.width as f32,
        obj.height as f32,
    ) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    pixmap.fill_rect(rect, &paint, transform, None);
}

fn draw_bitmap(pixmap: &mut Pixmap, obj: &SceneObject, bitmap: &Pixmap, rotation: Transform) {
    let sx = obj.width as f32 / bitmap.width() as f32;
    let sy = obj.height as f32 / bitmap.height() as f32;

    // Scale the source into the object's box, then rotate about the center.
    let transform = Transform::from_scale(sx, sy)
        .post_translate(
            (obj.x - obj.width / 2.0) as f32,
            (obj.y - obj.height / 2.0) as f32,
        )
        .post_concat(rotation);

    pixmap.draw_pixmap(0, 0, bitmap.as_ref(), &PixmapPaint::default(), transform, None);
}

fn draw_selection(pixmap: &mut Pixmap, obj: &SceneObject) {
    let (x1, y1, x2, y2) = obj.bounds();
    let Some(rect) = Rect::from_ltrb(x1 as f32, y1 as f32, x2 as f32, y2 as f32) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(selection_color());
    paint.anti_alias = true;
    let stroke = Stroke {
        width: 2.0,
        ..Default::default()
    };
    let path = tiny_skia::PathBuilder::from_rect(rect);
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);

    for handle in handles_for(obj) {
        let Some(h_rect) = Rect::from_xywh(
            handle.x as f32,
            handle.y as f32,
            handle.size as f32,
            handle.size as f32,
        ) else {
            continue;
        };
        let mut h_paint = Paint::default();
        h_paint.set_color(match handle.kind {
            HandleKind::Resize => resize_handle_color(),
            HandleKind::Rotate => rotate_handle_color(),
        });
        pixmap.fill_rect(h_rect, &h_paint, Transform::identity(), None);
    }
}

enum LabelAlign {
    Left,
    Center,
}

/// Draws a text label by blending glyph coverage directly into the pixmap.
/// Skipped silently when no system font resolves.
fn draw_label(pixmap: &mut Pixmap, text: &str, size: f32, x: f32, y: f32, align: LabelAlign) {
    let Some(font) = font_manager::label_font() else {
        return;
    };

    let scale = Scale::uniform(size);
    let width = pixmap.width();
    let height = pixmap.height();

    let text_width: f32 = font
        .layout(text, scale, rt_point(0.0, 0.0))
        .filter_map(|g| g.pixel_bounding_box().map(|b| b.max.x as f32))
        .last()
        .unwrap_or(0.0);

    let start_x = match align {
        LabelAlign::Left => x,
        LabelAlign::Center => x - text_width / 2.0,
    };

    let fg = label_color();
    for glyph in font.layout(text, scale, rt_point(start_x, y)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                    return;
                }
                let alpha = (v * 255.0) as u8;
                if alpha == 0 {
                    return;
                }
                let idx = ((py as u32 * width + px as u32) * 4) as usize;
                let pixel = &mut pixmap.data_mut()[idx..idx + 4];
                // Premultiplied source-over against the opaque background
                let blend = |dst: u8, src: f32| -> u8 {
                    (dst as f32 * (1.0 - v) + src * 255.0 * v) as u8
                };
                pixel[0] = blend(pixel[0], fg.red());
                pixel[1] = blend(pixel[1], fg.green());
                pixel[2] = blend(pixel[2], fg.blue());
                pixel[3] = 255;
            });
        }
    }
}

/// Parses `#rgb` / `#rrggbb` fill colors; anything else falls back to the
/// neutral placeholder fill at the call site.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    let (r, g, b) = match hex.len() {
        3 => {
            let v = u16::from_str_radix(hex, 16).ok()?;
            let r = ((v >> 8) & 0xf) as u8;
            let g = ((v >> 4) & 0xf) as u8;
            let b = (v & 0xf) as u8;
            (r * 17, g * 17, b * 17)
        }
        6 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            (((v >> 16) & 0xff) as u8, ((v >> 8) & 0xff) as u8, (v & 0xff) as u8)
        }
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, 255))
}
