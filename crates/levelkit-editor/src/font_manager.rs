use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use rusttype::Font;
use std::sync::OnceLock;

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// Returns the sans-serif font used for object labels.
///
/// Resolved from the system font database once and cached. Returns `None`
/// on systems with no usable sans-serif face; label drawing is skipped in
/// that case rather than failing the render.
pub fn label_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(load_sans_serif).as_ref()
}

fn load_sans_serif() -> Option<Font<'static>> {
    let query = Query {
        families: &[Family::SansSerif],
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;
    let index = face.index;

    let data: Vec<u8> = match &face.source {
        Source::Binary(data) => data.as_ref().as_ref().to_vec(),
        Source::File(path) => std::fs::read(path).ok()?,
        Source::SharedFile(path, _) => std::fs::read(path).ok()?,
    };

    Font::try_from_vec_and_index(data, index)
}
