use std::path::Path;

use anyhow::{bail, Context};
use tracing::{info, warn};

use levelkit::{init_logging, Editor, FileSceneStore, SceneFile};

/// Headless entry point: load a scene and render it to a PNG.
///
/// Usage: `levelkit <scene-name-or-file> [output.png] [width] [height]`
///
/// A plain name is resolved through the file store's candidate locations
/// under the current directory; a path to an existing `.json` file is
/// loaded directly.
fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(scene_arg) = args.first() else {
        bail!("usage: levelkit <scene-name-or-file> [output.png] [width] [height]");
    };
    let output = args.get(1).map(String::as_str).unwrap_or("scene.png");
    let width: u32 = parse_dim(args.get(2), 800)?;
    let height: u32 = parse_dim(args.get(3), 600)?;

    info!(version = levelkit::VERSION, built = levelkit::BUILD_DATE, "levelkit starting");

    let mut editor = Editor::new();

    if Path::new(scene_arg).is_file() {
        let file = SceneFile::load_from_file(scene_arg)
            .with_context(|| format!("loading scene file {scene_arg}"))?;
        editor.apply_scene_file(&file);
    } else {
        let store = FileSceneStore::new(std::env::current_dir()?);
        if !editor.load_scene(&store, scene_arg) {
            bail!("failed to load scene '{scene_arg}'");
        }
    }

    for (level, message) in editor.take_status() {
        info!(?level, "{message}");
    }

    // Settle every referenced image before the single repaint.
    let paths: Vec<String> = editor
        .scene
        .objects()
        .iter()
        .filter_map(|o| o.image.clone())
        .collect();
    for path in paths {
        editor.images.load_from_disk(&path);
    }

    let frame = editor.render(width, height);
    frame
        .save(output)
        .with_context(|| format!("writing {output}"))?;
    info!(output, width, height, objects = editor.scene.len(), "scene rendered");

    if editor.scene.is_empty() {
        warn!("rendered scene contains no objects");
    }

    Ok(())
}

fn parse_dim(arg: Option<&String>, default: u32) -> anyhow::Result<u32> {
    match arg {
        None => Ok(default),
        Some(s) => s
            .parse::<u32>()
            .with_context(|| format!("invalid dimension '{s}'")),
    }
}
