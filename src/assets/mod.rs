//! Scene document I/O.

pub mod document;

pub use document::{AnimationDocument, NodeDocument, SceneDocument};

use std::io::Write;
use std::path::Path;

use crate::errors::Result;
use crate::scene::Scene;

/// Reads a scene document from a JSON file and builds the scene.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_scene(&text)
}

/// Builds a scene from JSON text.
pub fn parse_scene(text: &str) -> Result<Scene> {
    let document: SceneDocument = serde_json::from_str(text)?;
    document.to_scene()
}

/// Writes `scene` as pretty-printed JSON.
pub fn write_scene<W: Write>(writer: W, scene: &Scene) -> Result<()> {
    serde_json::to_writer_pretty(writer, &SceneDocument::from_scene(scene))?;
    Ok(())
}

/// Writes `scene` to a JSON file, replacing it if it exists.
pub fn save_scene(path: impl AsRef<Path>, scene: &Scene) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_scene(std::io::BufWriter::new(file), scene)
}
