//! Loading and saving scene files.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use kennel_nodes::{SceneNode, TypeRegistry, registry};

use crate::builder::build;
use crate::document::Document;
use crate::error::{Result, SceneError};
use crate::forest::Forest;
use crate::parser::parse_document;
use crate::reconcile::reconcile;
use crate::record::parse_records;
use crate::session::EditedValues;
use crate::writer::write_document;

fn io_error(path: &Path, source: std::io::Error) -> SceneError {
    if source.kind() == ErrorKind::NotFound {
        SceneError::FileNotFound(path.to_path_buf())
    } else {
        SceneError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(parse_document(&text)?)
}

/// Writes the whole document to a sibling temporary file, then renames it over `path`.
pub fn save_document(path: impl AsRef<Path>, document: &Document) -> Result<()> {
    let path = path.as_ref();
    let text = write_document(document);
    let tmp = temp_sibling(path);

    if let Err(err) = fs::write(&tmp, text.as_bytes()) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error(path, err));
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error(path, err));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene".to_string());
    path.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()))
}

/// Loads a scene using the installed global registry.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Forest> {
    load_scene_with(path, registry())
}

pub fn load_scene_with(path: impl AsRef<Path>, registry: &TypeRegistry) -> Result<Forest> {
    let path = path.as_ref();
    let document = load_document(path)?;
    let records = parse_records(&document);
    let forest = build(&records, registry);
    log::info!(
        "Loaded {} ({} sections, {} nodes)",
        path.display(),
        document.len(),
        forest.len()
    );
    Ok(forest)
}

/// Saves one node's edits into the scene file at `path` using the global registry.
pub fn save_node(path: impl AsRef<Path>, node: &SceneNode, edited: &EditedValues) -> Result<()> {
    save_node_with(path, registry(), node, edited)
}

/// Re-reads the file, reconciles the edits in memory and replaces the file.
/// The file is left untouched when any step fails.
pub fn save_node_with(
    path: impl AsRef<Path>,
    registry: &TypeRegistry,
    node: &SceneNode,
    edited: &EditedValues,
) -> Result<()> {
    let path = path.as_ref();
    let document = load_document(path)?;
    let updated = reconcile(&document, registry, node, edited)?;
    if updated == document {
        log::info!("Saved {} ({}): no changes", path.display(), node.name);
        return Ok(());
    }
    save_document(path, &updated)?;
    log::info!("Saved {} ({})", path.display(), node.name);
    Ok(())
}
