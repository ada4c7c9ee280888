//! Subcommand bodies. Each returns the text to print.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use kennel_nodes::{SceneNode, TypeRegistry, default_of, path};
use kennel_scene::{
    EditSession, Forest, NAME_PATH, load_document, load_scene_with, reconcile, save_node_with,
    write_document,
};
use kennel_variant::{ValueKind, Variant, parse, stringify, values_equal};
use serde::Serialize;
use serde_json::{Map, Value};

fn open(registry: &TypeRegistry, scene: &Path) -> Result<Forest> {
    load_scene_with(scene, registry).with_context(|| format!("loading {}", scene.display()))
}

fn find<'f>(forest: &'f Forest, name: &str) -> Result<&'f SceneNode> {
    forest
        .by_name(name)
        .with_context(|| format!("no node named `{name}`"))
}

/// Declared kind of a leaf path, looking through null intermediates.
fn kind_of(registry: &TypeRegistry, node: &SceneNode, raw_path: &str) -> Result<ValueKind> {
    let key = path::strip_group_prefix(registry, node.type_name, raw_path);
    let resolved = path::resolve(registry, node.data(), key)
        .or_else(|_| path::resolve_static(registry, node.type_name, key))
        .with_context(|| format!("`{raw_path}` is not a property of {}", node.type_name))?;
    resolved
        .property
        .kind()
        .with_context(|| format!("`{raw_path}` is a composite, name one of its fields"))
}

fn literal(value: &Variant, kind: &ValueKind) -> String {
    match stringify(value, kind) {
        Ok(Some(text)) => text,
        Ok(None) => String::new(),
        Err(_) => value.to_string(),
    }
}

/// `Path=literal` -> `("Path", "literal")`.
pub fn split_assignment(assignment: &str) -> Result<(&str, &str)> {
    let Some((key, value)) = assignment.split_once('=') else {
        bail!("expected `path=value`, got `{assignment}`");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("empty property path in `{assignment}`");
    }
    Ok((key, value.trim()))
}

pub fn tree(registry: &TypeRegistry, scene: &Path) -> Result<String> {
    let forest = open(registry, scene)?;
    let mut out = String::new();
    for (id, depth) in forest.depth_first() {
        if let Some(node) = forest.get(id) {
            let _ = writeln!(out, "{}{} ({})", "  ".repeat(depth), node.name, node.type_name);
        }
    }
    Ok(out)
}

pub fn show(registry: &TypeRegistry, scene: &Path, name: &str) -> Result<String> {
    let forest = open(registry, scene)?;
    let node = find(&forest, name)?;
    let mut session = EditSession::new();

    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", node.name, node.type_name);
    for (leaf, value) in session.values(registry, node) {
        if leaf == NAME_PATH {
            continue;
        }
        let Ok(kind) = kind_of(registry, node, leaf) else {
            continue;
        };
        let default = default_of(registry, node.data(), leaf);
        let marker = if values_equal(value, &default) { ' ' } else { '*' };
        let _ = writeln!(out, "{marker} {leaf} = {}", literal(value, &kind));
    }
    Ok(out)
}

pub fn get(registry: &TypeRegistry, scene: &Path, name: &str, raw_path: &str) -> Result<String> {
    let forest = open(registry, scene)?;
    let node = find(&forest, name)?;
    if raw_path == NAME_PATH {
        return Ok(format!("{}\n", node.name));
    }

    let kind = kind_of(registry, node, raw_path)?;
    let key = path::strip_group_prefix(registry, node.type_name, raw_path);
    let value = EditSession::new()
        .get(registry, node, key)
        .unwrap_or(Variant::Null);
    Ok(format!("{}\n", literal(&value, &kind)))
}

pub fn set(
    registry: &TypeRegistry,
    scene: &Path,
    name: &str,
    assignments: &[String],
    dry_run: bool,
) -> Result<String> {
    let forest = open(registry, scene)?;
    let node = find(&forest, name)?;

    let mut session = EditSession::new();
    for assignment in assignments {
        let (raw_path, raw) = split_assignment(assignment)?;
        let kind = kind_of(registry, node, raw_path)?;
        let value =
            parse(raw, &kind).with_context(|| format!("`{raw_path}`: cannot read `{raw}`"))?;
        session.set(node.id, raw_path, value);
    }
    commit(registry, scene, node, &session, dry_run)
}

pub fn reset(
    registry: &TypeRegistry,
    scene: &Path,
    name: &str,
    paths: &[String],
    dry_run: bool,
) -> Result<String> {
    let forest = open(registry, scene)?;
    let node = find(&forest, name)?;

    let mut session = EditSession::new();
    for raw_path in paths {
        kind_of(registry, node, raw_path)?;
        let key = path::strip_group_prefix(registry, node.type_name, raw_path);
        let default = session.reset(registry, node, key);
        log::debug!("{}: {raw_path} reset to {default}", node.name);
    }
    commit(registry, scene, node, &session, dry_run)
}

pub fn rename(
    registry: &TypeRegistry,
    scene: &Path,
    name: &str,
    new_name: &str,
    dry_run: bool,
) -> Result<String> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        bail!("a node name cannot be empty");
    }
    let forest = open(registry, scene)?;
    let node = find(&forest, name)?;

    let mut session = EditSession::new();
    session.set(node.id, NAME_PATH, new_name);
    commit(registry, scene, node, &session, dry_run)
}

/// Saves the node's edits, or renders the would-be document when `dry_run` is set.
fn commit(
    registry: &TypeRegistry,
    scene: &Path,
    node: &SceneNode,
    session: &EditSession,
    dry_run: bool,
) -> Result<String> {
    let edited = session.edited(node.id).cloned().unwrap_or_default();
    if dry_run {
        let document =
            load_document(scene).with_context(|| format!("loading {}", scene.display()))?;
        let updated = reconcile(&document, registry, node, &edited)?;
        return Ok(write_document(&updated));
    }
    save_node_with(scene, registry, node, &edited)
        .with_context(|| format!("saving {}", scene.display()))?;
    Ok(format!("saved [{}] to {}\n", node.name, scene.display()))
}

#[derive(Serialize)]
struct SceneDump<'a> {
    scene: String,
    nodes: Vec<NodeDump<'a>>,
    warnings: &'a [String],
}

#[derive(Serialize)]
struct NodeDump<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    parent: Option<&'a str>,
    children: Vec<&'a str>,
    properties: Map<String, Value>,
}

pub fn dump(registry: &TypeRegistry, scene: &Path) -> Result<String> {
    let forest = open(registry, scene)?;
    let name_of = |id| forest.get(id).map(|n| n.name.as_str());

    let nodes = forest
        .iter()
        .map(|(id, node)| NodeDump {
            name: &node.name,
            type_name: node.type_name,
            parent: forest.parent(id).and_then(name_of),
            children: forest
                .children(id)
                .iter()
                .filter_map(|c| name_of(*c))
                .collect(),
            properties: path::walk_leaves(registry, node.data())
                .into_iter()
                .filter(|(leaf, _)| leaf != NAME_PATH)
                .map(|(leaf, value)| (leaf, value.to_json_value()))
                .collect(),
        })
        .collect();

    let dump = SceneDump {
        scene: scene.display().to_string(),
        nodes,
        warnings: forest.warnings(),
    };
    let mut text = serde_json::to_string_pretty(&dump)?;
    text.push('\n');
    Ok(text)
}
