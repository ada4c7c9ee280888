//! Folds a node's edited values back into the document it was loaded from.

use kennel_nodes::{ResolvedProperty, SceneNode, TypeRegistry, default_of, path};
use kennel_variant::{ValueKind, Variant, coerce, parse, stringify, values_equal};

use crate::document::{Document, PARENT_KEY, Section, TYPE_KEY};
use crate::error::{Result, SceneError};
use crate::session::{EditedValues, NAME_PATH};

/// What saving one edited path did to the section.
#[derive(Clone, Debug, PartialEq)]
enum KeyChange {
    Write(String),
    Remove,
    Skip,
}

/// Returns the updated document. Nothing is changed when any value fails to convert.
pub fn reconcile(
    document: &Document,
    registry: &TypeRegistry,
    node: &SceneNode,
    edited: &EditedValues,
) -> Result<Document> {
    let mut doc = document.clone();

    let original = node.name.as_str();
    let section_name = edited
        .get(NAME_PATH)
        .and_then(Variant::as_str)
        .filter(|n| !n.is_empty())
        .unwrap_or(original)
        .to_string();

    if section_name != original {
        if doc.contains_section(&section_name) {
            return Err(SceneError::SectionExists(section_name));
        }
        let rewritten = doc.rewrite_parent_refs(original, &section_name);
        doc.rename_section(original, &section_name);
        log::debug!("Renamed [{original}] -> [{section_name}], {rewritten} parent refs updated");
    }

    if !doc.contains_section(&section_name) {
        log::warn!("[{section_name}] missing from the document; appending it");
        let mut section = Section::new(section_name.as_str());
        section.set(TYPE_KEY, node.type_name);
        doc.push_section(section)
            .map_err(|s| SceneError::SectionExists(s.name))?;
    }

    // Decide every key before touching the section
    let current = doc.section(&section_name);
    let mut changes = Vec::with_capacity(edited.len());
    for (raw_path, value) in edited {
        if raw_path == NAME_PATH {
            continue;
        }
        let key = path::strip_group_prefix(registry, node.type_name, raw_path);
        let existing = current.and_then(|s| s.get(key));
        let change =
            decide(registry, node, key, value, existing).map_err(|source| SceneError::Value {
                path: raw_path.clone(),
                source,
            })?;
        changes.push((key, change));
    }

    let Some(section) = doc.section_mut(&section_name) else {
        return Ok(doc);
    };
    for (key, change) in changes {
        match change {
            KeyChange::Write(literal) => section.set(key, literal),
            KeyChange::Remove => {
                section.remove(key);
            }
            KeyChange::Skip => {}
        }
    }
    Ok(doc)
}

fn decide(
    registry: &TypeRegistry,
    node: &SceneNode,
    key: &str,
    value: &Variant,
    existing: Option<&str>,
) -> std::result::Result<KeyChange, kennel_variant::ValueError> {
    if key == TYPE_KEY || key == PARENT_KEY {
        log::debug!("`{key}` is reserved; not written from edits");
        return Ok(KeyChange::Skip);
    }

    let Some(resolved) = resolve(registry, node, key) else {
        log::warn!("[{}] `{key}` does not name a property; skipped", node.name);
        return Ok(KeyChange::Skip);
    };
    let property = resolved.property;
    if property.save_exclude {
        return Ok(KeyChange::Skip);
    }
    let Some(kind) = property.kind() else {
        log::warn!("[{}] `{key}` is a composite; skipped", node.name);
        return Ok(KeyChange::Skip);
    };

    let value = coerce(value, &kind)?;

    // Resource references persist whenever their path is non-empty
    if !matches!(kind, ValueKind::Resource(_)) {
        let default = default_of(registry, node.data(), key);
        if values_equal(&value, &default) {
            return Ok(KeyChange::Remove);
        }
    }

    let Some(literal) = stringify(&value, &kind)? else {
        return Ok(KeyChange::Remove);
    };
    // Keep the document's own spelling of an equal value
    let unchanged = existing
        .and_then(|text| parse(text, &kind).ok())
        .is_some_and(|old| values_equal(&old, &value));
    if unchanged {
        return Ok(KeyChange::Skip);
    }
    Ok(KeyChange::Write(literal))
}

/// Live resolution first; declared types when an intermediate is null.
fn resolve<'r>(
    registry: &'r TypeRegistry,
    node: &SceneNode,
    key: &str,
) -> Option<ResolvedProperty<'r>> {
    path::resolve(registry, node.data(), key)
        .or_else(|_| path::resolve_static(registry, node.type_name, key))
        .ok()
}
