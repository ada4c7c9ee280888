//! Two-pass construction of a node forest from records: instantiate, then link by name.

use kennel_nodes::{NodeError, NodeID, SceneNode, TypeRegistry, path};
use kennel_variant::parse;

use crate::error::KeyError;
use crate::forest::{Forest, LinkRefusal, sync_name_property};
use crate::record::NodeRecord;

/// Builds a forest. Bad records and keys are skipped and reported in [`Forest::warnings`].
pub fn build(records: &[NodeRecord], registry: &TypeRegistry) -> Forest {
    let mut forest = Forest::new();
    let mut created: Vec<(NodeID, &NodeRecord)> = Vec::with_capacity(records.len());

    // Pass 1: instantiate
    for record in records {
        if let Some(node) = instantiate(&mut forest, registry, record) {
            match forest.insert(node) {
                Ok(id) => created.push((id, record)),
                Err(err) => forest.warn(format!("[{}] skipped: {err}", record.name)),
            }
        }
    }

    // Pass 2: link
    for (id, record) in &created {
        let Some(parent_name) = record.parent.as_deref() else {
            continue;
        };
        let Some(parent) = forest.id_of(parent_name) else {
            forest.warn(format!(
                "[{}] parent `{parent_name}` not found; kept as a root",
                record.name
            ));
            continue;
        };
        match forest.link(*id, parent) {
            Ok(()) => {}
            Err(LinkRefusal::SelfParent) => forest.warn(format!(
                "[{}] is its own parent; kept as a root",
                record.name
            )),
            Err(LinkRefusal::Cycle) => forest.warn(format!(
                "[{}] parent `{parent_name}` would form a cycle; kept as a root",
                record.name
            )),
            Err(LinkRefusal::MissingNode) => forest.warn(format!(
                "[{}] parent `{parent_name}` is missing; kept as a root",
                record.name
            )),
        }
    }

    log::info!(
        "Built forest: {} nodes, {} roots, {} warnings",
        forest.len(),
        forest.roots().len(),
        forest.warnings().len()
    );
    forest
}

fn instantiate(
    forest: &mut Forest,
    registry: &TypeRegistry,
    record: &NodeRecord,
) -> Option<SceneNode> {
    if record.type_name.is_empty() {
        forest.warn(format!("[{}] has no type; skipped", record.name));
        return None;
    }
    let desc = match registry.resolve(&record.type_name) {
        Ok(desc) => desc,
        Err(err) => {
            forest.warn(format!("[{}] skipped: {err}", record.name));
            return None;
        }
    };
    if !desc.is_node() {
        let err = NodeError::NotANode(record.type_name.clone());
        forest.warn(format!("[{}] skipped: {err}", record.name));
        return None;
    }

    let mut node = SceneNode::new(record.name.as_str(), registry.create_default_instance(desc));
    sync_name_property(registry, &mut node);

    for (key, raw) in &record.properties {
        if let Err(err) = apply_key(registry, &mut node, key, raw) {
            forest.warn(format!("[{}] key `{key}` skipped: {err}", record.name));
        }
    }
    Some(node)
}

fn apply_key(
    registry: &TypeRegistry,
    node: &mut SceneNode,
    key: &str,
    raw: &str,
) -> Result<(), KeyError> {
    let key = path::strip_group_prefix(registry, node.type_name, key);
    let resolved = path::resolve(registry, node.data(), key)?;
    if resolved.property.save_exclude {
        return Err(KeyError::NotPersisted);
    }
    let kind = resolved.property.kind().ok_or(KeyError::Composite)?;
    let value = parse(raw, &kind)?;
    if path::set(registry, node.data_mut(), key, &value)? {
        Ok(())
    } else {
        Err(KeyError::Unresolved)
    }
}
