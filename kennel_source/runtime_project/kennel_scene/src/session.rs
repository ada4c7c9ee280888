use indexmap::IndexMap;
use kennel_nodes::{NodeID, SceneNode, TypeRegistry, default_of, path};
use kennel_variant::Variant;
use rustc_hash::FxHashMap;

use crate::error::{Result, SceneError};
use crate::forest::Forest;

pub const NAME_PATH: &str = "Name";

/// Edited values of one node: property path -> value, in first-touched order.
pub type EditedValues = IndexMap<String, Variant>;

/// Pending edits for the nodes being inspected, keyed by arena id.
///
/// Values are seeded lazily from the live node the first time they are read and persist
/// until [`EditSession::discard`].
#[derive(Debug, Default)]
pub struct EditSession {
    edits: FxHashMap<NodeID, EditedValues>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// All editable values of `node`: its name and every inspector-visible leaf.
    pub fn values(&mut self, registry: &TypeRegistry, node: &SceneNode) -> &EditedValues {
        let values = self.edits.entry(node.id).or_default();
        values
            .entry(NAME_PATH.to_string())
            .or_insert_with(|| Variant::string(&node.name));
        for (path, value) in path::walk_leaves(registry, node.data()) {
            values.entry(path).or_insert(value);
        }
        values
    }

    /// One value, seeded from the live node when not edited yet.
    pub fn get(&mut self, registry: &TypeRegistry, node: &SceneNode, path: &str) -> Option<Variant> {
        let values = self.edits.entry(node.id).or_default();
        if let Some(value) = values.get(path) {
            return Some(value.clone());
        }
        let live = if path == NAME_PATH {
            Variant::string(&node.name)
        } else {
            path::get(registry, node.data(), path)?
        };
        values.insert(path.to_string(), live.clone());
        Some(live)
    }

    pub fn set(&mut self, id: NodeID, path: &str, value: impl Into<Variant>) {
        self.edits
            .entry(id)
            .or_default()
            .insert(path.to_string(), value.into());
    }

    /// Sets the edited value to the default of `path` and returns it.
    pub fn reset(&mut self, registry: &TypeRegistry, node: &SceneNode, path: &str) -> Variant {
        let default = default_of(registry, node.data(), path);
        self.set(node.id, path, default.clone());
        default
    }

    /// Pushes the edited values into the live node; a changed `Name` renames it in the forest.
    pub fn apply(&self, registry: &TypeRegistry, forest: &mut Forest, id: NodeID) -> Result<()> {
        let Some(values) = self.edits.get(&id) else {
            return Ok(());
        };

        for (path, value) in values {
            if path == NAME_PATH {
                if let Some(name) = value.as_str().filter(|n| !n.is_empty()) {
                    forest.rename(registry, id, name)?;
                }
                continue;
            }
            let Some(node) = forest.get_mut(id) else {
                return Ok(());
            };
            let key = path::strip_group_prefix(registry, node.type_name, path);
            let applied = path::set(registry, node.data_mut(), key, value).map_err(|source| {
                SceneError::Value {
                    path: path.clone(),
                    source,
                }
            })?;
            if !applied {
                log::debug!("Edit `{path}` on {} did not resolve", node.name);
            }
        }
        Ok(())
    }

    pub fn edited(&self, id: NodeID) -> Option<&EditedValues> {
        self.edits.get(&id)
    }

    pub fn discard(&mut self, id: NodeID) -> Option<EditedValues> {
        self.edits.remove(&id)
    }

    #[inline]
    pub fn is_editing(&self, id: NodeID) -> bool {
        self.edits.contains_key(&id)
    }
}
