use kennel_nodes::{NodeArena, NodeError, NodeID, SceneNode, TypeRegistry, path};
use kennel_variant::Variant;
use rustc_hash::FxHashMap;

/// Why a parent link was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkRefusal {
    MissingNode,
    SelfParent,
    Cycle,
}

/// Owns every node of a loaded scene. Names are unique across the forest.
#[derive(Debug, Default)]
pub struct Forest {
    arena: NodeArena,
    names: FxHashMap<String, NodeID>,
    warnings: Vec<String>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SceneNode) -> Result<NodeID, NodeError> {
        if self.names.contains_key(&node.name) {
            return Err(NodeError::NameTaken(node.name));
        }
        let name = node.name.clone();
        let id = self.arena.insert(node);
        self.names.insert(name, id);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: NodeID) -> Option<&SceneNode> {
        self.arena.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeID) -> Option<&mut SceneNode> {
        self.arena.get_mut(id)
    }

    #[inline]
    pub fn id_of(&self, name: &str) -> Option<NodeID> {
        self.names.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&SceneNode> {
        self.id_of(name).and_then(|id| self.arena.get(id))
    }

    pub fn resolve_name(&self, name: &str) -> Result<NodeID, NodeError> {
        self.id_of(name)
            .ok_or_else(|| NodeError::UnknownNode(name.to_string()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Nodes in load order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeID, &SceneNode)> {
        self.arena.iter()
    }

    /// Nodes without a parent, in load order.
    pub fn roots(&self) -> Vec<NodeID> {
        self.arena
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn children(&self, id: NodeID) -> &[NodeID] {
        self.arena
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeID) -> Option<NodeID> {
        self.arena.get(id)?.parent
    }

    /// Whether `ancestor` is `id` or one of its parents.
    pub fn is_ancestor(&self, ancestor: NodeID, id: NodeID) -> bool {
        let mut current = Some(id);
        let mut steps = 0;
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            // Bounded even if the links were corrupted
            steps += 1;
            if steps > self.arena.len() {
                return false;
            }
            current = self.parent(cur);
        }
        false
    }

    /// Makes `child` a child of `parent`, detaching it from any previous parent.
    pub fn link(&mut self, child: NodeID, parent: NodeID) -> Result<(), LinkRefusal> {
        if child == parent {
            return Err(LinkRefusal::SelfParent);
        }
        if !self.arena.contains(child) || !self.arena.contains(parent) {
            return Err(LinkRefusal::MissingNode);
        }
        if self.is_ancestor(child, parent) {
            return Err(LinkRefusal::Cycle);
        }

        if let Some(old) = self.parent(child) {
            if let Some(old_parent) = self.arena.get_mut(old) {
                old_parent.remove_child(child);
            }
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.add_child(child);
        }
        Ok(())
    }

    /// Renames a node, keeping its `Name` property in step.
    pub fn rename(
        &mut self,
        registry: &TypeRegistry,
        id: NodeID,
        new_name: &str,
    ) -> Result<(), NodeError> {
        let Some(node) = self.arena.get(id) else {
            return Err(NodeError::UnknownNode(id.to_string()));
        };
        if node.name == new_name {
            return Ok(());
        }
        if self.names.contains_key(new_name) {
            return Err(NodeError::NameTaken(new_name.to_string()));
        }

        let old_name = node.name.clone();
        self.names.remove(&old_name);
        self.names.insert(new_name.to_string(), id);
        if let Some(node) = self.arena.get_mut(id) {
            node.name = new_name.to_string();
            sync_name_property(registry, node);
        }
        log::debug!("Renamed node {old_name} -> {new_name}");
        Ok(())
    }

    /// Depth-first walk from every root: `(id, depth)` in display order.
    pub fn depth_first(&self) -> Vec<(NodeID, usize)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<(NodeID, usize)> =
            self.roots().into_iter().rev().map(|id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            if out.iter().any(|(seen, _)| *seen == id) {
                continue;
            }
            out.push((id, depth));
            for child in self.children(id).iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }

    pub(crate) fn warn(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }

    /// Problems skipped while building this forest.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Copies the node's name into its `Name` property.
pub(crate) fn sync_name_property(registry: &TypeRegistry, node: &mut SceneNode) {
    let name = Variant::string(&node.name);
    if let Err(err) = path::set(registry, node.data_mut(), "Name", &name) {
        log::debug!("Could not mirror name of {}: {err}", node.name);
    }
}
