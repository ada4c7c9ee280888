use crate::ids::NodeID;
use crate::scene_node::SceneNode;

/// Arena-based storage for scene nodes.
/// Uses a Vec<Option<SceneNode>> indexed by NodeID; index 0 is reserved for nil, so
/// NodeID 1 lives in slot 0. Lookups also match the generation stamped at insert.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<SceneNode>>,
    live: u32,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Stores `node` in the next free slot and stamps it with its new ID.
    pub fn insert(&mut self, mut node: SceneNode) -> NodeID {
        let id = NodeID::new(self.slots.len() as u32 + 1);
        node.id = id;
        self.slots.push(Some(node));
        self.live += 1;
        id
    }

    #[inline]
    fn slot(id: NodeID) -> Option<usize> {
        (id.index() as usize).checked_sub(1)
    }

    #[inline]
    pub fn get(&self, id: NodeID) -> Option<&SceneNode> {
        self.slots
            .get(Self::slot(id)?)?
            .as_ref()
            .filter(|node| node.id == id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeID) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(Self::slot(id)?)?
            .as_mut()
            .filter(|node| node.id == id)
    }

    #[inline]
    pub fn contains(&self, id: NodeID) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeID, &SceneNode)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|node| (NodeID::new(idx as u32 + 1), node)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeID, &mut SceneNode)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_mut().map(|node| (NodeID::new(idx as u32 + 1), node)))
    }

    pub fn keys(&self) -> impl Iterator<Item = NodeID> + '_ {
        self.iter().map(|(id, _)| id)
    }
}
