use crate::ids::NodeID;
use crate::reflect::Reflect;

/// A live node: identity and hierarchy links plus its typed property payload.
#[derive(Debug)]
pub struct SceneNode {
    pub id: NodeID,
    pub name: String,
    pub type_name: &'static str,
    /// Back-reference only; the arena owns every node.
    pub parent: Option<NodeID>,
    pub children: Vec<NodeID>,
    pub data: Box<dyn Reflect>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, data: Box<dyn Reflect>) -> Self {
        Self {
            id: NodeID::nil(),
            name: name.into(),
            type_name: data.type_name(),
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    #[inline]
    pub fn get_name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn get_type(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn add_child(&mut self, child: NodeID) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub fn remove_child(&mut self, child: NodeID) {
        self.children.retain(|c| *c != child);
    }

    #[inline]
    pub fn data(&self) -> &dyn Reflect {
        &*self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut dyn Reflect {
        &mut *self.data
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.data.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.data.as_any_mut().downcast_mut::<T>()
    }
}
