use kennel_variant::{ValueKind, define_enum};

use crate::registry::{TypeCategory, TypeDescriptor};
use crate::{impl_reflect, leaf_property};

define_enum! {
    pub enum ProcessMode { Inherit, Pausable, WhenPaused, Always, Disabled }
}

/// Root of every node type.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    pub process_mode: ProcessMode,
    pub active: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: String::new(),
            process_mode: ProcessMode::Inherit,
            active: true,
        }
    }
}

impl_reflect!(Node);

impl Node {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Node>("Node", TypeCategory::Node).with_properties([
            // The section header carries the name
            leaf_property!(Node, "Name", ValueKind::String, name).save_exclude(),
            leaf_property!(Node, "ProcessMode", ProcessMode::KIND, process_mode),
            leaf_property!(Node, "Active", ValueKind::Bool, active),
        ])
    }
}
