use kennel_variant::ValueKind;

use crate::library::node::Node;
use crate::registry::{TypeCategory, TypeDescriptor};
use crate::{base_link, impl_reflect, leaf_property};

#[derive(Clone, Debug, PartialEq)]
pub struct VisualItem {
    pub base: Node,
    pub visible: bool,
    pub layer: i32,
    /// Runtime-only draw gate.
    pub ready_for_visibility: bool,
}

impl Default for VisualItem {
    fn default() -> Self {
        Self {
            base: Node::default(),
            visible: true,
            layer: 0,
            ready_for_visibility: false,
        }
    }
}

impl_reflect!(VisualItem);

impl VisualItem {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<VisualItem>("VisualItem", TypeCategory::Node)
            .with_base(base_link!(VisualItem, Node))
            .with_properties([
                leaf_property!(VisualItem, "Visible", ValueKind::Bool, visible),
                leaf_property!(VisualItem, "Layer", ValueKind::Int, layer),
                leaf_property!(VisualItem, "ReadyForVisibility", ValueKind::Bool, ready_for_visibility)
                    .inspector_exclude()
                    .save_exclude(),
            ])
    }
}
