use kennel_structs::Vector2;
use kennel_variant::{ValueKind, define_enum};

use crate::library::visual_item::VisualItem;
use crate::registry::{TypeCategory, TypeDescriptor};
use crate::{base_link, impl_reflect, leaf_property};

define_enum! {
    pub enum HAlignment { Center, Left, Right }
}

define_enum! {
    pub enum VAlignment { Center, Top, Bottom }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node2D {
    pub base: VisualItem,
    pub position: Vector2,
    /// Degrees.
    pub rotation: f32,
    pub scale: Vector2,
    pub size: Vector2,
    pub origin: Vector2,
    pub h_alignment: HAlignment,
    pub v_alignment: VAlignment,
}

impl Default for Node2D {
    fn default() -> Self {
        Self {
            base: VisualItem::default(),
            position: Vector2::zero(),
            rotation: 0.0,
            scale: Vector2::one(),
            size: Vector2::zero(),
            origin: Vector2::zero(),
            h_alignment: HAlignment::Center,
            v_alignment: VAlignment::Center,
        }
    }
}

impl Node2D {
    pub fn with_size(size: Vector2) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Node2D>("Node2D", TypeCategory::Node)
            .with_base(base_link!(Node2D, VisualItem))
            .with_properties([
                leaf_property!(Node2D, "Position", ValueKind::Vector2, position),
                leaf_property!(Node2D, "Rotation", ValueKind::Float, rotation),
                leaf_property!(Node2D, "Scale", ValueKind::Vector2, scale),
                leaf_property!(Node2D, "Size", ValueKind::Vector2, size),
                leaf_property!(Node2D, "Origin", ValueKind::Vector2, origin),
                leaf_property!(Node2D, "HAlignment", HAlignment::KIND, h_alignment),
                leaf_property!(Node2D, "VAlignment", VAlignment::KIND, v_alignment),
            ])
    }
}

impl_reflect!(Node2D);
