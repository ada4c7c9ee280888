use kennel_variant::{ResourceRef, ValueKind};

use crate::library::node_2d::Node2D;
use crate::registry::{TypeCategory, TypeDescriptor};
use crate::{base_link, impl_reflect, leaf_property};

pub const TEXTURE: ValueKind = ValueKind::Resource("Texture");

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub base: Node2D,
    pub flip_h: bool,
    pub flip_v: bool,
    pub texture: Option<ResourceRef>,
}

impl_reflect!(Sprite);

impl Sprite {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Sprite>("Sprite", TypeCategory::Node)
            .with_base(base_link!(Sprite, Node2D))
            .with_properties([
                leaf_property!(Sprite, "FlipH", ValueKind::Bool, flip_h),
                leaf_property!(Sprite, "FlipV", ValueKind::Bool, flip_v),
                leaf_property!(Sprite, "Texture", TEXTURE, texture),
            ])
    }
}
