use kennel_structs::Vector2;
use kennel_variant::ResourceRef;

use crate::library::node_2d::Node2D;
use crate::library::sprite::TEXTURE;
use crate::registry::{TypeCategory, TypeDescriptor};
use crate::{base_link, impl_reflect, leaf_property};

#[derive(Clone, Debug, PartialEq)]
pub struct TextureRectangle {
    pub base: Node2D,
    pub texture: Option<ResourceRef>,
}

impl Default for TextureRectangle {
    fn default() -> Self {
        Self {
            base: Node2D::with_size(Vector2::new(32.0, 32.0)),
            texture: None,
        }
    }
}

impl_reflect!(TextureRectangle);

impl TextureRectangle {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<TextureRectangle>("TextureRectangle", TypeCategory::Node)
            .with_base(base_link!(TextureRectangle, Node2D))
            .with_properties([leaf_property!(TextureRectangle, "Texture", TEXTURE, texture)])
    }
}
