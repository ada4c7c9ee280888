use crate::library::node_2d::Node2D;
use crate::library::themes::BoxTheme;
use crate::registry::{TypeCategory, TypeDescriptor};
use crate::{base_link, impl_reflect, nested_property};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorRectangle {
    pub base: Node2D,
    pub theme: BoxTheme,
}

impl_reflect!(ColorRectangle);

impl ColorRectangle {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<ColorRectangle>("ColorRectangle", TypeCategory::Node)
            .with_base(base_link!(ColorRectangle, Node2D))
            .with_properties([nested_property!(ColorRectangle, "Theme", BoxTheme, theme)])
    }
}
