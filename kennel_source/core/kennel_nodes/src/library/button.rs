use kennel_structs::Vector2;
use kennel_variant::ValueKind;

use crate::library::node_2d::{HAlignment, Node2D};
use crate::library::themes::ButtonThemePack;
use crate::registry::{TypeCategory, TypeDescriptor};
use crate::{base_link, impl_reflect, leaf_property, nested_property};

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub base: Node2D,
    pub text: String,
    pub disabled: bool,
    pub text_h_alignment: HAlignment,
    pub themes: ButtonThemePack,
}

impl Default for Button {
    fn default() -> Self {
        Self {
            base: Node2D::with_size(Vector2::new(100.0, 26.0)),
            text: String::new(),
            disabled: false,
            text_h_alignment: HAlignment::Center,
            themes: ButtonThemePack::default(),
        }
    }
}

impl_reflect!(Button);

impl Button {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Button>("Button", TypeCategory::Node)
            .with_base(base_link!(Button, Node2D))
            .with_properties([
                leaf_property!(Button, "Text", ValueKind::String, text),
                leaf_property!(Button, "Disabled", ValueKind::Bool, disabled),
                leaf_property!(Button, "TextHAlignment", HAlignment::KIND, text_h_alignment),
                nested_property!(Button, "Themes", ButtonThemePack, themes),
            ])
    }
}
