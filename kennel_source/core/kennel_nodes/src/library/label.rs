use kennel_variant::ValueKind;

use crate::library::node_2d::Node2D;
use crate::library::themes::LabelTheme;
use crate::registry::{TypeCategory, TypeDescriptor};
use crate::{base_link, impl_reflect, leaf_property, optional_nested_property};

/// Text node. `theme` stays `None` until a theme is assigned in code; `Theme/...` paths on
/// a fresh label are no-ops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Label {
    pub base: Node2D,
    pub text: String,
    pub theme: Option<LabelTheme>,
}

impl_reflect!(Label);

impl Label {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Label>("Label", TypeCategory::Node)
            .with_base(base_link!(Label, Node2D))
            .with_properties([
                leaf_property!(Label, "Text", ValueKind::String, text),
                optional_nested_property!(Label, "Theme", LabelTheme, theme),
            ])
    }
}
