pub mod defaults;
pub mod error;
pub mod ids;
pub mod library;
pub mod node_arena;
pub mod path;
pub mod property;
pub mod reflect;
pub mod registry;
pub mod scene_node;

pub use kennel_structs;
pub use kennel_variant;

pub use defaults::{DefaultStrategy, default_of, default_with_strategy};
pub use error::{NodeError, PathError};
pub use ids::NodeID;
pub use node_arena::NodeArena;
pub use path::ResolvedProperty;
pub use property::{Accessor, Property, PropertyType};
pub use reflect::Reflect;
pub use registry::{
    BaseLink, TypeCategory, TypeDescriptor, TypeRegistry, install_registry, registry,
};
pub use scene_node::SceneNode;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::*;
    use kennel_structs::{Color, Vector2};
    use kennel_variant::{ResourceRef, ValueError, ValueKind, Variant};

    fn reg() -> TypeRegistry {
        TypeRegistry::with_builtins()
    }

    #[test]
    fn test_builtin_types_resolve() {
        let reg = reg();
        for name in [
            "Node",
            "VisualItem",
            "Node2D",
            "Sprite",
            "TextureRectangle",
            "ColorRectangle",
            "Button",
            "Label",
            "BoxTheme",
            "ButtonTheme",
            "ButtonThemePack",
            "LabelTheme",
        ] {
            let desc = reg.resolve(name).unwrap();
            let instance = reg.create_default_instance(desc);
            assert_eq!(instance.type_name(), name);
        }
        assert!(reg.resolve("Sprite").unwrap().is_node());
        assert!(!reg.resolve("BoxTheme").unwrap().is_node());
        assert_eq!(
            reg.resolve("Spaceship").unwrap_err(),
            NodeError::UnknownType("Spaceship".into())
        );
    }

    #[test]
    fn test_property_lookup_walks_base_chain() {
        let reg = reg();
        assert_eq!(
            reg.base_chain("Sprite"),
            vec!["Sprite", "Node2D", "VisualItem", "Node"]
        );
        let prop = reg.find_property("Sprite", "Position").unwrap();
        assert_eq!(prop.declaring_type, "Node2D");
        assert_eq!(prop.kind(), Some(ValueKind::Vector2));

        let name = reg.find_property("Button", "Name").unwrap();
        assert!(name.save_exclude);
        assert!(reg.find_property("Node2D", "Texture").is_none());
        assert!(reg.is_a("Label", "VisualItem"));
        assert!(!reg.is_a("Node2D", "Sprite"));
    }

    #[test]
    fn test_get_and_set_inherited_leaf() {
        let reg = reg();
        let mut sprite = reg.instantiate("Sprite").unwrap();

        assert_eq!(
            path::get(&reg, sprite.as_ref(), "Scale"),
            Some(Variant::from(Vector2::one()))
        );

        let changed = path::set(
            &reg,
            sprite.as_mut(),
            "Position",
            &Variant::from(Vector2::new(3.0, 4.0)),
        )
        .unwrap();
        assert!(changed);
        assert_eq!(
            sprite.downcast_ref::<Sprite>().unwrap().base.position,
            Vector2::new(3.0, 4.0)
        );

        // Strings are parsed with the declared kind
        path::set(&reg, sprite.as_mut(), "Layer", &Variant::string("7")).unwrap();
        path::set(&reg, sprite.as_mut(), "HAlignment", &Variant::string("Right")).unwrap();
        let data = sprite.downcast_ref::<Sprite>().unwrap();
        assert_eq!(data.base.base.layer, 7);
        assert_eq!(data.base.h_alignment, HAlignment::Right);

        path::set(
            &reg,
            sprite.as_mut(),
            "Texture",
            &Variant::string("Res/Tex.png"),
        )
        .unwrap();
        assert_eq!(
            path::get(&reg, sprite.as_ref(), "Texture"),
            Some(Variant::Resource(ResourceRef::new("Texture", "Res/Tex.png")))
        );
    }

    #[test]
    fn test_nested_paths() {
        let reg = reg();
        let mut rect = reg.instantiate("ColorRectangle").unwrap();
        let red = Variant::from(Color::new(255, 0, 0, 255));

        assert!(path::set(&reg, rect.as_mut(), "Theme/FillColor", &red).unwrap());
        assert_eq!(path::get(&reg, rect.as_ref(), "Theme/FillColor"), Some(red));

        let mut button = reg.instantiate("Button").unwrap();
        assert!(
            path::set(
                &reg,
                button.as_mut(),
                "Themes/Hover/FontSize",
                &Variant::from(20.0f32)
            )
            .unwrap()
        );
        let data = button.downcast_ref::<Button>().unwrap();
        assert_eq!(data.themes.hover.font_size, 20.0);
        // Inherited through ButtonTheme -> BoxTheme
        assert!(path::get(&reg, button.as_ref(), "Themes/Pressed/Roundness").is_some());
    }

    #[test]
    fn test_broken_paths_are_noops() {
        let reg = reg();
        let mut label = reg.instantiate("Label").unwrap();

        assert_eq!(path::get(&reg, label.as_ref(), "Theme/FontSize"), None);
        assert_eq!(
            path::set(&reg, label.as_mut(), "Theme/FontSize", &Variant::from(3.0f32)),
            Ok(false)
        );
        assert_eq!(
            path::set(&reg, label.as_mut(), "Bogus", &Variant::from(true)),
            Ok(false)
        );
        assert_eq!(
            path::set(&reg, label.as_mut(), "Text/Inner", &Variant::from(true)),
            Ok(false)
        );
        assert_eq!(path::set(&reg, label.as_mut(), "", &Variant::Null), Ok(false));

        // Conversion failures are still reported
        assert!(matches!(
            path::set(&reg, label.as_mut(), "Position", &Variant::string("(1;2)")),
            Err(ValueError::Parse { .. })
        ));
    }

    #[test]
    fn test_resolve_errors() {
        let reg = reg();
        let label = reg.instantiate("Label").unwrap();

        let resolved = path::resolve(&reg, label.as_ref(), "Position").unwrap();
        assert_eq!(resolved.owner_type, "Label");
        assert_eq!(resolved.property.declaring_type, "Node2D");
        assert!(!resolved.nested);

        assert_eq!(
            path::resolve(&reg, label.as_ref(), "Theme/FontSize").unwrap_err(),
            PathError::NullIntermediate {
                segment: "Theme".into()
            }
        );
        assert_eq!(
            path::resolve(&reg, label.as_ref(), "Text/Length").unwrap_err(),
            PathError::NotNested {
                segment: "Text".into()
            }
        );
        assert!(matches!(
            path::resolve(&reg, label.as_ref(), "Nope"),
            Err(PathError::UnknownProperty { .. })
        ));

        let resolved = path::resolve_static(&reg, "Label", "Theme/FontSize").unwrap();
        assert_eq!(resolved.owner_type, "LabelTheme");
        assert!(resolved.nested);
        assert_eq!(resolved.property.kind(), Some(ValueKind::Float));
    }

    #[test]
    fn test_walk_leaves_lists_visible_paths() {
        let reg = reg();
        let rect = reg.instantiate("ColorRectangle").unwrap();
        let leaves = path::walk_leaves(&reg, rect.as_ref());
        let paths: Vec<&str> = leaves.iter().map(|(p, _)| p.as_str()).collect();

        assert_eq!(paths[0], "Name");
        assert!(paths.contains(&"Position"));
        assert!(paths.contains(&"Theme/FillColor"));
        assert!(paths.contains(&"Theme/BorderLengthLeft"));
        assert!(!paths.contains(&"ReadyForVisibility"));

        let label = reg.instantiate("Label").unwrap();
        let leaves = path::walk_leaves(&reg, label.as_ref());
        assert!(leaves.iter().all(|(p, _)| !p.starts_with("Theme/")));
    }

    #[test]
    fn test_strip_group_prefix() {
        let reg = reg();
        assert_eq!(
            path::strip_group_prefix(&reg, "Sprite", "Node2D/Position"),
            "Position"
        );
        assert_eq!(
            path::strip_group_prefix(&reg, "Sprite", "Sprite/Texture"),
            "Texture"
        );
        // A property name wins over a type name
        assert_eq!(
            path::strip_group_prefix(&reg, "ColorRectangle", "Theme/FillColor"),
            "Theme/FillColor"
        );
        assert_eq!(
            path::strip_group_prefix(&reg, "Sprite", "Button/Text"),
            "Button/Text"
        );
    }

    #[test]
    fn test_default_oracle() {
        let reg = reg();

        let rect = reg.instantiate("TextureRectangle").unwrap();
        let (size, strategy) = default_with_strategy(&reg, rect.as_ref(), "Size");
        assert_eq!(size, Variant::from(Vector2::new(32.0, 32.0)));
        assert_eq!(strategy, DefaultStrategy::DeclaringType);

        let color_rect = reg.instantiate("ColorRectangle").unwrap();
        assert_eq!(
            default_of(&reg, color_rect.as_ref(), "Theme/FillColor"),
            Variant::from(Color::new(0, 0, 0, 0))
        );

        // Nested defaults come from a bare instance of the intermediate's type
        let button = reg.instantiate("Button").unwrap();
        assert_eq!(
            default_of(&reg, button.as_ref(), "Themes/Hover/FillColor"),
            Variant::from(ButtonTheme::default().base.fill_color)
        );
        // Pack members load as bare themes, so their defaults agree with what a fresh node holds
        for state in ["Normal", "Hover", "Pressed", "Disabled"] {
            for leaf in ["FillColor", "FontColor", "FontSize"] {
                let key = format!("Themes/{state}/{leaf}");
                assert_eq!(
                    path::get(&reg, button.as_ref(), &key),
                    Some(default_of(&reg, button.as_ref(), &key)),
                    "{key}"
                );
            }
        }

        let label = reg.instantiate("Label").unwrap();
        let (value, strategy) = default_with_strategy(&reg, label.as_ref(), "Theme/FontSize");
        assert_eq!(value, Variant::from(0.0f32));
        assert_eq!(strategy, DefaultStrategy::PrimitiveTable);

        let (value, strategy) = default_with_strategy(&reg, label.as_ref(), "Nope");
        assert_eq!(value, Variant::Null);
        assert_eq!(strategy, DefaultStrategy::Null);
    }

    #[test]
    fn test_arena_insert_and_lookup() {
        let reg = reg();
        let mut arena = NodeArena::new();
        assert!(arena.is_empty());

        let a = arena.insert(SceneNode::new("A", reg.instantiate("Node").unwrap()));
        let b = arena.insert(SceneNode::new("B", reg.instantiate("Sprite").unwrap()));
        assert_eq!(arena.len(), 2);
        assert_ne!(a, b);
        assert!(!a.is_nil());
        assert_eq!(arena.get(b).unwrap().type_name, "Sprite");
        assert_eq!(arena.get(b).unwrap().id, b);
        assert!(arena.get(NodeID::nil()).is_none());
        assert!(arena.get(NodeID::from_parts(0, 1)).is_none());
        assert!(arena.get(NodeID::from_parts(b.index(), 1)).is_none());
        assert!(arena.get_mut(NodeID::from_parts(0, 7)).is_none());
        assert!(arena.get(NodeID::new(3)).is_none());

        arena.get_mut(a).unwrap().add_child(b);
        arena.get_mut(a).unwrap().add_child(b);
        assert_eq!(arena.get(a).unwrap().children, vec![b]);

        let names: Vec<&str> = arena.iter().map(|(_, n)| n.get_name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_global_registry_installs_once() {
        assert!(registry().get("Sprite").is_some());
        assert!(install_registry(TypeRegistry::new()).is_err());
    }
}
