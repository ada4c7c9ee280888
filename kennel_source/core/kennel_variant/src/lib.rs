pub mod codec;
pub mod error;
pub mod variant;

pub use codec::{coerce, parse, stringify, values_equal};
pub use error::ValueError;
pub use variant::*;

#[cfg(test)]
mod tests {
    use super::*;
    use kennel_structs::{Color, Vector2};

    crate::define_enum! {
        pub enum Facing { Left, Right, Up }
    }

    fn round_trip(literal: &str, kind: ValueKind) -> String {
        let value = parse(literal, &kind).unwrap();
        stringify(&value, &kind).unwrap().unwrap()
    }

    #[test]
    fn test_primitive_round_trip() {
        assert_eq!(round_trip("true", ValueKind::Bool), "true");
        assert_eq!(round_trip("false", ValueKind::Bool), "false");
        assert_eq!(round_trip("3.5", ValueKind::Float), "3.5");
        assert_eq!(round_trip("(1,2)", ValueKind::Vector2), "(1,2)");
        assert_eq!(round_trip("(10,20,30,255)", ValueKind::Color), "(10,20,30,255)");
        assert_eq!(round_trip("42", ValueKind::Int), "42");
    }

    #[test]
    fn test_parse_is_lenient_about_spacing_and_case() {
        assert_eq!(parse(" TRUE ", &ValueKind::Bool).unwrap(), Variant::Bool(true));
        assert_eq!(
            parse(" ( 1.5 , -2 ) ", &ValueKind::Vector2).unwrap(),
            Variant::Vector2(Vector2::new(1.5, -2.0))
        );
        assert_eq!(
            parse("1e2", &ValueKind::Float).unwrap(),
            Variant::Number(Number::F32(100.0))
        );
        assert_eq!(
            parse("right", &Facing::KIND).unwrap(),
            Variant::from(Facing::Right)
        );
    }

    #[test]
    fn test_float_text_is_shortest_form() {
        let kind = ValueKind::Float;
        assert_eq!(stringify(&Variant::from(1.0f32), &kind).unwrap().unwrap(), "1");
        assert_eq!(stringify(&Variant::from(-0.25f32), &kind).unwrap().unwrap(), "-0.25");
        assert_eq!(stringify(&Variant::from(-0.0f32), &kind).unwrap().unwrap(), "0");
        assert_eq!(stringify(&Variant::from(0.1f32), &kind).unwrap().unwrap(), "0.1");
    }

    #[test]
    fn test_malformed_literals_fail() {
        for bad in ["1,2", "(1)", "(1,2,3)", "(a,2)", "(1,2"] {
            assert!(
                matches!(parse(bad, &ValueKind::Vector2), Err(ValueError::Parse { .. })),
                "{bad} should not parse"
            );
        }
        assert!(parse("(1,2,3)", &ValueKind::Color).is_err());
        assert!(parse("(256,0,0,0)", &ValueKind::Color).is_err());
        assert!(parse("yes", &ValueKind::Bool).is_err());
        assert!(parse("inf", &ValueKind::Float).is_err());
        assert!(parse("1.5", &ValueKind::Int).is_err());
    }

    #[test]
    fn test_unknown_enum_member() {
        let err = parse("Diagonal", &Facing::KIND).unwrap_err();
        assert_eq!(
            err,
            ValueError::UnknownEnumMember {
                enum_name: "Facing",
                member: "Diagonal".to_string(),
            }
        );
    }

    #[test]
    fn test_enum_macro() {
        assert_eq!(Facing::default(), Facing::Left);
        assert_eq!(Facing::DEF.members, &["Left", "Right", "Up"]);
        assert_eq!(Facing::Up.index(), 2);
        assert_eq!(Facing::from_variant(&Variant::string("up")).unwrap(), Facing::Up);
        assert!(Facing::from_variant(&Variant::Bool(true)).is_err());
        assert_eq!(Variant::from(Facing::Right).to_string(), "Right");
    }

    #[test]
    fn test_resource_literals() {
        let kind = ValueKind::Resource("Texture");

        let value = parse("Texture(\"Res/Tex.png\")", &kind).unwrap();
        assert_eq!(value, Variant::Resource(ResourceRef::new("Texture", "Res/Tex.png")));
        assert_eq!(
            stringify(&value, &kind).unwrap().as_deref(),
            Some("Texture(\"Res/Tex.png\")")
        );

        // Legacy forms carry only the path
        assert_eq!(parse("\"Res/a.png\"", &kind).unwrap(), parse("Res/a.png", &kind).unwrap());

        // Empty path means "no key"
        assert_eq!(parse("Texture(\"\")", &kind).unwrap(), Variant::Null);
        assert_eq!(stringify(&Variant::string(""), &kind).unwrap(), None);
        assert_eq!(stringify(&Variant::Null, &kind).unwrap(), None);

        // Plain paths from an editor become references
        assert_eq!(
            coerce(&Variant::string("Res/Tex.png"), &kind).unwrap(),
            Variant::Resource(ResourceRef::new("Texture", "Res/Tex.png"))
        );
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(
            coerce(&Variant::from(2i32), &ValueKind::Float).unwrap(),
            Variant::Number(Number::F32(2.0))
        );
        assert_eq!(
            coerce(&Variant::from(4.0f64), &ValueKind::Int).unwrap(),
            Variant::Number(Number::I32(4))
        );
        assert!(coerce(&Variant::from(4.5f64), &ValueKind::Int).is_err());
        assert!(matches!(
            coerce(&Variant::Bool(true), &ValueKind::Color),
            Err(ValueError::KindMismatch { expected: "Color", found: "bool" })
        ));
    }

    #[test]
    fn test_values_equal() {
        assert!(values_equal(&Variant::from(1i32), &Variant::from(1.0f32)));
        assert!(values_equal(
            &Variant::from(Vector2::new(-0.0, 1.0)),
            &Variant::from(Vector2::new(0.0, 1.0))
        ));
        assert!(!values_equal(
            &Variant::from(Color::new(0, 0, 0, 0)),
            &Variant::from(Color::new(0, 0, 0, 1))
        ));
        assert!(values_equal(
            &Variant::Null,
            &Variant::Resource(ResourceRef::new("Texture", ""))
        ));
        assert!(values_equal(
            &Variant::Resource(ResourceRef::new("Texture", "a.png")),
            &Variant::Resource(ResourceRef::new("Image", "a.png"))
        ));
        assert!(values_equal(&Variant::from(Facing::Up), &Variant::string("Up")));
        assert!(!values_equal(&Variant::Null, &Variant::string("")));
    }

    #[test]
    fn test_json_value() {
        let json = Variant::from(Vector2::new(1.0, 2.5)).to_json_value();
        assert_eq!(json, serde_json::json!({ "x": 1.0, "y": 2.5 }));
        assert_eq!(Variant::Null.to_json_value(), serde_json::Value::Null);
        assert_eq!(
            Variant::from(Facing::Up).to_json_value(),
            serde_json::Value::String("Up".into())
        );
    }
}
