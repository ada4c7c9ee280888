//! Composite theme values reached through nested properties such as `Theme/FillColor`.

use kennel_structs::Color;
use kennel_variant::{ResourceRef, ValueKind};

use crate::registry::{TypeCategory, TypeDescriptor};
use crate::{base_link, impl_reflect, leaf_property, nested_property};

const FONT: ValueKind = ValueKind::Resource("Font");

#[derive(Clone, Debug, PartialEq)]
pub struct BoxTheme {
    pub fill_color: Color,
    pub border_color: Color,
    pub roundness: f32,
    pub border_length_top: f32,
    pub border_length_right: f32,
    pub border_length_bottom: f32,
    pub border_length_left: f32,
}

impl Default for BoxTheme {
    fn default() -> Self {
        Self {
            fill_color: Color::TRANSPARENT,
            border_color: Color::TRANSPARENT,
            roundness: 0.0,
            border_length_top: 0.0,
            border_length_right: 0.0,
            border_length_bottom: 0.0,
            border_length_left: 0.0,
        }
    }
}

impl_reflect!(BoxTheme);

impl BoxTheme {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<BoxTheme>("BoxTheme", TypeCategory::Composite).with_properties([
            leaf_property!(BoxTheme, "FillColor", ValueKind::Color, fill_color),
            leaf_property!(BoxTheme, "BorderColor", ValueKind::Color, border_color),
            leaf_property!(BoxTheme, "Roundness", ValueKind::Float, roundness),
            leaf_property!(BoxTheme, "BorderLengthTop", ValueKind::Float, border_length_top),
            leaf_property!(BoxTheme, "BorderLengthRight", ValueKind::Float, border_length_right),
            leaf_property!(BoxTheme, "BorderLengthBottom", ValueKind::Float, border_length_bottom),
            leaf_property!(BoxTheme, "BorderLengthLeft", ValueKind::Float, border_length_left),
        ])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonTheme {
    pub base: BoxTheme,
    pub font_size: f32,
    pub font_spacing: f32,
    pub font: Option<ResourceRef>,
    pub font_color: Color,
}

impl Default for ButtonTheme {
    fn default() -> Self {
        Self {
            base: BoxTheme {
                fill_color: Color::rgb(64, 64, 64),
                border_color: Color::rgb(96, 96, 96),
                roundness: 0.2,
                ..BoxTheme::default()
            },
            font_size: 16.0,
            font_spacing: 0.0,
            font: None,
            font_color: Color::WHITE,
        }
    }
}

impl_reflect!(ButtonTheme);

impl ButtonTheme {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<ButtonTheme>("ButtonTheme", TypeCategory::Composite)
            .with_base(base_link!(ButtonTheme, BoxTheme))
            .with_properties([
                leaf_property!(ButtonTheme, "FontSize", ValueKind::Float, font_size),
                leaf_property!(ButtonTheme, "FontSpacing", ValueKind::Float, font_spacing),
                leaf_property!(ButtonTheme, "Font", FONT, font),
                leaf_property!(ButtonTheme, "FontColor", ValueKind::Color, font_color),
            ])
    }
}

/// One theme per button state. Every state starts from a bare `ButtonTheme`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ButtonThemePack {
    pub normal: ButtonTheme,
    pub hover: ButtonTheme,
    pub pressed: ButtonTheme,
    pub disabled: ButtonTheme,
}

impl_reflect!(ButtonThemePack);

impl ButtonThemePack {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<ButtonThemePack>("ButtonThemePack", TypeCategory::Composite)
            .with_properties([
                nested_property!(ButtonThemePack, "Normal", ButtonTheme, normal),
                nested_property!(ButtonThemePack, "Hover", ButtonTheme, hover),
                nested_property!(ButtonThemePack, "Pressed", ButtonTheme, pressed),
                nested_property!(ButtonThemePack, "Disabled", ButtonTheme, disabled),
            ])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelTheme {
    pub font_size: f32,
    pub font_color: Color,
    pub font: Option<ResourceRef>,
}

impl Default for LabelTheme {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_color: Color::WHITE,
            font: None,
        }
    }
}

impl_reflect!(LabelTheme);

impl LabelTheme {
    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<LabelTheme>("LabelTheme", TypeCategory::Composite).with_properties([
            leaf_property!(LabelTheme, "FontSize", ValueKind::Float, font_size),
            leaf_property!(LabelTheme, "FontColor", ValueKind::Color, font_color),
            leaf_property!(LabelTheme, "Font", FONT, font),
        ])
    }
}
