//! Built-in node and composite types.

pub mod button;
pub mod color_rectangle;
pub mod label;
pub mod node;
pub mod node_2d;
pub mod sprite;
pub mod texture_rectangle;
pub mod themes;
pub mod visual_item;

pub use button::Button;
pub use color_rectangle::ColorRectangle;
pub use label::Label;
pub use node::{Node, ProcessMode};
pub use node_2d::{HAlignment, Node2D, VAlignment};
pub use sprite::Sprite;
pub use texture_rectangle::TextureRectangle;
pub use themes::{BoxTheme, ButtonTheme, ButtonThemePack, LabelTheme};
pub use visual_item::VisualItem;

use crate::registry::TypeRegistry;

pub fn register_builtins(reg: &mut TypeRegistry) {
    //--------------------------------
    // Composites
    //--------------------------------
    reg.register(BoxTheme::descriptor());
    reg.register(ButtonTheme::descriptor());
    reg.register(ButtonThemePack::descriptor());
    reg.register(LabelTheme::descriptor());

    //--------------------------------
    // Nodes
    //--------------------------------
    reg.register(Node::descriptor());
    reg.register(VisualItem::descriptor());
    reg.register(Node2D::descriptor());
    reg.register(Sprite::descriptor());
    reg.register(TextureRectangle::descriptor());
    reg.register(ColorRectangle::descriptor());
    reg.register(Button::descriptor());
    reg.register(Label::descriptor());
}
