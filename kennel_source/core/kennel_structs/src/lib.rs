pub mod color;
pub mod vector2;

pub use color::Color;
pub use vector2::Vector2;
