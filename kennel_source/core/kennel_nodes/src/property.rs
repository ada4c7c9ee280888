use std::any::Any;

use kennel_variant::{ValueError, ValueKind, Variant};

use crate::reflect::Reflect;

pub type LeafGet = fn(&dyn Any) -> Option<Variant>;
pub type LeafSet = fn(&mut dyn Any, &Variant) -> Result<(), ValueError>;
pub type NestedGet = fn(&dyn Any) -> Option<&dyn Reflect>;
pub type NestedGetMut = fn(&mut dyn Any) -> Option<&mut dyn Reflect>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyType {
    Leaf(ValueKind),
    /// A composite value; carries the declared type name.
    Nested(&'static str),
}

#[derive(Clone, Copy, Debug)]
pub enum Accessor {
    Leaf { get: LeafGet, set: LeafSet },
    /// `None` from either accessor means the composite is currently null.
    Nested { get: NestedGet, get_mut: NestedGetMut },
}

/// One row of a type's property table.
#[derive(Clone, Copy, Debug)]
pub struct Property {
    pub name: &'static str,
    pub declaring_type: &'static str,
    pub ty: PropertyType,
    pub save_exclude: bool,
    pub inspector_exclude: bool,
    pub access: Accessor,
}

impl Property {
    pub const fn leaf(
        declaring_type: &'static str,
        name: &'static str,
        kind: ValueKind,
        get: LeafGet,
        set: LeafSet,
    ) -> Self {
        Self {
            name,
            declaring_type,
            ty: PropertyType::Leaf(kind),
            save_exclude: false,
            inspector_exclude: false,
            access: Accessor::Leaf { get, set },
        }
    }

    pub const fn nested(
        declaring_type: &'static str,
        name: &'static str,
        type_name: &'static str,
        get: NestedGet,
        get_mut: NestedGetMut,
    ) -> Self {
        Self {
            name,
            declaring_type,
            ty: PropertyType::Nested(type_name),
            save_exclude: false,
            inspector_exclude: false,
            access: Accessor::Nested { get, get_mut },
        }
    }

    /// Never written to a document.
    pub const fn save_exclude(mut self) -> Self {
        self.save_exclude = true;
        self
    }

    /// Hidden from editing sessions.
    pub const fn inspector_exclude(mut self) -> Self {
        self.inspector_exclude = true;
        self
    }

    #[inline]
    pub fn kind(&self) -> Option<ValueKind> {
        match self.ty {
            PropertyType::Leaf(kind) => Some(kind),
            PropertyType::Nested(_) => None,
        }
    }

    #[inline]
    pub fn nested_type(&self) -> Option<&'static str> {
        match self.ty {
            PropertyType::Nested(name) => Some(name),
            PropertyType::Leaf(_) => None,
        }
    }

    #[inline]
    pub fn is_nested(&self) -> bool {
        matches!(self.ty, PropertyType::Nested(_))
    }
}

/// `leaf_property!(Owner, "Name", kind, field.path)` builds a leaf row reading and writing
/// `owner.field.path`.
#[macro_export]
macro_rules! leaf_property {
    ($owner:ident, $name:literal, $kind:expr, $($field:ident).+) => {
        $crate::Property::leaf(
            stringify!($owner),
            $name,
            $kind,
            |any| {
                any.downcast_ref::<$owner>()
                    .map(|o| $crate::kennel_variant::Variant::from(o.$($field).+.clone()))
            },
            |any, value| {
                let o = any
                    .downcast_mut::<$owner>()
                    .ok_or_else(|| $crate::property::foreign_owner_error(stringify!($owner)))?;
                o.$($field).+ = $crate::kennel_variant::FromVariant::from_variant(value)?;
                Ok(())
            },
        )
    };
}

/// `nested_property!(Owner, "Theme", NestedType, field)` for an always-present composite.
#[macro_export]
macro_rules! nested_property {
    ($owner:ident, $name:literal, $nested:ident, $($field:ident).+) => {
        $crate::Property::nested(
            stringify!($owner),
            $name,
            stringify!($nested),
            |any| {
                any.downcast_ref::<$owner>()
                    .map(|o| &o.$($field).+ as &dyn $crate::Reflect)
            },
            |any| {
                any.downcast_mut::<$owner>()
                    .map(|o| &mut o.$($field).+ as &mut dyn $crate::Reflect)
            },
        )
    };
}

/// Like `nested_property!` for an `Option<Nested>` field; `None` reads as a null composite.
#[macro_export]
macro_rules! optional_nested_property {
    ($owner:ident, $name:literal, $nested:ident, $($field:ident).+) => {
        $crate::Property::nested(
            stringify!($owner),
            $name,
            stringify!($nested),
            |any| {
                any.downcast_ref::<$owner>()
                    .and_then(|o| o.$($field).+.as_ref())
                    .map(|n| n as &dyn $crate::Reflect)
            },
            |any| {
                any.downcast_mut::<$owner>()
                    .and_then(|o| o.$($field).+.as_mut())
                    .map(|n| n as &mut dyn $crate::Reflect)
            },
        )
    };
}

/// Raised by generated setters handed an object of the wrong type.
#[doc(hidden)]
pub fn foreign_owner_error(expected: &'static str) -> ValueError {
    ValueError::KindMismatch {
        expected,
        found: "foreign object",
    }
}
