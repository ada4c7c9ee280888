// kennel_variant/src/variant.rs

use std::fmt;
use std::sync::Arc;

use kennel_structs::{Color, Vector2};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

use crate::error::ValueError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Number {
    #[inline]
    pub const fn is_int(&self) -> bool {
        matches!(self, Number::I32(_) | Number::I64(_))
    }

    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::F32(_) | Number::F64(_))
    }

    #[inline]
    pub fn as_i64_lossy(&self) -> Option<i64> {
        match *self {
            Number::I32(v) => Some(v as i64),
            Number::I64(v) => Some(v),
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    #[inline]
    pub fn as_f64_lossy(&self) -> f64 {
        match *self {
            Number::I32(v) => v as f64,
            Number::I64(v) => v as f64,
            Number::F32(v) => v as f64,
            Number::F64(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I32(v) => write!(f, "{v}"),
            Number::I64(v) => write!(f, "{v}"),
            Number::F32(v) => write!(f, "{v}"),
            Number::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Static description of a property enumeration: its name and ordered member names.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDef {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

impl EnumDef {
    /// Exact match first, then ASCII case-insensitive.
    pub fn index_of(&self, member: &str) -> Option<usize> {
        self.members
            .iter()
            .position(|m| *m == member)
            .or_else(|| {
                self.members
                    .iter()
                    .position(|m| m.eq_ignore_ascii_case(member))
            })
    }

    #[inline]
    pub fn member(&self, index: usize) -> Option<&'static str> {
        self.members.get(index).copied()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EnumValue {
    pub def: &'static EnumDef,
    pub index: usize,
}

impl EnumValue {
    pub const fn new(def: &'static EnumDef, index: usize) -> Self {
        Self { def, index }
    }

    pub fn member_name(&self) -> &'static str {
        self.def.member(self.index).unwrap_or("")
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.def.name == other.def.name && self.index == other.index
    }
}

/// A reference to an externally loaded asset, e.g. `Texture("Res/Tex.png")`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub type_name: Arc<str>,
    pub path: Arc<str>,
}

impl ResourceRef {
    pub fn new(type_name: impl AsRef<str>, path: impl AsRef<str>) -> Self {
        Self {
            type_name: Arc::from(type_name.as_ref()),
            path: Arc::from(path.as_ref()),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Declared type of a leaf property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Vector2,
    Color,
    Enum(&'static EnumDef),
    String,
    /// Resource reference; carries the resource type name written in the literal.
    Resource(&'static str),
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Vector2 => "Vector2",
            ValueKind::Color => "Color",
            ValueKind::Enum(def) => def.name,
            ValueKind::String => "string",
            ValueKind::Resource(ty) => *ty,
        }
    }

    #[inline]
    pub const fn is_resource(&self) -> bool {
        matches!(self, ValueKind::Resource(_))
    }

    /// Primitive default used when no better default can be computed.
    pub fn zero(&self) -> Variant {
        match self {
            ValueKind::Bool => Variant::Bool(false),
            ValueKind::Int => Variant::Number(Number::I32(0)),
            ValueKind::Float => Variant::Number(Number::F32(0.0)),
            ValueKind::Vector2 => Variant::Vector2(Vector2::zero()),
            ValueKind::Color => Variant::Color(Color::default()),
            ValueKind::Enum(def) => Variant::Enum(EnumValue::new(*def, 0)),
            ValueKind::String => Variant::string(""),
            ValueKind::Resource(_) => Variant::Null,
        }
    }
}

/// A dynamically typed property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Variant {
    Null,
    Bool(bool),
    Number(Number),
    Vector2(Vector2),
    Color(Color),
    Enum(EnumValue),
    String(Arc<str>),
    Resource(ResourceRef),
}

impl Variant {
    #[inline]
    pub const fn null() -> Self {
        Variant::Null
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    #[inline]
    pub fn string<S: AsRef<str>>(s: S) -> Self {
        Variant::String(Arc::<str>::from(s.as_ref()))
    }

    pub fn type_label(&self) -> &'static str {
        match self {
            Variant::Null => "null",
            Variant::Bool(_) => "bool",
            Variant::Number(n) if n.is_int() => "int",
            Variant::Number(_) => "float",
            Variant::Vector2(_) => "Vector2",
            Variant::Color(_) => "Color",
            Variant::Enum(e) => e.def.name,
            Variant::String(_) => "string",
            Variant::Resource(_) => "resource",
        }
    }
}

// -------------------- Accessors --------------------

impl Variant {
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Variant::Bool(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<Number> {
        match *self {
            Variant::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_vec2(&self) -> Option<Vector2> {
        match *self {
            Variant::Vector2(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_color(&self) -> Option<Color> {
        match *self {
            Variant::Color(c) => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub fn as_resource(&self) -> Option<&ResourceRef> {
        match self {
            Variant::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// The asset path carried by a resource-like value; `None` for unrelated values.
    pub fn resource_path(&self) -> Option<&str> {
        match self {
            Variant::Null => Some(""),
            Variant::Resource(r) => Some(&r.path),
            Variant::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Null => write!(f, "null"),
            Variant::Bool(v) => write!(f, "{v}"),
            Variant::Number(v) => write!(f, "{v}"),
            Variant::Vector2(v) => write!(f, "({},{})", v.x, v.y),
            Variant::Color(c) => write!(f, "({},{},{},{})", c.r, c.g, c.b, c.a),
            Variant::Enum(e) => write!(f, "{}", e.member_name()),
            Variant::String(s) => write!(f, "{s}"),
            Variant::Resource(r) => write!(f, "{}(\"{}\")", r.type_name, r.path),
        }
    }
}

// -------------------- From impls --------------------

impl From<bool> for Variant {
    #[inline]
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}
impl From<Number> for Variant {
    #[inline]
    fn from(v: Number) -> Self {
        Variant::Number(v)
    }
}
impl From<i32> for Variant {
    #[inline]
    fn from(v: i32) -> Self {
        Variant::Number(Number::I32(v))
    }
}
impl From<i64> for Variant {
    #[inline]
    fn from(v: i64) -> Self {
        Variant::Number(Number::I64(v))
    }
}
impl From<f32> for Variant {
    #[inline]
    fn from(v: f32) -> Self {
        Variant::Number(Number::F32(v))
    }
}
impl From<f64> for Variant {
    #[inline]
    fn from(v: f64) -> Self {
        Variant::Number(Number::F64(v))
    }
}
impl From<Vector2> for Variant {
    #[inline]
    fn from(v: Vector2) -> Self {
        Variant::Vector2(v)
    }
}
impl From<Color> for Variant {
    #[inline]
    fn from(v: Color) -> Self {
        Variant::Color(v)
    }
}
impl From<&str> for Variant {
    #[inline]
    fn from(v: &str) -> Self {
        Variant::String(Arc::<str>::from(v))
    }
}
impl From<String> for Variant {
    #[inline]
    fn from(v: String) -> Self {
        Variant::String(Arc::<str>::from(v))
    }
}
impl From<&String> for Variant {
    #[inline]
    fn from(v: &String) -> Self {
        Variant::String(Arc::<str>::from(v.as_str()))
    }
}
impl From<EnumValue> for Variant {
    #[inline]
    fn from(v: EnumValue) -> Self {
        Variant::Enum(v)
    }
}
impl From<ResourceRef> for Variant {
    #[inline]
    fn from(v: ResourceRef) -> Self {
        Variant::Resource(v)
    }
}
impl<T: Into<Variant>> From<Option<T>> for Variant {
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(Variant::Null, Into::into)
    }
}

// -------------------- FromVariant --------------------

/// Typed extraction used by property setters. Values reaching a setter have already been
/// coerced to the property's declared kind.
pub trait FromVariant: Sized {
    fn from_variant(v: &Variant) -> Result<Self, ValueError>;
}

fn mismatch(expected: &'static str, found: &Variant) -> ValueError {
    ValueError::KindMismatch {
        expected,
        found: found.type_label(),
    }
}

impl FromVariant for bool {
    fn from_variant(v: &Variant) -> Result<Self, ValueError> {
        v.as_bool().ok_or_else(|| mismatch("bool", v))
    }
}

impl FromVariant for i32 {
    fn from_variant(v: &Variant) -> Result<Self, ValueError> {
        match v.as_number() {
            Some(Number::I32(n)) => Ok(n),
            Some(Number::I64(n)) => i32::try_from(n).map_err(|_| mismatch("int", v)),
            _ => Err(mismatch("int", v)),
        }
    }
}

impl FromVariant for f32 {
    fn from_variant(v: &Variant) -> Result<Self, ValueError> {
        v.as_number()
            .map(|n| n.as_f64_lossy() as f32)
            .ok_or_else(|| mismatch("float", v))
    }
}

impl FromVariant for Vector2 {
    fn from_variant(v: &Variant) -> Result<Self, ValueError> {
        v.as_vec2().ok_or_else(|| mismatch("Vector2", v))
    }
}

impl FromVariant for Color {
    fn from_variant(v: &Variant) -> Result<Self, ValueError> {
        v.as_color().ok_or_else(|| mismatch("Color", v))
    }
}

impl FromVariant for String {
    fn from_variant(v: &Variant) -> Result<Self, ValueError> {
        v.as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("string", v))
    }
}

impl FromVariant for Option<ResourceRef> {
    fn from_variant(v: &Variant) -> Result<Self, ValueError> {
        match v {
            Variant::Null => Ok(None),
            Variant::Resource(r) if r.is_empty() => Ok(None),
            Variant::Resource(r) => Ok(Some(r.clone())),
            other => Err(mismatch("resource", other)),
        }
    }
}

/// Declares a property enumeration: the Rust enum (first member is the default), its
/// static [`EnumDef`] and the `Variant` conversions.
#[macro_export]
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $first:ident $(, $rest:ident)* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            #[default]
            $first,
            $( $rest, )*
        }

        impl $name {
            pub const DEF: &'static $crate::EnumDef = &$crate::EnumDef {
                name: stringify!($name),
                members: &[stringify!($first) $(, stringify!($rest))*],
            };

            pub const ALL: &'static [$name] = &[$name::$first $(, $name::$rest)*];

            pub const KIND: $crate::ValueKind = $crate::ValueKind::Enum(Self::DEF);

            pub fn index(self) -> usize {
                Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
            }
        }

        impl From<$name> for $crate::Variant {
            fn from(v: $name) -> Self {
                $crate::Variant::Enum($crate::EnumValue::new($name::DEF, v.index()))
            }
        }

        impl $crate::FromVariant for $name {
            fn from_variant(v: &$crate::Variant) -> Result<Self, $crate::ValueError> {
                let index = match v {
                    $crate::Variant::Enum(e) if e.def.name == $name::DEF.name => Some(e.index),
                    $crate::Variant::String(s) => $name::DEF.index_of(s),
                    other => {
                        return Err($crate::ValueError::KindMismatch {
                            expected: $name::DEF.name,
                            found: other.type_label(),
                        })
                    }
                };
                index
                    .and_then(|i| $name::ALL.get(i).copied())
                    .ok_or_else(|| $crate::ValueError::UnknownEnumMember {
                        enum_name: $name::DEF.name,
                        member: v.to_string(),
                    })
            }
        }
    };
}

// -------------------- JSON conversion --------------------

impl Variant {
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Variant::Null => JsonValue::Null,
            Variant::Bool(v) => JsonValue::Bool(*v),
            Variant::Number(v) => number_to_json_value(*v),
            Variant::Vector2(v) => {
                let mut map = JsonMap::new();
                map.insert("x".to_string(), float_to_json(v.x as f64));
                map.insert("y".to_string(), float_to_json(v.y as f64));
                JsonValue::Object(map)
            }
            Variant::Color(c) => {
                let mut map = JsonMap::new();
                map.insert("r".to_string(), JsonValue::Number(JsonNumber::from(c.r)));
                map.insert("g".to_string(), JsonValue::Number(JsonNumber::from(c.g)));
                map.insert("b".to_string(), JsonValue::Number(JsonNumber::from(c.b)));
                map.insert("a".to_string(), JsonValue::Number(JsonNumber::from(c.a)));
                JsonValue::Object(map)
            }
            Variant::Enum(e) => JsonValue::String(e.member_name().to_string()),
            Variant::String(v) => JsonValue::String(v.as_ref().to_string()),
            Variant::Resource(r) => {
                let mut map = JsonMap::new();
                map.insert(
                    "type".to_string(),
                    JsonValue::String(r.type_name.as_ref().to_string()),
                );
                map.insert(
                    "path".to_string(),
                    JsonValue::String(r.path.as_ref().to_string()),
                );
                JsonValue::Object(map)
            }
        }
    }
}

fn number_to_json_value(number: Number) -> JsonValue {
    match number {
        Number::I32(v) => JsonValue::Number(JsonNumber::from(v)),
        Number::I64(v) => JsonValue::Number(JsonNumber::from(v)),
        Number::F32(v) => float_to_json(v as f64),
        Number::F64(v) => float_to_json(v),
    }
}

fn float_to_json(value: f64) -> JsonValue {
    match JsonNumber::from_f64(value) {
        Some(v) => JsonValue::Number(v),
        None => JsonValue::Null,
    }
}
