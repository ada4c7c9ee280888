//! Literal grammar used by scene documents.
//!
//! `true|false`, decimal numbers, `(x,y)`, `(r,g,b,a)`, bare enum member names, bare strings
//! and `TypeName("path")` resource references.

use kennel_structs::{Color, Vector2};

use crate::error::{Result, ValueError};
use crate::variant::{EnumValue, Number, ResourceRef, ValueKind, Variant};

/// Largest integer magnitude an `f32` holds exactly.
const F32_EXACT_INT: i64 = 1 << 24;

/// Converts a value to its literal form. `Ok(None)` means "no key": the value is `Null` or an
/// empty resource reference.
pub fn stringify(value: &Variant, kind: &ValueKind) -> Result<Option<String>> {
    let value = coerce(value, kind)?;
    let text = match (&value, kind) {
        (Variant::Null, _) => return Ok(None),
        (Variant::Bool(b), _) => b.to_string(),
        (Variant::Number(n), ValueKind::Int) => n.to_string(),
        (Variant::Number(n), _) => format_float(n.as_f64_lossy() as f32),
        (Variant::Vector2(v), _) => format!("({},{})", format_float(v.x), format_float(v.y)),
        (Variant::Color(c), _) => format!("({},{},{},{})", c.r, c.g, c.b, c.a),
        (Variant::Enum(e), _) => e.member_name().to_string(),
        (Variant::String(s), _) => s.to_string(),
        (Variant::Resource(r), ValueKind::Resource(ty)) => {
            if r.is_empty() {
                return Ok(None);
            }
            format!("{ty}(\"{}\")", r.path)
        }
        (Variant::Resource(_), _) => {
            return Err(ValueError::KindMismatch {
                expected: kind.name(),
                found: "resource",
            });
        }
    };
    Ok(Some(text))
}

/// Parses a literal as the declared kind.
pub fn parse(literal: &str, kind: &ValueKind) -> Result<Variant> {
    let text = literal.trim();
    match kind {
        ValueKind::Bool => {
            if text.eq_ignore_ascii_case("true") {
                Ok(Variant::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(Variant::Bool(false))
            } else {
                Err(parse_error(kind, literal))
            }
        }
        ValueKind::Int => parse_int(text)
            .map(|v| Variant::Number(Number::I32(v)))
            .ok_or_else(|| parse_error(kind, literal)),
        ValueKind::Float => parse_float(text)
            .map(|v| Variant::Number(Number::F32(v)))
            .ok_or_else(|| parse_error(kind, literal)),
        ValueKind::Vector2 => {
            let parts = tuple_parts(text).ok_or_else(|| parse_error(kind, literal))?;
            match parts.as_slice() {
                [x, y] => {
                    let x = parse_float(x).ok_or_else(|| parse_error(kind, literal))?;
                    let y = parse_float(y).ok_or_else(|| parse_error(kind, literal))?;
                    Ok(Variant::Vector2(Vector2::new(x, y)))
                }
                _ => Err(parse_error(kind, literal)),
            }
        }
        ValueKind::Color => {
            let parts = tuple_parts(text).ok_or_else(|| parse_error(kind, literal))?;
            let mut rgba = [0u8; 4];
            if parts.len() != rgba.len() {
                return Err(parse_error(kind, literal));
            }
            for (slot, part) in rgba.iter_mut().zip(parts) {
                *slot = part.parse::<u8>().map_err(|_| parse_error(kind, literal))?;
            }
            let [r, g, b, a] = rgba;
            Ok(Variant::Color(Color::new(r, g, b, a)))
        }
        ValueKind::Enum(def) => def
            .index_of(text)
            .map(|index| Variant::Enum(EnumValue::new(*def, index)))
            .ok_or_else(|| ValueError::UnknownEnumMember {
                enum_name: def.name,
                member: text.to_string(),
            }),
        ValueKind::String => Ok(Variant::string(literal)),
        ValueKind::Resource(ty) => {
            let path = resource_path(text, ty);
            if path.is_empty() {
                Ok(Variant::Null)
            } else {
                Ok(Variant::Resource(ResourceRef::new(ty, path)))
            }
        }
    }
}

/// Converts a value into the representation of `kind`, parsing strings and widening or
/// narrowing numbers when that loses nothing.
pub fn coerce(value: &Variant, kind: &ValueKind) -> Result<Variant> {
    let mismatch = || ValueError::KindMismatch {
        expected: kind.name(),
        found: value.type_label(),
    };

    match (value, kind) {
        (Variant::Null, _) => Ok(Variant::Null),
        (Variant::String(s), ValueKind::String) => Ok(Variant::String(s.clone())),
        (Variant::String(s), ValueKind::Resource(ty)) => {
            let path = resource_path(s.trim(), ty);
            if path.is_empty() {
                Ok(Variant::Null)
            } else {
                Ok(Variant::Resource(ResourceRef::new(ty, path)))
            }
        }
        (Variant::String(s), _) => parse(s, kind),

        (Variant::Bool(b), ValueKind::Bool) => Ok(Variant::Bool(*b)),

        (Variant::Number(n), ValueKind::Int) => match *n {
            Number::I32(v) => Ok(Variant::Number(Number::I32(v))),
            Number::I64(v) => i32::try_from(v)
                .map(|v| Variant::Number(Number::I32(v)))
                .map_err(|_| mismatch()),
            Number::F32(_) | Number::F64(_) => {
                let f = n.as_f64_lossy();
                if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
                    Ok(Variant::Number(Number::I32(f as i32)))
                } else {
                    Err(mismatch())
                }
            }
        },
        (Variant::Number(n), ValueKind::Float) => match *n {
            Number::F32(v) => Ok(Variant::Number(Number::F32(v))),
            Number::F64(v) => Ok(Variant::Number(Number::F32(v as f32))),
            Number::I32(_) | Number::I64(_) => {
                let i = n.as_i64_lossy().unwrap_or_default();
                if i.abs() <= F32_EXACT_INT {
                    Ok(Variant::Number(Number::F32(i as f32)))
                } else {
                    Err(mismatch())
                }
            }
        },

        (Variant::Vector2(v), ValueKind::Vector2) => Ok(Variant::Vector2(*v)),
        (Variant::Color(c), ValueKind::Color) => Ok(Variant::Color(*c)),

        (Variant::Enum(e), ValueKind::Enum(def)) if e.def.name == def.name => {
            Ok(Variant::Enum(EnumValue::new(*def, e.index)))
        }

        (Variant::Resource(r), ValueKind::Resource(ty)) => {
            if r.is_empty() {
                Ok(Variant::Null)
            } else {
                Ok(Variant::Resource(ResourceRef::new(ty, &*r.path)))
            }
        }

        _ => Err(mismatch()),
    }
}

/// Equality used when diffing against defaults.
pub fn values_equal(a: &Variant, b: &Variant) -> bool {
    match (a, b) {
        (Variant::Number(x), Variant::Number(y)) => x.as_f64_lossy() == y.as_f64_lossy(),
        (Variant::Vector2(x), Variant::Vector2(y)) => x.same_as(y),
        (Variant::Color(x), Variant::Color(y)) => x == y,
        (Variant::Resource(x), Variant::Resource(y)) => x.path == y.path,
        (Variant::Null, Variant::Resource(r)) | (Variant::Resource(r), Variant::Null) => {
            r.is_empty()
        }
        (Variant::Enum(e), Variant::String(s)) | (Variant::String(s), Variant::Enum(e)) => {
            e.member_name() == &**s
        }
        _ => a == b,
    }
}

/// Float text: shortest round-trip form, `-0` normalized to `0`.
fn format_float(v: f32) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    v.to_string()
}

fn parse_int(text: &str) -> Option<i32> {
    if let Ok(v) = text.parse::<i32>() {
        return Some(v);
    }
    let f = text.parse::<f64>().ok()?;
    (f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64)
        .then_some(f as i32)
}

fn parse_float(text: &str) -> Option<f32> {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
}

/// `( a , b , ... )` → trimmed parts. `None` when the parentheses are missing.
fn tuple_parts(text: &str) -> Option<Vec<&str>> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

/// Extracts the asset path from `Type("path")`, `"path"` or a bare path.
fn resource_path<'a>(text: &'a str, declared: &str) -> &'a str {
    if let Some(open) = text.find("(\"") {
        let prefix = &text[..open];
        if is_identifier(prefix) {
            if let Some(path) = text[open + 2..].strip_suffix("\")") {
                if prefix != declared {
                    log::debug!("resource literal typed `{prefix}` read as `{declared}`: {text}");
                }
                return path;
            }
        }
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return &text[1..text.len() - 1];
    }
    text
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_error(kind: &ValueKind, literal: &str) -> ValueError {
    ValueError::Parse {
        kind: kind.name(),
        literal: literal.to_string(),
    }
}
