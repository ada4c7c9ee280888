//! Slash-delimited property paths (`Theme/FillColor`) over live objects.

use kennel_variant::{Variant, coerce};

use crate::error::PathError;
use crate::property::{Accessor, Property};
use crate::reflect::Reflect;
use crate::registry::TypeRegistry;

pub const SEPARATOR: char = '/';

/// Where a path ended up.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedProperty<'r> {
    /// Type of the object that owns the final segment.
    pub owner_type: &'static str,
    pub property: &'r Property,
    /// More than one segment.
    pub nested: bool,
}

pub fn segments(path: &str) -> Result<Vec<&str>, PathError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    Ok(path.split(SEPARATOR).map(str::trim).collect())
}

fn unknown(type_name: &str, segment: &str) -> PathError {
    PathError::UnknownProperty {
        type_name: type_name.to_string(),
        segment: segment.to_string(),
    }
}

/// Follows every segment of `init` as a nested property.
pub(crate) fn walk<'a>(
    registry: &TypeRegistry,
    root: &'a dyn Reflect,
    init: &[&str],
) -> Result<&'a dyn Reflect, PathError> {
    let mut current = root;
    for segment in init {
        let (prop, any) = registry
            .locate(current, segment)
            .ok_or_else(|| unknown(current.type_name(), segment))?;
        current = match prop.access {
            Accessor::Nested { get, .. } => get(any).ok_or_else(|| PathError::NullIntermediate {
                segment: segment.to_string(),
            })?,
            Accessor::Leaf { .. } => {
                return Err(PathError::NotNested {
                    segment: segment.to_string(),
                });
            }
        };
    }
    Ok(current)
}

fn walk_mut<'a>(
    registry: &TypeRegistry,
    root: &'a mut dyn Reflect,
    init: &[&str],
) -> Result<&'a mut dyn Reflect, PathError> {
    let mut current = root;
    for segment in init {
        let type_name = current.type_name();
        let (prop, any) = registry
            .locate_mut(current, segment)
            .ok_or_else(|| unknown(type_name, segment))?;
        current = match prop.access {
            Accessor::Nested { get_mut, .. } => {
                get_mut(any).ok_or_else(|| PathError::NullIntermediate {
                    segment: segment.to_string(),
                })?
            }
            Accessor::Leaf { .. } => {
                return Err(PathError::NotNested {
                    segment: segment.to_string(),
                });
            }
        };
    }
    Ok(current)
}

/// Resolves `path` against a live object. Intermediates must be non-null.
pub fn resolve<'r>(
    registry: &'r TypeRegistry,
    root: &dyn Reflect,
    path: &str,
) -> Result<ResolvedProperty<'r>, PathError> {
    let segments = segments(path)?;
    let Some((last, init)) = segments.split_last() else {
        return Err(PathError::Empty);
    };

    let owner = walk(registry, root, init)?;
    let (property, _) = registry
        .locate(owner, last)
        .ok_or_else(|| unknown(owner.type_name(), last))?;

    Ok(ResolvedProperty {
        owner_type: owner.type_name(),
        property,
        nested: !init.is_empty(),
    })
}

/// Resolves `path` through declared types only, for when a live intermediate is null.
pub fn resolve_static<'r>(
    registry: &'r TypeRegistry,
    type_name: &str,
    path: &str,
) -> Result<ResolvedProperty<'r>, PathError> {
    let segments = segments(path)?;
    let Some((last, init)) = segments.split_last() else {
        return Err(PathError::Empty);
    };

    let mut current: &'static str = registry
        .get(type_name)
        .map(|desc| desc.name)
        .ok_or_else(|| unknown(type_name, segments[0]))?;

    for segment in init {
        let prop = registry
            .find_property(current, segment)
            .ok_or_else(|| unknown(current, segment))?;
        current = prop.nested_type().ok_or_else(|| PathError::NotNested {
            segment: segment.to_string(),
        })?;
    }

    let property = registry
        .find_property(current, last)
        .ok_or_else(|| unknown(current, last))?;

    Ok(ResolvedProperty {
        owner_type: current,
        property,
        nested: !init.is_empty(),
    })
}

/// Reads a leaf value. Broken paths and composites read as `None`.
pub fn get(registry: &TypeRegistry, root: &dyn Reflect, path: &str) -> Option<Variant> {
    let segments = segments(path).ok()?;
    let (last, init) = segments.split_last()?;
    let owner = walk(registry, root, init).ok()?;
    let (prop, any) = registry.locate(owner, last)?;
    match prop.access {
        Accessor::Leaf { get, .. } => get(any),
        Accessor::Nested { .. } => None,
    }
}

/// Writes a leaf value, coercing it to the property's declared kind.
///
/// A path that does not resolve is a no-op and returns `Ok(false)`; only a value that cannot
/// be converted is an error.
pub fn set(
    registry: &TypeRegistry,
    root: &mut dyn Reflect,
    path: &str,
    value: &Variant,
) -> Result<bool, kennel_variant::ValueError> {
    let segments = match segments(path) {
        Ok(segments) => segments,
        Err(err) => {
            log::debug!("set `{path}` skipped: {err}");
            return Ok(false);
        }
    };
    let Some((last, init)) = segments.split_last() else {
        return Ok(false);
    };

    let owner = match walk_mut(registry, root, init) {
        Ok(owner) => owner,
        Err(err) => {
            log::debug!("set `{path}` skipped: {err}");
            return Ok(false);
        }
    };

    let owner_type = owner.type_name();
    let Some((prop, any)) = registry.locate_mut(owner, last) else {
        log::debug!("set `{path}` skipped: `{owner_type}` has no property `{last}`");
        return Ok(false);
    };

    match (prop.access, prop.kind()) {
        (Accessor::Leaf { set, .. }, Some(kind)) => {
            let value = coerce(value, &kind)?;
            set(any, &value)?;
            Ok(true)
        }
        _ => {
            log::debug!("set `{path}` skipped: `{last}` is a composite");
            Ok(false)
        }
    }
}

/// Every inspector-visible leaf path of `root` with its current value, recursing into
/// non-null composites. Base type properties come first.
pub fn walk_leaves(registry: &TypeRegistry, root: &dyn Reflect) -> Vec<(String, Variant)> {
    let mut out = Vec::new();
    collect_leaves(registry, root, "", &mut out);
    out
}

fn collect_leaves(
    registry: &TypeRegistry,
    obj: &dyn Reflect,
    prefix: &str,
    out: &mut Vec<(String, Variant)>,
) {
    for (desc, any) in registry.upcast_levels(obj).into_iter().rev() {
        for prop in desc.properties.iter().filter(|p| !p.inspector_exclude) {
            let path = format!("{prefix}{}", prop.name);
            match prop.access {
                Accessor::Leaf { get, .. } => {
                    out.push((path, get(any).unwrap_or(Variant::Null)));
                }
                Accessor::Nested { get, .. } => {
                    if let Some(child) = get(any) {
                        collect_leaves(registry, child, &format!("{path}{SEPARATOR}"), out);
                    }
                }
            }
        }
    }
}

/// Drops a leading UI grouping segment (`Node2D/Position` → `Position`) when it names a type
/// in `type_name`'s inheritance chain rather than a property.
pub fn strip_group_prefix<'p>(registry: &TypeRegistry, type_name: &str, path: &'p str) -> &'p str {
    let Some((head, rest)) = path.split_once(SEPARATOR) else {
        return path;
    };
    if rest.is_empty() || registry.find_property(type_name, head).is_some() {
        return path;
    }
    if registry.is_a(type_name, head) {
        rest
    } else {
        path
    }
}
