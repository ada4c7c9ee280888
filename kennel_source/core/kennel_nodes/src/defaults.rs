//! Default values used when diffing a node against its type.

use kennel_variant::Variant;

use crate::path::{resolve_static, segments, walk};
use crate::property::Accessor;
use crate::reflect::Reflect;
use crate::registry::TypeRegistry;

/// Ways of answering "what is the default of this path", tried in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultStrategy {
    /// Fresh instance of the type that declares the final segment. For nested paths this is
    /// the live intermediate's type, not the root's.
    DeclaringType,
    /// Zero value of the statically declared kind.
    PrimitiveTable,
    Null,
}

pub const STRATEGIES: [DefaultStrategy; 3] = [
    DefaultStrategy::DeclaringType,
    DefaultStrategy::PrimitiveTable,
    DefaultStrategy::Null,
];

impl DefaultStrategy {
    fn attempt(self, registry: &TypeRegistry, node: &dyn Reflect, path: &str) -> Option<Variant> {
        match self {
            DefaultStrategy::DeclaringType => {
                let segments = segments(path).ok()?;
                let (last, init) = segments.split_last()?;
                let owner = walk(registry, node, init).ok()?;
                let desc = registry.get(owner.type_name())?;
                let fresh = registry.create_default_instance(desc);
                let (prop, any) = registry.locate(&*fresh, last)?;
                match prop.access {
                    Accessor::Leaf { get, .. } => get(any),
                    Accessor::Nested { .. } => None,
                }
            }
            DefaultStrategy::PrimitiveTable => resolve_static(registry, node.type_name(), path)
                .ok()?
                .property
                .kind()
                .map(|kind| kind.zero()),
            DefaultStrategy::Null => Some(Variant::Null),
        }
    }
}

/// Default value of `path` on `node`. Never fails; falls back to `Variant::Null`.
pub fn default_of(registry: &TypeRegistry, node: &dyn Reflect, path: &str) -> Variant {
    default_with_strategy(registry, node, path).0
}

/// Like [`default_of`], also reporting which strategy answered.
pub fn default_with_strategy(
    registry: &TypeRegistry,
    node: &dyn Reflect,
    path: &str,
) -> (Variant, DefaultStrategy) {
    for strategy in STRATEGIES {
        if let Some(value) = strategy.attempt(registry, node, path) {
            log::trace!("default of {}::{path} from {strategy:?}: {value}", node.type_name());
            return (value, strategy);
        }
    }
    (Variant::Null, DefaultStrategy::Null)
}
