use std::any::Any;

use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;

use crate::error::NodeError;
use crate::library;
use crate::property::Property;
use crate::reflect::Reflect;

pub type Upcast = fn(&dyn Any) -> Option<&dyn Any>;
pub type UpcastMut = fn(&mut dyn Any) -> Option<&mut dyn Any>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeCategory {
    /// Can head a section and live in a forest.
    Node,
    /// Only reachable through a nested property.
    Composite,
}

/// Link from a type to the type it embeds as its `base` field.
#[derive(Clone, Copy, Debug)]
pub struct BaseLink {
    pub name: &'static str,
    pub upcast: Upcast,
    pub upcast_mut: UpcastMut,
}

/// `base_link!(Sprite, Node2D)` for a type whose `base` field holds its parent type.
#[macro_export]
macro_rules! base_link {
    ($owner:ident, $base:ident) => {
        $crate::BaseLink {
            name: stringify!($base),
            upcast: |any| {
                any.downcast_ref::<$owner>()
                    .map(|o| &o.base as &dyn std::any::Any)
            },
            upcast_mut: |any| {
                any.downcast_mut::<$owner>()
                    .map(|o| &mut o.base as &mut dyn std::any::Any)
            },
        }
    };
}

fn construct<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub category: TypeCategory,
    pub base: Option<BaseLink>,
    pub construct: fn() -> Box<dyn Reflect>,
    /// Properties declared by this type only; inherited ones live on the base descriptors.
    pub properties: Vec<Property>,
}

impl TypeDescriptor {
    pub fn new<T: Reflect + Default>(name: &'static str, category: TypeCategory) -> Self {
        Self {
            name,
            category,
            base: None,
            construct: construct::<T>,
            properties: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: BaseLink) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.properties.extend(properties);
        self
    }

    #[inline]
    pub fn own_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    #[inline]
    pub fn is_node(&self) -> bool {
        self.category == TypeCategory::Node
    }
}

/// Descriptor tables for every known node and composite type.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: FxHashMap<&'static str, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in node library.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        library::register_builtins(&mut reg);
        reg
    }

    // ---------------------------------------------------
    // Registration
    // ---------------------------------------------------

    pub fn register(&mut self, desc: TypeDescriptor) {
        if self.types.contains_key(desc.name) {
            log::debug!("Replacing registered type {}", desc.name);
        }
        self.types.insert(desc.name, desc);
    }

    // ---------------------------------------------------
    // Type lookups
    // ---------------------------------------------------

    #[inline]
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn resolve(&self, name: &str) -> Result<&TypeDescriptor, NodeError> {
        self.types
            .get(name)
            .ok_or_else(|| NodeError::UnknownType(name.to_string()))
    }

    /// Fresh zero-argument construction. The instance belongs to no forest.
    #[inline]
    pub fn create_default_instance(&self, desc: &TypeDescriptor) -> Box<dyn Reflect> {
        (desc.construct)()
    }

    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Reflect>, NodeError> {
        let desc = self.resolve(name)?;
        Ok(self.create_default_instance(desc))
    }

    /// `name` followed by each of its bases, nearest first.
    pub fn base_chain(&self, name: &str) -> Vec<&'static str> {
        let mut chain = Vec::new();
        let mut current = self.types.get(name);
        while let Some(desc) = current {
            // Guard against a malformed self-referencing table
            if chain.contains(&desc.name) {
                break;
            }
            chain.push(desc.name);
            current = desc.base.and_then(|b| self.types.get(b.name));
        }
        chain
    }

    pub fn is_a(&self, name: &str, ancestor: &str) -> bool {
        self.base_chain(name).contains(&ancestor)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    // ---------------------------------------------------
    // Property lookups
    // ---------------------------------------------------

    /// Declared property `field` of `type_name`, walking the base chain.
    pub fn find_property(&self, type_name: &str, field: &str) -> Option<&Property> {
        self.base_chain(type_name)
            .into_iter()
            .filter_map(|name| self.types.get(name))
            .find_map(|desc| desc.own_property(field))
    }

    /// Every property of `type_name`, base types first, in declaration order.
    pub fn properties_of(&self, type_name: &str) -> Vec<&Property> {
        self.base_chain(type_name)
            .into_iter()
            .rev()
            .filter_map(|name| self.types.get(name))
            .flat_map(|desc| desc.properties.iter())
            .collect()
    }

    /// Finds `field` on a live object and upcasts the object to the declaring type so the
    /// property's accessors can downcast it.
    pub fn locate<'a>(
        &self,
        obj: &'a dyn Reflect,
        field: &str,
    ) -> Option<(&Property, &'a dyn Any)> {
        let mut desc = self.types.get(obj.type_name())?;
        let mut any = obj.as_any();
        loop {
            if let Some(prop) = desc.own_property(field) {
                return Some((prop, any));
            }
            let base = desc.base?;
            any = (base.upcast)(any)?;
            desc = self.types.get(base.name)?;
        }
    }

    pub fn locate_mut<'a>(
        &self,
        obj: &'a mut dyn Reflect,
        field: &str,
    ) -> Option<(&Property, &'a mut dyn Any)> {
        let mut desc = self.types.get(obj.type_name())?;
        let mut any = obj.as_any_mut();
        loop {
            if let Some(prop) = desc.own_property(field) {
                return Some((prop, any));
            }
            let base = desc.base?;
            any = (base.upcast_mut)(any)?;
            desc = self.types.get(base.name)?;
        }
    }

    /// The object viewed as each type of its chain, nearest first.
    pub fn upcast_levels<'a>(
        &self,
        obj: &'a dyn Reflect,
    ) -> Vec<(&TypeDescriptor, &'a dyn Any)> {
        let mut levels: Vec<(&TypeDescriptor, &'a dyn Any)> = Vec::new();
        let mut desc = self.types.get(obj.type_name());
        let mut any = Some(obj.as_any());
        while let (Some(d), Some(a)) = (desc, any) {
            if levels.iter().any(|(seen, _)| seen.name == d.name) {
                break;
            }
            levels.push((d, a));
            match d.base {
                Some(base) => {
                    any = (base.upcast)(a);
                    desc = self.types.get(base.name);
                }
                None => break,
            }
        }
        levels
    }
}

// ---------------------------------------------------
// Process-wide registry
// ---------------------------------------------------

static REGISTRY: OnceCell<TypeRegistry> = OnceCell::new();

/// Installs the process-wide registry. Fails (handing the registry back) once one is set.
pub fn install_registry(registry: TypeRegistry) -> Result<(), TypeRegistry> {
    REGISTRY.set(registry)
}

/// The installed registry, or the built-in library when none was installed.
pub fn registry() -> &'static TypeRegistry {
    REGISTRY.get_or_init(TypeRegistry::with_builtins)
}
