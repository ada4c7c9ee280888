use std::any::Any;
use std::fmt::Debug;

/// Object-safe view of a node payload or nested composite.
///
/// Property access goes through the registry's descriptor tables; this trait only
/// exposes the dynamic type name and the `Any` handles the accessors downcast from.
pub trait Reflect: Any + Debug {
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<'a> dyn Reflect + 'a {
    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

#[macro_export]
macro_rules! impl_reflect {
    ($ty:ident) => {
        impl $crate::Reflect for $ty {
            fn type_name(&self) -> &'static str { stringify!($ty) }
            fn as_any(&self) -> &dyn std::any::Any { self }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
        }
    };
}
