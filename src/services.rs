use std::any::TypeId;
use std::fmt::{Debug, Formatter};

#[cfg(feature = "rc")]
/// A reference-counted pointer holding a constructed instance. The pointer
/// type is determined by the feature flags passed to this crate.
///
/// - **rc**: Pointer type is [`Rc<T>`](std::rc::Rc)
/// - **arc**: Pointer type is [`Arc<T>`](std::sync::Arc) (default)
pub type Svc<T> = std::rc::Rc<T>;

#[cfg(feature = "arc")]
/// A reference-counted pointer holding a constructed instance. The pointer
/// type is determined by the feature flags passed to this crate.
///
/// - **rc**: Pointer type is [`Rc<T>`](std::rc::Rc)
/// - **arc**: Pointer type is [`Arc<T>`](std::sync::Arc) (default)
pub type Svc<T> = std::sync::Arc<T>;

/// A service pointer holding an instance of `dyn Service`.
pub type DynSvc = Svc<dyn Service>;

/// A boxed error raised by a factory method or a registered constructor.
#[cfg(feature = "rc")]
pub type DynError = Box<dyn std::error::Error>;

/// A boxed error raised by a factory method or a registered constructor.
#[cfg(feature = "arc")]
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(feature = "rc")]
/// Implemented automatically on types that are capable of being held by the
/// container.
pub trait Service: downcast_rs::Downcast {}

#[cfg(feature = "rc")]
impl<T: ?Sized + downcast_rs::Downcast> Service for T {}

#[cfg(feature = "arc")]
/// Implemented automatically on types that are capable of being held by the
/// container.
pub trait Service: downcast_rs::DowncastSync {}

#[cfg(feature = "arc")]
impl<T: ?Sized + downcast_rs::DowncastSync> Service for T {}

#[cfg(feature = "arc")]
downcast_rs::impl_downcast!(sync Service);

#[cfg(feature = "rc")]
downcast_rs::impl_downcast!(Service);

/// Bound on values stored inside the container. With the "arc" feature this
/// additionally requires [`Send`] + [`Sync`] so instances and factory
/// closures can cross thread boundaries.
#[cfg(feature = "arc")]
pub trait Shareable: Send + Sync {}

#[cfg(feature = "arc")]
impl<T: ?Sized + Send + Sync> Shareable for T {}

/// Bound on values stored inside the container. With the "arc" feature this
/// additionally requires [`Send`] + [`Sync`] so instances and factory
/// closures can cross thread boundaries.
#[cfg(feature = "rc")]
pub trait Shareable {}

#[cfg(feature = "rc")]
impl<T: ?Sized> Shareable for T {}

/// Type information about a registered or constructed type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Creates a [`TypeInfo`] for the given type.
    #[must_use]
    pub fn of<T: ?Sized + std::any::Any>() -> Self {
        TypeInfo {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Gets the [`TypeId`] for this type.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Gets the fully-qualified name of this type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A constructed instance held by the container: a shared pointer to the
/// value, tagged with the runtime type it was created from.
///
/// Cloning an [`Instance`] clones the pointer, not the value. All clones
/// refer to the same underlying instance, which is what gives the container
/// its single-instance-per-identity guarantee.
#[derive(Clone)]
pub struct Instance {
    info: TypeInfo,
    value: DynSvc,
}

impl Instance {
    /// Wraps a value into a type-tagged shared pointer.
    pub fn new<T: Service>(value: T) -> Self {
        Instance {
            info: TypeInfo::of::<T>(),
            value: Svc::new(value),
        }
    }

    /// Wraps an already shared value without copying it.
    pub fn from_svc<T: Service>(value: Svc<T>) -> Self {
        Instance {
            info: TypeInfo::of::<T>(),
            value,
        }
    }

    /// The [`TypeInfo`] of the wrapped value.
    #[must_use]
    pub fn info(&self) -> TypeInfo {
        self.info
    }

    /// The runtime type name of the wrapped value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.info.name
    }

    /// Attempts to downcast the wrapped value to a concrete type. Returns
    /// [`None`] if the instance holds a different type.
    #[must_use]
    pub fn downcast<T: Service>(&self) -> Option<Svc<T>> {
        #[cfg(feature = "arc")]
        {
            self.value.clone().downcast_arc::<T>().ok()
        }
        #[cfg(feature = "rc")]
        {
            self.value.clone().downcast_rc::<T>().ok()
        }
    }

    /// Whether two instances point at the same underlying value.
    #[must_use]
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Svc::ptr_eq(&self.value, &other.value)
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instance").field(&self.info.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo(i32);

    #[test]
    fn downcast_returns_wrapped_value() {
        let instance = Instance::new(Foo(42));
        let foo = instance.downcast::<Foo>().unwrap();
        assert_eq!(42, foo.0);
    }

    #[test]
    fn downcast_to_wrong_type_fails() {
        let instance = Instance::new(Foo(42));
        assert!(instance.downcast::<String>().is_none());
    }

    #[test]
    fn clones_share_the_value() {
        let instance = Instance::new(Foo(1));
        let clone = instance.clone();
        assert!(instance.ptr_eq(&clone));
    }
}
