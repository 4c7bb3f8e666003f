use crate::{DynError, Factory, InjectResult, Instance, Service, TypeInfo};

/// A constructor parameter of a registered type, as reported by a
/// [`TypeIntrospector`].
#[derive(Clone, Debug)]
pub struct ParameterInfo {
    name: String,
    declared_type: Option<String>,
    scalar: bool,
}

impl ParameterInfo {
    /// A parameter whose declared type is a registered service type. This is
    /// the only parameter shape that autowiring accepts.
    #[must_use]
    pub fn service<T: ?Sized + std::any::Any>(name: impl Into<String>) -> Self {
        ParameterInfo {
            name: name.into(),
            declared_type: Some(TypeInfo::of::<T>().name().to_owned()),
            scalar: false,
        }
    }

    /// A parameter with a declared scalar type. Autowiring rejects it.
    #[must_use]
    pub fn scalar(
        name: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> Self {
        ParameterInfo {
            name: name.into(),
            declared_type: Some(declared_type.into()),
            scalar: true,
        }
    }

    /// A parameter without any declared type. Autowiring rejects it.
    #[must_use]
    pub fn untyped(name: impl Into<String>) -> Self {
        ParameterInfo {
            name: name.into(),
            declared_type: None,
            scalar: false,
        }
    }

    /// The parameter name, used in autowiring error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type name, if the parameter has one.
    #[must_use]
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Whether the parameter has a declared type at all.
    #[must_use]
    pub fn has_type(&self) -> bool {
        self.declared_type.is_some()
    }

    /// Whether the declared type is a scalar (non-object) type.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.scalar
    }
}

/// The host type-system capability the container consumes. It answers
/// existence and constructor-shape questions, and — since Rust has no
/// runtime construction — it also carries out the actual instantiation of
/// registered types and factories.
///
/// The crate ships [`TypeRegistry`](crate::TypeRegistry) as the standard
/// implementation, where applications self-describe their types at startup.
pub trait TypeIntrospector: Service {
    /// Whether a constructible type with this name is known.
    fn type_exists(&self, name: &str) -> bool;

    /// Whether an interface with this name is known.
    fn interface_exists(&self, name: &str) -> bool;

    /// The constructor parameters of a known type, in declaration order.
    fn constructor_parameters(
        &self,
        name: &str,
    ) -> InjectResult<Vec<ParameterInfo>>;

    /// Constructs an instance of a known type from already resolved
    /// dependencies, supplied positionally in declaration order.
    fn instantiate(
        &self,
        name: &str,
        dependencies: Vec<Instance>,
    ) -> Result<Instance, DynError>;

    /// Produces a fresh factory value for a factory identifier, or [`None`]
    /// if the identifier does not denote a factory.
    fn make_factory(&self, name: &str) -> Option<Box<dyn Factory>>;
}
