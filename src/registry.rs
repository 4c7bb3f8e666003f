use crate::{
    DynError, Factory, InjectError, InjectResult, Instance, ParameterInfo,
    Service, Shareable, Svc, TypeInfo, TypeIntrospector,
};
use std::collections::{HashMap, HashSet};

#[cfg(feature = "arc")]
type ConstructFn =
    Box<dyn Fn(Vec<Instance>) -> Result<Instance, DynError> + Send + Sync>;
#[cfg(feature = "rc")]
type ConstructFn = Box<dyn Fn(Vec<Instance>) -> Result<Instance, DynError>>;

#[cfg(feature = "arc")]
type FactoryFn = Box<dyn Fn() -> Box<dyn Factory> + Send + Sync>;
#[cfg(feature = "rc")]
type FactoryFn = Box<dyn Fn() -> Box<dyn Factory>>;

struct TypeEntry {
    parameters: Vec<ParameterInfo>,
    construct: Option<ConstructFn>,
}

/// The standard [`TypeIntrospector`]: a registry where applications describe
/// their types, interfaces and factories once at startup.
///
/// Types are keyed by their fully-qualified Rust type name
/// ([`TypeInfo::name`]), so a registered type can be requested from the
/// container with `TypeInfo::of::<T>().name()`.
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeEntry>,
    interfaces: HashSet<String>,
    factories: HashMap<String, FactoryFn>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// Registers a type with its constructor parameters and a constructor
    /// closure. The closure receives the resolved dependencies positionally,
    /// in the declared parameter order.
    pub fn register<T, F>(&mut self, parameters: Vec<ParameterInfo>, construct: F)
    where
        T: Service,
        F: Fn(Vec<Instance>) -> Result<Instance, DynError>
            + Shareable
            + 'static,
    {
        self.types.insert(
            TypeInfo::of::<T>().name().to_owned(),
            TypeEntry {
                parameters,
                construct: Some(Box::new(construct)),
            },
        );
    }

    /// Registers a type with no constructor parameters, built via
    /// [`Default`]. Covers the "no constructor / zero parameters" case.
    pub fn register_default<T>(&mut self)
    where
        T: Service + Default,
    {
        self.register::<T, _>(Vec::new(), |_| Ok(Instance::new(T::default())));
    }

    /// Declares a type without a constructor. The type exists for existence
    /// checks and override-method dispatch, but cannot be autowired; it is
    /// meant for types built exclusively by factory override methods.
    pub fn declare<T: Service>(&mut self, parameters: Vec<ParameterInfo>) {
        self.types.insert(
            TypeInfo::of::<T>().name().to_owned(),
            TypeEntry {
                parameters,
                construct: None,
            },
        );
    }

    /// Registers an interface. Interfaces satisfy existence checks but are
    /// rejected by autowiring; an override method named after the interface
    /// chooses the concrete implementation.
    pub fn register_interface<T: ?Sized + std::any::Any>(&mut self) {
        self.interfaces
            .insert(TypeInfo::of::<T>().name().to_owned());
    }

    /// Registers a factory under its type name. The closure is invoked once
    /// per container construction that lists this factory.
    pub fn register_factory<F, M>(&mut self, make: M)
    where
        F: Factory + 'static,
        M: Fn() -> F + Shareable + 'static,
    {
        self.factories.insert(
            TypeInfo::of::<F>().name().to_owned(),
            Box::new(move || Box::new(make())),
        );
    }
}

impl TypeIntrospector for TypeRegistry {
    fn type_exists(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    fn interface_exists(&self, name: &str) -> bool {
        self.interfaces.contains(name)
    }

    fn constructor_parameters(
        &self,
        name: &str,
    ) -> InjectResult<Vec<ParameterInfo>> {
        if let Some(entry) = self.types.get(name) {
            return Ok(entry.parameters.clone());
        }

        if self.interfaces.contains(name) {
            return Err(InjectError::AutoWire {
                type_name: name.to_owned(),
                reason: crate::AutoWireReason::Interface,
            });
        }

        Err(InjectError::UnknownType {
            name: name.to_owned(),
        })
    }

    fn instantiate(
        &self,
        name: &str,
        dependencies: Vec<Instance>,
    ) -> Result<Instance, DynError> {
        let entry = self
            .types
            .get(name)
            .ok_or_else(|| DynError::from(format!("{name} is not registered")))?;

        let construct = entry.construct.as_ref().ok_or_else(|| {
            DynError::from(format!("{name} has no registered constructor"))
        })?;

        construct(dependencies)
    }

    fn make_factory(&self, name: &str) -> Option<Box<dyn Factory>> {
        self.factories.get(name).map(|make| make())
    }
}

/// Downcasts the dependency at `index` for use inside a constructor
/// closure.
pub fn dependency<T: Service>(
    dependencies: &[Instance],
    index: usize,
) -> Result<Svc<T>, DynError> {
    let instance = dependencies.get(index).ok_or_else(|| {
        DynError::from(format!("missing dependency at index {index}"))
    })?;

    instance.downcast::<T>().ok_or_else(|| {
        DynError::from(format!(
            "dependency at index {index} is a {}, expected {}",
            instance.type_name(),
            TypeInfo::of::<T>().name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AutoWireReason;

    #[derive(Default)]
    struct Leaf;

    #[test]
    fn registered_types_exist() {
        let mut registry = TypeRegistry::new();
        registry.register_default::<Leaf>();

        let name = TypeInfo::of::<Leaf>().name();
        assert!(registry.type_exists(name));
        assert!(!registry.interface_exists(name));
    }

    #[test]
    fn unknown_names_report_unknown_type() {
        let registry = TypeRegistry::new();
        match registry.constructor_parameters("ghost") {
            Err(InjectError::UnknownType { name }) => assert_eq!("ghost", name),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn interfaces_are_rejected_by_autowiring() {
        trait Storage {}

        let mut registry = TypeRegistry::new();
        registry.register_interface::<dyn Storage>();

        let name = TypeInfo::of::<dyn Storage>().name();
        assert!(registry.interface_exists(name));
        match registry.constructor_parameters(name) {
            Err(InjectError::AutoWire { reason, .. }) => {
                assert_eq!(AutoWireReason::Interface, reason);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn declared_types_cannot_be_instantiated() {
        struct OverrideOnly;

        let mut registry = TypeRegistry::new();
        registry.declare::<OverrideOnly>(Vec::new());

        let name = TypeInfo::of::<OverrideOnly>().name();
        assert!(registry.type_exists(name));
        assert!(registry.instantiate(name, Vec::new()).is_err());
    }

    #[test]
    fn dependency_downcasts_by_position() {
        let deps = vec![Instance::new(Leaf), Instance::new(String::from("x"))];

        assert!(dependency::<Leaf>(&deps, 0).is_ok());
        assert!(dependency::<String>(&deps, 1).is_ok());
        assert!(dependency::<Leaf>(&deps, 1).is_err());
        assert!(dependency::<Leaf>(&deps, 2).is_err());
    }
}
