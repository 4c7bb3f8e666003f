use crate::chain::{FactoryChain, FactorySlot};
use crate::{
    InjectError, InjectResult, Instance, MethodTable, Svc, TypeDescriptor,
    TypeIntrospector, Value,
};
use std::collections::HashMap;
use tracing::{debug, trace};

/// The facade and instance cache: resolves type descriptors through its
/// factory chain and guarantees exactly one instance per distinct
/// (name, arguments) identity for its entire lifetime.
///
/// # Resolution
///
/// A requested name that the introspector knows (a *regular* type) is built
/// by the first factory in the chain defining an override method matching
/// the name's short or long form, or autowired from its constructor
/// parameters if no factory overrides it. Any other name is a *virtual*
/// type, built by the factory method with exactly that name. Constructor
/// dependencies are resolved recursively through the container itself, so
/// they are cached and may be satisfied by any factory in the chain.
///
/// # Concurrency
///
/// Resolution is synchronous and recursive. Under the "arc" feature the
/// cache itself is lock-protected, but two unsynchronized concurrent `get`
/// calls for the same uncached key may both construct; the last insert wins
/// and both results are construction-equivalent. Dependency cycles are not
/// detected and recurse until the stack is exhausted.
pub struct Container {
    configuration: Instance,
    types: Svc<dyn TypeIntrospector>,
    chain: FactoryChain,
    #[cfg(feature = "arc")]
    instances: std::sync::RwLock<HashMap<String, Instance>>,
    #[cfg(feature = "rc")]
    instances: std::cell::RefCell<HashMap<String, Instance>>,
}

impl Container {
    /// Builds a container from an opaque configuration value, a type
    /// introspector, and an ordered, non-empty list of factory identifiers.
    ///
    /// Factories are linked into a delegation chain in the order given; the
    /// first identifier becomes the chain head. Construction either fully
    /// succeeds or fails atomically:
    ///
    /// - [`InjectError::NoFactoriesProvided`] if the list is empty,
    /// - [`InjectError::UnknownFactory`] if an identifier denotes nothing,
    /// - [`InjectError::InvalidFactory`] if an identifier denotes a known
    ///   type or interface that is not a factory.
    pub fn new(
        configuration: Instance,
        types: Svc<dyn TypeIntrospector>,
        factories: &[&str],
    ) -> InjectResult<Self> {
        if factories.is_empty() {
            return Err(InjectError::NoFactoriesProvided);
        }

        let mut slots = Vec::with_capacity(factories.len());
        for name in factories {
            let Some(factory) = types.make_factory(name) else {
                if types.type_exists(name) || types.interface_exists(name) {
                    return Err(InjectError::InvalidFactory {
                        name: (*name).to_owned(),
                    });
                }
                return Err(InjectError::UnknownFactory {
                    name: (*name).to_owned(),
                });
            };

            let mut methods = MethodTable::new();
            factory.register(&mut methods);
            slots.push(FactorySlot::new(*name, methods));
        }

        debug!("container ready with {} factories", slots.len());

        Ok(Container {
            configuration,
            types,
            chain: FactoryChain::new(slots),
            #[cfg(feature = "arc")]
            instances: std::sync::RwLock::default(),
            #[cfg(feature = "rc")]
            instances: std::cell::RefCell::default(),
        })
    }

    /// Resolves a descriptor, returning the cached instance when one exists
    /// for its identity and constructing (and caching) it otherwise.
    ///
    /// Two calls with equivalent descriptors return the *same* instance,
    /// for both regular and virtual types. Nothing is cached on failure.
    pub fn get(
        &self,
        descriptor: impl Into<TypeDescriptor>,
    ) -> InjectResult<Instance> {
        let descriptor = descriptor.into();
        let key = descriptor.cache_key();

        if let Some(instance) = self.lookup(&key) {
            trace!("cache hit for {}", descriptor.name());
            return Ok(instance);
        }

        debug!("creating {}", descriptor.name());
        let instance = self.chain.create(self, &descriptor)?;
        self.store(key, instance.clone());

        Ok(instance)
    }

    /// Resolves a name with call-site arguments, in order.
    pub fn get_with(
        &self,
        name: &str,
        arguments: Vec<Value>,
    ) -> InjectResult<Instance> {
        self.get(TypeDescriptor::with_arguments(name, arguments))
    }

    /// Whether an instance is already cached for the descriptor's identity.
    #[must_use]
    pub fn has(&self, descriptor: &TypeDescriptor) -> bool {
        let key = descriptor.cache_key();
        self.lookup(&key).is_some()
    }

    /// The opaque configuration value this container was built with. The
    /// core never inspects it; it is handed unchanged to factory methods.
    #[must_use]
    pub fn configuration(&self) -> &Instance {
        &self.configuration
    }

    pub(crate) fn types(&self) -> &dyn TypeIntrospector {
        self.types.as_ref()
    }

    fn lookup(&self, key: &str) -> Option<Instance> {
        #[cfg(feature = "arc")]
        {
            self.instances.read().unwrap().get(key).cloned()
        }
        #[cfg(feature = "rc")]
        {
            self.instances.borrow().get(key).cloned()
        }
    }

    fn store(&self, key: String, instance: Instance) {
        #[cfg(feature = "arc")]
        {
            self.instances.write().unwrap().insert(key, instance);
        }
        #[cfg(feature = "rc")]
        {
            self.instances.borrow_mut().insert(key, instance);
        }
    }
}
