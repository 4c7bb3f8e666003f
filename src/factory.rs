use crate::{Container, DynError, Instance, Shareable, Value};
use std::collections::HashMap;

#[cfg(feature = "arc")]
type MethodHandler = Box<
    dyn Fn(&FactoryContext<'_>, &[Value]) -> Result<Value, DynError>
        + Send
        + Sync,
>;
#[cfg(feature = "rc")]
type MethodHandler =
    Box<dyn Fn(&FactoryContext<'_>, &[Value]) -> Result<Value, DynError>>;

/// A construction strategy: each factory populates a [`MethodTable`] with
/// named methods once, when the container is built. Method names follow the
/// resolution rules described on [`Container::get`]: a method named after a
/// regular type's short or long form overrides autowiring for that type,
/// while any other name defines a virtual type.
pub trait Factory {
    /// Populates this factory's method table. Called once per container
    /// construction.
    fn register(&self, methods: &mut MethodTable);
}

/// The declared shape of a factory method, checked against the call-site
/// argument count before the method is invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    required: usize,
    variadic: bool,
}

impl Signature {
    /// A method accepting exactly `count` arguments.
    #[must_use]
    pub fn exact(count: usize) -> Self {
        Signature {
            required: count,
            variadic: false,
        }
    }

    /// A method whose final parameter is variadic: any argument count at or
    /// above `fixed` is accepted.
    #[must_use]
    pub fn variadic(fixed: usize) -> Self {
        Signature {
            required: fixed,
            variadic: true,
        }
    }

    /// The declared fixed parameter count.
    #[must_use]
    pub fn required(&self) -> usize {
        self.required
    }

    /// Whether this signature accepts the given argument count.
    #[must_use]
    pub fn accepts(&self, count: usize) -> bool {
        if self.variadic {
            count >= self.required
        } else {
            count == self.required
        }
    }
}

pub(crate) struct FactoryMethod {
    pub(crate) signature: Signature,
    pub(crate) handler: MethodHandler,
}

/// The named methods a factory defines, with their signatures. Built once
/// per factory at container construction and never mutated afterwards.
#[derive(Default)]
pub struct MethodTable {
    methods: HashMap<String, FactoryMethod>,
}

impl MethodTable {
    pub(crate) fn new() -> Self {
        MethodTable::default()
    }

    /// Defines a method. The handler receives the factory context and the
    /// call-site arguments in order, and returns the raw construction
    /// result; the container checks the object post-condition afterwards.
    pub fn define<F>(
        &mut self,
        name: impl Into<String>,
        signature: Signature,
        handler: F,
    ) where
        F: Fn(&FactoryContext<'_>, &[Value]) -> Result<Value, DynError>
            + Shareable
            + 'static,
    {
        self.methods.insert(
            name.into(),
            FactoryMethod {
                signature,
                handler: Box::new(handler),
            },
        );
    }

    pub(crate) fn get(&self, name: &str) -> Option<&FactoryMethod> {
        self.methods.get(name)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
}

/// What a factory method sees while it runs: the owning container (for
/// recursive resolution) and the caller-supplied configuration.
pub struct FactoryContext<'a> {
    container: &'a Container,
}

impl<'a> FactoryContext<'a> {
    pub(crate) fn new(container: &'a Container) -> Self {
        FactoryContext { container }
    }

    /// The container this factory belongs to. Factory methods resolve their
    /// own dependencies through it so results are cached and the whole
    /// delegation chain applies.
    #[must_use]
    pub fn container(&self) -> &Container {
        self.container
    }

    /// The opaque configuration value the container was built with.
    #[must_use]
    pub fn configuration(&self) -> &Instance {
        self.container.configuration()
    }
}
