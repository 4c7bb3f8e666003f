use crate::factory::FactoryMethod;
use crate::{
    AutoWireReason, Container, FactoryContext, InjectError, InjectResult,
    Instance, MethodTable, TypeDescriptor, Value,
};
use tracing::{debug, trace};

pub(crate) struct FactorySlot {
    name: String,
    methods: MethodTable,
}

impl FactorySlot {
    pub(crate) fn new(name: impl Into<String>, methods: MethodTable) -> Self {
        FactorySlot {
            name: name.into(),
            methods,
        }
    }

    /// Whether this slot, ignoring the rest of the chain, defines a method
    /// for the descriptor.
    fn can_create(
        &self,
        container: &Container,
        descriptor: &TypeDescriptor,
    ) -> bool {
        let types = container.types();
        match descriptor.override_method_names(types) {
            None => self.methods.contains(descriptor.name()),
            Some((short, long)) => {
                self.methods.contains(&short) || self.methods.contains(&long)
            }
        }
    }
}

/// The delegation chain: an ordered, immutable sequence of factory slots
/// consulted front to back until one can handle a descriptor. The last slot
/// falls back to autowiring for regular types.
pub(crate) struct FactoryChain {
    slots: Vec<FactorySlot>,
}

impl FactoryChain {
    pub(crate) fn new(slots: Vec<FactorySlot>) -> Self {
        FactoryChain { slots }
    }

    pub(crate) fn create(
        &self,
        container: &Container,
        descriptor: &TypeDescriptor,
    ) -> InjectResult<Instance> {
        self.create_from(0, container, descriptor)
    }

    fn create_from(
        &self,
        index: usize,
        container: &Container,
        descriptor: &TypeDescriptor,
    ) -> InjectResult<Instance> {
        let slot = &self.slots[index];

        if !slot.can_create(container, descriptor) && index + 1 < self.slots.len()
        {
            trace!(
                "factory {} cannot create {}, delegating to {}",
                slot.name,
                descriptor.name(),
                self.slots[index + 1].name
            );
            return self.create_from(index + 1, container, descriptor);
        }

        let result = if descriptor.is_virtual(container.types()) {
            self.handle_virtual(slot, container, descriptor)?
        } else {
            self.ensure_type_exists(container, descriptor)?;
            self.handle_regular(slot, container, descriptor)?
        };

        match result {
            Value::Object(instance) => Ok(instance),
            other => Err(InjectError::InvalidResult {
                method: descriptor.name().to_owned(),
                kind: other.kind(),
            }),
        }
    }

    fn ensure_type_exists(
        &self,
        container: &Container,
        descriptor: &TypeDescriptor,
    ) -> InjectResult<()> {
        let types = container.types();
        if types.type_exists(descriptor.name())
            || types.interface_exists(descriptor.name())
        {
            Ok(())
        } else {
            Err(InjectError::UnknownType {
                name: descriptor.name().to_owned(),
            })
        }
    }

    fn handle_regular(
        &self,
        slot: &FactorySlot,
        container: &Container,
        descriptor: &TypeDescriptor,
    ) -> InjectResult<Value> {
        // Regular types always have both candidate names at this point.
        let Some((short, long)) =
            descriptor.override_method_names(container.types())
        else {
            return Err(InjectError::UnknownType {
                name: descriptor.name().to_owned(),
            });
        };

        if let Some(method) = slot.methods.get(&short) {
            trace!("{} overrides {} via {}", slot.name, descriptor.name(), short);
            return self.invoke_override(method, &short, container, descriptor);
        }

        if let Some(method) = slot.methods.get(&long) {
            trace!("{} overrides {} via {}", slot.name, descriptor.name(), long);
            return self.invoke_override(method, &long, container, descriptor);
        }

        self.autowire(container, descriptor)
    }

    fn invoke_override(
        &self,
        method: &FactoryMethod,
        method_name: &str,
        container: &Container,
        descriptor: &TypeDescriptor,
    ) -> InjectResult<Value> {
        let actual = descriptor.arguments().len();
        if !method.signature.accepts(actual) {
            return Err(InjectError::ArityMismatch {
                type_name: descriptor.name().to_owned(),
                method: method_name.to_owned(),
                expected: method.signature.required(),
                actual,
            });
        }

        let context = FactoryContext::new(container);
        (method.handler)(&context, descriptor.arguments()).map_err(|source| {
            InjectError::Construction {
                type_name: descriptor.name().to_owned(),
                source,
            }
        })
    }

    fn handle_virtual(
        &self,
        slot: &FactorySlot,
        container: &Container,
        descriptor: &TypeDescriptor,
    ) -> InjectResult<Value> {
        let Some(method) = slot.methods.get(descriptor.name()) else {
            return Err(InjectError::VirtualTypeNotFound {
                name: descriptor.name().to_owned(),
            });
        };

        let context = FactoryContext::new(container);
        (method.handler)(&context, descriptor.arguments()).map_err(|source| {
            InjectError::Construction {
                type_name: descriptor.name().to_owned(),
                source,
            }
        })
    }

    fn autowire(
        &self,
        container: &Container,
        descriptor: &TypeDescriptor,
    ) -> InjectResult<Value> {
        let types = container.types();
        let name = descriptor.name();
        let parameters = types.constructor_parameters(name)?;

        debug!("autowiring {} ({} dependencies)", name, parameters.len());

        let mut dependencies = Vec::with_capacity(parameters.len());
        for parameter in &parameters {
            let Some(declared_type) = parameter.declared_type() else {
                return Err(InjectError::AutoWire {
                    type_name: name.to_owned(),
                    reason: AutoWireReason::UntypedParameter(
                        parameter.name().to_owned(),
                    ),
                });
            };

            if parameter.is_scalar() {
                return Err(InjectError::AutoWire {
                    type_name: name.to_owned(),
                    reason: AutoWireReason::ScalarParameter(
                        parameter.name().to_owned(),
                    ),
                });
            }

            // Resolved through the container, not this slot, so the
            // dependency hits the cache and the whole chain.
            let dependency =
                container.get(declared_type).map_err(|source| {
                    InjectError::Construction {
                        type_name: name.to_owned(),
                        source: Box::new(source),
                    }
                })?;
            dependencies.push(dependency);
        }

        types
            .instantiate(name, dependencies)
            .map(Value::Object)
            .map_err(|source| InjectError::Construction {
                type_name: name.to_owned(),
                source,
            })
    }
}
