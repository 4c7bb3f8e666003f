use crate::DynError;
use derive_more::Display;
use std::error::Error;

/// A result from asking the container to resolve and construct a type.
pub type InjectResult<T> = Result<T, InjectError>;

/// An error that has occurred while constructing an instance or while
/// building the container itself.
///
/// Every failure surfaces to the original caller of
/// [`Container::get`](crate::Container::get); nothing is retried internally
/// and nothing is cached on failure.
#[derive(Debug, Display)]
pub enum InjectError {
    /// The container was built without any factory identifiers.
    #[display(fmt = "no factory identifiers provided")]
    NoFactoriesProvided,

    /// A factory identifier does not denote anything known to the
    /// introspector.
    #[display(fmt = "factory {} does not exist", name)]
    UnknownFactory {
        /// The identifier that was requested.
        name: String,
    },

    /// A factory identifier denotes a known type that is not a factory.
    #[display(fmt = "{} is not a factory", name)]
    InvalidFactory {
        /// The identifier that was requested.
        name: String,
    },

    /// A regular-type descriptor names a type or interface the introspector
    /// does not know.
    #[display(fmt = "type (class or interface) {} does not exist", name)]
    UnknownType {
        /// The name that was requested.
        name: String,
    },

    /// A virtual descriptor's name matches no method anywhere in the
    /// factory chain.
    #[display(fmt = "factory method for virtual type {} does not exist", name)]
    VirtualTypeNotFound {
        /// The virtual identifier that was requested.
        name: String,
    },

    /// An override method was called with the wrong number of arguments.
    #[display(
        fmt = "method {} for {} expects {} argument(s), got {}",
        method,
        type_name,
        expected,
        actual
    )]
    ArityMismatch {
        /// The type being constructed.
        type_name: String,
        /// The override method that was selected.
        method: String,
        /// The method's declared parameter count.
        expected: usize,
        /// The number of call-site arguments.
        actual: usize,
    },

    /// Autowiring was blocked before any construction took place.
    #[display(fmt = "cannot auto-wire {}: {}", type_name, reason)]
    AutoWire {
        /// The type whose constructor could not be autowired.
        type_name: String,
        /// Why autowiring was rejected.
        reason: AutoWireReason,
    },

    /// A failure was raised while executing an override method, a virtual
    /// type method, or a registered constructor. The original failure is
    /// available through [`Error::source`].
    #[display(fmt = "error while creating {}", type_name)]
    Construction {
        /// The type that was being constructed.
        type_name: String,
        /// The original failure.
        source: DynError,
    },

    /// A construction path produced a non-object value.
    #[display(
        fmt = "factory method {} does not return an object but {}",
        method,
        kind
    )]
    InvalidResult {
        /// The method (or type name, for autowiring) that produced the
        /// value.
        method: String,
        /// The runtime kind of the offending value.
        kind: &'static str,
    },
}

/// Why a constructor parameter stopped autowiring.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum AutoWireReason {
    /// The parameter has no declared type.
    #[display(fmt = "constructor parameter {} has no type", _0)]
    UntypedParameter(String),

    /// The parameter has a scalar (non-object) declared type.
    #[display(fmt = "constructor parameter {} has scalar type", _0)]
    ScalarParameter(String),

    /// The target itself is an interface and cannot be constructed.
    #[display(fmt = "it is an interface")]
    Interface,
}

impl Error for InjectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InjectError::Construction { source, .. } => {
                let source: &(dyn Error + 'static) = source.as_ref();
                Some(source)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_error_exposes_its_cause() {
        let error = InjectError::Construction {
            type_name: "Foo".to_owned(),
            source: "boom".into(),
        };
        let cause = error.source().unwrap();
        assert_eq!("boom", cause.to_string());
    }

    #[test]
    fn autowire_message_names_class_and_parameter() {
        let error = InjectError::AutoWire {
            type_name: "Foo".to_owned(),
            reason: AutoWireReason::ScalarParameter("size".to_owned()),
        };
        assert_eq!(
            "cannot auto-wire Foo: constructor parameter size has scalar type",
            error.to_string()
        );
    }
}
