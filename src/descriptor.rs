use crate::{TypeIntrospector, Value};

/// An immutable description of what to build: a symbolic type name plus the
/// ordered call-site arguments.
///
/// The name either refers to a type known to the
/// [`TypeIntrospector`] (a *regular* type) or is an arbitrary identifier
/// resolved purely by matching a factory method name (a *virtual* type).
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    name: String,
    arguments: Vec<Value>,
}

impl TypeDescriptor {
    /// Creates a descriptor without call-site arguments.
    pub fn new(name: impl Into<String>) -> Self {
        TypeDescriptor {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Creates a descriptor with call-site arguments, in order.
    pub fn with_arguments(
        name: impl Into<String>,
        arguments: Vec<Value>,
    ) -> Self {
        TypeDescriptor {
            name: name.into(),
            arguments,
        }
    }

    /// Appends a call-site argument.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<Value>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// The requested type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The call-site arguments, in order.
    #[must_use]
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Whether the name resolves to nothing the introspector knows. Virtual
    /// types skip override lookup entirely and use the name itself as the
    /// factory method name.
    pub fn is_virtual(&self, types: &dyn TypeIntrospector) -> bool {
        !types.type_exists(&self.name) && !types.interface_exists(&self.name)
    }

    /// The two candidate override method names for a regular type: the bare
    /// type name, and the fully-qualified name with `::` separators
    /// flattened to underscores. [`None`] for virtual types.
    pub fn override_method_names(
        &self,
        types: &dyn TypeIntrospector,
    ) -> Option<(String, String)> {
        if self.is_virtual(types) {
            return None;
        }

        Some((self.short_method_name(), self.long_method_name()))
    }

    /// The identity used to cache and deduplicate instances: a serialization
    /// of the name and the normalized arguments.
    ///
    /// Object arguments are replaced by their runtime type name before
    /// serialization, so two calls passing structurally different objects of
    /// the same type collapse to the same cache entry. This is a deliberate
    /// identity weakening that keeps cache keys serializable.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let arguments: Vec<serde_json::Value> =
            self.arguments.iter().map(Value::normalized).collect();

        serde_json::json!([&self.name, arguments]).to_string()
    }

    fn short_method_name(&self) -> String {
        self.name
            .rsplit("::")
            .next()
            .unwrap_or(&self.name)
            .to_owned()
    }

    fn long_method_name(&self) -> String {
        self.name.replace("::", "_")
    }
}

impl From<&str> for TypeDescriptor {
    fn from(name: &str) -> Self {
        TypeDescriptor::new(name)
    }
}

impl From<String> for TypeDescriptor {
    fn from(name: String) -> Self {
        TypeDescriptor::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TypeRegistry, Value};

    #[test]
    fn cache_keys_are_stable_for_equal_descriptors() {
        let first = TypeDescriptor::new("logger").with_argument("stderr");
        let second = TypeDescriptor::new("logger").with_argument("stderr");
        assert_eq!(first.cache_key(), second.cache_key());
    }

    #[test]
    fn cache_keys_differ_per_argument() {
        let first = TypeDescriptor::new("logger").with_argument("stderr");
        let second = TypeDescriptor::new("logger").with_argument("stdout");
        assert_ne!(first.cache_key(), second.cache_key());
    }

    #[test]
    fn object_arguments_collapse_to_their_type_name() {
        struct Options(#[allow(dead_code)] i32);

        let first = TypeDescriptor::new("connection")
            .with_argument(Value::object(Options(1)));
        let second = TypeDescriptor::new("connection")
            .with_argument(Value::object(Options(2)));
        assert_eq!(first.cache_key(), second.cache_key());
    }

    #[test]
    fn unknown_names_are_virtual() {
        let registry = TypeRegistry::new();
        let descriptor = TypeDescriptor::new("anything");
        assert!(descriptor.is_virtual(&registry));
        assert!(descriptor.override_method_names(&registry).is_none());
    }

    #[test]
    fn override_method_names_flatten_the_path() {
        #[derive(Default)]
        struct Widget;

        let mut registry = TypeRegistry::new();
        registry.register_default::<Widget>();

        let descriptor =
            TypeDescriptor::new(crate::TypeInfo::of::<Widget>().name());
        let (short, long) =
            descriptor.override_method_names(&registry).unwrap();
        assert_eq!("Widget", short);
        assert!(long.ends_with("_Widget"));
        assert!(!long.contains("::"));
    }
}
