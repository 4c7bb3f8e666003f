use crate::{Instance, Service};

/// A call-site argument, or the raw result of a factory method before the
/// object post-condition is checked.
///
/// Scalar variants compare by value inside cache keys; [`Value::Object`]
/// normalizes to its runtime type name only (see
/// [`TypeDescriptor::cache_key`](crate::TypeDescriptor::cache_key)).
#[derive(Clone, Debug)]
pub enum Value {
    /// No value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A constructed instance.
    Object(Instance),
}

impl Value {
    /// Wraps a value into an object argument.
    pub fn object<T: Service>(value: T) -> Self {
        Value::Object(Instance::new(value))
    }

    /// The runtime kind of this value, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "double",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
        }
    }

    /// The wrapped instance, if this value is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// The cache-key rendering of this value. Objects are replaced by their
    /// runtime type name so that cache keys stay serializable.
    pub(crate) fn normalized(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(value) => serde_json::json!(value),
            Value::Int(value) => serde_json::json!(value),
            Value::Float(value) => serde_json::json!(value),
            Value::Str(value) => serde_json::json!(value),
            Value::Object(instance) => {
                serde_json::json!({ "object": instance.type_name() })
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_the_runtime_kind() {
        assert_eq!("null", Value::Null.kind());
        assert_eq!("string", Value::from("x").kind());
        assert_eq!("integer", Value::from(3).kind());
        assert_eq!("object", Value::object(String::new()).kind());
    }

    #[test]
    fn objects_normalize_to_their_type_name() {
        struct Marker;
        let normalized = Value::object(Marker).normalized();
        let name = normalized["object"].as_str().unwrap();
        assert!(name.ends_with("Marker"));
    }
}
