//! Schema and field descriptors.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::shape::Shape;

/// A configuration type whose fields can be materialized from a flat source.
///
/// Usually implemented with `#[derive(Schema)]`. The `DeserializeOwned`
/// bound is the validation engine: the assembled field mapping is handed to
/// `serde`, which performs the final coercion and builds the instance.
pub trait Schema: DeserializeOwned {
    /// Human-readable schema name used in errors and logs.
    fn name() -> &'static str;

    /// Field descriptors, in declaration order.
    fn fields() -> Vec<Field>;
}

/// Default-value state of a field.
///
/// "No default" and "default is null" are distinct states.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldDefault {
    /// The source must provide the key.
    Required,
    /// Value inserted into the mapping when the key is absent.
    Value(Value),
    /// The validation engine supplies the default; the key is left out of the
    /// mapping (`#[serde(default)]` and `Option<T>` fields).
    Deferred,
}

/// One field of a schema.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    shape: Shape,
    default: FieldDefault,
}

impl Field {
    /// Required field.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            default: FieldDefault::Required,
        }
    }

    /// Use `value` when the key is absent.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = FieldDefault::Value(value);
        self
    }

    /// Let the validation engine fill in the default when the key is absent.
    #[must_use]
    pub fn deferred(mut self) -> Self {
        self.default = FieldDefault::Deferred;
        self
    }

    /// Field name, as seen by the validation engine.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target shape.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Default-value state.
    #[must_use]
    pub const fn default(&self) -> &FieldDefault {
        &self.default
    }
}
