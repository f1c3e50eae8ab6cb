//! Type-shape descriptors.
//!
//! A [`Shape`] describes the target of a single field: which decoding rule
//! applies to its raw string and, for sub-schemas, how to recurse. Shapes are
//! built once per schema (usually by `#[derive(Schema)]`) and never mutated.

use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::schema::{Field, Schema};

/// Boxed error raised by an opaque constructor.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Single-string constructor for an opaque type.
///
/// The returned value is the serialized form of the constructed instance, so
/// the validation engine can rebuild it from the assembled mapping.
pub type Constructor = fn(&str) -> Result<Value, BoxError>;

/// Scalar kinds recognised by the default decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Plain text, passed through untouched.
    Text,
    /// Boolean literal.
    Bool,
    /// Byte sequence taken from the UTF-8 encoding of the raw value.
    Bytes,
    /// Integer built with the numeric single-argument constructor.
    Integer,
    /// Floating point number built with the numeric constructor.
    Float,
    /// Text that must not be echoed back; see [`crate::Secret`].
    Secret,
}

impl ScalarKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Secret => "secret",
        }
    }
}

/// Opaque target: any type outside the closed set of known shapes.
#[derive(Clone, Copy)]
pub struct OpaqueShape {
    name: &'static str,
    construct: Option<Constructor>,
}

impl OpaqueShape {
    /// Opaque shape without a constructor.
    ///
    /// The default decoder always rejects such a target; only a custom
    /// decoder can build it.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            construct: None,
        }
    }

    /// Opaque shape built through `T::from_str`.
    #[must_use]
    pub fn parsed<T>() -> Self
    where
        T: FromStr + Serialize,
        T::Err: Into<BoxError>,
    {
        Self {
            name: short_type_name::<T>(),
            construct: Some(construct_via_from_str::<T>),
        }
    }

    /// Name of the opaque type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Single-string constructor, if the type has one.
    #[must_use]
    pub const fn constructor(&self) -> Option<Constructor> {
        self.construct
    }
}

impl fmt::Debug for OpaqueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueShape")
            .field("name", &self.name)
            .field("constructible", &self.construct.is_some())
            .finish()
    }
}

impl PartialEq for OpaqueShape {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.construct.is_some() == other.construct.is_some()
    }
}

fn construct_via_from_str<T>(raw: &str) -> Result<Value, BoxError>
where
    T: FromStr + Serialize,
    T::Err: Into<BoxError>,
{
    let parsed = raw.parse::<T>().map_err(Into::<BoxError>::into)?;
    Ok(serde_json::to_value(parsed)?)
}

/// Handle on a schema marked as a sub-schema.
///
/// Carries the child's field list and the validation step run on the child
/// mapping before it is embedded in its parent.
#[derive(Clone, Copy)]
pub struct SchemaRef {
    name: &'static str,
    fields: fn() -> Vec<Field>,
    validate: fn(&Value) -> Result<(), serde_json::Error>,
}

impl SchemaRef {
    /// Reference the schema implemented by `T`.
    #[must_use]
    pub fn of<T: Schema>() -> Self {
        Self {
            name: T::name(),
            fields: T::fields,
            validate: validate_as::<T>,
        }
    }

    /// Name of the referenced schema.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Field descriptors of the referenced schema.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        (self.fields)()
    }

    /// Run the validation engine over an assembled child mapping.
    ///
    /// # Errors
    ///
    /// Returns the engine's error when the mapping does not describe a valid
    /// instance of the schema.
    pub fn validate(&self, value: &Value) -> Result<(), serde_json::Error> {
        (self.validate)(value)
    }
}

fn validate_as<T: Schema>(value: &Value) -> Result<(), serde_json::Error> {
    <T as serde::Deserialize>::deserialize(value).map(drop)
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaRef").field(&self.name).finish()
    }
}

impl PartialEq for SchemaRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Target shape of a single field.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// One of the scalar kinds.
    Scalar(ScalarKind),
    /// Ordered, growable sequence.
    Sequence(Box<Shape>),
    /// Unordered set.
    Set(Box<Shape>),
    /// Immutable set.
    FrozenSet(Box<Shape>),
    /// Tuple with one shape per position.
    FixedTuple(Vec<Shape>),
    /// Homogeneous tuple of any length.
    VariableTuple(Box<Shape>),
    /// Key/value mapping.
    Mapping(Box<Shape>, Box<Shape>),
    /// Marked sub-schema, materialized recursively under a derived prefix.
    Nested(SchemaRef),
    /// Record-like target that is not marked as a sub-schema.
    Structure(&'static str),
    /// Any other type.
    Opaque(OpaqueShape),
}

impl Shape {
    /// Plain text.
    #[must_use]
    pub const fn text() -> Self {
        Self::Scalar(ScalarKind::Text)
    }

    /// Boolean.
    #[must_use]
    pub const fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    /// Byte sequence.
    #[must_use]
    pub const fn bytes() -> Self {
        Self::Scalar(ScalarKind::Bytes)
    }

    /// Integer.
    #[must_use]
    pub const fn integer() -> Self {
        Self::Scalar(ScalarKind::Integer)
    }

    /// Float.
    #[must_use]
    pub const fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    /// Secret text.
    #[must_use]
    pub const fn secret() -> Self {
        Self::Scalar(ScalarKind::Secret)
    }

    /// Sequence of `elem`.
    #[must_use]
    pub fn sequence(elem: Self) -> Self {
        Self::Sequence(Box::new(elem))
    }

    /// Mapping from `key` to `value`.
    #[must_use]
    pub fn mapping(key: Self, value: Self) -> Self {
        Self::Mapping(Box::new(key), Box::new(value))
    }

    /// Opaque shape built through `T::from_str`.
    #[must_use]
    pub fn parsed<T>() -> Self
    where
        T: FromStr + Serialize,
        T::Err: Into<BoxError>,
    {
        Self::Opaque(OpaqueShape::parsed::<T>())
    }

    /// Opaque shape with no constructor known to the default decoder.
    #[must_use]
    pub const fn opaque(name: &'static str) -> Self {
        Self::Opaque(OpaqueShape::named(name))
    }

    /// Marked sub-schema `T`.
    #[must_use]
    pub fn nested<T: Schema>() -> Self {
        Self::Nested(SchemaRef::of::<T>())
    }

    /// Whether the default decoder parses this shape as a structured document.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Sequence(_)
                | Self::Set(_)
                | Self::FrozenSet(_)
                | Self::FixedTuple(_)
                | Self::VariableTuple(_)
                | Self::Mapping(..)
                | Self::Nested(_)
                | Self::Structure(_)
        )
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.label()),
            Self::Sequence(elem) => write!(f, "sequence[{elem}]"),
            Self::Set(elem) => write!(f, "set[{elem}]"),
            Self::FrozenSet(elem) => write!(f, "frozenset[{elem}]"),
            Self::FixedTuple(elems) => {
                f.write_str("tuple[")?;
                for (idx, elem) in elems.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_str("]")
            }
            Self::VariableTuple(elem) => write!(f, "tuple[{elem}, ...]"),
            Self::Mapping(key, value) => write!(f, "mapping[{key}, {value}]"),
            Self::Nested(schema) => f.write_str(schema.name()),
            Self::Structure(name) => f.write_str(name),
            Self::Opaque(opaque) => f.write_str(opaque.name()),
        }
    }
}

/// Last path segment of `T`'s type name, keeping generic arguments intact.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => full.get(idx + 2..).unwrap_or(full),
        None => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::net::IpAddr;

    #[rstest]
    #[case(Shape::bool(), "bool")]
    #[case(Shape::sequence(Shape::text()), "sequence[text]")]
    #[case(Shape::FixedTuple(vec![Shape::integer(), Shape::text()]), "tuple[integer, text]")]
    #[case(Shape::VariableTuple(Box::new(Shape::float())), "tuple[float, ...]")]
    #[case(Shape::mapping(Shape::text(), Shape::bytes()), "mapping[text, bytes]")]
    #[case(Shape::opaque("Point"), "Point")]
    fn displays_shape(#[case] shape: Shape, #[case] expected: &str) {
        assert_eq!(shape.to_string(), expected);
    }

    #[test]
    fn parsed_shape_uses_short_type_name() {
        let Shape::Opaque(opaque) = Shape::parsed::<IpAddr>() else {
            panic!("expected an opaque shape");
        };
        assert_eq!(opaque.name(), "IpAddr");
        assert!(opaque.constructor().is_some());
    }

    #[test]
    fn named_opaque_has_no_constructor() {
        assert!(OpaqueShape::named("Point").constructor().is_none());
    }

    #[rstest]
    #[case(Shape::sequence(Shape::integer()), true)]
    #[case(Shape::Structure("Point"), true)]
    #[case(Shape::text(), false)]
    #[case(Shape::opaque("Point"), false)]
    fn classifies_structural_shapes(#[case] shape: Shape, #[case] expected: bool) {
        assert_eq!(shape.is_structural(), expected);
    }
}
