//! Conversion of raw strings into decoded value trees.
//!
//! A [`Decoder`] turns one raw string into a [`serde_json::Value`] matching a
//! [`Shape`]. The default, [`JsonLike`], dispatches on the shape; callers may
//! replace it wholesale with any `Fn(&Shape, &str) -> Result<Value,
//! ConversionError>`. There is no fallback from a custom decoder to the
//! default dispatch.
//!
//! Composite values are parsed into an untyped tree only. Element shapes are
//! not re-checked here; the validation engine coerces and validates them when
//! the final instance is built.

mod jsonlike;

use serde_json::{Number, Value};

use crate::error::ConversionError;
use crate::shape::{ScalarKind, Shape};

pub use jsonlike::parse_document;

/// Converts a raw string into a value of the requested shape.
pub trait Decoder {
    /// Decode `raw` into a value shaped like `shape`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] carrying `raw` and `shape` when the value
    /// cannot be built. No partial value is ever returned.
    fn decode(&self, shape: &Shape, raw: &str) -> Result<Value, ConversionError>;
}

impl<F> Decoder for F
where
    F: Fn(&Shape, &str) -> Result<Value, ConversionError>,
{
    fn decode(&self, shape: &Shape, raw: &str) -> Result<Value, ConversionError> {
        self(shape, raw)
    }
}

/// Default decoder accepting a superset of JSON for structured shapes.
///
/// - text and secrets pass through untouched;
/// - booleans accept `true`/`t`/`1` and `false`/`f`/`0` in any case;
/// - bytes take the UTF-8 encoding of the raw value;
/// - integers and floats use the numeric constructors;
/// - containers, tuples, mappings and record-like targets are parsed with
///   [`parse_document`];
/// - opaque types use their single-string constructor, if any.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonLike;

impl Decoder for JsonLike {
    fn decode(&self, shape: &Shape, raw: &str) -> Result<Value, ConversionError> {
        let failed = || ConversionError::new(raw, shape.clone());
        match shape {
            Shape::Scalar(ScalarKind::Text | ScalarKind::Secret) => Ok(Value::from(raw)),
            Shape::Scalar(ScalarKind::Bool) => parse_bool(raw).map(Value::Bool).ok_or_else(failed),
            Shape::Scalar(ScalarKind::Bytes) => Ok(Value::from(raw.as_bytes())),
            Shape::Scalar(ScalarKind::Integer) => parse_integer(raw).ok_or_else(failed),
            Shape::Scalar(ScalarKind::Float) => parse_float(raw).ok_or_else(failed),
            Shape::Opaque(opaque) => {
                let construct = opaque.constructor().ok_or_else(failed)?;
                construct(raw).map_err(|cause| failed().with_cause(cause))
            }
            structural => {
                debug_assert!(structural.is_structural(), "unhandled shape {structural:?}");
                parse_document(raw).map_err(|cause| failed().with_cause(cause))
            }
        }
    }
}

/// Parse a boolean literal, case-insensitively.
///
/// ```
/// assert_eq!(nest_config::parse_bool("T"), Some(true));
/// assert_eq!(nest_config::parse_bool("0"), Some(false));
/// assert_eq!(nest_config::parse_bool("2"), None);
/// ```
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

fn parse_integer(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map(Value::from)
        .or_else(|_| trimmed.parse::<u64>().map(Value::from))
        .ok()
}

fn parse_float(raw: &str) -> Option<Value> {
    let parsed = raw.trim().parse::<f64>().ok()?;
    Number::from_f64(parsed).map(Value::Number)
}
