//! Error types produced while materializing configuration.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::shape::{BoxError, Shape};

/// A raw value could not be converted to the requested shape.
#[derive(Debug)]
pub struct ConversionError {
    value: String,
    target: Shape,
    cause: Option<BoxError>,
}

impl ConversionError {
    /// Conversion of `value` into `target` failed.
    #[must_use]
    pub fn new(value: impl Into<String>, target: Shape) -> Self {
        Self {
            value: value.into(),
            target,
            cause: None,
        }
    }

    /// Attach the underlying failure.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Raw string that failed to convert.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Shape the value was converted into.
    #[must_use]
    pub const fn target(&self) -> &Shape {
        &self.target
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "can't build a {} from invalid literal: {:?}",
            self.target, self.value
        )
    }
}

impl StdError for ConversionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// Errors that can occur while materializing configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required field has no entry in the source.
    #[error("missing required key: {key:?}")]
    MissingKey {
        /// Fully qualified source key that was looked up.
        key: String,
    },

    /// A raw value could not be decoded.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The assembled mapping was rejected by the validation engine.
    #[error("validation failed for '{schema}': {source}")]
    Validation {
        /// Name of the schema being built.
        schema: &'static str,
        /// Underlying error reported by `serde`.
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Key missing from the source, if that is what failed.
    #[must_use]
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            Self::MissingKey { key } => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_message_quotes_key() {
        let err = ConfigError::MissingKey {
            key: String::from("APP_DB_PORT"),
        };
        assert_eq!(err.to_string(), "missing required key: \"APP_DB_PORT\"");
        assert_eq!(err.missing_key(), Some("APP_DB_PORT"));
    }

    #[test]
    fn conversion_message_names_target() {
        let err = ConversionError::new("2", Shape::bool());
        assert_eq!(
            err.to_string(),
            "can't build a bool from invalid literal: \"2\""
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn conversion_exposes_cause() {
        let cause = "x".parse::<u8>().err().map(BoxError::from);
        let mut err = ConversionError::new("x", Shape::integer());
        if let Some(cause) = cause {
            err = err.with_cause(cause);
        }
        assert!(err.source().is_some());
    }
}
