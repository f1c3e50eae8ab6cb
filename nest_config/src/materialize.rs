//! Materialization of schemas from a flat source.
//!
//! For each field the materializer resolves a key, fetches the raw value or
//! falls back to the field's default, and decodes it. Marked sub-schemas are
//! materialized recursively under a prefix derived from the field name. The
//! assembled mapping is finally handed to `serde`, which validates it and
//! builds the instance. The first error aborts the whole walk.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::decoder::{Decoder, JsonLike};
use crate::error::ConfigError;
use crate::prefix::{Prefix, Prefixer, build_prefixer, nest};
use crate::schema::{Field, FieldDefault, Schema};
use crate::shape::Shape;
use crate::source::{Env, Source};

/// Build `T` from `source`, resolving keys with `prefix` and decoding raw
/// values with `decoder`.
///
/// ```
/// use nest_config::{JsonLike, Schema};
///
/// #[derive(Debug, serde::Deserialize, Schema)]
/// struct App {
///     hosts: Vec<String>,
///     #[serde(default)]
///     replicas: u8,
/// }
///
/// let source = [("APP_HOSTS", r#"["b.org","sky.net"]"#)];
/// let app: App = nest_config::new(&source, "app", &JsonLike)?;
/// assert_eq!(app.hosts, ["b.org", "sky.net"]);
/// assert_eq!(app.replicas, 0);
/// # Ok::<(), nest_config::ConfigError>(())
/// ```
///
/// # Errors
///
/// - [`ConfigError::MissingKey`] when a required key is absent;
/// - [`ConfigError::Conversion`] when a raw value cannot be decoded;
/// - [`ConfigError::Validation`] when `serde` rejects the assembled mapping.
pub fn new<T: Schema>(
    source: &dyn Source,
    prefix: impl Into<Prefix>,
    decoder: &dyn Decoder,
) -> Result<T, ConfigError> {
    let prefixer = build_prefixer(prefix.into());
    debug!(schema = T::name(), "materializing configuration");
    let map = materialize(&T::fields(), source, &prefixer, decoder)?;
    let value = Value::Object(map);
    let config = <T as serde::Deserialize>::deserialize(&value).map_err(|err| {
        debug!(schema = T::name(), error = %err, "validation failed");
        ConfigError::Validation {
            schema: T::name(),
            source: err,
        }
    })?;
    debug!(schema = T::name(), "configuration materialized");
    Ok(config)
}

/// Build `T` from the process environment using the default decoder.
///
/// # Errors
///
/// See [`new`].
pub fn from_env<T: Schema>(prefix: impl Into<Prefix>) -> Result<T, ConfigError> {
    new(&Env, prefix, &JsonLike)
}

/// Assemble the field → value mapping for `fields`.
///
/// Fields whose default is [`FieldDefault::Deferred`] are left out when their
/// key is absent so the validation engine can supply the default.
///
/// # Errors
///
/// Returns the first missing key, conversion failure, or sub-schema
/// validation failure encountered.
pub fn materialize(
    fields: &[Field],
    source: &dyn Source,
    prefixer: &Prefixer,
    decoder: &dyn Decoder,
) -> Result<Map<String, Value>, ConfigError> {
    let mut map = Map::new();
    for field in fields {
        if let Some(value) = load_field(field, source, prefixer, decoder)? {
            map.insert(field.name().to_owned(), value);
        }
    }
    Ok(map)
}

fn load_field(
    field: &Field,
    source: &dyn Source,
    prefixer: &Prefixer,
    decoder: &dyn Decoder,
) -> Result<Option<Value>, ConfigError> {
    if let Shape::Nested(schema) = field.shape() {
        trace!(field = field.name(), schema = schema.name(), "descending into sub-schema");
        let child = nest(prefixer, field.name());
        let value = Value::Object(materialize(&schema.fields(), source, &child, decoder)?);
        schema
            .validate(&value)
            .map_err(|err| ConfigError::Validation {
                schema: schema.name(),
                source: err,
            })?;
        return Ok(Some(value));
    }

    let key = prefixer(field.name());
    let Some(raw) = source.get(&key) else {
        return match field.default() {
            FieldDefault::Required => Err(ConfigError::MissingKey { key }),
            FieldDefault::Value(value) => {
                trace!(key = %key, "key absent; using declared default");
                Ok(Some(value.clone()))
            }
            FieldDefault::Deferred => {
                trace!(key = %key, "key absent; default left to validation");
                Ok(None)
            }
        };
    };
    trace!(key = %key, shape = %field.shape(), "decoding value");
    decoder
        .decode(field.shape(), &raw)
        .map(Some)
        .map_err(|err| {
            debug!(key = %key, shape = %field.shape(), "conversion failed");
            ConfigError::from(err)
        })
}

/// Builder over [`new`] with defaults for every argument.
///
/// The source defaults to [`Env`], the prefix to the empty string, and the
/// decoder to [`JsonLike`].
///
/// ```
/// use nest_config::{Loader, Schema};
///
/// #[derive(serde::Deserialize, Schema)]
/// #[schema(subconfig)]
/// struct Db {
///     port: u16,
/// }
///
/// #[derive(serde::Deserialize, Schema)]
/// struct App {
///     db: Db,
/// }
///
/// let source = [("APP_DB_PORT", "32")];
/// let app: App = Loader::new().source(&source).prefix("app").load()?;
/// assert_eq!(app.db.port, 32);
/// # Ok::<(), nest_config::ConfigError>(())
/// ```
#[derive(Default)]
pub struct Loader<'a> {
    source: Option<&'a dyn Source>,
    prefix: Prefix,
    decoder: Option<&'a dyn Decoder>,
}

impl<'a> Loader<'a> {
    /// Loader reading the environment with no prefix and the default decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read raw values from `source`.
    #[must_use]
    pub fn source(mut self, source: &'a dyn Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Resolve keys with `prefix`.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<Prefix>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replace the default decoder.
    #[must_use]
    pub fn decoder(mut self, decoder: &'a dyn Decoder) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Materialize `T`.
    ///
    /// # Errors
    ///
    /// See [`new`].
    pub fn load<T: Schema>(self) -> Result<T, ConfigError> {
        let source = self.source.unwrap_or(&Env);
        let decoder = self.decoder.unwrap_or(&JsonLike);
        new(source, self.prefix, decoder)
    }
}
