//! Type-directed materialization of nested configuration.
//!
//! `nest_config` builds strongly typed configuration structs from a flat
//! string-keyed source such as the process environment. Each field's key is
//! derived from an optional prefix and the field name, its raw value is
//! decoded according to the field's [`Shape`], and marked sub-schemas are
//! materialized recursively under a prefix derived from the parent field:
//!
//! ```
//! use nest_config::{Loader, Schema, Secret};
//!
//! #[derive(serde::Deserialize, Schema)]
//! #[schema(subconfig)]
//! struct DbConfig {
//!     port: u16,
//!     #[serde(default)]
//!     debug: bool,
//! }
//!
//! #[derive(serde::Deserialize, Schema)]
//! struct AppConfig {
//!     db: DbConfig,
//!     hosts: Vec<String>,
//!     token: Secret,
//! }
//!
//! let source = [
//!     ("APP_DB_PORT", "32"),
//!     ("APP_HOSTS", r#"["b.org","sky.net"]"#),
//!     ("APP_TOKEN", "very secret"),
//! ];
//! let config: AppConfig = Loader::new().source(&source).prefix("app").load()?;
//! assert_eq!(config.db.port, 32);
//! assert!(!config.db.debug);
//! assert_eq!(config.hosts, ["b.org", "sky.net"]);
//! assert_eq!(config.token.to_string(), "**********");
//! # Ok::<(), nest_config::ConfigError>(())
//! ```
//!
//! The assembled field mapping is handed to `serde` for final validation, so
//! element types inside containers are checked there rather than by the
//! decoder.

pub use nest_config_macros::Schema;

mod decoder;
mod error;
mod field_type;
mod materialize;
mod prefix;
mod scalar;
mod schema;
mod shape;
mod source;

pub use decoder::{Decoder, JsonLike, parse_bool, parse_document};
pub use error::{ConfigError, ConversionError};
pub use field_type::FieldType;
pub use materialize::{Loader, from_env, materialize, new};
pub use prefix::{Prefix, Prefixer, SEPARATOR, build_prefixer, nest};
pub use scalar::{Bytes, Secret};
pub use schema::{Field, FieldDefault, Schema};
pub use shape::{BoxError, Constructor, OpaqueShape, ScalarKind, SchemaRef, Shape};
pub use source::{Env, Source};
