//! Procedural macros for `nest_config`.
//!
//! The [`Schema`] derive describes a struct with named fields as a
//! `nest_config::Schema`: one field descriptor per serde field, each with the
//! shape reported by the field type's `FieldType` implementation. The struct
//! itself also becomes a `FieldType`, reported as a sub-schema only when
//! marked with `#[schema(subconfig)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `nest_config::Schema`.
///
/// Struct attributes:
/// - `#[schema(subconfig)]` marks the struct as a sub-schema so parents
///   materialize it field by field under a derived prefix;
/// - `#[schema(crate = "path")]` overrides the path used to reach
///   `nest_config` in generated code.
///
/// Field attributes:
/// - `#[schema(shape = <expr>)]` replaces the field's shape;
/// - `#[schema(from_str)]` decodes the field through its `FromStr`
///   implementation.
///
/// `#[serde(rename)]`, `#[serde(rename_all)]`, `#[serde(default)]` and
/// `#[serde(skip)]` are honoured so descriptors line up with what `serde`
/// expects.
#[proc_macro_derive(Schema, attributes(schema))]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
