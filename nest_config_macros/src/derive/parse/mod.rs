//! Attribute parsing for the `Schema` derive macro.

use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, Expr, Lit, LitStr, Token};

mod input;
mod serde_attrs;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{SchemaField, SchemaInput, parse_input};
use serde_attrs::{serde_container, serde_field};
pub(crate) use type_utils::option_inner;

/// Struct-level attributes recognised by `#[derive(Schema)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Set by `#[schema(subconfig)]`.
    pub subconfig: bool,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[schema(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `nest_config::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Schema)]`.
///
/// - `shape` replaces the shape reported by the field type;
/// - `from_str` builds an opaque shape from the type's `FromStr`.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub shape: Option<Expr>,
    pub from_str: bool,
}

/// Iterate all `#[schema(...)]` attributes once and apply a callback.
fn parse_schema_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("schema")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}

/// Accepts both `flag` and `flag = true|false`.
fn flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        Ok(meta.value()?.parse::<syn::LitBool>()?.value)
    } else {
        Ok(true)
    }
}

/// Extracts `#[schema(...)]` metadata applied to a struct.
///
/// Unknown keys are rejected so typos such as `sub_config` fail loudly
/// instead of silently producing a leaf field.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_schema_attrs(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("subconfig") => {
                out.subconfig = flag(meta)?;
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => Err(meta.error("unknown schema attribute; expected `subconfig` or `crate`")),
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[schema(...)]` attributes.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_schema_attrs(&field.attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("shape") => {
                out.shape = Some(meta.value()?.parse()?);
                Ok(())
            }
            Some("from_str") => {
                out.from_str = flag(meta)?;
                Ok(())
            }
            _ => Err(meta.error("unknown schema attribute; expected `shape` or `from_str`")),
        }
    })?;
    if out.shape.is_some() && out.from_str {
        return Err(syn::Error::new_spanned(
            field,
            "`shape` and `from_str` cannot be combined",
        ));
    }
    Ok(out)
}
