//! Serde attribute parsing helpers.
//!
//! Field descriptors must use the keys serde expects when deserializing the
//! assembled mapping, so the derive honours `#[serde(rename = "...")]`,
//! `#[serde(rename_all = "...")]`, `#[serde(default)]` and
//! `#[serde(skip)]`. `#[serde(flatten)]` is rejected, since a flattened
//! field has no key of its own.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token};

/// Supported `#[serde(rename_all = "...")]` rules for struct fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SerdeRenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl SerdeRenameAll {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebab),
            other => Err(syn::Error::new(
                value.span(),
                format!("unsupported serde rename_all value '{other}'"),
            )),
        }
    }

    pub(crate) fn apply(self, field_name: &str) -> String {
        match self {
            Self::Lower => field_name.to_ascii_lowercase(),
            Self::Upper => field_name.to_ascii_uppercase(),
            Self::Pascal => field_name.to_upper_camel_case(),
            Self::Camel => field_name.to_lower_camel_case(),
            Self::Snake => field_name.to_snake_case(),
            Self::ScreamingSnake => field_name.to_shouty_snake_case(),
            Self::Kebab => field_name.to_kebab_case(),
            Self::ScreamingKebab => field_name.to_shouty_kebab_case(),
        }
    }
}

/// Container-level serde settings relevant to field descriptors.
#[derive(Default, Clone, Copy)]
pub(crate) struct SerdeContainer {
    pub rename_all: Option<SerdeRenameAll>,
    pub default: bool,
}

/// Field-level serde settings relevant to field descriptors.
#[derive(Default, Clone)]
pub(crate) struct SerdeField {
    pub rename: Option<String>,
    pub default: bool,
    pub skip: bool,
}

fn for_each_serde_meta<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes `default` or `default = "path"`.
fn parse_default(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    }
    Ok(())
}

/// Parse the serde settings attached to a struct.
pub(crate) fn serde_container(attrs: &[Attribute]) -> syn::Result<SerdeContainer> {
    let mut out = SerdeContainer::default();
    for_each_serde_meta(attrs, |meta| {
        if meta.path.is_ident("rename_all") {
            if meta.input.peek(Token![=]) {
                let value = meta.value()?.parse::<LitStr>()?;
                out.rename_all = Some(SerdeRenameAll::parse(&value)?);
                return Ok(());
            }
            return meta.parse_nested_meta(|nested| {
                if nested.path.is_ident("deserialize") {
                    let value = nested.value()?.parse::<LitStr>()?;
                    out.rename_all = Some(SerdeRenameAll::parse(&value)?);
                    return Ok(());
                }
                super::discard_unknown(&nested)
            });
        }
        if meta.path.is_ident("default") {
            out.default = true;
            return parse_default(meta);
        }
        super::discard_unknown(meta)
    })?;
    Ok(out)
}

/// Parse the serde settings attached to a field.
pub(crate) fn serde_field(attrs: &[Attribute]) -> syn::Result<SerdeField> {
    let mut out = SerdeField::default();
    for_each_serde_meta(attrs, |meta| {
        if meta.path.is_ident("rename") {
            return parse_rename(meta, &mut out.rename);
        }
        if meta.path.is_ident("default") {
            out.default = true;
            return parse_default(meta);
        }
        if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
            out.skip = true;
            return Ok(());
        }
        if meta.path.is_ident("flatten") {
            return Err(meta.error(
                "Schema does not support #[serde(flatten)]; mark the field type with #[schema(subconfig)] instead",
            ));
        }
        super::discard_unknown(meta)
    })?;
    Ok(out)
}

/// Parse `rename = "..."` or `rename(deserialize = "...")`.
fn parse_rename(meta: &ParseNestedMeta, rename: &mut Option<String>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let value = meta.value()?.parse::<LitStr>()?;
        *rename = Some(value.value());
        return Ok(());
    }
    if !meta.input.peek(syn::token::Paren) {
        return Ok(());
    }
    meta.parse_nested_meta(|nested| {
        if !nested.path.is_ident("deserialize") {
            return super::discard_unknown(&nested);
        }
        let value = nested.value()?.parse::<LitStr>()?;
        *rename = Some(value.value());
        Ok(())
    })
}
