//! Input parsing for the `Schema` derive macro.
//!
//! Gathers the struct identifier, its deserializable fields, and attribute
//! metadata in one pass so expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields, Ident, Type};

use super::{
    FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs, serde_container, serde_field,
};

/// One deserializable field of the input struct.
pub(crate) struct SchemaField {
    /// Key serde expects for this field.
    pub key: String,
    pub ty: Type,
    pub attrs: FieldAttrs,
    /// `#[serde(default)]` on the field or its container.
    pub serde_default: bool,
}

/// Parsed derive input.
pub(crate) struct SchemaInput {
    pub ident: Ident,
    pub attrs: StructAttrs,
    pub fields: Vec<SchemaField>,
}

/// Gathers information from the user-provided struct.
///
/// Fields skipped by serde are left out, since the validation engine never
/// reads them.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<SchemaInput> {
    let ident = input.ident.clone();
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Schema cannot be derived for generic structs",
        ));
    }
    let attrs = parse_struct_attrs(&input.attrs)?;
    let container = serde_container(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Schema requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Schema can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let serde = serde_field(&field.attrs)?;
        if serde.skip {
            continue;
        }
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let raw_name = field_ident.to_string();
        let name = raw_name
            .strip_prefix("r#")
            .map_or_else(|| raw_name.clone(), str::to_owned);
        let key = serde.rename.unwrap_or_else(|| {
            container
                .rename_all
                .map_or_else(|| name.clone(), |rule| rule.apply(&name))
        });
        fields.push(SchemaField {
            key,
            ty: field.ty.clone(),
            attrs: parse_field_attrs(field)?,
            serde_default: serde.default || container.default,
        });
    }
    Ok(SchemaInput {
        ident,
        attrs,
        fields,
    })
}
