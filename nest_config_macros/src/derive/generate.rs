//! Code generation for the `Schema` derive.
//!
//! Emits the `Schema` implementation (name and field descriptors) and the
//! `FieldType` implementation that decides whether the struct is recursed
//! into as a sub-schema or decoded as a single structured value.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive::parse::{SchemaField, SchemaInput, option_inner};

/// Build the shape expression for one field.
fn field_shape(field: &SchemaField, krate: &TokenStream) -> TokenStream {
    let ty = &field.ty;
    if let Some(shape) = &field.attrs.shape {
        return quote! { #shape };
    }
    if field.attrs.from_str {
        let parsed_ty = option_inner(ty).unwrap_or(ty);
        return quote! { #krate::Shape::parsed::<#parsed_ty>() };
    }
    quote! { <#ty as #krate::FieldType>::shape() }
}

/// Build the expression deciding whether an absent key is left to serde.
///
/// With an explicit shape the field type need not implement `FieldType`, so
/// optionality falls back to recognising `Option<T>` syntactically.
fn field_deferred(field: &SchemaField, krate: &TokenStream) -> TokenStream {
    let ty = &field.ty;
    let serde_default = field.serde_default;
    if field.attrs.shape.is_some() || field.attrs.from_str {
        let optional = option_inner(ty).is_some();
        return quote! { #serde_default || #optional };
    }
    quote! { #serde_default || <#ty as #krate::FieldType>::OPTIONAL }
}

fn field_descriptor(field: &SchemaField, krate: &TokenStream) -> TokenStream {
    let key = &field.key;
    let shape = field_shape(field, krate);
    let deferred = field_deferred(field, krate);
    quote! {
        {
            let field = #krate::Field::new(#key, #shape);
            if #deferred { field.deferred() } else { field }
        }
    }
}

/// Emit the `Schema` and `FieldType` implementations for `input`.
pub(crate) fn schema_impls(input: &SchemaInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let name = ident.to_string();
    let descriptors = input.fields.iter().map(|field| field_descriptor(field, krate));
    let shape = if input.attrs.subconfig {
        quote! { #krate::Shape::nested::<Self>() }
    } else {
        quote! { #krate::Shape::Structure(#name) }
    };

    quote! {
        impl #krate::Schema for #ident {
            fn name() -> &'static str {
                #name
            }

            fn fields() -> ::std::vec::Vec<#krate::Field> {
                ::std::vec![#(#descriptors),*]
            }
        }

        impl #krate::FieldType for #ident {
            fn shape() -> #krate::Shape {
                #shape
            }
        }
    }
}
