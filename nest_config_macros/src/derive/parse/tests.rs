//! Tests for derive input and attribute parsing.

use super::parse_input;
use anyhow::{Result, anyhow, ensure};
use quote::ToTokens;
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

fn keys(input: &DeriveInput) -> Result<Vec<String>> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err))?;
    Ok(parsed.fields.into_iter().map(|field| field.key).collect())
}

#[test]
fn parses_subconfig_marker_and_crate_path() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[schema(subconfig, crate = "deps::nest_config")]
        struct Db {
            port: u16,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(parsed.attrs.subconfig, "subconfig flag not recorded");
    let path = parsed
        .attrs
        .crate_path
        .ok_or_else(|| anyhow!("missing crate path"))?;
    ensure!(path.to_token_stream().to_string() == "deps :: nest_config");
    Ok(())
}

#[test]
fn subconfig_accepts_explicit_false() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[schema(subconfig = false)]
        struct Db {
            port: u16,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(!parsed.attrs.subconfig);
    Ok(())
}

#[rstest]
#[case::plain(parse_quote! { struct S { db_port: u16 } }, &["db_port"])]
#[case::rename(parse_quote! { struct S { #[serde(rename = "port")] db_port: u16 } }, &["port"])]
#[case::rename_deserialize(
    parse_quote! { struct S { #[serde(rename(serialize = "a", deserialize = "b"))] x: u16 } },
    &["b"]
)]
#[case::rename_all(
    parse_quote! { #[serde(rename_all = "camelCase")] struct S { db_port: u16 } },
    &["dbPort"]
)]
#[case::raw_ident(parse_quote! { struct S { r#type: String } }, &["type"])]
#[case::skip(
    parse_quote! { struct S { #[serde(skip)] cache: u8, #[serde(skip_deserializing)] x: u8, y: u8 } },
    &["y"]
)]
fn computes_serde_keys(#[case] input: DeriveInput, #[case] expected: &[&str]) -> Result<()> {
    let actual = keys(&input)?;
    ensure!(actual == expected, "expected {expected:?}, got {actual:?}");
    Ok(())
}

#[rstest]
#[case::field(parse_quote! { struct S { #[serde(default)] x: u8 } }, true)]
#[case::field_path(parse_quote! { struct S { #[serde(default = "five")] x: u8 } }, true)]
#[case::container(parse_quote! { #[serde(default)] struct S { x: u8 } }, true)]
#[case::none(parse_quote! { struct S { #[serde(alias = "y")] x: u8 } }, false)]
fn records_serde_defaults(#[case] input: DeriveInput, #[case] expected: bool) -> Result<()> {
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let field = parsed
        .fields
        .first()
        .ok_or_else(|| anyhow!("missing field"))?;
    ensure!(field.serde_default == expected);
    Ok(())
}

#[test]
fn parses_field_shape_overrides() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct S {
            #[schema(shape = nest_config::Shape::bytes())]
            raw: Vec<u8>,
            #[schema(from_str)]
            amount: Decimal,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let [raw, amount] = parsed.fields.as_slice() else {
        return Err(anyhow!("expected two fields"));
    };
    ensure!(raw.attrs.shape.is_some() && !raw.attrs.from_str);
    ensure!(amount.attrs.from_str && amount.attrs.shape.is_none());
    Ok(())
}

#[rstest]
#[case::unknown_struct_key(parse_quote! { #[schema(sub_config)] struct S { x: u8 } })]
#[case::unknown_field_key(parse_quote! { struct S { #[schema(nested)] x: u8 } })]
#[case::conflicting(parse_quote! { struct S { #[schema(from_str, shape = f())] x: u8 } })]
#[case::tuple_struct(parse_quote! { struct S(u8); })]
#[case::enum_input(parse_quote! { enum E { A } })]
#[case::generic(parse_quote! { struct S<T> { x: T } })]
#[case::bad_rename_all(parse_quote! { #[serde(rename_all = "Title Case")] struct S { x: u8 } })]
#[case::flatten(parse_quote! { struct S { #[serde(flatten)] db: Db } })]
fn rejects_invalid_input(#[case] input: DeriveInput) {
    assert!(parse_input(&input).is_err());
}

#[test]
fn flatten_error_suggests_subconfig() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct S {
            name: String,
            #[serde(default, flatten)]
            db: Db,
        }
    };
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("flattened field accepted"));
    };
    ensure!(err.to_string().contains("#[schema(subconfig)]"), "{err}");
    Ok(())
}

#[rstest]
#[case(parse_quote!(Option<u8>), Some("u8"))]
#[case(parse_quote!(std::option::Option<Vec<String>>), Some("Vec < String >"))]
#[case(parse_quote!(Vec<u8>), None)]
#[case(parse_quote!((u8, u8)), None)]
fn detects_option_types(#[case] ty: syn::Type, #[case] expected: Option<&str>) {
    let inner = super::option_inner(&ty).map(|inner| inner.to_token_stream().to_string());
    assert_eq!(inner.as_deref(), expected);
}
