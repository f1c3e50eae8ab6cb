//! Container, tuple and mapping fields.
//!
//! The decoder only parses the outer document; element types are coerced and
//! validated by serde when the instance is built.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Debug;

use anyhow::{Result, anyhow, ensure};
use nest_config::{ConfigError, FieldType, JsonLike, Schema, Shape};
use rstest::rstest;
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Deserialize)]
struct Holder<T> {
    x: T,
}

impl<T: FieldType + DeserializeOwned> Schema for Holder<T> {
    fn name() -> &'static str {
        "Holder"
    }

    fn fields() -> Vec<nest_config::Field> {
        vec![nest_config::Field::new("x", T::shape())]
    }
}

fn load<T>(raw: &str) -> Result<T, ConfigError>
where
    T: FieldType + DeserializeOwned,
{
    let source = [("X", raw)];
    nest_config::new::<Holder<T>>(&source, "", &JsonLike).map(|holder| holder.x)
}

fn check<T>(raw: &str, expected: &T) -> Result<()>
where
    T: FieldType + DeserializeOwned + PartialEq + Debug,
{
    let actual = load::<T>(raw)?;
    ensure!(&actual == expected, "{raw}: expected {expected:?}, got {actual:?}");
    Ok(())
}

#[rstest]
#[case(r#"["ab","cd"]"#, vec!["ab", "cd"])]
#[case(r#"["x", "y"]"#, vec!["x", "y"])]
#[case("[]", vec![])]
fn decodes_string_sequences(#[case] raw: &str, #[case] expected: Vec<&str>) -> Result<()> {
    let expected: Vec<String> = expected.into_iter().map(String::from).collect();
    check(raw, &expected)
}

#[test]
fn decodes_nested_sequences() -> Result<()> {
    check("[[1],[2]]", &vec![vec![1_i64], vec![2]])?;
    check(r#"[["a"],["b"]]"#, &vec![vec![String::from("a")], vec![String::from("b")]])
}

#[test]
fn decodes_sets() -> Result<()> {
    check(r#"["a","b","a"]"#, &HashSet::from([String::from("a"), String::from("b")]))?;
    check("[2, 1]", &BTreeSet::from([1_u32, 2]))?;
    check(r#"[["a"],["b"]]"#, &BTreeSet::from([
        BTreeSet::from([String::from("a")]),
        BTreeSet::from([String::from("b")]),
    ]))
}

#[test]
fn decodes_tuples() -> Result<()> {
    check(r#"[1, "b"]"#, &(1_i32, String::from("b")))?;
    check(r#"["a"]"#, &(String::from("a"),))?;
    check("[[1, 2],[3,4]]", &((1_u8, 2_u8), (3_u8, 4_u8)))?;
    check("[1, 2, 3]", &vec![1_i32, 2, 3].into_boxed_slice())?;
    check("[[1, 3, 5],[2, 4]]", &vec![
        vec![1_i32, 3, 5].into_boxed_slice(),
        vec![2, 4].into_boxed_slice(),
    ]
    .into_boxed_slice())?;
    check("[7, 8]", &[7_u16, 8])
}

#[test]
fn decodes_mappings() -> Result<()> {
    check(r#"{"a":"b"}"#, &HashMap::from([(String::from("a"), String::from("b"))]))?;
    check(r#"{"1":2}"#, &BTreeMap::from([(1_i64, 2_i64)]))?;
    check(r#"{"1":[2,3]}"#, &HashMap::from([(1_i64, vec![2_i64, 3])]))?;
    check(
        r#"{"a":{"b":1}}"#,
        &BTreeMap::from([(String::from("a"), BTreeMap::from([(String::from("b"), 1_u8)]))]),
    )
}

#[test]
fn accepts_superset_booleans_inside_documents() -> Result<()> {
    check("[T, f, True, FALSE]", &vec![true, false, true, false])
}

#[test]
fn untyped_values_keep_document_structure() -> Result<()> {
    check(r#"[1, "b", null]"#, &serde_json::json!([1, "b", null]))
}

#[rstest]
#[case::element_type(r#"[1, "b"]"#)]
#[case::element_range("[1, 300]")]
fn element_types_are_checked_by_validation(#[case] raw: &str) -> Result<()> {
    match load::<Vec<u8>>(raw) {
        Err(ConfigError::Validation { .. }) => Ok(()),
        other => Err(anyhow!("expected a validation error, got {other:?}")),
    }
}

#[test]
fn malformed_documents_fail_conversion() -> Result<()> {
    let Err(ConfigError::Conversion(err)) = load::<Vec<i32>>("[1, 2") else {
        return Err(anyhow!("expected a conversion error"));
    };
    ensure!(err.value() == "[1, 2");
    ensure!(*err.target() == Shape::sequence(Shape::integer()));
    Ok(())
}
