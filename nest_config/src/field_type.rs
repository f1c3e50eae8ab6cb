//! Mapping from Rust types to [`Shape`] descriptors.
//!
//! `#[derive(Schema)]` asks each field type for its shape through
//! [`FieldType`]. Standard library containers and scalars are covered here;
//! derived schemas implement it themselves, reporting [`Shape::Nested`] only
//! when marked with `#[schema(subconfig)]`.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::BuildHasher;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::num::{NonZeroI64, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroUsize};
use std::path::PathBuf;

use crate::scalar::{Bytes, Secret};
use crate::shape::Shape;

/// Describes how a field of this type is decoded.
pub trait FieldType {
    /// Whether an absent key is acceptable without an explicit default.
    ///
    /// `Option<T>` sets this so missing keys deserialize to `None`.
    /// An optional sub-schema is read from a single key as a structured
    /// document rather than materialized recursively, so it too can be
    /// absent.
    const OPTIONAL: bool = false;

    /// Shape descriptor for this type.
    fn shape() -> Shape;
}

/// Marks a hand-written [`Schema`](crate::Schema) implementation as a
/// sub-schema.
///
/// Fields of a marked type are materialized recursively, with keys prefixed
/// by the parent field's name, rather than decoded from a single value.
/// Derived schemas use `#[schema(subconfig)]` instead.
///
/// ```
/// use nest_config::{Field, Schema, Shape, sub_schema};
///
/// #[derive(serde::Deserialize)]
/// struct Db {
///     port: u16,
/// }
///
/// impl Schema for Db {
///     fn name() -> &'static str {
///         "Db"
///     }
///
///     fn fields() -> Vec<Field> {
///         vec![Field::new("port", Shape::integer())]
///     }
/// }
///
/// sub_schema!(Db);
/// ```
#[macro_export]
macro_rules! sub_schema {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FieldType for $ty {
                fn shape() -> $crate::Shape {
                    $crate::Shape::nested::<$ty>()
                }
            }
        )+
    };
}

macro_rules! scalar_field {
    ($ctor:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl FieldType for $ty {
                fn shape() -> Shape {
                    Shape::$ctor()
                }
            }
        )+
    };
}

macro_rules! parsed_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FieldType for $ty {
                fn shape() -> Shape {
                    Shape::parsed::<$ty>()
                }
            }
        )+
    };
}

scalar_field!(text => String, PathBuf);
scalar_field!(bool => bool);
// Integers wider than 64 bits have no `serde_json::Number` form.
scalar_field!(integer => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
scalar_field!(float => f32, f64);
scalar_field!(secret => Secret);
scalar_field!(bytes => Bytes);

parsed_field!(
    char,
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
    SocketAddr,
    SocketAddrV4,
    SocketAddrV6,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroUsize,
    NonZeroI64,
);

impl FieldType for serde_json::Value {
    fn shape() -> Shape {
        Shape::Structure("Value")
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const OPTIONAL: bool = true;

    fn shape() -> Shape {
        match T::shape() {
            Shape::Nested(schema) => Shape::Structure(schema.name()),
            shape => shape,
        }
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }
}

impl<T: FieldType> FieldType for VecDeque<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }
}

impl<T: FieldType> FieldType for Box<[T]> {
    fn shape() -> Shape {
        Shape::VariableTuple(Box::new(T::shape()))
    }
}

impl<T: FieldType, const N: usize> FieldType for [T; N] {
    fn shape() -> Shape {
        Shape::FixedTuple(std::iter::repeat_with(T::shape).take(N).collect())
    }
}

impl<T: FieldType, S: BuildHasher> FieldType for HashSet<T, S> {
    fn shape() -> Shape {
        Shape::Set(Box::new(T::shape()))
    }
}

/// Ordered sets are treated as immutable sets.
impl<T: FieldType> FieldType for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::FrozenSet(Box::new(T::shape()))
    }
}

impl<K: FieldType, V: FieldType, S: BuildHasher> FieldType for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::mapping(K::shape(), V::shape())
    }
}

impl<K: FieldType, V: FieldType> FieldType for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::mapping(K::shape(), V::shape())
    }
}

macro_rules! tuple_field {
    ($($name:ident),+) => {
        impl<$($name: FieldType),+> FieldType for ($($name,)+) {
            fn shape() -> Shape {
                Shape::FixedTuple(vec![$($name::shape()),+])
            }
        }
    };
}

tuple_field!(A);
tuple_field!(A, B);
tuple_field!(A, B, C);
tuple_field!(A, B, C, D);
tuple_field!(A, B, C, D, E);
tuple_field!(A, B, C, D, E, F);
