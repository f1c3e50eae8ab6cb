//! Read-only key/value sources.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Flat, read-only mapping from string keys to raw string values.
///
/// The materializer only ever reads through this trait; it never mutates
/// or copies the underlying data.
pub trait Source {
    /// Raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Cow<'_, str>>;
}

/// Process environment variables.
///
/// Values that are not valid Unicode are read lossily, with invalid
/// sequences replaced by U+FFFD, so a set variable is never mistaken for an
/// absent one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Env;

impl Source for Env {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        std::env::var_os(key).map(|value| Cow::Owned(value.to_string_lossy().into_owned()))
    }
}

impl<S: BuildHasher> Source for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        Self::get(self, key).map(|value| Cow::Borrowed(value.as_str()))
    }
}

impl<S: BuildHasher> Source for HashMap<&str, &str, S> {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        Self::get(self, key).map(|value| Cow::Borrowed(*value))
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        Self::get(self, key).map(|value| Cow::Borrowed(value.as_str()))
    }
}

impl Source for BTreeMap<&str, &str> {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        Self::get(self, key).map(|value| Cow::Borrowed(*value))
    }
}

/// Slices of pairs; the first matching entry wins.
impl Source for [(&str, &str)] {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        self.iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| Cow::Borrowed(*value))
    }
}

impl<const N: usize> Source for [(&str, &str); N] {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        Source::get(self.as_slice(), key)
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        T::get(self, key)
    }
}
