//! Key resolution.
//!
//! A [`Prefixer`] maps a field-local name to the fully qualified source key.
//! Prefixers compose across nesting levels: the child of field `db` under
//! prefixer `p` resolves `port` to `p("db_port")`.

use std::fmt;
use std::sync::Arc;

/// Function mapping a local key suffix to its fully qualified source key.
pub type Prefixer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Separator placed between a prefix and the local name.
pub const SEPARATOR: char = '_';

/// Prefix accepted by the loader.
#[derive(Clone)]
pub enum Prefix {
    /// Literal prefix; see [`build_prefixer`] for the key rule.
    Literal(String),
    /// Arbitrary key-naming function, used unchanged.
    Keyed(Prefixer),
}

impl Prefix {
    /// Use `f` to compute every key.
    ///
    /// ```
    /// use nest_config::{Prefix, build_prefixer};
    ///
    /// let prefixer = build_prefixer(Prefix::with(|name| format!("svc.{name}")));
    /// assert_eq!(prefixer("port"), "svc.port");
    /// ```
    #[must_use]
    pub fn with<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Keyed(Arc::new(f))
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Self::Literal(String::new())
    }
}

impl From<&str> for Prefix {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_owned())
    }
}

impl From<String> for Prefix {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<Prefixer> for Prefix {
    fn from(value: Prefixer) -> Self {
        Self::Keyed(value)
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(prefix) => f.debug_tuple("Literal").field(prefix).finish(),
            Self::Keyed(_) => f.write_str("Keyed(..)"),
        }
    }
}

/// Build the key function for `prefix`.
///
/// - A function prefix is returned unchanged.
/// - A non-empty literal loses at most one trailing `_`, then keys become
///   `uppercase(prefix + "_" + name)`.
/// - An empty literal yields `uppercase(name)`.
///
/// No other normalisation is applied.
///
/// ```
/// use nest_config::build_prefixer;
///
/// assert_eq!(build_prefixer("app".into())("db_port"), "APP_DB_PORT");
/// assert_eq!(build_prefixer("APP_".into())("x"), "APP_X");
/// assert_eq!(build_prefixer("".into())("x"), "X");
/// ```
#[must_use]
pub fn build_prefixer(prefix: Prefix) -> Prefixer {
    match prefix {
        Prefix::Keyed(prefixer) => prefixer,
        Prefix::Literal(literal) if literal.is_empty() => Arc::new(|name: &str| name.to_uppercase()),
        Prefix::Literal(literal) => {
            let stem = literal
                .strip_suffix(SEPARATOR)
                .map_or_else(|| literal.clone(), str::to_owned);
            Arc::new(move |name: &str| format!("{stem}{SEPARATOR}{name}").to_uppercase())
        }
    }
}

/// Prefixer for the sub-schema stored in `field` under `parent`.
#[must_use]
pub fn nest(parent: &Prefixer, field: &str) -> Prefixer {
    let outer = Arc::clone(parent);
    let scope = field.to_owned();
    Arc::new(move |name: &str| outer(&format!("{scope}{SEPARATOR}{name}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "X")]
    #[case("P", "P_X")]
    #[case("PREF", "PREF_X")]
    #[case("P_", "P_X")]
    #[case("p", "P_X")]
    #[case("A_B", "A_B_X")]
    #[case("A_B_", "A_B_X")]
    #[case("A_B__", "A_B__X")]
    #[case("_", "_X")]
    #[case("A B", "A B_X")]
    fn resolves_literal_prefixes(#[case] prefix: &str, #[case] key: &str) {
        assert_eq!(build_prefixer(prefix.into())("x"), key);
    }

    #[test]
    fn keyed_prefix_is_used_unchanged() {
        let prefixer = build_prefixer(Prefix::with(|name| format!("cfg:{name}")));
        assert_eq!(prefixer("x"), "cfg:x");
    }

    #[rstest]
    #[case("", "Z_X")]
    #[case("p", "P_Z_X")]
    fn nests_under_parent(#[case] prefix: &str, #[case] key: &str) {
        let parent = build_prefixer(prefix.into());
        assert_eq!(nest(&parent, "z")("x"), key);
    }

    #[test]
    fn nesting_composes_across_levels() {
        let root = build_prefixer("app".into());
        let db = nest(&root, "db");
        let pool = nest(&db, "pool");
        assert_eq!(pool("size"), "APP_DB_POOL_SIZE");
    }

    #[test]
    fn nesting_wraps_keyed_parent() {
        let root = build_prefixer(Prefix::with(|name| format!("svc.{name}")));
        assert_eq!(nest(&root, "db")("port"), "svc.db_port");
    }
}
