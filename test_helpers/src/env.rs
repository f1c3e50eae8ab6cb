//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation is serialised through a global re-entrant mutex and returns
//! an RAII guard that restores the previous state when dropped, removing the
//! variable if it was previously absent. [`EnvScope`] keeps the lock for its
//! whole lifetime, so a test can set several keys and materialize
//! configuration without another test interleaving.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _scope = env::scope([("APP_DB_PORT", Some("32")), ("APP_DEBUG", None)]);
//! assert_eq!(std::env::var("APP_DB_PORT").as_deref(), Ok("32"));
//! assert!(std::env::var("APP_DEBUG").is_err());
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held during restoration.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held during restoration.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

fn mutate(key: String, value: Option<&OsStr>) -> EnvVarGuard {
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    match value {
        // SAFETY: `ENV_MUTEX` is held for the mutation.
        Some(value) => unsafe { env::set_var(&key, value) },
        // SAFETY: `ENV_MUTEX` is held for the mutation.
        None => unsafe { env::remove_var(&key) },
    }
    EnvVarGuard { key, original }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
/// let _g = env::set_var("FOO", "bar");
/// assert!(matches!(std::env::var("FOO"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    mutate(key.into(), Some(value.as_ref()))
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
/// let _g = env::remove_var("FOO");
/// assert!(std::env::var("FOO").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    mutate(key.into(), None)
}

/// Holds the environment lock while retaining guards for several keys.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Lock the environment, then set (`Some`) or remove (`None`) each key.
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        let lock = ENV_MUTEX.lock();
        let guards = vars
            .into_iter()
            .map(|(key, value)| mutate(key.into(), value.as_ref().map(OsStr::new)))
            .collect();
        Self {
            guards,
            _lock: lock,
        }
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

/// Shorthand for [`EnvScope::new`].
pub fn scope<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    EnvScope::new(vars)
}
