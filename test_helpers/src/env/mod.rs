//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation happens under a global re-entrant mutex and returns an RAII
//! guard that restores the previous value (or removes the variable) on drop.
//! [`EnvScope`] keeps the lock for its whole lifetime, which is what tests
//! that redirect `HOME` need: the resolver reads `HOME` lazily, so no other
//! test may touch it until the scope ends.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _scope = env::home_scope("/tmp/fake-home");
//! assert_eq!(std::env::var("HOME").as_deref(), Ok("/tmp/fake-home"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Variables consulted when looking up the home directory.
pub const HOME_VARS: [&str; 2] = ["HOME", "USERPROFILE"];

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
            // SAFETY: `ENV_MUTEX` is held for the mutation.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held for the mutation.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Holds the global environment lock; mutations made through it do not
/// re-acquire the mutex.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets `key` to `value` while the lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        let key = key.into();
        let original = env::var_os(&key);
        // SAFETY: the caller holds `ENV_MUTEX` through `self`.
        unsafe { env::set_var(&key, value.as_ref()) };
        EnvVarGuard { key, original }
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        let key = key.into();
        let original = env::var_os(&key);
        // SAFETY: the caller holds `ENV_MUTEX` through `self`.
        unsafe { env::remove_var(&key) };
        EnvVarGuard { key, original }
    }
}

/// Keeps the environment lock and a set of guards alive together.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    lock: EnvVarLock,
}

impl EnvScope {
    /// Runs `builder` with the lock held and keeps the returned guards.
    pub fn new_with<F>(builder: F) -> Self
    where
        F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
    {
        let lock = lock();
        let guards = builder(&lock);
        Self { guards, lock }
    }

    /// Sets another variable inside the scope.
    pub fn set_var<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        let guard = self.lock.set_var(key, value);
        self.guards.push(guard);
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore in reverse order while the lock is still held.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
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

/// Acquires the global environment lock.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Sets an environment variable, returning a restoring guard.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Removes an environment variable, returning a restoring guard.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Points the home directory at `home` for the lifetime of the scope.
///
/// `HOME` is set and `USERPROFILE` removed so that every lookup order agrees.
pub fn home_scope(home: impl AsRef<OsStr>) -> EnvScope {
    EnvScope::new_with(|lock| {
        vec![
            lock.set_var("HOME", home.as_ref()),
            lock.remove_var("USERPROFILE"),
        ]
    })
}

/// Removes every home-directory variable for the lifetime of the scope.
pub fn without_home() -> EnvScope {
    EnvScope::new_with(|lock| HOME_VARS.iter().map(|key| lock.remove_var(*key)).collect())
}
