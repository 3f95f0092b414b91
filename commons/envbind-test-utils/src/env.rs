//! Process environment helpers for tests.
//!
//! Every change goes through an [`EnvGuard`] that puts the previous state
//! back when dropped, including "was not set at all". The process
//! environment is shared, so tests using these should run serially.

use std::ffi::{OsStr, OsString};

/// Restores one variable to its captured state on drop.
pub struct EnvGuard {
    key: String,
    prev: Option<OsString>,
}

impl EnvGuard {
    fn capture(key: &str) -> Self {
        Self {
            key: key.to_string(),
            prev: std::env::var_os(key),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value the variable had before the guard was taken.
    pub fn previous(&self) -> Option<&OsStr> {
        self.prev.as_deref()
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.prev {
                Some(v) => std::env::set_var(&self.key, v),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}

pub fn set_guarded(key: &str, val: impl AsRef<OsStr>) -> EnvGuard {
    let guard = EnvGuard::capture(key);
    unsafe { std::env::set_var(key, val) }
    guard
}

pub fn unset_guarded(key: &str) -> EnvGuard {
    let guard = EnvGuard::capture(key);
    unsafe { std::env::remove_var(key) }
    guard
}

/// A batch of guards. Dropping restores keys in reverse order, so a key
/// touched twice ends up with its original value.
#[derive(Default)]
pub struct Env {
    guards: Vec<EnvGuard>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, val: impl AsRef<OsStr>) -> Self {
        self.guards.push(set_guarded(key, val));
        self
    }

    pub fn unset(mut self, key: &str) -> Self {
        self.guards.push(unset_guarded(key));
        self
    }

    pub fn extend<'a, I>(mut self, kvs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (k, v) in kvs {
            self.guards.push(set_guarded(k, v));
        }
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.guards.iter().map(EnvGuard::key)
    }
}

impl Drop for Env {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_absent_and_previous_values() {
        let key = "ENVBIND_TEST_UTILS_GUARD";
        {
            let g = set_guarded(key, "first");
            assert_eq!(g.previous(), None);
            assert_eq!(std::env::var(key).unwrap(), "first");
            {
                let inner = set_guarded(key, "second");
                assert_eq!(inner.previous(), Some(OsStr::new("first")));
            }
            assert_eq!(std::env::var(key).unwrap(), "first");
        }
        assert!(std::env::var_os(key).is_none());
    }

    #[test]
    fn env_batch_restores_in_reverse_order() {
        let key = "ENVBIND_TEST_UTILS_BATCH";
        {
            let env = Env::new()
                .set(key, "a")
                .set(key, "b")
                .extend([("ENVBIND_TEST_UTILS_OTHER", "x")]);
            assert_eq!(std::env::var(key).unwrap(), "b");
            assert_eq!(env.keys().count(), 3);
        }
        assert!(std::env::var_os(key).is_none());
        assert!(std::env::var_os("ENVBIND_TEST_UTILS_OTHER").is_none());
    }

    #[test]
    fn unset_is_restored() {
        let key = "ENVBIND_TEST_UTILS_UNSET";
        let _outer = set_guarded(key, "kept");
        {
            let _env = Env::new().unset(key);
            assert!(std::env::var_os(key).is_none());
        }
        assert_eq!(std::env::var(key).unwrap(), "kept");
    }
}
