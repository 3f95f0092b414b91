//! Immediate lookups against the process environment.
//!
//! Each call reads the environment at call time and keeps no state. Use
//! [`Registry`](crate::Registry) when declarations have to be made before
//! the environment is final.

use std::time::Duration;

use crate::cast;
use crate::convert::FromEnvStr;
use crate::error::EnvResult;
use crate::source::SystemEnv;

pub fn get<T: FromEnvStr>(name: &str, default: T) -> EnvResult<T> {
    cast::value(&SystemEnv, name, default)
}

/// Like [`get`], but a misconfigured variable panics with the conversion
/// error instead of being returned.
pub fn must<T: FromEnvStr>(name: &str, default: T) -> T {
    match get(name, default) {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

/// A variable set to `""` yields `""`, not `default`.
pub fn string(name: &str, default: impl Into<String>) -> EnvResult<String> {
    get(name, default.into())
}

pub fn int(name: &str, default: isize) -> EnvResult<isize> {
    get(name, default)
}

pub fn int64(name: &str, default: i64) -> EnvResult<i64> {
    get(name, default)
}

pub fn uint(name: &str, default: usize) -> EnvResult<usize> {
    get(name, default)
}

pub fn uint64(name: &str, default: u64) -> EnvResult<u64> {
    get(name, default)
}

pub fn float64(name: &str, default: f64) -> EnvResult<f64> {
    get(name, default)
}

pub fn boolean(name: &str, default: bool) -> EnvResult<bool> {
    get(name, default)
}

/// Reads a raw nanosecond count, e.g. `5000000000` for five seconds.
pub fn duration(name: &str, default: Duration) -> EnvResult<Duration> {
    get(name, default)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Names are unique to this module and never set, so these run against
    // the real environment without guards.
    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(string("ENVBIND_ACC_UNSET_STR", "x").unwrap(), "x");
        assert_eq!(int("ENVBIND_ACC_UNSET_INT", -3).unwrap(), -3);
        assert_eq!(int64("ENVBIND_ACC_UNSET_I64", 1 << 40).unwrap(), 1 << 40);
        assert_eq!(uint("ENVBIND_ACC_UNSET_UINT", 7).unwrap(), 7);
        assert_eq!(uint64("ENVBIND_ACC_UNSET_U64", 9).unwrap(), 9);
        assert_eq!(float64("ENVBIND_ACC_UNSET_F64", 2.5).unwrap(), 2.5);
        assert!(boolean("ENVBIND_ACC_UNSET_BOOL", true).unwrap());
        assert_eq!(
            duration("ENVBIND_ACC_UNSET_DUR", Duration::from_secs(1)).unwrap(),
            Duration::from_secs(1)
        );
        assert_eq!(must("ENVBIND_ACC_UNSET_MUST", 42u32), 42);
    }
}
