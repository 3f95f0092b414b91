use std::fmt;

use crate::convert::FromEnvStr;
use crate::error::{CastError, EnvError, EnvResult};
use crate::source::EnvSource;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Environment,
    Default,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Environment => f.write_str("environment"),
            Origin::Default => f.write_str("default"),
        }
    }
}

/// Looks `name` up in `source` and converts it to `T`.
///
/// An absent variable yields `default`. A present variable always goes
/// through the converter, even when empty, so `""` is a valid `String`
/// but a conversion failure for every other kind.
pub fn resolve<S, T>(
    source: &S,
    name: &str,
    default: T,
) -> EnvResult<(T, Origin)>
where
    S: EnvSource + ?Sized,
    T: FromEnvStr,
{
    let Some(raw) = source.lookup(name) else {
        return Ok((default, Origin::Default));
    };
    let fail = |e| EnvError::conversion(name, T::TYPE_NAME, e);
    let raw = raw
        .into_string()
        .map_err(|os| fail(CastError::NotUnicode(os)))?;
    let value = T::from_env_str(&raw).map_err(fail)?;
    Ok((value, Origin::Environment))
}

pub fn value<S, T>(source: &S, name: &str, default: T) -> EnvResult<T>
where
    S: EnvSource + ?Sized,
    T: FromEnvStr,
{
    resolve(source, name, default).map(|(v, _)| v)
}

/// Resolves like [`resolve`] and writes the result into `dest`.
/// `dest` is left untouched when conversion fails.
pub fn assign<S, T>(
    source: &S,
    dest: &mut T,
    name: &str,
    default: T,
) -> EnvResult<Origin>
where
    S: EnvSource + ?Sized,
    T: FromEnvStr,
{
    let (v, origin) = resolve(source, name, default)?;
    *dest = v;
    Ok(origin)
}
