use std::fmt;
use std::path::{Path, PathBuf};

use envbind::{
    Binding, EnvError, EnvResult, EnvSource, Origin, Registry, cast,
};
use tracing::info;

use crate::decl::{Value, VarDecl};

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to load env file {path:?}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error(transparent)]
    Env(#[from] EnvError),
}

/// One resolved declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub name: String,
    pub value: Value,
    pub origin: Origin,
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.name, self.value, self.origin)
    }
}

/// Loads `.env` files into the process environment, in order.
///
/// Without `override_existing`, variables that are already set win over
/// file entries, and earlier files win over later ones.
pub fn load_env_files<P: AsRef<Path>>(
    paths: &[P],
    override_existing: bool,
) -> Result<(), ProbeError> {
    for path in paths {
        let path = path.as_ref();
        let loaded = if override_existing {
            dotenvy::from_path_override(path)
        } else {
            dotenvy::from_path(path)
        };
        loaded.map_err(|source| ProbeError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), override_existing, "loaded env file");
    }
    Ok(())
}

struct ProbeVar<'a> {
    decl: &'a VarDecl,
    out: &'a mut Option<Resolved>,
}

impl ProbeVar<'_> {
    fn resolve_value(
        &self,
        source: &dyn EnvSource,
    ) -> EnvResult<(Value, Origin)> {
        let name = self.decl.name.as_str();
        Ok(match &self.decl.default {
            Value::String(d) => {
                let (v, o) = cast::resolve(source, name, d.clone())?;
                (Value::String(v), o)
            }
            Value::Int(d) => {
                let (v, o) = cast::resolve(source, name, *d)?;
                (Value::Int(v), o)
            }
            Value::Int64(d) => {
                let (v, o) = cast::resolve(source, name, *d)?;
                (Value::Int64(v), o)
            }
            Value::Uint(d) => {
                let (v, o) = cast::resolve(source, name, *d)?;
                (Value::Uint(v), o)
            }
            Value::Uint64(d) => {
                let (v, o) = cast::resolve(source, name, *d)?;
                (Value::Uint64(v), o)
            }
            Value::Float64(d) => {
                let (v, o) = cast::resolve(source, name, *d)?;
                (Value::Float64(v), o)
            }
            Value::Bool(d) => {
                let (v, o) = cast::resolve(source, name, *d)?;
                (Value::Bool(v), o)
            }
            Value::Duration(d) => {
                let (v, o) = cast::resolve(source, name, *d)?;
                (Value::Duration(v), o)
            }
        })
    }
}

impl Binding for ProbeVar<'_> {
    fn name(&self) -> &str {
        &self.decl.name
    }

    fn type_name(&self) -> &'static str {
        self.decl.kind().as_str()
    }

    fn default_repr(&self) -> String {
        self.decl.default.to_string()
    }

    fn resolve(&mut self, source: &dyn EnvSource) -> EnvResult<Origin> {
        let (value, origin) = self.resolve_value(source)?;
        *self.out = Some(Resolved {
            name: self.decl.name.clone(),
            value,
            origin,
        });
        Ok(origin)
    }
}

/// Resolves every declaration against `source`, in declaration order.
pub fn probe<S: EnvSource>(
    source: S,
    decls: &[VarDecl],
) -> Result<Vec<Resolved>, ProbeError> {
    let mut slots: Vec<Option<Resolved>> = vec![None; decls.len()];
    let mut registry = Registry::with_source(source);
    for (decl, out) in decls.iter().zip(slots.iter_mut()) {
        registry.push(ProbeVar { decl, out });
    }
    registry.parse()?;
    drop(registry);
    Ok(slots.into_iter().flatten().collect())
}
