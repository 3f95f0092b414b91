use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use envbind::{CastError, FromEnvStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Int,
    Int64,
    Uint,
    Uint64,
    Float64,
    Bool,
    Duration,
}

impl Kind {
    pub const ALL: [Kind; 8] = [
        Kind::String,
        Kind::Int,
        Kind::Int64,
        Kind::Uint,
        Kind::Uint64,
        Kind::Float64,
        Kind::Bool,
        Kind::Duration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint64 => "uint64",
            Kind::Float64 => "float64",
            Kind::Bool => "bool",
            Kind::Duration => "duration",
        }
    }

    /// Value used when a declaration has no explicit default.
    pub fn zero(&self) -> Value {
        match self {
            Kind::String => Value::String(String::new()),
            Kind::Int => Value::Int(0),
            Kind::Int64 => Value::Int64(0),
            Kind::Uint => Value::Uint(0),
            Kind::Uint64 => Value::Uint64(0),
            Kind::Float64 => Value::Float64(0.0),
            Kind::Bool => Value::Bool(false),
            Kind::Duration => Value::Duration(Duration::ZERO),
        }
    }

    /// Converts `raw` with the same rules applied to the environment.
    pub fn parse_value(&self, raw: &str) -> Result<Value, CastError> {
        Ok(match self {
            Kind::String => Value::String(String::from_env_str(raw)?),
            Kind::Int => Value::Int(isize::from_env_str(raw)?),
            Kind::Int64 => Value::Int64(i64::from_env_str(raw)?),
            Kind::Uint => Value::Uint(usize::from_env_str(raw)?),
            Kind::Uint64 => Value::Uint64(u64::from_env_str(raw)?),
            Kind::Float64 => Value::Float64(f64::from_env_str(raw)?),
            Kind::Bool => Value::Bool(bool::from_env_str(raw)?),
            Kind::Duration => Value::Duration(Duration::from_env_str(raw)?),
        })
    }
}

impl FromStr for Kind {
    type Err = DeclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DeclError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed value of one of the supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(isize),
    Int64(i64),
    Uint(usize),
    Uint64(u64),
    Float64(f64),
    Bool(bool),
    Duration(Duration),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Int64(_) => Kind::Int64,
            Value::Uint(_) => Kind::Uint,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float64(_) => Kind::Float64,
            Value::Bool(_) => Kind::Bool,
            Value::Duration(_) => Kind::Duration,
        }
    }
}

/// Renders values in the literal form the environment accepts, so a
/// duration prints as its nanosecond count.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(v) => f.write_str(v),
            Value::Int(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Uint64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Duration(v) => write!(f, "{}", v.as_nanos()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeclError {
    #[error("expected NAME:KIND[=DEFAULT], got {0:?}")]
    Malformed(String),
    #[error("variable name cannot be empty")]
    EmptyName,
    #[error("unknown kind {0:?}, expected one of string, int, int64, uint, uint64, float64, bool, duration")]
    UnknownKind(String),
    #[error("invalid default for {name} ({kind}): {source}")]
    InvalidDefault {
        name: String,
        kind: Kind,
        source: CastError,
    },
}

/// A variable declaration given on the command line:
/// `NAME:KIND` or `NAME:KIND=DEFAULT`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub default: Value,
}

impl VarDecl {
    pub fn kind(&self) -> Kind {
        self.default.kind()
    }
}

impl FromStr for VarDecl {
    type Err = DeclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = s
            .split_once(':')
            .ok_or_else(|| DeclError::Malformed(s.to_string()))?;
        if name.is_empty() {
            return Err(DeclError::EmptyName);
        }
        let (kind, default) = match rest.split_once('=') {
            Some((kind, default)) => (kind.parse::<Kind>()?, Some(default)),
            None => (rest.parse::<Kind>()?, None),
        };
        let default = match default {
            Some(raw) => kind.parse_value(raw).map_err(|source| {
                DeclError::InvalidDefault {
                    name: name.to_string(),
                    kind,
                    source,
                }
            })?,
            None => kind.zero(),
        };
        Ok(VarDecl {
            name: name.to_string(),
            default,
        })
    }
}
