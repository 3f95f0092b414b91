use std::ffi::OsString;
use std::num::{ParseFloatError, ParseIntError};

/// Why a raw environment value could not be turned into the target type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CastError {
    #[error("{0}")]
    Int(#[from] ParseIntError),
    #[error("{0}")]
    Float(#[from] ParseFloatError),
    #[error("unexpected sign in unsigned value {0:?}")]
    UnexpectedSign(String),
    #[error("value out of range: {0:?}")]
    FloatOutOfRange(String),
    #[error("invalid boolean literal {0:?}")]
    Bool(String),
    #[error("negative duration: {0}ns")]
    NegativeDuration(i64),
    #[error("value is not valid unicode: {0:?}")]
    NotUnicode(OsString),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvError {
    #[error("failed to parse {name} as {type_name}: {source}")]
    Conversion {
        name: String,
        type_name: &'static str,
        source: CastError,
    },
}

impl EnvError {
    pub(crate) fn conversion(
        name: &str,
        type_name: &'static str,
        source: CastError,
    ) -> Self {
        EnvError::Conversion {
            name: name.to_string(),
            type_name,
            source,
        }
    }

    /// Name of the offending environment variable.
    pub fn name(&self) -> &str {
        match self {
            EnvError::Conversion { name, .. } => name,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            EnvError::Conversion { type_name, .. } => type_name,
        }
    }

    pub fn cause(&self) -> &CastError {
        match self {
            EnvError::Conversion { source, .. } => source,
        }
    }
}

pub type EnvResult<T> = Result<T, EnvError>;
