//! Typed environment variable accessors.
//!
//! Two ways in:
//!
//! - [`accessor`] functions read a variable right away and return it, or
//!   the supplied default when the variable is absent.
//! - [`Registry`] collects bindings from variables to caller-owned fields
//!   and resolves them all when [`Registry::parse`] is called, once the
//!   environment is final.
//!
//! A variable that is present but cannot be converted is an error, never
//! a silent fallback to the default.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let mut port = 0u16;
//! let mut timeout = Duration::ZERO;
//! let mut registry = envbind::Registry::new();
//! registry
//!     .bind(&mut port, "HTTP_PORT", 8080)
//!     .duration_var(&mut timeout, "REQUEST_TIMEOUT_NS", Duration::from_secs(30));
//! registry.parse().expect("invalid configuration");
//! ```

pub mod accessor;
pub mod cast;
pub mod convert;
pub mod error;
pub mod registry;
pub mod source;

pub use accessor::{get, must};
pub use cast::Origin;
pub use convert::FromEnvStr;
pub use error::*;
pub use registry::{Binding, BoundVar, Registry};
pub use source::{EnvSource, MapEnv, SystemEnv};
