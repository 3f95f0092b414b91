use std::fmt::Debug;
use std::time::Duration;

use tracing::debug;

use crate::cast::{self, Origin};
use crate::convert::FromEnvStr;
use crate::error::EnvResult;
use crate::source::{EnvSource, SystemEnv};

/// A pending variable binding waiting for [`Registry::parse`].
pub trait Binding {
    fn name(&self) -> &str;

    fn type_name(&self) -> &'static str;

    fn default_repr(&self) -> String;

    fn resolve(&mut self, source: &dyn EnvSource) -> EnvResult<Origin>;
}

/// Binds `name` to a caller-owned destination.
pub struct BoundVar<'a, T> {
    name: String,
    default: T,
    dest: &'a mut T,
}

impl<'a, T> BoundVar<'a, T> {
    pub fn new(dest: &'a mut T, name: impl Into<String>, default: T) -> Self {
        Self {
            name: name.into(),
            default,
            dest,
        }
    }
}

impl<T> Binding for BoundVar<'_, T>
where
    T: FromEnvStr + Clone + Debug,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn default_repr(&self) -> String {
        format!("{:?}", self.default)
    }

    fn resolve(&mut self, source: &dyn EnvSource) -> EnvResult<Origin> {
        // The default is cloned so the binding can be replayed.
        cast::assign(source, self.dest, &self.name, self.default.clone())
    }
}

/// Ordered set of deferred bindings.
///
/// Bindings are declared up front and only read from the environment
/// when [`parse`](Registry::parse) runs, so anything that populates the
/// environment (a `.env` loader, for instance) can finish first.
///
/// The registry is meant to be filled and parsed on one thread; it is
/// neither `Send` nor `Sync`.
pub struct Registry<'a, S = SystemEnv> {
    source: S,
    bindings: Vec<Box<dyn Binding + 'a>>,
}

impl<'a> Registry<'a, SystemEnv> {
    pub fn new() -> Self {
        Self::with_source(SystemEnv)
    }
}

impl Default for Registry<'_, SystemEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: EnvSource> Registry<'a, S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            bindings: Vec::new(),
        }
    }

    /// Queues a binding. `dest` is not written until `parse`.
    pub fn bind<T>(
        &mut self,
        dest: &'a mut T,
        name: impl Into<String>,
        default: T,
    ) -> &mut Self
    where
        T: FromEnvStr + Clone + Debug + 'a,
    {
        self.push(BoundVar::new(dest, name, default))
    }

    /// Queues a custom [`Binding`].
    pub fn push(&mut self, binding: impl Binding + 'a) -> &mut Self {
        self.bindings.push(Box::new(binding));
        self
    }

    pub fn string_var(
        &mut self,
        dest: &'a mut String,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> &mut Self {
        self.bind(dest, name, default.into())
    }

    pub fn int_var(
        &mut self,
        dest: &'a mut isize,
        name: impl Into<String>,
        default: isize,
    ) -> &mut Self {
        self.bind(dest, name, default)
    }

    pub fn int64_var(
        &mut self,
        dest: &'a mut i64,
        name: impl Into<String>,
        default: i64,
    ) -> &mut Self {
        self.bind(dest, name, default)
    }

    pub fn uint_var(
        &mut self,
        dest: &'a mut usize,
        name: impl Into<String>,
        default: usize,
    ) -> &mut Self {
        self.bind(dest, name, default)
    }

    pub fn uint64_var(
        &mut self,
        dest: &'a mut u64,
        name: impl Into<String>,
        default: u64,
    ) -> &mut Self {
        self.bind(dest, name, default)
    }

    pub fn float64_var(
        &mut self,
        dest: &'a mut f64,
        name: impl Into<String>,
        default: f64,
    ) -> &mut Self {
        self.bind(dest, name, default)
    }

    pub fn bool_var(
        &mut self,
        dest: &'a mut bool,
        name: impl Into<String>,
        default: bool,
    ) -> &mut Self {
        self.bind(dest, name, default)
    }

    pub fn duration_var(
        &mut self,
        dest: &'a mut Duration,
        name: impl Into<String>,
        default: Duration,
    ) -> &mut Self {
        self.bind(dest, name, default)
    }

    /// Resolves every binding in registration order.
    ///
    /// Stops at the first conversion failure: bindings before it have
    /// already written their destinations and are not rolled back, the
    /// ones after it are not run. Calling `parse` again replays all
    /// bindings against the current state of the source.
    pub fn parse(&mut self) -> EnvResult<()> {
        debug!(count = self.bindings.len(), "parsing env bindings");
        for binding in self.bindings.iter_mut() {
            let origin = binding.resolve(&self.source)?;
            debug!(
                name = binding.name(),
                kind = binding.type_name(),
                %origin,
                "resolved env binding"
            );
        }
        Ok(())
    }

    /// Like [`parse`](Registry::parse), but panics on the first failure.
    pub fn must_parse(&mut self) {
        if let Err(e) = self.parse() {
            panic!("{e}");
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &(dyn Binding + 'a)> {
        self.bindings.iter().map(|b| &**b)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
