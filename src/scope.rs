//! Scope identifiers and the scope decorator table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::provider::{ComponentProvider, ScopedProvider};

/// Identifier of a registered scope.
///
/// A scope is a caching policy applied to a component's provider. The
/// container ships with [`ScopeId::SINGLETON`]; further scopes are
/// registered on the [`Binder`](crate::Binder) before the bindings that
/// reference them.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use bindery::{Binder, ScopeId, ScopedProvider};
///
/// const REQUEST: ScopeId = ScopeId::new("request");
///
/// let mut binder = Binder::new();
/// binder.register_scope(REQUEST, |inner| Arc::new(ScopedProvider::new(inner)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(&'static str);

impl ScopeId {
    /// The built-in singleton scope: one cached instance per context.
    pub const SINGLETON: ScopeId = ScopeId("singleton");

    /// Creates a scope id from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The scope's name.
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decorator installed for a scope: wraps a bound component's provider
/// with the scope's caching policy. `dependencies()` of the wrapper must
/// pass through unchanged so graph validation sees the real edges.
pub type ScopeDecorator =
    Arc<dyn Fn(Arc<dyn ComponentProvider>) -> Arc<dyn ComponentProvider> + Send + Sync>;

/// Scope registry. The singleton scope is always present.
pub(crate) struct ScopeTable {
    decorators: HashMap<ScopeId, ScopeDecorator>,
}

impl ScopeTable {
    pub(crate) fn new() -> Self {
        let mut decorators: HashMap<ScopeId, ScopeDecorator> = HashMap::new();
        decorators.insert(
            ScopeId::SINGLETON,
            Arc::new(|inner: Arc<dyn ComponentProvider>| -> Arc<dyn ComponentProvider> {
                Arc::new(ScopedProvider::new(inner))
            }),
        );
        Self { decorators }
    }

    pub(crate) fn register(&mut self, id: ScopeId, decorator: ScopeDecorator) {
        self.decorators.insert(id, decorator);
    }

    pub(crate) fn get(&self, id: &ScopeId) -> Option<&ScopeDecorator> {
        self.decorators.get(id)
    }
}
