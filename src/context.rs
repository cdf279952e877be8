//! The immutable runtime container.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::component::{Component, ComponentRef, ContainerKind, Qualifier};
use crate::error::{DiError, DiResult};
use crate::observer::Observers;
use crate::provider::{AnyArc, ComponentProvider};
use crate::registry::Registry;

/// Outcome of resolving a bound ref: a produced instance or a deferred
/// handle, matching the shape of the ref.
#[derive(Clone)]
pub enum Resolution {
    /// A produced instance (direct refs).
    Instance(AnyArc),
    /// A lazy handle (deferred refs); nothing has been produced yet.
    Deferred(Deferred),
}

impl Resolution {
    /// Downcasts a direct resolution to the concrete service type.
    pub fn instance_of<T: Send + Sync + 'static>(self) -> DiResult<Arc<T>> {
        match self {
            Resolution::Instance(value) => value
                .downcast::<T>()
                .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>())),
            Resolution::Deferred(_) => Err(DiError::TypeMismatch(std::any::type_name::<T>())),
        }
    }

    /// The deferred handle, if this resolution holds one.
    pub fn deferred(self) -> Option<Deferred> {
        match self {
            Resolution::Deferred(handle) => Some(handle),
            Resolution::Instance(_) => None,
        }
    }
}

/// Lazy handle to a bound component.
///
/// Created without producing anything, which is what lets deferred refs
/// break dependency cycles. Every `resolve` re-enters production; caching
/// is the scope wrapper's business, not the handle's.
#[derive(Clone)]
pub struct Deferred {
    component: Component,
    provider: Arc<dyn ComponentProvider>,
    context: Context,
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}

impl Deferred {
    /// Produces the component now.
    pub fn resolve(&self) -> DiResult<AnyArc> {
        self.context.produce(self.component, &self.provider)
    }

    /// Produces the component and downcasts it to `T`.
    pub fn resolve_as<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.resolve()?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// The identity this handle produces.
    pub fn component(&self) -> Component {
        self.component
    }
}

/// The immutable runtime container.
///
/// Built by [`Binder::build`](crate::Binder::build) after the dependency
/// graph has been validated, so every direct edge of every bound component
/// is known to be satisfiable. Cheap to clone and safe to share across
/// threads.
///
/// # Examples
///
/// ```
/// use bindery::Binder;
///
/// let mut binder = Binder::new();
/// binder.bind_instance(1234u16, &[])?;
/// let context = binder.build()?;
///
/// assert_eq!(*context.resolve::<u16>()?.unwrap(), 1234);
/// assert!(context.resolve::<String>()?.is_none());
/// # Ok::<(), bindery::DiError>(())
/// ```
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    registry: Registry,
    observers: Observers,
}

impl Clone for Context {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("components", &self.inner.registry.len())
            .finish_non_exhaustive()
    }
}

impl Context {
    pub(crate) fn new(registry: Registry, observers: Observers) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                registry,
                observers,
            }),
        }
    }

    /// Resolves a dependency ref.
    ///
    /// - Deferred refs yield a [`Deferred`] handle without producing
    ///   anything, or `None` if the component is unbound.
    /// - Other container wrappers are recognized but unsupported and
    ///   always yield `None`.
    /// - Direct refs produce through the component's provider, or yield
    ///   `None` if unbound.
    ///
    /// An unbound identity is never an error; errors come only from
    /// production itself.
    pub fn get(&self, reference: &ComponentRef) -> DiResult<Option<Resolution>> {
        let component = reference.component();
        match reference.container() {
            Some(ContainerKind::Deferred) => {
                Ok(self.deferred_handle(component).map(Resolution::Deferred))
            }
            Some(_) => Ok(None),
            None => match self.inner.registry.get(&component) {
                Some(provider) => {
                    let value = self.produce(component, provider)?;
                    Ok(Some(Resolution::Instance(value)))
                }
                None => Ok(None),
            },
        }
    }

    /// Resolves the unqualified identity of `T`.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> DiResult<Option<Arc<T>>> {
        self.resolve_instance(ComponentRef::of::<T>())
    }

    /// Resolves `T` under `qualifier`.
    pub fn resolve_qualified<T: Send + Sync + 'static>(
        &self,
        qualifier: Qualifier,
    ) -> DiResult<Option<Arc<T>>> {
        self.resolve_instance(ComponentRef::qualified::<T>(qualifier))
    }

    /// Deferred handle for the unqualified identity of `T`, if bound.
    pub fn resolve_deferred<T: Send + Sync + 'static>(&self) -> Option<Deferred> {
        self.deferred_handle(Component::of::<T>())
    }

    /// Deferred handle for `T` under `qualifier`, if bound.
    pub fn resolve_deferred_qualified<T: Send + Sync + 'static>(
        &self,
        qualifier: Qualifier,
    ) -> Option<Deferred> {
        self.deferred_handle(Component::qualified::<T>(qualifier))
    }

    /// Renders the bound components, for debugging.
    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut entries: Vec<String> = self
            .inner
            .registry
            .iter()
            .map(|(component, _)| component.to_string())
            .collect();
        entries.sort();
        let mut out = String::from("Context {\n");
        for entry in &entries {
            out.push_str("  ");
            out.push_str(entry);
            out.push('\n');
        }
        out.push('}');
        out
    }

    fn resolve_instance<T: Send + Sync + 'static>(
        &self,
        reference: ComponentRef,
    ) -> DiResult<Option<Arc<T>>> {
        match self.get(&reference)? {
            Some(resolution) => Ok(Some(resolution.instance_of::<T>()?)),
            None => Ok(None),
        }
    }

    fn deferred_handle(&self, component: Component) -> Option<Deferred> {
        self.inner.registry.get(&component).map(|provider| Deferred {
            component,
            provider: provider.clone(),
            context: self.clone(),
        })
    }

    pub(crate) fn produce(
        &self,
        component: Component,
        provider: &Arc<dyn ComponentProvider>,
    ) -> DiResult<AnyArc> {
        if !self.inner.observers.has_observers() {
            return provider.produce(self);
        }
        self.inner.observers.producing(&component);
        let start = Instant::now();
        let result = provider.produce(self);
        match &result {
            Ok(_) => self.inner.observers.produced(&component, start.elapsed()),
            Err(error) => self.inner.observers.failed(&component, error),
        }
        result
    }
}
