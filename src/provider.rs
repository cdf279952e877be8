//! Component providers: instance, injection, and scoped.

use std::any::Any;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::component::{Component, ComponentRef};
use crate::context::Context;
use crate::descriptor::{Descriptor, ResolvedArgs};
use crate::error::DiResult;
use crate::internal::ConstructionGuard;

/// Type-erased shared instance.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Produces instances of one bound component.
///
/// Implemented by the built-in providers and by custom scope decorators.
/// `dependencies()` must report the real edges so graph validation sees
/// through any wrapper.
pub trait ComponentProvider: Send + Sync {
    /// Produces an instance, resolving dependencies through `ctx`.
    fn produce(&self, ctx: &Context) -> DiResult<AnyArc>;

    /// The refs this provider needs, in resolution order.
    fn dependencies(&self) -> &[ComponentRef];
}

/// Returns a fixed pre-built value. Zero dependencies.
pub(crate) struct InstanceProvider {
    value: AnyArc,
}

impl InstanceProvider {
    pub(crate) fn new(value: AnyArc) -> Self {
        Self { value }
    }
}

impl ComponentProvider for InstanceProvider {
    fn produce(&self, _ctx: &Context) -> DiResult<AnyArc> {
        Ok(self.value.clone())
    }

    fn dependencies(&self) -> &[ComponentRef] {
        &[]
    }
}

/// Descriptor-backed production: resolve the declared refs, instantiate,
/// then populate.
pub(crate) struct InjectionProvider {
    component: Component,
    descriptor: Arc<dyn Descriptor>,
}

impl InjectionProvider {
    pub(crate) fn new(component: Component, descriptor: Arc<dyn Descriptor>) -> Self {
        Self {
            component,
            descriptor,
        }
    }
}

impl ComponentProvider for InjectionProvider {
    fn produce(&self, ctx: &Context) -> DiResult<AnyArc> {
        let _guard = ConstructionGuard::enter(self.component)?;
        let refs = self.descriptor.dependencies();
        let mut entries = Vec::with_capacity(refs.len());
        for reference in refs {
            entries.push((*reference, ctx.get(reference)?));
        }
        let mut args = ResolvedArgs::new(self.component, entries);
        let mut instance = self.descriptor.instantiate(&mut args)?;
        self.descriptor.populate(instance.as_mut(), &mut args)?;
        Ok(Arc::from(instance))
    }

    fn dependencies(&self) -> &[ComponentRef] {
        self.descriptor.dependencies()
    }
}

/// Once-per-wrapper cache around any provider.
///
/// The first successful production is stored; a failed production stores
/// nothing and the next call retries. The inner provider runs outside the
/// cell so a re-entrant produce reaches the construction guard instead of
/// blocking on the cell; a racer that loses the first store discards its
/// value and returns the stored one.
///
/// Public so custom scope decorators can reuse the caching policy:
///
/// ```
/// use std::sync::Arc;
/// use bindery::{Binder, BindingTag, FnDescriptor, ScopeId, ScopedProvider};
///
/// const SESSION: ScopeId = ScopeId::new("session");
///
/// let mut binder = Binder::new();
/// binder.register_scope(SESSION, |inner| Arc::new(ScopedProvider::new(inner)));
/// binder.bind::<u64>(
///     FnDescriptor::new(|_| Ok(7u64)),
///     &[BindingTag::scoped(SESSION)],
/// )?;
///
/// let context = binder.build()?;
/// assert_eq!(*context.resolve::<u64>()?.unwrap(), 7);
/// # Ok::<(), bindery::DiError>(())
/// ```
pub struct ScopedProvider {
    inner: Arc<dyn ComponentProvider>,
    cell: OnceCell<AnyArc>,
}

impl ScopedProvider {
    /// Wraps `inner` with a fresh cache.
    pub fn new(inner: Arc<dyn ComponentProvider>) -> Self {
        Self {
            inner,
            cell: OnceCell::new(),
        }
    }
}

impl ComponentProvider for ScopedProvider {
    fn produce(&self, ctx: &Context) -> DiResult<AnyArc> {
        // Fast path without touching the inner provider.
        if let Some(value) = self.cell.get() {
            return Ok(value.clone());
        }
        let value = self.inner.produce(ctx)?;
        Ok(self.cell.get_or_init(|| value.clone()).clone())
    }

    fn dependencies(&self) -> &[ComponentRef] {
        self.inner.dependencies()
    }
}
