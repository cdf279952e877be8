//! The mutable configuration surface.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::component::{Component, Qualifier};
use crate::context::Context;
use crate::descriptor::Descriptor;
use crate::error::{DiError, DiResult, IllegalComponent};
use crate::observer::{ContainerObserver, Observers};
use crate::provider::{ComponentProvider, InjectionProvider, InstanceProvider};
use crate::registry::Registry;
use crate::scope::{ScopeDecorator, ScopeId, ScopeTable};
use crate::validation;

/// Binding-time tag: a qualifier or a scope.
///
/// The set is closed, so the caller decides what each tag means; the
/// binder only enforces where each kind is legal (instance bindings take
/// qualifiers only, descriptor bindings take qualifiers plus at most one
/// scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTag {
    /// Multiplies the binding under a qualifier.
    Qualified(Qualifier),
    /// Applies a registered scope's caching policy.
    Scoped(ScopeId),
}

impl BindingTag {
    /// Tag for a named qualifier.
    pub const fn named(name: &'static str) -> Self {
        BindingTag::Qualified(Qualifier::Named(name))
    }

    /// Tag for a marker qualifier.
    pub const fn marker(tag: &'static str) -> Self {
        BindingTag::Qualified(Qualifier::Marker(tag))
    }

    /// Tag selecting a scope.
    pub const fn scoped(scope: ScopeId) -> Self {
        BindingTag::Scoped(scope)
    }
}

/// Mutable configuration surface: binds components, then builds the
/// validated [`Context`].
///
/// Binding defects ([`IllegalComponent`]) are rejected by the `bind*`
/// call itself; graph defects are rejected by [`build`](Self::build).
/// Rebinding an identity replaces the previous binding. `build` consumes
/// the binder, which is what freezes the configuration.
///
/// # Examples
///
/// ```
/// use bindery::{Binder, BindingTag, ComponentRef, FnDescriptor, Qualifier, ScopeId};
///
/// struct Limit(u32);
/// struct Pool { limit: u32 }
///
/// let mut binder = Binder::new();
/// binder.bind_instance(Limit(8), &[BindingTag::named("max")])?;
/// binder.bind::<Pool>(
///     FnDescriptor::new(|args| {
///         let limit = args.take::<Limit>()?;
///         Ok(Pool { limit: limit.0 })
///     })
///     .requires(ComponentRef::qualified::<Limit>(Qualifier::Named("max"))),
///     &[BindingTag::scoped(ScopeId::SINGLETON)],
/// )?;
///
/// let context = binder.build()?;
/// assert_eq!(context.resolve::<Pool>()?.unwrap().limit, 8);
/// # Ok::<(), bindery::DiError>(())
/// ```
pub struct Binder {
    registry: Registry,
    scopes: ScopeTable,
    observers: Observers,
}

impl Binder {
    /// Creates an empty binder with the singleton scope registered.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            scopes: ScopeTable::new(),
            observers: Observers::new(),
        }
    }

    /// Binds a pre-built value.
    ///
    /// Every tag must be a qualifier; a scope tag fails with
    /// [`IllegalComponent::NotAQualifier`]. With no tags the unqualified
    /// identity is bound; otherwise one identity per qualifier, all
    /// sharing this value.
    pub fn bind_instance<T: Send + Sync + 'static>(
        &mut self,
        value: T,
        tags: &[BindingTag],
    ) -> DiResult<&mut Self> {
        let mut qualifiers = Vec::with_capacity(tags.len());
        for tag in tags {
            match tag {
                BindingTag::Qualified(qualifier) => qualifiers.push(*qualifier),
                BindingTag::Scoped(scope) => {
                    return Err(DiError::IllegalComponent(IllegalComponent::NotAQualifier(
                        scope.name(),
                    )))
                }
            }
        }
        let provider: Arc<dyn ComponentProvider> = Arc::new(InstanceProvider::new(Arc::new(value)));
        if qualifiers.is_empty() {
            self.registry.insert(Component::of::<T>(), provider);
        } else {
            for qualifier in qualifiers {
                self.registry
                    .insert(Component::qualified::<T>(qualifier), provider.clone());
            }
        }
        Ok(self)
    }

    /// Binds a descriptor-backed component of service type `T`.
    ///
    /// Tags partition into qualifiers and at most one scope; a second
    /// scope tag fails with [`IllegalComponent::MultipleScopes`]. Without
    /// a scope tag the descriptor's
    /// [`declared_scope`](Descriptor::declared_scope) applies, if any. An
    /// effective scope missing from the scope table fails with
    /// [`IllegalComponent::UnknownScope`].
    ///
    /// Each bound identity gets its own injection provider sharing the
    /// descriptor and, when scoped, its own independent cache.
    pub fn bind<T: Send + Sync + 'static>(
        &mut self,
        descriptor: impl Descriptor + 'static,
        tags: &[BindingTag],
    ) -> DiResult<&mut Self> {
        let descriptor: Arc<dyn Descriptor> = Arc::new(descriptor);
        let mut qualifiers = Vec::with_capacity(tags.len());
        let mut scope = None;
        for tag in tags {
            match tag {
                BindingTag::Qualified(qualifier) => qualifiers.push(*qualifier),
                BindingTag::Scoped(id) => {
                    if scope.replace(*id).is_some() {
                        return Err(DiError::IllegalComponent(IllegalComponent::MultipleScopes(
                            type_name::<T>(),
                        )));
                    }
                }
            }
        }
        let scope = scope.or_else(|| descriptor.declared_scope());
        let decorator = match scope {
            Some(id) => match self.scopes.get(&id) {
                Some(decorator) => Some(decorator.clone()),
                None => {
                    return Err(DiError::IllegalComponent(IllegalComponent::UnknownScope(id)))
                }
            },
            None => None,
        };
        let components = if qualifiers.is_empty() {
            vec![Component::of::<T>()]
        } else {
            qualifiers
                .into_iter()
                .map(|qualifier| Component::qualified::<T>(qualifier))
                .collect()
        };
        for component in components {
            let provider: Arc<dyn ComponentProvider> =
                Arc::new(InjectionProvider::new(component, descriptor.clone()));
            let provider = match &decorator {
                Some(decorator) => (decorator)(provider),
                None => provider,
            };
            self.registry.insert(component, provider);
        }
        Ok(self)
    }

    /// Registers a scope decorator under `id`, before any binding that
    /// references it.
    pub fn register_scope<F>(&mut self, id: ScopeId, decorator: F) -> &mut Self
    where
        F: Fn(Arc<dyn ComponentProvider>) -> Arc<dyn ComponentProvider> + Send + Sync + 'static,
    {
        self.scopes.register(id, Arc::new(decorator) as ScopeDecorator);
        self
    }

    /// Registers a production observer.
    pub fn add_observer(&mut self, observer: Arc<dyn ContainerObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    /// Validates the whole dependency graph and freezes the configuration
    /// into a [`Context`].
    ///
    /// Fails with [`DiError::DependencyNotFound`] or
    /// [`DiError::CyclicDependency`] when the graph is unsound; nothing is
    /// produced either way.
    pub fn build(mut self) -> DiResult<Context> {
        self.registry.finalize();
        validation::check(&self.registry)?;
        Ok(Context::new(self.registry, self.observers))
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("bindings", &self.registry.len())
            .finish_non_exhaustive()
    }
}
