//! Component identity types.
//!
//! A [`Component`] names one bindable unit: a service type plus an optional
//! [`Qualifier`]. Dependencies are declared as [`ComponentRef`]s, which add
//! an optional [`ContainerKind`] wrapper for deferred access.

use std::any::{type_name, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Qualifier multiplying one service type into independent identities.
///
/// The same type bound under two different qualifiers (or under a qualifier
/// and unqualified) is two unrelated components: separate providers,
/// separate caches, separate validation.
///
/// # Examples
///
/// ```
/// use bindery::{Component, Qualifier};
///
/// struct Engine;
///
/// let plain = Component::of::<Engine>();
/// let named = Component::qualified::<Engine>(Qualifier::Named("backup"));
/// assert_ne!(plain, named);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    /// Value qualifier, compared by its name.
    Named(&'static str),
    /// Marker qualifier, compared by its tag.
    Marker(&'static str),
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Named(name) => write!(f, "named {:?}", name),
            Qualifier::Marker(tag) => write!(f, "marked {}", tag),
        }
    }
}

/// Identity of a bindable component: service type plus optional qualifier.
///
/// Carries the type's diagnostic name for error messages, but equality,
/// ordering, and hashing use only `(TypeId, qualifier)`.
#[derive(Debug, Clone, Copy)]
pub struct Component {
    type_id: TypeId,
    type_name: &'static str,
    qualifier: Option<Qualifier>,
}

impl Component {
    /// Creates the unqualified identity for `T`.
    #[inline(always)]
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            qualifier: None,
        }
    }

    /// Creates the identity for `T` under `qualifier`.
    #[inline(always)]
    pub fn qualified<T: 'static>(qualifier: Qualifier) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            qualifier: Some(qualifier),
        }
    }

    /// The `TypeId` of the service type.
    #[inline(always)]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Human-readable service type name, for diagnostics.
    #[inline(always)]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The qualifier, if any.
    #[inline(always)]
    pub fn qualifier(&self) -> Option<Qualifier> {
        self.qualifier
    }
}

// Identity is (TypeId, qualifier); the name never participates.
impl PartialEq for Component {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.qualifier == other.qualifier
    }
}

impl Eq for Component {}

impl Hash for Component {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.qualifier.hash(state);
    }
}

impl PartialOrd for Component {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.type_id
            .cmp(&other.type_id)
            .then_with(|| self.qualifier.cmp(&other.qualifier))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualifier {
            Some(qualifier) => write!(f, "{} ({})", self.type_name, qualifier),
            None => write!(f, "{}", self.type_name),
        }
    }
}

/// Recognized container wrappers around a dependency.
///
/// Only [`ContainerKind::Deferred`] is supported; any other kind is
/// recognized so the configuration stays well-formed, but always resolves
/// to absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Lazy indirection: resolves to a [`Deferred`](crate::Deferred) handle
    /// without producing anything.
    Deferred,
    /// Aggregate wrapper, recognized but unsupported.
    Collection,
}

/// A dependency reference: a component, optionally behind a container.
///
/// Descriptors declare their needs as refs. A direct ref asks for a
/// produced instance; a deferred ref asks for a handle that produces on
/// demand, which is the sanctioned way to break dependency cycles.
///
/// # Examples
///
/// ```
/// use bindery::{ComponentRef, ContainerKind, Qualifier};
///
/// struct Store;
///
/// let direct = ComponentRef::of::<Store>();
/// let lazy = ComponentRef::deferred_of::<Store>();
/// assert_ne!(direct, lazy);
/// assert_eq!(lazy.container(), Some(ContainerKind::Deferred));
/// assert_eq!(direct.component(), lazy.component());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    component: Component,
    container: Option<ContainerKind>,
}

impl ComponentRef {
    /// Direct ref to `component`.
    #[inline(always)]
    pub fn direct(component: Component) -> Self {
        Self {
            component,
            container: None,
        }
    }

    /// Deferred ref to `component`.
    #[inline(always)]
    pub fn deferred(component: Component) -> Self {
        Self {
            component,
            container: Some(ContainerKind::Deferred),
        }
    }

    /// Ref to `component` behind an explicit container kind.
    #[inline(always)]
    pub fn wrapped(component: Component, kind: ContainerKind) -> Self {
        Self {
            component,
            container: Some(kind),
        }
    }

    /// Direct ref to the unqualified identity of `T`.
    #[inline(always)]
    pub fn of<T: 'static>() -> Self {
        Self::direct(Component::of::<T>())
    }

    /// Direct ref to `T` under `qualifier`.
    #[inline(always)]
    pub fn qualified<T: 'static>(qualifier: Qualifier) -> Self {
        Self::direct(Component::qualified::<T>(qualifier))
    }

    /// Deferred ref to the unqualified identity of `T`.
    #[inline(always)]
    pub fn deferred_of<T: 'static>() -> Self {
        Self::deferred(Component::of::<T>())
    }

    /// The referenced component.
    #[inline(always)]
    pub fn component(&self) -> Component {
        self.component
    }

    /// The container kind, if the ref is wrapped.
    #[inline(always)]
    pub fn container(&self) -> Option<ContainerKind> {
        self.container
    }

    /// True when the ref is behind any container wrapper.
    #[inline(always)]
    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.container {
            Some(ContainerKind::Deferred) => write!(f, "Deferred<{}>", self.component),
            Some(ContainerKind::Collection) => write!(f, "Collection<{}>", self.component),
            None => write!(f, "{}", self.component),
        }
    }
}
