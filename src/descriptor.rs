//! The descriptor seam: how dependency metadata enters the container.
//!
//! The container never inspects types itself. A [`Descriptor`] declares a
//! component's dependencies as an ordered list of
//! [`ComponentRef`](crate::ComponentRef)s and knows how to construct the
//! component once those refs are resolved. [`FnDescriptor`] is the
//! closure-backed implementation used for explicit registration.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::component::{Component, ComponentRef};
use crate::context::{Deferred, Resolution};
use crate::error::{DiError, DiResult};
use crate::scope::ScopeId;

/// Dependency metadata and construction recipe for one component.
///
/// `dependencies()` lists the refs in resolution order: constructor
/// arguments first, then any post-construction injection points. The same
/// order is the order in which [`ResolvedArgs`] yields values, split
/// between `instantiate` (leading args) and `populate` (the rest).
pub trait Descriptor: Send + Sync {
    /// The refs this component needs, in argument order.
    fn dependencies(&self) -> &[ComponentRef];

    /// Constructs the instance, consuming the leading args.
    fn instantiate(&self, args: &mut ResolvedArgs) -> DiResult<Box<dyn Any + Send + Sync>>;

    /// Post-construction injection, consuming the remaining args.
    fn populate(
        &self,
        instance: &mut (dyn Any + Send + Sync),
        args: &mut ResolvedArgs,
    ) -> DiResult<()> {
        let _ = (instance, args);
        Ok(())
    }

    /// Scope declared on the implementation itself, used when the binding
    /// carries no scope tag.
    fn declared_scope(&self) -> Option<ScopeId> {
        None
    }
}

/// Cursor over a component's resolved dependencies, in declaration order.
///
/// Each `take` consumes the next slot. Slots hold either a produced
/// instance or a [`Deferred`] handle, matching the shape of the declared
/// ref; unsupported container refs leave an absent slot that reports
/// `DependencyNotFound` if the descriptor actually consumes it.
pub struct ResolvedArgs {
    owner: Component,
    entries: Vec<(ComponentRef, Option<Resolution>)>,
    cursor: usize,
}

impl ResolvedArgs {
    pub(crate) fn new(
        owner: Component,
        entries: Vec<(ComponentRef, Option<Resolution>)>,
    ) -> Self {
        Self {
            owner,
            entries,
            cursor: 0,
        }
    }

    /// Takes the next slot as a produced instance of `T`.
    ///
    /// Fails with `TypeMismatch` if the slot holds a different type, a
    /// deferred handle, or the declared list is exhausted.
    pub fn take<T: Send + Sync + 'static>(&mut self) -> DiResult<Arc<T>> {
        let (reference, slot) = self.advance(type_name::<T>())?;
        match slot {
            Some(resolution) => resolution.instance_of::<T>(),
            None => Err(DiError::DependencyNotFound {
                owner: self.owner,
                missing: reference.component(),
            }),
        }
    }

    /// Takes the next slot as a [`Deferred`] handle.
    pub fn take_deferred(&mut self) -> DiResult<Deferred> {
        let (reference, slot) = self.advance(type_name::<Deferred>())?;
        match slot {
            Some(Resolution::Deferred(handle)) => Ok(handle),
            Some(Resolution::Instance(_)) => Err(DiError::TypeMismatch(type_name::<Deferred>())),
            None => Err(DiError::DependencyNotFound {
                owner: self.owner,
                missing: reference.component(),
            }),
        }
    }

    /// Number of slots not yet consumed.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    fn advance(&mut self, requested: &'static str) -> DiResult<(ComponentRef, Option<Resolution>)> {
        match self.entries.get(self.cursor) {
            Some((reference, slot)) => {
                self.cursor += 1;
                Ok((*reference, slot.clone()))
            }
            None => Err(DiError::TypeMismatch(requested)),
        }
    }
}

type Construct = Box<dyn Fn(&mut ResolvedArgs) -> DiResult<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// Closure-backed [`Descriptor`] for explicit registration.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use bindery::{Binder, ComponentRef, FnDescriptor};
///
/// struct Config { url: String }
/// struct Client { config: Arc<Config> }
///
/// let mut binder = Binder::new();
/// binder.bind_instance(Config { url: "https://api".to_string() }, &[])?;
/// binder.bind::<Client>(
///     FnDescriptor::new(|args| {
///         let config = args.take::<Config>()?;
///         Ok(Client { config })
///     })
///     .requires(ComponentRef::of::<Config>()),
///     &[],
/// )?;
///
/// let context = binder.build()?;
/// let client = context.resolve::<Client>()?.unwrap();
/// assert_eq!(client.config.url, "https://api");
/// # Ok::<(), bindery::DiError>(())
/// ```
pub struct FnDescriptor {
    dependencies: Vec<ComponentRef>,
    scope: Option<ScopeId>,
    construct: Construct,
}

impl FnDescriptor {
    /// Creates a descriptor from a construction closure.
    ///
    /// The closure receives the resolved args in the order declared by
    /// [`requires`](Self::requires) calls.
    pub fn new<T, F>(construct: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut ResolvedArgs) -> DiResult<T> + Send + Sync + 'static,
    {
        Self {
            dependencies: Vec::new(),
            scope: None,
            construct: Box::new(move |args| {
                let value = construct(args)?;
                Ok(Box::new(value) as Box<dyn Any + Send + Sync>)
            }),
        }
    }

    /// Appends a dependency ref.
    pub fn requires(mut self, reference: ComponentRef) -> Self {
        self.dependencies.push(reference);
        self
    }

    /// Declares the implementation's own scope, used when the binding
    /// carries no scope tag.
    pub fn scoped(mut self, scope: ScopeId) -> Self {
        self.scope = Some(scope);
        self
    }
}

impl Descriptor for FnDescriptor {
    fn dependencies(&self) -> &[ComponentRef] {
        &self.dependencies
    }

    fn instantiate(&self, args: &mut ResolvedArgs) -> DiResult<Box<dyn Any + Send + Sync>> {
        (self.construct)(args)
    }

    fn declared_scope(&self) -> Option<ScopeId> {
        self.scope
    }
}
