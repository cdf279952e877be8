//! Error types for container configuration and resolution.

use std::fmt;

use crate::component::Component;
use crate::scope::ScopeId;

/// Defects in a single binding, rejected synchronously by the `bind*` call
/// that introduced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalComponent {
    /// A scope tag was supplied where only qualifiers are legal (instance
    /// bindings take no scope). Carries the scope name.
    NotAQualifier(&'static str),
    /// More than one scope tag on a single binding. Carries the service
    /// type name.
    MultipleScopes(&'static str),
    /// The effective scope id has no registered decorator, whether it came
    /// from a tag or from the descriptor's declared scope.
    UnknownScope(ScopeId),
}

impl fmt::Display for IllegalComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalComponent::NotAQualifier(name) => {
                write!(f, "{} is not a qualifier", name)
            }
            IllegalComponent::MultipleScopes(type_name) => {
                write!(f, "multiple scopes declared for {}", type_name)
            }
            IllegalComponent::UnknownScope(scope) => {
                write!(f, "unregistered scope: {}", scope)
            }
        }
    }
}

/// Container errors
///
/// Configuration defects ([`IllegalComponent`]) surface from the `bind*`
/// call itself; graph defects (`DependencyNotFound`, `CyclicDependency`)
/// surface from [`Binder::build`](crate::Binder::build), before any
/// component is ever produced. Resolving an unbound identity is not an
/// error (it is an absent `Option`), so the remaining runtime cases are
/// downcast misuse and cycles closed through deferred handles.
///
/// # Examples
///
/// ```rust
/// use bindery::{Binder, DiError, IllegalComponent, BindingTag, ScopeId};
///
/// let mut binder = Binder::new();
/// let err = binder
///     .bind_instance(42u32, &[BindingTag::scoped(ScopeId::SINGLETON)])
///     .unwrap_err();
/// assert_eq!(
///     err,
///     DiError::IllegalComponent(IllegalComponent::NotAQualifier("singleton"))
/// );
///
/// // All errors implement Display
/// println!("Error: {}", err);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// A binding was rejected at configuration time
    IllegalComponent(IllegalComponent),
    /// A bound component references an identity nothing binds
    DependencyNotFound {
        /// The immediate dependent, not the root the walk started from.
        owner: Component,
        /// The identity that is not bound.
        missing: Component,
    },
    /// The dependency graph loops (path is exactly the cycle, closed by
    /// repeating its first component)
    CyclicDependency(Vec<Component>),
    /// Type downcast failed, or a descriptor consumed its arguments out of
    /// shape (includes the requested type name)
    TypeMismatch(&'static str),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::IllegalComponent(detail) => {
                write!(f, "Illegal component: {}", detail)
            }
            DiError::DependencyNotFound { owner, missing } => {
                write!(f, "Dependency not found: {} requires {}", owner, missing)
            }
            DiError::CyclicDependency(path) => {
                let rendered: Vec<String> = path.iter().map(|c| c.to_string()).collect();
                write!(f, "Cyclic dependencies: {}", rendered.join(" -> "))
            }
            DiError::TypeMismatch(type_name) => {
                write!(f, "Type mismatch for: {}", type_name)
            }
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for container operations
///
/// A convenience alias for `Result<T, DiError>` used throughout bindery,
/// following the common Rust pattern of a crate-specific Result type to
/// reduce boilerplate in signatures.
///
/// # Examples
///
/// ```rust
/// use bindery::{Binder, Context, DiResult};
///
/// fn configured() -> DiResult<Context> {
///     let mut binder = Binder::new();
///     binder.bind_instance("ready".to_string(), &[])?;
///     binder.build()
/// }
///
/// let context = configured().unwrap();
/// assert!(context.resolve::<String>().unwrap().is_some());
/// ```
pub type DiResult<T> = Result<T, DiError>;
