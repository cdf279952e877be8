//! # bindery
//!
//! Type-safe inversion of control for Rust with qualified bindings, pluggable
//! scopes, and build-time dependency graph validation.
//!
//! ## Features
//!
//! - **Qualifier-aware identity**: bind the same type several times under named or marker qualifiers
//! - **Build-time validation**: missing and cyclic dependencies are rejected before the first resolution
//! - **Deferred handles**: break construction cycles without giving up on explicit wiring
//! - **Pluggable scopes**: singleton caching out of the box, custom scopes via provider decorators
//! - **Thread-safe**: Arc-based sharing with lock-free reads on cached components
//! - **Observable**: hook production start, success, and failure without touching bindings
//!
//! ## Quick Start
//!
//! ```rust
//! use bindery::{Binder, ComponentRef, FnDescriptor};
//! use std::sync::Arc;
//!
//! // Define your components
//! struct Config {
//!     url: String,
//! }
//!
//! struct Client {
//!     config: Arc<Config>,
//! }
//!
//! // Bind them
//! let mut binder = Binder::new();
//! binder.bind_instance(Config {
//!     url: "https://api.example.com".to_string(),
//! }, &[])?;
//! binder.bind::<Client>(
//!     FnDescriptor::new(|args| {
//!         Ok(Client { config: args.take::<Config>()? })
//!     })
//!     .requires(ComponentRef::of::<Config>()),
//!     &[],
//! )?;
//!
//! // Build the context and resolve
//! let context = binder.build()?;
//! let client = context.resolve::<Client>()?.unwrap();
//! assert_eq!(client.config.url, "https://api.example.com");
//! # Ok::<(), bindery::DiError>(())
//! ```
//!
//! ## Component Identity
//!
//! A binding is keyed by the component type plus an optional [`Qualifier`]:
//!
//! - **Unqualified**: one binding per type, later bindings replace earlier ones
//! - **Named**: the same type bound under distinct string qualifiers
//! - **Marker**: the same type bound under distinct marker-type qualifiers
//!
//! The human-readable type name travels with the component for diagnostics but
//! never participates in identity.
//!
//! ## Scopes
//!
//! ```rust
//! use bindery::{Binder, BindingTag, FnDescriptor, ScopeId};
//! use std::sync::Arc;
//!
//! struct Pool {
//!     size: usize,
//! }
//!
//! let mut binder = Binder::new();
//! binder.bind::<Pool>(
//!     FnDescriptor::new(|_| Ok(Pool { size: 8 })),
//!     &[BindingTag::scoped(ScopeId::SINGLETON)],
//! )?;
//!
//! let context = binder.build()?;
//! let a = context.resolve::<Pool>()?.unwrap();
//! let b = context.resolve::<Pool>()?.unwrap();
//! // The singleton scope hands back the cached instance
//! assert!(Arc::ptr_eq(&a, &b));
//! # Ok::<(), bindery::DiError>(())
//! ```
//!
//! ## Deferred Handles
//!
//! ```rust
//! use bindery::Binder;
//!
//! let mut binder = Binder::new();
//! binder.bind_instance(String::from("postgres://localhost"), &[])?;
//!
//! let context = binder.build()?;
//! let handle = context.resolve_deferred::<String>().unwrap();
//! // Nothing is produced until the handle is asked
//! let url = handle.resolve_as::<String>()?;
//! assert_eq!(url.as_str(), "postgres://localhost");
//! # Ok::<(), bindery::DiError>(())
//! ```

// Module declarations
pub mod binder;
pub mod component;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod observer;
pub mod provider;
pub mod scope;

// Internal modules
mod internal;
mod registry;
mod validation;

// Re-export core types
pub use binder::{Binder, BindingTag};
pub use component::{Component, ComponentRef, ContainerKind, Qualifier};
pub use context::{Context, Deferred, Resolution};
pub use descriptor::{Descriptor, FnDescriptor, ResolvedArgs};
pub use error::{DiError, DiResult, IllegalComponent};
pub use observer::{ContainerObserver, LoggingObserver};
pub use provider::{AnyArc, ComponentProvider, ScopedProvider};
pub use scope::{ScopeDecorator, ScopeId};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_instance_resolution() {
        let mut binder = Binder::new();
        binder.bind_instance(42usize, &[]).unwrap();

        let context = binder.build().unwrap();
        let a = context.resolve::<usize>().unwrap().unwrap();
        let b = context.resolve::<usize>().unwrap().unwrap();

        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b)); // Same instance
    }

    #[test]
    fn test_unscoped_resolution() {
        let mut binder = Binder::new();
        let counter = Arc::new(Mutex::new(0));
        let counter_clone = counter.clone();

        binder
            .bind::<String>(
                FnDescriptor::new(move |_| {
                    let mut c = counter_clone.lock().unwrap();
                    *c += 1;
                    Ok(format!("instance-{}", *c))
                }),
                &[],
            )
            .unwrap();

        let context = binder.build().unwrap();
        let a = context.resolve::<String>().unwrap().unwrap();
        let b = context.resolve::<String>().unwrap().unwrap();

        assert_eq!(a.as_str(), "instance-1");
        assert_eq!(b.as_str(), "instance-2");
        assert!(!Arc::ptr_eq(&a, &b)); // Different instances
    }

    #[test]
    fn test_singleton_scope() {
        let mut binder = Binder::new();
        binder
            .bind::<String>(
                FnDescriptor::new(|_| Ok(String::from("cached"))),
                &[BindingTag::scoped(ScopeId::SINGLETON)],
            )
            .unwrap();

        let context = binder.build().unwrap();
        let a = context.resolve::<String>().unwrap().unwrap();
        let b = context.resolve::<String>().unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_qualified_resolution() {
        let mut binder = Binder::new();
        binder
            .bind_instance(String::from("primary"), &[BindingTag::named("primary")])
            .unwrap();
        binder
            .bind_instance(String::from("replica"), &[BindingTag::named("replica")])
            .unwrap();

        let context = binder.build().unwrap();
        let primary = context
            .resolve_qualified::<String>(Qualifier::Named("primary"))
            .unwrap()
            .unwrap();
        let replica = context
            .resolve_qualified::<String>(Qualifier::Named("replica"))
            .unwrap()
            .unwrap();

        assert_eq!(primary.as_str(), "primary");
        assert_eq!(replica.as_str(), "replica");
        // The qualified bindings leave the plain identity unbound
        assert!(context.resolve::<String>().unwrap().is_none());
    }

    #[test]
    fn test_trait_object_resolution() {
        trait Greeter: Send + Sync {
            fn greet(&self) -> String;
        }

        struct English;
        impl Greeter for English {
            fn greet(&self) -> String {
                "hello".to_string()
            }
        }

        let mut binder = Binder::new();
        binder
            .bind_instance::<Arc<dyn Greeter>>(Arc::new(English), &[])
            .unwrap();

        let context = binder.build().unwrap();
        let greeter = context.resolve::<Arc<dyn Greeter>>().unwrap().unwrap();
        assert_eq!(greeter.greet(), "hello");
    }
}
