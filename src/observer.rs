//! Observation hooks for component production.
//!
//! Observers see every production attempt: start, success with timing,
//! and failure. They are the container's only observability seam; nothing
//! is logged unless an observer is registered.

use std::sync::Arc;
use std::time::Duration;

use crate::component::Component;
use crate::error::DiError;

/// Observer of component production events.
///
/// Calls are made synchronously on the resolving thread, so keep
/// implementations lightweight.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use bindery::{Binder, Component, ContainerObserver, DiError};
///
/// struct TracingObserver {
///     trace_id: String,
/// }
///
/// impl ContainerObserver for TracingObserver {
///     fn producing(&self, component: &Component) {
///         println!("[{}] producing {}", self.trace_id, component);
///     }
///
///     fn produced(&self, component: &Component, duration: Duration) {
///         println!("[{}] produced {} in {:?}", self.trace_id, component, duration);
///     }
///
///     fn failed(&self, component: &Component, error: &DiError) {
///         eprintln!("[{}] {} failed: {}", self.trace_id, component, error);
///     }
/// }
///
/// let mut binder = Binder::new();
/// binder.add_observer(Arc::new(TracingObserver { trace_id: "run-7".to_string() }));
/// ```
pub trait ContainerObserver: Send + Sync {
    /// Called before a provider runs.
    fn producing(&self, component: &Component);

    /// Called after a provider returns successfully.
    ///
    /// `duration` covers the provider run, including nested productions.
    fn produced(&self, component: &Component, duration: Duration);

    /// Called after a provider returns an error. The error still
    /// propagates to the caller.
    fn failed(&self, component: &Component, error: &DiError);
}

/// Registered observers.
///
/// Holds all observers and fans production events out to them. Designed
/// for zero overhead on the unobserved path.
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ContainerObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn ContainerObserver>) {
        self.observers.push(observer);
    }

    /// Returns true if any observers are registered.
    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn producing(&self, component: &Component) {
        for observer in &self.observers {
            observer.producing(component);
        }
    }

    #[inline]
    pub(crate) fn produced(&self, component: &Component, duration: Duration) {
        for observer in &self.observers {
            observer.produced(component, duration);
        }
    }

    #[inline]
    pub(crate) fn failed(&self, component: &Component, error: &DiError) {
        for observer in &self.observers {
            observer.failed(component, error);
        }
    }
}

/// Built-in observer that logs production events to stdout/stderr.
///
/// Useful during development; production systems are expected to bring
/// their own [`ContainerObserver`] wired to their logging stack.
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a logging observer with the default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[bindery]".to_string(),
        }
    }

    /// Creates a logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerObserver for LoggingObserver {
    fn producing(&self, component: &Component) {
        println!("{} Producing: {}", self.prefix, component);
    }

    fn produced(&self, component: &Component, duration: Duration) {
        println!("{} Produced: {} in {:?}", self.prefix, component, duration);
    }

    fn failed(&self, component: &Component, error: &DiError) {
        eprintln!("{} FAILED {}: {}", self.prefix, component, error);
    }
}
