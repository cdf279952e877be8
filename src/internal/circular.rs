//! Construction re-entry detection.
//!
//! Build-time validation proves the declared graph acyclic, but user code
//! can escape it, e.g. by invoking a deferred handle inside a constructor
//! whose chain loops back into the component being built. A per-thread
//! stack of components under construction turns that into a reported
//! cycle instead of unbounded recursion.

use std::cell::RefCell;

use crate::component::Component;
use crate::error::{DiError, DiResult};

thread_local! {
    static CONSTRUCTION_TLS: RefCell<Vec<Component>> = RefCell::new(Vec::new());
}

/// RAII frame on the per-thread construction stack.
///
/// Detection happens BEFORE pushing: re-entering a component already on
/// the stack yields `CyclicDependency` with the path trimmed to exactly
/// the offending cycle, closed by repeating the re-entered component.
pub(crate) struct ConstructionGuard {
    component: Component,
}

impl ConstructionGuard {
    pub(crate) fn enter(component: Component) -> DiResult<Self> {
        CONSTRUCTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();
            if let Some(position) = stack.iter().position(|c| *c == component) {
                let mut cycle: Vec<Component> = stack[position..].to_vec();
                cycle.push(component);
                return Err(DiError::CyclicDependency(cycle));
            }
            stack.push(component);
            Ok(())
        })?;
        Ok(Self { component })
    }
}

impl Drop for ConstructionGuard {
    fn drop(&mut self) {
        CONSTRUCTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();
            if let Some(popped) = stack.pop() {
                debug_assert_eq!(popped, self.component);
            }
        });
    }
}
