//! Build-time dependency graph validation.
//!
//! Runs inside [`Binder::build`](crate::Binder::build), before any
//! component can be produced: every bound component is walked as a DFS
//! root with a fresh visiting stack, so missing dependencies and cycles
//! are configuration errors, not runtime surprises.

use crate::component::Component;
use crate::error::{DiError, DiResult};
use crate::provider::ComponentProvider;
use crate::registry::Registry;

/// Proves the dependency graph sound: every referenced identity is bound,
/// and no direct-ref path loops.
///
/// Container-wrapped refs are existence-checked but never recursed into;
/// deferred indirection is the sanctioned way to break cycles. First
/// error wins.
pub(crate) fn check(registry: &Registry) -> DiResult<()> {
    for (root, provider) in registry.iter() {
        let mut visiting = Vec::new();
        check_provider(registry, *root, provider.as_ref(), &mut visiting)?;
    }
    Ok(())
}

fn check_provider(
    registry: &Registry,
    owner: Component,
    provider: &dyn ComponentProvider,
    visiting: &mut Vec<Component>,
) -> DiResult<()> {
    for dependency in provider.dependencies() {
        let target = dependency.component();
        let target_provider = match registry.get(&target) {
            Some(provider) => provider,
            None => {
                return Err(DiError::DependencyNotFound {
                    owner,
                    missing: target,
                })
            }
        };
        if dependency.is_container() {
            continue;
        }
        if let Some(position) = visiting.iter().position(|c| *c == target) {
            // Trim to the offending cycle: entry chains into it are not
            // part of the report.
            let mut cycle: Vec<Component> = visiting[position..].to_vec();
            cycle.push(target);
            return Err(DiError::CyclicDependency(cycle));
        }
        visiting.push(target);
        let result = check_provider(registry, target, target_provider.as_ref(), visiting);
        visiting.pop();
        result?;
    }
    Ok(())
}
