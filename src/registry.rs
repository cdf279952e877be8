//! Component registry storage.

use std::collections::HashMap;
use std::sync::Arc;

use crate::component::Component;
use crate::provider::ComponentProvider;

const SMALL_THRESHOLD: usize = 16;

/// Binding storage tuned for small registries.
///
/// Containers commonly hold a handful of bindings, where a linear scan
/// over a dense vector beats hashing. Past `SMALL_THRESHOLD` entries the
/// registry migrates to a `HashMap`. Rebinding an identity replaces the
/// previous provider (last bind wins).
pub(crate) struct Registry {
    small: Vec<(Component, Arc<dyn ComponentProvider>)>,
    large: HashMap<Component, Arc<dyn ComponentProvider>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            small: Vec::new(),
            large: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, component: Component, provider: Arc<dyn ComponentProvider>) {
        if self.large.is_empty() {
            if let Some(position) = self.small.iter().position(|(c, _)| *c == component) {
                self.small[position].1 = provider;
                return;
            }
            if self.small.len() < SMALL_THRESHOLD {
                self.small.push((component, provider));
                return;
            }
            self.migrate();
        }
        self.large.insert(component, provider);
    }

    fn migrate(&mut self) {
        for (component, provider) in self.small.drain(..) {
            self.large.insert(component, provider);
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, component: &Component) -> Option<&Arc<dyn ComponentProvider>> {
        if !self.small.is_empty() {
            self.small
                .iter()
                .find(|(c, _)| c == component)
                .map(|(_, provider)| provider)
        } else {
            self.large.get(component)
        }
    }

    #[inline(always)]
    pub(crate) fn contains(&self, component: &Component) -> bool {
        self.get(component).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.small.len() + self.large.len()
    }

    pub(crate) fn iter(
        &self,
    ) -> impl Iterator<Item = (&Component, &Arc<dyn ComponentProvider>)> + '_ {
        self.small
            .iter()
            .map(|(component, provider)| (component, provider))
            .chain(self.large.iter())
    }

    /// Sorts the dense storage for scan locality. Bindings never change
    /// after this point.
    pub(crate) fn finalize(&mut self) {
        self.small.sort_by(|a, b| a.0.cmp(&b.0));
    }
}
