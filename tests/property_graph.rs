/// Property-based tests for dependency graph construction
///
/// These build chains and rings of arbitrary shape out of one link type,
/// multiplied into distinct identities through qualifiers, and verify that
/// validation and resolution hold for every shape.

use bindery::{
    Binder, BindingTag, Component, ComponentRef, Deferred, DiError, FnDescriptor, Qualifier,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

struct Link {
    depth: usize,
    next: Option<Arc<Link>>,
    lazy: Option<Deferred>,
}

/// Qualifier for the synthetic node at `index`. Generated names have to be
/// leaked to satisfy the `'static` bound; qualifiers compare by text, so
/// repeated calls agree.
fn node(index: usize) -> Qualifier {
    Qualifier::Named(Box::leak(format!("node-{}", index).into_boxed_str()))
}

proptest! {
    #[test]
    fn chain_of_any_length_builds_and_resolves(len in 1usize..20) {
        let mut binder = Binder::new();

        for i in 0..len {
            let has_next = i + 1 < len;
            let mut descriptor = FnDescriptor::new(move |args| {
                let next = if has_next {
                    Some(args.take::<Link>()?)
                } else {
                    None
                };
                Ok(Link { depth: i, next, lazy: None })
            });
            if has_next {
                descriptor = descriptor.requires(ComponentRef::qualified::<Link>(node(i + 1)));
            }
            binder.bind::<Link>(descriptor, &[BindingTag::Qualified(node(i))]).unwrap();
        }

        let context = binder.build().unwrap();
        let head = context.resolve_qualified::<Link>(node(0)).unwrap().unwrap();

        let mut cursor = Some(head);
        let mut seen = 0;
        while let Some(link) = cursor {
            prop_assert_eq!(link.depth, seen);
            seen += 1;
            cursor = link.next.clone();
        }
        prop_assert_eq!(seen, len);
    }
}

proptest! {
    #[test]
    fn ring_of_any_size_is_rejected(size in 2usize..8) {
        let mut binder = Binder::new();

        for i in 0..size {
            let succ = (i + 1) % size;
            binder
                .bind::<Link>(
                    FnDescriptor::new(move |args| {
                        Ok(Link {
                            depth: i,
                            next: Some(args.take::<Link>()?),
                            lazy: None,
                        })
                    })
                    .requires(ComponentRef::qualified::<Link>(node(succ))),
                    &[BindingTag::Qualified(node(i))],
                )
                .unwrap();
        }

        let path = match binder.build().err() {
            Some(DiError::CyclicDependency(path)) => path,
            other => panic!("expected a cycle, got: {:?}", other),
        };

        // Closed path visiting every ring member exactly once
        prop_assert_eq!(path.len(), size + 1);
        prop_assert_eq!(path.first(), path.last());

        let expected: HashSet<Component> = (0..size)
            .map(|i| Component::qualified::<Link>(node(i)))
            .collect();
        let seen: HashSet<Component> = path[..size].iter().copied().collect();
        prop_assert_eq!(seen, expected);
    }
}

proptest! {
    #[test]
    fn chain_with_missing_tail_blames_the_last_link(len in 1usize..10) {
        let mut binder = Binder::new();

        // Every node declares a successor; node `len` is never bound
        for i in 0..len {
            binder
                .bind::<Link>(
                    FnDescriptor::new(move |args| {
                        Ok(Link {
                            depth: i,
                            next: Some(args.take::<Link>()?),
                            lazy: None,
                        })
                    })
                    .requires(ComponentRef::qualified::<Link>(node(i + 1))),
                    &[BindingTag::Qualified(node(i))],
                )
                .unwrap();
        }

        match binder.build().err() {
            Some(DiError::DependencyNotFound { owner, missing }) => {
                prop_assert_eq!(owner, Component::qualified::<Link>(node(len - 1)));
                prop_assert_eq!(missing, Component::qualified::<Link>(node(len)));
            }
            other => panic!("expected dependency-not-found, got: {:?}", other),
        }
    }
}

proptest! {
    #[test]
    fn ring_with_a_deferred_edge_builds(size in 2usize..8, seed in any::<usize>()) {
        let cut = seed % size;
        let mut binder = Binder::new();

        for i in 0..size {
            let succ = (i + 1) % size;
            let is_cut = i == cut;
            let reference = if is_cut {
                ComponentRef::deferred(Component::qualified::<Link>(node(succ)))
            } else {
                ComponentRef::qualified::<Link>(node(succ))
            };
            binder
                .bind::<Link>(
                    FnDescriptor::new(move |args| {
                        if is_cut {
                            Ok(Link {
                                depth: i,
                                next: None,
                                lazy: Some(args.take_deferred()?),
                            })
                        } else {
                            Ok(Link {
                                depth: i,
                                next: Some(args.take::<Link>()?),
                                lazy: None,
                            })
                        }
                    })
                    .requires(reference),
                    &[BindingTag::Qualified(node(i))],
                )
                .unwrap();
        }

        // One lazy edge makes any ring buildable
        let context = binder.build().unwrap();
        let cut_link = context.resolve_qualified::<Link>(node(cut)).unwrap().unwrap();
        let handle = cut_link.lazy.as_ref().unwrap();

        // Forcing the handle after construction walks the ring once and stops
        // at the next lazy edge
        prop_assert!(handle.resolve_as::<Link>().is_ok());
    }
}

proptest! {
    #[test]
    fn rebinding_always_keeps_the_last_value(values in prop::collection::vec(any::<u64>(), 1..10)) {
        let mut binder = Binder::new();
        for value in &values {
            binder.bind_instance(*value, &[]).unwrap();
        }

        let context = binder.build().unwrap();
        let resolved = context.resolve::<u64>().unwrap().unwrap();
        prop_assert_eq!(*resolved, *values.last().unwrap());
    }
}

proptest! {
    #[test]
    fn unbound_identities_resolve_absent(name in "[a-z]{1,12}") {
        let context = Binder::new().build().unwrap();
        let qualifier = Qualifier::Named(Box::leak(name.into_boxed_str()));

        prop_assert!(context.resolve_qualified::<Link>(qualifier).unwrap().is_none());
        prop_assert!(context.resolve_deferred_qualified::<Link>(qualifier).is_none());
        prop_assert!(context
            .get(&ComponentRef::qualified::<Link>(qualifier))
            .unwrap()
            .is_none());
    }
}
