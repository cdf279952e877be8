#![no_main]

use libfuzzer_sys::fuzz_target;
use bindery::{Binder, BindingTag, Component, ComponentRef, DiError, FnDescriptor, Qualifier};

// Fixed node identities so repeated runs never allocate fresh qualifier names
const NODES: [&str; 8] = ["n0", "n1", "n2", "n3", "n4", "n5", "n6", "n7"];

fn node(index: usize) -> Qualifier {
    Qualifier::Named(NODES[index])
}

fuzz_target!(|data: &[u8]| {
    if data.len() < NODES.len() + 1 {
        return;
    }

    let count = 2 + (data[0] as usize) % (NODES.len() - 1);

    // One adjacency byte per node; bit j set means an edge to node j
    let mut edges: Vec<Vec<usize>> = Vec::with_capacity(count);
    for i in 0..count {
        let mask = data[1 + i];
        let mut targets = Vec::new();
        for j in 0..count {
            if j != i && mask & (1 << j) != 0 {
                targets.push(j);
            }
        }
        edges.push(targets);
    }

    let mut binder = Binder::new();
    for (i, targets) in edges.iter().enumerate() {
        let arity = targets.len();
        let mut descriptor = FnDescriptor::new(move |args| {
            for _ in 0..arity {
                args.take::<u32>()?;
            }
            Ok(0u32)
        });
        for &j in targets {
            descriptor = descriptor.requires(ComponentRef::qualified::<u32>(node(j)));
        }
        binder
            .bind::<u32>(descriptor, &[BindingTag::Qualified(node(i))])
            .unwrap();
    }

    match binder.build() {
        Ok(context) => {
            // Validation passed, so every node must resolve
            for i in 0..count {
                let resolved = context.resolve_qualified::<u32>(node(i)).unwrap();
                assert!(resolved.is_some());
            }
        }
        Err(DiError::CyclicDependency(path)) => {
            // The reported path must be a closed walk over declared edges
            assert!(path.len() >= 2);
            assert_eq!(path.first(), path.last());
            for pair in path.windows(2) {
                let from = position_of(&pair[0]);
                let to = position_of(&pair[1]);
                assert!(
                    edges[from].contains(&to),
                    "cycle reports an edge {} -> {} that was never declared",
                    NODES[from],
                    NODES[to]
                );
            }
        }
        Err(other) => panic!("unexpected build error: {other}"),
    }
});

fn position_of(component: &Component) -> usize {
    match component.qualifier() {
        Some(Qualifier::Named(name)) => NODES
            .iter()
            .position(|candidate| candidate == &name)
            .unwrap(),
        other => panic!("unexpected qualifier in cycle report: {:?}", other),
    }
}
