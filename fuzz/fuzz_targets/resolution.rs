#![no_main]

use libfuzzer_sys::fuzz_target;
use bindery::{
    Binder, BindingTag, Component, ComponentRef, ContainerKind, DiError, FnDescriptor, Qualifier,
    ScopeId,
};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let pattern = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let value = i32::from_le_bytes([data[4], data[5], data[6], data[7]]);

    let mut binder = Binder::new();
    binder.bind_instance(Payload { value }, &[]).unwrap();
    binder
        .bind::<Counter>(
            FnDescriptor::new(|_| Ok(Counter)),
            &[BindingTag::scoped(ScopeId::SINGLETON), BindingTag::named("main")],
        )
        .unwrap();
    let context = binder.build().unwrap();

    match pattern % 6 {
        0 => {
            // Unbound identities resolve absent, never error
            assert!(context.resolve::<Unbound>().unwrap().is_none());
            assert!(context
                .resolve_qualified::<Unbound>(Qualifier::Named("ghost"))
                .unwrap()
                .is_none());
        }
        1 => {
            // A qualifier the binding never declared is a miss
            assert!(context
                .resolve_qualified::<Payload>(Qualifier::Named("ghost"))
                .unwrap()
                .is_none());
            assert!(context
                .resolve_qualified::<Payload>(Qualifier::Marker("Ghost"))
                .unwrap()
                .is_none());
        }
        2 => {
            // Deferred handles exist only for bound identities
            assert!(context.resolve_deferred::<Unbound>().is_none());

            let handle = context.resolve_deferred::<Payload>().unwrap();
            let payload = handle.resolve_as::<Payload>().unwrap();
            assert_eq!(payload.value, value);
        }
        3 => {
            // Forcing through the wrong type is a mismatch, not a panic
            let handle = context.resolve_deferred::<Payload>().unwrap();
            let err = handle.resolve_as::<Counter>().err();
            assert!(matches!(err, Some(DiError::TypeMismatch(_))));

            // The handle still works with the right type afterwards
            let payload = handle.resolve_as::<Payload>().unwrap();
            assert_eq!(payload.value, value);
        }
        4 => {
            // Collection references resolve absent even for bound targets
            let reference = ComponentRef::wrapped(Component::of::<Payload>(), ContainerKind::Collection);
            assert!(context.get(&reference).unwrap().is_none());

            // The direct binding is untouched
            assert!(context.resolve::<Payload>().unwrap().is_some());
        }
        5 => {
            // Qualified deferred handles share the singleton cache
            let handle = context
                .resolve_deferred_qualified::<Counter>(Qualifier::Named("main"))
                .unwrap();
            let through_handle = handle.resolve_as::<Counter>().unwrap();
            let direct = context
                .resolve_qualified::<Counter>(Qualifier::Named("main"))
                .unwrap()
                .unwrap();
            assert!(Arc::ptr_eq(&through_handle, &direct));
        }
        _ => unreachable!(),
    }
});

#[derive(Debug)]
struct Payload {
    value: i32,
}

struct Counter;

struct Unbound;
