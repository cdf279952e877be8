#![no_main]

use libfuzzer_sys::fuzz_target;
use bindery::{Binder, BindingTag, DiError, FnDescriptor, IllegalComponent, Qualifier, ScopeId};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let mut binder = Binder::new();

    // First 4 bytes pick the binding pattern
    let pattern = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);

    // Next 4 bytes carry the payload
    let value = i32::from_le_bytes([data[4], data[5], data[6], data[7]]);

    match pattern % 6 {
        0 => {
            // Instance binding round-trips the payload
            binder.bind_instance(Record { value }, &[]).unwrap();

            let context = binder.build().unwrap();
            let record = context.resolve::<Record>().unwrap().unwrap();
            assert_eq!(record.value, value);
        }
        1 => {
            // Unscoped descriptors produce a fresh instance every time
            binder
                .bind::<Record>(FnDescriptor::new(move |_| Ok(Record { value })), &[])
                .unwrap();

            let context = binder.build().unwrap();
            let first = context.resolve::<Record>().unwrap().unwrap();
            let second = context.resolve::<Record>().unwrap().unwrap();
            assert!(!Arc::ptr_eq(&first, &second));
            assert_eq!(first.value, value);
            assert_eq!(second.value, value);
        }
        2 => {
            // Singleton scope caches one instance
            binder
                .bind::<Record>(
                    FnDescriptor::new(move |_| Ok(Record { value })),
                    &[BindingTag::scoped(ScopeId::SINGLETON)],
                )
                .unwrap();

            let context = binder.build().unwrap();
            let first = context.resolve::<Record>().unwrap().unwrap();
            let second = context.resolve::<Record>().unwrap().unwrap();
            assert!(Arc::ptr_eq(&first, &second));
            assert_eq!(first.value, value);
        }
        3 => {
            // Rebinding the same identity replaces the earlier binding
            binder
                .bind_instance(Record { value: value.wrapping_div(2) }, &[])
                .unwrap();
            binder.bind_instance(Record { value }, &[]).unwrap();

            let context = binder.build().unwrap();
            let record = context.resolve::<Record>().unwrap().unwrap();
            assert_eq!(record.value, value);
        }
        4 => {
            // One instance shared across qualified identities, invisible unqualified
            binder
                .bind_instance(
                    Record { value },
                    &[BindingTag::named("left"), BindingTag::named("right")],
                )
                .unwrap();

            let context = binder.build().unwrap();
            let left = context
                .resolve_qualified::<Record>(Qualifier::Named("left"))
                .unwrap()
                .unwrap();
            let right = context
                .resolve_qualified::<Record>(Qualifier::Named("right"))
                .unwrap()
                .unwrap();
            assert!(Arc::ptr_eq(&left, &right));
            assert!(context.resolve::<Record>().unwrap().is_none());
        }
        5 => {
            // Scope tags are rejected on instance bindings
            let err = binder
                .bind_instance(Record { value }, &[BindingTag::scoped(ScopeId::SINGLETON)])
                .err();
            assert!(matches!(
                err,
                Some(DiError::IllegalComponent(IllegalComponent::NotAQualifier(_)))
            ));
        }
        _ => unreachable!(),
    }
});

#[derive(Debug)]
struct Record {
    value: i32,
}
