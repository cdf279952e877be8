use bindery::{
    Binder, BindingTag, Component, ComponentRef, ContainerKind, Deferred, DiError, FnDescriptor,
    Qualifier, ScopeId,
};
use std::sync::{Arc, Mutex};

#[test]
fn test_deferred_handle_for_bound_component() {
    let mut binder = Binder::new();
    binder.bind_instance("lazy".to_string(), &[]).unwrap();

    let context = binder.build().unwrap();
    let handle = context.resolve_deferred::<String>().unwrap();

    assert_eq!(handle.component(), Component::of::<String>());
    let value = handle.resolve_as::<String>().unwrap();
    assert_eq!(value.as_str(), "lazy");
}

#[test]
fn test_deferred_of_unbound_is_none() {
    struct Unbound;

    let binder = Binder::new();
    let context = binder.build().unwrap();

    assert!(context.resolve_deferred::<Unbound>().is_none());
    assert!(context
        .get(&ComponentRef::deferred_of::<Unbound>())
        .unwrap()
        .is_none());
}

#[test]
fn test_collection_reference_always_absent() {
    let mut binder = Binder::new();
    binder.bind_instance(5usize, &[]).unwrap();

    let context = binder.build().unwrap();

    // The target is bound, but collections are not supported
    let reference = ComponentRef::wrapped(Component::of::<usize>(), ContainerKind::Collection);
    assert!(context.get(&reference).unwrap().is_none());

    // The direct identity is untouched by that
    assert!(context.get(&ComponentRef::of::<usize>()).unwrap().is_some());
}

#[test]
fn test_nothing_is_produced_until_the_handle_is_forced() {
    struct Expensive {
        cost: usize,
    }

    struct Service {
        expensive: Deferred,
    }

    let productions = Arc::new(Mutex::new(0));
    let productions_clone = productions.clone();

    let mut binder = Binder::new();
    binder
        .bind::<Expensive>(
            FnDescriptor::new(move |_| {
                let mut c = productions_clone.lock().unwrap();
                *c += 1;
                Ok(Expensive { cost: *c })
            }),
            &[],
        )
        .unwrap();
    binder
        .bind::<Service>(
            FnDescriptor::new(|args| {
                Ok(Service {
                    expensive: args.take_deferred()?,
                })
            })
            .requires(ComponentRef::deferred_of::<Expensive>()),
            &[],
        )
        .unwrap();

    let context = binder.build().unwrap();
    let service = context.resolve::<Service>().unwrap().unwrap();

    // Handing out the handle produced nothing
    assert_eq!(*productions.lock().unwrap(), 0);

    let expensive = service.expensive.resolve_as::<Expensive>().unwrap();
    assert_eq!(expensive.cost, 1);
    assert_eq!(*productions.lock().unwrap(), 1);
}

#[test]
fn test_handle_reproduces_unscoped_components() {
    struct Ticket {
        number: usize,
    }

    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    let mut binder = Binder::new();
    binder
        .bind::<Ticket>(
            FnDescriptor::new(move |_| {
                let mut c = counter_clone.lock().unwrap();
                *c += 1;
                Ok(Ticket { number: *c })
            }),
            &[],
        )
        .unwrap();

    let context = binder.build().unwrap();
    let handle = context.resolve_deferred::<Ticket>().unwrap();

    let first = handle.resolve_as::<Ticket>().unwrap();
    let second = handle.resolve_as::<Ticket>().unwrap();

    // Each force runs the descriptor again
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.number, 1);
    assert_eq!(second.number, 2);
    assert_eq!(*counter.lock().unwrap(), 2);
}

#[test]
fn test_handle_shares_the_singleton_cache() {
    struct Engine;

    let mut binder = Binder::new();
    binder
        .bind::<Engine>(
            FnDescriptor::new(|_| Ok(Engine)),
            &[BindingTag::scoped(ScopeId::SINGLETON)],
        )
        .unwrap();

    let context = binder.build().unwrap();
    let handle = context.resolve_deferred::<Engine>().unwrap();

    let via_handle = handle.resolve_as::<Engine>().unwrap();
    let direct = context.resolve::<Engine>().unwrap().unwrap();

    assert!(Arc::ptr_eq(&via_handle, &direct));
}

#[test]
fn test_resolve_as_with_wrong_type() {
    let mut binder = Binder::new();
    binder.bind_instance("text".to_string(), &[]).unwrap();

    let context = binder.build().unwrap();
    let handle = context.resolve_deferred::<String>().unwrap();

    let err = handle.resolve_as::<usize>().unwrap_err();
    assert!(matches!(err, DiError::TypeMismatch(_)));
}

#[test]
fn test_resolve_deferred_qualified() {
    let mut binder = Binder::new();
    binder
        .bind_instance(443u16, &[BindingTag::named("tls")])
        .unwrap();

    let context = binder.build().unwrap();

    assert!(context.resolve_deferred::<u16>().is_none());
    let handle = context
        .resolve_deferred_qualified::<u16>(Qualifier::Named("tls"))
        .unwrap();

    assert_eq!(
        handle.component(),
        Component::qualified::<u16>(Qualifier::Named("tls"))
    );
    assert_eq!(*handle.resolve_as::<u16>().unwrap(), 443);
}
