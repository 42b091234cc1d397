//! Registration validation: lifecycle rules, role conflicts, and the
//! all-or-nothing guarantee.

use coil_di::{
    AnyValue, DefinitionProblem, DiError, RegisterOptions, Registry, Signature,
    SignatureReflection, TypeReflection, TypeToken,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_eager_factory_is_rejected() {
    let mut registry = Registry::new();
    let result = registry.register_with(
        "impossible",
        || 1usize,
        RegisterOptions {
            eagerness: coil_di::Eagerness::Eager,
            ..RegisterOptions::factory()
        },
    );

    match result {
        Err(DiError::EagerFactory { dependency }) => assert_eq!(dependency, "impossible"),
        other => panic!("expected EagerFactory, got {:?}", other.map(|_| ())),
    }
    assert!(registry.is_empty());
}

#[test]
fn test_primary_and_named_roles_are_mutually_exclusive() {
    let mut registry = Registry::new();
    let result = registry.register_with(
        "greedy",
        || 1usize,
        RegisterOptions::factory().as_primary().named("also_named"),
    );

    match result {
        Err(DiError::RoleConflict { dependency }) => assert_eq!(dependency, "greedy"),
        other => panic!("expected RoleConflict, got {:?}", other.map(|_| ())),
    }
    // Nothing was registered: the failure is a no-op.
    assert!(registry.is_empty());
    assert!(matches!(registry.get::<usize>(), Err(DiError::NotFound(_))));
    assert!(matches!(
        registry.get_named::<usize>("also_named"),
        Err(DiError::NotFound(_))
    ));
}

#[test]
fn test_second_primary_for_a_type_is_rejected() {
    let mut registry = Registry::new();
    registry
        .register_with("original", || 1usize, RegisterOptions::factory().as_primary())
        .unwrap();

    let result = registry.register_with(
        "usurper",
        || 2usize,
        RegisterOptions::factory().as_primary(),
    );

    match result {
        Err(DiError::PrimaryConflict { dependency, type_name }) => {
            assert_eq!(dependency, "usurper");
            assert!(type_name.contains("usize"));
        }
        other => panic!("expected PrimaryConflict, got {:?}", other.map(|_| ())),
    }

    // The original primary remains resolvable and the rejected provider
    // joined no index.
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.resolve::<usize>().unwrap().name(), "original");
}

#[test]
fn test_duplicate_name_is_rejected() {
    let mut registry = Registry::new();
    registry
        .register_with("first", || 1usize, RegisterOptions::factory().named("shared"))
        .unwrap();

    let result = registry.register_with(
        "second",
        || 2usize,
        RegisterOptions::factory().named("shared"),
    );

    match result {
        Err(DiError::NameConflict { dependency, name }) => {
            assert_eq!(dependency, "second");
            assert_eq!(name, "shared");
        }
        other => panic!("expected NameConflict, got {:?}", other.map(|_| ())),
    }
    assert_eq!(registry.len(), 1);
    assert_eq!(*registry.get_named::<usize>("shared").unwrap(), 1);
}

#[test]
fn test_incomplete_signature_aggregates_every_defect() {
    let mut registry = Registry::new();
    let signature = Signature::new("half_declared")
        .param::<String>("declared")
        .untyped_param("first_missing")
        .untyped_param("second_missing");

    let result = registry.register_erased(
        signature,
        || -> AnyValue { Arc::new(0usize) },
        RegisterOptions::factory(),
    );

    match result {
        Err(DiError::Definition { dependency, problems }) => {
            assert_eq!(dependency, "half_declared");
            assert_eq!(
                problems,
                vec![
                    DefinitionProblem::MissingParameterType { parameter: "first_missing" },
                    DefinitionProblem::MissingParameterType { parameter: "second_missing" },
                    DefinitionProblem::MissingReturnType,
                ]
            );
        }
        other => panic!("expected Definition, got {:?}", other.map(|_| ())),
    }
    assert!(registry.is_empty());
}

#[test]
fn test_lazy_singleton_provider_does_not_run_at_registration() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();

    let mut registry = Registry::new();
    let descriptor = registry
        .register_with::<usize, _>(
            "deferred",
            move || {
                counted.fetch_add(1, Ordering::SeqCst);
                7
            },
            RegisterOptions::singleton(),
        )
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!descriptor.is_instantiated());

    assert_eq!(*registry.get::<usize>().unwrap(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(descriptor.is_instantiated());
}

#[test]
fn test_eager_singleton_provider_runs_once_at_registration() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();

    let mut registry = Registry::new();
    let descriptor = registry
        .register_with::<usize, _>(
            "prewarmed",
            move || {
                counted.fetch_add(1, Ordering::SeqCst);
                7
            },
            RegisterOptions::eager_singleton(),
        )
        .unwrap();

    // Invoked exactly once, at registration, before any resolution.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(descriptor.is_instantiated());

    assert_eq!(*registry.get::<usize>().unwrap(), 7);
    assert_eq!(*registry.get::<usize>().unwrap(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_registration_consults_the_injected_reflection_service() {
    struct CountingReflection {
        calls: AtomicUsize,
    }

    impl TypeReflection for CountingReflection {
        fn parameter_types(
            &self,
            signature: &Signature,
        ) -> Vec<(&'static str, Option<TypeToken>)> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SignatureReflection.parameter_types(signature)
        }

        fn return_type(&self, signature: &Signature) -> Option<TypeToken> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SignatureReflection.return_type(signature)
        }
    }

    let reflection = Arc::new(CountingReflection {
        calls: AtomicUsize::new(0),
    });
    let mut registry = Registry::with_reflection(reflection.clone());
    registry.register("answer", || 42usize).unwrap();

    // One parameter sweep and one return-type lookup per registration.
    assert_eq!(reflection.calls.load(Ordering::SeqCst), 2);
    assert_eq!(*registry.get::<usize>().unwrap(), 42);
}

#[test]
fn test_failed_registration_never_runs_an_eager_provider() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();

    let mut registry = Registry::new();
    registry
        .register_with("occupant", || 1usize, RegisterOptions::factory().named("taken"))
        .unwrap();

    let result = registry.register_with::<usize, _>(
        "loser",
        move || {
            counted.fetch_add(1, Ordering::SeqCst);
            2
        },
        RegisterOptions::eager_singleton().named("taken"),
    );

    assert!(matches!(result, Err(DiError::NameConflict { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(registry.len(), 1);
}
