//! Property-based tests for registration and resolution laws.
//!
//! These verify the ordering and uniqueness invariants over generated
//! registration sequences rather than hand-picked examples.

use coil_di::{RegisterOptions, Registry};
use proptest::prelude::*;

proptest! {
    // The first-registered provider is the type default, however many
    // providers pile up behind it.
    #[test]
    fn first_registered_wins(count in 1usize..16) {
        let mut registry = Registry::new();
        for i in 0..count {
            registry.register("numbered", move || i).unwrap();
        }
        prop_assert_eq!(registry.len(), count);
        prop_assert_eq!(*registry.get::<usize>().unwrap(), 0);
    }
}

proptest! {
    // An explicit primary wins over registration order wherever it lands.
    #[test]
    fn primary_wins_regardless_of_position(count in 1usize..16, position in 0usize..16) {
        let primary_at = position % count;
        let mut registry = Registry::new();
        for i in 0..count {
            let options = if i == primary_at {
                RegisterOptions::factory().as_primary()
            } else {
                RegisterOptions::factory()
            };
            registry.register_with("numbered", move || i, options).unwrap();
        }
        prop_assert_eq!(*registry.get::<usize>().unwrap(), primary_at);
    }
}

proptest! {
    // A taken name rejects every later claimant and the registry keeps
    // exactly the registrations that succeeded.
    #[test]
    fn duplicate_names_always_conflict(claimants in 1usize..8) {
        let mut registry = Registry::new();
        registry
            .register_with("occupant", || 0usize, RegisterOptions::factory().named("taken"))
            .unwrap();

        for i in 1..=claimants {
            let result = registry.register_with(
                "claimant",
                move || i,
                RegisterOptions::factory().named("taken"),
            );
            prop_assert!(result.is_err());
        }

        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(*registry.get_named::<usize>("taken").unwrap(), 0);
    }
}

proptest! {
    // Singletons converge on one value no matter how often they are
    // resolved; factories count every resolution.
    #[test]
    fn lifecycle_laws_hold_for_any_resolution_count(resolutions in 1usize..32) {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let singleton_calls = Arc::new(AtomicUsize::new(0));
        let factory_calls = Arc::new(AtomicUsize::new(0));

        let mut registry = Registry::new();
        let counted = singleton_calls.clone();
        registry
            .register_with::<usize, _>(
                "cached",
                move || counted.fetch_add(1, Ordering::SeqCst) + 1,
                RegisterOptions::singleton(),
            )
            .unwrap();
        let counted = factory_calls.clone();
        registry
            .register_with::<u64, _>(
                "fresh",
                move || (counted.fetch_add(1, Ordering::SeqCst) + 1) as u64,
                RegisterOptions::factory(),
            )
            .unwrap();

        for i in 1..=resolutions {
            prop_assert_eq!(*registry.get::<usize>().unwrap(), 1);
            prop_assert_eq!(*registry.get::<u64>().unwrap(), i as u64);
        }

        prop_assert_eq!(singleton_calls.load(Ordering::SeqCst), 1);
        prop_assert_eq!(factory_calls.load(Ordering::SeqCst), resolutions);
    }
}
