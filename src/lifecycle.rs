//! Instantiation lifecycle policies.

/// Controls whether a dependency's provider runs on every resolution or at
/// most once.
///
/// # Examples
///
/// ```rust
/// use coil_di::{RegisterOptions, Registry};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counted = calls.clone();
///
/// let mut registry = Registry::new();
/// registry.register_with::<usize, _>(
///     "next_id",
///     move || counted.fetch_add(1, Ordering::SeqCst) + 1,
///     RegisterOptions::singleton(),
/// ).unwrap();
///
/// // Singleton: the provider runs once, every resolution sees the cache.
/// assert_eq!(*registry.get::<usize>().unwrap(), 1);
/// assert_eq!(*registry.get::<usize>().unwrap(), 1);
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Fresh instance per resolution, never cached.
    ///
    /// The provider runs every time the dependency is invoked, including
    /// its side effects.
    #[default]
    Factory,
    /// Single cached instance for the registry's lifetime.
    ///
    /// The provider runs at most once; subsequent invocations return the
    /// cached value without calling it again.
    Singleton,
}

/// Controls when a singleton's instance is created.
///
/// `Eager` is only legal together with [`Lifecycle::Singleton`]: a factory
/// produces a new instance on demand, so instantiating one ahead of time is
/// meaningless and rejected at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eagerness {
    /// The provider runs on first resolution.
    #[default]
    Lazy,
    /// The provider runs at registration time, before any resolution.
    Eager,
}
