//! Mutex-serialized registry sharing for multi-threaded embedders.
//!
//! The base [`Registry`] has no internal locking. When registration and
//! resolution must run concurrently, every mutating operation has to be
//! serialized behind one lock per registry instance; [`SharedRegistry`]
//! packages exactly that. Resolution returns `Arc<Dependency>` handles that
//! are invoked *outside* the lock, and a singleton's cache is the
//! descriptor's own once-cell, so first invocations are serialized by the
//! cell and reads of an already-cached singleton stay lock-free.
//!
//! The `parking-lot` cargo feature swaps the std mutex for
//! `parking_lot::Mutex`.

#[cfg(feature = "parking-lot")]
use parking_lot::Mutex;
#[cfg(not(feature = "parking-lot"))]
use std::sync::Mutex;

use std::sync::Arc;

use crate::dependency::Dependency;
use crate::error::DiResult;
use crate::injector::{Consumer, Overrides};
use crate::registry::{RegisterOptions, Registry};

/// Cloneable, thread-safe handle over a [`Registry`].
///
/// # Examples
///
/// ```rust
/// use coil_di::SharedRegistry;
///
/// let registry = SharedRegistry::new();
/// registry.register("answer", || 42u32).unwrap();
///
/// let handle = registry.clone();
/// let worker = std::thread::spawn(move || *handle.get::<u32>().unwrap());
/// assert_eq!(worker.join().unwrap(), 42);
/// ```
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    /// A shared handle over a fresh empty registry.
    pub fn new() -> Self {
        Self::from_registry(Registry::new())
    }

    /// Wraps an already-configured registry.
    pub fn from_registry(registry: Registry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    #[cfg(feature = "parking-lot")]
    fn lock(&self) -> parking_lot::MutexGuard<'_, Registry> {
        self.inner.lock()
    }

    #[cfg(not(feature = "parking-lot"))]
    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers a provider with the default options. See
    /// [`Registry::register`].
    pub fn register<T, F>(&self, name: &'static str, provider: F) -> DiResult<Arc<Dependency>>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.lock().register(name, provider)
    }

    /// Registers a provider with explicit options. See
    /// [`Registry::register_with`].
    pub fn register_with<T, F>(
        &self,
        name: &'static str,
        provider: F,
        options: RegisterOptions,
    ) -> DiResult<Arc<Dependency>>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.lock().register_with(name, provider, options)
    }

    /// Resolves the descriptor for `T`; the descriptor is invoked outside
    /// the lock.
    pub fn resolve<T: 'static>(&self) -> DiResult<Arc<Dependency>> {
        self.lock().resolve::<T>()
    }

    /// Resolves a descriptor by registration name.
    pub fn resolve_named(&self, name: &'static str) -> DiResult<Arc<Dependency>> {
        self.lock().resolve_named(name)
    }

    /// Resolves and invokes in one step. The lookup holds the lock; the
    /// invocation does not.
    pub fn get<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.resolve::<T>()?.invoke_as::<T>()
    }

    /// Resolves by name and invokes in one step.
    pub fn get_named<T: Send + Sync + 'static>(&self, name: &'static str) -> DiResult<Arc<T>> {
        self.resolve_named(name)?.invoke_as::<T>()
    }

    /// Injects a consumer. The lock is held for the whole injection, so
    /// provider bodies run serialized; see [`Registry::inject`].
    pub fn inject<R: 'static>(&self, consumer: &Consumer<R>) -> DiResult<R> {
        self.lock().inject(consumer)
    }

    /// Injects a consumer with name overrides.
    pub fn inject_with<R: 'static>(
        &self,
        consumer: &Consumer<R>,
        overrides: &Overrides,
    ) -> DiResult<R> {
        self.lock().inject_with(consumer, overrides)
    }

    /// Clears all registry indices. See [`Registry::reinitialize`].
    pub fn reinitialize(&self) {
        self.lock().reinitialize();
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry holds no registrations.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new()
    }
}
