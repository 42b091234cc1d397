//! Diagnostic observers for container events.
//!
//! Observers provide hooks for tracing registrations and resolutions
//! without coupling the core to any particular output. Calls are made
//! synchronously; keep implementations lightweight.

use std::sync::Arc;

use crate::dependency::Dependency;

/// Observer for registry events.
///
/// # Examples
///
/// ```rust
/// use coil_di::{Dependency, DiObserver, Registry};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// struct CountingObserver(Arc<AtomicUsize>);
///
/// impl DiObserver for CountingObserver {
///     fn registered(&self, _dependency: &Dependency) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
///     fn resolved(&self, _dependency: &Dependency) {}
///     fn missed(&self, _requested: &'static str) {}
/// }
///
/// let registrations = Arc::new(AtomicUsize::new(0));
/// let mut registry = Registry::new();
/// registry.add_observer(Arc::new(CountingObserver(registrations.clone())));
/// registry.register("answer", || 42u32).unwrap();
/// assert_eq!(registrations.load(Ordering::SeqCst), 1);
/// ```
pub trait DiObserver: Send + Sync {
    /// A dependency was added to the registry.
    fn registered(&self, dependency: &Dependency);

    /// A descriptor was matched for a resolution request.
    fn resolved(&self, dependency: &Dependency);

    /// A resolution request found no matching registration.
    fn missed(&self, requested: &'static str);
}

/// Observer that prints container events to stdout.
pub struct LoggingObserver {
    prefix: &'static str,
}

impl LoggingObserver {
    /// Logger with the default `di` prefix.
    pub fn new() -> Self {
        Self { prefix: "di" }
    }

    /// Logger with a caller-chosen prefix.
    pub fn with_prefix(prefix: &'static str) -> Self {
        Self { prefix }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn registered(&self, dependency: &Dependency) {
        println!(
            "[{}] registered '{}' -> {} ({:?}, {:?})",
            self.prefix,
            dependency.name(),
            dependency.return_type().display_name(),
            dependency.lifecycle(),
            dependency.eagerness(),
        );
    }

    fn resolved(&self, dependency: &Dependency) {
        println!(
            "[{}] resolved '{}' for {}",
            self.prefix,
            dependency.name(),
            dependency.return_type().display_name(),
        );
    }

    fn missed(&self, requested: &'static str) {
        println!("[{}] no match for {}", self.prefix, requested);
    }
}

/// Fan-out over every registered observer.
#[derive(Default)]
pub(crate) struct Observers {
    list: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self { list: Vec::new() }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.list.push(observer);
    }

    pub(crate) fn registered(&self, dependency: &Dependency) {
        for observer in &self.list {
            observer.registered(dependency);
        }
    }

    pub(crate) fn resolved(&self, dependency: &Dependency) {
        for observer in &self.list {
            observer.resolved(dependency);
        }
    }

    pub(crate) fn missed(&self, requested: &'static str) {
        for observer in &self.list {
            observer.missed(requested);
        }
    }
}
