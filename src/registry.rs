//! The container registry: registration, conflict checks, and lookup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dependency::{AnyValue, Dependency, ProviderFn};
use crate::error::{DiError, DiResult};
use crate::lifecycle::{Eagerness, Lifecycle};
use crate::observer::{DiObserver, Observers};
use crate::reflect::{Signature, SignatureReflection, TypeReflection};
use crate::token::{token_of, TypeToken};

/// Options for a single registration.
///
/// The default is the most common shape: a lazy factory holding neither
/// disambiguation role.
///
/// # Examples
///
/// ```rust
/// use coil_di::{RegisterOptions, Registry};
///
/// let mut registry = Registry::new();
/// registry.register_with("primary_greeting", || "hello".to_string(),
///     RegisterOptions::singleton().as_primary()).unwrap();
/// registry.register_with("loud_greeting", || "HELLO".to_string(),
///     RegisterOptions::factory().named("loud")).unwrap();
///
/// assert_eq!(*registry.get::<String>().unwrap(), "hello");
/// assert_eq!(*registry.get_named::<String>("loud").unwrap(), "HELLO");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterOptions {
    /// Instantiation policy. Defaults to [`Lifecycle::Factory`].
    pub lifecycle: Lifecycle,
    /// When a singleton's instance is created. Defaults to
    /// [`Eagerness::Lazy`].
    pub eagerness: Eagerness,
    /// Whether this registration is the designated default for its type.
    pub primary: bool,
    /// Optional string key for name-based resolution.
    pub name: Option<&'static str>,
}

impl RegisterOptions {
    /// A lazy factory (the default policy).
    pub fn factory() -> Self {
        Self::default()
    }

    /// A lazy singleton.
    pub fn singleton() -> Self {
        Self {
            lifecycle: Lifecycle::Singleton,
            ..Self::default()
        }
    }

    /// A singleton instantiated at registration time.
    pub fn eager_singleton() -> Self {
        Self {
            lifecycle: Lifecycle::Singleton,
            eagerness: Eagerness::Eager,
            ..Self::default()
        }
    }

    /// Marks this registration as the primary for its result type.
    pub fn as_primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Registers under `name` for name-based resolution.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }
}

/// The type-keyed registry of dependency descriptors.
///
/// Three indices back resolution: `by_type` keeps an insertion-ordered list
/// of descriptors per result type, `primary_by_type` holds at most one
/// designated default per type, and `by_name` maps unique string keys to
/// descriptors. Every primary and named entry also lives in its `by_type`
/// list, so the indices never dangle.
///
/// Resolution order for a type: the primary if one exists, else the
/// first-registered descriptor. An explicit primary wins over registration
/// order, giving callers a deterministic override without renaming every
/// provider.
///
/// A `Registry` is an owned instance, not process-wide state: independent
/// containers (and independent tests) each construct their own.
///
/// # Examples
///
/// ```rust
/// use coil_di::Registry;
///
/// #[derive(Debug)]
/// struct Config {
///     port: u16,
/// }
///
/// let mut registry = Registry::new();
/// registry.register("default_config", || Config { port: 8080 }).unwrap();
///
/// let config = registry.get::<Config>().unwrap();
/// assert_eq!(config.port, 8080);
/// ```
pub struct Registry {
    by_type: HashMap<TypeToken, Vec<Arc<Dependency>>>,
    primary_by_type: HashMap<TypeToken, Arc<Dependency>>,
    by_name: HashMap<&'static str, Arc<Dependency>>,
    reflection: Arc<dyn TypeReflection>,
    observers: Observers,
}

impl Registry {
    /// Creates an empty registry using [`SignatureReflection`].
    pub fn new() -> Self {
        Self::with_reflection(Arc::new(SignatureReflection))
    }

    /// Creates an empty registry with a caller-supplied reflection service.
    pub fn with_reflection(reflection: Arc<dyn TypeReflection>) -> Self {
        Self {
            by_type: HashMap::new(),
            primary_by_type: HashMap::new(),
            by_name: HashMap::new(),
            reflection,
            observers: Observers::new(),
        }
    }

    /// Adds a diagnostic observer for registry events.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    /// Registers a provider with the default options (lazy factory).
    ///
    /// Returns the descriptor, so callers can invoke it directly without
    /// re-resolving.
    pub fn register<T, F>(&mut self, name: &'static str, provider: F) -> DiResult<Arc<Dependency>>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register_with(name, provider, RegisterOptions::default())
    }

    /// Registers a provider with explicit lifecycle and role options.
    pub fn register_with<T, F>(
        &mut self,
        name: &'static str,
        provider: F,
        options: RegisterOptions,
    ) -> DiResult<Arc<Dependency>>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let signature = Signature::returning::<T>(name);
        let provider = move || -> AnyValue { Arc::new(provider()) };
        self.register_erased(signature, provider, options)
    }

    /// Low-level registration from an explicit signature and a type-erased
    /// provider.
    ///
    /// This is the entry point for callers whose declarations do not come
    /// from compile-time tokens; an incomplete signature surfaces here as an
    /// aggregated [`DiError::Definition`]. Registration is all-or-nothing:
    /// on any validation or conflict failure no index is touched and an
    /// eager provider never runs.
    pub fn register_erased(
        &mut self,
        signature: Signature,
        provider: impl Fn() -> AnyValue + Send + Sync + 'static,
        options: RegisterOptions,
    ) -> DiResult<Arc<Dependency>> {
        let provider: ProviderFn = Arc::new(provider);
        let dependency = Dependency::erased(
            &signature,
            provider,
            options.lifecycle,
            options.eagerness,
            self.reflection.as_ref(),
        )?;
        if options.primary && options.name.is_some() {
            return Err(DiError::RoleConflict {
                dependency: dependency.name(),
            });
        }
        let token = dependency.return_type();
        if options.primary && self.primary_by_type.contains_key(&token) {
            return Err(DiError::PrimaryConflict {
                dependency: dependency.name(),
                type_name: token.display_name(),
            });
        }
        if let Some(name) = options.name {
            if self.by_name.contains_key(name) {
                return Err(DiError::NameConflict {
                    dependency: dependency.name(),
                    name,
                });
            }
        }
        // Every check passed; an eager provider runs only now.
        if options.eagerness == Eagerness::Eager {
            dependency.prime();
        }
        let dependency = Arc::new(dependency);
        self.observers.registered(&dependency);
        self.by_type.entry(token).or_default().push(dependency.clone());
        if options.primary {
            self.primary_by_type.insert(token, dependency.clone());
        }
        if let Some(name) = options.name {
            self.by_name.insert(name, dependency.clone());
        }
        Ok(dependency)
    }

    /// Resolves the descriptor for `T`.
    pub fn resolve<T: 'static>(&self) -> DiResult<Arc<Dependency>> {
        self.resolve_token(token_of::<T>())
    }

    /// Resolves a descriptor by result type token: the primary if one
    /// exists, else the first-registered descriptor for the type.
    pub fn resolve_token(&self, token: TypeToken) -> DiResult<Arc<Dependency>> {
        let found = match self.primary_by_type.get(&token) {
            Some(primary) => Some(primary),
            None => self.by_type.get(&token).and_then(|list| list.first()),
        };
        match found {
            Some(dependency) => {
                self.observers.resolved(dependency);
                Ok(dependency.clone())
            }
            None => {
                self.observers.missed(token.display_name());
                Err(DiError::NotFound(token.display_name()))
            }
        }
    }

    /// Resolves a descriptor by its registration name.
    pub fn resolve_named(&self, name: &'static str) -> DiResult<Arc<Dependency>> {
        match self.by_name.get(name) {
            Some(dependency) => {
                self.observers.resolved(dependency);
                Ok(dependency.clone())
            }
            None => {
                self.observers.missed(name);
                Err(DiError::NotFound(name))
            }
        }
    }

    /// Resolves and invokes in one step, downcasting to `T`.
    pub fn get<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.resolve::<T>()?.invoke_as::<T>()
    }

    /// Resolves by name and invokes in one step, downcasting to `T`.
    pub fn get_named<T: Send + Sync + 'static>(&self, name: &'static str) -> DiResult<Arc<T>> {
        self.resolve_named(name)?.invoke_as::<T>()
    }

    /// Clears all three indices.
    ///
    /// Intended to be invoked once per independent unit of work so runs do
    /// not leak registrations into each other. Singleton caches live on the
    /// descriptors, so a still-held `Arc<Dependency>` keeps its cached
    /// instance; the registry simply forgets it.
    pub fn reinitialize(&mut self) {
        self.by_type.clear();
        self.primary_by_type.clear();
        self.by_name.clear();
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }

    /// Whether the registry holds no registrations.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Whether any provider is registered for `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        self.by_type.contains_key(&token_of::<T>())
    }

    pub(crate) fn reflection(&self) -> &dyn TypeReflection {
        self.reflection.as_ref()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
