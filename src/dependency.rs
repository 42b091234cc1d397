//! Dependency descriptors: a provider plus its lifecycle policy and cache.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{DefinitionProblem, DiError, DiResult};
use crate::lifecycle::{Eagerness, Lifecycle};
use crate::reflect::{Signature, SignatureReflection, TypeReflection};
use crate::token::TypeToken;

/// Type-erased value produced by a provider.
pub type AnyValue = Arc<dyn Any + Send + Sync>;

/// Type-erased provider callable.
pub(crate) type ProviderFn = Arc<dyn Fn() -> AnyValue + Send + Sync>;

/// The registry's wrapper around one provider: its computed return type, a
/// display name, the lifecycle policy, and the singleton cache.
///
/// Descriptors are immutable after construction except for the one-time
/// population of the singleton cache. The cache is owned exclusively by the
/// descriptor; a factory descriptor never touches it.
///
/// # Examples
///
/// ```rust
/// use coil_di::{Dependency, Eagerness, Lifecycle};
///
/// let dependency = Dependency::from_provider::<u32, _>(
///     "answer",
///     || 42u32,
///     Lifecycle::Singleton,
///     Eagerness::Lazy,
/// ).unwrap();
///
/// assert!(!dependency.is_instantiated());
/// assert_eq!(*dependency.invoke_as::<u32>().unwrap(), 42);
/// assert!(dependency.is_instantiated());
/// ```
pub struct Dependency {
    name: &'static str,
    provider: ProviderFn,
    return_type: TypeToken,
    lifecycle: Lifecycle,
    eagerness: Eagerness,
    cached: OnceCell<AnyValue>,
}

impl Dependency {
    /// Builds a descriptor around a typed zero-argument provider.
    ///
    /// The signature is derived from `T`, so validation always passes for
    /// this constructor; it can still fail with [`DiError::EagerFactory`]
    /// for the illegal Eager+Factory combination. An eager singleton's
    /// provider is invoked here, before the descriptor is returned.
    pub fn from_provider<T, F>(
        name: &'static str,
        provider: F,
        lifecycle: Lifecycle,
        eagerness: Eagerness,
    ) -> DiResult<Self>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let signature = Signature::returning::<T>(name);
        let provider: ProviderFn = Arc::new(move || -> AnyValue { Arc::new(provider()) });
        let dependency =
            Self::erased(&signature, provider, lifecycle, eagerness, &SignatureReflection)?;
        if eagerness == Eagerness::Eager {
            dependency.prime();
        }
        Ok(dependency)
    }

    /// Validates `signature` against the reflection service and builds the
    /// descriptor without priming the cache.
    ///
    /// Every missing declaration is collected into one
    /// [`DiError::Definition`] report so callers see all defects in a
    /// single pass. The return type is computed here, once, and never
    /// recomputed. Priming of eager singletons is the caller's last step so
    /// a registration that fails a later conflict check never runs the
    /// provider.
    pub(crate) fn erased(
        signature: &Signature,
        provider: ProviderFn,
        lifecycle: Lifecycle,
        eagerness: Eagerness,
        reflection: &dyn TypeReflection,
    ) -> DiResult<Self> {
        let mut problems = Vec::new();
        for (parameter, ty) in reflection.parameter_types(signature) {
            if ty.is_none() {
                problems.push(DefinitionProblem::MissingParameterType { parameter });
            }
        }
        let return_type = reflection.return_type(signature);
        if return_type.is_none() {
            problems.push(DefinitionProblem::MissingReturnType);
        }
        let return_type = match return_type {
            Some(return_type) if problems.is_empty() => return_type,
            _ => {
                return Err(DiError::Definition {
                    dependency: signature.name(),
                    problems,
                })
            }
        };
        if eagerness == Eagerness::Eager && lifecycle == Lifecycle::Factory {
            return Err(DiError::EagerFactory {
                dependency: signature.name(),
            });
        }
        Ok(Self {
            name: signature.name(),
            provider,
            return_type,
            lifecycle,
            eagerness,
            cached: OnceCell::new(),
        })
    }

    /// Invokes the provider into the cache.
    pub(crate) fn prime(&self) {
        let _ = self.cached.get_or_init(|| (self.provider)());
    }

    /// Produces a value of the declared return type, applying the lifecycle
    /// policy.
    ///
    /// Factories call the provider fresh every time, side effects included.
    /// Singletons call it at most once: the first invocation populates the
    /// cache, every later one returns the cached value without running the
    /// provider again.
    pub fn invoke(&self) -> AnyValue {
        match self.lifecycle {
            Lifecycle::Factory => (self.provider)(),
            Lifecycle::Singleton => self.cached.get_or_init(|| (self.provider)()).clone(),
        }
    }

    /// Invokes the provider and downcasts the value to `T`.
    pub fn invoke_as<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.invoke()
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(self.return_type.display_name()))
    }

    /// The provider's display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared result type, computed once at construction.
    pub fn return_type(&self) -> TypeToken {
        self.return_type
    }

    /// The instantiation policy.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// When the singleton instance is created.
    pub fn eagerness(&self) -> Eagerness {
        self.eagerness
    }

    /// Whether the singleton cache holds an instance. Always `false` for
    /// factories.
    pub fn is_instantiated(&self) -> bool {
        self.cached.get().is_some()
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("name", &self.name)
            .field("return_type", &self.return_type.display_name())
            .field("lifecycle", &self.lifecycle)
            .field("eagerness", &self.eagerness)
            .field("instantiated", &self.is_instantiated())
            .finish()
    }
}
