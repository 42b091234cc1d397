//! Signature-driven injection of consumer functions.
//!
//! A [`Consumer`] declares, through its signature, which values it needs.
//! The [`Injector`] resolves each declared parameter from the registry,
//! honoring per-parameter name [`Overrides`], invokes the resolved
//! descriptors, and calls the consumer body with the assembled [`Args`].
//! Injection caches nothing itself: repeated injection re-resolves and
//! re-invokes every dependency under the descriptors' own lifecycle
//! policies.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dependency::AnyValue;
use crate::error::{DefinitionProblem, DiError, DiResult};
use crate::reflect::Signature;
use crate::registry::Registry;

/// Resolved arguments handed to a consumer body, keyed by parameter name.
pub struct Args {
    values: HashMap<&'static str, AnyValue>,
}

impl Args {
    /// Typed access to a resolved argument.
    ///
    /// # Panics
    ///
    /// Panics if `name` was not declared on the consumer's signature, or if
    /// `T` differs from the declared parameter type. Both are programming
    /// errors in the consumer body; the injector guarantees every declared
    /// parameter is present with its declared type.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Arc<T> {
        self.values
            .get(name)
            .unwrap_or_else(|| panic!("no argument named '{}'", name))
            .clone()
            .downcast::<T>()
            .unwrap_or_else(|_| {
                panic!(
                    "argument '{}' is not a {}",
                    name,
                    std::any::type_name::<T>()
                )
            })
    }
}

/// A function whose parameters are supplied by the container.
///
/// The body receives resolved [`Args`] and returns `R`; parameters are
/// declared with [`param`](Self::param) as name plus compile-time type
/// token. The return type is recorded from `R`.
///
/// # Examples
///
/// ```rust
/// use coil_di::{Consumer, Registry};
///
/// let mut registry = Registry::new();
/// registry.register("world_provider", || "world!".to_string()).unwrap();
///
/// let greet = Consumer::new("greet", |args| {
///     format!("Hello, {}", args.get::<String>("who"))
/// })
/// .param::<String>("who");
///
/// assert_eq!(registry.inject(&greet).unwrap(), "Hello, world!");
/// ```
pub struct Consumer<R> {
    signature: Signature,
    body: Box<dyn Fn(&Args) -> R + Send + Sync>,
}

impl<R: 'static> Consumer<R> {
    /// Declares a consumer returning `R`, with no parameters yet.
    pub fn new<F>(name: &'static str, body: F) -> Self
    where
        F: Fn(&Args) -> R + Send + Sync + 'static,
    {
        Self {
            signature: Signature::returning::<R>(name),
            body: Box::new(body),
        }
    }

    /// Declares a parameter of type `T` named `name`.
    pub fn param<T: 'static>(mut self, name: &'static str) -> Self {
        self.signature = self.signature.param::<T>(name);
        self
    }

    /// Builds a consumer from an explicit signature, for callers whose
    /// declarations do not come from compile-time tokens. An incomplete
    /// signature is rejected at injection with the same aggregated
    /// [`DiError::Definition`] contract as registration.
    pub fn with_signature<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&Args) -> R + Send + Sync + 'static,
    {
        Self {
            signature,
            body: Box::new(body),
        }
    }

    /// The consumer's declared signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn call(&self, args: &Args) -> R {
        (self.body)(args)
    }
}

/// Per-parameter name overrides for injection.
///
/// A bound parameter resolves through [`Registry::resolve_named`] with the
/// mapped registration name, bypassing type-based and primary resolution
/// for that parameter only.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    map: HashMap<&'static str, &'static str>,
}

impl Overrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes parameter `parameter` through the dependency registered under
    /// `name`.
    pub fn bind(mut self, parameter: &'static str, name: &'static str) -> Self {
        self.map.insert(parameter, name);
        self
    }

    fn get(&self, parameter: &'static str) -> Option<&'static str> {
        self.map.get(parameter).copied()
    }
}

/// Resolves a consumer's declared parameters and invokes it.
pub struct Injector<'r> {
    registry: &'r Registry,
}

impl<'r> Injector<'r> {
    /// An injector over `registry`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Injects `consumer` with no name overrides.
    pub fn inject<R: 'static>(&self, consumer: &Consumer<R>) -> DiResult<R> {
        self.inject_with(consumer, &Overrides::default())
    }

    /// Resolves each declared parameter (by override name where bound, else
    /// by declared type), invokes the resolved descriptors, and calls the
    /// consumer with the assembled arguments, returning its result
    /// unchanged.
    ///
    /// A resolution failure carries the offending parameter's name in
    /// [`DiError::Unsatisfied`] so the caller can pinpoint which argument
    /// could not be satisfied.
    pub fn inject_with<R: 'static>(
        &self,
        consumer: &Consumer<R>,
        overrides: &Overrides,
    ) -> DiResult<R> {
        let signature = consumer.signature();
        let reflection = self.registry.reflection();

        let mut problems = Vec::new();
        let mut params = Vec::new();
        for (parameter, ty) in reflection.parameter_types(signature) {
            match ty {
                Some(token) => params.push((parameter, token)),
                None => problems.push(DefinitionProblem::MissingParameterType { parameter }),
            }
        }
        if reflection.return_type(signature).is_none() {
            problems.push(DefinitionProblem::MissingReturnType);
        }
        if !problems.is_empty() {
            return Err(DiError::Definition {
                dependency: signature.name(),
                problems,
            });
        }

        let mut values = HashMap::with_capacity(params.len());
        for (parameter, token) in params {
            let dependency = match overrides.get(parameter) {
                Some(name) => self.registry.resolve_named(name),
                None => self.registry.resolve_token(token),
            }
            .map_err(|source| DiError::Unsatisfied {
                parameter,
                source: Box::new(source),
            })?;
            values.insert(parameter, dependency.invoke());
        }
        Ok(consumer.call(&Args { values }))
    }
}

/// Injection conveniences on the registry itself.
impl Registry {
    /// Injects `consumer` with no name overrides.
    pub fn inject<R: 'static>(&self, consumer: &Consumer<R>) -> DiResult<R> {
        Injector::new(self).inject(consumer)
    }

    /// Injects `consumer`, routing overridden parameters through named
    /// resolution.
    pub fn inject_with<R: 'static>(
        &self,
        consumer: &Consumer<R>,
        overrides: &Overrides,
    ) -> DiResult<R> {
        Injector::new(self).inject_with(consumer, overrides)
    }
}
