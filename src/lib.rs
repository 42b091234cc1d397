//! # coil-di
//!
//! Minimal type-keyed inversion-of-control container for Rust.
//!
//! Callers register *provider* functions that construct values of a declared
//! result type; *consumer* functions declare, via their signatures, which
//! values they need, and the container resolves and supplies them.
//!
//! ## Features
//!
//! - **Type-keyed registry**: providers are looked up by their declared
//!   result type
//! - **Deterministic disambiguation**: an explicit primary wins over
//!   registration order; named dependencies bypass type resolution entirely
//! - **Lifecycle policies**: factory (fresh per resolution) or singleton
//!   (cached), with lazy or eager instantiation for singletons
//! - **Signature-driven injection**: consumers declare parameters as
//!   name/type pairs and get them resolved, constructed, and passed in
//! - **Aggregated validation**: every defect in a callable's declaration is
//!   reported in one pass, not just the first found
//!
//! ## Quick Start
//!
//! ```rust
//! use coil_di::{Consumer, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register("world_provider", || "world!".to_string()).unwrap();
//!
//! // Resolve directly by type...
//! let value = registry.get::<String>().unwrap();
//! assert_eq!(*value, "world!");
//!
//! // ...or inject a consumer that declares what it needs.
//! let greet = Consumer::new("greet", |args| {
//!     format!("Hello, {}", args.get::<String>("who"))
//! })
//! .param::<String>("who");
//!
//! assert_eq!(registry.inject(&greet).unwrap(), "Hello, world!");
//! ```
//!
//! ## Lifecycle Policies
//!
//! - **Factory**: the provider runs on every resolution; no caching
//! - **Singleton**: the provider runs at most once per registry lifetime;
//!   lazy singletons instantiate on first use, eager ones at registration
//!
//! ```rust
//! use coil_di::{RegisterOptions, Registry};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counted = calls.clone();
//!
//! let mut registry = Registry::new();
//! registry.register_with::<usize, _>(
//!     "ticket",
//!     move || counted.fetch_add(1, Ordering::SeqCst) + 1,
//!     RegisterOptions::factory(),
//! ).unwrap();
//!
//! // A factory constructs fresh on every resolution.
//! assert_eq!(*registry.get::<usize>().unwrap(), 1);
//! assert_eq!(*registry.get::<usize>().unwrap(), 2);
//! ```
//!
//! ## Disambiguation
//!
//! When several providers produce the same type, resolution by type returns
//! the primary if one was designated, else the first-registered provider.
//! Named registrations are reached only by their string key.
//!
//! ```rust
//! use coil_di::{Consumer, Overrides, RegisterOptions, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register("hello_provider", || "Hello, ".to_string()).unwrap();
//! registry.register_with("world_provider", || "world!".to_string(),
//!     RegisterOptions::factory().as_primary()).unwrap();
//! registry.register_with("shout_provider", || "WORLD!".to_string(),
//!     RegisterOptions::factory().named("shouted")).unwrap();
//!
//! // The primary wins over registration order.
//! assert_eq!(*registry.get::<String>().unwrap(), "world!");
//!
//! // A name override reroutes one parameter through named resolution.
//! let echo = Consumer::new("echo", |args| args.get::<String>("value").to_string())
//!     .param::<String>("value");
//! let overrides = Overrides::new().bind("value", "shouted");
//! assert_eq!(registry.inject_with(&echo, &overrides).unwrap(), "WORLD!");
//! ```

pub mod dependency;
pub mod error;
pub mod injector;
pub mod lifecycle;
pub mod observer;
pub mod reflect;
pub mod registry;
pub mod shared;
pub mod token;

pub use dependency::{AnyValue, Dependency};
pub use error::{DefinitionProblem, DiError, DiResult};
pub use injector::{Args, Consumer, Injector, Overrides};
pub use lifecycle::{Eagerness, Lifecycle};
pub use observer::{DiObserver, LoggingObserver};
pub use reflect::{Param, Signature, SignatureReflection, TypeReflection};
pub use registry::{RegisterOptions, Registry};
pub use shared::SharedRegistry;
pub use token::{token_of, TypeToken};
