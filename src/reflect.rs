//! The type reflection boundary.
//!
//! Rust has no runtime reflection over function signatures, so declared
//! parameter and return types travel with the callable as a [`Signature`]
//! built from compile-time type tokens. The container never inspects a
//! callable directly; it asks a [`TypeReflection`] service for the declared
//! parameter types and return type, and treats a missing declaration as a
//! definition defect. [`SignatureReflection`] is the default service and
//! simply reads the tokens recorded on the signature.

use crate::token::{token_of, TypeToken};

/// One declared parameter of a callable.
///
/// A parameter whose type declaration is absent carries `None`; the
/// container reports it as a definition defect instead of guessing.
#[derive(Debug, Clone)]
pub struct Param {
    name: &'static str,
    ty: Option<TypeToken>,
}

impl Param {
    /// The parameter name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type, if one was declared.
    pub fn declared_type(&self) -> Option<TypeToken> {
        self.ty
    }
}

/// Declared shape of a provider or consumer callable: its display name, its
/// parameters, and its return type.
///
/// # Examples
///
/// ```rust
/// use coil_di::Signature;
///
/// let signature = Signature::returning::<String>("greet")
///     .param::<String>("greeting")
///     .param::<u32>("count");
///
/// assert_eq!(signature.name(), "greet");
/// assert_eq!(signature.params().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Signature {
    name: &'static str,
    params: Vec<Param>,
    ret: Option<TypeToken>,
}

impl Signature {
    /// Starts a signature with no parameters and no declared return type.
    ///
    /// Until [`returns`](Self::returns) is called the signature is
    /// incomplete and will be rejected at registration.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
            ret: None,
        }
    }

    /// Signature of a zero-parameter callable returning `T`.
    pub fn returning<T: 'static>(name: &'static str) -> Self {
        Self::new(name).returns::<T>()
    }

    /// Declares a parameter of type `T`.
    pub fn param<T: 'static>(mut self, name: &'static str) -> Self {
        self.params.push(Param {
            name,
            ty: Some(token_of::<T>()),
        });
        self
    }

    /// Records a parameter whose type declaration is absent.
    pub fn untyped_param(mut self, name: &'static str) -> Self {
        self.params.push(Param { name, ty: None });
        self
    }

    /// Declares the return type.
    pub fn returns<T: 'static>(mut self) -> Self {
        self.ret = Some(token_of::<T>());
        self
    }

    /// The callable's display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared parameters, in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub(crate) fn declared_return(&self) -> Option<TypeToken> {
        self.ret
    }
}

/// Reflection service the container consults for declared types.
///
/// The container calls this for every provider at registration and every
/// consumer at injection. Implementations may read declarations from
/// wherever they live; the container only cares about the name→type pairs
/// and the return type, and treats `None` as a missing declaration.
pub trait TypeReflection: Send + Sync {
    /// Declared parameter types by name, in declaration order. A `None`
    /// type marks a parameter whose declaration is missing.
    fn parameter_types(&self, signature: &Signature) -> Vec<(&'static str, Option<TypeToken>)>;

    /// The declared return type, or `None` if the callable declares none.
    fn return_type(&self, signature: &Signature) -> Option<TypeToken>;
}

/// Default reflection over caller-supplied signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureReflection;

impl TypeReflection for SignatureReflection {
    fn parameter_types(&self, signature: &Signature) -> Vec<(&'static str, Option<TypeToken>)> {
        signature
            .params()
            .iter()
            .map(|p| (p.name(), p.declared_type()))
            .collect()
    }

    fn return_type(&self, signature: &Signature) -> Option<TypeToken> {
        signature.declared_return()
    }
}
