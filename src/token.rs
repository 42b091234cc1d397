//! Type tokens keying the dependency registry.

use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Identifies a provider's declared result type.
///
/// A token pairs the `TypeId` used for lookup with the type name used for
/// diagnostics. Equality and hashing consider only the `TypeId`; the name
/// rides along for error messages.
///
/// # Examples
///
/// ```rust
/// use coil_di::{token_of, TypeToken};
///
/// let a = token_of::<String>();
/// let b = TypeToken::of::<String>();
/// assert_eq!(a, b);
/// assert!(a.display_name().contains("String"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// Token for the concrete type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The type name for display in diagnostics and error messages.
    pub fn display_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeToken {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Shorthand for [`TypeToken::of`].
#[inline(always)]
pub fn token_of<T: 'static>() -> TypeToken {
    TypeToken::of::<T>()
}
