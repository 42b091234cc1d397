//! Error types for the container.

use std::fmt;

/// One defect found while validating a provider or consumer declaration.
///
/// Declarations are validated as a whole: every problem with a callable is
/// collected into a single [`DiError::Definition`] report rather than
/// stopping at the first one found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionProblem {
    /// A declared parameter has no resolvable type.
    MissingParameterType {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
    /// The callable declares no return type.
    MissingReturnType,
}

impl fmt::Display for DefinitionProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionProblem::MissingParameterType { parameter } => {
                write!(f, "no type declared for parameter '{}'", parameter)
            }
            DefinitionProblem::MissingReturnType => write!(f, "no return type declared"),
        }
    }
}

/// Dependency injection errors.
///
/// Every failure is raised synchronously at the point of registration,
/// resolution, or injection, and reflects a configuration defect rather than
/// a transient fault: nothing is retried internally, and a failed
/// registration leaves the registry untouched.
///
/// # Examples
///
/// ```rust
/// use coil_di::{DiError, Registry};
///
/// let registry = Registry::new();
/// match registry.get::<String>() {
///     Err(DiError::NotFound(name)) => assert!(name.contains("String")),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// A provider or consumer declaration is incomplete; carries one entry
    /// per missing declaration.
    Definition {
        /// Display name of the offending callable.
        dependency: &'static str,
        /// Every defect found, in declaration order.
        problems: Vec<DefinitionProblem>,
    },
    /// An eager factory was requested (illegal combination).
    EagerFactory {
        /// Display name of the offending provider.
        dependency: &'static str,
    },
    /// A registration requested both the primary and named roles.
    RoleConflict {
        /// Display name of the offending provider.
        dependency: &'static str,
    },
    /// A second primary was registered for a type that already has one.
    PrimaryConflict {
        /// Display name of the rejected provider.
        dependency: &'static str,
        /// The contested result type.
        type_name: &'static str,
    },
    /// A second dependency was registered under an already-used name.
    NameConflict {
        /// Display name of the rejected provider.
        dependency: &'static str,
        /// The contested registration name.
        name: &'static str,
    },
    /// Resolution by type or by name found no matching registration.
    NotFound(&'static str),
    /// Type downcast failed.
    TypeMismatch(&'static str),
    /// A consumer parameter could not be satisfied during injection.
    Unsatisfied {
        /// Name of the parameter that could not be satisfied.
        parameter: &'static str,
        /// The underlying resolution failure.
        source: Box<DiError>,
    },
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::Definition { dependency, problems } => {
                write!(f, "Bad definition of dependency '{}': ", dependency)?;
                for (i, problem) in problems.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", problem)?;
                }
                Ok(())
            }
            DiError::EagerFactory { dependency } => {
                write!(f, "Dependency '{}' cannot be eager: only singletons are instantiated ahead of use", dependency)
            }
            DiError::RoleConflict { dependency } => {
                write!(f, "Dependency '{}' cannot be both primary and named", dependency)
            }
            DiError::PrimaryConflict { dependency, type_name } => {
                write!(f, "Dependency '{}' is set as primary, but type {} already has a primary", dependency, type_name)
            }
            DiError::NameConflict { dependency, name } => {
                write!(f, "Cannot register dependency '{}': the name '{}' is already in use", dependency, name)
            }
            DiError::NotFound(what) => write!(f, "No dependency registered for: {}", what),
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::Unsatisfied { parameter, source } => {
                write!(f, "Cannot satisfy parameter '{}': {}", parameter, source)
            }
        }
    }
}

impl std::error::Error for DiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiError::Unsatisfied { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for container operations.
pub type DiResult<T> = Result<T, DiError>;
