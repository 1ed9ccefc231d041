//! Runtime error kinds
//!
//! Every failure is raised synchronously at the call site and never retried.
//! `Class::try_cast` and `Class::made` turn the cast miss into a plain `None`/`false`.

use thiserror::Error;

/// Result alias used throughout the runtime
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Unified runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A virtual method that no class down to the instantiated one defined was invoked
    #[error("AbstractMethodError: method '{name}' is abstract")]
    AbstractMethod { name: String },

    /// Strict cast found no level of the requested class in the chain
    #[error("CastError: cannot cast {instance} to {target}")]
    Cast { target: String, instance: String },

    /// Fields or methods were added directly to the root class
    #[error("ProtectedClassError: cannot {operation} on the root class, subclass it instead")]
    ProtectedClass { operation: String },

    /// A name resolved to something that cannot be called
    #[error("TypeError: '{name}' is a {kind} value, not a method")]
    NotCallable { name: String, kind: &'static str },

    /// A called name resolved to nothing
    #[error("UndefinedMethod: {class} has no method '{name}'")]
    UndefinedMethod { class: String, name: String },

    /// An event was applied to an instance whose class has no override for it
    #[error("MissingEvent: {class} does not define operator {event}")]
    MissingEvent { class: String, event: &'static str },

    /// Method invocations nested deeper than the configured limit
    #[error("StackOverflow: call depth exceeded {limit}")]
    CallDepthExceeded { limit: usize },

    /// Error raised by user code (constructors, methods, events)
    #[error("{0}")]
    Raised(String),
}

impl RuntimeError {
    /// Build an error from user code
    pub fn raise(message: impl Into<String>) -> Self {
        RuntimeError::Raised(message.into())
    }

    /// Stable kind name, used by structured reports
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeError::AbstractMethod { .. } => "abstract_method",
            RuntimeError::Cast { .. } => "cast",
            RuntimeError::ProtectedClass { .. } => "protected_class",
            RuntimeError::NotCallable { .. } => "not_callable",
            RuntimeError::UndefinedMethod { .. } => "undefined_method",
            RuntimeError::MissingEvent { .. } => "missing_event",
            RuntimeError::CallDepthExceeded { .. } => "call_depth_exceeded",
            RuntimeError::Raised(_) => "raised",
        }
    }
}
