//! Error types for Waypoint.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WaypointError`] - Top-level error type for all Waypoint operations
//! - [`DispatchError`] - Errors raised while serving a request
//! - [`RegistrationError`] - Conflicts detected while populating a router
//!
//! Dispatch errors are always fatal to the request and are never retried by
//! the router; registration errors are fatal to initialization.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// User-supplied units (actions, interceptors, result types) report failures
/// as `BoxError`; the router unwraps them via [`DispatchError::from_boxed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Waypoint operations.
#[derive(Error, Debug)]
pub enum WaypointError {
    /// A conflict occurred while populating a router.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// An error occurred while serving a request.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised while serving a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No action is mapped to the requested path.
    #[error("no action mapped to path [{0}]")]
    NotFound(String),

    /// A result referenced a result type that is not registered.
    #[error("no result type registered as [{0}]")]
    ResultTypeNotFound(String),

    /// An action, interceptor or result type raised an error of its own.
    #[error("invocation failed")]
    Invocation(#[source] BoxError),
}

/// Conflicts detected while populating a router.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// A name was registered twice in the same registry.
    #[error("duplicate {kind} registered as [{name}]")]
    Duplicate {
        /// Which registry rejected the name.
        kind: &'static str,
        /// The offending name.
        name: String,
    },

    /// An action path was registered twice.
    #[error("duplicate action path [{0}]")]
    DuplicatePath(String),

    /// A registry was handed an empty name.
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    /// A wildcard segment carried no parameter name.
    #[error("wildcard segment missing a parameter name in [{0}]")]
    UnnamedWildcard(String),

    /// Two paths bind different parameter names at the same level.
    #[error("conflicting wildcard parameters [{existing}] and [{given}] under [{path}]")]
    WildcardConflict {
        /// The path being registered.
        path: String,
        /// The parameter name already bound at this level.
        existing: String,
        /// The parameter name the new path tried to bind.
        given: String,
    },
}

impl DispatchError {
    /// Unwrap a boxed error raised inside the pipeline.
    ///
    /// A boxed `DispatchError` propagates as itself; anything else is wrapped
    /// once as [`DispatchError::Invocation`] with the source preserved.
    pub fn from_boxed(err: BoxError) -> Self {
        match err.downcast::<DispatchError>() {
            Ok(own) => *own,
            Err(other) => DispatchError::Invocation(other),
        }
    }
}

// Convenience conversions
impl From<BoxError> for WaypointError {
    fn from(err: BoxError) -> Self {
        WaypointError::Custom(err)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoxError, DispatchError, WaypointError};

    #[test]
    fn from_boxed_unwraps_own_errors() {
        let boxed: BoxError = Box::new(DispatchError::NotFound("/a".to_string()));
        assert!(matches!(
            DispatchError::from_boxed(boxed),
            DispatchError::NotFound(path) if path == "/a"
        ));
    }

    #[test]
    fn from_boxed_wraps_foreign_errors() {
        let boxed: BoxError = "boom".into();
        match DispatchError::from_boxed(boxed) {
            DispatchError::Invocation(source) => assert_eq!(source.to_string(), "boom"),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn umbrella_wraps_sub_errors() {
        let err: WaypointError = DispatchError::NotFound("/a".to_string()).into();
        assert!(matches!(err, WaypointError::Dispatch(_)));
    }
}
