//! Interceptors: pre/post-processing units wrapping an action invocation.
//!
//! An interceptor receives the live [`Invocation`] and decides whether to
//! drive the rest of the pipeline via [`Invocation::proceed`]. Not calling
//! `proceed` short-circuits every downstream interceptor and the action
//! itself; inspecting or replacing the returned [`Outcome`] post-processes
//! the invocation. Suspension or retry policy is the interceptor's own
//! business — the router runs the chain exactly once, in list order.

use crate::{BoxError, Invocation, Outcome, Payload};
use std::sync::Arc;

/// A unit wrapping an action invocation.
///
/// The resolved chain of an endpoint is fixed at registration time;
/// interceptors themselves are shared across every endpoint that names them,
/// so implementations must not keep per-request state in `self`.
pub trait Interceptor<T: Payload>: Send + Sync {
    /// Called with the live invocation; the implementation decides whether
    /// the pipeline continues.
    fn intercept(&self, inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError>;
}

// Blanket implementation for plain closures.
impl<T, F> Interceptor<T> for F
where
    T: Payload,
    F: Fn(&mut Invocation<T>) -> Result<Outcome<T>, BoxError> + Send + Sync,
{
    fn intercept(&self, inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError> {
        (self)(inv)
    }
}

/// A named, ordered list of interceptors.
///
/// Built once at registration from a list of interceptor names resolved
/// against the interceptor registry; unresolvable names are dropped there
/// with a warning, so the stored list only ever holds live units.
pub struct InterceptorStack<T: Payload> {
    name: String,
    interceptors: Vec<Arc<dyn Interceptor<T>>>,
}

impl<T: Payload> InterceptorStack<T> {
    /// Create a stack from already-resolved interceptors.
    pub fn new(name: impl Into<String>, interceptors: Vec<Arc<dyn Interceptor<T>>>) -> Self {
        Self {
            name: name.into(),
            interceptors,
        }
    }

    /// The stack's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved interceptors, in declaration order.
    pub fn interceptors(&self) -> &[Arc<dyn Interceptor<T>>] {
        &self.interceptors
    }

    /// Number of resolved interceptors.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// True when no interceptor name resolved.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl<T: Payload> Clone for InterceptorStack<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            interceptors: self.interceptors.clone(),
        }
    }
}

impl<T: Payload> std::fmt::Debug for InterceptorStack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorStack")
            .field("name", &self.name)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}
