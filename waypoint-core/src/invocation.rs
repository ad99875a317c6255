//! The per-dispatch context threaded through the interceptor chain.

use crate::{Action, BoxError, Endpoint, Outcome, Payload};
use std::collections::HashMap;
use std::sync::Arc;

/// The live state of one dispatch.
///
/// An invocation owns the request path (suffix already stripped), the
/// caller's arguments, the wildcard parameters captured during path matching
/// and the action instance chosen for this dispatch. It is passed explicitly
/// down the pipeline — interceptors drive the remainder of the chain through
/// [`Invocation::proceed`] — so no ambient per-thread request state exists.
pub struct Invocation<T: Payload> {
    endpoint: Arc<Endpoint<T>>,
    action: Arc<dyn Action<T>>,
    path: String,
    args: Vec<T>,
    params: Arc<HashMap<String, String>>,
    next: usize,
}

impl<T: Payload> Invocation<T> {
    /// Assemble the context for one dispatch.
    pub fn new(
        endpoint: Arc<Endpoint<T>>,
        action: Arc<dyn Action<T>>,
        path: impl Into<String>,
        args: Vec<T>,
        params: Arc<HashMap<String, String>>,
    ) -> Self {
        Self {
            endpoint,
            action,
            path: path.into(),
            args,
            params,
            next: 0,
        }
    }

    /// Run the next pending interceptor, or the action itself once the chain
    /// is exhausted.
    ///
    /// An interceptor that never calls `proceed` short-circuits everything
    /// downstream of it, the action included.
    pub fn proceed(&mut self) -> Result<Outcome<T>, BoxError> {
        let step = self.endpoint.chain().get(self.next).cloned();
        match step {
            Some(interceptor) => {
                self.next += 1;
                interceptor.intercept(self)
            }
            None => {
                let action = Arc::clone(&self.action);
                action.perform(self)
            }
        }
    }

    /// The request path being served, suffix stripped.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The endpoint resolved for this dispatch.
    pub fn endpoint(&self) -> &Arc<Endpoint<T>> {
        &self.endpoint
    }

    /// The caller's arguments.
    pub fn args(&self) -> &[T] {
        &self.args
    }

    /// Mutable access to the caller's arguments.
    pub fn args_mut(&mut self) -> &mut Vec<T> {
        &mut self.args
    }

    /// Wildcard parameters captured while matching the path.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// A single captured parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
