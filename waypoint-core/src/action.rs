//! Actions: the invokable units of work reachable by a path.
//!
//! An [`Action`] is the terminal point of the interceptor pipeline. How
//! actions are discovered (annotations, config files, code) is an adapter's
//! business: the adapter reduces whatever it found to a plain [`ActionDef`]
//! record and feeds it to the router builder, which resolves it into an
//! immutable [`Endpoint`].

use crate::{BoxError, Interceptor, Invocation, Outcome, Payload, ResultDef};
use std::collections::HashMap;
use std::sync::Arc;

/// The invokable unit of work reachable by a path.
///
/// Actions receive the live [`Invocation`] — request path, captured wildcard
/// parameters and caller arguments — and report their outcome as a tagged
/// [`Outcome`] union.
pub trait Action<T: Payload>: Send + Sync {
    /// Execute the unit against the live invocation.
    fn perform(&self, inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError>;
}

// Blanket implementation for plain closures.
impl<T, F> Action<T> for F
where
    T: Payload,
    F: Fn(&mut Invocation<T>) -> Result<Outcome<T>, BoxError> + Send + Sync,
{
    fn perform(&self, inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError> {
        (self)(inv)
    }
}

/// How an action's instance relates to concurrent dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One shared instance serves every dispatch.
    Singleton,
    /// A fresh instance is produced for every dispatch.
    PerInvocation,
}

/// An action's scope fused with its instantiation strategy.
///
/// `Singleton` shares one instance across all dispatches and must not keep
/// invocation-local mutable state. `PerInvocation` wraps the external object
/// factory as a closure producing a fresh instance per dispatch.
pub enum ActionUnit<T: Payload> {
    /// One shared instance.
    Singleton(Arc<dyn Action<T>>),
    /// A factory invoked once per dispatch.
    PerInvocation(Arc<dyn Fn() -> Arc<dyn Action<T>> + Send + Sync>),
}

impl<T: Payload> ActionUnit<T> {
    /// Wrap a shared action instance.
    pub fn singleton(action: impl Action<T> + 'static) -> Self {
        ActionUnit::Singleton(Arc::new(action))
    }

    /// Wrap a factory producing a fresh action per dispatch.
    pub fn per_invocation<F, A>(factory: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
        A: Action<T> + 'static,
    {
        ActionUnit::PerInvocation(Arc::new(move || Arc::new(factory()) as Arc<dyn Action<T>>))
    }

    /// The scope this unit implies.
    pub fn scope(&self) -> Scope {
        match self {
            ActionUnit::Singleton(_) => Scope::Singleton,
            ActionUnit::PerInvocation(_) => Scope::PerInvocation,
        }
    }

    /// Produce the instance serving one dispatch.
    pub fn instance(&self) -> Arc<dyn Action<T>> {
        match self {
            ActionUnit::Singleton(action) => action.clone(),
            ActionUnit::PerInvocation(factory) => factory(),
        }
    }
}

impl<T: Payload> Clone for ActionUnit<T> {
    fn clone(&self) -> Self {
        match self {
            ActionUnit::Singleton(action) => ActionUnit::Singleton(action.clone()),
            ActionUnit::PerInvocation(factory) => ActionUnit::PerInvocation(factory.clone()),
        }
    }
}

/// Defaults an enclosing namespace contributes to its actions.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    /// Path prefix of every action registered under this namespace.
    pub name: String,
    /// Stack expanded for actions that declare no interceptors of their own.
    pub interceptor_stack: Option<String>,
    /// Interceptor names appended after the namespace stack.
    pub interceptors: Vec<String>,
}

impl Namespace {
    /// Create a namespace with the given path prefix.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare the namespace's default interceptor stack.
    pub fn interceptor_stack(mut self, name: impl Into<String>) -> Self {
        self.interceptor_stack = Some(name.into());
        self
    }

    /// Append a default interceptor name.
    pub fn interceptor(mut self, name: impl Into<String>) -> Self {
        self.interceptors.push(name.into());
        self
    }
}

/// The plain-data registration record an adapter feeds to the builder.
pub struct ActionDef<T: Payload> {
    /// Enclosing namespace, if any.
    pub namespace: Option<Namespace>,
    /// Action name; joined with the namespace into the final path unless it
    /// starts with the separator, which makes it absolute.
    pub name: String,
    /// Stack expanded before the explicitly named interceptors.
    pub interceptor_stack: Option<String>,
    /// Explicitly named interceptors.
    pub interceptors: Vec<String>,
    /// Results declared on the action.
    pub results: Vec<ResultDef>,
    /// The callable and its instantiation strategy.
    pub unit: ActionUnit<T>,
}

impl<T: Payload> ActionDef<T> {
    /// Create a record with the given name and unit.
    pub fn new(name: impl Into<String>, unit: ActionUnit<T>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            interceptor_stack: None,
            interceptors: Vec::new(),
            results: Vec::new(),
            unit,
        }
    }

    /// Place the action under a namespace.
    pub fn in_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Declare the action's interceptor stack.
    pub fn interceptor_stack(mut self, name: impl Into<String>) -> Self {
        self.interceptor_stack = Some(name.into());
        self
    }

    /// Append an explicitly named interceptor.
    pub fn interceptor(mut self, name: impl Into<String>) -> Self {
        self.interceptors.push(name.into());
        self
    }

    /// Declare a result on the action.
    pub fn result(mut self, def: ResultDef) -> Self {
        self.results.push(def);
        self
    }
}

/// A registered action: normalized path, resolved interceptor chain and
/// result map. Immutable once built.
pub struct Endpoint<T: Payload> {
    path: String,
    unit: ActionUnit<T>,
    chain: Vec<Arc<dyn Interceptor<T>>>,
    results: HashMap<String, ResultDef>,
}

impl<T: Payload> Endpoint<T> {
    /// Assemble an endpoint from already-resolved parts.
    pub fn new(
        path: impl Into<String>,
        unit: ActionUnit<T>,
        chain: Vec<Arc<dyn Interceptor<T>>>,
        results: HashMap<String, ResultDef>,
    ) -> Self {
        Self {
            path: path.into(),
            unit,
            chain,
            results,
        }
    }

    /// The normalized registration path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The endpoint's scope.
    pub fn scope(&self) -> Scope {
        self.unit.scope()
    }

    /// Produce the action instance serving one dispatch.
    pub fn instance(&self) -> Arc<dyn Action<T>> {
        self.unit.instance()
    }

    /// The resolved interceptor chain, in execution order.
    pub fn chain(&self) -> &[Arc<dyn Interceptor<T>>] {
        &self.chain
    }

    /// The action's declared results, keyed by name.
    pub fn results(&self) -> &HashMap<String, ResultDef> {
        &self.results
    }
}

impl<T: Payload> std::fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("path", &self.path)
            .field("scope", &self.scope())
            .field("interceptors", &self.chain.len())
            .field("results", &self.results.len())
            .finish()
    }
}
