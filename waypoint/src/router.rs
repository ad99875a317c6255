//! The router: registration surface and dispatch entry point.

use crate::cache::{CacheEntry, DispatchCache};
use crate::chain::resolve_chain;
use crate::config::RouterOptions;
use crate::registry::NamedRegistry;
use crate::results::DefaultResultHook;
use crate::routing::path::{build_path, strip_registered_suffix, strip_request_suffix};
use crate::routing::trie::PathTrie;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use waypoint_core::{
    ActionDef, DispatchError, Endpoint, GlobalResult, Interceptor, InterceptorStack, Invocation,
    Outcome, Payload, RegistrationError, ResultDef, ResultHook, ResultType,
};

/// Builder populating a router during its single-threaded initialization
/// phase. The sole mutation surface: once [`build`] runs, everything but the
/// cache is read-only.
///
/// [`build`]: PathRouterBuilder::build
pub struct PathRouterBuilder<T: Payload> {
    options: RouterOptions,
    interceptors: NamedRegistry<Arc<dyn Interceptor<T>>>,
    stacks: NamedRegistry<InterceptorStack<T>>,
    result_types: NamedRegistry<Arc<dyn ResultType<T>>>,
    results: NamedRegistry<GlobalResult<T>>,
    trie: PathTrie<Arc<Endpoint<T>>>,
    hook: Box<dyn ResultHook<T>>,
}

impl<T: Payload> Default for PathRouterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Payload> PathRouterBuilder<T> {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::with_options(RouterOptions::default())
    }

    /// Create a builder with the given options.
    pub fn with_options(options: RouterOptions) -> Self {
        let trie = PathTrie::new(options.path_separator);
        Self {
            options,
            interceptors: NamedRegistry::new("interceptor"),
            stacks: NamedRegistry::new("interceptor stack"),
            result_types: NamedRegistry::new("result type"),
            results: NamedRegistry::new("global result"),
            trie,
            hook: Box::new(DefaultResultHook),
        }
    }

    /// Apply a stringly-named configuration property.
    ///
    /// The separator can only change while no action is registered yet; a
    /// later change is refused with a warning.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let separator = self.options.path_separator;
        self.options.set_property(name, value);
        if self.options.path_separator != separator {
            if self.trie.is_empty() {
                self.trie = PathTrie::new(self.options.path_separator);
            } else {
                self.options.path_separator = separator;
                warn!("cannot change pathSeparator after actions are registered");
            }
        }
    }

    /// Replace the fallback result hooks.
    pub fn result_hook(&mut self, hook: impl ResultHook<T> + 'static) {
        self.hook = Box::new(hook);
    }

    /// Register a named interceptor.
    pub fn add_interceptor(
        &mut self,
        name: &str,
        interceptor: impl Interceptor<T> + 'static,
    ) -> Result<(), RegistrationError> {
        self.interceptors.add(name, Arc::new(interceptor))
    }

    /// Register a named stack, resolving its interceptor names now.
    /// Unresolvable names are skipped with a warning.
    pub fn add_interceptor_stack(
        &mut self,
        name: &str,
        interceptor_names: &[&str],
    ) -> Result<(), RegistrationError> {
        let mut resolved = Vec::with_capacity(interceptor_names.len());
        for interceptor in interceptor_names {
            match self.interceptors.get(interceptor) {
                Some(found) => resolved.push(found.clone()),
                None => warn!(
                    "no interceptor registered as [{}] for stack [{}]",
                    interceptor, name
                ),
            }
        }
        self.stacks.add(name, InterceptorStack::new(name, resolved))
    }

    /// Register a named result type.
    pub fn add_result_type(
        &mut self,
        name: &str,
        result_type: impl ResultType<T> + 'static,
    ) -> Result<(), RegistrationError> {
        self.result_types.add(name, Arc::new(result_type))
    }

    /// Register a process-wide result.
    pub fn add_result(
        &mut self,
        def: ResultDef,
        unit: impl ResultType<T> + 'static,
    ) -> Result<(), RegistrationError> {
        let name = def.name.clone();
        self.results.add(&name, GlobalResult::new(def, unit))
    }

    /// Register an action, resolving its path and interceptor chain.
    ///
    /// An exactly-duplicate path is fatal; a path that merely overlaps an
    /// existing wildcard match is registered and logged.
    pub fn add_action(&mut self, def: ActionDef<T>) -> Result<(), RegistrationError> {
        let ActionDef {
            namespace,
            name,
            interceptor_stack,
            interceptors: interceptor_names,
            results,
            unit,
        } = def;

        if name.trim().is_empty() {
            return Err(RegistrationError::EmptyName("action"));
        }
        let separator = self.options.path_separator;
        let path = build_path(
            namespace.as_ref().map(|ns| ns.name.as_str()),
            &name,
            separator,
        );
        let path = strip_registered_suffix(&path, &self.options.path_suffix).to_string();

        let chain = resolve_chain(
            interceptor_stack.as_deref(),
            &interceptor_names,
            namespace.as_ref(),
            self.options.default_interceptor_stack.as_deref(),
            &path,
            &self.interceptors,
            &self.stacks,
        );
        let results: HashMap<String, ResultDef> = results
            .into_iter()
            .map(|result| (result.name.clone(), result))
            .collect();

        let overlaps = self.trie.find(&path).map(|hit| hit.value.path().to_string());
        let endpoint = Arc::new(Endpoint::new(path.clone(), unit, chain, results));
        self.trie.insert(&path, endpoint)?;
        match overlaps {
            Some(existing) => warn!(
                "path [{}] overlaps already matched path [{}]",
                path, existing
            ),
            None => info!("registered action [{}]", path),
        }
        Ok(())
    }

    /// Finish initialization and produce the immutable router.
    pub fn build(self) -> PathRouter<T> {
        if let Some(name) = self.options.default_interceptor_stack.as_deref() {
            if !self.stacks.contains(name) {
                warn!("default interceptor stack [{}] is not registered", name);
            }
        }
        PathRouter {
            cache: DispatchCache::new(self.options.cache_capacity),
            options: self.options,
            trie: self.trie,
            interceptors: self.interceptors,
            stacks: self.stacks,
            result_types: self.result_types,
            results: self.results,
            hook: self.hook,
        }
    }
}

/// The path router: resolves request paths to actions through the cache and
/// trie, runs the interceptor chain and the result cascade.
///
/// Registries and the trie are populated by the builder and read-only here;
/// the cache is the only structure mutated while serving requests, so a
/// router shares freely across threads.
pub struct PathRouter<T: Payload> {
    pub(crate) options: RouterOptions,
    pub(crate) trie: PathTrie<Arc<Endpoint<T>>>,
    pub(crate) cache: DispatchCache<T>,
    pub(crate) interceptors: NamedRegistry<Arc<dyn Interceptor<T>>>,
    pub(crate) stacks: NamedRegistry<InterceptorStack<T>>,
    pub(crate) result_types: NamedRegistry<Arc<dyn ResultType<T>>>,
    pub(crate) results: NamedRegistry<GlobalResult<T>>,
    pub(crate) hook: Box<dyn ResultHook<T>>,
}

impl<T: Payload> PathRouter<T> {
    /// Start building a router.
    pub fn builder() -> PathRouterBuilder<T> {
        PathRouterBuilder::new()
    }

    /// Serve one request: strip the suffix, resolve the path, run the chain,
    /// resolve the outcome.
    pub fn dispatch(&self, path: &str, args: Vec<T>) -> Result<Outcome<T>, DispatchError> {
        let path = strip_request_suffix(path, &self.options.path_suffix);
        debug!("dispatching [{}]", path);

        let entry = self.lookup(path)?;
        let action = entry.endpoint().instance();
        let mut inv = Invocation::new(
            entry.endpoint().clone(),
            action,
            path,
            args,
            entry.params().clone(),
        );

        let raw = inv.proceed().map_err(DispatchError::from_boxed)?;
        let resolved = self.resolve_outcome(&mut inv, raw)?;
        debug!("finished [{}]", inv.path());
        Ok(resolved)
    }

    /// Resolve a stripped path through the cache, falling back to the trie.
    /// Failures are never cached.
    fn lookup(&self, path: &str) -> Result<CacheEntry<T>, DispatchError> {
        if let Some(entry) = self.cache.get(path) {
            return Ok(entry);
        }
        let Some(found) = self.trie.find(path) else {
            return Err(DispatchError::NotFound(path.to_string()));
        };
        let entry = CacheEntry::new(found.value.clone(), Arc::new(found.params));
        // concurrent misses race benignly: entries for one path are equivalent
        self.cache.insert(path, entry.clone());
        Ok(entry)
    }

    /// Empty the dispatch cache; registrations are untouched.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Empty the cache, the trie and every registry, for full
    /// reinitialization. Takes `&mut self`: not callable while dispatches
    /// are in flight.
    pub fn clear_all(&mut self) {
        info!("clearing router registries and cache");
        self.cache.clear();
        self.trie.clear();
        self.interceptors.clear();
        self.stacks.clear();
        self.result_types.clear();
        self.results.clear();
    }

    /// A merged read-only view of the cache, exact entries taking precedence.
    pub fn cache_snapshot(&self) -> HashMap<String, CacheEntry<T>> {
        self.cache.snapshot()
    }

    /// The router's configuration.
    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Number of registered actions.
    pub fn action_count(&self) -> usize {
        self.trie.len()
    }

    /// Names of the registered interceptors.
    pub fn interceptor_names(&self) -> Vec<&str> {
        self.interceptors.names().collect()
    }

    /// Names of the registered interceptor stacks.
    pub fn stack_names(&self) -> Vec<&str> {
        self.stacks.names().collect()
    }

    /// Names of the registered result types.
    pub fn result_type_names(&self) -> Vec<&str> {
        self.result_types.names().collect()
    }

    /// Names of the registered global results.
    pub fn global_result_names(&self) -> Vec<&str> {
        self.results.names().collect()
    }
}

impl<T: Payload> std::fmt::Debug for PathRouter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathRouter")
            .field("actions", &self.trie.len())
            .field("interceptors", &self.interceptors.len())
            .field("stacks", &self.stacks.len())
            .field("result_types", &self.result_types.len())
            .field("results", &self.results.len())
            .finish_non_exhaustive()
    }
}
