//! # waypoint — path-routing action dispatcher
//!
//! Waypoint routes string request paths to registered actions, wraps each
//! invocation in an interceptor pipeline, and resolves the action's return
//! value through a chain of named result types.
//!
//! The engine is built from:
//!
//! - [`PathTrie`] — a trie over separator-delimited segments with `{name}`
//!   wildcard capture; literal matches win over wildcards at every level.
//! - [`DispatchCache`] — a two-tier lookup cache: unbounded for exact paths,
//!   bounded with LRU eviction for parameterized matches.
//! - [`PathRouterBuilder`] — the single mutation surface; registration is
//!   single-threaded, then [`build`] freezes everything but the cache.
//! - [`PathRouter::dispatch`] — strip suffix, resolve through cache/trie,
//!   run the interceptor chain, hand the raw [`Outcome`] to the resolution
//!   cascade.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use waypoint::prelude::*;
//! use waypoint::testing::TextAction;
//!
//! let mut builder = PathRouter::<String>::builder();
//! builder.add_action(ActionDef::new("user/{id}", ActionUnit::singleton(TextAction("ok"))))?;
//! let router = builder.build();
//!
//! let outcome = router.dispatch("/user/42", Vec::new())?;
//! assert_eq!(outcome, Outcome::text("ok"));
//! ```
//!
//! [`build`]: PathRouterBuilder::build

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod cache;
mod chain;
pub mod config;
mod registry;
pub mod results;
pub mod router;
pub mod routing;
pub mod testing;

pub use waypoint_core::{
    // Actions
    Action,
    ActionDef,
    ActionUnit,
    // Errors
    BoxError,
    DispatchError,
    Endpoint,
    GlobalResult,
    // Interceptors
    Interceptor,
    InterceptorStack,
    // Context
    Invocation,
    MATCH_ANY,
    Namespace,
    // Return values
    Outcome,
    Payload,
    RegistrationError,
    // Results
    ResultDef,
    ResultHook,
    ResultType,
    Scope,
    WaypointError,
};

pub use cache::{CacheEntry, DispatchCache};
pub use config::RouterOptions;
pub use results::DefaultResultHook;
pub use router::{PathRouter, PathRouterBuilder};
pub use routing::trie::{PathMatch, PathTrie};

/// Prelude module - common imports for Waypoint.
///
/// # Usage
///
/// ```rust,ignore
/// use waypoint::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Actions
        Action,
        ActionDef,
        ActionUnit,
        // Errors
        BoxError,
        DispatchError,
        // Interceptors
        Interceptor,
        // Context
        Invocation,
        Namespace,
        // Return values
        Outcome,
        // Router
        PathRouter,
        PathRouterBuilder,
        Payload,
        RegistrationError,
        // Results
        ResultDef,
        ResultType,
        RouterOptions,
        Scope,
    };
}
