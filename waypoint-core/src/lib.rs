//! # waypoint-core
//!
//! Core traits and data model for the Waypoint path dispatch framework.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! adapter crates (metadata discovery layers, container glue) that don't need
//! the full `waypoint` engine.
//!
//! # The dispatch model
//!
//! Waypoint routes a string path to a registered [`Action`] and resolves the
//! action's return value into a further rendering step. The pieces defined
//! here:
//!
//! - [`Action`] — the invokable unit of work reachable by a path. Its return
//!   value is an [`Outcome`]: `Void`, `Text` or an opaque `Value`.
//! - [`Interceptor`] — a pre/post-processing unit wrapping an action
//!   invocation. Interceptors run in list order; each drives the rest of the
//!   pipeline through [`Invocation::proceed`] and may short-circuit it or
//!   post-process its outcome. [`InterceptorStack`] is a named ordered list
//!   of interceptors.
//! - [`ResultDef`] / [`ResultType`] — a named outcome declared on an action,
//!   dispatched to a named rendering unit selected by kind. [`GlobalResult`]
//!   is a process-wide fallback result. [`ResultHook`] receives whatever the
//!   cascade could not place.
//! - [`Invocation`] — the per-dispatch context threaded explicitly through
//!   the chain; there is no ambient per-thread request state.
//! - [`Endpoint`] — an action bound to its normalized path, resolved
//!   interceptor chain and result map; immutable once registered.
//!
//! # Error types
//!
//! - [`WaypointError`] — top-level error type
//! - [`DispatchError`] — request-time errors, always fatal to the dispatch
//! - [`RegistrationError`] — setup-time conflicts, fatal to initialization

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod error;
mod interceptor;
mod invocation;
mod outcome;
mod payload;
mod result;

pub use action::{Action, ActionDef, ActionUnit, Endpoint, Namespace, Scope};
pub use error::{BoxError, DispatchError, RegistrationError, WaypointError};
pub use interceptor::{Interceptor, InterceptorStack};
pub use invocation::Invocation;
pub use outcome::Outcome;
pub use payload::Payload;
pub use result::{GlobalResult, MATCH_ANY, ResultDef, ResultHook, ResultType};
