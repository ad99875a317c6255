//! Results and result types: where a string outcome goes next.
//!
//! An action declares named results; when its text outcome equals one of
//! those names, the matching [`ResultDef`] selects a registered [`ResultType`]
//! by kind and hands it the definition's location. A [`GlobalResult`] is a
//! process-wide fallback consulted when the action declares nothing for the
//! outcome, and a [`ResultHook`] receives whatever the cascade could not
//! place at all.

use crate::{BoxError, Invocation, Outcome, Payload};
use std::sync::Arc;

/// The reserved result name matching any otherwise-unmatched text outcome.
pub const MATCH_ANY: &str = "*";

/// A named result declaration: which result type runs, and where.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultDef {
    /// Name matched against an action's text outcome.
    pub name: String,
    /// Result-type name selecting the rendering unit; empty selects the
    /// router's default result type.
    pub kind: String,
    /// Opaque location string passed to the rendering unit.
    pub location: String,
}

impl ResultDef {
    /// Create a definition with the given name and empty kind/location.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: String::new(),
            location: String::new(),
        }
    }

    /// Set the result-type name.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the location string.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// A named rendering unit invoked with a resolved result definition.
///
/// Returning `Ok(None)` leaves the outcome under resolution in place;
/// returning `Ok(Some(..))` replaces it.
pub trait ResultType<T: Payload>: Send + Sync {
    /// Render the given result against the live invocation.
    fn render(
        &self,
        inv: &mut Invocation<T>,
        result: &ResultDef,
    ) -> Result<Option<Outcome<T>>, BoxError>;
}

// Blanket implementation for plain closures.
impl<T, F> ResultType<T> for F
where
    T: Payload,
    F: Fn(&mut Invocation<T>, &ResultDef) -> Result<Option<Outcome<T>>, BoxError> + Send + Sync,
{
    fn render(
        &self,
        inv: &mut Invocation<T>,
        result: &ResultDef,
    ) -> Result<Option<Outcome<T>>, BoxError> {
        (self)(inv, result)
    }
}

/// A process-wide result: a named definition with its own invokable unit.
///
/// Consulted when an action's text outcome matches no local result and
/// carries no kind marker. The unit is invoked directly; when the definition
/// additionally declares a kind, the result type registered under that kind
/// runs afterwards and a non-`None` return overrides again.
pub struct GlobalResult<T: Payload> {
    def: ResultDef,
    unit: Arc<dyn ResultType<T>>,
}

impl<T: Payload> GlobalResult<T> {
    /// Pair a definition with its unit.
    pub fn new(def: ResultDef, unit: impl ResultType<T> + 'static) -> Self {
        Self {
            def,
            unit: Arc::new(unit),
        }
    }

    /// The result's definition.
    pub fn def(&self) -> &ResultDef {
        &self.def
    }

    /// The result's own rendering unit.
    pub fn unit(&self) -> &Arc<dyn ResultType<T>> {
        &self.unit
    }
}

impl<T: Payload> Clone for GlobalResult<T> {
    fn clone(&self) -> Self {
        Self {
            def: self.def.clone(),
            unit: self.unit.clone(),
        }
    }
}

impl<T: Payload> std::fmt::Debug for GlobalResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalResult").field("def", &self.def).finish()
    }
}

/// The two external fallback hooks of the resolution cascade.
///
/// `on_value` observes non-text outcomes after the chain completed;
/// `on_undefined` observes text outcomes that matched nothing anywhere.
/// Both leave the outcome unchanged by returning `Ok(None)`.
pub trait ResultHook<T: Payload>: Send + Sync {
    /// A non-text outcome reached the resolver.
    fn on_value(
        &self,
        inv: &mut Invocation<T>,
        outcome: &Outcome<T>,
    ) -> Result<Option<Outcome<T>>, BoxError>;

    /// A text outcome matched no result anywhere.
    fn on_undefined(
        &self,
        inv: &mut Invocation<T>,
        text: &str,
    ) -> Result<Option<Outcome<T>>, BoxError>;
}
