//! Testing utilities for Waypoint.
//!
//! Recording and spy units used to verify routing, chain order and result
//! resolution without real handler logic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use waypoint_core::{
    Action, BoxError, Interceptor, Invocation, Outcome, Payload, ResultDef, ResultType,
};

// ============================================================================
// Text action
// ============================================================================

/// An action that always returns the same text outcome.
pub struct TextAction(pub &'static str);

impl<T: Payload> Action<T> for TextAction {
    fn perform(&self, _inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError> {
        Ok(Outcome::text(self.0))
    }
}

// ============================================================================
// Recording action
// ============================================================================

/// An action that records the path and captured parameters of every
/// invocation it receives, then answers with a fixed text outcome.
pub struct RecordingAction {
    calls: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
    reply: &'static str,
}

impl RecordingAction {
    /// Create a recording action answering `reply`.
    pub fn new(reply: &'static str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply,
        }
    }

    /// The recorded (path, parameters) pairs.
    pub fn calls(&self) -> Vec<(String, HashMap<String, String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded invocations.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Clone for RecordingAction {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            reply: self.reply,
        }
    }
}

impl<T: Payload> Action<T> for RecordingAction {
    fn perform(&self, inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError> {
        self.calls
            .lock()
            .unwrap()
            .push((inv.path().to_string(), inv.params().clone()));
        Ok(Outcome::text(self.reply))
    }
}

// ============================================================================
// Failing action
// ============================================================================

/// An action that always fails with the given message.
pub struct FailingAction(pub &'static str);

impl<T: Payload> Action<T> for FailingAction {
    fn perform(&self, _inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError> {
        Err(self.0.into())
    }
}

// ============================================================================
// Recording interceptor
// ============================================================================

/// An interceptor that logs entry and exit around `proceed` into a shared
/// log, so tests can assert chain order across several instances.
pub struct RecordingInterceptor {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingInterceptor {
    /// Create an interceptor writing to the given shared log.
    pub fn new(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { name, log }
    }
}

impl<T: Payload> Interceptor<T> for RecordingInterceptor {
    fn intercept(&self, inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError> {
        self.log.lock().unwrap().push(format!("{}>", self.name));
        let outcome = inv.proceed()?;
        self.log.lock().unwrap().push(format!("<{}", self.name));
        Ok(outcome)
    }
}

// ============================================================================
// Short-circuit interceptor
// ============================================================================

/// An interceptor that never calls `proceed` and answers with a fixed text
/// outcome, skipping everything downstream.
pub struct ShortCircuit(pub &'static str);

impl<T: Payload> Interceptor<T> for ShortCircuit {
    fn intercept(&self, _inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError> {
        Ok(Outcome::text(self.0))
    }
}

// ============================================================================
// Recording result type
// ============================================================================

/// A result type that records every definition it renders and answers with
/// an optional fixed text outcome.
pub struct RecordingResultType {
    renders: Arc<Mutex<Vec<ResultDef>>>,
    reply: Option<&'static str>,
}

impl RecordingResultType {
    /// Create a recording result type that replaces the outcome with `reply`.
    pub fn new(reply: &'static str) -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
            reply: Some(reply),
        }
    }

    /// Create a recording result type that declines to replace the outcome.
    pub fn silent() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
            reply: None,
        }
    }

    /// The recorded definitions, in render order.
    pub fn renders(&self) -> Vec<ResultDef> {
        self.renders.lock().unwrap().clone()
    }

    /// The most recently rendered definition.
    pub fn last(&self) -> Option<ResultDef> {
        self.renders.lock().unwrap().last().cloned()
    }

    /// Number of recorded renders.
    pub fn count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }
}

impl Clone for RecordingResultType {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
            reply: self.reply,
        }
    }
}

impl<T: Payload> ResultType<T> for RecordingResultType {
    fn render(
        &self,
        _inv: &mut Invocation<T>,
        result: &ResultDef,
    ) -> Result<Option<Outcome<T>>, BoxError> {
        self.renders.lock().unwrap().push(result.clone());
        Ok(self.reply.map(|reply| Outcome::text(reply)))
    }
}
