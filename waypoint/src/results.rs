//! Result resolution: deciding where a raw outcome goes next.
//!
//! Once the interceptor chain has produced an [`Outcome`], the router walks
//! an ordered cascade. Non-text outcomes go straight to the non-text hook.
//! A text outcome is matched, in order, against the action's own results,
//! the match-any/colon protocol, the global result registry, and finally the
//! undefined-result hook; the first branch that applies is terminal.

use crate::router::PathRouter;
use tracing::{debug, warn};
use waypoint_core::{
    BoxError, DispatchError, Invocation, MATCH_ANY, Outcome, Payload, ResultDef, ResultHook,
};

impl<T: Payload> PathRouter<T> {
    /// Walk the resolution cascade for one raw outcome.
    pub(crate) fn resolve_outcome(
        &self,
        inv: &mut Invocation<T>,
        raw: Outcome<T>,
    ) -> Result<Outcome<T>, DispatchError> {
        match raw {
            Outcome::Text(text) => self.resolve_text(inv, text),
            other => {
                let replaced = self
                    .hook
                    .on_value(inv, &other)
                    .map_err(DispatchError::from_boxed)?;
                Ok(replaced.unwrap_or(other))
            }
        }
    }

    fn resolve_text(
        &self,
        inv: &mut Invocation<T>,
        text: String,
    ) -> Result<Outcome<T>, DispatchError> {
        // the action's own result map
        if let Some(def) = inv.endpoint().results().get(&text).cloned() {
            let rendered = self.render(inv, &def)?;
            return Ok(rendered.unwrap_or(Outcome::Text(text)));
        }

        // match-any entry, or a "type:location" marker in the text itself
        let match_any = inv.endpoint().results().get(MATCH_ANY).cloned();
        if match_any.is_some() || text.contains(':') {
            let mut kind = self.options.default_result_type.clone().unwrap_or_default();
            let mut location = String::new();
            if let Some(any) = &match_any {
                if !any.kind.is_empty() {
                    kind = any.kind.clone();
                }
                location = any.location.clone();
            }
            let (kind, location) = parse_target(&text, kind, location);
            let def = ResultDef::new(MATCH_ANY).kind(kind).location(location);
            let rendered = self.render(inv, &def)?;
            return Ok(rendered.unwrap_or(Outcome::Text(text)));
        }

        // the global result registry
        if let Some(global) = self.results.get(&text) {
            let def = global.def().clone();
            let unit = global.unit().clone();
            let mut current = Outcome::Text(text);
            if let Some(replaced) = unit
                .render(inv, &def)
                .map_err(DispatchError::from_boxed)?
            {
                current = replaced;
            }
            if !def.kind.is_empty() {
                if let Some(replaced) = self.render(inv, &def)? {
                    current = replaced;
                }
            }
            return Ok(current);
        }

        // nothing matched anywhere
        match self
            .hook
            .on_undefined(inv, &text)
            .map_err(DispatchError::from_boxed)?
        {
            Some(replaced) => Ok(replaced),
            None => Ok(Outcome::Text(text)),
        }
    }

    /// Invoke the result type a definition selects, falling back to the
    /// router's default kind.
    fn render(
        &self,
        inv: &mut Invocation<T>,
        def: &ResultDef,
    ) -> Result<Option<Outcome<T>>, DispatchError> {
        let kind: &str = if def.kind.is_empty() {
            self.options.default_result_type.as_deref().unwrap_or_default()
        } else {
            &def.kind
        };
        let Some(result_type) = self.result_types.get(kind) else {
            return Err(DispatchError::ResultTypeNotFound(kind.to_string()));
        };
        debug!("rendering result [{}] via [{}]", def.name, kind);
        result_type
            .render(inv, def)
            .map_err(DispatchError::from_boxed)
    }
}

/// Parse a `"type:location"` marker, splitting at the first colon.
///
/// Either side overrides its default only when non-empty after trimming: no
/// colon means the whole trimmed text is the type, a leading colon means the
/// trimmed remainder is the location.
pub(crate) fn parse_target(text: &str, kind: String, location: String) -> (String, String) {
    match text.find(':') {
        None => {
            let parsed = text.trim();
            if parsed.is_empty() {
                (kind, location)
            } else {
                (parsed.to_string(), location)
            }
        }
        Some(0) => {
            let parsed = text[1..].trim();
            if parsed.is_empty() {
                (kind, location)
            } else {
                (kind, parsed.to_string())
            }
        }
        Some(index) => {
            let left = text[..index].trim();
            let right = text[index + 1..].trim();
            (
                if left.is_empty() {
                    kind
                } else {
                    left.to_string()
                },
                if right.is_empty() {
                    location
                } else {
                    right.to_string()
                },
            )
        }
    }
}

/// The fallback hooks a router starts with: log and leave the outcome alone.
pub struct DefaultResultHook;

impl<T: Payload> ResultHook<T> for DefaultResultHook {
    fn on_value(
        &self,
        inv: &mut Invocation<T>,
        _outcome: &Outcome<T>,
    ) -> Result<Option<Outcome<T>>, BoxError> {
        warn!("returning non-text outcome of [{}] unchanged", inv.path());
        Ok(None)
    }

    fn on_undefined(
        &self,
        inv: &mut Invocation<T>,
        text: &str,
    ) -> Result<Option<Outcome<T>>, BoxError> {
        warn!(
            "no result registered as [{}] for [{}], returning the text unchanged",
            text,
            inv.path()
        );
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::parse_target;

    fn defaults() -> (String, String) {
        ("page".to_string(), "default.jsp".to_string())
    }

    #[test]
    fn both_sides_override() {
        let (kind, location) = defaults();
        assert_eq!(
            parse_target("report:out.jsp", kind, location),
            ("report".to_string(), "out.jsp".to_string())
        );
    }

    #[test]
    fn leading_colon_keeps_the_default_kind() {
        let (kind, location) = defaults();
        assert_eq!(
            parse_target(":out.jsp", kind, location),
            ("page".to_string(), "out.jsp".to_string())
        );
    }

    #[test]
    fn missing_colon_is_a_kind_override() {
        let (kind, location) = defaults();
        assert_eq!(
            parse_target("report", kind, location),
            ("report".to_string(), "default.jsp".to_string())
        );
    }

    #[test]
    fn blank_sides_keep_their_defaults() {
        let (kind, location) = defaults();
        assert_eq!(
            parse_target(" : ", kind, location),
            ("page".to_string(), "default.jsp".to_string())
        );
        let (kind, location) = defaults();
        assert_eq!(
            parse_target("", kind, location),
            ("page".to_string(), "default.jsp".to_string())
        );
    }

    #[test]
    fn sides_are_trimmed() {
        let (kind, location) = defaults();
        assert_eq!(
            parse_target(" report : out.jsp ", kind, location),
            ("report".to_string(), "out.jsp".to_string())
        );
    }
}
