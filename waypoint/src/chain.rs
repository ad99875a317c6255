//! Interceptor chain resolution.
//!
//! Evaluated once per action at registration time. First rule that applies
//! wins: the action's own declarations, then its namespace's, then the
//! router-wide default stack. Within a rule the stack expands first and
//! explicitly named interceptors follow. Unresolvable names are skipped with
//! a warning; they never abort registration.

use crate::registry::NamedRegistry;
use std::sync::Arc;
use tracing::warn;
use waypoint_core::{Interceptor, InterceptorStack, Namespace, Payload};

pub(crate) fn resolve_chain<T: Payload>(
    stack: Option<&str>,
    names: &[String],
    namespace: Option<&Namespace>,
    default_stack: Option<&str>,
    path: &str,
    interceptors: &NamedRegistry<Arc<dyn Interceptor<T>>>,
    stacks: &NamedRegistry<InterceptorStack<T>>,
) -> Vec<Arc<dyn Interceptor<T>>> {
    let mut chain = Vec::new();
    let stack = stack.map(str::trim).filter(|name| !name.is_empty());

    if !names.is_empty() {
        if let Some(name) = stack {
            push_stack(&mut chain, name, stacks, path);
        }
        push_named(&mut chain, names, interceptors, path);
    } else if let Some(name) = stack {
        push_stack(&mut chain, name, stacks, path);
    } else {
        let mut declared = false;
        if let Some(ns) = namespace {
            if let Some(name) = ns
                .interceptor_stack
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
            {
                declared = true;
                push_stack(&mut chain, name, stacks, path);
            }
            if !ns.interceptors.is_empty() {
                declared = true;
                push_named(&mut chain, &ns.interceptors, interceptors, path);
            }
        }
        if !declared {
            if let Some(name) = default_stack {
                push_stack(&mut chain, name, stacks, path);
            }
        }
    }
    chain
}

fn push_stack<T: Payload>(
    chain: &mut Vec<Arc<dyn Interceptor<T>>>,
    name: &str,
    stacks: &NamedRegistry<InterceptorStack<T>>,
    path: &str,
) {
    match stacks.get(name) {
        Some(stack) => chain.extend(stack.interceptors().iter().cloned()),
        None => warn!(
            "no interceptor stack registered as [{}] for action [{}]",
            name, path
        ),
    }
}

fn push_named<T: Payload>(
    chain: &mut Vec<Arc<dyn Interceptor<T>>>,
    names: &[String],
    interceptors: &NamedRegistry<Arc<dyn Interceptor<T>>>,
    path: &str,
) {
    for name in names {
        match interceptors.get(name) {
            Some(interceptor) => chain.push(interceptor.clone()),
            None => warn!(
                "no interceptor registered as [{}] for action [{}]",
                name, path
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_chain;
    use crate::registry::NamedRegistry;
    use std::sync::Arc;
    use waypoint_core::{
        BoxError, Interceptor, InterceptorStack, Invocation, Namespace, Outcome, Payload,
    };

    struct Tagged(&'static str);

    impl<T: Payload> Interceptor<T> for Tagged {
        fn intercept(&self, inv: &mut Invocation<T>) -> Result<Outcome<T>, BoxError> {
            inv.proceed()
        }
    }

    fn registries() -> (
        NamedRegistry<Arc<dyn Interceptor<String>>>,
        NamedRegistry<InterceptorStack<String>>,
    ) {
        let mut interceptors: NamedRegistry<Arc<dyn Interceptor<String>>> =
            NamedRegistry::new("interceptor");
        for name in ["auth", "timer", "audit"] {
            interceptors.add(name, Arc::new(Tagged(name))).unwrap();
        }
        let mut stacks = NamedRegistry::new("interceptor stack");
        let base: Vec<Arc<dyn Interceptor<String>>> = vec![
            interceptors.get("auth").unwrap().clone(),
            interceptors.get("timer").unwrap().clone(),
        ];
        stacks
            .add("base", InterceptorStack::new("base", base))
            .unwrap();
        (interceptors, stacks)
    }

    #[test]
    fn own_declarations_expand_stack_then_names() {
        let (interceptors, stacks) = registries();
        let chain = resolve_chain(
            Some("base"),
            &["audit".to_string()],
            None,
            None,
            "/a",
            &interceptors,
            &stacks,
        );
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn namespace_declarations_apply_when_action_has_none() {
        let (interceptors, stacks) = registries();
        let namespace = Namespace::new("admin").interceptor("audit");
        let chain = resolve_chain(
            None,
            &[],
            Some(&namespace),
            Some("base"),
            "/admin/a",
            &interceptors,
            &stacks,
        );
        // namespace wins over the default stack
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn default_stack_is_the_last_resort() {
        let (interceptors, stacks) = registries();
        let chain = resolve_chain(None, &[], None, Some("base"), "/a", &interceptors, &stacks);
        assert_eq!(chain.len(), 2);
        let none = resolve_chain(None, &[], None, None, "/a", &interceptors, &stacks);
        assert!(none.is_empty());
    }

    #[test]
    fn unresolvable_names_are_skipped() {
        let (interceptors, stacks) = registries();
        let chain = resolve_chain(
            Some("missing"),
            &["audit".to_string(), "ghost".to_string()],
            None,
            None,
            "/a",
            &interceptors,
            &stacks,
        );
        assert_eq!(chain.len(), 1);
    }
}
