//! Router configuration.

use tracing::{info, warn};

/// The recognized configuration surface of a router.
///
/// Options are fixed before any action is registered; changing them on a
/// built router is not possible. Unknown property names and unparsable
/// values are warnings, never errors.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Separator splitting a path into segments.
    pub path_separator: char,
    /// Suffix stripped from request paths before matching; empty disables
    /// stripping.
    pub path_suffix: String,
    /// Capacity of the matched-path cache tier; non-positive disables
    /// caching entirely.
    pub cache_capacity: i64,
    /// Stack expanded for actions whose own and namespace declarations are
    /// both empty.
    pub default_interceptor_stack: Option<String>,
    /// Result type used when a resolved result declares no kind.
    pub default_result_type: Option<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            path_separator: '/',
            path_suffix: ".".to_string(),
            cache_capacity: 10_000,
            default_interceptor_stack: None,
            default_result_type: None,
        }
    }
}

impl RouterOptions {
    /// Apply a stringly-named property, matching names case-insensitively.
    ///
    /// Recognized names: `pathSeparator`, `pathSuffix`, `cacheCapacity`,
    /// `defaultInterceptorStack`, `defaultResultType`. Anything else is
    /// logged and ignored.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let value = value.trim();
        match name.to_ascii_lowercase().as_str() {
            "pathseparator" => match value.chars().next() {
                Some(separator) => {
                    self.path_separator = separator;
                    info!("set pathSeparator: {}", separator);
                }
                None => warn!("property [pathSeparator] must not be blank"),
            },
            "pathsuffix" => {
                self.path_suffix = value.to_string();
                info!("set pathSuffix: [{}]", self.path_suffix);
            }
            "cachecapacity" => match value.parse::<i64>() {
                Ok(capacity) => {
                    self.cache_capacity = capacity;
                    info!("set cacheCapacity: {}", capacity);
                }
                Err(_) => warn!("ignoring unparsable [cacheCapacity]: [{}]", value),
            },
            "defaultinterceptorstack" => {
                self.default_interceptor_stack =
                    (!value.is_empty()).then(|| value.to_string());
                info!("set defaultInterceptorStack: [{}]", value);
            }
            "defaultresulttype" => {
                self.default_result_type = (!value.is_empty()).then(|| value.to_string());
                info!("set defaultResultType: [{}]", value);
            }
            _ => warn!("ignoring unknown property [{}]: [{}]", name, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RouterOptions;

    #[test]
    fn property_names_match_case_insensitively() {
        let mut options = RouterOptions::default();
        options.set_property("PATHSUFFIX", "do");
        options.set_property("CacheCapacity", "2");
        options.set_property("defaultResultType", "page");
        assert_eq!(options.path_suffix, "do");
        assert_eq!(options.cache_capacity, 2);
        assert_eq!(options.default_result_type.as_deref(), Some("page"));
    }

    #[test]
    fn bad_values_keep_the_previous_setting() {
        let mut options = RouterOptions::default();
        options.set_property("cacheCapacity", "many");
        assert_eq!(options.cache_capacity, 10_000);
        options.set_property("pathSeparator", "  ");
        assert_eq!(options.path_separator, '/');
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let mut options = RouterOptions::default();
        options.set_property("bytecode", "javassist");
        assert_eq!(options.path_separator, '/');
    }

    #[test]
    fn empty_defaults_reset_to_none() {
        let mut options = RouterOptions::default();
        options.set_property("defaultInterceptorStack", "base");
        options.set_property("defaultInterceptorStack", "");
        assert!(options.default_interceptor_stack.is_none());
    }
}
