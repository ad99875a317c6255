//! Path construction and suffix stripping rules.

/// Trim whitespace and separator characters from both ends.
fn trim_path(text: &str, separator: char) -> &str {
    text.trim().trim_matches(separator)
}

/// The canonical path of a namespace: leading separator, no trailing one.
pub(crate) fn namespace_path(name: Option<&str>, separator: char) -> String {
    let trimmed = name.map(|n| trim_path(n, separator)).unwrap_or_default();
    if trimmed.is_empty() {
        separator.to_string()
    } else {
        format!("{separator}{trimmed}")
    }
}

/// Build the registration path of an action from its namespace and name.
///
/// A name starting with the separator is absolute and ignores the namespace;
/// a name that trims to nothing collapses to the namespace path; anything
/// else joins namespace and name with the separator.
pub(crate) fn build_path(namespace: Option<&str>, name: &str, separator: char) -> String {
    let ns = namespace_path(namespace, separator);
    let name = name.trim();
    let trimmed = trim_path(name, separator);
    if trimmed.is_empty() {
        ns
    } else if name.starts_with(separator) {
        format!("{separator}{trimmed}")
    } else if ns.len() == separator.len_utf8() {
        format!("{separator}{trimmed}")
    } else {
        format!("{ns}{separator}{trimmed}")
    }
}

/// Strip a literally-trailing suffix, plus one non-alphanumeric joining
/// character left dangling before it.
fn strip_literal_suffix<'a>(path: &'a str, suffix: &str) -> &'a str {
    let Some(stem) = path.strip_suffix(suffix) else {
        return path;
    };
    match stem.chars().next_back() {
        Some(joiner) if !joiner.is_alphanumeric() => &stem[..stem.len() - joiner.len_utf8()],
        _ => stem,
    }
}

/// Strip the configured suffix from a request path.
///
/// A single-character non-alphanumeric suffix marks the cut point: the path
/// is truncated at the marker's last occurrence. Any other non-empty suffix
/// is stripped only when the path literally ends with it, together with one
/// preceding non-alphanumeric joining character.
pub(crate) fn strip_request_suffix<'a>(path: &'a str, suffix: &str) -> &'a str {
    let mut chars = suffix.chars();
    let Some(first) = chars.next() else {
        return path;
    };
    if chars.next().is_none() && !first.is_alphanumeric() {
        match path.rfind(first) {
            Some(index) => &path[..index],
            None => path,
        }
    } else {
        strip_literal_suffix(path, suffix)
    }
}

/// Strip the configured suffix from a registration path.
///
/// Registration paths only ever lose a literally-trailing suffix; the
/// last-occurrence truncation applied to request paths would mangle literal
/// segments containing the marker.
pub(crate) fn strip_registered_suffix<'a>(path: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return path;
    }
    strip_literal_suffix(path, suffix)
}

#[cfg(test)]
mod tests {
    use super::{build_path, namespace_path, strip_registered_suffix, strip_request_suffix};

    #[test]
    fn namespace_paths_are_canonical() {
        assert_eq!(namespace_path(None, '/'), "/");
        assert_eq!(namespace_path(Some(""), '/'), "/");
        assert_eq!(namespace_path(Some("admin"), '/'), "/admin");
        assert_eq!(namespace_path(Some(" /admin/ "), '/'), "/admin");
    }

    #[test]
    fn names_join_their_namespace() {
        assert_eq!(build_path(Some("admin"), "list", '/'), "/admin/list");
        assert_eq!(build_path(None, "list", '/'), "/list");
        assert_eq!(build_path(Some("admin"), "user/list/", '/'), "/admin/user/list");
    }

    #[test]
    fn absolute_names_ignore_the_namespace() {
        assert_eq!(build_path(Some("admin"), "/top", '/'), "/top");
    }

    #[test]
    fn separator_only_names_collapse_to_the_namespace() {
        assert_eq!(build_path(Some("admin"), "/", '/'), "/admin");
        assert_eq!(build_path(None, "/", '/'), "/");
    }

    #[test]
    fn marker_suffix_truncates_at_last_occurrence() {
        assert_eq!(strip_request_suffix("/user/42.", "."), "/user/42");
        assert_eq!(strip_request_suffix("/user/42.do", "."), "/user/42");
        assert_eq!(strip_request_suffix("/user/42", "."), "/user/42");
        assert_eq!(strip_request_suffix("/user/42", ""), "/user/42");
    }

    #[test]
    fn string_suffix_strips_trailing_text_and_joiner() {
        assert_eq!(strip_request_suffix("/user/42.do", ".do"), "/user/42");
        assert_eq!(strip_request_suffix("/user/42.do", "do"), "/user/42");
        assert_eq!(strip_request_suffix("/user/42", ".do"), "/user/42");
        assert_eq!(strip_request_suffix(".do", ".do"), "");
    }

    #[test]
    fn registration_only_loses_a_literal_tail() {
        assert_eq!(strip_registered_suffix("/user/list.", "."), "/user/list");
        assert_eq!(strip_registered_suffix("/v1.2/list", "."), "/v1.2/list");
        assert_eq!(strip_registered_suffix("/user/list", "."), "/user/list");
    }
}
