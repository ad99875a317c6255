//! Trie-based path matcher with wildcard capture.

use std::collections::HashMap;
use waypoint_core::RegistrationError;

/// A trie node for one path segment.
struct Node<V> {
    value: Option<V>,
    children: HashMap<String, Node<V>>,
    wildcard: Option<Box<Wildcard<V>>>,
}

/// The at-most-one wildcard child of a node, binding any single segment to a
/// parameter name.
struct Wildcard<V> {
    name: String,
    node: Node<V>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            value: None,
            children: HashMap::new(),
            wildcard: None,
        }
    }
}

/// A successful match: the stored value plus the captured wildcard segments.
pub struct PathMatch<'a, V> {
    /// The value stored at the matched terminal node.
    pub value: &'a V,
    /// Captured segments, keyed by the wildcard parameter names on the
    /// matched branch. Empty for a purely literal match.
    pub params: HashMap<String, String>,
}

/// A trie over separator-delimited path segments.
///
/// A segment written `{name}` matches any single literal segment and binds it
/// to `name`. Literal and wildcard children coexist at every level; matching
/// prefers the literal branch and falls back to the wildcard branch, including
/// by backtracking when the literal subtree cannot complete the match. Empty
/// segments are skipped, so `/a//b` and `/a/b` are the same path.
pub struct PathTrie<V> {
    root: Node<V>,
    separator: char,
    len: usize,
}

impl<V> PathTrie<V> {
    /// Create an empty trie splitting on the given separator.
    pub fn new(separator: char) -> Self {
        Self {
            root: Node::default(),
            separator,
            len: 0,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value` at `path`, creating nodes as needed.
    ///
    /// Fails on an exactly-duplicate path, on a wildcard segment with no
    /// parameter name, and on a wildcard binding a different name than one
    /// already present at the same level. Overlap with a path reachable only
    /// through wildcards is not detected here; callers decide how to treat
    /// ambiguity.
    pub fn insert(&mut self, path: &str, value: V) -> Result<(), RegistrationError> {
        let mut node = &mut self.root;
        for segment in path.split(self.separator).filter(|s| !s.is_empty()) {
            match wildcard_name(segment) {
                Some("") => return Err(RegistrationError::UnnamedWildcard(path.to_string())),
                Some(name) => {
                    let slot = node.wildcard.get_or_insert_with(|| {
                        Box::new(Wildcard {
                            name: name.to_string(),
                            node: Node::default(),
                        })
                    });
                    if slot.name != name {
                        return Err(RegistrationError::WildcardConflict {
                            path: path.to_string(),
                            existing: slot.name.clone(),
                            given: name.to_string(),
                        });
                    }
                    node = &mut slot.node;
                }
                None => {
                    node = node.children.entry(segment.to_string()).or_default();
                }
            }
        }
        if node.value.is_some() {
            return Err(RegistrationError::DuplicatePath(path.to_string()));
        }
        node.value = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Match `path` against the trie, capturing wildcard segments.
    pub fn find(&self, path: &str) -> Option<PathMatch<'_, V>> {
        let segments: Vec<&str> = path
            .split(self.separator)
            .filter(|s| !s.is_empty())
            .collect();
        let mut captures = Vec::new();
        let value = Self::descend(&self.root, &segments, &mut captures)?;
        Some(PathMatch {
            value,
            params: captures.into_iter().collect(),
        })
    }

    /// Literal-first depth-first walk; captures are unwound on backtrack.
    fn descend<'a>(
        node: &'a Node<V>,
        segments: &[&str],
        captures: &mut Vec<(String, String)>,
    ) -> Option<&'a V> {
        let Some((head, rest)) = segments.split_first() else {
            return node.value.as_ref();
        };
        if let Some(child) = node.children.get(*head) {
            if let Some(found) = Self::descend(child, rest, captures) {
                return Some(found);
            }
        }
        if let Some(wild) = node.wildcard.as_deref() {
            captures.push((wild.name.clone(), (*head).to_string()));
            if let Some(found) = Self::descend(&wild.node, rest, captures) {
                return Some(found);
            }
            captures.pop();
        }
        None
    }

    /// Drop every stored value and node.
    pub fn clear(&mut self) {
        self.root = Node::default();
        self.len = 0;
    }
}

/// The parameter name of a wildcard segment, or `None` for a literal one.
fn wildcard_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .map(|rest| rest.strip_suffix('}').unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::PathTrie;
    use waypoint_core::RegistrationError;

    #[test]
    fn exact_match() {
        let mut trie = PathTrie::new('/');
        trie.insert("/user/list", 1).unwrap();
        let found = trie.find("/user/list").unwrap();
        assert_eq!(*found.value, 1);
        assert!(found.params.is_empty());
        assert!(trie.find("/user").is_none());
        assert!(trie.find("/user/list/extra").is_none());
    }

    #[test]
    fn wildcard_captures_segment() {
        let mut trie = PathTrie::new('/');
        trie.insert("/user/{id}", 1).unwrap();
        let found = trie.find("/user/42").unwrap();
        assert_eq!(*found.value, 1);
        assert_eq!(found.params["id"], "42");
    }

    #[test]
    fn literal_wins_over_wildcard() {
        let mut trie = PathTrie::new('/');
        trie.insert("/user/{id}", 1).unwrap();
        trie.insert("/user/new", 2).unwrap();
        assert_eq!(*trie.find("/user/new").unwrap().value, 2);
        assert!(trie.find("/user/new").unwrap().params.is_empty());
        assert_eq!(*trie.find("/user/42").unwrap().value, 1);
    }

    #[test]
    fn backtracks_into_wildcard_on_literal_dead_end() {
        let mut trie = PathTrie::new('/');
        trie.insert("/a/b/c", 1).unwrap();
        trie.insert("/a/{x}", 2).unwrap();
        // "/a/b" dead-ends under the literal branch and falls back.
        let found = trie.find("/a/b").unwrap();
        assert_eq!(*found.value, 2);
        assert_eq!(found.params["x"], "b");
        assert_eq!(*trie.find("/a/b/c").unwrap().value, 1);
    }

    #[test]
    fn captures_every_wildcard_level() {
        let mut trie = PathTrie::new('/');
        trie.insert("/{org}/repo/{id}", 1).unwrap();
        let found = trie.find("/acme/repo/7").unwrap();
        assert_eq!(found.params["org"], "acme");
        assert_eq!(found.params["id"], "7");
    }

    #[test]
    fn failed_wildcard_branch_unwinds_captures() {
        let mut trie = PathTrie::new('/');
        trie.insert("/{a}/x", 1).unwrap();
        trie.insert("/p/{b}", 2).unwrap();
        let found = trie.find("/p/q").unwrap();
        assert_eq!(*found.value, 2);
        assert_eq!(found.params.len(), 1);
        assert_eq!(found.params["b"], "q");
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let mut trie = PathTrie::new('/');
        trie.insert("/user/list", 1).unwrap();
        assert!(matches!(
            trie.insert("/user/list", 2),
            Err(RegistrationError::DuplicatePath(_))
        ));
        // wildcard overlap is not a duplicate
        trie.insert("/user/{id}", 3).unwrap();
    }

    #[test]
    fn conflicting_wildcard_names_are_rejected() {
        let mut trie = PathTrie::new('/');
        trie.insert("/user/{id}/edit", 1).unwrap();
        assert!(matches!(
            trie.insert("/user/{name}/view", 2),
            Err(RegistrationError::WildcardConflict { .. })
        ));
    }

    #[test]
    fn unnamed_wildcard_is_rejected() {
        let mut trie = PathTrie::new('/');
        assert!(matches!(
            trie.insert("/user/{}", 1),
            Err(RegistrationError::UnnamedWildcard(_))
        ));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let mut trie = PathTrie::new('/');
        trie.insert("/a//b", 1).unwrap();
        assert_eq!(*trie.find("/a/b").unwrap().value, 1);
    }

    #[test]
    fn root_path_matches_root_value() {
        let mut trie = PathTrie::new('/');
        trie.insert("/", 1).unwrap();
        assert_eq!(*trie.find("/").unwrap().value, 1);
    }

    #[test]
    fn clear_empties_the_trie() {
        let mut trie = PathTrie::new('/');
        trie.insert("/a", 1).unwrap();
        trie.clear();
        assert!(trie.is_empty());
        assert!(trie.find("/a").is_none());
    }
}
