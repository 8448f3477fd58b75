//! bandmate-router: Zero-dependency path trie
//!
//! Matches client-side URL paths against registered route patterns and
//! hands back the route id plus captured segments. Used by `bandmate-core`
//! for the app's route table and by `bandmate-wasm` through it.
//!
//! ## Path Syntax
//! - `/users` - static segments
//! - `:name` - named parameter (captures one segment)
//! - `*` or `*name` - wildcard (captures the remaining path)
//!
//! ## Priority
//! 1. Exact static match (highest)
//! 2. Parameter match
//! 3. Wildcard match (lowest)
//!
//! Unlike a last-write-wins table, inserting a pattern that would shadow
//! or alias an existing one is rejected with an [`InsertError`].
//!
//! ## Example
//! ```
//! use bandmate_router::PathTrie;
//!
//! let mut trie = PathTrie::new();
//! trie.insert("/users", 0).unwrap();
//! trie.insert("/musician/:userId", 1).unwrap();
//!
//! let m = trie.find("/musician/42").unwrap();
//! assert_eq!(m.route_id, 1);
//! assert_eq!(m.params, vec![("userId".to_string(), "42".to_string())]);
//! ```

use std::collections::HashMap;
use std::fmt;

/// Trie match result
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// The matched route id
    pub route_id: u32,
    /// Captured path parameters as (name, raw value) pairs, in path order
    pub params: Vec<(String, String)>,
}

impl Match {
    /// Get params as HashMap for convenient access
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params.iter().cloned().collect()
    }

    /// Look up a single captured parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Rejected pattern registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// A route with the same shape is already registered
    Conflict {
        pattern: String,
        existing: u32,
    },
    /// Two different parameter names at the same position
    ParamName {
        pattern: String,
        existing: String,
        new: String,
    },
    /// `:` or `*` with nothing usable after it, or a wildcard that is not last
    Malformed(String),
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::Conflict { pattern, existing } => {
                write!(f, "`{}` conflicts with route #{}", pattern, existing)
            }
            InsertError::ParamName {
                pattern,
                existing,
                new,
            } => write!(
                f,
                "`{}` names parameter `:{}` where `:{}` is already registered",
                pattern, new, existing
            ),
            InsertError::Malformed(pattern) => write!(f, "malformed pattern `{}`", pattern),
        }
    }
}

impl std::error::Error for InsertError {}

/// Trie node for path segment matching
#[derive(Debug, Default)]
struct Node {
    /// Static children (key = path segment)
    children: HashMap<String, Node>,
    /// Parameter child (:userId)
    param_child: Option<Box<ParamNode>>,
    /// Wildcard child (*rest)
    wildcard_child: Option<Box<WildcardNode>>,
    /// Route id if this is a terminal node
    route_id: Option<u32>,
}

#[derive(Debug)]
struct ParamNode {
    name: String,
    node: Node,
}

#[derive(Debug)]
struct WildcardNode {
    name: String,
    route_id: u32,
}

/// Segment-wise path trie
#[derive(Debug, Default)]
pub struct PathTrie {
    root: Node,
    len: usize,
}

/// Split a path into its non-empty segments. Leading, trailing and doubled
/// slashes are not significant.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl PathTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern
    ///
    /// The trie is left untouched when the pattern is rejected.
    ///
    /// # Errors
    /// Returns [`InsertError`] when the pattern is malformed or would
    /// overlap an already registered pattern.
    pub fn insert(&mut self, pattern: &str, route_id: u32) -> Result<(), InsertError> {
        let segs = segments(pattern);
        Self::validate(pattern, &segs)?;
        Self::check(&self.root, pattern, &segs)?;
        Self::insert_node(&mut self.root, &segs, route_id);
        self.len += 1;
        Ok(())
    }

    fn validate(pattern: &str, segments: &[&str]) -> Result<(), InsertError> {
        let last = segments.len().saturating_sub(1);
        for (i, segment) in segments.iter().enumerate() {
            let empty_param = *segment == ":";
            let inner_wildcard = segment.starts_with('*') && i != last;
            if empty_param || inner_wildcard {
                return Err(InsertError::Malformed(pattern.to_string()));
            }
        }
        Ok(())
    }

    /// Walk the existing nodes and report what the insert would clash with
    fn check(node: &Node, pattern: &str, segments: &[&str]) -> Result<(), InsertError> {
        let Some((&segment, rest)) = segments.split_first() else {
            return match node.route_id {
                Some(existing) => Err(InsertError::Conflict {
                    pattern: pattern.to_string(),
                    existing,
                }),
                None => Ok(()),
            };
        };

        if let Some(name) = segment.strip_prefix(':') {
            match node.param_child {
                Some(ref param) if param.name != name => Err(InsertError::ParamName {
                    pattern: pattern.to_string(),
                    existing: param.name.clone(),
                    new: name.to_string(),
                }),
                Some(ref param) => Self::check(&param.node, pattern, rest),
                None => Ok(()),
            }
        } else if segment.starts_with('*') {
            match node.wildcard_child {
                Some(ref existing) => Err(InsertError::Conflict {
                    pattern: pattern.to_string(),
                    existing: existing.route_id,
                }),
                None => Ok(()),
            }
        } else {
            match node.children.get(segment) {
                Some(child) => Self::check(child, pattern, rest),
                None => Ok(()),
            }
        }
    }

    /// Add the nodes for an already validated and checked pattern
    fn insert_node(node: &mut Node, segments: &[&str], route_id: u32) {
        let Some((&segment, rest)) = segments.split_first() else {
            node.route_id = Some(route_id);
            return;
        };

        if let Some(name) = segment.strip_prefix(':') {
            let param = node.param_child.get_or_insert_with(|| {
                Box::new(ParamNode {
                    name: name.to_string(),
                    node: Node::default(),
                })
            });
            Self::insert_node(&mut param.node, rest, route_id);
        } else if let Some(name) = segment.strip_prefix('*') {
            let wildcard_name = if name.is_empty() { "*" } else { name };
            node.wildcard_child = Some(Box::new(WildcardNode {
                name: wildcard_name.to_string(),
                route_id,
            }));
        } else {
            let child = node.children.entry(segment.to_string()).or_default();
            Self::insert_node(child, rest, route_id);
        }
    }

    /// Find the route matching a concrete path
    ///
    /// The path must not carry a query string or fragment; callers strip
    /// those first.
    pub fn find(&self, path: &str) -> Option<Match> {
        let segs = segments(path);
        let mut params = Vec::new();
        Self::find_node(&self.root, &segs, &mut params)
    }

    fn find_node(
        node: &Node,
        segments: &[&str],
        params: &mut Vec<(String, String)>,
    ) -> Option<Match> {
        let Some((&segment, rest)) = segments.split_first() else {
            return node.route_id.map(|id| Match {
                route_id: id,
                params: params.clone(),
            });
        };

        // Priority 1: exact static match
        if let Some(child) = node.children.get(segment) {
            if let Some(m) = Self::find_node(child, rest, params) {
                return Some(m);
            }
        }

        // Priority 2: parameter match
        if let Some(ref param) = node.param_child {
            params.push((param.name.clone(), segment.to_string()));
            if let Some(m) = Self::find_node(&param.node, rest, params) {
                return Some(m);
            }
            params.pop();
        }

        // Priority 3: wildcard swallows the rest
        if let Some(ref wildcard) = node.wildcard_child {
            params.push((wildcard.name.clone(), segments.join("/")));
            return Some(Match {
                route_id: wildcard.route_id,
                params: params.clone(),
            });
        }

        None
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
