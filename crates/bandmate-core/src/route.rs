//! Route records and resolved routes

use crate::location::{encode_segment, Params};
use crate::{Error, Result};
use bandmate_router::segments;

/// Per-route metadata read by guards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Only reachable with a session token present
    pub requires_auth: bool,
}

impl RouteMeta {
    /// Metadata for a route that needs a logged-in session
    pub fn protected() -> Self {
        Self {
            requires_auth: true,
        }
    }
}

/// A registered route: path pattern, unique name, target view
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord<V> {
    pub path: String,
    pub name: String,
    pub view: V,
    /// Forward captured params to the view as input properties
    pub props: bool,
    pub meta: RouteMeta,
}

impl<V> RouteRecord<V> {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
            props: false,
            meta: RouteMeta::default(),
        }
    }

    pub fn with_props(mut self) -> Self {
        self.props = true;
        self
    }

    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn requires_auth(self) -> Self {
        self.meta(RouteMeta::protected())
    }

    /// Names of the `:param` and `*wildcard` segments, in order
    pub fn param_names(&self) -> Vec<&str> {
        segments(&self.path)
            .into_iter()
            .filter_map(|seg| seg.strip_prefix(':').or_else(|| seg.strip_prefix('*')))
            .map(|name| if name.is_empty() { "*" } else { name })
            .collect()
    }

    /// Fill the pattern with concrete values
    pub fn build_path(&self, params: &[(String, String)]) -> Result<String> {
        let lookup = |name: &str| {
            params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| Error::MissingParam {
                    route: self.name.clone(),
                    param: name.to_string(),
                })
        };

        let mut path = String::new();
        for seg in segments(&self.path) {
            path.push('/');
            if let Some(name) = seg.strip_prefix(':') {
                path.push_str(&encode_segment(lookup(name)?));
            } else if let Some(name) = seg.strip_prefix('*') {
                let name = if name.is_empty() { "*" } else { name };
                let rest = lookup(name)?;
                path.push_str(
                    &rest
                        .split('/')
                        .map(encode_segment)
                        .collect::<Vec<_>>()
                        .join("/"),
                );
            } else {
                path.push_str(seg);
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

/// The outcome of matching a location against the route table
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute<V> {
    pub name: String,
    pub view: V,
    pub meta: RouteMeta,
    /// Concrete path (no query or hash)
    pub path: String,
    /// Path with query and hash
    pub full_path: String,
    /// Decoded params, in pattern order
    pub params: Params,
    pub query: Vec<(String, String)>,
    pub hash: Option<String>,
    pub(crate) props: bool,
}

impl<V> ResolvedRoute<V> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Inputs handed to the view. Empty unless the route forwards props.
    pub fn props(&self) -> &[(String, String)] {
        if self.props {
            &self.params
        } else {
            &[]
        }
    }

    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn requires_auth(&self) -> bool {
        self.meta.requires_auth
    }
}
