//! Client-side router
//!
//! Resolves locations against the route table, runs the guard chain, and
//! commits allowed navigations to history.

use crate::config::RouterConfig;
use crate::guard::{GuardChain, GuardDecision, NavigationGuard, NavigationRequest};
use crate::history::{History, MemoryHistory};
use crate::location::{percent_decode, Location, Params, ParsedPath};
use crate::route::{ResolvedRoute, RouteRecord};
use crate::{Error, Result};
use bandmate_router::PathTrie;
use std::collections::HashMap;

/// Result of a committed navigation
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationResult<V> {
    /// Where the router ended up
    pub route: ResolvedRoute<V>,
    /// The originally requested route when a guard redirected
    pub redirected_from: Option<ResolvedRoute<V>>,
}

impl<V> NavigationResult<V> {
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Commit {
    Push,
    Replace,
    /// History already moved (back/forward)
    Pop,
}

/// Client-side router
pub struct Router<V> {
    records: Vec<RouteRecord<V>>,
    names: HashMap<String, usize>,
    trie: PathTrie,
    guards: GuardChain<V>,
    history: Box<dyn History>,
    current: Option<ResolvedRoute<V>>,
    config: RouterConfig,
}

impl<V: Clone> Router<V> {
    /// Create a router with an in-memory history
    pub fn new(config: RouterConfig) -> Self {
        Self {
            records: Vec::new(),
            names: HashMap::new(),
            trie: PathTrie::new(),
            guards: GuardChain::new(),
            history: Box::new(MemoryHistory::new()),
            current: None,
            config,
        }
    }

    /// Swap the history backend
    pub fn with_history<H: History + 'static>(mut self, history: H) -> Self {
        self.history = Box::new(history);
        self
    }

    /// Register a route
    ///
    /// # Errors
    /// `DuplicateRouteName` if the name is taken, `InvalidPath` if the
    /// pattern is malformed or overlaps an existing one.
    pub fn add_route(&mut self, record: RouteRecord<V>) -> Result<()> {
        if self.names.contains_key(&record.name) {
            return Err(Error::DuplicateRouteName(record.name));
        }

        let id = self.records.len();
        self.trie.insert(&record.path, id as u32)?;
        self.names.insert(record.name.clone(), id);
        log::debug!("registered route {} at {}", record.name, record.path);
        self.records.push(record);
        Ok(())
    }

    /// Add a guard; guards run in registration order
    pub fn add_guard<G: NavigationGuard<V> + 'static>(&mut self, guard: G) {
        self.guards.add(guard);
    }

    /// Add a closure as a before-guard
    pub fn before_each<F>(&mut self, f: F)
    where
        F: Fn(&NavigationRequest<'_, V>) -> GuardDecision + 'static,
    {
        self.guards.add_fn(f);
    }

    /// Match a URL (`path?query#hash`) against the route table
    pub fn resolve(&self, url: &str) -> Result<ResolvedRoute<V>> {
        let parsed = ParsedPath::parse(url);
        let matched = self.trie.find(&parsed.path).ok_or_else(|| Error::RouteNotFound {
            path: parsed.path.clone(),
        })?;

        let record = &self.records[matched.route_id as usize];
        let params: Params = matched
            .params
            .into_iter()
            .map(|(k, v)| (k, percent_decode(&v)))
            .collect();

        log::debug!("resolved {} to {}", url, record.name);
        Ok(self.build_resolved(record, parsed, params))
    }

    /// Build and match the path of a named route
    pub fn resolve_named(&self, name: &str, params: &[(String, String)]) -> Result<ResolvedRoute<V>> {
        let record = self.record(name)?;
        let path = record.build_path(params)?;
        let parsed = ParsedPath::parse(&path);

        let params = record
            .param_names()
            .into_iter()
            .filter_map(|key| {
                params
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(k, v)| (k.clone(), v.clone()))
            })
            .collect();

        Ok(self.build_resolved(record, parsed, params))
    }

    /// Resolve either kind of [`Location`]
    pub fn resolve_location(&self, location: &Location) -> Result<ResolvedRoute<V>> {
        match location {
            Location::Path(url) => self.resolve(url),
            Location::Named { name, params } => self.resolve_named(name, params),
        }
    }

    /// Link target for a named route, including the configured base
    pub fn href(&self, name: &str, params: &[(String, String)]) -> Result<String> {
        let path = self.record(name)?.build_path(params)?;
        Ok(format!("{}{}", self.config.base, path))
    }

    /// Run the guard chain for a navigation without committing it
    pub fn navigate(&self, req: &NavigationRequest<'_, V>) -> GuardDecision {
        self.guards.run_before(req)
    }

    /// Navigate to a location and add a history entry
    pub fn push(&mut self, location: impl Into<Location>) -> Result<NavigationResult<V>> {
        let plan = self.plan(&location.into())?;
        self.commit(plan, Commit::Push)
    }

    /// Navigate to a location, overwriting the current history entry
    pub fn replace(&mut self, location: impl Into<Location>) -> Result<NavigationResult<V>> {
        let plan = self.plan(&location.into())?;
        self.commit(plan, Commit::Replace)
    }

    /// Move through history. `Ok(None)` when there is no entry that far.
    ///
    /// The destination is resolved and guarded before the cursor moves, so
    /// a failed navigation leaves history and the current route untouched.
    pub fn go(&mut self, delta: isize) -> Result<Option<NavigationResult<V>>> {
        let Some(path) = self.history.peek(delta) else {
            return Ok(None);
        };
        let plan = self.plan(&Location::Path(path))?;
        if self.history.go(delta).is_none() {
            return Ok(None);
        }
        self.commit(plan, Commit::Pop).map(Some)
    }

    pub fn back(&mut self) -> Result<Option<NavigationResult<V>>> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Result<Option<NavigationResult<V>>> {
        self.go(1)
    }

    /// The host moved history by `delta` on its own (browser back/forward
    /// buttons). Guards run on the new entry; a redirect replaces it and a
    /// failure moves the host back to where it was.
    pub fn popped(&mut self, delta: isize) -> Result<Option<NavigationResult<V>>> {
        let Some(path) = self.history.moved(delta) else {
            return Ok(None);
        };
        match self.plan(&Location::Path(path)) {
            Ok(plan) => self.commit(plan, Commit::Pop).map(Some),
            Err(e) => {
                log::warn!("reverting history move of {}: {}", delta, e);
                self.history.go(-delta);
                Err(e)
            }
        }
    }

    /// The route of the last committed navigation
    pub fn current(&self) -> Option<&ResolvedRoute<V>> {
        self.current.as_ref()
    }

    pub fn routes(&self) -> &[RouteRecord<V>] {
        &self.records
    }

    pub fn has_route(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    fn record(&self, name: &str) -> Result<&RouteRecord<V>> {
        self.names
            .get(name)
            .map(|&id| &self.records[id])
            .ok_or_else(|| Error::UnknownRouteName(name.to_string()))
    }

    fn build_resolved(
        &self,
        record: &RouteRecord<V>,
        parsed: ParsedPath,
        params: Params,
    ) -> ResolvedRoute<V> {
        let full_path = parsed.full_path();
        ResolvedRoute {
            name: record.name.clone(),
            view: record.view.clone(),
            meta: record.meta,
            path: parsed.path,
            full_path,
            params,
            query: parsed.query,
            hash: parsed.hash,
            props: record.props,
        }
    }

    /// Resolve and guard a location, following redirects. No side effects.
    fn plan(&self, location: &Location) -> Result<NavigationResult<V>> {
        let requested = self.resolve_location(location)?;
        let mut target = requested.clone();
        let mut redirects = 0;

        loop {
            let decision = self.navigate(&NavigationRequest::new(&target, self.current.as_ref()));
            let next = match decision {
                GuardDecision::Allow => break,
                GuardDecision::Redirect(next) => next,
            };

            redirects += 1;
            if redirects > self.config.max_redirects {
                return Err(Error::RedirectLoop {
                    path: requested.full_path,
                    limit: self.config.max_redirects,
                });
            }
            log::warn!("navigation to {} redirected to {}", target.full_path, next);
            target = self.resolve_location(&next)?;
        }

        Ok(NavigationResult {
            route: target,
            redirected_from: (redirects > 0).then_some(requested),
        })
    }

    fn commit(&mut self, plan: NavigationResult<V>, commit: Commit) -> Result<NavigationResult<V>> {
        let target = &plan.route;
        match commit {
            Commit::Push => {
                let duplicate = self
                    .current
                    .as_ref()
                    .is_some_and(|cur| cur.full_path == target.full_path);
                if duplicate {
                    log::debug!("already at {}, history unchanged", target.full_path);
                } else {
                    self.history.push(&target.full_path)?;
                }
            }
            Commit::Replace => self.history.replace(&target.full_path)?,
            Commit::Pop if plan.was_redirected() => self.history.replace(&target.full_path)?,
            Commit::Pop => {}
        }

        let from = self.current.replace(target.clone());
        self.guards
            .run_after(&NavigationRequest::new(target, from.as_ref()));
        Ok(plan)
    }
}
