//! Navigation guards
//!
//! Guards run before a navigation is committed and may redirect it. After
//! a navigation commits, the same guards get an `after` callback in
//! reverse order.

use crate::location::Location;
use crate::route::ResolvedRoute;
use crate::session::SessionProvider;

/// A navigation about to happen
#[derive(Debug)]
pub struct NavigationRequest<'a, V> {
    pub to: &'a ResolvedRoute<V>,
    /// `None` on the very first navigation
    pub from: Option<&'a ResolvedRoute<V>>,
}

impl<'a, V> NavigationRequest<'a, V> {
    pub fn new(to: &'a ResolvedRoute<V>, from: Option<&'a ResolvedRoute<V>>) -> Self {
        Self { to, from }
    }
}

/// What a guard wants done with a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Location),
}

impl GuardDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Guard trait - inspect a navigation before and after it commits
pub trait NavigationGuard<V> {
    /// Decide whether the navigation proceeds
    fn before(&self, req: &NavigationRequest<'_, V>) -> GuardDecision;

    /// Observe a committed navigation
    fn after(&self, _req: &NavigationRequest<'_, V>) {}
}

/// Guard chain
pub struct GuardChain<V> {
    guards: Vec<Box<dyn NavigationGuard<V>>>,
}

impl<V> GuardChain<V> {
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    pub fn add<G: NavigationGuard<V> + 'static>(&mut self, guard: G) {
        self.guards.push(Box::new(guard));
    }

    /// Add a closure as a before-guard
    pub fn add_fn<F>(&mut self, f: F)
    where
        F: Fn(&NavigationRequest<'_, V>) -> GuardDecision + 'static,
    {
        self.add(FnGuard(f));
    }

    /// Run guards in registration order; the first redirect wins
    pub fn run_before(&self, req: &NavigationRequest<'_, V>) -> GuardDecision {
        for g in &self.guards {
            let decision = g.before(req);
            if !decision.is_allow() {
                return decision;
            }
        }
        GuardDecision::Allow
    }

    /// Run after hooks in reverse order
    pub fn run_after(&self, req: &NavigationRequest<'_, V>) {
        for g in self.guards.iter().rev() {
            g.after(req);
        }
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl<V> Default for GuardChain<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Redirects to the login route when a protected route is requested
/// without a session token
pub struct AuthGuard<S> {
    session: S,
    login_route: String,
}

impl<S: SessionProvider> AuthGuard<S> {
    pub fn new(session: S, login_route: impl Into<String>) -> Self {
        Self {
            session,
            login_route: login_route.into(),
        }
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }
}

impl<V, S: SessionProvider> NavigationGuard<V> for AuthGuard<S> {
    fn before(&self, req: &NavigationRequest<'_, V>) -> GuardDecision {
        if req.to.meta.requires_auth && !self.session.has_valid_token() {
            GuardDecision::Redirect(Location::named(self.login_route.clone()))
        } else {
            GuardDecision::Allow
        }
    }
}

/// Guard built from a closure
pub struct FnGuard<F>(pub F);

impl<V, F> NavigationGuard<V> for FnGuard<F>
where
    F: Fn(&NavigationRequest<'_, V>) -> GuardDecision,
{
    fn before(&self, req: &NavigationRequest<'_, V>) -> GuardDecision {
        (self.0)(req)
    }
}

/// Logs every committed navigation
#[derive(Debug, Default, Clone, Copy)]
pub struct NavigationLog;

impl<V> NavigationGuard<V> for NavigationLog {
    fn before(&self, _req: &NavigationRequest<'_, V>) -> GuardDecision {
        GuardDecision::Allow
    }

    fn after(&self, req: &NavigationRequest<'_, V>) {
        let from = req.from.map(|r| r.full_path.as_str()).unwrap_or("-");
        log::info!("navigated {} -> {} ({})", from, req.to.full_path, req.to.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Params;
    use crate::route::RouteMeta;
    use crate::session::MemorySession;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn route(name: &str, path: &str, requires_auth: bool) -> ResolvedRoute<()> {
        ResolvedRoute {
            name: name.to_string(),
            view: (),
            meta: RouteMeta { requires_auth },
            path: path.to_string(),
            full_path: path.to_string(),
            params: Params::new(),
            query: Vec::new(),
            hash: None,
            props: false,
        }
    }

    #[test]
    fn test_auth_guard_redirects_without_token() {
        let guard = AuthGuard::new(MemorySession::new(), "Login");
        let to = route("UserList", "/users", true);

        assert_eq!(
            NavigationGuard::<()>::before(&guard, &NavigationRequest::new(&to, None)),
            GuardDecision::Redirect(Location::named("Login"))
        );
    }

    #[test]
    fn test_auth_guard_allows_with_token() {
        let guard = AuthGuard::new(MemorySession::with_token("abc"), "Login");
        let to = route("UserList", "/users", true);

        assert!(NavigationGuard::<()>::before(&guard, &NavigationRequest::new(&to, None)).is_allow());
    }

    #[test]
    fn test_auth_guard_ignores_public_routes() {
        let guard = AuthGuard::new(MemorySession::new(), "Login");
        let to = route("Login", "/", false);

        assert!(NavigationGuard::<()>::before(&guard, &NavigationRequest::new(&to, None)).is_allow());
    }

    #[test]
    fn test_auth_guard_treats_empty_token_as_absent() {
        let guard = AuthGuard::new(MemorySession::with_token(""), "Login");
        let to = route("ConversationList", "/conversations", true);

        assert!(!NavigationGuard::<()>::before(&guard, &NavigationRequest::new(&to, None)).is_allow());
    }

    #[test]
    fn test_chain_first_redirect_wins() {
        let mut chain: GuardChain<()> = GuardChain::new();
        chain.add_fn(|_| GuardDecision::Allow);
        chain.add_fn(|_| GuardDecision::Redirect(Location::from("/first")));
        chain.add_fn(|_| GuardDecision::Redirect(Location::from("/second")));

        let to = route("UserList", "/users", false);
        assert_eq!(
            chain.run_before(&NavigationRequest::new(&to, None)),
            GuardDecision::Redirect(Location::from("/first"))
        );
        assert_eq!(chain.len(), 3);
    }

    struct Recorder {
        id: u8,
        seen: Rc<RefCell<Vec<u8>>>,
    }

    impl NavigationGuard<()> for Recorder {
        fn before(&self, _req: &NavigationRequest<'_, ()>) -> GuardDecision {
            GuardDecision::Allow
        }

        fn after(&self, _req: &NavigationRequest<'_, ()>) {
            self.seen.borrow_mut().push(self.id);
        }
    }

    #[test]
    fn test_after_runs_in_reverse() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut chain: GuardChain<()> = GuardChain::new();
        chain.add(Recorder { id: 1, seen: seen.clone() });
        chain.add(Recorder { id: 2, seen: seen.clone() });
        chain.add(NavigationLog);

        let to = route("Login", "/", false);
        chain.run_after(&NavigationRequest::new(&to, None));
        assert_eq!(*seen.borrow(), vec![2, 1]);
    }

    #[test]
    fn test_empty_chain_allows() {
        let chain: GuardChain<()> = GuardChain::default();
        let to = route("UserList", "/users", true);
        assert!(chain.is_empty());
        assert!(chain.run_before(&NavigationRequest::new(&to, None)).is_allow());
    }
}
