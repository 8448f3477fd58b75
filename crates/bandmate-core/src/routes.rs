//! The Bandmate route table

use crate::config::RouterConfig;
use crate::guard::{AuthGuard, NavigationLog};
use crate::route::RouteRecord;
use crate::router::Router;
use crate::session::SessionProvider;
use crate::{Error, Result};
use std::fmt;

/// Views the front-end can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    LoginForm,
    UserList,
    MusicianProfile,
    VenueProfile,
    ConversationList,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::LoginForm => "LoginForm",
            View::UserList => "UserList",
            View::MusicianProfile => "MusicianProfile",
            View::VenueProfile => "VenueProfile",
            View::ConversationList => "ConversationList",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every route the app registers. There is no catch-all entry.
pub fn app_routes() -> Vec<RouteRecord<View>> {
    vec![
        RouteRecord::new("/", "Login", View::LoginForm),
        RouteRecord::new("/users", "UserList", View::UserList).requires_auth(),
        RouteRecord::new("/musician/:userId", "MusicianProfile", View::MusicianProfile)
            .with_props()
            .requires_auth(),
        RouteRecord::new("/venue/:userId", "VenueProfile", View::VenueProfile)
            .with_props()
            .requires_auth(),
        RouteRecord::new("/conversations", "ConversationList", View::ConversationList)
            .requires_auth(),
    ]
}

/// Build the app router: route table, auth guard and navigation log
///
/// # Errors
/// `UnknownRouteName` when `config.login_route` is not in the table.
pub fn app_router<S>(config: RouterConfig, session: S) -> Result<Router<View>>
where
    S: SessionProvider + 'static,
{
    let login_route = config.login_route.clone();
    let mut router = Router::new(config);

    for record in app_routes() {
        router.add_route(record)?;
    }
    if !router.has_route(&login_route) {
        return Err(Error::UnknownRouteName(login_route));
    }

    router.add_guard(AuthGuard::new(session, login_route));
    router.add_guard(NavigationLog);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::session::MemorySession;
    use std::collections::HashSet;

    const PROTECTED: &[&str] = &["/users", "/musician/42", "/venue/42", "/conversations"];

    #[test]
    fn test_route_table() {
        let table: Vec<(String, String, bool)> = app_routes()
            .into_iter()
            .map(|r| (r.path, r.name, r.meta.requires_auth))
            .collect();

        assert_eq!(
            table,
            vec![
                ("/".to_string(), "Login".to_string(), false),
                ("/users".to_string(), "UserList".to_string(), true),
                ("/musician/:userId".to_string(), "MusicianProfile".to_string(), true),
                ("/venue/:userId".to_string(), "VenueProfile".to_string(), true),
                ("/conversations".to_string(), "ConversationList".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_route_names_unique() {
        let routes = app_routes();
        let names: HashSet<&str> = routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), routes.len());
    }

    #[test]
    fn test_protected_routes_redirect_without_token() {
        for path in PROTECTED {
            let mut router = app_router(RouterConfig::default(), MemorySession::new()).unwrap();
            let nav = router.push(*path).unwrap();
            assert_eq!(nav.route.name, "Login", "{} should redirect", path);
            assert_eq!(nav.route.view, View::LoginForm);
            assert!(nav.was_redirected());
        }
    }

    #[test]
    fn test_protected_routes_allowed_with_token() {
        let session = MemorySession::with_token("abc123");
        let mut router = app_router(RouterConfig::default(), session).unwrap();

        for path in PROTECTED {
            let nav = router.push(*path).unwrap();
            assert_eq!(nav.route.path, *path);
            assert!(!nav.was_redirected());
        }
    }

    #[test]
    fn test_login_always_reachable() {
        for session in [MemorySession::new(), MemorySession::with_token("t")] {
            let mut router = app_router(RouterConfig::default(), session).unwrap();
            let nav = router.push("/").unwrap();
            assert_eq!(nav.route.name, "Login");
            assert!(!nav.was_redirected());
        }
    }

    #[test]
    fn test_user_id_forwarded_as_prop() {
        let router = app_router(RouterConfig::default(), MemorySession::new()).unwrap();

        let r = router.resolve("/musician/42").unwrap();
        assert_eq!(r.view, View::MusicianProfile);
        assert_eq!(r.props(), &[("userId".to_string(), "42".to_string())]);

        let r = router.resolve("/venue/abc-7").unwrap();
        assert_eq!(r.view, View::VenueProfile);
        assert_eq!(r.prop("userId"), Some("abc-7"));

        assert!(router.resolve("/users").unwrap().props().is_empty());
    }

    #[test]
    fn test_no_catch_all_route() {
        let mut router = app_router(RouterConfig::default(), MemorySession::new()).unwrap();
        assert!(matches!(router.push("/404"), Err(Error::RouteNotFound { .. })));
        assert!(matches!(router.resolve("/musician"), Err(Error::RouteNotFound { .. })));
    }

    #[test]
    fn test_login_then_logout() {
        let session = MemorySession::new();
        let mut router = app_router(RouterConfig::default(), session.clone()).unwrap();

        assert_eq!(router.push("/conversations").unwrap().route.name, "Login");

        session.set_token("issued-by-login");
        let nav = router
            .push(Location::named("VenueProfile").param("userId", "5"))
            .unwrap();
        assert_eq!(nav.route.path, "/venue/5");

        session.clear();
        assert_eq!(router.push("/users").unwrap().route.name, "Login");
    }

    #[test]
    fn test_unknown_login_route() {
        let config = RouterConfig::default().login_route("SignIn");
        assert!(matches!(
            app_router(config, MemorySession::new()),
            Err(Error::UnknownRouteName(ref n)) if n == "SignIn"
        ));
    }

    #[test]
    fn test_view_names() {
        assert_eq!(View::MusicianProfile.to_string(), "MusicianProfile");
        assert_eq!(View::LoginForm.as_str(), "LoginForm");
    }
}
