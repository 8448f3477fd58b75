//! bandmate-core: client-side routing for the Bandmate front-end
//!
//! Maps URL paths to views, runs navigation guards before a navigation is
//! committed, and records committed locations in a history. Platform
//! specifics (browser storage, `window.history`) live in `bandmate-wasm`
//! behind the [`SessionProvider`] and [`History`] traits.
//!
//! ## Example
//! ```
//! use bandmate_core::{app_router, MemorySession, RouterConfig, View};
//!
//! let session = MemorySession::new();
//! let mut router = app_router(RouterConfig::default(), session.clone()).unwrap();
//!
//! // No token yet: protected routes bounce to the login view.
//! let nav = router.push("/users").unwrap();
//! assert_eq!(nav.route.name, "Login");
//!
//! session.set_token("abc123");
//! let nav = router.push("/musician/42").unwrap();
//! assert_eq!(nav.route.view, View::MusicianProfile);
//! assert_eq!(nav.route.prop("userId"), Some("42"));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod guard;
pub mod history;
pub mod location;
pub mod route;
pub mod router;
pub mod routes;
pub mod session;

// Re-exports
pub use config::RouterConfig;
pub use error::{Error, Result};
pub use guard::{
    AuthGuard, FnGuard, GuardChain, GuardDecision, NavigationGuard, NavigationLog,
    NavigationRequest,
};
pub use history::{History, MemoryHistory};
pub use location::{Location, Params, ParsedPath};
pub use route::{ResolvedRoute, RouteMeta, RouteRecord};
pub use router::{NavigationResult, Router};
pub use routes::{app_router, app_routes, View};
pub use session::{MemorySession, SessionProvider};
