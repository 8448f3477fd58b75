//! Error types for bandmate-core

use bandmate_router::InsertError;
use thiserror::Error;

/// Result type alias for routing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the client-side router
///
/// A missing session token is not an error: the auth guard answers it with
/// a redirect to the login route.
#[derive(Debug, Error)]
pub enum Error {
    /// No registered pattern matches the path
    #[error("Route not found: {path}")]
    RouteNotFound { path: String },

    /// Named navigation to a name that was never registered
    #[error("Unknown route name: {0}")]
    UnknownRouteName(String),

    /// Route names must be unique across the table
    #[error("Duplicate route name: {0}")]
    DuplicateRouteName(String),

    /// Malformed or overlapping path pattern
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Named navigation without a value for one of the pattern's params
    #[error("Missing param `{param}` for route {route}")]
    MissingParam { route: String, param: String },

    /// Guards kept redirecting
    #[error("Redirect loop while navigating to {path} (limit {limit})")]
    RedirectLoop { path: String, limit: usize },

    /// History backend refused an update
    #[error("History error: {0}")]
    History(String),

    /// Session storage backend failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<InsertError> for Error {
    fn from(err: InsertError) -> Self {
        Error::InvalidPath(err.to_string())
    }
}
