//! Router - Re-exports from bandmate-core
//!
//! The route table and guard logic live in `bandmate-core` so native
//! tests and the browser build share one implementation.

pub use bandmate_core::{app_router, Location, ResolvedRoute, Router, RouterConfig, View};
