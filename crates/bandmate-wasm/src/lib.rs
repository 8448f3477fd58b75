//! bandmate-wasm: the Bandmate router in the browser
//!
//! Plugs `localStorage` and `window.history` into `bandmate-core` and
//! exposes a router handle to JavaScript.

pub mod router;

#[cfg(feature = "wasm")]
pub mod history;
#[cfg(feature = "wasm")]
pub mod storage;
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use history::{BrowserHistory, PopState};
#[cfg(feature = "wasm")]
pub use storage::LocalStorageSession;
#[cfg(feature = "wasm")]
pub use wasm::*;

pub use router::{app_router, Location, ResolvedRoute, Router, RouterConfig, View};
