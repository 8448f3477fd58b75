//! WASM bindings for JavaScript interop

use crate::history::{BrowserHistory, PopState};
use crate::storage::LocalStorageSession;
use bandmate_core::{app_router, NavigationResult, ResolvedRoute, Router, RouterConfig, View};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// ============================================================================
// Router
// ============================================================================

/// WASM-exposed router over the app's route table
///
/// Listens for `popstate`, so the browser's back and forward buttons go
/// through the same guards as `back()` and `forward()`.
#[wasm_bindgen]
pub struct WasmRouter {
    router: Rc<RefCell<Router<View>>>,
    history: BrowserHistory,
    listener: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl WasmRouter {
    /// Build the router against `localStorage` and `window.history`
    #[wasm_bindgen(constructor)]
    pub fn new(base: Option<String>) -> Result<WasmRouter, JsError> {
        console_error_panic_hook::set_once();

        let config = RouterConfig::default().base(base.unwrap_or_default());
        let session = LocalStorageSession::new(config.token_key.clone());
        let history = BrowserHistory::new(config.base.clone());
        let router = app_router(config, session)?.with_history(history.clone());
        let router = Rc::new(RefCell::new(router));

        let listener = {
            let router = Rc::clone(&router);
            let history = history.clone();
            Closure::<dyn FnMut()>::new(move || {
                if let Err(e) = follow_pop(&router, &history) {
                    log::warn!("popstate navigation failed: {}", e);
                }
            })
        };
        web_sys::window()
            .ok_or_else(|| JsError::new("no window"))?
            .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            .map_err(|e| JsError::new(&format!("{:?}", e)))?;

        Ok(Self {
            router,
            history,
            listener,
        })
    }

    /// Navigate to whatever the address bar shows, replacing the entry
    pub fn start(&mut self) -> Result<WasmRoute, JsError> {
        let current = self.history.browser_location()?;
        let nav = self.router.borrow_mut().replace(current)?;
        Ok(WasmRoute::from_navigation(nav))
    }

    /// Match a path without navigating
    pub fn resolve(&self, path: &str) -> Result<WasmRoute, JsError> {
        let route = self.router.borrow().resolve(path)?;
        Ok(WasmRoute::from_route(route, None))
    }

    pub fn push(&mut self, path: &str) -> Result<WasmRoute, JsError> {
        let nav = self.router.borrow_mut().push(path)?;
        Ok(WasmRoute::from_navigation(nav))
    }

    pub fn replace(&mut self, path: &str) -> Result<WasmRoute, JsError> {
        let nav = self.router.borrow_mut().replace(path)?;
        Ok(WasmRoute::from_navigation(nav))
    }

    /// Returns `undefined` when there is nothing to go back to
    pub fn back(&mut self) -> Result<Option<WasmRoute>, JsError> {
        let nav = self.router.borrow_mut().back()?;
        Ok(nav.map(WasmRoute::from_navigation))
    }

    pub fn forward(&mut self) -> Result<Option<WasmRoute>, JsError> {
        let nav = self.router.borrow_mut().forward()?;
        Ok(nav.map(WasmRoute::from_navigation))
    }

    /// Link target for a named route; `user_id` fills `:userId`
    pub fn href(&self, name: &str, user_id: Option<String>) -> Result<String, JsError> {
        let params: Vec<(String, String)> = user_id
            .map(|id| vec![("userId".to_string(), id)])
            .unwrap_or_default();
        Ok(self.router.borrow().href(name, &params)?)
    }

    #[wasm_bindgen(getter)]
    pub fn current_name(&self) -> Option<String> {
        self.router.borrow().current().map(|r| r.name.clone())
    }
}

impl Drop for WasmRouter {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let removed = window
                .remove_event_listener_with_callback("popstate", self.listener.as_ref().unchecked_ref());
            if removed.is_err() {
                log::warn!("could not remove popstate listener");
            }
        }
    }
}

/// Bring the router in line with a `popstate` event
fn follow_pop(
    router: &RefCell<Router<View>>,
    history: &BrowserHistory,
) -> bandmate_core::Result<Option<NavigationResult<View>>> {
    match history.pop_state()? {
        PopState::Settled => Ok(None),
        PopState::Moved(delta) => {
            let mut router = router.borrow_mut();
            match router.popped(delta)? {
                Some(nav) => Ok(Some(nav)),
                // Entry from before this router existed
                None => router.replace(history.browser_location()?).map(Some),
            }
        }
        PopState::Untracked(path) => router.borrow_mut().replace(path).map(Some),
    }
}

/// Route info handed to JavaScript
#[wasm_bindgen]
pub struct WasmRoute {
    name: String,
    view: String,
    path: String,
    full_path: String,
    pub requires_auth: bool,
    redirected_from: Option<String>,
    /// Flattened `[key, value, key, value, ...]`
    props: Vec<String>,
}

impl WasmRoute {
    fn from_route(route: ResolvedRoute<View>, redirected_from: Option<String>) -> Self {
        let props = route
            .props()
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect();
        Self {
            view: route.view.as_str().to_string(),
            requires_auth: route.requires_auth(),
            name: route.name,
            path: route.path,
            full_path: route.full_path,
            redirected_from,
            props,
        }
    }

    fn from_navigation(nav: NavigationResult<View>) -> Self {
        let redirected_from = nav.redirected_from.map(|r| r.full_path);
        Self::from_route(nav.route, redirected_from)
    }
}

#[wasm_bindgen]
impl WasmRoute {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn view(&self) -> String {
        self.view.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn path(&self) -> String {
        self.path.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn full_path(&self) -> String {
        self.full_path.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn redirected_from(&self) -> Option<String> {
        self.redirected_from.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn props(&self) -> Vec<String> {
        self.props.clone()
    }
}
