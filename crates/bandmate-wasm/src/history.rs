//! `window.history` backed history

use bandmate_core::{Error, History, MemoryHistory, Result};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;

/// Browser history with a base path
///
/// `history.go()` is asynchronous in browsers, so entries and the cursor
/// are mirrored in memory and the browser is kept in step with it. Every
/// entry written stores its mirror index as `history.state`, which is how
/// a `popstate` from the browser's own buttons is mapped back to a move.
///
/// Clones share state: the router owns one and the `popstate` listener
/// holds another.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug)]
struct Inner {
    base: String,
    mirror: MemoryHistory,
    /// `history.go` calls whose `popstate` has not arrived yet
    pending: usize,
    /// Replace issued while a move was pending, applied once it lands
    deferred: Option<String>,
}

/// What a `popstate` event means for the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopState {
    /// The browser finished a move this history started
    Settled,
    /// The user moved `delta` entries with the browser's buttons
    Moved(isize),
    /// An entry this history did not write (hash change, earlier page load)
    Untracked(String),
}

impl BrowserHistory {
    /// `base` is the prefix the app is served under, e.g. `"/app"`
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                base: base.into().trim_end_matches('/').to_string(),
                mirror: MemoryHistory::new(),
                pending: 0,
                deferred: None,
            })),
        }
    }

    /// The address bar's path, query and hash with the base removed
    pub fn browser_location(&self) -> Result<String> {
        let base = self.inner.borrow().base.clone();
        let location = window()?.location();

        let pathname = location.pathname().map_err(js_error)?;
        let search = location.search().map_err(js_error)?;
        let hash = location.hash().map_err(js_error)?;

        let path = pathname.strip_prefix(base.as_str()).unwrap_or(&pathname);
        let path = if path.is_empty() { "/" } else { path };
        Ok(format!("{}{}{}", path, search, hash))
    }

    /// Interpret a `popstate` event
    ///
    /// Must be called once for every `popstate`, before the router looks
    /// at history again.
    pub fn pop_state(&self) -> Result<PopState> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.pending > 0 {
                inner.pending -= 1;
                if inner.pending == 0 {
                    if let Some(path) = inner.deferred.take() {
                        inner.write(&path, false)?;
                    }
                }
                return Ok(PopState::Settled);
            }
        }

        let index = browser()?.state().map_err(js_error)?.as_f64();
        let position = self.inner.borrow().mirror.position();
        match index {
            Some(index) if index >= 0.0 && index as usize != position => {
                Ok(PopState::Moved(index as isize - position as isize))
            }
            _ => Ok(PopState::Untracked(self.browser_location()?)),
        }
    }
}

impl Inner {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Write the browser entry for the mirror's cursor, or the one after it
    fn write(&self, path: &str, push: bool) -> Result<()> {
        let index = match (push, self.mirror.is_empty()) {
            (true, false) => self.mirror.position() + 1,
            _ => self.mirror.position(),
        };
        let state = JsValue::from_f64(index as f64);
        let url = self.url(path);
        let history = browser()?;
        let written = if push {
            history.push_state_with_url(&state, "", Some(&url))
        } else {
            history.replace_state_with_url(&state, "", Some(&url))
        };
        written.map_err(js_error)
    }
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| Error::History("no window".to_string()))
}

fn browser() -> Result<web_sys::History> {
    window()?.history().map_err(js_error)
}

fn js_error(e: JsValue) -> Error {
    Error::History(format!("{:?}", e))
}

impl History for BrowserHistory {
    fn location(&self) -> Option<String> {
        self.inner.borrow().mirror.location()
    }

    fn push(&mut self, path: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.pending > 0 {
            log::debug!("push of {} while a history move is in flight", path);
        }
        inner.write(path, true)?;
        inner.mirror.push(path)
    }

    fn replace(&mut self, path: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.pending > 0 {
            // The browser is still on the old entry
            inner.deferred = Some(path.to_string());
        } else {
            inner.write(path, false)?;
        }
        inner.mirror.replace(path)
    }

    fn peek(&self, delta: isize) -> Option<String> {
        self.inner.borrow().mirror.peek(delta)
    }

    fn go(&mut self, delta: isize) -> Option<String> {
        let mut inner = self.inner.borrow_mut();
        let entry = inner.mirror.go(delta)?;
        inner.pending += 1;

        let moved = browser().and_then(|h| h.go_with_delta(delta as i32).map_err(js_error));
        if let Err(e) = moved {
            inner.pending -= 1;
            log::warn!("browser history out of step: {}", e);
        }
        Some(entry)
    }

    fn moved(&mut self, delta: isize) -> Option<String> {
        self.inner.borrow_mut().mirror.go(delta)
    }

    fn len(&self) -> usize {
        self.inner.borrow().mirror.len()
    }
}
