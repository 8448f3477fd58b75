//! Router configuration

/// Router configuration
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Storage key the session token lives under
    pub token_key: String,
    /// Name of the route unauthenticated users are sent to
    pub login_route: String,
    /// Max guard redirects followed by a single navigation
    pub max_redirects: usize,
    /// Path prefix the app is served under. Prepended by `href` and browser
    /// history; resolution works on paths without it.
    pub base: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            token_key: "token".to_string(),
            login_route: "Login".to_string(),
            max_redirects: 10,
            base: String::new(),
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    pub fn login_route(mut self, name: impl Into<String>) -> Self {
        self.login_route = name.into();
        self
    }

    pub fn max_redirects(mut self, limit: usize) -> Self {
        self.max_redirects = limit;
        self
    }

    /// Set the base path. A trailing slash is dropped so `"/app/"` and
    /// `"/app"` behave the same.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.base = base.trim_end_matches('/').to_string();
        self
    }
}
