use std::time::Duration;

/// Featured listings fetched when no limit is given
pub const DEFAULT_FEATURED_LIMIT: u32 = 6;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Connection settings for the listings backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin (optionally with a path prefix) serving `/api/properties`
    pub base_url: String,
    /// Whole-request timeout enforced by the HTTP client
    pub timeout: Duration,
    pub user_agent: String,
    /// Raw `Cookie` header value identifying the session, e.g. `session=...`
    pub session_cookie: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            session_cookie: None,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
