//! Client configuration.

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "TODO_API_URL";

/// Local development API root.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the versioned API, including the `/api/v1` prefix.
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Read `TODO_API_URL`, falling back to the development default when the
    /// variable is unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(API_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }
}
