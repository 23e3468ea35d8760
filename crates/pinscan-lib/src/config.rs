use std::env;

/// Default base URL of the Github REST API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Runtime settings loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Github API token for authenticated requests
    pub github_token: Option<String>,
    /// Base URL of the Github API, overridable for Github Enterprise
    pub api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            github_token: non_empty("GITHUB_TOKEN"),
            api_base: non_empty("PINSCAN_GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }
}
