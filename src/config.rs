//! Client configuration read from the process environment.

use std::collections::HashMap;

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable overriding the service base URL
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Environment variable holding the optional organization id
pub const ORGANIZATION_VAR: &str = "OPENAI_ORG_ID";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 600;

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables, used when the process environment must not leak in
impl EnvProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Settings for the chat-completion client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Bearer credential; absence is only reported when a request is attempted
    pub api_key: Option<String>,
    pub base_url: String,
    pub organization: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            organization: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: format!("gpt-reviewer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Build the configuration from environment variables, blank values count as unset
    pub fn from_env(env: &dyn EnvProvider) -> Self {
        let lookup = |key: &str| env.get(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        config.api_key = lookup(API_KEY_VAR);
        config.organization = lookup(ORGANIZATION_VAR);
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        config
    }

    /// Full URL of the chat-completion endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
