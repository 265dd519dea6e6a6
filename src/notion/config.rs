use super::error::{NotionError, Result};
use std::time::Duration;

pub const TOKEN_ENV: &str = "NOTION_TOKEN";
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";
pub const API_URL_ENV: &str = "NOTION_API_URL";
pub const NOTION_VERSION_ENV: &str = "NOTION_VERSION";

pub const DEFAULT_API_URL: &str = "https://api.notion.com";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub database_id: String,
    pub api_url: String,
    pub notion_version: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Both the token and the
    /// database id must be present and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let (token, database_id) = match (required(TOKEN_ENV), required(DATABASE_ID_ENV)) {
            (Some(token), Some(database_id)) => (token, database_id),
            _ => {
                return Err(NotionError::Config(format!(
                    "{TOKEN_ENV} and {DATABASE_ID_ENV} must be set in environment variables"
                )))
            }
        };

        let api_url = lookup(API_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let notion_version = lookup(NOTION_VERSION_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string());

        Ok(Self {
            token,
            database_id,
            api_url: api_url.trim_end_matches('/').to_string(),
            notion_version,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_notion_version(mut self, notion_version: impl Into<String>) -> Self {
        self.notion_version = notion_version.into();
        self
    }

    /// Apply command-line values on top of whatever the environment gave.
    pub fn with_overrides(self, api_url: Option<String>, notion_version: Option<String>) -> Self {
        let config = match api_url {
            Some(api_url) => self.with_api_url(api_url),
            None => self,
        };
        match notion_version {
            Some(notion_version) => config.with_notion_version(notion_version),
            None => config,
        }
    }
}

// Keep the token out of Debug output so it never reaches the logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("api_url", &self.api_url)
            .field("notion_version", &self.notion_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}
