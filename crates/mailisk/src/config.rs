//! Credential loading for the Mailisk API
//!
//! Credentials are resolved from (in order of priority):
//! 1. Explicit values passed to the constructors
//! 2. Runtime environment variables (`MAILISK_API_KEY`, `MAILISK_API_URL`)

use crate::error::{Error, Result};

/// Default base URL of the Mailisk API
pub const DEFAULT_API_URL: &str = "https://api.mailisk.com/";

/// API credentials and endpoint configuration
#[derive(Debug, Clone)]
pub struct MailiskCredentials {
    pub api_key: String,
    pub api_url: String,
}

impl MailiskCredentials {
    /// Create credentials for the production Mailisk API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Create credentials pointing at a custom API URL
    ///
    /// # Arguments
    /// * `api_key` - The namespace API key
    /// * `api_url` - Base URL of the API, e.g. `https://api.mailisk.com/`
    pub fn with_api_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
        }
    }

    /// Load credentials from environment variables
    ///
    /// `MAILISK_API_KEY` is required; `MAILISK_API_URL` falls back to the
    /// production endpoint when unset.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("MAILISK_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;

        let api_url = std::env::var("MAILISK_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self { api_key, api_url })
    }
}
