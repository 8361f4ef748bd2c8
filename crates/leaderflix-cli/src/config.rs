use std::time::Duration;

use thiserror::Error;

use leaderflix_core::{Session, UserId};

/// Client configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub user_id: Option<String>,
    pub token: Option<String>,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    /// LEADERFLIX_TIMEOUT_SECS defaults to 10.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("LEADERFLIX_API_URL")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("LEADERFLIX_API_URL"))?;

        let request_timeout = match lookup("LEADERFLIX_TIMEOUT_SECS") {
            Some(s) => s
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid(
                    "LEADERFLIX_TIMEOUT_SECS",
                    "must be a positive number of seconds",
                ))?,
            None => Duration::from_secs(10),
        };

        Ok(Config {
            api_url,
            user_id: lookup("LEADERFLIX_USER_ID").filter(|s| !s.is_empty()),
            token: lookup("LEADERFLIX_TOKEN").filter(|s| !s.is_empty()),
            request_timeout,
        })
    }

    /// The signed-in session, if both a user id and a token are configured.
    pub fn session(&self) -> Result<Option<Session>, ConfigError> {
        let (Some(user_id), Some(token)) = (&self.user_id, &self.token) else {
            return Ok(None);
        };

        let user_id = UserId::new(user_id.as_str())
            .map_err(|_| ConfigError::Invalid("LEADERFLIX_USER_ID", "must not be blank"))?;

        Ok(Some(Session::new(user_id, token.as_str())))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
