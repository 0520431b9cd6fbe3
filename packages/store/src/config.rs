// ABOUTME: Environment-driven configuration for the lead store
// ABOUTME: Picks the lead source and classifier window from LEADSTAGE_* variables

use leadstage_core::{
    DEFAULT_FETCH_DELAY_MS, DEFAULT_NO_REPLY_DAYS, ENV_FETCH_DELAY_MS, ENV_LEADS_FILE,
    ENV_NO_REPLY_DAYS,
};
use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid fetch delay: {0}")]
    InvalidFetchDelay(ParseIntError),
    #[error("Invalid no-reply window: {0}")]
    InvalidNoReplyDays(ParseIntError),
    #[error("No-reply window must be at least one day, got {0}")]
    NoReplyDaysOutOfRange(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub fetch_delay_ms: u64,
    pub leads_file: Option<PathBuf>,
    pub no_reply_days: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: DEFAULT_FETCH_DELAY_MS,
            leads_file: None,
            no_reply_days: DEFAULT_NO_REPLY_DAYS,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] but reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch_delay_ms = match lookup(ENV_FETCH_DELAY_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(ConfigError::InvalidFetchDelay)?,
            None => DEFAULT_FETCH_DELAY_MS,
        };

        let leads_file = lookup(ENV_LEADS_FILE)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let no_reply_days = match lookup(ENV_NO_REPLY_DAYS) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(ConfigError::InvalidNoReplyDays)?,
            None => DEFAULT_NO_REPLY_DAYS,
        };
        if no_reply_days < 1 {
            return Err(ConfigError::NoReplyDaysOutOfRange(no_reply_days));
        }

        Ok(StoreConfig {
            fetch_delay_ms,
            leads_file,
            no_reply_days,
        })
    }
}
