/// Environment variable holding the simulated fetch delay in milliseconds
pub const ENV_FETCH_DELAY_MS: &str = "LEADSTAGE_FETCH_DELAY_MS";

/// Environment variable pointing at a JSON file of leads to load instead of the seed set
pub const ENV_LEADS_FILE: &str = "LEADSTAGE_LEADS_FILE";

/// Environment variable holding the silence window (days) after which a no-reply signal fires
pub const ENV_NO_REPLY_DAYS: &str = "LEADSTAGE_NO_REPLY_DAYS";

/// Default simulated latency of the seed loader
pub const DEFAULT_FETCH_DELAY_MS: u64 = 100;

/// Default silence window for the no-reply signal
pub const DEFAULT_NO_REPLY_DAYS: i64 = 7;
