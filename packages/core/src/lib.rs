// ABOUTME: Core types, taxonomy tables, and utilities for Leadstage
// ABOUTME: Foundational package providing the lead model shared across all Leadstage packages

pub mod constants;
pub mod lead;
pub mod taxonomy;
pub mod types;
pub mod utils;

// Re-export main types
pub use lead::{Lead, StageHistoryEntry};
pub use types::{EmailStatus, Intent, ParseError, Signal, Stage, StageGroup, StageSource};

// Re-export taxonomy lookups
pub use taxonomy::{
    reason_templates, signal_intent, stage_to_group, AssignmentEligibility, AssignmentStrictness,
    GroupConfig, IntentConfig, StageConfig, SIGNAL_INTENTS,
};

// Re-export constants
pub use constants::{
    DEFAULT_FETCH_DELAY_MS, DEFAULT_NO_REPLY_DAYS, ENV_FETCH_DELAY_MS, ENV_LEADS_FILE,
    ENV_NO_REPLY_DAYS,
};

// Re-export utilities
pub use utils::{parse_timestamp, whole_days_between};
