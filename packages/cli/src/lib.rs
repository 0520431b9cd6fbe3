// ABOUTME: Shared helpers for the leadstage command-line front end
// ABOUTME: Argument parsing, logging setup, and text formatting used by the binary

pub mod format;

use leadstage_core::{ParseError, Stage, StageGroup};

/// Install the compact `RUST_LOG`-driven subscriber, `info` when unset
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

fn normalize(s: &str) -> String {
    s.trim().to_uppercase().replace(['-', ' '], "_")
}

/// Stage from a command-line value; accepts `not-interested`, `Not Interested`, or `NOT_INTERESTED`
pub fn parse_stage(s: &str) -> Result<Stage, ParseError> {
    normalize(s).parse()
}

/// Stage group from a command-line value; accepts `in-progress` or `IN_PROGRESS`
pub fn parse_group(s: &str) -> Result<StageGroup, ParseError> {
    normalize(s).parse()
}
