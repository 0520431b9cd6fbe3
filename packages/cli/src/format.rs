// ABOUTME: Text formatting for lead tables and detail views
// ABOUTME: Stage colours follow the group: new is blue, in progress yellow, closed dimmed

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use leadstage_core::{Stage, StageConfig, StageGroup};

pub const EMPTY: &str = "—";

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(dt) => dt.format("%-m/%-d/%Y").to_string(),
        None => EMPTY.to_string(),
    }
}

/// Whole days between `date` and `now` as "3d ago"
pub fn format_age(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match date {
        Some(dt) => match leadstage_core::whole_days_between(dt, now) {
            0 => "today".to_string(),
            days => format!("{}d ago", days),
        },
        None => EMPTY.to_string(),
    }
}

pub fn stage_label(stage: Stage) -> &'static str {
    StageConfig::for_stage(stage).label
}

pub fn colored_stage(stage: Stage) -> ColoredString {
    let label = stage_label(stage);
    match stage.group() {
        StageGroup::New => label.blue(),
        StageGroup::InProgress => label.yellow(),
        StageGroup::Closed => label.dimmed(),
    }
}

/// Fixed-width bar for a count out of `total`
pub fn bar(count: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return String::new();
    }
    let filled = (count * width + total / 2) / total;
    "█".repeat(filled.min(width))
}
