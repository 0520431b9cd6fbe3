// ABOUTME: Derived views over the lead collection: filtered list and stage statistics
// ABOUTME: Filters narrow in a fixed order and log each narrowing step

use leadstage_core::{Lead, Stage, StageGroup};
use leadstage_filters::{apply_filter, CompiledFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Which segment of leads the list view draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    /// Saved segments; nothing narrows on it yet
    Custom,
}

/// Every user-set narrowing applied to the list view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilters {
    pub search_query: String,
    pub campaign: Option<u64>,
    pub stages: Vec<Stage>,
    pub groups: Vec<StageGroup>,
    pub inline: Option<CompiledFilter>,
    pub scope: Scope,
}

impl LeadFilters {
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty()
            && self.campaign.is_none()
            && self.stages.is_empty()
            && self.groups.is_empty()
            && self.inline.as_ref().is_none_or(CompiledFilter::is_empty)
    }

    /// Add `stage` to the stage filter, or remove it when already present
    pub fn toggle_stage(&mut self, stage: Stage) {
        match self.stages.iter().position(|s| *s == stage) {
            Some(index) => {
                self.stages.remove(index);
            }
            None => self.stages.push(stage),
        }
    }

    /// Search, campaign, stage, group, then inline expression. Preserves input order.
    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        let mut result: Vec<&Lead> = leads.iter().collect();
        debug!("Filtering {} leads", result.len());

        if !self.search_query.is_empty() {
            let query = self.search_query.to_lowercase();
            let before = result.len();
            result.retain(|lead| matches_search(lead, &query));
            debug!("Search filter: {} -> {}", before, result.len());
        }

        if let Some(campaign) = self.campaign {
            let before = result.len();
            result.retain(|lead| lead.campaign_id == Some(campaign));
            debug!("Campaign filter: {} -> {}", before, result.len());
        }

        if !self.stages.is_empty() {
            let before = result.len();
            result.retain(|lead| self.stages.contains(&lead.stage()));
            debug!("Stage filter: {} -> {}", before, result.len());
        }

        if !self.groups.is_empty() {
            let before = result.len();
            result.retain(|lead| self.groups.contains(&lead.stage_group()));
            debug!("Stage group filter: {} -> {}", before, result.len());
        }

        if let Some(inline) = self.inline.as_ref().filter(|f| !f.is_empty()) {
            let before = result.len();
            result = apply_filter(result, inline);
            debug!("Inline filter: {} -> {}", before, result.len());
        }

        result
    }
}

fn matches_search(lead: &Lead, query: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(query);

    contains(&lead.name)
        || lead.headline.as_deref().is_some_and(contains)
        || lead.emails.iter().any(|email| contains(email))
        || lead.location.as_deref().is_some_and(contains)
}

/// Lead count per stage over `leads`, with every stage present
pub fn stage_stats(leads: &[Lead]) -> BTreeMap<Stage, usize> {
    let mut stats: BTreeMap<Stage, usize> = Stage::ALL.iter().map(|stage| (*stage, 0)).collect();
    for lead in leads {
        *stats.entry(lead.stage()).or_insert(0) += 1;
    }
    stats
}

/// Lead count per group over `leads`, with every group present
pub fn group_stats(leads: &[Lead]) -> BTreeMap<StageGroup, usize> {
    let mut stats: BTreeMap<StageGroup, usize> =
        StageGroup::ALL.iter().map(|group| (*group, 0)).collect();
    for lead in leads {
        *stats.entry(lead.stage_group()).or_insert(0) += 1;
    }
    stats
}
