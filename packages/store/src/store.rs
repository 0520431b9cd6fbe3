// ABOUTME: Lead store facade owning the collection, filter state, and change notifications
// ABOUTME: Reads share one RwLock snapshot; stage updates and reloads take the write lock

use crate::config::{ConfigError, StoreConfig};
use crate::seed::example_leads;
use crate::source::{JsonFileSource, LeadSource, SeedSource};
use crate::views::{group_stats, stage_stats, LeadFilters, Scope};
use chrono::Utc;
use leadstage_classifier::{ActivitySignals, StageEvaluator, StageSuggestion};
use leadstage_core::{Lead, Stage, StageGroup, StageSource};
use leadstage_filters::{CompiledFilter, FilterError, FilterExpression};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Default)]
struct StoreState {
    leads: Vec<Lead>,
    filters: LeadFilters,
}

impl StoreState {
    fn find_mut(&mut self, id: u64) -> Option<&mut Lead> {
        self.leads.iter_mut().find(|lead| lead.id == id)
    }

    fn find(&self, id: u64) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }
}

/// Owns the lead collection and the list view's filter state
pub struct LeadStore {
    state: RwLock<StoreState>,
    source: Arc<dyn LeadSource>,
    evaluator: StageEvaluator,
    revision: watch::Sender<u64>,
}

impl LeadStore {
    pub fn new(source: Arc<dyn LeadSource>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(StoreState::default()),
            source,
            evaluator: StageEvaluator::default(),
            revision,
        }
    }

    /// Store backed by the JSON file from `config` when set, the seed set otherwise
    pub fn from_config(config: &StoreConfig) -> Self {
        let source: Arc<dyn LeadSource> = match &config.leads_file {
            Some(path) => Arc::new(JsonFileSource::new(path)),
            None => Arc::new(SeedSource::new(Duration::from_millis(config.fetch_delay_ms))),
        };
        Self::new(source).with_evaluator(StageEvaluator::new(Arc::new(ActivitySignals::new(
            config.no_reply_days,
        ))))
    }

    pub fn from_env() -> Result<Self> {
        let config = StoreConfig::from_env()?;
        Ok(Self::from_config(&config))
    }

    pub fn with_evaluator(mut self, evaluator: StageEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Receiver for the revision counter, bumped after every mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Replace the collection from the source. Falls back to the example set when loading fails.
    /// Returns the number of leads now held.
    pub async fn fetch_leads(&self) -> usize {
        let leads = match self.source.load_leads().await {
            Ok(leads) => {
                info!("Loaded {} leads from {} source", leads.len(), self.source.name());
                leads
            }
            Err(e) => {
                error!("Error loading leads from {} source: {}", self.source.name(), e);
                let fallback = example_leads(Utc::now());
                warn!("Falling back to {} example leads", fallback.len());
                fallback
            }
        };

        let count = leads.len();
        {
            let mut state = self.state.write().await;
            state.leads = leads;
        }
        self.bump_revision();
        count
    }

    pub async fn total_leads(&self) -> usize {
        self.state.read().await.leads.len()
    }

    /// Snapshot of the full collection
    pub async fn leads(&self) -> Vec<Lead> {
        self.state.read().await.leads.clone()
    }

    /// Leads passing every active filter, in collection order
    pub async fn filtered_leads(&self) -> Vec<Lead> {
        let state = self.state.read().await;
        let filtered: Vec<Lead> = state
            .filters
            .apply(&state.leads)
            .into_iter()
            .cloned()
            .collect();
        debug!("{} of {} leads pass filters", filtered.len(), state.leads.len());
        filtered
    }

    pub async fn stage_stats(&self) -> BTreeMap<Stage, usize> {
        stage_stats(&self.state.read().await.leads)
    }

    pub async fn group_stats(&self) -> BTreeMap<StageGroup, usize> {
        group_stats(&self.state.read().await.leads)
    }

    pub async fn get_lead_by_id(&self, id: u64) -> Option<Lead> {
        self.state.read().await.find(id).cloned()
    }

    /// Manually move a lead to `stage`. Returns `false` when no lead has `id`.
    pub async fn update_lead_stage(&self, id: u64, stage: Stage, reason: Option<String>) -> bool {
        {
            let mut state = self.state.write().await;
            let Some(lead) = state.find_mut(id) else {
                warn!("Cannot update stage: lead {} not found", id);
                return false;
            };
            let previous = lead.stage();
            lead.apply_stage_change(stage, StageSource::Manual, reason, Utc::now());
            info!("Lead {} moved {} -> {} manually", id, previous, stage);
        }
        self.bump_revision();
        true
    }

    /// Suggest a stage for a lead without changing it. `None` when no lead has `id`.
    pub async fn re_evaluate_lead_stage(&self, id: u64) -> Option<StageSuggestion> {
        let state = self.state.read().await;
        let lead = state.find(id)?;
        Some(self.evaluator.suggest(lead, Utc::now()))
    }

    /// Current filter state
    pub async fn filters(&self) -> LeadFilters {
        self.state.read().await.filters.clone()
    }

    async fn update_filters<F>(&self, update: F)
    where
        F: FnOnce(&mut LeadFilters),
    {
        {
            let mut state = self.state.write().await;
            update(&mut state.filters);
        }
        self.bump_revision();
    }

    pub async fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update_filters(|filters| filters.search_query = query).await;
    }

    pub async fn set_scope(&self, scope: Scope) {
        self.update_filters(|filters| filters.scope = scope).await;
    }

    pub async fn set_campaign_filter(&self, campaign: Option<u64>) {
        self.update_filters(|filters| filters.campaign = campaign).await;
    }

    pub async fn set_stage_filter(&self, stages: Vec<Stage>) {
        self.update_filters(|filters| filters.stages = stages).await;
    }

    pub async fn set_stage_group_filter(&self, groups: Vec<StageGroup>) {
        self.update_filters(|filters| filters.groups = groups).await;
    }

    pub async fn toggle_stage_filter(&self, stage: Stage) {
        self.update_filters(|filters| filters.toggle_stage(stage)).await;
    }

    /// Clears both the stage and the stage group filters
    pub async fn clear_stage_filters(&self) {
        self.update_filters(|filters| {
            filters.stages.clear();
            filters.groups.clear();
        })
        .await;
    }

    /// Compile and install an inline expression. The previous expression stays on error.
    pub async fn set_inline_filter_expression(&self, expression: &FilterExpression) -> Result<()> {
        let compiled = CompiledFilter::compile(expression)?;
        self.update_filters(|filters| filters.inline = Some(compiled)).await;
        Ok(())
    }

    /// Parse the builder's JSON form, then install it like [`Self::set_inline_filter_expression`]
    pub async fn set_inline_filter_json(&self, json: &str) -> Result<()> {
        let expression = FilterExpression::from_json(json)?;
        self.set_inline_filter_expression(&expression).await
    }

    pub async fn clear_inline_filter(&self) {
        self.update_filters(|filters| filters.inline = None).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use pretty_assertions::assert_eq;

    fn store_with(leads: Vec<Lead>) -> LeadStore {
        LeadStore::new(Arc::new(StaticSource::new(leads)))
    }

    #[tokio::test]
    async fn test_empty_before_fetch() {
        let store = store_with(vec![Lead::new(1, "Bryan Bayless")]);
        assert_eq!(store.total_leads().await, 0);
        assert!(store.filtered_leads().await.is_empty());
        assert_eq!(store.stage_stats().await[&Stage::New], 0);
    }

    #[tokio::test]
    async fn test_fetch_replaces_collection() {
        let store = store_with(vec![Lead::new(1, "Bryan Bayless"), Lead::new(2, "David Pierce")]);
        assert_eq!(store.fetch_leads().await, 2);
        assert_eq!(store.fetch_leads().await, 2);
        assert_eq!(store.total_leads().await, 2);
    }

    #[tokio::test]
    async fn test_update_unknown_lead() {
        let store = store_with(vec![Lead::new(1, "Bryan Bayless")]);
        store.fetch_leads().await;
        let before = store.revision();
        let leads_before = store.leads().await;
        assert!(!store.update_lead_stage(99, Stage::Engaged, None).await);
        assert_eq!(store.revision(), before);

        let leads_after = store.leads().await;
        assert_eq!(leads_after, leads_before);
        assert_eq!(leads_after[0].stage(), Stage::New);
        assert!(leads_after[0].stage_history().is_empty());
    }

    #[tokio::test]
    async fn test_update_records_history() {
        let store = store_with(vec![Lead::new(1, "Bryan Bayless")]);
        store.fetch_leads().await;

        assert!(
            store
                .update_lead_stage(1, Stage::Excluded, Some("Competitor".to_string()))
                .await
        );
        let lead = store.get_lead_by_id(1).await.unwrap();
        assert_eq!(lead.stage(), Stage::Excluded);
        assert_eq!(lead.stage_group(), StageGroup::Closed);
        assert_eq!(lead.stage_source(), StageSource::Manual);
        assert_eq!(lead.stage_reason(), Some("Competitor"));
        assert_eq!(lead.stage_history().len(), 1);
        assert_eq!(lead.stage_history()[0].stage, Stage::New);
        assert_eq!(lead.stage_history()[0].source, StageSource::Ai);
    }

    #[tokio::test]
    async fn test_re_evaluate_unknown_lead() {
        let store = store_with(vec![]);
        store.fetch_leads().await;
        assert!(store.re_evaluate_lead_stage(7).await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_inline_expression_keeps_previous() {
        let store = store_with(vec![Lead::new(1, "Bryan Bayless")]);
        store.fetch_leads().await;

        let valid = FilterExpression::new().condition("stage", "eq", Some("ENGAGED"));
        store.set_inline_filter_expression(&valid).await.unwrap();
        assert!(store.filtered_leads().await.is_empty());

        let invalid = FilterExpression::new().condition("phone", "eq", Some("555"));
        let err = store.set_inline_filter_expression(&invalid).await.unwrap_err();
        assert!(matches!(err, StoreError::Filter(FilterError::UnknownField(_))));
        assert!(store.filtered_leads().await.is_empty());

        store.clear_inline_filter().await;
        assert_eq!(store.filtered_leads().await.len(), 1);
    }

    #[tokio::test]
    async fn test_from_config_uses_leads_file() {
        let config = StoreConfig {
            leads_file: Some("/nonexistent/leads.json".into()),
            ..Default::default()
        };
        let store = LeadStore::from_config(&config);
        // Unreadable file falls back to the example set
        assert_eq!(store.fetch_leads().await, 12);
    }
}
