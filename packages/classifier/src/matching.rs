// ABOUTME: Contextual match scoring for candidate stage transitions
// ABOUTME: Additive score gated by eligibility, accepted past a strictness threshold

use chrono::{DateTime, Utc};
use leadstage_core::{
    whole_days_between, AssignmentEligibility, Intent, Lead, Stage, StageConfig, StageSource,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

const SPECIFIC_ELIGIBILITY_POINTS: f64 = 30.0;
const ANY_ELIGIBILITY_POINTS: f64 = 20.0;
const SEMANTIC_RELEVANCE_WEIGHT: f64 = 40.0;
const REPLY_BONUS: f64 = 20.0;
const SILENCE_BONUS: f64 = 15.0;
const SILENCE_BONUS_AFTER_DAYS: i64 = 7;
const MANUAL_OVERRIDE_PENALTY: f64 = 10.0;

/// Conversation state a candidate stage is scored against
#[derive(Debug, Clone, PartialEq)]
pub struct MatchContext {
    pub current_stage: Stage,
    /// Per-stage relevance in `[0, 1]`, supplied by the signal collaborator
    pub semantic_relevance: HashMap<Stage, f64>,
    pub reply_received: bool,
    /// Days since the last conversation activity
    pub silence_duration: i64,
    /// Stage the user manually moved the lead away from
    pub manual_override: Option<Stage>,
}

impl MatchContext {
    pub fn new(current_stage: Stage) -> Self {
        Self {
            current_stage,
            semantic_relevance: HashMap::new(),
            reply_received: false,
            silence_duration: 0,
            manual_override: None,
        }
    }

    pub fn with_relevance(mut self, stage: Stage, relevance: f64) -> Self {
        self.semantic_relevance.insert(stage, relevance);
        self
    }

    pub fn with_reply_received(mut self, reply_received: bool) -> Self {
        self.reply_received = reply_received;
        self
    }

    pub fn with_silence_duration(mut self, days: i64) -> Self {
        self.silence_duration = days;
        self
    }

    pub fn with_manual_override(mut self, stage: Option<Stage>) -> Self {
        self.manual_override = stage;
        self
    }

    /// Context derived from a lead's engagement counters at `now`
    pub fn for_lead(
        lead: &Lead,
        semantic_relevance: HashMap<Stage, f64>,
        now: DateTime<Utc>,
    ) -> Self {
        let last_activity = lead.last_reply_at.max(lead.last_message_at);
        let silence_duration = last_activity
            .map(|at| whole_days_between(at, now))
            .unwrap_or(0);

        // A manual stage means the user moved away from whatever came before it
        let manual_override = match lead.stage_source() {
            StageSource::Manual => lead.previous_stage(),
            StageSource::Ai => None,
        };

        Self {
            current_stage: lead.stage(),
            semantic_relevance,
            reply_received: lead.replies_received > 0,
            silence_duration,
            manual_override,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub score: f64,
    pub exceeds_threshold: bool,
    pub threshold: f64,
}

/// Score `candidate` as a transition target. `None` means the candidate is not
/// eligible from the current stage and was not scored.
pub fn evaluate_contextual_match(candidate: Stage, context: &MatchContext) -> Option<MatchScore> {
    let config = StageConfig::for_stage(candidate);
    let mut score = 0.0;

    match config.assignment_eligibility {
        AssignmentEligibility::Specific(from) if !from.is_empty() => {
            if !from.contains(&context.current_stage) {
                debug!(
                    "{} not assignable from {}",
                    candidate, context.current_stage
                );
                return None;
            }
            score += SPECIFIC_ELIGIBILITY_POINTS;
        }
        AssignmentEligibility::Specific(_) => {}
        AssignmentEligibility::Any => score += ANY_ELIGIBILITY_POINTS,
    }

    if let Some(relevance) = context.semantic_relevance.get(&candidate) {
        score += relevance * SEMANTIC_RELEVANCE_WEIGHT;
    }

    if context.reply_received && config.ai_intent == Intent::PositiveEngagement {
        score += REPLY_BONUS;
    }
    if context.silence_duration > SILENCE_BONUS_AFTER_DAYS
        && config.ai_intent == Intent::NoResponseAfterEngagement
    {
        score += SILENCE_BONUS;
    }

    // Discourage flipping straight back to a stage the user just left
    if context.manual_override == Some(candidate) {
        score -= MANUAL_OVERRIDE_PENALTY;
    }

    let threshold = config.assignment_strictness.threshold();
    Some(MatchScore {
        score,
        exceeds_threshold: score >= threshold,
        threshold,
    })
}

/// Same as [`evaluate_contextual_match`] for a stage given by name. Unknown names score nothing.
pub fn evaluate_contextual_match_named(
    candidate: &str,
    context: &MatchContext,
) -> Option<MatchScore> {
    match candidate.parse::<Stage>() {
        Ok(stage) => evaluate_contextual_match(stage, context),
        Err(e) => {
            debug!("Skipping contextual match: {}", e);
            None
        }
    }
}
