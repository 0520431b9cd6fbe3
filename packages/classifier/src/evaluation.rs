// ABOUTME: Read-only stage suggestions built from signals and contextual matching
// ABOUTME: Signal detection is pluggable; ActivitySignals derives it from engagement counters

use crate::matching::{evaluate_contextual_match, MatchContext, MatchScore};
use crate::signals::resolve_signals_to_intent;
use chrono::{DateTime, Utc};
use leadstage_core::{
    reason_templates, whole_days_between, Intent, Lead, Signal, Stage, StageConfig, StageSource,
    DEFAULT_NO_REPLY_DAYS,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Confidence reported when no candidate clears its threshold and the lead stays put
const KEEP_CONFIDENCE: f64 = 0.8;
const NO_CHANGE_REASON: &str = "No change recommended";

/// Produces raw detection signals for a lead. Message-content analysis lives behind this trait.
pub trait SignalSource: Send + Sync {
    fn signals(&self, lead: &Lead, now: DateTime<Utc>) -> HashSet<Signal>;

    /// Per-stage relevance in `[0, 1]`. Stages left out contribute nothing.
    fn semantic_relevance(&self, _lead: &Lead, _now: DateTime<Utc>) -> HashMap<Stage, f64> {
        HashMap::new()
    }
}

/// Signals derived purely from message and reply counters
#[derive(Debug, Clone)]
pub struct ActivitySignals {
    no_reply_days: i64,
}

impl Default for ActivitySignals {
    fn default() -> Self {
        Self::new(DEFAULT_NO_REPLY_DAYS)
    }
}

impl ActivitySignals {
    pub fn new(no_reply_days: i64) -> Self {
        Self {
            no_reply_days: no_reply_days.max(1),
        }
    }

    fn silence(lead: &Lead, now: DateTime<Utc>) -> i64 {
        lead.last_reply_at
            .max(lead.last_message_at)
            .map(|at| whole_days_between(at, now))
            .unwrap_or(0)
    }

    /// Our message is newer than their last reply
    fn awaiting_reply(lead: &Lead) -> bool {
        match (lead.last_message_at, lead.last_reply_at) {
            (Some(message), Some(reply)) => message > reply,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

impl SignalSource for ActivitySignals {
    fn signals(&self, lead: &Lead, now: DateTime<Utc>) -> HashSet<Signal> {
        let mut signals = HashSet::new();

        if lead.stage() == Stage::Excluded && lead.stage_source() == StageSource::Manual {
            signals.insert(Signal::UserExcluded);
        }
        if lead.messages_sent > 0 {
            signals.insert(Signal::OutreachSent);
        }

        let gone_quiet = Self::silence(lead, now) >= self.no_reply_days;
        if lead.replies_received > 0 {
            if Self::awaiting_reply(lead) && gone_quiet {
                signals.insert(Signal::ConversationStopped);
            } else {
                signals.insert(Signal::ReplyReceived);
            }
        } else if lead.messages_sent > 0 && gone_quiet {
            signals.insert(Signal::NoReplyAfterNDays);
        }

        signals
    }

    fn semantic_relevance(&self, lead: &Lead, now: DateTime<Utc>) -> HashMap<Stage, f64> {
        let mut relevance = HashMap::new();

        if lead.messages_sent > 0 {
            relevance.insert(Stage::Contacted, 1.0);
        }
        if lead.replies_received > 0 {
            relevance.insert(
                Stage::Engaged,
                (f64::from(lead.replies_received) / 2.0).min(1.0),
            );
        }
        if lead.messages_sent > 0 && Self::awaiting_reply(lead) {
            // Full relevance once silence reaches twice the no-reply window
            let silence = Self::silence(lead, now) as f64;
            relevance.insert(
                Stage::Ghosted,
                (silence / (2.0 * self.no_reply_days as f64)).min(1.0),
            );
        }

        relevance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSuggestion {
    pub suggested_stage: Stage,
    pub current_stage: Stage,
    pub intent: Intent,
    pub reason: String,
    pub confidence: f64,
    /// Score of the winning candidate, absent when the current stage is kept
    pub score: Option<MatchScore>,
}

impl StageSuggestion {
    pub fn is_change(&self) -> bool {
        self.suggested_stage != self.current_stage
    }
}

/// Suggest a stage for `lead` from already-detected signals and context.
///
/// The resolved intent narrows the candidates to stages configured with that intent;
/// contextual matching decides whether any of them is strong enough to assign.
pub fn suggest_stage(
    lead: &Lead,
    signals: &HashSet<Signal>,
    context: &MatchContext,
) -> StageSuggestion {
    let intent = resolve_signals_to_intent(signals);

    let best = StageConfig::stages_for_intent(intent)
        .filter_map(|candidate| {
            evaluate_contextual_match(candidate, context).map(|score| (candidate, score))
        })
        .filter(|(_, score)| score.exceeds_threshold)
        .fold(None, |best: Option<(Stage, MatchScore)>, (candidate, score)| match best {
            Some((_, current)) if current.score >= score.score => best,
            _ => Some((candidate, score)),
        });

    let current_reason = || {
        lead.stage_reason()
            .map(str::to_string)
            .unwrap_or_else(|| NO_CHANGE_REASON.to_string())
    };

    match best {
        Some((stage, score)) => {
            let reason = if stage == lead.stage() {
                current_reason()
            } else {
                reason_templates(stage)
                    .first()
                    .map(|reason| reason.to_string())
                    .unwrap_or_else(current_reason)
            };
            debug!(
                "Lead {} suggested {} (score {:.1} >= {:.1})",
                lead.id, stage, score.score, score.threshold
            );
            StageSuggestion {
                suggested_stage: stage,
                current_stage: lead.stage(),
                intent,
                reason,
                confidence: (score.score / 100.0).clamp(0.0, 1.0),
                score: Some(score),
            }
        }
        None => {
            debug!("Lead {} keeps {} (intent {})", lead.id, lead.stage(), intent);
            StageSuggestion {
                suggested_stage: lead.stage(),
                current_stage: lead.stage(),
                intent,
                reason: current_reason(),
                confidence: KEEP_CONFIDENCE,
                score: None,
            }
        }
    }
}

/// Runs the signal source, resolver, and contextual matcher for one lead
#[derive(Clone)]
pub struct StageEvaluator {
    source: Arc<dyn SignalSource>,
}

impl Default for StageEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(ActivitySignals::default()))
    }
}

impl StageEvaluator {
    pub fn new(source: Arc<dyn SignalSource>) -> Self {
        Self { source }
    }

    pub fn suggest(&self, lead: &Lead, now: DateTime<Utc>) -> StageSuggestion {
        let signals = self.source.signals(lead, now);
        let relevance = self.source.semantic_relevance(lead, now);
        let context = MatchContext::for_lead(lead, relevance, now);
        suggest_stage(lead, &signals, &context)
    }
}
