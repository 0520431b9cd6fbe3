// ABOUTME: Static lookup tables for the stage/intent taxonomy
// ABOUTME: Stage configuration, group projection, signal mapping, and reason templates

use crate::types::{Intent, Signal, Stage, StageGroup};
use serde::Serialize;

/// Which current stages a stage may be assigned from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "from", rename_all = "lowercase")]
pub enum AssignmentEligibility {
    /// Assignable from any stage
    Any,
    /// Assignable only from the listed stages; an empty list places no restriction
    Specific(&'static [Stage]),
}

/// How strong a contextual match must be before a stage is assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStrictness {
    Low,
    Medium,
    High,
}

impl AssignmentStrictness {
    /// Minimum contextual match score required at this strictness
    pub fn threshold(self) -> f64 {
        match self {
            AssignmentStrictness::Low => 30.0,
            AssignmentStrictness::Medium => 50.0,
            AssignmentStrictness::High => 70.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConfig {
    pub stage: Stage,
    pub label: &'static str,
    pub description: &'static str,
    pub ai_intent: Intent,
    pub assignment_eligibility: AssignmentEligibility,
    pub assignment_strictness: AssignmentStrictness,
}

static STAGE_CONFIGS: [StageConfig; 6] = [
    StageConfig {
        stage: Stage::New,
        label: "New",
        description: "Lead added but not contacted yet",
        ai_intent: Intent::NoContact,
        assignment_eligibility: AssignmentEligibility::Any,
        assignment_strictness: AssignmentStrictness::Low,
    },
    StageConfig {
        stage: Stage::Contacted,
        label: "Contacted",
        description: "Outreach sent, no reply yet",
        ai_intent: Intent::OutreachSent,
        assignment_eligibility: AssignmentEligibility::Specific(&[Stage::New]),
        assignment_strictness: AssignmentStrictness::Medium,
    },
    StageConfig {
        stage: Stage::Engaged,
        label: "Engaged",
        description: "Meaningful reply detected",
        ai_intent: Intent::PositiveEngagement,
        assignment_eligibility: AssignmentEligibility::Specific(&[
            Stage::Contacted,
            Stage::Engaged,
        ]),
        assignment_strictness: AssignmentStrictness::Medium,
    },
    StageConfig {
        stage: Stage::Ghosted,
        label: "Ghosted",
        description: "Conversation stopped after engagement",
        ai_intent: Intent::NoResponseAfterEngagement,
        assignment_eligibility: AssignmentEligibility::Specific(&[
            Stage::Contacted,
            Stage::Engaged,
        ]),
        // Requires strong evidence
        assignment_strictness: AssignmentStrictness::High,
    },
    StageConfig {
        stage: Stage::NotInterested,
        label: "Not Interested",
        description: "Explicit or implicit rejection",
        ai_intent: Intent::NegativeEngagement,
        assignment_eligibility: AssignmentEligibility::Any,
        assignment_strictness: AssignmentStrictness::Medium,
    },
    StageConfig {
        stage: Stage::Excluded,
        label: "Excluded",
        description: "Do not contact",
        ai_intent: Intent::DoNotContact,
        assignment_eligibility: AssignmentEligibility::Any,
        assignment_strictness: AssignmentStrictness::Low,
    },
];

impl StageConfig {
    /// Configuration for a stage. Total over every `Stage`.
    pub fn for_stage(stage: Stage) -> &'static StageConfig {
        match stage {
            Stage::New => &STAGE_CONFIGS[0],
            Stage::Contacted => &STAGE_CONFIGS[1],
            Stage::Engaged => &STAGE_CONFIGS[2],
            Stage::Ghosted => &STAGE_CONFIGS[3],
            Stage::NotInterested => &STAGE_CONFIGS[4],
            Stage::Excluded => &STAGE_CONFIGS[5],
        }
    }

    /// All stage configurations in pipeline order
    pub fn all() -> &'static [StageConfig] {
        &STAGE_CONFIGS
    }

    /// Stages whose configured intent is `intent`, in pipeline order
    pub fn stages_for_intent(intent: Intent) -> impl Iterator<Item = Stage> {
        STAGE_CONFIGS
            .iter()
            .filter(move |config| config.ai_intent == intent)
            .map(|config| config.stage)
    }
}

/// Stage to group projection
pub fn stage_to_group(stage: Stage) -> StageGroup {
    match stage {
        Stage::New => StageGroup::New,
        Stage::Contacted | Stage::Engaged | Stage::Ghosted => StageGroup::InProgress,
        Stage::NotInterested | Stage::Excluded => StageGroup::Closed,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupConfig {
    pub group: StageGroup,
    pub label: &'static str,
    pub stages: &'static [Stage],
}

static GROUP_CONFIGS: [GroupConfig; 3] = [
    GroupConfig {
        group: StageGroup::New,
        label: "New",
        stages: &[Stage::New],
    },
    GroupConfig {
        group: StageGroup::InProgress,
        label: "In Progress",
        stages: &[Stage::Contacted, Stage::Engaged, Stage::Ghosted],
    },
    GroupConfig {
        group: StageGroup::Closed,
        label: "Closed",
        stages: &[Stage::NotInterested, Stage::Excluded],
    },
];

impl GroupConfig {
    pub fn for_group(group: StageGroup) -> &'static GroupConfig {
        match group {
            StageGroup::New => &GROUP_CONFIGS[0],
            StageGroup::InProgress => &GROUP_CONFIGS[1],
            StageGroup::Closed => &GROUP_CONFIGS[2],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntentConfig {
    pub intent: Intent,
    pub label: &'static str,
    pub description: &'static str,
}

impl IntentConfig {
    pub fn for_intent(intent: Intent) -> IntentConfig {
        let (label, description) = match intent {
            Intent::NoContact => (
                "No Contact",
                "Lead has been added but no outreach has been sent yet.",
            ),
            Intent::OutreachSent => (
                "Outreach Sent",
                "Initial outreach message has been sent, waiting for response.",
            ),
            Intent::PositiveEngagement => (
                "Positive Engagement",
                "Lead shows interest or actively participates in conversation.",
            ),
            Intent::NegativeEngagement => (
                "Negative Engagement",
                "Lead explicitly or implicitly rejects the offer.",
            ),
            Intent::NoResponseAfterEngagement => (
                "No Response After Engagement",
                "Conversation stopped after initial engagement or multiple attempts.",
            ),
            Intent::DoNotContact => (
                "Do Not Contact",
                "Lead should not be contacted (system or user exclusion).",
            ),
        };
        IntentConfig {
            intent,
            label,
            description,
        }
    }
}

/// Signal to intent table. Auto-replies do not move a lead past outreach.
pub const SIGNAL_INTENTS: [(Signal, Intent); 10] = [
    (Signal::OutreachSent, Intent::OutreachSent),
    (Signal::ReplyReceived, Intent::PositiveEngagement),
    (Signal::SentimentPositive, Intent::PositiveEngagement),
    (Signal::SentimentNeutral, Intent::PositiveEngagement),
    (Signal::SentimentNegative, Intent::NegativeEngagement),
    (Signal::ExplicitRejection, Intent::NegativeEngagement),
    (Signal::NoReplyAfterNDays, Intent::NoResponseAfterEngagement),
    (Signal::ConversationStopped, Intent::NoResponseAfterEngagement),
    (Signal::AutoReplyDetected, Intent::OutreachSent),
    (Signal::UserExcluded, Intent::DoNotContact),
];

/// Intent mapped from a single signal, `None` when the table has no entry
pub fn signal_intent(signal: Signal) -> Option<Intent> {
    SIGNAL_INTENTS
        .iter()
        .find(|(mapped, _)| *mapped == signal)
        .map(|(_, intent)| *intent)
}

/// Canned explanations the classifier attaches to a stage it assigns
pub fn reason_templates(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::New => &[
            "Lead was recently added to campaign",
            "No outreach has been sent yet",
        ],
        Stage::Contacted => &[
            "First outreach message was sent",
            "Awaiting response from lead",
            "Connection request sent via LinkedIn",
        ],
        Stage::Engaged => &[
            "Lead replied with interest in learning more",
            "Positive response detected in conversation",
            "Lead asked questions about the offering",
            "Meaningful conversation initiated",
        ],
        Stage::Ghosted => &[
            "No reply after 3 follow-up attempts over 14 days",
            "Conversation stopped after initial engagement",
            "Lead has not responded for 10+ days",
        ],
        Stage::NotInterested => &[
            "Lead explicitly declined the offer",
            "Negative sentiment detected in reply",
            "Lead requested to be removed from outreach",
            "Auto-reply indicates permanent unavailability",
        ],
        Stage::Excluded => &[
            "Manually marked as do not contact",
            "Lead is a competitor or internal contact",
        ],
    }
}
