// ABOUTME: Enumerations for lead stages, groups, sources, intents, and signals
// ABOUTME: String forms match the dashboard's JSON values exactly

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown stage: {0}")]
    UnknownStage(String),
    #[error("Unknown stage group: {0}")]
    UnknownStageGroup(String),
    #[error("Unknown intent: {0}")]
    UnknownIntent(String),
    #[error("Unknown signal: {0}")]
    UnknownSignal(String),
}

/// Discrete pipeline state of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    New,
    Contacted,
    Engaged,
    Ghosted,
    NotInterested,
    Excluded,
}

impl Stage {
    /// Every stage in pipeline order
    pub const ALL: [Stage; 6] = [
        Stage::New,
        Stage::Contacted,
        Stage::Engaged,
        Stage::Ghosted,
        Stage::NotInterested,
        Stage::Excluded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::New => "NEW",
            Stage::Contacted => "CONTACTED",
            Stage::Engaged => "ENGAGED",
            Stage::Ghosted => "GHOSTED",
            Stage::NotInterested => "NOT_INTERESTED",
            Stage::Excluded => "EXCLUDED",
        }
    }

    /// Group this stage belongs to
    pub fn group(self) -> StageGroup {
        crate::taxonomy::stage_to_group(self)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| ParseError::UnknownStage(s.to_string()))
    }
}

/// Coarse bucket derived from a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageGroup {
    New,
    InProgress,
    Closed,
}

impl StageGroup {
    pub const ALL: [StageGroup; 3] = [StageGroup::New, StageGroup::InProgress, StageGroup::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageGroup::New => "NEW",
            StageGroup::InProgress => "IN_PROGRESS",
            StageGroup::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for StageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageGroup {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StageGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| ParseError::UnknownStageGroup(s.to_string()))
    }
}

/// Who set the current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StageSource {
    Ai,
    Manual,
}

impl StageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageSource::Ai => "AI",
            StageSource::Manual => "MANUAL",
        }
    }
}

impl fmt::Display for StageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Found,
    NotFound,
    #[default]
    Find,
}

/// Semantic classification of a lead's engagement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    NoContact,
    OutreachSent,
    PositiveEngagement,
    NegativeEngagement,
    NoResponseAfterEngagement,
    DoNotContact,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::NoContact,
        Intent::OutreachSent,
        Intent::PositiveEngagement,
        Intent::NegativeEngagement,
        Intent::NoResponseAfterEngagement,
        Intent::DoNotContact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::NoContact => "no_contact",
            Intent::OutreachSent => "outreach_sent",
            Intent::PositiveEngagement => "positive_engagement",
            Intent::NegativeEngagement => "negative_engagement",
            Intent::NoResponseAfterEngagement => "no_response_after_engagement",
            Intent::DoNotContact => "do_not_contact",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| ParseError::UnknownIntent(s.to_string()))
    }
}

/// Raw detection event. Internal to classification, never shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    OutreachSent,
    ReplyReceived,
    NoReplyAfterNDays,
    AutoReplyDetected,
    SentimentPositive,
    SentimentNegative,
    SentimentNeutral,
    ConversationStopped,
    ExplicitRejection,
    UserExcluded,
}

impl Signal {
    pub const ALL: [Signal; 10] = [
        Signal::OutreachSent,
        Signal::ReplyReceived,
        Signal::NoReplyAfterNDays,
        Signal::AutoReplyDetected,
        Signal::SentimentPositive,
        Signal::SentimentNegative,
        Signal::SentimentNeutral,
        Signal::ConversationStopped,
        Signal::ExplicitRejection,
        Signal::UserExcluded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::OutreachSent => "outreach_sent",
            Signal::ReplyReceived => "reply_received",
            Signal::NoReplyAfterNDays => "no_reply_after_n_days",
            Signal::AutoReplyDetected => "auto_reply_detected",
            Signal::SentimentPositive => "sentiment_positive",
            Signal::SentimentNegative => "sentiment_negative",
            Signal::SentimentNeutral => "sentiment_neutral",
            Signal::ConversationStopped => "conversation_stopped",
            Signal::ExplicitRejection => "explicit_rejection",
            Signal::UserExcluded => "user_excluded",
        }
    }
}

impl FromStr for Signal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signal::ALL
            .into_iter()
            .find(|signal| signal.as_str() == s)
            .ok_or_else(|| ParseError::UnknownSignal(s.to_string()))
    }
}
