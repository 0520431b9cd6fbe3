// ABOUTME: Lead record and stage history types
// ABOUTME: Stage and group are private so the group can never drift from the stage

use crate::types::{EmailStatus, Stage, StageGroup, StageSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a lead's stage taken just before it changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageHistoryEntry {
    pub stage: Stage,
    pub source: StageSource,
    pub timestamp: DateTime<Utc>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "LeadRecord")]
pub struct Lead {
    pub id: u64,
    pub name: String,
    pub headline: Option<String>,
    pub emails: Vec<String>,
    pub email_status: EmailStatus,
    pub location: Option<String>,
    pub company: Option<String>,
    pub linkedin_url: Option<String>,
    pub campaign_id: Option<u64>,
    pub campaign_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_action: Option<DateTime<Utc>>,

    // Stage tracking, mutated only through `apply_stage_change`
    lead_stage: Stage,
    lead_stage_group: StageGroup,
    lead_stage_source: StageSource,
    lead_stage_updated_at: DateTime<Utc>,
    lead_stage_reason: Option<String>,

    // Engagement counters
    pub messages_sent: u32,
    pub replies_received: u32,
    pub follow_up_count: u32,
    pub last_message_at: Option<DateTime<Utc>>,
    pub last_reply_at: Option<DateTime<Utc>>,

    stage_history: Vec<StageHistoryEntry>,
}

impl Lead {
    /// A freshly ingested lead: stage NEW, set by the AI
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            headline: None,
            emails: Vec::new(),
            email_status: EmailStatus::Find,
            location: None,
            company: None,
            linkedin_url: None,
            campaign_id: None,
            campaign_name: None,
            created_at: None,
            last_action: None,
            lead_stage: Stage::New,
            lead_stage_group: Stage::New.group(),
            lead_stage_source: StageSource::Ai,
            lead_stage_updated_at: Utc::now(),
            lead_stage_reason: None,
            messages_sent: 0,
            replies_received: 0,
            follow_up_count: 0,
            last_message_at: None,
            last_reply_at: None,
            stage_history: Vec::new(),
        }
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    /// Sets the email list and derives `email_status` from it
    pub fn with_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emails = emails.into_iter().map(Into::into).collect();
        self.email_status = if self.emails.is_empty() {
            EmailStatus::NotFound
        } else {
            EmailStatus::Found
        };
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_campaign(mut self, id: u64, name: impl Into<String>) -> Self {
        self.campaign_id = Some(id);
        self.campaign_name = Some(name.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Ingestion-time classification. Does not record history.
    pub fn with_stage(
        mut self,
        stage: Stage,
        source: StageSource,
        updated_at: DateTime<Utc>,
        reason: Option<String>,
    ) -> Self {
        self.lead_stage = stage;
        self.lead_stage_group = stage.group();
        self.lead_stage_source = source;
        self.lead_stage_updated_at = updated_at;
        self.lead_stage_reason = reason;
        self
    }

    pub fn with_activity(
        mut self,
        messages_sent: u32,
        replies_received: u32,
        last_message_at: Option<DateTime<Utc>>,
        last_reply_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.messages_sent = messages_sent;
        self.replies_received = replies_received;
        self.follow_up_count = messages_sent.saturating_sub(1);
        self.last_message_at = last_message_at;
        self.last_reply_at = last_reply_at;
        if self.last_action.is_none() {
            self.last_action = last_message_at.max(last_reply_at);
        }
        self
    }

    pub fn with_history(mut self, history: Vec<StageHistoryEntry>) -> Self {
        self.stage_history = history;
        self
    }

    pub fn stage(&self) -> Stage {
        self.lead_stage
    }

    pub fn stage_group(&self) -> StageGroup {
        self.lead_stage_group
    }

    pub fn stage_source(&self) -> StageSource {
        self.lead_stage_source
    }

    pub fn stage_updated_at(&self) -> DateTime<Utc> {
        self.lead_stage_updated_at
    }

    pub fn stage_reason(&self) -> Option<&str> {
        self.lead_stage_reason.as_deref()
    }

    pub fn stage_history(&self) -> &[StageHistoryEntry] {
        &self.stage_history
    }

    /// Stage the lead held before its most recent change, if any
    pub fn previous_stage(&self) -> Option<Stage> {
        self.stage_history.last().map(|entry| entry.stage)
    }

    /// Records the current stage in history, then moves the lead to `stage`.
    /// Stage and group are always written together.
    pub fn apply_stage_change(
        &mut self,
        stage: Stage,
        source: StageSource,
        reason: Option<String>,
        at: DateTime<Utc>,
    ) {
        self.stage_history.push(StageHistoryEntry {
            stage: self.lead_stage,
            source: self.lead_stage_source,
            timestamp: self.lead_stage_updated_at,
            reason: self.lead_stage_reason.take(),
        });

        self.lead_stage = stage;
        self.lead_stage_group = stage.group();
        self.lead_stage_source = source;
        self.lead_stage_updated_at = at;
        self.lead_stage_reason = reason;
    }
}

/// Wire form of a lead. Any `leadStageGroup` in the input is ignored and recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeadRecord {
    id: u64,
    name: String,
    #[serde(default)]
    headline: Option<String>,
    #[serde(default)]
    emails: Vec<String>,
    #[serde(default)]
    email_status: EmailStatus,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    linkedin_url: Option<String>,
    #[serde(default)]
    campaign_id: Option<u64>,
    #[serde(default)]
    campaign_name: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    last_action: Option<DateTime<Utc>>,
    #[serde(default = "default_stage")]
    lead_stage: Stage,
    #[serde(default = "default_source")]
    lead_stage_source: StageSource,
    #[serde(default = "Utc::now")]
    lead_stage_updated_at: DateTime<Utc>,
    #[serde(default)]
    lead_stage_reason: Option<String>,
    #[serde(default)]
    messages_sent: u32,
    #[serde(default)]
    replies_received: u32,
    #[serde(default)]
    follow_up_count: u32,
    #[serde(default)]
    last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    last_reply_at: Option<DateTime<Utc>>,
    #[serde(default)]
    stage_history: Vec<StageHistoryEntry>,
}

fn default_stage() -> Stage {
    Stage::New
}

fn default_source() -> StageSource {
    StageSource::Ai
}

impl From<LeadRecord> for Lead {
    fn from(record: LeadRecord) -> Self {
        Lead {
            id: record.id,
            name: record.name,
            headline: record.headline,
            emails: record.emails,
            email_status: record.email_status,
            location: record.location,
            company: record.company,
            linkedin_url: record.linkedin_url,
            campaign_id: record.campaign_id,
            campaign_name: record.campaign_name,
            created_at: record.created_at,
            last_action: record.last_action,
            lead_stage: record.lead_stage,
            lead_stage_group: record.lead_stage.group(),
            lead_stage_source: record.lead_stage_source,
            lead_stage_updated_at: record.lead_stage_updated_at,
            lead_stage_reason: record.lead_stage_reason,
            messages_sent: record.messages_sent,
            replies_received: record.replies_received,
            follow_up_count: record.follow_up_count,
            last_message_at: record.last_message_at,
            last_reply_at: record.last_reply_at,
            stage_history: record.stage_history,
        }
    }
}
