// ABOUTME: Per-field filter predicates over a lead
// ABOUTME: Field/operator pairs are checked when a condition is built, not when it runs

use crate::error::{FilterError, Result};
use chrono::{DateTime, Utc};
use leadstage_core::{parse_timestamp, Lead, Stage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Condition exactly as the filter builder sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCondition {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl RawCondition {
    pub fn new(field: &str, operator: &str, value: Option<&str>) -> Self {
        Self {
            field: field.to_string(),
            operator: operator.to_string(),
            value: value.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Stage,
    Email,
    Company,
    Location,
    CreateDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Stage => "stage",
            Field::Email => "email",
            Field::Company => "company",
            Field::Location => "location",
            Field::CreateDate => "createDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stage" => Ok(Field::Stage),
            "email" => Ok(Field::Email),
            "company" => Ok(Field::Company),
            "location" => Ok(Field::Location),
            "createDate" => Ok(Field::CreateDate),
            _ => Err(FilterError::UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Contains,
    NotContains,
    IsSet,
    IsBlank,
    Before,
    After,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::IsSet => "is_set",
            Operator::IsBlank => "is_blank",
            Operator::Before => "before",
            Operator::After => "after",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eq" => Ok(Operator::Eq),
            "ne" => Ok(Operator::Ne),
            "contains" => Ok(Operator::Contains),
            "not_contains" => Ok(Operator::NotContains),
            "is_set" => Ok(Operator::IsSet),
            "is_blank" => Ok(Operator::IsBlank),
            "before" => Ok(Operator::Before),
            "after" => Ok(Operator::After),
            _ => Err(FilterError::UnknownOperator(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageMatch {
    Eq(Stage),
    Ne(Stage),
}

/// Text comparison with an already-normalized needle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatch {
    Eq(String),
    Ne(String),
    Contains(String),
    NotContains(String),
    IsSet,
    IsBlank,
}

/// Date comparison. `None` bounds come from a missing or unreadable value and never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMatch {
    IsSet,
    IsBlank,
    Before(Option<DateTime<Utc>>),
    After(Option<DateTime<Utc>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Stage(StageMatch),
    Email(TextMatch),
    Company(TextMatch),
    Location(TextMatch),
    CreateDate(DateMatch),
    /// Fixed outcome for input the lenient builder could not interpret
    Constant(bool),
}

impl TryFrom<&RawCondition> for Condition {
    type Error = FilterError;

    fn try_from(raw: &RawCondition) -> Result<Self> {
        let field: Field = raw.field.parse()?;
        let operator: Operator = raw.operator.parse()?;
        Condition::build(field, operator, raw.value.as_deref().unwrap_or(""))
    }
}

impl Condition {
    /// Build a condition from typed parts, rejecting operators the field does not support
    pub fn build(field: Field, operator: Operator, value: &str) -> Result<Self> {
        match field {
            Field::Stage => {
                let stage = || {
                    value
                        .parse::<Stage>()
                        .map_err(|_| FilterError::InvalidStage(value.to_string()))
                };
                match operator {
                    Operator::Eq => Ok(Condition::Stage(StageMatch::Eq(stage()?))),
                    Operator::Ne => Ok(Condition::Stage(StageMatch::Ne(stage()?))),
                    _ => Err(unsupported(field, operator)),
                }
            }
            Field::Email => {
                text_match(field, operator, value.trim().to_lowercase()).map(Condition::Email)
            }
            Field::Company => {
                text_match(field, operator, value.to_lowercase()).map(Condition::Company)
            }
            Field::Location => {
                text_match(field, operator, value.to_lowercase()).map(Condition::Location)
            }
            Field::CreateDate => {
                let bound = || {
                    if value.trim().is_empty() {
                        return Ok(None);
                    }
                    parse_timestamp(value)
                        .map(Some)
                        .ok_or_else(|| FilterError::InvalidDate(value.to_string()))
                };
                match operator {
                    Operator::IsSet => Ok(Condition::CreateDate(DateMatch::IsSet)),
                    Operator::IsBlank => Ok(Condition::CreateDate(DateMatch::IsBlank)),
                    Operator::Before => Ok(Condition::CreateDate(DateMatch::Before(bound()?))),
                    Operator::After => Ok(Condition::CreateDate(DateMatch::After(bound()?))),
                    _ => Err(unsupported(field, operator)),
                }
            }
        }
    }

    /// Build a condition the way the dashboard always has: anything unrecognized
    /// passes every lead instead of failing the whole expression.
    pub fn lenient(raw: &RawCondition) -> Self {
        match Condition::try_from(raw) {
            Ok(condition) => condition,
            Err(FilterError::InvalidStage(value)) => {
                // No lead holds an unknown stage: `eq` never matches, `ne` always does
                let matches = raw.operator == Operator::Ne.as_str();
                warn!("Unknown stage '{}' in filter, treating as {}", value, matches);
                Condition::Constant(matches)
            }
            Err(FilterError::InvalidDate(value)) => {
                warn!("Unreadable date '{}' in filter", value);
                match raw.operator.as_str() {
                    "after" => Condition::CreateDate(DateMatch::After(None)),
                    _ => Condition::CreateDate(DateMatch::Before(None)),
                }
            }
            Err(e) => {
                warn!("Passing through filter condition: {}", e);
                Condition::Constant(true)
            }
        }
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        match self {
            Condition::Stage(StageMatch::Eq(stage)) => lead.stage() == *stage,
            Condition::Stage(StageMatch::Ne(stage)) => lead.stage() != *stage,
            Condition::Email(op) => email_matches(&lead.emails, op),
            Condition::Company(op) => text_matches(lead.company.as_deref(), op),
            Condition::Location(op) => text_matches(lead.location.as_deref(), op),
            Condition::CreateDate(op) => date_matches(lead.created_at, op),
            Condition::Constant(value) => *value,
        }
    }
}

fn unsupported(field: Field, operator: Operator) -> FilterError {
    FilterError::UnsupportedOperator {
        field: field.to_string(),
        operator: operator.to_string(),
    }
}

fn text_match(field: Field, operator: Operator, needle: String) -> Result<TextMatch> {
    match operator {
        Operator::Eq => Ok(TextMatch::Eq(needle)),
        Operator::Ne => Ok(TextMatch::Ne(needle)),
        Operator::Contains => Ok(TextMatch::Contains(needle)),
        Operator::NotContains => Ok(TextMatch::NotContains(needle)),
        Operator::IsSet => Ok(TextMatch::IsSet),
        Operator::IsBlank => Ok(TextMatch::IsBlank),
        Operator::Before | Operator::After => Err(unsupported(field, operator)),
    }
}

fn email_matches(emails: &[String], op: &TextMatch) -> bool {
    let exact = |needle: &str| {
        emails
            .iter()
            .any(|email| email.trim().to_lowercase() == needle)
    };
    let joined = || emails.join(" ").to_lowercase();

    match op {
        TextMatch::IsSet => !emails.is_empty(),
        TextMatch::IsBlank => emails.is_empty(),
        // An empty needle cannot match anything
        TextMatch::Eq(needle)
        | TextMatch::Ne(needle)
        | TextMatch::Contains(needle)
        | TextMatch::NotContains(needle)
            if needle.is_empty() =>
        {
            false
        }
        TextMatch::Eq(needle) => exact(needle),
        TextMatch::Ne(needle) => !exact(needle),
        TextMatch::Contains(needle) => joined().contains(needle.as_str()),
        TextMatch::NotContains(needle) => !joined().contains(needle.as_str()),
    }
}

fn text_matches(value: Option<&str>, op: &TextMatch) -> bool {
    let is_set = value.is_some_and(|v| !v.is_empty());
    let haystack = value.unwrap_or("").to_lowercase();

    match op {
        TextMatch::Eq(needle) => haystack == *needle,
        TextMatch::Ne(needle) => haystack != *needle,
        TextMatch::Contains(needle) => haystack.contains(needle.as_str()),
        TextMatch::NotContains(needle) => !haystack.contains(needle.as_str()),
        TextMatch::IsSet => is_set,
        TextMatch::IsBlank => !is_set,
    }
}

fn date_matches(created_at: Option<DateTime<Utc>>, op: &DateMatch) -> bool {
    match (op, created_at) {
        (DateMatch::IsSet, date) => date.is_some(),
        (DateMatch::IsBlank, date) => date.is_none(),
        (DateMatch::Before(Some(bound)), Some(date)) => date < *bound,
        (DateMatch::After(Some(bound)), Some(date)) => date > *bound,
        (DateMatch::Before(_) | DateMatch::After(_), _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use leadstage_core::StageSource;
    use rstest::rstest;

    fn lead() -> Lead {
        Lead::new(3, "Hannah Turner")
            .with_emails(["antar.work.acc@gmail.com", "Hannah.T@SecureFrame.com "])
            .with_company("SecureFrame")
            .with_location("United States")
            .with_created_at(Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap())
            .with_stage(Stage::Contacted, StageSource::Ai, Utc::now(), None)
    }

    fn bare_lead() -> Lead {
        Lead::new(4, "Will Anastas")
    }

    fn check(field: &str, operator: &str, value: Option<&str>, lead: &Lead) -> bool {
        let raw = RawCondition::new(field, operator, value);
        Condition::try_from(&raw).unwrap().matches(lead)
    }

    #[rstest]
    #[case("eq", "CONTACTED", true)]
    #[case("eq", "ENGAGED", false)]
    #[case("ne", "CONTACTED", false)]
    #[case("ne", "ENGAGED", true)]
    fn test_stage_condition(#[case] operator: &str, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(check("stage", operator, Some(value), &lead()), expected);
    }

    #[rstest]
    #[case("eq", Some("hannah.t@secureframe.com"), true)]
    #[case("eq", Some("  HANNAH.T@secureframe.com "), true)]
    #[case("eq", Some("secureframe.com"), false)]
    #[case("ne", Some("hannah.t@secureframe.com"), false)]
    #[case("ne", Some("someone@else.com"), true)]
    #[case("contains", Some("GMAIL"), true)]
    #[case("contains", Some("acc@gmail.com hannah"), true)]
    #[case("not_contains", Some("gmail"), false)]
    #[case("is_set", None, true)]
    #[case("is_blank", None, false)]
    fn test_email_condition(
        #[case] operator: &str,
        #[case] value: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(check("email", operator, value, &lead()), expected);
    }

    #[rstest]
    #[case("eq")]
    #[case("ne")]
    #[case("contains")]
    #[case("not_contains")]
    fn test_blank_email_value_never_matches(#[case] operator: &str) {
        assert!(!check("email", operator, Some(""), &lead()));
        assert!(!check("email", operator, Some("   "), &lead()));
        assert!(!check("email", operator, None, &bare_lead()));
    }

    #[test]
    fn test_email_presence_on_bare_lead() {
        assert!(!check("email", "is_set", None, &bare_lead()));
        assert!(check("email", "is_blank", Some("ignored"), &bare_lead()));
    }

    #[rstest]
    #[case("company", "eq", Some("secureframe"), true)]
    #[case("company", "contains", Some("Frame"), true)]
    #[case("company", "not_contains", Some("frame"), false)]
    #[case("company", "is_set", None, true)]
    #[case("location", "eq", Some("united states"), true)]
    #[case("location", "ne", Some("Canada"), true)]
    #[case("location", "is_blank", None, false)]
    fn test_single_valued_text(
        #[case] field: &str,
        #[case] operator: &str,
        #[case] value: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(check(field, operator, value, &lead()), expected);
    }

    #[test]
    fn test_missing_company_is_empty_text() {
        let lead = bare_lead();
        assert!(check("company", "is_blank", None, &lead));
        assert!(!check("company", "is_set", None, &lead));
        assert!(check("company", "eq", Some(""), &lead));
        assert!(check("company", "ne", Some("acme"), &lead));
        assert!(!check("company", "contains", Some("acme"), &lead));
    }

    #[rstest]
    #[case("before", Some("2024-03-11"), true)]
    #[case("before", Some("2024-03-10"), false)]
    #[case("after", Some("2024-03-10"), true)]
    #[case("after", Some("2024-03-10T10:00:00Z"), false)]
    #[case("before", None, false)]
    #[case("after", Some(""), false)]
    #[case("is_set", None, true)]
    #[case("is_blank", None, false)]
    fn test_create_date_condition(
        #[case] operator: &str,
        #[case] value: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(check("createDate", operator, value, &lead()), expected);
    }

    #[test]
    fn test_create_date_missing_on_lead() {
        let lead = bare_lead();
        assert!(!check("createDate", "before", Some("2030-01-01"), &lead));
        assert!(!check("createDate", "after", Some("2000-01-01"), &lead));
        assert!(check("createDate", "is_blank", None, &lead));
    }

    #[test]
    fn test_strict_build_rejects_invalid_pairs() {
        let err = Condition::try_from(&RawCondition::new("phone", "eq", Some("1"))).unwrap_err();
        assert!(matches!(err, FilterError::UnknownField(f) if f == "phone"));

        let err = Condition::try_from(&RawCondition::new("email", "starts_with", Some("a")))
            .unwrap_err();
        assert!(matches!(err, FilterError::UnknownOperator(_)));

        let err = Condition::try_from(&RawCondition::new("stage", "contains", Some("NEW")))
            .unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedOperator { .. }));

        let err = Condition::try_from(&RawCondition::new("createDate", "eq", Some("2024-01-01")))
            .unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedOperator { .. }));

        let err = Condition::try_from(&RawCondition::new("stage", "eq", Some("WON"))).unwrap_err();
        assert!(matches!(err, FilterError::InvalidStage(_)));

        let err = Condition::try_from(&RawCondition::new("createDate", "before", Some("soon")))
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidDate(_)));
    }

    #[test]
    fn test_lenient_build_passes_through() {
        let lead = lead();
        let unknown_field = Condition::lenient(&RawCondition::new("phone", "eq", Some("1")));
        assert_eq!(unknown_field, Condition::Constant(true));
        assert!(unknown_field.matches(&lead));

        let unsupported = Condition::lenient(&RawCondition::new("stage", "contains", Some("NEW")));
        assert!(unsupported.matches(&lead));

        let unknown_stage_eq = Condition::lenient(&RawCondition::new("stage", "eq", Some("WON")));
        assert!(!unknown_stage_eq.matches(&lead));
        let unknown_stage_ne = Condition::lenient(&RawCondition::new("stage", "ne", Some("WON")));
        assert!(unknown_stage_ne.matches(&lead));

        let bad_date = Condition::lenient(&RawCondition::new("createDate", "after", Some("soon")));
        assert_eq!(bad_date, Condition::CreateDate(DateMatch::After(None)));
        assert!(!bad_date.matches(&lead));
    }
}
