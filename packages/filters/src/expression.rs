// ABOUTME: Inline filter expressions with AND/OR connectors
// ABOUTME: Evaluated strictly left to right with no operator precedence

use crate::condition::{Condition, RawCondition};
use crate::error::Result;
use leadstage_core::Lead;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    fn combine(self, acc: bool, next: bool) -> bool {
        match self {
            Logic::And => acc && next,
            Logic::Or => acc || next,
        }
    }
}

/// One entry of the builder's flat list: either a condition or the connector joining two
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpressionItem {
    Connector { logic: Logic },
    Condition(RawCondition),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterExpression {
    #[serde(default)]
    pub conditions: Vec<ExpressionItem>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn condition(mut self, field: &str, operator: &str, value: Option<&str>) -> Self {
        self.conditions
            .push(ExpressionItem::Condition(RawCondition::new(field, operator, value)));
        self
    }

    pub fn and(mut self) -> Self {
        self.conditions.push(ExpressionItem::Connector { logic: Logic::And });
        self
    }

    pub fn or(mut self) -> Self {
        self.conditions.push(ExpressionItem::Connector { logic: Logic::Or });
        self
    }

    fn split(&self) -> (Vec<&RawCondition>, Vec<Logic>) {
        let mut conditions = Vec::new();
        let mut connectors = Vec::new();
        for item in &self.conditions {
            match item {
                ExpressionItem::Condition(raw) => conditions.push(raw),
                ExpressionItem::Connector { logic } => connectors.push(*logic),
            }
        }
        (conditions, connectors)
    }
}

/// Filter expression with every condition resolved to a typed predicate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    conditions: Vec<Condition>,
    connectors: Vec<Logic>,
}

impl CompiledFilter {
    /// Compile, failing on the first condition that cannot be interpreted
    pub fn compile(expression: &FilterExpression) -> Result<Self> {
        let (raw, connectors) = expression.split();
        let conditions = raw
            .into_iter()
            .map(Condition::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            conditions,
            connectors,
        })
    }

    /// Compile, letting uninterpretable conditions through
    pub fn compile_lenient(expression: &FilterExpression) -> Self {
        let (raw, connectors) = expression.split();
        Self {
            conditions: raw.into_iter().map(Condition::lenient).collect(),
            connectors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn connectors(&self) -> &[Logic] {
        &self.connectors
    }

    /// `((c0 op0 c1) op1 c2) ...` where `op(i-1)` joins condition `i`.
    /// Missing connectors read as AND; without any connectors every condition must hold.
    pub fn matches(&self, lead: &Lead) -> bool {
        if self.connectors.is_empty() {
            return self.conditions.iter().all(|c| c.matches(lead));
        }

        let mut results = self.conditions.iter().map(|c| c.matches(lead));
        let Some(first) = results.next() else {
            return true;
        };
        results.enumerate().fold(first, |acc, (i, next)| {
            let logic = self.connectors.get(i).copied().unwrap_or(Logic::And);
            logic.combine(acc, next)
        })
    }
}

/// Leads satisfying `filter`, in their original order. An empty filter keeps everything.
pub fn apply_filter<'a, I>(leads: I, filter: &CompiledFilter) -> Vec<&'a Lead>
where
    I: IntoIterator<Item = &'a Lead>,
{
    if filter.is_empty() {
        return leads.into_iter().collect();
    }

    let mut total = 0usize;
    let kept: Vec<&Lead> = leads
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|lead| filter.matches(lead))
        .collect();
    debug!(
        "Inline filter kept {} of {} leads ({} conditions)",
        kept.len(),
        total,
        filter.conditions.len()
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use chrono::Utc;
    use leadstage_core::{Stage, StageSource};
    use pretty_assertions::assert_eq;

    fn leads() -> Vec<Lead> {
        vec![
            Lead::new(1, "Sumit Kumar")
                .with_emails(["sumit@gmail.com"])
                .with_location("India"),
            Lead::new(2, "Shivangi Sharma")
                .with_location("India")
                .with_stage(Stage::Contacted, StageSource::Ai, Utc::now(), None),
            Lead::new(3, "Hannah Turner")
                .with_emails(["hannah@secureframe.com"])
                .with_location("United States")
                .with_stage(Stage::Engaged, StageSource::Manual, Utc::now(), None),
        ]
    }

    fn ids(leads: &[&Lead]) -> Vec<u64> {
        leads.iter().map(|l| l.id).collect()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let leads = leads();
        let filter = CompiledFilter::compile(&FilterExpression::new()).unwrap();
        assert!(filter.is_empty());
        assert_eq!(ids(&apply_filter(&leads, &filter)), vec![1, 2, 3]);
    }

    #[test]
    fn test_all_and_without_connectors() {
        let leads = leads();
        let expression = FilterExpression::new()
            .condition("location", "eq", Some("india"))
            .condition("email", "is_set", None);
        let filter = CompiledFilter::compile(&expression).unwrap();
        assert_eq!(ids(&apply_filter(&leads, &filter)), vec![1]);
    }

    #[test]
    fn test_or_connector() {
        let leads = leads();
        let expression = FilterExpression::new()
            .condition("stage", "eq", Some("ENGAGED"))
            .or()
            .condition("stage", "eq", Some("NEW"));
        let filter = CompiledFilter::compile(&expression).unwrap();
        assert_eq!(ids(&apply_filter(&leads, &filter)), vec![1, 3]);
    }

    #[test]
    fn test_left_fold_has_no_precedence() {
        // [true, true, false] joined by [OR, AND] folds to false.
        // AND-first precedence would give true.
        let lead = Lead::new(9, "Olivia Bennett").with_location("Canada");
        let expression = FilterExpression::new()
            .condition("location", "eq", Some("canada"))
            .or()
            .condition("stage", "eq", Some("NEW"))
            .and()
            .condition("email", "is_set", None);
        let filter = CompiledFilter::compile(&expression).unwrap();
        assert!(!filter.matches(&lead));

        // [true, false, true] joined by [OR, AND]
        let expression = FilterExpression::new()
            .condition("location", "eq", Some("canada"))
            .or()
            .condition("email", "is_set", None)
            .and()
            .condition("stage", "eq", Some("NEW"));
        let filter = CompiledFilter::compile(&expression).unwrap();
        assert!(filter.matches(&lead));
    }

    #[test]
    fn test_missing_connector_defaults_to_and() {
        let lead = Lead::new(9, "Olivia Bennett").with_location("Canada");
        // Three conditions, one connector: the second join falls back to AND
        let expression = FilterExpression::new()
            .condition("email", "is_set", None)
            .or()
            .condition("location", "eq", Some("canada"))
            .condition("company", "is_set", None);
        let filter = CompiledFilter::compile(&expression).unwrap();
        assert_eq!(filter.connectors(), &[Logic::Or]);
        assert!(!filter.matches(&lead));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let leads = leads();
        let expression = FilterExpression::new()
            .condition("location", "contains", Some("ind"))
            .or()
            .condition("email", "contains", Some("secureframe"));
        let filter = CompiledFilter::compile(&expression).unwrap();

        let once: Vec<Lead> = apply_filter(&leads, &filter).into_iter().cloned().collect();
        let twice = apply_filter(&once, &filter);
        assert_eq!(ids(&twice), once.iter().map(|l| l.id).collect::<Vec<_>>());
    }

    #[test]
    fn test_blank_email_contains_matches_nothing() {
        let leads = leads();
        let expression = FilterExpression::new().condition("email", "contains", Some(" "));
        let filter = CompiledFilter::compile(&expression).unwrap();
        assert!(apply_filter(&leads, &filter).is_empty());
    }

    #[test]
    fn test_strict_compile_rejects_unknown_field() {
        let expression = FilterExpression::new()
            .condition("stage", "eq", Some("NEW"))
            .and()
            .condition("phone", "eq", Some("555"));
        let err = CompiledFilter::compile(&expression).unwrap_err();
        assert!(matches!(err, FilterError::UnknownField(_)));
    }

    #[test]
    fn test_lenient_compile_passes_unknown_through() {
        let leads = leads();
        let expression = FilterExpression::new()
            .condition("stage", "eq", Some("NEW"))
            .and()
            .condition("phone", "eq", Some("555"));
        let filter = CompiledFilter::compile_lenient(&expression);
        assert_eq!(ids(&apply_filter(&leads, &filter)), vec![1]);
    }

    #[test]
    fn test_expression_from_json() {
        let json = r#"{
            "conditions": [
                {"field": "stage", "operator": "eq", "value": "ENGAGED"},
                {"logic": "OR"},
                {"field": "email", "operator": "is_blank"}
            ]
        }"#;
        let expression = FilterExpression::from_json(json).unwrap();
        assert_eq!(
            expression,
            FilterExpression::new()
                .condition("stage", "eq", Some("ENGAGED"))
                .or()
                .condition("email", "is_blank", None)
        );

        let leads = leads();
        let filter = CompiledFilter::compile(&expression).unwrap();
        assert_eq!(ids(&apply_filter(&leads, &filter)), vec![2, 3]);
    }

    #[test]
    fn test_expression_from_json_rejects_garbage() {
        assert!(matches!(
            FilterExpression::from_json("{\"conditions\": 5}"),
            Err(FilterError::Json(_))
        ));
        assert_eq!(FilterExpression::from_json("{}").unwrap(), FilterExpression::new());
    }
}
