// ABOUTME: Inline filter expressions for Leadstage
// ABOUTME: Typed field conditions joined by AND/OR connectors, evaluated as a left fold

pub mod condition;
pub mod error;
pub mod expression;

pub use condition::{Condition, DateMatch, Field, Operator, RawCondition, StageMatch, TextMatch};
pub use error::{FilterError, Result};
pub use expression::{apply_filter, CompiledFilter, ExpressionItem, FilterExpression, Logic};
