//! Literal-match analyses that run alongside fuzzy clause tracing
//!
//! - `baseline`: fixed severity table checked paragraph by paragraph
//! - `required`: catalog checklist of verbatim clauses and status keywords

pub mod baseline;
pub mod required;

pub use baseline::{check_rule_table, BaselineRule, BASELINE_RULES};
pub use required::check_required_clauses;
