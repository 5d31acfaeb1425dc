pub mod reports;
pub mod types;

pub use reports::{
    AnalysisReport, DrillStatus, PpeStatus, RequiredClauseFinding, RequiredClauseReport,
    RequirementResult, RuleTableReport,
};
pub use types::{
    ClauseDefinition, ClauseResult, ClauseStatus, ClauseTrace, ComplianceSummary, KeywordMatch,
    MatchEvidence, MissingClause, RiskLevel, Severity,
};
