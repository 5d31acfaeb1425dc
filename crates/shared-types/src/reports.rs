//! Report shapes returned to the presentation layer

use serde::{Deserialize, Serialize};

use crate::types::{
    ClauseStatus, ClauseTrace, ComplianceSummary, MatchEvidence, RiskLevel, Severity,
};

/// One row of the built-in severity table after analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementResult {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub status: ClauseStatus,
    pub recommendation: String,
    pub matched_paragraphs: Vec<MatchEvidence>,
}

/// Severity-table analysis of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTableReport {
    pub risk_level: RiskLevel,
    pub missing_requirements: Vec<RequirementResult>,
    pub compliant_requirements: Vec<RequirementResult>,
    pub total_clauses: usize,
    pub missing_clauses: usize,
    pub high_risk_missing: usize,
    pub medium_risk_missing: usize,
    pub low_risk_missing: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredClauseFinding {
    pub id: String,
    pub text: String,
    pub status: ClauseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PpeStatus {
    #[serde(rename = "Up to date")]
    UpToDate,
    #[serde(rename = "Needs update")]
    NeedsUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrillStatus {
    Compliant,
    #[serde(rename = "Non-compliant")]
    NonCompliant,
}

/// Literal required-clause check driven by the catalog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredClauseReport {
    pub risk_level: RiskLevel,
    pub missing_clauses_count: usize,
    pub ppe_update_status: PpeStatus,
    pub emergency_drill_status: DrillStatus,
    pub missing_clauses: Vec<RequiredClauseFinding>,
}

/// Everything one analysis call produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub clause_traceability: ClauseTrace,
    /// Present when the caller asked for it
    pub summary: Option<ComplianceSummary>,
    pub compliance_report: RuleTableReport,
    pub required_clauses: RequiredClauseReport,
    /// Whether the external catalog was used instead of the built-in one
    pub config_loaded: bool,
    /// Unix timestamp (seconds)
    pub checked_at: u64,
}
