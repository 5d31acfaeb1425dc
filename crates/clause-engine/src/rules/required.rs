// Verbatim required-clause checklist
use shared_types::{
    ClauseStatus, DrillStatus, PpeStatus, RequiredClauseFinding, RequiredClauseReport, RiskLevel,
};

use crate::catalog::Checklist;
use crate::patterns::contains_any_keyword;

/// Missing-clause counts above which the checklist risk escalates
const HIGH_RISK_ABOVE: usize = 5;
const MEDIUM_RISK_ABOVE: usize = 2;

/// Check the whole document against the catalog checklist
pub fn check_required_clauses(text: &str, checklist: &Checklist) -> RequiredClauseReport {
    let text_lower = text.to_lowercase();

    let missing_clauses: Vec<RequiredClauseFinding> = checklist
        .required_clauses
        .iter()
        .filter(|clause| !text_lower.contains(&clause.text.to_lowercase()))
        .map(|clause| RequiredClauseFinding {
            id: clause.id.clone(),
            text: clause.text.clone(),
            status: ClauseStatus::Missing,
        })
        .collect();

    let risk_level = match missing_clauses.len() {
        n if n > HIGH_RISK_ABOVE => RiskLevel::High,
        n if n > MEDIUM_RISK_ABOVE => RiskLevel::Medium,
        _ => RiskLevel::Low,
    };

    let ppe_update_status = if contains_any_keyword(&text_lower, &checklist.ppe_keywords) {
        PpeStatus::UpToDate
    } else {
        PpeStatus::NeedsUpdate
    };

    let emergency_drill_status = if contains_any_keyword(&text_lower, &checklist.drill_keywords) {
        DrillStatus::Compliant
    } else {
        DrillStatus::NonCompliant
    };

    RequiredClauseReport {
        risk_level,
        missing_clauses_count: missing_clauses.len(),
        ppe_update_status,
        emergency_drill_status,
        missing_clauses,
    }
}
