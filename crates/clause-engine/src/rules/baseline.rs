// Severity-table analysis: five fixed safety rules, literal keyword search
use shared_types::{
    ClauseStatus, MatchEvidence, RequirementResult, RiskLevel, RuleTableReport, Severity,
};

use crate::patterns::{
    first_keyword_in, truncate_snippet, EMERGENCY_KEYWORDS, INCIDENT_KEYWORDS, PPE_KEYWORDS,
    RISK_ASSESSMENT_KEYWORDS, TRAINING_KEYWORDS,
};
use crate::segment::Paragraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineRule {
    pub id: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub keywords: &'static [&'static str],
    pub recommendation: &'static str,
}

pub const BASELINE_RULES: &[BaselineRule] = &[
    BaselineRule {
        id: "safety_training",
        title: "Safety Training Requirements",
        severity: Severity::High,
        keywords: TRAINING_KEYWORDS,
        recommendation: "Ensure all employees complete mandatory safety training",
    },
    BaselineRule {
        id: "ppe_requirements",
        title: "Personal Protective Equipment",
        severity: Severity::High,
        keywords: PPE_KEYWORDS,
        recommendation: "Provide and maintain appropriate PPE for all workers",
    },
    BaselineRule {
        id: "emergency_procedures",
        title: "Emergency Response Procedures",
        severity: Severity::High,
        keywords: EMERGENCY_KEYWORDS,
        recommendation: "Maintain up-to-date emergency response procedures",
    },
    BaselineRule {
        id: "incident_reporting",
        title: "Incident Reporting",
        severity: Severity::Medium,
        keywords: INCIDENT_KEYWORDS,
        recommendation: "Implement comprehensive incident reporting system",
    },
    BaselineRule {
        id: "risk_assessment",
        title: "Risk Assessment",
        severity: Severity::Medium,
        keywords: RISK_ASSESSMENT_KEYWORDS,
        recommendation: "Conduct regular risk assessments",
    },
];

/// Check the paragraphs against [`BASELINE_RULES`].
///
/// Each paragraph contributes at most one hit per rule: the first table keyword
/// it contains. Snippets are truncated.
pub fn check_rule_table(paragraphs: &[Paragraph]) -> RuleTableReport {
    let lowered: Vec<String> = paragraphs.iter().map(|p| p.text.to_lowercase()).collect();

    let mut missing_requirements = Vec::new();
    let mut compliant_requirements = Vec::new();

    for rule in BASELINE_RULES {
        let matched_paragraphs: Vec<MatchEvidence> = paragraphs
            .iter()
            .zip(&lowered)
            .filter_map(|(paragraph, text_lower)| {
                first_keyword_in(text_lower, rule.keywords).map(|keyword| MatchEvidence {
                    paragraph_number: paragraph.number,
                    snippet: truncate_snippet(&paragraph.text),
                    keyword: keyword.to_string(),
                })
            })
            .collect();

        let requirement = RequirementResult {
            id: rule.id.to_string(),
            title: rule.title.to_string(),
            severity: rule.severity,
            status: ClauseStatus::from_evidence(&matched_paragraphs),
            recommendation: rule.recommendation.to_string(),
            matched_paragraphs,
        };

        match requirement.status {
            ClauseStatus::Found => compliant_requirements.push(requirement),
            ClauseStatus::Missing => missing_requirements.push(requirement),
        }
    }

    let count = |severity: Severity| {
        missing_requirements
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    };
    let high_risk_missing = count(Severity::High);
    let medium_risk_missing = count(Severity::Medium);
    let low_risk_missing = count(Severity::Low);

    RuleTableReport {
        risk_level: RiskLevel::from_missing_counts(high_risk_missing, medium_risk_missing),
        total_clauses: BASELINE_RULES.len(),
        missing_clauses: missing_requirements.len(),
        high_risk_missing,
        medium_risk_missing,
        low_risk_missing,
        missing_requirements,
        compliant_requirements,
    }
}
