// Risk aggregation over a clause trace
use shared_types::{ClauseTrace, ComplianceSummary, MissingClause, RiskLevel, Severity};

/// Roll a trace up into counts by severity and an overall risk level.
///
/// `total_clauses` is the size of the trace as given; an empty trace (failed or
/// filtered upstream) summarizes to zero clauses at Low risk.
pub fn summarize(trace: &ClauseTrace) -> ComplianceSummary {
    let mut high = 0;
    let mut medium = 0;
    let mut low = 0;
    let mut missing_clauses_list = Vec::new();

    for result in trace.iter().filter(|r| r.is_missing()) {
        match result.severity {
            Severity::High => high += 1,
            Severity::Medium => medium += 1,
            Severity::Low => low += 1,
        }
        missing_clauses_list.push(MissingClause {
            name: result.id.clone(),
            severity: result.severity,
            required: result.required,
        });
    }

    ComplianceSummary {
        total_clauses: trace.len(),
        missing_clauses: missing_clauses_list.len(),
        high_risk_missing: high,
        medium_risk_missing: medium,
        low_risk_missing: low,
        missing_clauses_list,
        risk_level: RiskLevel::from_missing_counts(high, medium),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{ClauseDefinition, ClauseResult, MatchEvidence};

    fn result(id: &str, severity: Severity, found: bool) -> ClauseResult {
        let clause = ClauseDefinition {
            id: id.to_string(),
            title: id.to_string(),
            severity,
            keywords: vec![id.to_string()],
            recommendation: String::new(),
            required: true,
        };
        let evidence = if found {
            vec![MatchEvidence {
                paragraph_number: 1,
                snippet: id.to_string(),
                keyword: id.to_string(),
            }]
        } else {
            vec![]
        };
        ClauseResult::new(&clause, evidence)
    }

    #[test]
    fn test_one_high_missing_is_high_risk() {
        let trace: ClauseTrace = vec![
            result("a", Severity::Medium, false),
            result("b", Severity::High, false),
            result("c", Severity::Medium, false),
            result("d", Severity::Low, true),
        ]
        .into_iter()
        .collect();

        let summary = summarize(&trace);
        assert_eq!(summary.risk_level, RiskLevel::High);
        assert_eq!(summary.total_clauses, 4);
        assert_eq!(summary.missing_clauses, 3);
        assert_eq!(summary.high_risk_missing, 1);
        assert_eq!(summary.medium_risk_missing, 2);
        assert_eq!(summary.low_risk_missing, 0);
        let names: Vec<&str> = summary
            .missing_clauses_list
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_medium_and_low_risk() {
        let trace: ClauseTrace = vec![
            result("a", Severity::High, true),
            result("b", Severity::Medium, false),
        ]
        .into_iter()
        .collect();
        assert_eq!(summarize(&trace).risk_level, RiskLevel::Medium);

        let trace: ClauseTrace = vec![result("a", Severity::Low, false)].into_iter().collect();
        let summary = summarize(&trace);
        assert_eq!(summary.risk_level, RiskLevel::Low);
        assert_eq!(summary.low_risk_missing, 1);
    }

    #[test]
    fn test_nothing_missing_is_low() {
        let trace: ClauseTrace = vec![result("a", Severity::High, true)].into_iter().collect();
        let summary = summarize(&trace);
        assert_eq!(summary.risk_level, RiskLevel::Low);
        assert_eq!(summary.missing_clauses, 0);
        assert!(summary.missing_clauses_list.is_empty());
    }

    #[test]
    fn test_empty_trace() {
        let summary = summarize(&ClauseTrace::new());
        assert_eq!(summary.total_clauses, 0);
        assert_eq!(summary.risk_level, RiskLevel::Low);
    }
}
