//! Clause tracing
//!
//! Every (keyword, paragraph) pair that clears the matcher threshold is one
//! piece of evidence. Hits are not deduplicated: a paragraph matched by two
//! keywords of the same clause appears twice. A blank keyword scores 0
//! against every paragraph, so it never produces evidence.

use shared_types::{ClauseResult, ClauseTrace, KeywordMatch, MatchEvidence};

use crate::catalog::Catalog;
use crate::error::TraceError;
use crate::matcher::FuzzyMatcher;
use crate::segment::Paragraph;

/// Trace every catalog clause against the paragraphs.
///
/// Order is catalog order, then keyword order, then paragraph order. A clause
/// with no keywords at all fails the whole trace.
pub fn trace(
    paragraphs: &[Paragraph],
    catalog: &Catalog,
    matcher: &FuzzyMatcher,
) -> Result<ClauseTrace, TraceError> {
    let mut results = ClauseTrace::new();

    for clause in catalog.clauses() {
        if clause.keywords.is_empty() {
            return Err(TraceError::NoKeywords(clause.id.clone()));
        }

        let mut matched = Vec::new();
        for keyword in clause.keywords.iter().filter(|k| !k.trim().is_empty()) {
            matched.extend(
                paragraphs
                    .iter()
                    .filter(|p| matcher.is_evidence(keyword, &p.text))
                    .map(|p| MatchEvidence {
                        paragraph_number: p.number,
                        snippet: p.text.clone(),
                        keyword: keyword.clone(),
                    }),
            );
        }

        results.insert(ClauseResult::new(clause, matched));
    }

    Ok(results)
}

/// Flat list of keyword hits, located as "Paragraph N"
pub fn find_matches(
    paragraphs: &[Paragraph],
    keywords: &[String],
    matcher: &FuzzyMatcher,
) -> Vec<KeywordMatch> {
    let mut matches = Vec::new();
    for keyword in keywords.iter().filter(|k| !k.trim().is_empty()) {
        for paragraph in paragraphs {
            if matcher.is_evidence(keyword, &paragraph.text) {
                matches.push(KeywordMatch {
                    keyword: keyword.clone(),
                    matched: paragraph.text.clone(),
                    location: format!("Paragraph {}", paragraph.number),
                });
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::segment::segment;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::{ClauseDefinition, ClauseStatus, Severity};

    fn clause(id: &str, keywords: &[&str]) -> ClauseDefinition {
        ClauseDefinition {
            id: id.to_string(),
            title: id.to_string(),
            severity: Severity::High,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            recommendation: String::new(),
            required: true,
        }
    }

    #[test]
    fn test_found_clause_records_paragraph() {
        let catalog = Catalog::from_clauses([clause("ppe", &["personal protective equipment"])]);
        let paragraphs = segment(
            "All workers must wear personal protective equipment at all times.\nTraining is mandatory.",
        );

        let trace = trace(&paragraphs, &catalog, &FuzzyMatcher::default()).unwrap();
        let result = trace.get("ppe").unwrap();

        assert_eq!(result.status, ClauseStatus::Found);
        assert_eq!(
            result.matched_paragraphs,
            vec![MatchEvidence {
                paragraph_number: 1,
                snippet: "All workers must wear personal protective equipment at all times."
                    .to_string(),
                keyword: "personal protective equipment".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_clause_has_no_evidence() {
        let catalog = Catalog::from_clauses([clause("ppe", &["personal protective equipment"])]);
        let trace = trace(
            &segment("No relevant content here."),
            &catalog,
            &FuzzyMatcher::default(),
        )
        .unwrap();

        let result = trace.get("ppe").unwrap();
        assert_eq!(result.status, ClauseStatus::Missing);
        assert!(result.matched_paragraphs.is_empty());
    }

    #[test]
    fn test_keyword_hits_are_not_deduplicated() {
        let catalog = Catalog::from_clauses([clause("ppe", &["ppe", "safety gear"])]);
        let paragraphs = segment("Intro\nPPE and safety gear are issued on day one.");

        let trace = trace(&paragraphs, &catalog, &FuzzyMatcher::default()).unwrap();
        let hits: Vec<(usize, &str)> = trace
            .get("ppe")
            .unwrap()
            .matched_paragraphs
            .iter()
            .map(|e| (e.paragraph_number, e.keyword.as_str()))
            .collect();

        assert_eq!(hits, vec![(2, "ppe"), (2, "safety gear")]);
    }

    #[test]
    fn test_results_follow_catalog_order() {
        let trace = trace(
            &segment("Emergency drill held in March."),
            &builtin_catalog(),
            &FuzzyMatcher::default(),
        )
        .unwrap();

        assert_eq!(
            trace.ids().collect::<Vec<_>>(),
            vec!["Emergency Drill", "PPE Requirements", "Safety Training", "Incident Reporting"]
        );
        assert_eq!(trace.get("Emergency Drill").unwrap().status, ClauseStatus::Found);
    }

    #[test]
    fn test_clause_without_keywords_fails_whole_trace() {
        let catalog = Catalog::from_clauses([clause("ok", &["ppe"]), clause("bad", &[])]);
        assert_eq!(
            trace(&segment("ppe"), &catalog, &FuzzyMatcher::default()),
            Err(TraceError::NoKeywords("bad".to_string()))
        );
    }

    #[test]
    fn test_blank_keyword_never_matches() {
        let catalog = Catalog::from_clauses([
            clause("mixed", &["ppe", "  ", ""]),
            clause("blank", &[" "]),
        ]);
        let trace = trace(
            &segment("Wear PPE on site.
A b c d."),
            &catalog,
            &FuzzyMatcher::new(0),
        )
        .unwrap();

        let keywords: Vec<&str> = trace
            .get("mixed")
            .unwrap()
            .matched_paragraphs
            .iter()
            .map(|e| e.keyword.as_str())
            .collect();
        assert_eq!(keywords, vec!["ppe", "ppe"]);

        let blank = trace.get("blank").unwrap();
        assert_eq!(blank.status, ClauseStatus::Missing);
        assert!(blank.matched_paragraphs.is_empty());
    }

    #[test]
    fn test_empty_document_marks_everything_missing() {
        let trace = trace(&[], &builtin_catalog(), &FuzzyMatcher::default()).unwrap();
        assert_eq!(trace.len(), 4);
        assert!(trace.iter().all(|r| r.status == ClauseStatus::Missing));
    }

    #[test]
    fn test_find_matches_locations() {
        let paragraphs = segment("Header\n\nReport every near miss.\nFile an incident report.");
        let keywords = vec!["near miss".to_string(), "incident report".to_string()];

        let matches = find_matches(&paragraphs, &keywords, &FuzzyMatcher::default());
        let located: Vec<(&str, &str)> = matches
            .iter()
            .map(|m| (m.keyword.as_str(), m.location.as_str()))
            .collect();

        assert_eq!(
            located,
            vec![("near miss", "Paragraph 2"), ("incident report", "Paragraph 3")]
        );
    }

    fn arb_clause() -> impl Strategy<Value = ClauseDefinition> {
        (
            "[a-z]{1,8}",
            proptest::collection::vec("[a-z]{2,10}( [a-z]{2,10})?", 1..4),
        )
            .prop_map(|(id, keywords)| ClauseDefinition {
                id: id.clone(),
                title: id,
                severity: Severity::Medium,
                keywords,
                recommendation: String::new(),
                required: true,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn one_result_per_clause(
            clauses in proptest::collection::vec(arb_clause(), 0..6),
            lines in proptest::collection::vec("[a-z ]{0,40}", 0..6),
        ) {
            let catalog = Catalog::from_clauses(clauses);
            let paragraphs = segment(&lines.join("\n"));
            let trace = trace(&paragraphs, &catalog, &FuzzyMatcher::default()).unwrap();

            prop_assert_eq!(trace.len(), catalog.len());
            for result in &trace {
                prop_assert_eq!(
                    result.status == ClauseStatus::Missing,
                    result.matched_paragraphs.is_empty()
                );
            }
        }

        #[test]
        fn trace_is_idempotent(
            clauses in proptest::collection::vec(arb_clause(), 1..4),
            lines in proptest::collection::vec("[a-z ]{0,40}", 0..6),
        ) {
            let catalog = Catalog::from_clauses(clauses);
            let paragraphs = segment(&lines.join("\n"));
            let matcher = FuzzyMatcher::default();

            prop_assert_eq!(
                trace(&paragraphs, &catalog, &matcher),
                trace(&paragraphs, &catalog, &matcher)
            );
        }
    }
}
