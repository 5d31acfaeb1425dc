//! Clause catalog and traceability data model

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How serious a missing clause is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// Parse a catalog severity label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single compliance requirement the engine searches for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseDefinition {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    /// Phrases to look for, in search order. Never empty.
    pub keywords: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// One paragraph judged to satisfy one keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvidence {
    /// 1-based paragraph position
    pub paragraph_number: usize,
    pub snippet: String,
    pub keyword: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClauseStatus {
    Found,
    Missing,
}

impl ClauseStatus {
    /// Found iff at least one piece of evidence exists
    pub fn from_evidence(evidence: &[MatchEvidence]) -> Self {
        if evidence.is_empty() {
            ClauseStatus::Missing
        } else {
            ClauseStatus::Found
        }
    }
}

/// Per-clause outcome of a trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseResult {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub recommendation: String,
    pub status: ClauseStatus,
    pub matched_paragraphs: Vec<MatchEvidence>,
    pub required: bool,
}

impl ClauseResult {
    /// Build a result for `clause`; the status is derived from `matched_paragraphs`
    pub fn new(clause: &ClauseDefinition, matched_paragraphs: Vec<MatchEvidence>) -> Self {
        Self {
            id: clause.id.clone(),
            title: clause.title.clone(),
            severity: clause.severity,
            recommendation: clause.recommendation.clone(),
            status: ClauseStatus::from_evidence(&matched_paragraphs),
            matched_paragraphs,
            required: clause.required,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.status == ClauseStatus::Missing
    }
}

/// Ordered mapping of clause id to result, in catalog order.
///
/// Serializes as a JSON object whose key order follows the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseTrace {
    results: Vec<ClauseResult>,
}

impl ClauseTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result. A result with an id already present replaces it in place.
    pub fn insert(&mut self, result: ClauseResult) {
        match self.results.iter_mut().find(|r| r.id == result.id) {
            Some(existing) => *existing = result,
            None => self.results.push(result),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ClauseResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClauseResult> {
        self.results.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.id.as_str())
    }
}

impl FromIterator<ClauseResult> for ClauseTrace {
    fn from_iter<I: IntoIterator<Item = ClauseResult>>(iter: I) -> Self {
        let mut trace = ClauseTrace::new();
        for result in iter {
            trace.insert(result);
        }
        trace
    }
}

impl<'a> IntoIterator for &'a ClauseTrace {
    type Item = &'a ClauseResult;
    type IntoIter = std::slice::Iter<'a, ClauseResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl Serialize for ClauseTrace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.results.len()))?;
        for result in &self.results {
            map.serialize_entry(&result.id, result)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClauseTrace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TraceVisitor;

        impl<'de> Visitor<'de> for TraceVisitor {
            type Value = ClauseTrace;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of clause id to clause result")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut trace = ClauseTrace::new();
                while let Some((_id, result)) = access.next_entry::<String, ClauseResult>()? {
                    trace.insert(result);
                }
                Ok(trace)
            }
        }

        deserializer.deserialize_map(TraceVisitor)
    }
}

/// Three-level rollup of missing-clause severities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Highest severity with a missing clause wins; nothing missing is Low
    pub fn from_missing_counts(high: usize, medium: usize) -> Self {
        if high > 0 {
            RiskLevel::High
        } else if medium > 0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingClause {
    pub name: String,
    pub severity: Severity,
    pub required: bool,
}

/// Aggregate view of a trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_clauses: usize,
    pub missing_clauses: usize,
    pub high_risk_missing: usize,
    pub medium_risk_missing: usize,
    pub low_risk_missing: usize,
    pub missing_clauses_list: Vec<MissingClause>,
    pub risk_level: RiskLevel,
}

/// Flat keyword hit, located by paragraph label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    #[serde(rename = "match")]
    pub matched: String,
    /// e.g. "Paragraph 3"
    pub location: String,
}
