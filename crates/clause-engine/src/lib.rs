//! Compliance clause traceability
//!
//! Given plain document text and a clause catalog, decides per clause whether
//! the document contains evidence for it, where that evidence is, and rolls the
//! findings up into a risk-scored summary.
//!
//! Pipeline: text → [`segment`] → paragraphs; paragraphs + [`Catalog`] →
//! [`tracer::trace`] → per-clause results; results → [`summarize`].
//!
//! Nothing here raises to the caller: a catalog that cannot be loaded is
//! replaced by the built-in one, and a trace that fails yields an empty result.

pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod patterns;
pub mod rules;
pub mod segment;
pub mod summary;
pub mod tracer;

pub use catalog::{builtin_catalog, catalog_or_builtin, load_catalog, Catalog, Checklist};
pub use config::EngineConfig;
pub use error::{CatalogError, ConfigError, TraceError};
pub use matcher::{partial_ratio, FuzzyMatcher, DEFAULT_THRESHOLD};
pub use segment::{segment, Paragraph};
pub use summary::summarize;

use shared_types::{
    AnalysisReport, ClauseTrace, ComplianceSummary, KeywordMatch, RequiredClauseReport,
    RuleTableReport,
};
use tracing::{debug, error};

/// What an [`ClauseEngine::analyze`] call should include
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub include_summary: bool,
}

/// ClauseEngine entry point.
///
/// The catalog is fixed at construction and only read afterwards, so one
/// engine can serve concurrent callers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ClauseEngine {
    catalog: Catalog,
    matcher: FuzzyMatcher,
    config_loaded: bool,
}

impl ClauseEngine {
    /// Load the catalog named by `config`, falling back to the built-in one
    pub fn new(config: &EngineConfig) -> Self {
        let (catalog, config_loaded) = catalog_or_builtin(load_catalog(&config.rules_file));
        Self {
            catalog,
            matcher: FuzzyMatcher::new(config.match_threshold),
            config_loaded,
        }
    }

    /// Use an explicit catalog with the default threshold
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            matcher: FuzzyMatcher::default(),
            config_loaded: true,
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.matcher = FuzzyMatcher::new(threshold);
        self
    }

    /// Whether the external catalog was used
    pub fn config_loaded(&self) -> bool {
        self.config_loaded
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn threshold(&self) -> u8 {
        self.matcher.threshold()
    }

    /// Every paragraph matching any of `keywords`
    pub fn find_matches(&self, text: &str, keywords: &[String]) -> Vec<KeywordMatch> {
        tracer::find_matches(&segment(text), keywords, &self.matcher)
    }

    /// Trace every catalog clause. Returns an empty trace if tracing fails.
    pub fn trace_clauses(&self, text: &str) -> ClauseTrace {
        let paragraphs = segment(text);
        match tracer::trace(&paragraphs, &self.catalog, &self.matcher) {
            Ok(trace) => {
                debug!(
                    paragraphs = paragraphs.len(),
                    clauses = trace.len(),
                    "Clause trace complete"
                );
                trace
            }
            Err(err) => {
                error!(error = %err, "Error tracing clauses");
                ClauseTrace::new()
            }
        }
    }

    pub fn compliance_summary(&self, trace: &ClauseTrace) -> ComplianceSummary {
        summarize(trace)
    }

    /// Severity-table analysis with literal keyword search
    pub fn rule_table_report(&self, text: &str) -> RuleTableReport {
        rules::check_rule_table(&segment(text))
    }

    /// Verbatim checklist from the catalog document
    pub fn required_clause_report(&self, text: &str) -> RequiredClauseReport {
        rules::check_required_clauses(text, self.catalog.checklist())
    }

    /// Run every analysis over `text`
    pub fn analyze(&self, text: &str, options: AnalyzeOptions) -> AnalysisReport {
        let clause_traceability = self.trace_clauses(text);
        let summary = options
            .include_summary
            .then(|| self.compliance_summary(&clause_traceability));

        AnalysisReport {
            clause_traceability,
            summary,
            compliance_report: self.rule_table_report(text),
            required_clauses: self.required_clause_report(text),
            config_loaded: self.config_loaded,
            checked_at: chrono::Utc::now().timestamp() as u64,
        }
    }
}

impl Default for ClauseEngine {
    /// Built-in catalog, default threshold
    fn default() -> Self {
        Self {
            catalog: builtin_catalog(),
            matcher: FuzzyMatcher::default(),
            config_loaded: false,
        }
    }
}
