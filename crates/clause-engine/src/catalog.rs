//! Clause catalog loading and normalization
//!
//! The catalog document is JSON with clause entries grouped by category:
//!
//! ```json
//! {
//!   "ppe": [
//!     { "id": "ppe_requirements", "text": "Personal protective equipment",
//!       "severity": "high", "recommendation": "Provide PPE" }
//!   ],
//!   "required_clauses": [{ "id": "RC1", "text": "hard hat" }],
//!   "ppe_keywords": ["helmet"],
//!   "drill_keywords": ["fire drill"]
//! }
//! ```
//!
//! Only the categories in [`CATEGORIES`] are read, in that order. The checklist
//! fields are optional extras: a malformed one is logged and read as empty, and
//! a bad list item is skipped, without rejecting the clause catalog. Loading is
//! fallible ([`load_catalog`]); substituting the built-in catalog is a separate,
//! explicit policy ([`catalog_or_builtin`]).

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{ClauseDefinition, Severity};
use tracing::{error, info, warn};

use crate::error::CatalogError;

/// Recognised categories, in traversal order
pub const CATEGORIES: &[&str] = &["general", "ppe", "emergency", "training", "incident"];

/// A literal clause the document must contain verbatim (case-insensitive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredClause {
    pub id: String,
    pub text: String,
}

/// Literal-match checklist carried alongside the clause catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub required_clauses: Vec<RequiredClause>,
    #[serde(default)]
    pub ppe_keywords: Vec<String>,
    #[serde(default)]
    pub drill_keywords: Vec<String>,
}

/// One clause entry as it appears in the catalog document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClauseEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub clause: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    general: Vec<RawClauseEntry>,
    #[serde(default)]
    ppe: Vec<RawClauseEntry>,
    #[serde(default)]
    emergency: Vec<RawClauseEntry>,
    #[serde(default)]
    training: Vec<RawClauseEntry>,
    #[serde(default)]
    incident: Vec<RawClauseEntry>,
}

impl RawCatalog {
    fn into_categories(self) -> Vec<(&'static str, Vec<RawClauseEntry>)> {
        vec![
            ("general", self.general),
            ("ppe", self.ppe),
            ("emergency", self.emergency),
            ("training", self.training),
            ("incident", self.incident),
        ]
    }
}

/// Read one checklist list, keeping the items that deserialize
fn checklist_field<T: DeserializeOwned>(document: &Value, field: &str) -> Vec<T> {
    let items = match document.get(field) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!(field, "Checklist field is not a list, ignoring it");
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(field, index, error = %err, "Skipping malformed checklist item");
                None
            }
        })
        .collect()
}

fn parse_checklist(document: &Value) -> Checklist {
    Checklist {
        required_clauses: checklist_field(document, "required_clauses"),
        ppe_keywords: checklist_field(document, "ppe_keywords"),
        drill_keywords: checklist_field(document, "drill_keywords"),
    }
}

fn first_non_empty<'a>(candidates: &[Option<&'a String>]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
}

/// Turn a raw entry into a clause definition.
///
/// Every string field is trimmed first, and a value that is blank after
/// trimming counts as absent. A whitespace-only `clause` therefore falls
/// through to `text`, and blank items are dropped from `keywords`.
///
/// Precedence:
/// - title: `clause`, then `text`, then `id`
/// - id: `id`, then the title
/// - keywords: non-blank `keywords`, then `pattern`, then `text`, then the title
/// - severity: parsed `severity`, else medium
///
/// Returns `None` when no title can be derived.
pub fn normalize_entry(entry: &RawClauseEntry) -> Option<ClauseDefinition> {
    let title = first_non_empty(&[
        entry.clause.as_ref(),
        entry.text.as_ref(),
        entry.id.as_ref(),
    ])?
    .to_string();

    let id = first_non_empty(&[entry.id.as_ref()])
        .map(str::to_string)
        .unwrap_or_else(|| title.clone());

    let listed: Vec<String> = entry
        .keywords
        .iter()
        .flatten()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    let keywords = if listed.is_empty() {
        let single = first_non_empty(&[entry.pattern.as_ref(), entry.text.as_ref()])
            .unwrap_or(title.as_str());
        vec![single.to_string()]
    } else {
        listed
    };

    let severity = match entry.severity.as_deref() {
        None => Severity::Medium,
        Some(label) => Severity::parse(label).unwrap_or_else(|| {
            warn!(clause = %id, severity = label, "Unknown severity, treating as medium");
            Severity::Medium
        }),
    };

    Some(ClauseDefinition {
        id,
        title,
        severity,
        keywords,
        recommendation: entry.recommendation.clone().unwrap_or_default(),
        required: entry.required.unwrap_or(true),
    })
}

/// The loaded, immutable set of clauses an engine checks against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    clauses: Vec<ClauseDefinition>,
    checklist: Checklist,
}

impl Catalog {
    /// Build a catalog from definitions. A repeated id replaces the earlier
    /// definition but keeps its position.
    pub fn from_clauses(clauses: impl IntoIterator<Item = ClauseDefinition>) -> Self {
        let mut catalog = Catalog::default();
        for clause in clauses {
            catalog.insert(clause);
        }
        catalog
    }

    pub fn with_checklist(mut self, checklist: Checklist) -> Self {
        self.checklist = checklist;
        self
    }

    fn insert(&mut self, clause: ClauseDefinition) {
        match self.clauses.iter_mut().find(|c| c.id == clause.id) {
            Some(existing) => {
                warn!(clause = %clause.id, "Duplicate clause id, later definition wins");
                *existing = clause;
            }
            None => self.clauses.push(clause),
        }
    }

    pub fn clauses(&self) -> &[ClauseDefinition] {
        &self.clauses
    }

    pub fn get(&self, id: &str) -> Option<&ClauseDefinition> {
        self.clauses.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }
}

/// Parse a catalog document.
///
/// Malformed JSON or a malformed category is an error. A malformed checklist
/// field is not.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let document: Value = serde_json::from_str(json)?;
    let checklist = parse_checklist(&document);
    let raw: RawCatalog = serde_json::from_value(document)?;

    let mut catalog = Catalog::default().with_checklist(checklist);
    for (category, entries) in raw.into_categories() {
        for entry in &entries {
            match normalize_entry(entry) {
                Some(clause) => catalog.insert(clause),
                None => warn!(category, "Skipping clause entry with no id, clause or text"),
            }
        }
    }

    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(catalog)
}

/// Read and parse a catalog file
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CatalogError::NotFound(path.to_path_buf())
        } else {
            CatalogError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let catalog = parse_catalog(&content)?;
    info!(path = %path.display(), clauses = catalog.len(), "Loaded clause catalog");
    Ok(catalog)
}

/// Fallback policy: use the loaded catalog, or log why not and use the
/// built-in one. The flag reports whether the external source was used.
pub fn catalog_or_builtin(loaded: Result<Catalog, CatalogError>) -> (Catalog, bool) {
    match loaded {
        Ok(catalog) => (catalog, true),
        Err(err) => {
            error!(error = %err, "Using built-in clause catalog");
            (builtin_catalog(), false)
        }
    }
}

/// Minimal catalog used when no external catalog can be loaded
pub fn builtin_catalog() -> Catalog {
    let clause = |title: &str, severity: Severity, keywords: &[&str]| ClauseDefinition {
        id: title.to_string(),
        title: title.to_string(),
        severity,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        recommendation: String::new(),
        required: true,
    };

    Catalog::from_clauses([
        clause(
            "Emergency Drill",
            Severity::High,
            &["emergency drill", "evacuation drill", "safety drill", "emergency response"],
        ),
        clause(
            "PPE Requirements",
            Severity::High,
            &["ppe", "personal protective equipment", "safety gear", "protective gear"],
        ),
        clause(
            "Safety Training",
            Severity::Medium,
            &["safety training", "safety course", "training program", "safety certification"],
        ),
        clause(
            "Incident Reporting",
            Severity::Medium,
            &["incident report", "accident report", "safety incident", "near miss"],
        ),
    ])
}
