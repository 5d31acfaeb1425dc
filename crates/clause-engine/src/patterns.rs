//! Keyword tables and literal-match helpers for the severity-table analysis

/// Longest snippet kept before truncation
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Safety training evidence
pub const TRAINING_KEYWORDS: &[&str] = &[
    "safety training",
    "training program",
    "safety certification",
    "training records",
];

/// Personal protective equipment evidence
pub const PPE_KEYWORDS: &[&str] = &[
    "PPE",
    "personal protective equipment",
    "safety gear",
    "protective clothing",
];

/// Emergency response evidence
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "emergency response",
    "evacuation plan",
    "emergency procedures",
    "first aid",
];

/// Incident reporting evidence
pub const INCIDENT_KEYWORDS: &[&str] = &[
    "incident report",
    "accident report",
    "near miss",
    "incident investigation",
];

/// Risk assessment evidence
pub const RISK_ASSESSMENT_KEYWORDS: &[&str] = &[
    "risk assessment",
    "hazard identification",
    "risk analysis",
    "risk management",
];

/// First keyword that occurs in `text_lower`, compared case-insensitively
pub fn first_keyword_in<'k, K: AsRef<str>>(
    text_lower: &str,
    keywords: &'k [K],
) -> Option<&'k str> {
    keywords
        .iter()
        .map(|keyword| keyword.as_ref())
        .find(|keyword| text_lower.contains(&keyword.to_lowercase()))
}

/// True if any keyword occurs in `text_lower`
pub fn contains_any_keyword<K: AsRef<str>>(text_lower: &str, keywords: &[K]) -> bool {
    first_keyword_in(text_lower, keywords).is_some()
}

/// Cut text to [`SNIPPET_MAX_CHARS`] characters, marking the cut with "..."
pub fn truncate_snippet(text: &str) -> String {
    if text.chars().count() > SNIPPET_MAX_CHARS {
        let head: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
