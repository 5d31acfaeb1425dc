//! Fuzzy evidence matching
//!
//! Scores how well a keyword appears inside a paragraph using a partial
//! ratio: the shorter string is aligned against every same-length window of
//! the longer one (plus the ragged windows at either edge) and the best
//! normalized LCS similarity wins. Minor wording variation, pluralization or
//! punctuation still scores high where exact substring search would miss.

use std::cmp::Ordering;
use std::collections::HashSet;

/// Score at or above which a paragraph counts as evidence
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Partial-ratio similarity of `keyword` and `paragraph`, case-insensitive, in 0..=100.
///
/// The shorter string is aligned against the longer one. Strings of equal
/// length are aligned both ways and the better score wins, so the result does
/// not depend on argument order.
pub fn partial_ratio(keyword: &str, paragraph: &str) -> u8 {
    let keyword: Vec<char> = keyword.to_lowercase().chars().collect();
    let paragraph: Vec<char> = paragraph.to_lowercase().chars().collect();

    match keyword.len().cmp(&paragraph.len()) {
        Ordering::Less => best_alignment(&keyword, &paragraph),
        Ordering::Greater => best_alignment(&paragraph, &keyword),
        Ordering::Equal => {
            best_alignment(&keyword, &paragraph).max(best_alignment(&paragraph, &keyword))
        }
    }
}

/// Best ratio of `shorter` against any window of `longer`.
///
/// A window whose outer edge character does not occur in `shorter` is never
/// better than its neighbour one step further in, so it is skipped without
/// computing an LCS.
fn best_alignment(shorter: &[char], longer: &[char]) -> u8 {
    if shorter.is_empty() {
        return 0;
    }
    if contains_slice(longer, shorter) {
        return 100;
    }

    let alphabet: HashSet<char> = shorter.iter().copied().collect();
    let m = shorter.len();
    let n = longer.len();
    let mut best = 0;

    // prefixes and full windows are keyed on their last char, suffixes on their first
    let prefixes = (1..m).map(|end| (end - 1, &longer[..end]));
    let full = (0..=n - m).map(|start| (start + m - 1, &longer[start..start + m]));
    let suffixes = (n - m + 1..n).map(|start| (start, &longer[start..]));

    for (edge, window) in prefixes.chain(full).chain(suffixes) {
        if !alphabet.contains(&longer[edge]) {
            continue;
        }
        best = best.max(ratio(shorter, window));
        if best == 100 {
            break;
        }
    }

    best
}

/// Normalized indel similarity, floored to an integer percentage
fn ratio(a: &[char], b: &[char]) -> u8 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    (200 * lcs_len(a, b) / total) as u8
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for ca in a {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

fn contains_slice(haystack: &[char], needle: &[char]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Threshold-bound matcher shared by every trace on an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatcher {
    threshold: u8,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FuzzyMatcher {
    /// Thresholds above 100 are clamped; nothing could ever match them
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold: threshold.min(100),
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn score(&self, keyword: &str, paragraph: &str) -> u8 {
        partial_ratio(keyword, paragraph)
    }

    pub fn is_evidence(&self, keyword: &str, paragraph: &str) -> bool {
        self.score(keyword, paragraph) >= self.threshold
    }
}
