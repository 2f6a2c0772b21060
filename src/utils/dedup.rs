//! Deduplication of papers returned by multiple sources.
//!
//! The same paper routinely comes back from Semantic Scholar, CORE, and
//! Crossref at once. Duplicates are detected by DOI equality or near-equal
//! titles; the first occurrence wins, so registry order decides which
//! source's record survives.

use std::collections::HashSet;
use strsim::jaro_winkler;

use crate::models::PaperRecord;

/// Title similarity at or above this counts as the same paper.
const TITLE_SIMILARITY_THRESHOLD: f64 = 0.95;

/// Check if two papers are likely the same publication
fn are_duplicates(a: &PaperRecord, b: &PaperRecord) -> bool {
    // Same source never produces duplicates of itself
    if a.source == b.source {
        return false;
    }

    // DOI match is the strongest signal
    if let (Some(doi_a), Some(doi_b)) = (&a.doi, &b.doi) {
        if doi_a.eq_ignore_ascii_case(doi_b) {
            return true;
        }
    }

    let title_a = normalize_title(&a.title);
    let title_b = normalize_title(&b.title);
    if title_a.is_empty() || title_b.is_empty() {
        return false;
    }

    title_a == title_b || jaro_winkler(&title_a, &title_b) >= TITLE_SIMILARITY_THRESHOLD
}

/// Normalize a title for comparison: lowercase, alphanumerics only,
/// collapsed whitespace
fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove duplicate papers, keeping the first occurrence of each group
pub fn deduplicate_papers(papers: Vec<PaperRecord>) -> Vec<PaperRecord> {
    let mut removed: HashSet<usize> = HashSet::new();

    for i in 0..papers.len() {
        if removed.contains(&i) {
            continue;
        }
        for j in (i + 1)..papers.len() {
            if !removed.contains(&j) && are_duplicates(&papers[i], &papers[j]) {
                removed.insert(j);
            }
        }
    }

    papers
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !removed.contains(idx))
        .map(|(_, p)| p)
        .collect()
}
