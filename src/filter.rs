//! Recency and relevance filters applied between retrieval and the gap
//! heuristic. Both are pure functions over the paper list.

use crate::models::PaperRecord;
use crate::normalize;

/// Default recency window in years.
pub const DEFAULT_RECENCY_YEARS: u16 = 5;

/// Below this many relevant papers the relevance filter is bypassed.
const MIN_RELEVANT: usize = 3;

/// Drop papers older than `window_years` before the current year.
///
/// Papers with an unknown year pass: an undated record is more useful than
/// no record, and the year policy already prevents future dates.
pub fn recent(papers: Vec<PaperRecord>, window_years: u16) -> Vec<PaperRecord> {
    let cutoff = normalize::current_year().saturating_sub(window_years);
    papers
        .into_iter()
        .filter(|p| p.year.is_none_or(|y| y >= cutoff))
        .collect()
}

/// Keep papers whose title/abstract mentions any topic word.
///
/// Papers with no text to match against pass. If fewer than `MIN_RELEVANT`
/// papers survive, the unfiltered list is returned instead; a thin result
/// set is better served by loose matches than by nothing.
pub fn relevant(papers: Vec<PaperRecord>, topic: &str) -> Vec<PaperRecord> {
    let words: Vec<String> = topic
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        return papers;
    }

    let matching: Vec<PaperRecord> = papers
        .iter()
        .filter(|p| {
            let text = p.search_text();
            text.trim().is_empty() || words.iter().any(|w| text.contains(w.as_str()))
        })
        .cloned()
        .collect();

    if matching.len() < MIN_RELEVANT {
        papers
    } else {
        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaperBuilder, SourceType};

    fn paper(title: &str, year: Option<u16>) -> PaperRecord {
        let mut builder = PaperBuilder::new(title, SourceType::Crossref);
        if let Some(y) = year {
            builder = builder.year(y);
        }
        builder.build()
    }

    #[test]
    fn test_recent_drops_old_papers() {
        let now = normalize::current_year();
        let papers = vec![
            paper("new", Some(now)),
            paper("edge", Some(now - 5)),
            paper("old", Some(now - 6)),
        ];
        let kept = recent(papers, 5);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|p| p.title != "old"));
    }

    #[test]
    fn test_recent_keeps_unknown_year() {
        let kept = recent(vec![paper("undated", None)], 5);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_relevant_matches_topic_words() {
        let papers = vec![
            paper("deep learning survey", None),
            paper("deep networks in vision", None),
            paper("learning to rank", None),
            paper("unrelated botany study", None),
        ];
        let kept = relevant(papers, "deep learning");
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|p| !p.title.contains("botany")));
    }

    #[test]
    fn test_relevant_bypassed_when_too_few_match() {
        let papers = vec![
            paper("quantum sensing", None),
            paper("quantum chips", None),
            paper("classical botany", None),
        ];
        // Only two quantum matches: below the threshold, keep everything
        let kept = relevant(papers.clone(), "quantum");
        assert_eq!(kept.len(), papers.len());
    }

    #[test]
    fn test_relevant_keeps_textless_papers() {
        let papers = vec![
            paper("", None),
            paper("topic paper one", None),
            paper("topic paper two", None),
        ];
        let kept = relevant(papers, "topic");
        assert_eq!(kept.len(), 3);
    }
}
