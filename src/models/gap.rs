//! Gap suggestion model produced by the heuristic stage.

use serde::{Deserialize, Serialize};

/// Note attached to gaps whose novelty score falls below 3.
pub const RETHINK_NOTE: &str = "rethink";

/// A templated research-gap suggestion for one paper
///
/// Field order here is the export key order: YAML and JSON output follow the
/// struct declaration, so exports stay stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapRecord {
    /// "Author Year Title" line with optional DOI URL suffix
    pub paper: String,

    /// Gap statement (at most 25 words, from the template catalog)
    pub gap: String,

    /// 3-5 lowercase keywords, insertion-ordered
    pub keywords: Vec<String>,

    /// Novelty score in [1, 5]
    pub score: u8,

    /// `"rethink"` when score < 3, otherwise empty
    pub note: String,

    /// Whether the venue looks like a top-quartile journal
    pub q1: bool,

    /// Concrete follow-up suggestion (at most 50 words)
    pub next_steps: String,
}

impl GapRecord {
    /// Whether this record satisfies its own invariants; used by tests and
    /// the exporter's debug assertions
    pub fn is_well_formed(&self) -> bool {
        (1..=5).contains(&self.score)
            && (3..=5).contains(&self.keywords.len())
            && !self.paper.is_empty()
            && ((self.score < 3) == (self.note == RETHINK_NOTE))
            && (self.score < 3 || self.note.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(score: u8, note: &str) -> GapRecord {
        GapRecord {
            paper: "Doe 2024 Test Paper".to_string(),
            gap: "Limited scalability of testing methods in real-world applications"
                .to_string(),
            keywords: vec!["testing".into(), "performance".into(), "efficiency".into()],
            score,
            note: note.to_string(),
            q1: false,
            next_steps: "Design experiments using testing and performance methodologies."
                .to_string(),
        }
    }

    #[test]
    fn test_well_formed() {
        assert!(sample(3, "").is_well_formed());
        assert!(sample(2, RETHINK_NOTE).is_well_formed());
    }

    #[test]
    fn test_note_score_mismatch_rejected() {
        assert!(!sample(2, "").is_well_formed());
        assert!(!sample(4, RETHINK_NOTE).is_well_formed());
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        assert!(!sample(0, RETHINK_NOTE).is_well_formed());
        assert!(!sample(6, "").is_well_formed());
    }
}
