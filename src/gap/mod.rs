//! The gap heuristic: template selection, novelty scoring, keyword
//! expansion, and next-step generation.
//!
//! None of this is learned or bibliometric. Template selection is keyword
//! matching, the novelty score is a rule over the gap wording and the
//! publication year, and the Q1 flag is a venue-name lookup. Callers wanting
//! real signal should replace [`is_q1_journal`] and [`novelty_score`] with a
//! ranking-data client.

mod templates;

pub use templates::{GapTemplate, GAP_TEMPLATES, KEYWORD_EXPANSIONS, Q1_INDICATORS};

use rand::Rng;

use crate::models::{GapRecord, PaperRecord, RETHINK_NOTE};
use crate::normalize;

/// Keyword list bounds on every record.
pub const MIN_KEYWORDS: usize = 3;
pub const MAX_KEYWORDS: usize = 5;

/// Pick the catalog template with the most trigger hits in the paper's
/// title + abstract.
///
/// Ties resolve to catalog order; when nothing matches at all, a template is
/// chosen uniformly at random (every paper gets *some* gap suggestion).
pub fn select_template(search_text: &str) -> &'static GapTemplate {
    let mut best: Option<(usize, usize)> = None;
    for (idx, template) in GAP_TEMPLATES.iter().enumerate() {
        let hits = template.hits(search_text);
        // Strict comparison keeps the earliest template on ties
        if hits > 0 && best.is_none_or(|(_, b)| hits > b) {
            best = Some((idx, hits));
        }
    }

    match best {
        Some((idx, _)) => &GAP_TEMPLATES[idx],
        None => {
            let idx = rand::thread_rng().gen_range(0..GAP_TEMPLATES.len());
            &GAP_TEMPLATES[idx]
        }
    }
}

/// Heuristic novelty score in [1, 5].
///
/// Base 3, nudged up for wording that signals an open problem and by how
/// recent the paper is. Unknown years get no year adjustment.
pub fn novelty_score(gap: &str, year: Option<u16>) -> u8 {
    let mut score: i32 = 3;
    let gap_lower = gap.to_lowercase();

    if ["limited", "lack", "insufficient"]
        .iter()
        .any(|w| gap_lower.contains(w))
    {
        score += 1;
    }
    if ["unclear", "understudied"]
        .iter()
        .any(|w| gap_lower.contains(w))
    {
        score += 1;
    }

    if let Some(year) = year {
        let now = normalize::current_year();
        if year + 2 >= now {
            score += 1;
        } else if year + 5 <= now {
            score -= 1;
        }
    }

    score.clamp(1, 5) as u8
}

/// Guess whether a venue is a top-quartile journal by name fragment.
pub fn is_q1_journal(venue: Option<&str>) -> bool {
    let Some(venue) = venue else {
        return false;
    };
    let venue_lower = venue.to_lowercase();
    Q1_INDICATORS.iter().any(|ind| venue_lower.contains(ind))
}

/// Build 3-5 lowercase keywords from the topic and the gap wording.
///
/// Topic words come first, then expansion terms cued by the gap text, in
/// catalog order. Padding with "<word>-related" guarantees the minimum; the
/// list is insertion-ordered throughout.
pub fn expand_keywords(gap: &str, topic: &str) -> Vec<String> {
    fn push_unique(keywords: &mut Vec<String>, kw: String) {
        if !kw.is_empty() && !keywords.contains(&kw) {
            keywords.push(kw);
        }
    }

    let mut keywords: Vec<String> = Vec::new();

    let topic_words: Vec<String> = topic
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    for word in topic_words.iter().take(2) {
        push_unique(&mut keywords, word.clone());
    }

    let gap_lower = gap.to_lowercase();
    for gap_word in gap_lower.split_whitespace() {
        for (cue, terms) in KEYWORD_EXPANSIONS {
            if gap_word.contains(cue) {
                for term in terms.iter().take(2) {
                    push_unique(&mut keywords, (*term).to_string());
                }
            }
        }
    }

    let filler = format!(
        "{}-related",
        topic_words.first().map(String::as_str).unwrap_or("topic")
    );
    while keywords.len() < MIN_KEYWORDS {
        keywords.push(filler.clone());
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Produce a concrete next-steps sentence (under 50 words) from the first
/// three keywords.
pub fn next_steps(keywords: &[String]) -> String {
    let k = |i: usize| keywords.get(i).map(String::as_str).unwrap_or("related");

    match rand::thread_rng().gen_range(0..3) {
        0 => format!(
            "Design experiments using {} and {} methodologies. Collect datasets focusing on {} domains.",
            k(0), k(1), k(2)
        ),
        1 => format!(
            "Develop {} framework addressing {} limitations. Validate across {} scenarios.",
            k(0), k(1), k(2)
        ),
        _ => format!(
            "Implement {} solution incorporating {} techniques. Benchmark against {} baselines.",
            k(0), k(1), k(2)
        ),
    }
}

/// Assemble the full gap record for one paper.
pub fn build_record(paper: &PaperRecord, topic: &str) -> GapRecord {
    let template = select_template(&paper.search_text());
    let gap = template.render(topic);
    let keywords = expand_keywords(&gap, topic);
    let score = novelty_score(&gap, paper.year);
    let note = if score < 3 { RETHINK_NOTE } else { "" };
    let next_steps = next_steps(&keywords);

    GapRecord {
        paper: paper.citation_line(),
        gap,
        keywords,
        score,
        note: note.to_string(),
        q1: is_q1_journal(paper.venue.as_deref()),
        next_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaperBuilder, SourceType};

    #[test]
    fn test_select_template_by_hits() {
        let template = select_template("scalable deployment of large models");
        assert!(template.text.contains("scalability"));

        let template = select_template("an explainable and interpretable approach");
        assert!(template.text.contains("interpretability"));
    }

    #[test]
    fn test_select_template_tie_prefers_catalog_order() {
        // One hit each on templates 0 ("deploy") and 2 ("evaluat")
        let template = select_template("deployment and evaluation notes");
        assert!(template.text.contains("scalability"));
    }

    #[test]
    fn test_select_template_zero_hits_still_selects() {
        let template = select_template("ornithology field notes");
        assert!(GAP_TEMPLATES
            .iter()
            .any(|t| std::ptr::eq(t.text, template.text)));
    }

    #[test]
    fn test_novelty_score_range() {
        let now = normalize::current_year();
        for template in GAP_TEMPLATES {
            let gap = template.render("topic");
            for year in [None, Some(1900), Some(now - 10), Some(now - 3), Some(now)] {
                let score = novelty_score(&gap, year);
                assert!((1..=5).contains(&score));
            }
        }
    }

    #[test]
    fn test_novelty_score_rules() {
        let now = normalize::current_year();

        // "Limited ..." wording +1, recent year +1
        let gap = "Limited scalability of x methods in real-world applications";
        assert_eq!(novelty_score(gap, Some(now)), 5);
        // Old year -1
        assert_eq!(novelty_score(gap, Some(now - 7)), 3);

        // Neutral wording, old year: drops below the rethink threshold
        let gap = "Computational complexity of x not addressed";
        assert_eq!(novelty_score(gap, Some(now - 7)), 2);
        assert_eq!(novelty_score(gap, None), 3);
    }

    #[test]
    fn test_q1_journal_detection() {
        assert!(is_q1_journal(Some("Nature Medicine")));
        assert!(is_q1_journal(Some("IEEE Transactions on Pattern Analysis")));
        assert!(is_q1_journal(Some("The Lancet")));
        assert!(!is_q1_journal(Some("Workshop Proceedings")));
        assert!(!is_q1_journal(None));
    }

    #[test]
    fn test_expand_keywords_bounds_and_order() {
        let gap = "Limited scalability of deep learning methods in real-world applications";
        let keywords = expand_keywords(gap, "deep learning");

        assert!((MIN_KEYWORDS..=MAX_KEYWORDS).contains(&keywords.len()));
        // Topic words lead, expansion terms follow
        assert_eq!(keywords[0], "deep");
        assert_eq!(keywords[1], "learning");
        assert!(keywords.contains(&"performance".to_string()));
        assert!(keywords.iter().all(|k| *k == k.to_lowercase()));
    }

    #[test]
    fn test_expand_keywords_pads_short_topics() {
        let keywords = expand_keywords("no cues here", "nlp");
        assert!(keywords.len() >= MIN_KEYWORDS);
        assert!(keywords.contains(&"nlp-related".to_string()));
    }

    #[test]
    fn test_next_steps_stays_under_fifty_words() {
        let keywords = vec![
            "benchmarking".to_string(),
            "metrics".to_string(),
            "validation".to_string(),
        ];
        for _ in 0..20 {
            let steps = next_steps(&keywords);
            assert!(steps.split_whitespace().count() <= 50);
            assert!(steps.contains("benchmarking"));
        }
    }

    #[test]
    fn test_build_record_invariants() {
        let paper = PaperBuilder::new(
            "Scalable federated learning deployment",
            SourceType::SemanticScholar,
        )
        .author("Doe")
        .year(normalize::current_year())
        .venue("Journal of Machine Learning Research")
        .build();

        let record = build_record(&paper, "federated learning");
        assert!(record.is_well_formed());
        assert!(record.paper.starts_with("Doe"));
        assert!(record.gap.contains("federated learning"));
        assert!(record.q1);
    }
}
