//! Field normalization shared by all source parsers.
//!
//! The three APIs disagree on where they keep titles, authors, years, and
//! DOIs. Source parsers deserialize their own shapes, then funnel the raw
//! values through these helpers so the clamping and validation policy is
//! identical everywhere.

use chrono::Datelike;
use regex::Regex;

/// Earliest publication year accepted as-is.
pub const MIN_YEAR: u16 = 1900;

/// The current calendar year.
pub fn current_year() -> u16 {
    chrono::Utc::now().year() as u16
}

/// Clamp a raw year into [`MIN_YEAR`, current year].
///
/// Out-of-range values (including future years) are replaced with the
/// current year rather than rejected: a record with a bogus year is still a
/// record, and the output must never show a future year.
pub fn clamp_year(raw: i64) -> u16 {
    let now = current_year();
    if raw < i64::from(MIN_YEAR) || raw > i64::from(now) {
        now
    } else {
        raw as u16
    }
}

/// Parse a year from a date string prefix ("2021-07-15" -> 2021).
pub fn year_from_date(date: &str) -> Option<i64> {
    let prefix: String = date.chars().take(4).collect();
    prefix.parse().ok()
}

/// Find a plausible publication year anywhere in free text.
///
/// Used for the Google Scholar metadata line, which buries the year in
/// "Author - Venue, 2021 - publisher" strings.
pub fn year_from_text(text: &str) -> Option<i64> {
    let re = Regex::new(r"\b(19|20)\d{2}\b").ok()?;
    re.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Reduce a full author name to the surname (last whitespace token).
pub fn lead_author_surname(name: &str) -> Option<String> {
    let surname = name.split_whitespace().last()?;
    if surname.is_empty() {
        None
    } else {
        Some(surname.to_string())
    }
}

/// Whether a cleaned string is a plausible DOI: starts with "10.", contains
/// a slash, and is longer than 7 characters.
pub fn is_valid_doi(doi: &str) -> bool {
    doi.starts_with("10.") && doi.contains('/') && doi.len() > 7
}

/// Strip URL/scheme prefixes from a DOI candidate and lowercase it.
fn clean_doi(raw: &str) -> String {
    let doi = raw.trim().to_lowercase();
    let doi = doi.strip_prefix("doi:").unwrap_or(&doi);
    let doi = doi.strip_prefix("https://doi.org/").unwrap_or(doi);
    let doi = doi.strip_prefix("http://doi.org/").unwrap_or(doi);
    let doi = doi.strip_prefix("https://dx.doi.org/").unwrap_or(doi);
    doi.to_string()
}

/// Pick the first candidate that cleans up into a valid DOI.
///
/// Callers pass candidates in their API's priority order (`doi`, `DOI`,
/// `externalIds.DOI`, `identifiers.doi`, ...); invalid candidates are
/// dropped so a placeholder never reaches the record.
pub fn doi_from_candidates<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(clean_doi)
        .find(|doi| is_valid_doi(doi))
}

/// Extract a DOI embedded in a URL, the lowest-priority candidate.
pub fn doi_from_url(url: &str) -> Option<String> {
    let re = Regex::new(r#"10\.\d{4,9}/[^\s"<>?#]+"#).ok()?;
    let found = re.find(url)?.as_str();
    let doi = clean_doi(found);
    is_valid_doi(&doi).then_some(doi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_year_in_range() {
        assert_eq!(clamp_year(2020), 2020);
        assert_eq!(clamp_year(1900), 1900);
    }

    #[test]
    fn test_clamp_year_out_of_range_becomes_current() {
        let now = current_year();
        assert_eq!(clamp_year(1899), now);
        assert_eq!(clamp_year(0), now);
        assert_eq!(clamp_year(i64::from(now) + 1), now);
        assert_eq!(clamp_year(3024), now);
    }

    #[test]
    fn test_year_from_date() {
        assert_eq!(year_from_date("2021-07-15"), Some(2021));
        assert_eq!(year_from_date("1987"), Some(1987));
        assert_eq!(year_from_date("n.d."), None);
        assert_eq!(year_from_date(""), None);
    }

    #[test]
    fn test_year_from_text() {
        assert_eq!(
            year_from_text("J Smith - Nature Medicine, 2022 - nature.com"),
            Some(2022)
        );
        assert_eq!(year_from_text("no year here"), None);
        // Four digits outside a year-looking range are ignored
        assert_eq!(year_from_text("page 3456"), None);
    }

    #[test]
    fn test_lead_author_surname() {
        assert_eq!(lead_author_surname("Ada Lovelace"), Some("Lovelace".into()));
        assert_eq!(
            lead_author_surname("Jean-Claude Van Damme"),
            Some("Damme".into())
        );
        assert_eq!(lead_author_surname("Curie"), Some("Curie".into()));
        assert_eq!(lead_author_surname("   "), None);
    }

    #[test]
    fn test_doi_candidates_priority_order() {
        let doi = doi_from_candidates([
            Some("not-a-doi"),
            Some("10.1234/first.valid"),
            Some("10.9999/never.reached"),
        ]);
        assert_eq!(doi, Some("10.1234/first.valid".to_string()));
    }

    #[test]
    fn test_doi_candidates_all_invalid() {
        assert_eq!(doi_from_candidates([Some("n/a"), Some("10.12"), None]), None);
    }

    #[test]
    fn test_doi_prefix_stripping() {
        assert_eq!(
            doi_from_candidates([Some("https://doi.org/10.1038/NATURE12345")]),
            Some("10.1038/nature12345".to_string())
        );
        assert_eq!(
            doi_from_candidates([Some("doi:10.1234/abc123")]),
            Some("10.1234/abc123".to_string())
        );
    }

    #[test]
    fn test_doi_from_url() {
        assert_eq!(
            doi_from_url("https://link.springer.com/article/10.1007/s10994-021-06012-8"),
            Some("10.1007/s10994-021-06012-8".to_string())
        );
        assert_eq!(doi_from_url("https://example.com/paper.pdf"), None);
    }

    #[test]
    fn test_is_valid_doi_length() {
        assert!(!is_valid_doi("10.1/x"));
        assert!(is_valid_doi("10.1234/x"));
    }
}
