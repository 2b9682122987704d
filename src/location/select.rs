//! Candidate selection over one rung's results.
//!
//! Tier 1: the first hospitality venue. Tier 2: the first result located in
//! Italy. Ties always go to provider order; there is no secondary ranking.
//! A candidate without a usable coordinate pair is never selected.

use super::types::RawCandidate;

const VENUE_WORDS: &[&str] = &["hotel", "resort", "villa"];
const ITALY_NAMES: &[&str] = &["italy", "italia"];
const ITALY_CODE: &str = "it";

/// Index of the chosen candidate, if any qualifies.
pub fn select(candidates: &[RawCandidate]) -> Option<usize> {
    let usable = || {
        candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.coordinates.is_some())
    };

    usable()
        .find(|(_, c)| is_hospitality(c))
        .or_else(|| usable().find(|(_, c)| is_in_italy(c)))
        .map(|(i, _)| i)
}

/// Tier 1: tagged as a hotel/resort, or named like one.
pub fn is_hospitality(candidate: &RawCandidate) -> bool {
    if candidate.place_type.is_hospitality() || candidate.class_tag.is_hospitality() {
        return true;
    }
    if candidate.tourism.as_ref().is_some_and(|t| t.is_hospitality()) {
        return true;
    }
    let name = candidate.display_name.to_lowercase();
    VENUE_WORDS.iter().any(|w| name.contains(w))
}

/// Tier 2: Italian country code, or Italy named in the display name.
pub fn is_in_italy(candidate: &RawCandidate) -> bool {
    if candidate.address.country_code == ITALY_CODE {
        return true;
    }
    let name = candidate.display_name.to_lowercase();
    ITALY_NAMES.iter().any(|w| name.contains(w))
}
