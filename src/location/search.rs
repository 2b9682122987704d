//! Candidate search: the query ladder.
//!
//! Rungs go from most to least specific and are tried strictly in order.
//! The first rung whose results contain an acceptable candidate ends the
//! ladder; results are never merged across rungs.

use super::providers::GeocodingProvider;
use super::select::select;
use super::types::{LocationQuery, RawCandidate};
use tracing::{debug, warn};

/// Results requested per ladder rung.
pub const SEARCH_LIMIT: usize = 10;

/// Build the ladder for `name` in `country`.
///
/// Blank parts are dropped and identical rungs collapse, so an empty country
/// does not send the same query twice.
pub fn query_ladder(name: &str, country: &str) -> Vec<String> {
    let rungs = [
        join_words(&[name, "hotel", country]),
        join_words(&[name, country]),
        join_words(&["hotel", name, country]),
        join_words(&[name]),
    ];

    let mut ladder: Vec<String> = Vec::with_capacity(rungs.len());
    for rung in rungs {
        if !rung.is_empty() && !ladder.contains(&rung) {
            ladder.push(rung);
        }
    }
    ladder
}

fn join_words(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run one provider search, treating any failure as an empty result.
pub fn search_attempt<P: GeocodingProvider>(provider: &P, query: &str, limit: usize) -> Vec<RawCandidate> {
    match provider.search(query, limit) {
        Ok(results) => results,
        Err(e) => {
            warn!("Geocoder search for '{}' failed: {}", query, e);
            Vec::new()
        }
    }
}

/// Walk the ladder until a rung yields a selectable candidate.
pub fn find_candidate<P: GeocodingProvider>(provider: &P, query: &LocationQuery) -> Option<RawCandidate> {
    for (rung, text) in query_ladder(query.name(), query.country()).iter().enumerate() {
        let results = search_attempt(provider, text, SEARCH_LIMIT);
        if results.is_empty() {
            debug!("Rung {} '{}': no results", rung + 1, text);
            continue;
        }

        match select(&results) {
            Some(index) => {
                debug!(
                    "Rung {} '{}': accepted '{}' ({} of {})",
                    rung + 1,
                    text,
                    results[index].display_name,
                    index + 1,
                    results.len()
                );
                return results.into_iter().nth(index);
            }
            None => debug!(
                "Rung {} '{}': {} result(s), none acceptable",
                rung + 1,
                text,
                results.len()
            ),
        }
    }
    None
}
