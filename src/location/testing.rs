//! Scripted provider and candidate builders shared by the unit tests.

use super::providers::GeocodingProvider;
use super::types::{Coordinates, LocationError, PlaceTag, RawCandidate};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search { query: String, limit: usize },
    Reverse { lat: String, lon: String },
}

/// In-memory provider: canned replies per query, every call recorded.
///
/// Unscripted searches return no results; unscripted reverse lookups return
/// `Ok(None)`.
#[derive(Default)]
pub struct ScriptedProvider {
    found: HashMap<String, Vec<RawCandidate>>,
    failures: RefCell<HashMap<String, LocationError>>,
    reverse_replies: RefCell<VecDeque<Result<Option<RawCandidate>, LocationError>>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, query: &str, results: Vec<RawCandidate>) -> Self {
        self.found.insert(query.to_string(), results);
        self
    }

    pub fn on_search_error(self, query: &str, error: LocationError) -> Self {
        self.failures.borrow_mut().insert(query.to_string(), error);
        self
    }

    pub fn on_reverse(self, reply: Result<Option<RawCandidate>, LocationError>) -> Self {
        self.reverse_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search { query, .. } => Some(query),
                Call::Reverse { .. } => None,
            })
            .collect()
    }

    pub fn limits(&self) -> Vec<usize> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search { limit, .. } => Some(limit),
                Call::Reverse { .. } => None,
            })
            .collect()
    }

    pub fn reverse_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Reverse { .. }))
            .count()
    }
}

impl GeocodingProvider for ScriptedProvider {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<RawCandidate>, LocationError> {
        self.calls.borrow_mut().push(Call::Search {
            query: query.to_string(),
            limit,
        });
        if let Some(error) = self.failures.borrow_mut().remove(query) {
            return Err(error);
        }
        let mut results = self.found.get(query).cloned().unwrap_or_default();
        results.truncate(limit);
        Ok(results)
    }

    fn reverse(&self, coords: &Coordinates) -> Result<Option<RawCandidate>, LocationError> {
        self.calls.borrow_mut().push(Call::Reverse {
            lat: coords.lat_text().to_string(),
            lon: coords.lon_text().to_string(),
        });
        self.reverse_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

/// A plain candidate at central Italy with nothing but a display name.
pub fn candidate(display_name: &str) -> RawCandidate {
    RawCandidate {
        display_name: display_name.to_string(),
        place_type: PlaceTag::Other("yes".into()),
        class_tag: PlaceTag::Other("place".into()),
        tourism: None,
        address: Default::default(),
        coordinates: Coordinates::parse("42.5", "12.5"),
        contact: Default::default(),
    }
}

pub trait CandidateExt: Sized {
    fn hotel(self) -> Self;
    fn class(self, tag: &str) -> Self;
    fn tourism(self, tag: &str) -> Self;
    fn italian(self) -> Self;
    fn country(self, code: &str) -> Self;
    fn at(self, lat: &str, lon: &str) -> Self;
    fn without_coordinates(self) -> Self;
    fn street(self, house_number: &str, street: &str) -> Self;
    fn city(self, city: &str) -> Self;
    fn region(self, region: &str) -> Self;
    fn postcode(self, postcode: &str) -> Self;
    fn phone(self, phone: &str) -> Self;
    fn website(self, website: &str) -> Self;
}

impl CandidateExt for RawCandidate {
    fn hotel(mut self) -> Self {
        self.place_type = PlaceTag::Hotel;
        self
    }

    fn class(mut self, tag: &str) -> Self {
        self.class_tag = PlaceTag::from_tag(tag);
        self
    }

    fn tourism(mut self, tag: &str) -> Self {
        self.tourism = Some(PlaceTag::from_tag(tag));
        self
    }

    fn italian(self) -> Self {
        self.country("it")
    }

    fn country(mut self, code: &str) -> Self {
        self.address.country_code = code.to_string();
        self
    }

    fn at(mut self, lat: &str, lon: &str) -> Self {
        self.coordinates = Coordinates::parse(lat, lon);
        self
    }

    fn without_coordinates(mut self) -> Self {
        self.coordinates = None;
        self
    }

    fn street(mut self, house_number: &str, street: &str) -> Self {
        self.address.house_number = house_number.to_string();
        self.address.street = street.to_string();
        self
    }

    fn city(mut self, city: &str) -> Self {
        self.address.city = city.to_string();
        self
    }

    fn region(mut self, region: &str) -> Self {
        self.address.region = region.to_string();
        self
    }

    fn postcode(mut self, postcode: &str) -> Self {
        self.address.postcode = postcode.to_string();
        self
    }

    fn phone(mut self, phone: &str) -> Self {
        self.contact.phone = Some(phone.to_string());
        self
    }

    fn website(mut self, website: &str) -> Self {
        self.contact.website = Some(website.to_string());
        self
    }
}
