//! Hotel locator: orchestrates the resolution chain.
//!
//! Flow:  query ladder (search + select per rung) → reverse backfill
//!        → city keyword fallback → nothing
//!
//! Every provider failure is logged and treated as "this step found
//! nothing"; a geocoding outage must never block hotel registration.

use super::cities::CityTable;
use super::providers::{GeocodingProvider, NominatimProvider};
use super::search::{find_candidate, search_attempt};
use super::types::{
    Coordinates, LocationQuery, LocationSource, PartialLocation, RawCandidate, ResolvedLocation,
};
use crate::config::{ConfigError, GeocoderConfig, DEFAULT_COUNTRY};
use tracing::{debug, info, warn};

/// Results requested for the locality-only search.
const FALLBACK_LIMIT: usize = 1;

/// Number of display-name components used when the street is unknown.
const DISPLAY_ADDRESS_PARTS: usize = 2;

/// Stateless resolver: each call builds and drops its own candidates.
pub struct HotelLocator<P = NominatimProvider> {
    provider: P,
    cities: CityTable,
    default_country: String,
}

impl HotelLocator<NominatimProvider> {
    /// Build a locator over the HTTP provider. Fails on a missing API key.
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, ConfigError> {
        let provider = NominatimProvider::new(config)?;
        Ok(Self::new(provider, &config.default_country))
    }
}

impl<P: GeocodingProvider> HotelLocator<P> {
    pub fn new(provider: P, default_country: &str) -> Self {
        let default_country = match default_country.trim() {
            "" => DEFAULT_COUNTRY.to_string(),
            country => country.to_string(),
        };
        Self {
            provider,
            cities: CityTable::italian(),
            default_country,
        }
    }

    /// Replace the locality keyword table.
    pub fn with_city_table(mut self, cities: CityTable) -> Self {
        self.cities = cities;
        self
    }

    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve in the configured default country.
    pub fn resolve_default(&self, hotel_name: &str) -> Option<ResolvedLocation> {
        self.resolve(hotel_name, &self.default_country)
    }

    /// Resolve a typed hotel name to a structured location.
    ///
    /// `None` means "no geodata available"; the caller should ask the user to
    /// fill the details in by hand.
    pub fn resolve(&self, hotel_name: &str, country: &str) -> Option<ResolvedLocation> {
        let query = match LocationQuery::new(hotel_name, country) {
            Ok(query) => query,
            Err(e) => {
                warn!("Skipping hotel lookup: {}", e);
                return None;
            }
        };

        if let Some(candidate) = find_candidate(&self.provider, &query) {
            let location = self.locate_venue(&query, candidate);
            info!(
                "Resolved '{}' to {}, {} ({}, {})",
                query.name(),
                location.city,
                location.region,
                location.latitude,
                location.longitude
            );
            return Some(location);
        }

        self.city_fallback(&query)
    }

    /// Resolve, retrying with the caller's city then region, and let every
    /// non-blank caller field win over the geocoded one.
    pub fn enrich(&self, hotel_name: &str, partial: &PartialLocation) -> Option<ResolvedLocation> {
        let name = hotel_name.trim();
        if name.is_empty() {
            warn!("Skipping enrichment: hotel name is empty");
            return None;
        }

        let mut location = self.resolve_default(name).or_else(|| {
            partial.hints().into_iter().find_map(|hint| {
                debug!("Retrying '{}' with hint '{}'", name, hint);
                self.resolve_default(&format!("{name} {hint}"))
            })
        })?;

        location.name = name.to_string();
        partial.apply_to(&mut location);
        Some(location)
    }

    fn locate_venue(&self, query: &LocationQuery, candidate: RawCandidate) -> ResolvedLocation {
        let mut location = build_location(query.name(), &candidate);

        if location.city.is_empty() || location.region.is_empty() {
            if let Some(coords) = &candidate.coordinates {
                self.backfill_from_reverse(&mut location, coords);
            }
        }
        location
    }

    /// One reverse lookup; fills only the fields still empty.
    fn backfill_from_reverse(&self, location: &mut ResolvedLocation, coords: &Coordinates) {
        debug!(
            "Backfilling '{}' from reverse lookup at ({}, {})",
            location.name,
            coords.lat_text(),
            coords.lon_text()
        );
        let found = match self.provider.reverse(coords) {
            Ok(Some(found)) => found,
            Ok(None) => return,
            Err(e) => {
                warn!("Reverse lookup for '{}' failed: {}", location.name, e);
                return;
            }
        };

        fill_if_empty(&mut location.city, &found.address.city);
        fill_if_empty(&mut location.region, &found.address.region);
        fill_if_empty(&mut location.postal_code, &found.address.postcode);
    }

    /// Locality-only result from a city named inside the hotel name.
    fn city_fallback(&self, query: &LocationQuery) -> Option<ResolvedLocation> {
        let Some(city) = self.cities.find_in(query.name()) else {
            debug!("No venue or known city found for '{}'", query.name());
            return None;
        };
        info!("No venue matched '{}'; falling back to city '{}'", query.name(), city);

        let search = [city, query.country()].join(" ");
        let first = search_attempt(&self.provider, search.trim(), FALLBACK_LIMIT)
            .into_iter()
            .next()?;
        let Some(coords) = first.coordinates else {
            debug!("City result for '{}' has no coordinates", search.trim());
            return None;
        };

        Some(ResolvedLocation {
            name: query.name().to_string(),
            address: String::new(),
            city: city.to_string(),
            region: first.address.region,
            postal_code: String::new(),
            latitude: coords.lat_text().to_string(),
            longitude: coords.lon_text().to_string(),
            phone: None,
            website: None,
            source: LocationSource::CityFallback,
        })
    }
}

/// Map an accepted candidate onto the output record. The user's name is
/// kept; the provider's display name only feeds the address fallback.
fn build_location(name: &str, candidate: &RawCandidate) -> ResolvedLocation {
    let address = match candidate.address.street_line() {
        line if !line.is_empty() => line,
        _ => display_address(&candidate.display_name),
    };
    let (latitude, longitude) = candidate
        .coordinates
        .as_ref()
        .map(|c| (c.lat_text().to_string(), c.lon_text().to_string()))
        .unwrap_or_default();

    ResolvedLocation {
        name: name.to_string(),
        address,
        city: candidate.address.city.clone(),
        region: candidate.address.region.clone(),
        postal_code: candidate.address.postcode.clone(),
        latitude,
        longitude,
        phone: candidate.contact.phone.clone(),
        website: candidate.contact.website.clone(),
        source: LocationSource::Venue,
    }
}

fn display_address(display_name: &str) -> String {
    display_name
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(DISPLAY_ADDRESS_PARTS)
        .collect::<Vec<_>>()
        .join(", ")
}

fn fill_if_empty(target: &mut String, value: &str) {
    if target.is_empty() && !value.is_empty() {
        *target = value.to_string();
    }
}
