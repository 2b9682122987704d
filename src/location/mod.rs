//! Hotel location resolution.
//!
//! Turns a loosely typed hotel name into a structured address with
//! coordinates: a ladder of progressively relaxed provider searches, two-tier
//! candidate selection, reverse-geocoding backfill, and a locality-only
//! fallback driven by a city keyword table.

pub mod cities;
pub mod providers;
pub mod resolver;
pub mod search;
pub mod select;
pub mod types;
pub mod validate;

#[cfg(test)]
mod testing;

pub use cities::{CityKeyword, CityTable};
pub use providers::{GeocodingProvider, NominatimProvider};
pub use resolver::HotelLocator;
pub use types::{
    Coordinates, LocationError, LocationQuery, LocationSource, PartialLocation, RawCandidate,
    ResolvedLocation,
};
pub use validate::{is_valid_italian_location, BoundingBox, ITALY_BOUNDS};
