//! Core types for the hotel location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How a location was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LocationSource {
    /// A specific venue matched one of the ladder queries.
    #[default]
    Venue,
    /// Only the locality was resolved, from the city keyword table.
    CityFallback,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Venue => write!(f, "Venue"),
            Self::CityFallback => write!(f, "City only"),
        }
    }
}

/// The user-typed input to a resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    name: String,
    country: String,
}

impl LocationQuery {
    /// Build a query, rejecting a blank name.
    pub fn new(name: &str, country: &str) -> Result<Self, LocationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LocationError::EmptyQuery);
        }
        Ok(Self {
            name: name.to_string(),
            country: country.trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

/// A coordinate pair whose both halves parse as finite floats.
///
/// The provider's original text is kept so the output record carries exactly
/// what the provider returned (e.g. "43.77", not "43.770000000000003").
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
    lat_text: String,
    lon_text: String,
}

impl Coordinates {
    /// Parse a lat/lon pair. Returns `None` unless both halves are numeric.
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let lat_text = lat.trim();
        let lon_text = lon.trim();
        let lat: f64 = lat_text.parse().ok()?;
        let lon: f64 = lon_text.parse().ok()?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        Some(Self {
            lat,
            lon,
            lat_text: lat_text.to_string(),
            lon_text: lon_text.to_string(),
        })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat_text(&self) -> &str {
        &self.lat_text
    }

    pub fn lon_text(&self) -> &str {
        &self.lon_text
    }
}

/// Closed vocabulary for the provider's `type`, `class` and `tourism` tags.
///
/// Anything outside the hospitality vocabulary is kept as `Other` with the
/// raw tag for logging only; selection never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceTag {
    Hotel,
    Resort,
    Other(String),
}

impl PlaceTag {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "hotel" => Self::Hotel,
            "resort" => Self::Resort,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_hospitality(&self) -> bool {
        matches!(self, Self::Hotel | Self::Resort)
    }
}

/// Address components pulled out of a provider result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub house_number: String,
    pub street: String,
    pub city: String,
    pub region: String,
    pub postcode: String,
    /// ISO 3166-1 alpha-2, lower-case (e.g. "it")
    pub country_code: String,
}

impl AddressParts {
    /// "house number + street", or empty when the street is unknown.
    pub fn street_line(&self) -> String {
        match (self.house_number.is_empty(), self.street.is_empty()) {
            (_, true) => String::new(),
            (true, false) => self.street.clone(),
            (false, false) => format!("{} {}", self.house_number, self.street),
        }
    }
}

/// Contact details from a provider result's extra tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// One result of one provider query, after the parse boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub display_name: String,
    pub place_type: PlaceTag,
    pub class_tag: PlaceTag,
    /// `extratags.tourism`, when the provider sent one.
    pub tourism: Option<PlaceTag>,
    pub address: AddressParts,
    pub coordinates: Option<Coordinates>,
    pub contact: Contact,
}

/// A resolved hotel location, ready for the registration workflow.
///
/// Unknown text fields are empty strings, never absent. When `latitude` and
/// `longitude` are set, both parse as floats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub source: LocationSource,
}

impl ResolvedLocation {
    /// True for a locality-only result: street-level detail must come from
    /// the user.
    pub fn is_locality_only(&self) -> bool {
        self.source == LocationSource::CityFallback
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::parse(&self.latitude, &self.longitude)
    }

    pub fn display_line(&self) -> String {
        let mut place: Vec<&str> = Vec::new();
        for part in [&self.address, &self.postal_code, &self.city, &self.region] {
            if !part.is_empty() {
                place.push(part);
            }
        }
        format!(
            "\u{1F3E8} {} \u{2014} {}\n  \u{1F4D0} {}, {} [{}]",
            self.name,
            if place.is_empty() { "?".to_string() } else { place.join(", ") },
            self.latitude,
            self.longitude,
            self.source,
        )
    }
}

/// Caller-supplied data for `enrich`. Every non-blank field wins over the
/// geocoded value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialLocation {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl PartialLocation {
    /// Non-blank city then region, in that order.
    pub fn hints(&self) -> Vec<&str> {
        [&self.city, &self.region]
            .into_iter()
            .filter_map(|v| non_blank(v.as_deref()))
            .collect()
    }

    /// Overwrite every field of `location` the caller supplied.
    ///
    /// Coordinates are overridden only as a numeric pair.
    pub fn apply_to(&self, location: &mut ResolvedLocation) {
        let text_fields = [
            (&self.name, &mut location.name),
            (&self.address, &mut location.address),
            (&self.city, &mut location.city),
            (&self.region, &mut location.region),
            (&self.postal_code, &mut location.postal_code),
        ];
        for (given, target) in text_fields {
            if let Some(value) = non_blank(given.as_deref()) {
                *target = value.to_string();
            }
        }

        if let Some(value) = non_blank(self.phone.as_deref()) {
            location.phone = Some(value.to_string());
        }
        if let Some(value) = non_blank(self.website.as_deref()) {
            location.website = Some(value.to_string());
        }

        if let (Some(lat), Some(lon)) = (
            non_blank(self.latitude.as_deref()),
            non_blank(self.longitude.as_deref()),
        ) {
            if let Some(coords) = Coordinates::parse(lat, lon) {
                location.latitude = coords.lat_text().to_string();
                location.longitude = coords.lon_text().to_string();
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Location resolution errors.
///
/// Provider failures never leave the resolver; they are logged and the
/// current step is treated as empty.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("hotel name is empty")]
    EmptyQuery,

    #[error("network error: {0}")]
    Network(String),

    #[error("geocoder returned HTTP {0}")]
    Status(u16),

    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),
}
