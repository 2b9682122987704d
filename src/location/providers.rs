//! Geocoding providers: the provider seam and the Nominatim-compatible HTTP client.

use super::types::{AddressParts, Contact, Coordinates, LocationError, PlaceTag, RawCandidate};
use crate::config::{ConfigError, GeocoderConfig};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Free-text search and reverse lookup against a geocoding service.
pub trait GeocodingProvider {
    /// Search for `query`, returning at most `limit` candidates in provider order.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<RawCandidate>, LocationError>;

    /// Look up the address at `coords`. `Ok(None)` means the provider knows
    /// nothing there.
    fn reverse(&self, coords: &Coordinates) -> Result<Option<RawCandidate>, LocationError>;
}

impl<P: GeocodingProvider + ?Sized> GeocodingProvider for &P {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<RawCandidate>, LocationError> {
        (**self).search(query, limit)
    }

    fn reverse(&self, coords: &Coordinates) -> Result<Option<RawCandidate>, LocationError> {
        (**self).reverse(coords)
    }
}

// ─── Wire format ────────────────────────────────────────────────

/// One place as the provider sends it (search array item or reverse body).
#[derive(Deserialize, Debug, Clone, Default)]
pub struct NominatimPlace {
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
    #[serde(default, rename = "class")]
    pub place_class: Option<String>,
    #[serde(default)]
    pub address: Option<HashMap<String, String>>,
    #[serde(default)]
    pub extratags: Option<HashMap<String, String>>,
}

const CITY_KEYS: &[&str] = &["city", "town", "village", "municipality"];
const REGION_KEYS: &[&str] = &["state", "region"];
const STREET_KEYS: &[&str] = &["road", "pedestrian", "street"];
const PHONE_KEYS: &[&str] = &["phone", "contact:phone"];
const WEBSITE_KEYS: &[&str] = &["website", "contact:website"];

fn first_of(map: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

impl From<NominatimPlace> for RawCandidate {
    fn from(place: NominatimPlace) -> Self {
        let address = place.address.unwrap_or_default();
        let extratags = place.extratags.unwrap_or_default();

        let coordinates = match (&place.lat, &place.lon) {
            (Some(lat), Some(lon)) => Coordinates::parse(lat, lon),
            _ => None,
        };

        RawCandidate {
            display_name: place.display_name,
            place_type: PlaceTag::from_tag(place.place_type.as_deref().unwrap_or("")),
            class_tag: PlaceTag::from_tag(place.place_class.as_deref().unwrap_or("")),
            tourism: extratags.get("tourism").map(|t| PlaceTag::from_tag(t)),
            address: AddressParts {
                house_number: first_of(&address, &["house_number"]).unwrap_or_default(),
                street: first_of(&address, STREET_KEYS).unwrap_or_default(),
                city: first_of(&address, CITY_KEYS).unwrap_or_default(),
                region: first_of(&address, REGION_KEYS).unwrap_or_default(),
                postcode: first_of(&address, &["postcode"]).unwrap_or_default(),
                country_code: first_of(&address, &["country_code"])
                    .map(|c| c.to_lowercase())
                    .unwrap_or_default(),
            },
            coordinates,
            contact: Contact {
                phone: first_of(&extratags, PHONE_KEYS),
                website: first_of(&extratags, WEBSITE_KEYS),
            },
        }
    }
}

// ─── Nominatim provider ─────────────────────────────────────────

/// Blocking HTTP client for a Nominatim-compatible service.
pub struct NominatimProvider {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
    user_agent: String,
}

impl NominatimProvider {
    /// Build a provider from validated configuration.
    pub fn new(config: &GeocoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Ok(Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<serde_json::Value, LocationError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut request = self
            .agent
            .get(&url)
            .set("User-Agent", &self.user_agent)
            .query("format", "json")
            .query("addressdetails", "1")
            .query("extratags", "1")
            .query("key", &self.api_key);
        for (name, value) in params {
            request = request.query(name, value);
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(LocationError::Status(code)),
            Err(e) => return Err(LocationError::Network(e.to_string())),
        };

        response
            .into_json()
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))
    }
}

impl GeocodingProvider for NominatimProvider {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<RawCandidate>, LocationError> {
        let limit = limit.to_string();
        let body = self.get("search", &[("q", query), ("limit", &limit)])?;
        let places: Vec<NominatimPlace> = serde_json::from_value(body)
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;
        debug!("Geocoder returned {} result(s) for '{}'", places.len(), query);
        Ok(places.into_iter().map(RawCandidate::from).collect())
    }

    fn reverse(&self, coords: &Coordinates) -> Result<Option<RawCandidate>, LocationError> {
        let body = self.get("reverse", &[("lat", coords.lat_text()), ("lon", coords.lon_text())])?;
        if body.get("error").is_some() {
            debug!("Reverse lookup found nothing at ({}, {})", coords.lat_text(), coords.lon_text());
            return Ok(None);
        }
        let place: NominatimPlace = serde_json::from_value(body)
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;
        Ok(Some(place.into()))
    }
}
