//! Plausibility gate: does a coordinate pair fall inside the target country?

/// Inclusive latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Mainland Italy, Sicily, Sardinia and the minor islands.
pub const ITALY_BOUNDS: BoundingBox = BoundingBox {
    min_lat: 35.5,
    max_lat: 47.1,
    min_lon: 6.6,
    max_lon: 18.8,
};

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        // NaN fails every comparison, so it is never inside.
        self.min_lat <= lat && lat <= self.max_lat && self.min_lon <= lon && lon <= self.max_lon
    }

    /// Parse both strings as floats; unparseable input is outside the box.
    pub fn contains_str(&self, lat: &str, lon: &str) -> bool {
        let lat = lat.trim().parse::<f64>().unwrap_or(f64::NAN);
        let lon = lon.trim().parse::<f64>().unwrap_or(f64::NAN);
        self.contains(lat, lon)
    }
}

/// True iff the pair lies inside Italy's bounding box.
pub fn is_valid_italian_location(latitude: &str, longitude: &str) -> bool {
    ITALY_BOUNDS.contains_str(latitude, longitude)
}
