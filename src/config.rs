//! Geocoder configuration, read once at startup.

use std::env::VarError;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "hotel-geo/0.1 (hotel-registration)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_COUNTRY: &str = "Italy";

pub const ENV_API_KEY: &str = "HOTELGEO_API_KEY";
pub const ENV_BASE_URL: &str = "HOTELGEO_BASE_URL";
pub const ENV_USER_AGENT: &str = "HOTELGEO_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "HOTELGEO_TIMEOUT_SECS";
pub const ENV_COUNTRY: &str = "HOTELGEO_COUNTRY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing geocoder API key (set {0})")]
    MissingApiKey(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Everything the geocoding provider and the resolver need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: String,
    /// Sent as `User-Agent`; the provider blocks anonymous traffic.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Country used when the caller does not pass one.
    pub default_country: String,
}

impl GeocoderConfig {
    /// Config with defaults for everything but the key.
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_country: DEFAULT_COUNTRY.to_string(),
        }
    }

    /// Fail fast on a blank key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(ENV_API_KEY.to_string()));
        }
        Ok(())
    }
}

/// Load configuration from the environment, after reading `.env` if present.
pub fn load_config() -> Result<GeocoderConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_config(|key| std::env::var(key))
}

/// Parse configuration through an env-style lookup, so tests can feed a map.
pub fn build_config<F>(lookup: F) -> Result<GeocoderConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let api_key = lookup(ENV_API_KEY)
        .map(|v| v.trim().to_string())
        .map_err(|_| ConfigError::MissingApiKey(ENV_API_KEY.to_string()))?;

    let raw_timeout = or_default(ENV_TIMEOUT_SECS, &DEFAULT_TIMEOUT_SECS.to_string());
    let timeout_secs = match raw_timeout.parse::<u64>() {
        Ok(0) => {
            return Err(ConfigError::InvalidValue {
                var: ENV_TIMEOUT_SECS.to_string(),
                reason: "must be greater than zero".to_string(),
            })
        }
        Ok(secs) => secs,
        Err(e) => {
            return Err(ConfigError::InvalidValue {
                var: ENV_TIMEOUT_SECS.to_string(),
                reason: e.to_string(),
            })
        }
    };

    let config = GeocoderConfig {
        base_url: or_default(ENV_BASE_URL, DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string(),
        api_key,
        user_agent: or_default(ENV_USER_AGENT, DEFAULT_USER_AGENT),
        timeout_secs,
        default_country: or_default(ENV_COUNTRY, DEFAULT_COUNTRY),
    };
    config.validate()?;
    Ok(config)
}
