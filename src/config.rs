//! Office location and distance settings.
//!
//! Defaults are compiled in; each value can be overridden from the environment:
//! - `NEARBY_OFFICE_LATITUDE`
//! - `NEARBY_OFFICE_LONGITUDE`
//! - `NEARBY_EARTH_RADIUS_KM`
//! - `NEARBY_DISTANCE_LIMIT_KM`

use thiserror::Error;

use crate::geo::{self, GeoPoint};

pub const OFFICE_LATITUDE: f64 = 53.339428;
pub const OFFICE_LONGITUDE: f64 = -6.257664;
/// Mean Earth radius.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const DISTANCE_LIMIT_KM: f64 = 100.0;

const ENV_OFFICE_LATITUDE: &str = "NEARBY_OFFICE_LATITUDE";
const ENV_OFFICE_LONGITUDE: &str = "NEARBY_OFFICE_LONGITUDE";
const ENV_EARTH_RADIUS_KM: &str = "NEARBY_EARTH_RADIUS_KM";
const ENV_DISTANCE_LIMIT_KM: &str = "NEARBY_DISTANCE_LIMIT_KM";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}: cannot parse '{value}' as a number")]
    InvalidValue { var: String, value: String },

    #[error("{0}")]
    Validation(String),
}

/// Immutable settings passed to the distance and filter stages.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    pub office: GeoPoint,
    pub earth_radius_km: f64,
    pub distance_limit_km: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            office: GeoPoint::new(OFFICE_LATITUDE, OFFICE_LONGITUDE),
            earth_radius_km: EARTH_RADIUS_KM,
            distance_limit_km: DISTANCE_LIMIT_KM,
        }
    }
}

impl Config {
    /// Defaults with any `NEARBY_*` environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from an arbitrary variable source. Unset variables keep the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        let read = |var: &str, target: &mut f64| -> Result<(), ConfigError> {
            if let Some(value) = lookup(var) {
                *target = value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                    var: var.to_string(),
                    value: value.clone(),
                })?;
                tracing::debug!(var, value = *target, "config override");
            }
            Ok(())
        };

        read(ENV_OFFICE_LATITUDE, &mut config.office.latitude)?;
        read(ENV_OFFICE_LONGITUDE, &mut config.office.longitude)?;
        read(ENV_EARTH_RADIUS_KM, &mut config.earth_radius_km)?;
        read(ENV_DISTANCE_LIMIT_KM, &mut config.distance_limit_km)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let GeoPoint {
            latitude,
            longitude,
        } = self.office;
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ConfigError::Validation(format!(
                "office latitude must be within [-90, 90], got {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ConfigError::Validation(format!(
                "office longitude must be within [-180, 180], got {}",
                longitude
            )));
        }
        if !self.earth_radius_km.is_finite() || self.earth_radius_km <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "earth radius must be positive, got {}",
                self.earth_radius_km
            )));
        }
        if !self.distance_limit_km.is_finite() || self.distance_limit_km <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "distance limit must be positive, got {}",
                self.distance_limit_km
            )));
        }
        Ok(())
    }

    /// Distance in km from the office to `point`.
    pub fn distance_from_office(&self, point: GeoPoint) -> f64 {
        geo::haversine_km(self.office, point, self.earth_radius_km)
    }
}
