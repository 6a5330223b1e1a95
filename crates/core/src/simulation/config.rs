//! Simulation settings

use crate::error::{Result, WeatherError};
use crate::region::ProfileOverrides;
use crate::weather::extreme::ExtremeWeatherConfig;
use serde::{Deserialize, Serialize};

/// Shortest forecast window the simulation will keep
pub const MIN_FORECAST_HOURS: usize = 24;

/// Longest forecast window (two weeks)
pub const MAX_FORECAST_HOURS: usize = 24 * 14;

/// Settings for a [`WeatherSimulation`](super::WeatherSimulation)
///
/// Every field has a default, so partial configuration files deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Hours kept in the rolling forecast window (24-336)
    pub forecast_hours: usize,
    /// Rare event sampling
    pub extreme_weather: ExtremeWeatherConfig,
    /// Roll for shooting stars and meteor impacts
    pub celestial_events: bool,
    /// Adjustments applied on top of the biome preset
    pub profile_overrides: ProfileOverrides,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            forecast_hours: MIN_FORECAST_HOURS,
            extreme_weather: ExtremeWeatherConfig::default(),
            celestial_events: true,
            profile_overrides: ProfileOverrides::default(),
        }
    }
}

impl SimulationConfig {
    /// Ordinary weather only: no extreme events or sky events
    #[must_use]
    pub fn mundane() -> Self {
        SimulationConfig {
            extreme_weather: ExtremeWeatherConfig {
                enabled: false,
                ..ExtremeWeatherConfig::default()
            },
            celestial_events: false,
            ..Self::default()
        }
    }

    /// A full week of forecast
    #[must_use]
    pub fn week_ahead() -> Self {
        SimulationConfig {
            forecast_hours: 24 * 7,
            ..Self::default()
        }
    }

    /// Check ranges that cannot be clamped silently
    pub fn validate(&self) -> Result<()> {
        if !(MIN_FORECAST_HOURS..=MAX_FORECAST_HOURS).contains(&self.forecast_hours) {
            return Err(WeatherError::InvalidConfig(format!(
                "forecast_hours must be between {MIN_FORECAST_HOURS} and {MAX_FORECAST_HOURS}, got {}",
                self.forecast_hours
            )));
        }

        let scale = self.extreme_weather.probability_scale;
        if !scale.is_finite() || scale < 0.0 {
            return Err(WeatherError::InvalidConfig(format!(
                "extreme_weather.probability_scale must be a non-negative number, got {scale}"
            )));
        }

        let overrides = &self.profile_overrides;
        if let Some(lat) = overrides.latitude {
            if !lat.is_finite() || lat.abs() > 90.0 {
                return Err(WeatherError::InvalidConfig(format!(
                    "latitude override must be within ±90°, got {lat}"
                )));
            }
        }
        if let Some(maritime) = overrides.maritime_influence {
            if !(0.0..=1.0).contains(&maritime) {
                return Err(WeatherError::InvalidConfig(format!(
                    "maritime influence override must be within 0-1, got {maritime}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert!(SimulationConfig::mundane().validate().is_ok());
        assert!(SimulationConfig::week_ahead().validate().is_ok());
    }

    #[test]
    fn test_short_window_rejected() {
        let config = SimulationConfig {
            forecast_hours: 12,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(WeatherError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_overrides_rejected() {
        let mut config = SimulationConfig::default();
        config.profile_overrides.latitude = Some(120.0);
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.extreme_weather.probability_scale = f64::NAN;
        assert!(config.validate().is_err());
    }
}
