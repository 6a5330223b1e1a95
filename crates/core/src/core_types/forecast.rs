//! Atmospheric state and forecast entries
//!
//! [`AtmosphericState`] is the live scalar state the services mutate once
//! per simulated hour. Each hour is published as a [`ForecastEntry`], which
//! carries a [`MeteoSnapshot`] of the scalars behind it so the rolling
//! window can be continued from any retained entry.

use crate::core_types::condition::{CompassDirection, WeatherCondition, WindIntensity};
use crate::core_types::units::{Fahrenheit, Hectopascals, MilesPerHour, Percent};
use crate::weather::extreme::ExtremeEvent;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Surface atmospheric state for one hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericState {
    /// Air temperature
    pub temperature: Fahrenheit,
    /// Relative humidity (0-100)
    pub humidity: Percent,
    /// Sea-level pressure (970-1050 hPa)
    pub pressure: Hectopascals,
    /// Cloud cover (0-100)
    pub cloud_cover: Percent,
}

impl Default for AtmosphericState {
    /// Mild, neutral conditions; also the coercion target for missing inputs
    fn default() -> Self {
        AtmosphericState {
            temperature: Fahrenheit::new(60.0),
            humidity: Percent::new(50.0),
            pressure: Hectopascals::STANDARD,
            cloud_cover: Percent::new(30.0),
        }
    }
}

/// Internal scalar snapshot behind a forecast entry
///
/// Consumers should treat this as opaque continuity state; it exists so
/// that shifting the forecast window can reseed inertia from the last
/// retained hour instead of recomputing from nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeteoSnapshot {
    /// Blended atmospheric state at this hour
    pub atmosphere: AtmosphericState,
    /// Precipitation potential (0-100)
    pub precipitation_potential: f64,
    /// Convective instability score (0-10)
    pub instability: f64,
    /// Pressure tendency in hPa per hour
    pub pressure_trend: f64,
    /// Wind speed used for this hour
    pub wind_speed: MilesPerHour,
    /// Wind direction used for this hour
    pub wind_direction: CompassDirection,
}

impl Default for MeteoSnapshot {
    fn default() -> Self {
        MeteoSnapshot {
            atmosphere: AtmosphericState::default(),
            precipitation_potential: 0.0,
            instability: 0.0,
            pressure_trend: 0.0,
            wind_speed: MilesPerHour::new(5.0),
            wind_direction: CompassDirection::W,
        }
    }
}

/// Sun position flags and rare sky events for one hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialInfo {
    /// Whether the sun is up
    pub is_daytime: bool,
    /// Local sunrise (fractional hour)
    pub sunrise_hour: f64,
    /// Local sunset (fractional hour)
    pub sunset_hour: f64,
    /// Hours of daylight
    pub day_length: f64,
    /// A shooting star is visible this hour
    pub shooting_star: bool,
    /// The shooting star reached the ground
    pub meteor_impact: bool,
}

/// One hour of forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Absolute simulated date and time
    pub timestamp: NaiveDateTime,
    /// Named condition
    pub condition: WeatherCondition,
    /// Air temperature (after condition validation)
    pub temperature: Fahrenheit,
    /// Apparent temperature (wind chill / heat index)
    pub feels_like: Fahrenheit,
    /// Direction the wind blows from
    pub wind_direction: CompassDirection,
    /// Sustained wind speed
    pub wind_speed: MilesPerHour,
    /// Qualitative wind strength
    pub wind_intensity: WindIntensity,
    /// Flavor text describing the condition's effects
    pub effects: String,
    /// Daylight and sky events
    pub celestial: CelestialInfo,
    /// Rare event annotation (does not feed back into later hours)
    pub extreme_event: Option<ExtremeEvent>,
    pub(crate) meteo: MeteoSnapshot,
}

impl ForecastEntry {
    /// Continuity snapshot behind this entry
    #[must_use]
    pub fn snapshot(&self) -> &MeteoSnapshot {
        &self.meteo
    }

    /// Relative humidity at this hour
    #[must_use]
    pub fn humidity(&self) -> Percent {
        self.meteo.atmosphere.humidity
    }

    /// Pressure at this hour
    #[must_use]
    pub fn pressure(&self) -> Hectopascals {
        self.meteo.atmosphere.pressure
    }

    /// Cloud cover at this hour
    #[must_use]
    pub fn cloud_cover(&self) -> Percent {
        self.meteo.atmosphere.cloud_cover
    }
}
