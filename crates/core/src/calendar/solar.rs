//! Daylight provider
//!
//! The default model is a sinusoidal day length scaled by latitude band. It
//! is good enough to gate day/night effects, not to predict sunrise times.

use crate::core_types::season::LatitudeBand;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Daylight window for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Daylight {
    /// Local sunrise (fractional hour)
    pub sunrise_hour: f64,
    /// Local sunset (fractional hour)
    pub sunset_hour: f64,
    /// Hours of daylight (0 = polar night, 24 = midnight sun)
    pub day_length: f64,
}

impl Daylight {
    /// Whether the sun is up at `hour` (0-24)
    #[must_use]
    pub fn is_daytime(&self, hour: f64) -> bool {
        if self.day_length >= 24.0 {
            true
        } else if self.day_length <= 0.0 {
            false
        } else {
            hour >= self.sunrise_hour && hour < self.sunset_hour
        }
    }
}

/// Provides the daylight window for a date and latitude
pub trait SolarProvider {
    /// Daylight on `date` at `latitude` (degrees, negative = south)
    fn daylight(&self, date: NaiveDate, latitude: f64) -> Daylight;
}

/// Day length = 12 h ± a band-dependent swing peaking at the June solstice
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSolarModel;

impl SolarProvider for SimpleSolarModel {
    fn daylight(&self, date: NaiveDate, latitude: f64) -> Daylight {
        let band = LatitudeBand::from_latitude(latitude);
        let hemisphere = if latitude < 0.0 { -1.0 } else { 1.0 };
        let day = f64::from(date.ordinal());

        // sin() crosses zero at the March equinox (~day 80)
        let phase = 2.0 * std::f64::consts::PI * (day - 80.0) / 365.0;
        let day_length =
            (12.0 + hemisphere * band.daylight_amplitude() * phase.sin()).clamp(0.0, 24.0);

        Daylight {
            sunrise_hour: 12.0 - day_length / 2.0,
            sunset_hour: 12.0 + day_length / 2.0,
            day_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_equator_is_near_twelve_hours() {
        let daylight = SimpleSolarModel.daylight(date(6, 21), 0.0);
        assert!((daylight.day_length - 12.0).abs() <= 1.0);
        assert!(daylight.is_daytime(12.0));
        assert!(!daylight.is_daytime(2.0));
    }

    #[test]
    fn test_polar_extremes() {
        let summer = SimpleSolarModel.daylight(date(6, 21), 80.0);
        let winter = SimpleSolarModel.daylight(date(12, 21), 80.0);
        assert_eq!(summer.day_length, 24.0);
        assert!(summer.is_daytime(0.0));
        assert_eq!(winter.day_length, 0.0);
        assert!(!winter.is_daytime(12.0));
    }

    #[test]
    fn test_southern_hemisphere_inverts() {
        let north = SimpleSolarModel.daylight(date(6, 21), 45.0);
        let south = SimpleSolarModel.daylight(date(6, 21), -45.0);
        assert!(north.day_length > 12.0);
        assert!(south.day_length < 12.0);
    }
}
