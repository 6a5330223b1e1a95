//! Seasons, latitude bands, and timestamp parsing
//!
//! Seasons drive which per-season distribution of a region profile is used;
//! latitude bands carry the band-specific corrections (amplitude compression,
//! temperature caps, radiative attenuation) the temperature model applies.

use crate::error::{Result, WeatherError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meteorological season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Coldest quarter
    Winter,
    /// Warming quarter
    Spring,
    /// Warmest quarter
    Summer,
    /// Cooling quarter (autumn)
    Fall,
}

impl Season {
    /// All seasons in calendar order starting from winter
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Lowercase display name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }

    /// Winter and fall carry more and stronger weather systems
    #[must_use]
    pub fn is_stormy(self) -> bool {
        matches!(self, Season::Winter | Season::Fall)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Season {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            _ => Err(WeatherError::InvalidSeason(s.to_string())),
        }
    }
}

/// Either a fixed season or "resolve from the date"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonSelection {
    /// Ask the season resolver for every simulated hour
    #[default]
    Auto,
    /// Pin the season regardless of the calendar
    Fixed(Season),
}

impl FromStr for SeasonSelection {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(SeasonSelection::Auto)
        } else {
            s.parse().map(SeasonSelection::Fixed)
        }
    }
}

impl From<Season> for SeasonSelection {
    fn from(season: Season) -> Self {
        SeasonSelection::Fixed(season)
    }
}

/// Parse a simulation timestamp
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]` and a bare
/// `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    let trimmed = input.trim();
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| WeatherError::InvalidTimestamp {
                input: input.to_string(),
                reason: "midnight out of range".to_string(),
            }),
        Err(e) => Err(WeatherError::InvalidTimestamp {
            input: input.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Climatic latitude band
///
/// | Band        | |latitude|    |
/// |-------------|---------------|
/// | Tropical    | < 23.5°       |
/// | Subtropical | 23.5° - 35°   |
/// | Temperate   | 35° - 55°     |
/// | Subarctic   | 55° - 66.5°   |
/// | Polar       | ≥ 66.5°       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LatitudeBand {
    /// Between the tropics
    Tropical,
    /// Horse latitudes
    Subtropical,
    /// Mid latitudes
    Temperate,
    /// Boreal belt below the polar circle
    Subarctic,
    /// Inside the polar circles
    Polar,
}

impl LatitudeBand {
    /// Classify a latitude in degrees (either hemisphere)
    #[must_use]
    pub fn from_latitude(latitude: f64) -> Self {
        let lat = latitude.abs();
        if lat < 23.5 {
            LatitudeBand::Tropical
        } else if lat < 35.0 {
            LatitudeBand::Subtropical
        } else if lat < 55.0 {
            LatitudeBand::Temperate
        } else if lat < 66.5 {
            LatitudeBand::Subarctic
        } else {
            LatitudeBand::Polar
        }
    }

    /// Compression applied to the seasonal temperature amplitude
    #[must_use]
    pub fn amplitude_factor(self) -> f64 {
        match self {
            LatitudeBand::Tropical | LatitudeBand::Subtropical | LatitudeBand::Temperate => 1.0,
            LatitudeBand::Subarctic => 0.85,
            LatitudeBand::Polar => 0.7,
        }
    }

    /// Scale on the day/night swing (polar days and nights are long and flat)
    #[must_use]
    pub fn diurnal_factor(self) -> f64 {
        match self {
            LatitudeBand::Tropical => 0.9,
            LatitudeBand::Subtropical | LatitudeBand::Temperate => 1.0,
            LatitudeBand::Subarctic => 0.75,
            LatitudeBand::Polar => 0.5,
        }
    }

    /// Attenuation of the cloud radiative effect (weak sun at high latitude)
    #[must_use]
    pub fn cloud_radiative_factor(self) -> f64 {
        match self {
            LatitudeBand::Tropical | LatitudeBand::Subtropical | LatitudeBand::Temperate => 1.0,
            LatitudeBand::Subarctic => 0.8,
            LatitudeBand::Polar => 0.6,
        }
    }

    /// Whether simulated wind chill feeds back into air temperature
    #[must_use]
    pub fn has_wind_chill(self) -> bool {
        matches!(self, LatitudeBand::Subarctic | LatitudeBand::Polar)
    }

    /// Half the yearly swing in day length, in hours
    #[must_use]
    pub fn daylight_amplitude(self) -> f64 {
        match self {
            LatitudeBand::Tropical => 1.0,
            LatitudeBand::Subtropical => 2.0,
            LatitudeBand::Temperate => 3.5,
            LatitudeBand::Subarctic => 6.0,
            LatitudeBand::Polar => 12.0,
        }
    }

    /// Hard temperature bounds (°F) for a season
    ///
    /// Polar summers are capped near 45°F and polar winters floored near
    /// −40°F; other bands use one range year-round.
    #[must_use]
    pub fn temperature_bounds(self, season: Season) -> (f64, f64) {
        match (self, season) {
            (LatitudeBand::Tropical, _) => (40.0, 115.0),
            (LatitudeBand::Subtropical, _) => (10.0, 120.0),
            (LatitudeBand::Temperate, _) => (-30.0, 110.0),
            (LatitudeBand::Subarctic, _) => (-55.0, 92.0),
            (LatitudeBand::Polar, Season::Summer) => (-10.0, 45.0),
            (LatitudeBand::Polar, Season::Winter) => (-40.0, 32.0),
            (LatitudeBand::Polar, _) => (-40.0, 40.0),
        }
    }
}

impl fmt::Display for LatitudeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LatitudeBand::Tropical => "tropical",
            LatitudeBand::Subtropical => "subtropical",
            LatitudeBand::Temperate => "temperate",
            LatitudeBand::Subarctic => "subarctic",
            LatitudeBand::Polar => "polar",
        };
        f.write_str(name)
    }
}
