//! Discrete weather conditions and wind descriptors
//!
//! The engine reduces its continuous atmospheric state to one named
//! [`WeatherCondition`] per hour. Each condition declares the temperature
//! range it is plausible in; the temperature service clamps to that range
//! after classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named hourly weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    /// Little or no cloud
    ClearSkies,
    /// Scattered cloud
    LightClouds,
    /// Overcast
    HeavyClouds,
    /// Steady rain
    Rain,
    /// Downpour
    HeavyRain,
    /// Snowfall
    Snow,
    /// Wind-driven snow
    Blizzard,
    /// Convective storm with lightning
    Thunderstorm,
    /// Reduced visibility from suspended droplets
    Fog,
    /// Dense fog
    HeavyFog,
    /// Extreme heat under open sky
    ScorchingHeat,
    /// Extreme cold
    FreezingCold,
    /// Strong cold wind
    ColdWinds,
    /// Hot, humid, hazy air
    HighHumidityHaze,
}

/// Inclusive temperature range (°F) a condition is plausible in
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureBound {
    /// Lowest plausible temperature, if bounded below
    pub min: Option<f64>,
    /// Highest plausible temperature, if bounded above
    pub max: Option<f64>,
}

impl TemperatureBound {
    const UNBOUNDED: TemperatureBound = TemperatureBound {
        min: None,
        max: None,
    };

    const fn at_most(max: f64) -> Self {
        TemperatureBound {
            min: None,
            max: Some(max),
        }
    }

    const fn at_least(min: f64) -> Self {
        TemperatureBound {
            min: Some(min),
            max: None,
        }
    }

    const fn between(min: f64, max: f64) -> Self {
        TemperatureBound {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Clamp a temperature into this bound
    #[must_use]
    pub fn clamp(&self, temperature: f64) -> f64 {
        let lower = self.min.map_or(temperature, |min| temperature.max(min));
        self.max.map_or(lower, |max| lower.min(max))
    }

    /// Whether a temperature satisfies this bound
    #[must_use]
    pub fn contains(&self, temperature: f64) -> bool {
        self.min.is_none_or(|min| temperature >= min) && self.max.is_none_or(|max| temperature <= max)
    }
}

impl WeatherCondition {
    /// Every condition, in classification order
    pub const ALL: [WeatherCondition; 14] = [
        WeatherCondition::ClearSkies,
        WeatherCondition::LightClouds,
        WeatherCondition::HeavyClouds,
        WeatherCondition::Rain,
        WeatherCondition::HeavyRain,
        WeatherCondition::Snow,
        WeatherCondition::Blizzard,
        WeatherCondition::Thunderstorm,
        WeatherCondition::Fog,
        WeatherCondition::HeavyFog,
        WeatherCondition::ScorchingHeat,
        WeatherCondition::FreezingCold,
        WeatherCondition::ColdWinds,
        WeatherCondition::HighHumidityHaze,
    ];

    /// Human readable name ("Heavy Rain")
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WeatherCondition::ClearSkies => "Clear Skies",
            WeatherCondition::LightClouds => "Light Clouds",
            WeatherCondition::HeavyClouds => "Heavy Clouds",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::HeavyRain => "Heavy Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Blizzard => "Blizzard",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::HeavyFog => "Heavy Fog",
            WeatherCondition::ScorchingHeat => "Scorching Heat",
            WeatherCondition::FreezingCold => "Freezing Cold",
            WeatherCondition::ColdWinds => "Cold Winds",
            WeatherCondition::HighHumidityHaze => "High Humidity Haze",
        }
    }

    /// Whether water (liquid or frozen) is falling this hour
    #[must_use]
    pub fn is_precipitating(self) -> bool {
        matches!(
            self,
            WeatherCondition::Rain
                | WeatherCondition::HeavyRain
                | WeatherCondition::Snow
                | WeatherCondition::Blizzard
                | WeatherCondition::Thunderstorm
        )
    }

    /// Temperature range this condition is plausible in
    ///
    /// Snow and blizzards need air at or below freezing, liquid rain air
    /// at or above it, and the temperature-extreme conditions need their
    /// extreme.
    #[must_use]
    pub fn temperature_bound(self) -> TemperatureBound {
        match self {
            WeatherCondition::Snow => TemperatureBound::at_most(32.0),
            WeatherCondition::Blizzard => TemperatureBound::at_most(30.0),
            WeatherCondition::FreezingCold => TemperatureBound::at_most(20.0),
            WeatherCondition::ColdWinds => TemperatureBound::at_most(50.0),
            WeatherCondition::Rain | WeatherCondition::HeavyRain => TemperatureBound::at_least(32.0),
            WeatherCondition::Thunderstorm => TemperatureBound::at_least(50.0),
            WeatherCondition::ScorchingHeat => TemperatureBound::at_least(95.0),
            WeatherCondition::HighHumidityHaze => TemperatureBound::at_least(75.0),
            WeatherCondition::Fog | WeatherCondition::HeavyFog => TemperatureBound::between(-10.0, 75.0),
            WeatherCondition::ClearSkies
            | WeatherCondition::LightClouds
            | WeatherCondition::HeavyClouds => TemperatureBound::UNBOUNDED,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Eight-point compass direction the wind blows from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompassDirection {
    /// North
    N,
    /// Northeast
    NE,
    /// East
    E,
    /// Southeast
    SE,
    /// South
    S,
    /// Southwest
    SW,
    /// West
    #[default]
    W,
    /// Northwest
    NW,
}

impl CompassDirection {
    /// All directions clockwise from north
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::N,
        CompassDirection::NE,
        CompassDirection::E,
        CompassDirection::SE,
        CompassDirection::S,
        CompassDirection::SW,
        CompassDirection::W,
        CompassDirection::NW,
    ];

    fn index(self) -> usize {
        match self {
            CompassDirection::N => 0,
            CompassDirection::NE => 1,
            CompassDirection::E => 2,
            CompassDirection::SE => 3,
            CompassDirection::S => 4,
            CompassDirection::SW => 5,
            CompassDirection::W => 6,
            CompassDirection::NW => 7,
        }
    }

    /// Rotate by whole compass points (positive = clockwise/veering)
    #[must_use]
    pub fn rotate(self, steps: i32) -> Self {
        let idx = (self.index() as i32 + steps).rem_euclid(8) as usize;
        Self::ALL[idx]
    }

    /// Bearing in degrees (0 = north, 90 = east)
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.index() as f64 * 45.0
    }

    /// Number of compass points between two directions (0-4)
    #[must_use]
    pub fn steps_between(self, other: CompassDirection) -> u32 {
        let diff = (self.index() as i32 - other.index() as i32).rem_euclid(8);
        diff.min(8 - diff) as u32
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompassDirection::N => "N",
            CompassDirection::NE => "NE",
            CompassDirection::E => "E",
            CompassDirection::SE => "SE",
            CompassDirection::S => "S",
            CompassDirection::SW => "SW",
            CompassDirection::W => "W",
            CompassDirection::NW => "NW",
        };
        f.write_str(name)
    }
}

/// Qualitative wind strength (roughly Beaufort groups)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WindIntensity {
    /// < 1 mph
    Calm,
    /// 1-7 mph
    Light,
    /// 8-18 mph
    Moderate,
    /// 19-31 mph
    Strong,
    /// 32-54 mph
    Gale,
    /// 55+ mph
    Storm,
}

impl WindIntensity {
    /// Classify a wind speed in mph
    #[must_use]
    pub fn from_speed(mph: f64) -> Self {
        match mph {
            s if s < 1.0 => WindIntensity::Calm,
            s if s < 8.0 => WindIntensity::Light,
            s if s < 19.0 => WindIntensity::Moderate,
            s if s < 32.0 => WindIntensity::Strong,
            s if s < 55.0 => WindIntensity::Gale,
            _ => WindIntensity::Storm,
        }
    }
}

impl fmt::Display for WindIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindIntensity::Calm => "Calm",
            WindIntensity::Light => "Light",
            WindIntensity::Moderate => "Moderate",
            WindIntensity::Strong => "Strong",
            WindIntensity::Gale => "Gale",
            WindIntensity::Storm => "Storm",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snow_requires_freezing() {
        let bound = WeatherCondition::Snow.temperature_bound();
        assert_eq!(bound.clamp(40.0), 32.0);
        assert_eq!(bound.clamp(10.0), 10.0);
        assert!(!bound.contains(33.0));
    }

    #[test]
    fn test_rain_and_snow_meet_at_freezing() {
        let rain = WeatherCondition::Rain.temperature_bound();
        let snow = WeatherCondition::Snow.temperature_bound();
        assert!(rain.contains(32.5));
        assert!(!snow.contains(32.5));
        assert!(!rain.contains(31.9));
        assert!(snow.contains(31.9));
    }

    #[test]
    fn test_two_sided_bound() {
        let bound = WeatherCondition::Fog.temperature_bound();
        assert_eq!(bound.clamp(90.0), 75.0);
        assert_eq!(bound.clamp(-20.0), -10.0);
        assert!(bound.contains(50.0));
    }

    #[test]
    fn test_compass_rotation_wraps() {
        assert_eq!(CompassDirection::N.rotate(-1), CompassDirection::NW);
        assert_eq!(CompassDirection::NW.rotate(1), CompassDirection::N);
        assert_eq!(CompassDirection::E.rotate(10), CompassDirection::S);
        assert_eq!(CompassDirection::N.steps_between(CompassDirection::S), 4);
        assert_eq!(CompassDirection::NW.steps_between(CompassDirection::NE), 2);
    }

    #[test]
    fn test_wind_intensity_thresholds() {
        assert_eq!(WindIntensity::from_speed(0.5), WindIntensity::Calm);
        assert_eq!(WindIntensity::from_speed(12.0), WindIntensity::Moderate);
        assert_eq!(WindIntensity::from_speed(40.0), WindIntensity::Gale);
        assert_eq!(WindIntensity::from_speed(75.0), WindIntensity::Storm);
    }

    #[test]
    fn test_precipitating_conditions() {
        assert!(WeatherCondition::Thunderstorm.is_precipitating());
        assert!(WeatherCondition::Snow.is_precipitating());
        assert!(!WeatherCondition::Fog.is_precipitating());
        assert_eq!(WeatherCondition::HeavyRain.to_string(), "Heavy Rain");
    }
}
