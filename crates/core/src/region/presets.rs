//! Built-in biome presets
//!
//! Each preset is a plausible mid-latitude (or band-typical) climate for the
//! biome. Temperatures are °F at sea-level equivalent; the elevation lapse is
//! applied by the temperature model.

use super::{HumidityProfile, RegionProfile, SeasonalStats, SpecialFactors, TemperatureProfile};
use crate::core_types::units::{Feet, Fraction};

const fn s(mean: f64, variance: f64) -> SeasonalStats {
    SeasonalStats::new(mean, variance)
}

/// Canonical biome keys with a built-in preset
pub const KNOWN_BIOMES: [&str; 12] = [
    "temperate-forest",
    "temperate-grassland",
    "desert",
    "tropical-rainforest",
    "tropical-savanna",
    "mediterranean",
    "coastal",
    "swamp",
    "mountain",
    "boreal-forest",
    "tundra",
    "polar-ice",
];

/// Normalize a user-supplied biome name to a canonical key
///
/// Case, surrounding whitespace, and `_`/space separators are ignored, and
/// common aliases ("taiga", "jungle", "plains") map onto their preset.
/// Returns `None` when nothing matches.
#[must_use]
pub fn normalize_biome_key(biome: &str) -> Option<&'static str> {
    let key = biome.trim().to_ascii_lowercase().replace(['_', ' '], "-");
    let canonical = match key.as_str() {
        "temperate-forest" | "forest" | "temperate" | "woodland" | "deciduous-forest" => {
            "temperate-forest"
        }
        "temperate-grassland" | "grassland" | "plains" | "prairie" | "steppe" => {
            "temperate-grassland"
        }
        "desert" | "arid" | "dunes" | "hot-desert" => "desert",
        "tropical-rainforest" | "rainforest" | "jungle" | "tropical" => "tropical-rainforest",
        "tropical-savanna" | "savanna" | "savannah" => "tropical-savanna",
        "mediterranean" | "chaparral" => "mediterranean",
        "coastal" | "coast" | "beach" | "seaside" => "coastal",
        "swamp" | "marsh" | "wetland" | "bog" => "swamp",
        "mountain" | "mountains" | "alpine" | "highlands" => "mountain",
        "boreal-forest" | "boreal" | "taiga" => "boreal-forest",
        "tundra" => "tundra",
        "polar-ice" | "polar" | "arctic" | "ice" | "glacier" | "ice-cap" => "polar-ice",
        _ => return None,
    };
    Some(canonical)
}

impl RegionProfile {
    /// Look up the preset for a canonical biome key
    #[must_use]
    pub fn preset(key: &str) -> Option<Self> {
        let profile = match key {
            "temperate-forest" => Self::temperate_forest(),
            "temperate-grassland" => Self::temperate_grassland(),
            "desert" => Self::desert(),
            "tropical-rainforest" => Self::tropical_rainforest(),
            "tropical-savanna" => Self::tropical_savanna(),
            "mediterranean" => Self::mediterranean(),
            "coastal" => Self::coastal(),
            "swamp" => Self::swamp(),
            "mountain" => Self::mountain(),
            "boreal-forest" => Self::boreal_forest(),
            "tundra" => Self::tundra(),
            "polar-ice" => Self::polar_ice(),
            _ => return None,
        };
        Some(profile)
    }

    /// Temperate forest preset - four distinct seasons, the default fallback
    #[must_use]
    pub fn temperate_forest() -> Self {
        RegionProfile {
            name: "Temperate Forest".to_string(),
            biome: "temperate-forest".to_string(),
            latitude: 45.0,
            elevation: Feet::new(800.0),
            maritime_influence: Fraction::new(0.3),
            terrain_roughness: Fraction::new(0.5),
            temperature: TemperatureProfile::from_seasons(
                s(30.0, 8.0),
                s(52.0, 9.0),
                s(72.0, 7.0),
                s(54.0, 9.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(72.0, 8.0),
                s(65.0, 10.0),
                s(68.0, 10.0),
                s(70.0, 9.0),
                350,
            ),
            special_factors: SpecialFactors::default()
                .with_forest_density(0.7)
                .with_geology(0.05, 0.0),
        }
    }

    /// Temperate grassland preset - continental, windy, large seasonal swing
    #[must_use]
    pub fn temperate_grassland() -> Self {
        RegionProfile {
            name: "Temperate Grassland".to_string(),
            biome: "temperate-grassland".to_string(),
            latitude: 42.0,
            elevation: Feet::new(1500.0),
            maritime_influence: Fraction::new(0.1),
            terrain_roughness: Fraction::new(0.15),
            temperature: TemperatureProfile::from_seasons(
                s(26.0, 10.0),
                s(54.0, 11.0),
                s(80.0, 9.0),
                s(56.0, 10.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(65.0, 9.0),
                s(55.0, 11.0),
                s(55.0, 12.0),
                s(58.0, 10.0),
                15,
            ),
            special_factors: SpecialFactors::default().with_geology(0.05, 0.0),
        }
    }

    /// Desert preset - hot, very dry, big day/night swing
    ///
    /// Summer daytime highs commonly exceed 100°F while nights fall into the
    /// 70s; humidity rarely rises above 30%.
    #[must_use]
    pub fn desert() -> Self {
        RegionProfile {
            name: "Desert".to_string(),
            biome: "desert".to_string(),
            latitude: 28.0,
            elevation: Feet::new(1000.0),
            maritime_influence: Fraction::new(0.05),
            terrain_roughness: Fraction::new(0.3),
            temperature: TemperatureProfile::from_seasons(
                s(60.0, 10.0),
                s(78.0, 11.0),
                s(98.0, 9.0),
                s(80.0, 10.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(30.0, 8.0),
                s(20.0, 7.0),
                s(15.0, 6.0),
                s(22.0, 7.0),
                15,
            ),
            special_factors: SpecialFactors::default().with_geology(0.1, 0.02),
        }
    }

    /// Tropical rainforest preset - hot, saturated, little seasonality
    #[must_use]
    pub fn tropical_rainforest() -> Self {
        RegionProfile {
            name: "Tropical Rainforest".to_string(),
            biome: "tropical-rainforest".to_string(),
            latitude: 3.0,
            elevation: Feet::new(500.0),
            maritime_influence: Fraction::new(0.5),
            terrain_roughness: Fraction::new(0.8),
            temperature: TemperatureProfile::from_seasons(
                s(79.0, 4.0),
                s(81.0, 4.0),
                s(82.0, 4.0),
                s(80.0, 4.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(85.0, 6.0),
                s(84.0, 6.0),
                s(83.0, 7.0),
                s(86.0, 6.0),
                320,
            ),
            special_factors: SpecialFactors::default()
                .with_forest_density(1.0)
                .with_geology(0.2, 0.1),
        }
    }

    /// Tropical savanna preset - hot with a pronounced wet season
    #[must_use]
    pub fn tropical_savanna() -> Self {
        RegionProfile {
            name: "Tropical Savanna".to_string(),
            biome: "tropical-savanna".to_string(),
            latitude: 12.0,
            elevation: Feet::new(1200.0),
            maritime_influence: Fraction::new(0.2),
            terrain_roughness: Fraction::new(0.3),
            temperature: TemperatureProfile::from_seasons(
                s(76.0, 7.0),
                s(86.0, 7.0),
                s(82.0, 6.0),
                s(80.0, 6.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(45.0, 10.0),
                s(55.0, 10.0),
                s(78.0, 8.0),
                s(62.0, 10.0),
                200,
            ),
            special_factors: SpecialFactors::default()
                .with_forest_density(0.2)
                .with_geology(0.05, 0.02),
        }
    }

    /// Mediterranean preset - mild wet winters, hot dry summers
    #[must_use]
    pub fn mediterranean() -> Self {
        RegionProfile {
            name: "Mediterranean".to_string(),
            biome: "mediterranean".to_string(),
            latitude: 37.0,
            elevation: Feet::new(300.0),
            maritime_influence: Fraction::new(0.6),
            terrain_roughness: Fraction::new(0.4),
            temperature: TemperatureProfile::from_seasons(
                s(50.0, 6.0),
                s(61.0, 7.0),
                s(78.0, 7.0),
                s(66.0, 7.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(72.0, 8.0),
                s(63.0, 9.0),
                s(50.0, 9.0),
                s(62.0, 9.0),
                15,
            ),
            special_factors: SpecialFactors::default()
                .with_cold_current(0.2)
                .with_geology(0.3, 0.05),
        }
    }

    /// Coastal preset - strongly maritime, damped extremes
    #[must_use]
    pub fn coastal() -> Self {
        RegionProfile {
            name: "Coastal".to_string(),
            biome: "coastal".to_string(),
            latitude: 40.0,
            elevation: Feet::new(50.0),
            maritime_influence: Fraction::new(0.9),
            terrain_roughness: Fraction::new(0.2),
            temperature: TemperatureProfile::from_seasons(
                s(40.0, 6.0),
                s(53.0, 6.0),
                s(70.0, 5.0),
                s(59.0, 6.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(75.0, 7.0),
                s(74.0, 7.0),
                s(77.0, 7.0),
                s(75.0, 7.0),
                200,
            ),
            special_factors: SpecialFactors::default()
                .with_warm_current(0.4)
                .with_geology(0.3, 0.0),
        }
    }

    /// Swamp preset - hot, humid, foggy mornings
    #[must_use]
    pub fn swamp() -> Self {
        RegionProfile {
            name: "Swamp".to_string(),
            biome: "swamp".to_string(),
            latitude: 30.0,
            elevation: Feet::new(20.0),
            maritime_influence: Fraction::new(0.5),
            terrain_roughness: Fraction::new(0.3),
            temperature: TemperatureProfile::from_seasons(
                s(55.0, 8.0),
                s(70.0, 7.0),
                s(83.0, 5.0),
                s(71.0, 7.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(80.0, 7.0),
                s(78.0, 7.0),
                s(85.0, 6.0),
                s(82.0, 7.0),
                210,
            ),
            special_factors: SpecialFactors::default()
                .with_forest_density(0.5)
                .with_geology(0.02, 0.0),
        }
    }

    /// Mountain preset - high elevation, rugged terrain, snowpack
    #[must_use]
    pub fn mountain() -> Self {
        RegionProfile {
            name: "Mountain".to_string(),
            biome: "mountain".to_string(),
            latitude: 40.0,
            elevation: Feet::new(8000.0),
            maritime_influence: Fraction::new(0.1),
            terrain_roughness: Fraction::new(0.95),
            temperature: TemperatureProfile::from_seasons(
                s(48.0, 9.0),
                s(62.0, 9.0),
                s(80.0, 8.0),
                s(64.0, 9.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(60.0, 10.0),
                s(55.0, 10.0),
                s(50.0, 12.0),
                s(52.0, 10.0),
                30,
            ),
            special_factors: SpecialFactors::default()
                .with_forest_density(0.3)
                .with_snow_cover(0.6)
                .with_geology(0.4, 0.2),
        }
    }

    /// Boreal forest (taiga) preset - long cold winters, short mild summers
    #[must_use]
    pub fn boreal_forest() -> Self {
        RegionProfile {
            name: "Boreal Forest".to_string(),
            biome: "boreal-forest".to_string(),
            latitude: 58.0,
            elevation: Feet::new(1000.0),
            maritime_influence: Fraction::new(0.15),
            terrain_roughness: Fraction::new(0.6),
            temperature: TemperatureProfile::from_seasons(
                s(2.0, 12.0),
                s(36.0, 10.0),
                s(63.0, 8.0),
                s(36.0, 10.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(76.0, 7.0),
                s(65.0, 9.0),
                s(68.0, 9.0),
                s(78.0, 8.0),
                330,
            ),
            special_factors: SpecialFactors::default()
                .with_forest_density(0.8)
                .with_permafrost(0.3)
                .with_snow_cover(0.7)
                .with_geology(0.02, 0.0),
        }
    }

    /// Tundra preset - treeless, permafrost, cool brief summers
    #[must_use]
    pub fn tundra() -> Self {
        RegionProfile {
            name: "Tundra".to_string(),
            biome: "tundra".to_string(),
            latitude: 68.0,
            elevation: Feet::new(300.0),
            maritime_influence: Fraction::new(0.2),
            terrain_roughness: Fraction::new(0.2),
            temperature: TemperatureProfile::from_seasons(
                s(-16.0, 10.0),
                s(12.0, 10.0),
                s(44.0, 6.0),
                s(20.0, 10.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(70.0, 8.0),
                s(72.0, 8.0),
                s(75.0, 8.0),
                s(78.0, 8.0),
                280,
            ),
            special_factors: SpecialFactors::default()
                .with_permafrost(0.9)
                .with_sea_ice(0.2)
                .with_snow_cover(0.8)
                .with_geology(0.02, 0.0),
        }
    }

    /// Polar ice preset - ice sheet, permanent cold
    #[must_use]
    pub fn polar_ice() -> Self {
        RegionProfile {
            name: "Polar Ice".to_string(),
            biome: "polar-ice".to_string(),
            latitude: 80.0,
            elevation: Feet::new(2500.0),
            maritime_influence: Fraction::new(0.3),
            terrain_roughness: Fraction::new(0.1),
            temperature: TemperatureProfile::from_seasons(
                s(-26.0, 8.0),
                s(-12.0, 8.0),
                s(32.0, 5.0),
                s(-8.0, 8.0),
            ),
            humidity: HumidityProfile::from_seasons(
                s(65.0, 8.0),
                s(66.0, 8.0),
                s(75.0, 8.0),
                s(70.0, 8.0),
                200,
            ),
            special_factors: SpecialFactors::default()
                .with_permafrost(1.0)
                .with_sea_ice(0.9)
                .with_snow_cover(1.0)
                .with_geology(0.02, 0.05),
        }
    }

    /// Create a custom profile with flat seasons
    ///
    /// Intended for quick synthetic regions in demos and tests where only
    /// location and a single temperature/humidity climate matter.
    #[must_use]
    pub fn custom(
        name: impl Into<String>,
        latitude: f64,
        elevation: Feet,
        mean_temperature: f64,
        mean_humidity: f64,
    ) -> Self {
        let temperature = s(mean_temperature, 6.0);
        let humidity = s(mean_humidity, 8.0);
        RegionProfile {
            name: name.into(),
            biome: "custom".to_string(),
            latitude,
            elevation,
            maritime_influence: Fraction::new(0.3),
            terrain_roughness: Fraction::new(0.3),
            temperature: TemperatureProfile::from_seasons(
                temperature,
                temperature,
                temperature,
                temperature,
            ),
            humidity: HumidityProfile::from_seasons(humidity, humidity, humidity, humidity, 180),
            special_factors: SpecialFactors::default(),
        }
    }
}
