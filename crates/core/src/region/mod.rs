//! Region profiles
//!
//! A [`RegionProfile`] is the static description of the place being
//! simulated: where it is (latitude, elevation, maritime exposure), what its
//! seasons look like (per-season temperature and humidity distributions),
//! and which special surface factors modify the weather (permafrost, sea
//! ice, forest canopy, ocean currents, geological activity).
//!
//! Profiles are created once per simulation initialization by the
//! [`RegionProfileService`] and never mutated afterwards.

mod presets;
mod service;

pub use presets::{normalize_biome_key, KNOWN_BIOMES};
pub use service::{ProfileOverrides, RegionProfileService};

use crate::core_types::season::{LatitudeBand, Season};
use crate::core_types::units::{Feet, Fraction};
use serde::{Deserialize, Serialize};

/// Mean and spread of a quantity within one season
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalStats {
    /// Seasonal mean
    pub mean: f64,
    /// Typical deviation from the mean
    pub variance: f64,
}

impl SeasonalStats {
    /// Create seasonal statistics
    #[must_use]
    pub const fn new(mean: f64, variance: f64) -> Self {
        SeasonalStats { mean, variance }
    }
}

/// Per-season temperature distributions (°F, sea-level equivalent)
///
/// Means are quoted before the elevation lapse is applied, so a mountain
/// profile carries valley-floor numbers and the temperature model subtracts
/// 3.5°F per 1000 ft on top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureProfile {
    /// December-February (northern hemisphere)
    pub winter: SeasonalStats,
    /// March-May
    pub spring: SeasonalStats,
    /// June-August
    pub summer: SeasonalStats,
    /// September-November
    pub fall: SeasonalStats,
    /// Annual mean
    pub annual: f64,
}

impl TemperatureProfile {
    /// Build from the four seasons; the annual value is their average
    #[must_use]
    pub fn from_seasons(
        winter: SeasonalStats,
        spring: SeasonalStats,
        summer: SeasonalStats,
        fall: SeasonalStats,
    ) -> Self {
        let annual = (winter.mean + spring.mean + summer.mean + fall.mean) / 4.0;
        TemperatureProfile {
            winter,
            spring,
            summer,
            fall,
            annual,
        }
    }

    /// Statistics for one season
    #[must_use]
    pub fn season(&self, season: Season) -> SeasonalStats {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
        }
    }

    /// Coldest seasonal mean
    #[must_use]
    pub fn coldest_mean(&self) -> f64 {
        Season::ALL
            .iter()
            .map(|s| self.season(*s).mean)
            .fold(f64::INFINITY, f64::min)
    }

    /// Warmest seasonal mean
    #[must_use]
    pub fn warmest_mean(&self) -> f64 {
        Season::ALL
            .iter()
            .map(|s| self.season(*s).mean)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Half the spread between the warmest and coldest seasonal means
    #[must_use]
    pub fn seasonal_amplitude(&self) -> f64 {
        (self.warmest_mean() - self.coldest_mean()) / 2.0
    }
}

/// Per-season relative humidity distributions (%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidityProfile {
    /// December-February (northern hemisphere)
    pub winter: SeasonalStats,
    /// March-May
    pub spring: SeasonalStats,
    /// June-August
    pub summer: SeasonalStats,
    /// September-November
    pub fall: SeasonalStats,
    /// Annual mean
    pub annual: f64,
    /// Day of year (northern-hemisphere calendar) humidity peaks on
    pub peak_day: u16,
}

impl HumidityProfile {
    /// Build from the four seasons and the day humidity peaks
    #[must_use]
    pub fn from_seasons(
        winter: SeasonalStats,
        spring: SeasonalStats,
        summer: SeasonalStats,
        fall: SeasonalStats,
        peak_day: u16,
    ) -> Self {
        let annual = (winter.mean + spring.mean + summer.mean + fall.mean) / 4.0;
        HumidityProfile {
            winter,
            spring,
            summer,
            fall,
            annual,
            peak_day: peak_day.clamp(1, 365),
        }
    }

    /// Statistics for one season
    #[must_use]
    pub fn season(&self, season: Season) -> SeasonalStats {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
        }
    }
}

/// Named surface modifiers, each bounded to `[0, 1]`
///
/// Absent factors behave as zero. Values are clamped at construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecialFactors {
    /// Frozen ground (cools summers, deepens winters)
    pub permafrost: Option<Fraction>,
    /// Adjacent sea ice (strong winter cooling)
    pub sea_ice: Option<Fraction>,
    /// Canopy density (daytime shade, nighttime insulation)
    pub forest_density: Option<Fraction>,
    /// Warm ocean current offshore
    pub warm_current: Option<Fraction>,
    /// Cold ocean current offshore
    pub cold_current: Option<Fraction>,
    /// Seasonal snowpack (reflective cooling in cold seasons)
    pub snow_cover: Option<Fraction>,
    /// Earthquake activity
    pub seismic_activity: Option<Fraction>,
    /// Volcanic activity
    pub volcanic_activity: Option<Fraction>,
}

impl SpecialFactors {
    /// Set the permafrost factor
    pub fn with_permafrost(mut self, value: f64) -> Self {
        self.permafrost = Some(Fraction::new(value));
        self
    }

    /// Set the sea-ice factor
    pub fn with_sea_ice(mut self, value: f64) -> Self {
        self.sea_ice = Some(Fraction::new(value));
        self
    }

    /// Set the forest-density factor
    pub fn with_forest_density(mut self, value: f64) -> Self {
        self.forest_density = Some(Fraction::new(value));
        self
    }

    /// Set the warm-current factor
    pub fn with_warm_current(mut self, value: f64) -> Self {
        self.warm_current = Some(Fraction::new(value));
        self
    }

    /// Set the cold-current factor
    pub fn with_cold_current(mut self, value: f64) -> Self {
        self.cold_current = Some(Fraction::new(value));
        self
    }

    /// Set the snow-cover factor
    pub fn with_snow_cover(mut self, value: f64) -> Self {
        self.snow_cover = Some(Fraction::new(value));
        self
    }

    /// Set seismic and volcanic activity
    pub fn with_geology(mut self, seismic: f64, volcanic: f64) -> Self {
        self.seismic_activity = Some(Fraction::new(seismic));
        self.volcanic_activity = Some(Fraction::new(volcanic));
        self
    }

    fn get(factor: Option<Fraction>) -> f64 {
        factor.map_or(0.0, Fraction::value)
    }

    /// Permafrost factor (0 when absent)
    #[must_use]
    pub fn permafrost(&self) -> f64 {
        Self::get(self.permafrost)
    }

    /// Sea-ice factor (0 when absent)
    #[must_use]
    pub fn sea_ice(&self) -> f64 {
        Self::get(self.sea_ice)
    }

    /// Forest-density factor (0 when absent)
    #[must_use]
    pub fn forest_density(&self) -> f64 {
        Self::get(self.forest_density)
    }

    /// Warm-current factor (0 when absent)
    #[must_use]
    pub fn warm_current(&self) -> f64 {
        Self::get(self.warm_current)
    }

    /// Cold-current factor (0 when absent)
    #[must_use]
    pub fn cold_current(&self) -> f64 {
        Self::get(self.cold_current)
    }

    /// Snow-cover factor (0 when absent)
    #[must_use]
    pub fn snow_cover(&self) -> f64 {
        Self::get(self.snow_cover)
    }

    /// Seismic activity (0 when absent)
    #[must_use]
    pub fn seismic_activity(&self) -> f64 {
        Self::get(self.seismic_activity)
    }

    /// Volcanic activity (0 when absent)
    #[must_use]
    pub fn volcanic_activity(&self) -> f64 {
        Self::get(self.volcanic_activity)
    }
}

/// Static description of a simulated region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    /// Display name ("Desert")
    pub name: String,
    /// Canonical biome key ("desert")
    pub biome: String,
    /// Latitude in degrees (negative = southern hemisphere)
    pub latitude: f64,
    /// Elevation above sea level
    pub elevation: Feet,
    /// Ocean moderation (0 = continental, 1 = fully maritime)
    pub maritime_influence: Fraction,
    /// Terrain roughness (0 = flat, 1 = rugged); slows surface wind
    pub terrain_roughness: Fraction,
    /// Seasonal temperature distributions
    pub temperature: TemperatureProfile,
    /// Seasonal humidity distributions
    pub humidity: HumidityProfile,
    /// Surface modifiers
    pub special_factors: SpecialFactors,
}

impl RegionProfile {
    /// Latitude band this region falls in
    #[must_use]
    pub fn latitude_band(&self) -> LatitudeBand {
        LatitudeBand::from_latitude(self.latitude)
    }

    /// Whether the region lies south of the equator
    #[must_use]
    pub fn is_southern(&self) -> bool {
        self.latitude < 0.0
    }
}

/// Seasonal expectation derived from a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalBaseline {
    /// Seasonal mean temperature (°F, before elevation lapse)
    pub temperature: f64,
    /// Seasonal temperature spread
    pub temperature_variance: f64,
    /// Seasonal mean humidity (%)
    pub humidity: f64,
    /// Seasonal humidity spread
    pub humidity_variance: f64,
    /// Seasonal offset from standard sea-level pressure (hPa)
    pub pressure_offset: f64,
}
