//! Region profile lookup and seasonal baselines

use super::{normalize_biome_key, RegionProfile, SeasonalBaseline};
use crate::core_types::season::Season;
use crate::core_types::units::{Feet, Fraction};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Optional adjustments applied on top of a biome preset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileOverrides {
    /// Replace the preset latitude (degrees, clamped to ±90)
    pub latitude: Option<f64>,
    /// Replace the preset elevation (feet)
    pub elevation: Option<f64>,
    /// Replace the preset maritime influence (0-1)
    pub maritime_influence: Option<f64>,
}

impl ProfileOverrides {
    fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.elevation.is_none() && self.maritime_influence.is_none()
    }

    fn cache_suffix(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |x| format!("{x:.4}"));
        format!(
            "|lat={}|elev={}|mar={}",
            fmt(self.latitude),
            fmt(self.elevation),
            fmt(self.maritime_influence)
        )
    }

    fn apply(&self, profile: &mut RegionProfile) {
        if let Some(lat) = self.latitude.filter(|v| v.is_finite()) {
            profile.latitude = lat.clamp(-90.0, 90.0);
        }
        if let Some(elevation) = self.elevation.filter(|v| v.is_finite()) {
            profile.elevation = Feet::new(elevation.max(-1500.0));
        }
        if let Some(maritime) = self.maritime_influence {
            profile.maritime_influence = Fraction::new(maritime);
        }
    }
}

/// Maps biome identifiers to cached, immutable region profiles
///
/// Unknown biomes fall back to the temperate forest preset. Profiles are
/// cached per biome + overrides, so repeated initializations of the same
/// region share one allocation.
#[derive(Debug, Default)]
pub struct RegionProfileService {
    cache: FxHashMap<String, Arc<RegionProfile>>,
}

impl RegionProfileService {
    /// Biome used when a key is not recognised
    pub const DEFAULT_BIOME: &'static str = "temperate-forest";

    /// Create an empty service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached profiles
    #[must_use]
    pub fn cached_profiles(&self) -> usize {
        self.cache.len()
    }

    /// Get the profile for a biome, applying overrides
    pub fn get_profile(&mut self, biome: &str, overrides: &ProfileOverrides) -> Arc<RegionProfile> {
        let key = normalize_biome_key(biome).unwrap_or_else(|| {
            warn!(biome, fallback = Self::DEFAULT_BIOME, "Unknown biome, using default profile");
            Self::DEFAULT_BIOME
        });
        let cache_key = format!("{key}{}", overrides.cache_suffix());

        if let Some(profile) = self.cache.get(&cache_key) {
            return Arc::clone(profile);
        }

        let mut profile = RegionProfile::preset(key).unwrap_or_else(RegionProfile::temperate_forest);
        overrides.apply(&mut profile);
        debug!(
            cache_key = %cache_key,
            latitude = profile.latitude,
            band = %profile.latitude_band(),
            "Created region profile"
        );

        let profile = Arc::new(profile);
        self.cache.insert(cache_key, Arc::clone(&profile));
        profile
    }

    /// Seasonal expectation for a profile
    ///
    /// Pressure runs higher in the cold half of the year and lower in summer;
    /// continental regions (low maritime influence) swing further than
    /// maritime ones, and sea ice strengthens the winter high.
    #[must_use]
    pub fn seasonal_baseline(profile: &RegionProfile, season: Season) -> SeasonalBaseline {
        let temperature = profile.temperature.season(season);
        let humidity = profile.humidity.season(season);

        let season_offset = match season {
            Season::Winter => 3.0,
            Season::Spring => 0.0,
            Season::Summer => -2.0,
            Season::Fall => 1.0,
        };
        let continentality = 1.0 + 0.5 * (1.0 - *profile.maritime_influence);
        let ice_high = if season == Season::Winter {
            2.0 * profile.special_factors.sea_ice()
        } else {
            0.0
        };

        SeasonalBaseline {
            temperature: temperature.mean,
            temperature_variance: temperature.variance.max(0.0),
            humidity: humidity.mean.clamp(0.0, 100.0),
            humidity_variance: humidity.variance.max(0.0),
            pressure_offset: season_offset * continentality + ice_high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_biome_falls_back() {
        let mut service = RegionProfileService::new();
        let profile = service.get_profile("volcanic-wasteland", &ProfileOverrides::default());
        assert_eq!(profile.biome, RegionProfileService::DEFAULT_BIOME);
    }

    #[test]
    fn test_profiles_are_cached() {
        let mut service = RegionProfileService::new();
        let a = service.get_profile("desert", &ProfileOverrides::default());
        let b = service.get_profile("Desert", &ProfileOverrides::default());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(service.cached_profiles(), 1);
    }

    #[test]
    fn test_overrides_create_distinct_entries() {
        let mut service = RegionProfileService::new();
        let base = service.get_profile("coastal", &ProfileOverrides::default());
        let southern = service.get_profile(
            "coastal",
            &ProfileOverrides {
                latitude: Some(-40.0),
                maritime_influence: Some(2.0),
                ..ProfileOverrides::default()
            },
        );
        assert_eq!(service.cached_profiles(), 2);
        assert!(southern.is_southern());
        assert_eq!(*southern.maritime_influence, 1.0);
        assert!(!base.is_southern());
    }

    #[test]
    fn test_seasonal_baseline_pressure() {
        let grassland = RegionProfile::temperate_grassland();
        let winter = RegionProfileService::seasonal_baseline(&grassland, Season::Winter);
        let summer = RegionProfileService::seasonal_baseline(&grassland, Season::Summer);
        assert!(winter.pressure_offset > 0.0);
        assert!(summer.pressure_offset < 0.0);
        assert_eq!(summer.temperature, grassland.temperature.summer.mean);
    }
}
