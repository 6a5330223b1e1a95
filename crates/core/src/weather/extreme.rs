//! Rare extreme events
//!
//! Every hour each event type checks a compound precondition over the
//! current state and recent history; if it holds, the event fires with a
//! very small probability. Geological events ignore the weather and key
//! off the region's seismic and volcanic activity instead.
//!
//! Events annotate the hour they occur in. They do not feed back into
//! later hours.

use super::precipitation::PrecipitationService;
use crate::core_types::condition::WeatherCondition;
use crate::core_types::forecast::ForecastEntry;
use crate::core_types::season::{LatitudeBand, Season};
use crate::core_types::units::{Fahrenheit, Hectopascals, MilesPerHour, Percent};
use crate::region::RegionProfile;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Qualitative severity for events without their own scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Local, short-lived
    Minor,
    /// Disruptive
    Moderate,
    /// Dangerous
    Severe,
    /// Catastrophic
    Extreme,
}

impl Severity {
    const ALL: [Severity; 4] = [
        Severity::Minor,
        Severity::Moderate,
        Severity::Severe,
        Severity::Extreme,
    ];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Minor => "Minor",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::Extreme => "Extreme",
        };
        f.write_str(name)
    }
}

/// A headline extreme event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExtremeEvent {
    /// Enhanced Fujita rating 0-5
    Tornado { rating: u8 },
    /// Saffir-Simpson category 1-5
    Hurricane { category: u8 },
    /// Flash or river flooding
    Flood { severity: Severity },
    /// Wildfire in the region
    Wildfire { severity: Severity },
    /// Declared drought
    Drought { severity: Severity },
    /// Prolonged extreme heat
    Heatwave { severity: Severity },
    /// Earthquake of the given moment magnitude
    Earthquake { magnitude: f64 },
    /// Volcanic eruption with the given explosivity index
    VolcanicEruption { vei: u8 },
}

impl ExtremeEvent {
    /// Short event name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ExtremeEvent::Tornado { .. } => "Tornado",
            ExtremeEvent::Hurricane { .. } => "Hurricane",
            ExtremeEvent::Flood { .. } => "Flood",
            ExtremeEvent::Wildfire { .. } => "Wildfire",
            ExtremeEvent::Drought { .. } => "Drought",
            ExtremeEvent::Heatwave { .. } => "Heatwave",
            ExtremeEvent::Earthquake { .. } => "Earthquake",
            ExtremeEvent::VolcanicEruption { .. } => "Volcanic Eruption",
        }
    }

    /// Earthquakes and eruptions
    #[must_use]
    pub fn is_geological(&self) -> bool {
        matches!(
            self,
            ExtremeEvent::Earthquake { .. } | ExtremeEvent::VolcanicEruption { .. }
        )
    }
}

impl fmt::Display for ExtremeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtremeEvent::Tornado { rating } => write!(f, "EF{rating} Tornado"),
            ExtremeEvent::Hurricane { category } => write!(f, "Category {category} Hurricane"),
            ExtremeEvent::Flood { severity }
            | ExtremeEvent::Wildfire { severity }
            | ExtremeEvent::Drought { severity }
            | ExtremeEvent::Heatwave { severity } => write!(f, "{severity} {}", self.name()),
            ExtremeEvent::Earthquake { magnitude } => write!(f, "M{magnitude:.1} Earthquake"),
            ExtremeEvent::VolcanicEruption { vei } => write!(f, "VEI {vei} Volcanic Eruption"),
        }
    }
}

/// Extreme event sampling settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtremeWeatherConfig {
    /// Sample events at all
    pub enabled: bool,
    /// Multiplier on every hourly probability (capped at certainty)
    pub probability_scale: f64,
}

impl Default for ExtremeWeatherConfig {
    fn default() -> Self {
        ExtremeWeatherConfig {
            enabled: true,
            probability_scale: 1.0,
        }
    }
}

/// Everything the samplers look at for one hour
#[derive(Debug, Clone, Copy)]
pub struct ExtremeContext<'a> {
    /// Region being simulated
    pub profile: &'a RegionProfile,
    /// Current season
    pub season: Season,
    /// This hour's condition
    pub condition: WeatherCondition,
    /// Air temperature
    pub temperature: Fahrenheit,
    /// Relative humidity
    pub humidity: Percent,
    /// Sustained wind
    pub wind_speed: MilesPerHour,
    /// Sea-level pressure
    pub pressure: Hectopascals,
    /// Pressure tendency (hPa/hour)
    pub pressure_trend: f64,
    /// Instability (0-10)
    pub instability: f64,
    /// Precipitation history
    pub precipitation: &'a PrecipitationService,
    /// Preceding forecast hours, oldest first
    pub history: &'a [ForecastEntry],
}

// ═══════════════════════════════════════════════════════════════════════
// HOURLY PROBABILITIES AND SEVERITY WEIGHTS
// ═══════════════════════════════════════════════════════════════════════

const TORNADO_CHANCE: f64 = 1e-4;
const HURRICANE_CHANCE: f64 = 1e-5;
const FLOOD_CHANCE: f64 = 1e-4;
const WILDFIRE_CHANCE: f64 = 1e-4;
const DROUGHT_CHANCE: f64 = 1e-5;
const HEATWAVE_CHANCE: f64 = 1e-4;
/// Scaled by seismic activity
const EARTHQUAKE_CHANCE: f64 = 1e-5;
/// Scaled by volcanic activity
const ERUPTION_CHANCE: f64 = 1e-6;

/// EF0..EF5
const TORNADO_WEIGHTS: [u32; 6] = [40, 30, 18, 8, 3, 1];
/// Category 1..5
const HURRICANE_WEIGHTS: [u32; 5] = [35, 30, 20, 10, 5];
/// Minor..Extreme
const SEVERITY_WEIGHTS: [u32; 4] = [50, 30, 15, 5];
/// Magnitude 3..8
const MAGNITUDE_WEIGHTS: [u32; 6] = [50, 30, 12, 5, 2, 1];
/// VEI 0..5
const VEI_WEIGHTS: [u32; 6] = [40, 30, 18, 8, 3, 1];

/// Hours of history a heatwave must be visible in
const HEATWAVE_HOURS: usize = 6;

fn pick(weights: &[u32], rng: &mut impl Rng) -> usize {
    WeightedIndex::new(weights).map_or(0, |dist| dist.sample(rng))
}

fn index_u8(index: usize) -> u8 {
    u8::try_from(index).unwrap_or(u8::MAX)
}

/// Samples at most one extreme event per hour
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtremeWeatherService {
    config: ExtremeWeatherConfig,
}

impl ExtremeWeatherService {
    /// Create a sampler with the given settings
    #[must_use]
    pub fn new(config: ExtremeWeatherConfig) -> Self {
        ExtremeWeatherService { config }
    }

    /// Current settings
    #[must_use]
    pub fn config(&self) -> &ExtremeWeatherConfig {
        &self.config
    }

    fn roll(&self, chance: f64, rng: &mut impl Rng) -> bool {
        let p = (chance * self.config.probability_scale).clamp(0.0, 1.0);
        p > 0.0 && rng.random_bool(p)
    }

    /// Check for an event this hour
    ///
    /// When both a weather and a geological event fire, the geological one
    /// is reported half the time.
    pub fn check(&self, ctx: &ExtremeContext<'_>, rng: &mut impl Rng) -> Option<ExtremeEvent> {
        if !self.config.enabled {
            return None;
        }

        let weather = self.check_weather(ctx, rng);
        let geological = self.check_geological(ctx.profile, rng);

        let event = match (weather, geological) {
            (Some(w), Some(g)) => Some(if rng.random_bool(0.5) { g } else { w }),
            (w, g) => w.or(g),
        };
        if let Some(event) = &event {
            info!(event = %event, "Extreme event");
        }
        event
    }

    fn check_weather(&self, ctx: &ExtremeContext<'_>, rng: &mut impl Rng) -> Option<ExtremeEvent> {
        if Self::tornado_possible(ctx) && self.roll(TORNADO_CHANCE, rng) {
            let rating = index_u8(pick(&TORNADO_WEIGHTS, rng));
            return Some(ExtremeEvent::Tornado { rating });
        }
        if Self::hurricane_possible(ctx) && self.roll(HURRICANE_CHANCE, rng) {
            let category = index_u8(pick(&HURRICANE_WEIGHTS, rng) + 1);
            return Some(ExtremeEvent::Hurricane { category });
        }
        if ctx.precipitation.is_flood_risk_present() && self.roll(FLOOD_CHANCE, rng) {
            let severity = Severity::ALL[pick(&SEVERITY_WEIGHTS, rng)];
            return Some(ExtremeEvent::Flood { severity });
        }
        if Self::wildfire_possible(ctx) && self.roll(WILDFIRE_CHANCE, rng) {
            let severity = Severity::ALL[pick(&SEVERITY_WEIGHTS, rng)];
            return Some(ExtremeEvent::Wildfire { severity });
        }
        if Self::drought_possible(ctx) && self.roll(DROUGHT_CHANCE, rng) {
            let severity = Severity::ALL[pick(&SEVERITY_WEIGHTS, rng)];
            return Some(ExtremeEvent::Drought { severity });
        }
        if Self::heatwave_possible(ctx) && self.roll(HEATWAVE_CHANCE, rng) {
            let severity = Severity::ALL[pick(&SEVERITY_WEIGHTS, rng)];
            return Some(ExtremeEvent::Heatwave { severity });
        }
        None
    }

    fn check_geological(
        &self,
        profile: &RegionProfile,
        rng: &mut impl Rng,
    ) -> Option<ExtremeEvent> {
        let seismic = profile.special_factors.seismic_activity();
        if seismic > 0.0 && self.roll(EARTHQUAKE_CHANCE * seismic, rng) {
            let whole = (pick(&MAGNITUDE_WEIGHTS, rng) + 3) as f64;
            let magnitude = whole + rng.random_range(0.0..1.0);
            debug!(magnitude, seismic, "Earthquake sampled");
            return Some(ExtremeEvent::Earthquake { magnitude });
        }

        let volcanic = profile.special_factors.volcanic_activity();
        if volcanic > 0.0 && self.roll(ERUPTION_CHANCE * volcanic, rng) {
            let vei = index_u8(pick(&VEI_WEIGHTS, rng));
            debug!(vei, volcanic, "Eruption sampled");
            return Some(ExtremeEvent::VolcanicEruption { vei });
        }
        None
    }

    /// Supercell with strong, falling-pressure shear
    #[must_use]
    pub fn tornado_possible(ctx: &ExtremeContext<'_>) -> bool {
        ctx.condition == WeatherCondition::Thunderstorm
            && ctx.instability > 8.0
            && *ctx.wind_speed > 20.0
            && ctx.pressure_trend < -1.0
    }

    /// Deep low over warm maritime water in the warm half of the year
    #[must_use]
    pub fn hurricane_possible(ctx: &ExtremeContext<'_>) -> bool {
        matches!(
            ctx.profile.latitude_band(),
            LatitudeBand::Tropical | LatitudeBand::Subtropical
        ) && *ctx.profile.maritime_influence > 0.5
            && matches!(ctx.season, Season::Summer | Season::Fall)
            && *ctx.pressure < 1000.0
            && *ctx.wind_speed > 40.0
    }

    /// Hot, dry, windy, and no rain for a day
    #[must_use]
    pub fn wildfire_possible(ctx: &ExtremeContext<'_>) -> bool {
        *ctx.temperature > 90.0
            && *ctx.humidity < 20.0
            && *ctx.wind_speed > 15.0
            && ctx.precipitation.is_drought_condition()
    }

    /// A dry day on record with hot, parched air
    #[must_use]
    pub fn drought_possible(ctx: &ExtremeContext<'_>) -> bool {
        ctx.precipitation.is_drought_condition()
            && *ctx.temperature > 85.0
            && *ctx.humidity < 30.0
    }

    /// Several scorching hours in recent history and still scorching
    #[must_use]
    pub fn heatwave_possible(ctx: &ExtremeContext<'_>) -> bool {
        let hot_hours = ctx
            .history
            .iter()
            .rev()
            .take(24)
            .filter(|entry| *entry.temperature > 95.0)
            .count();
        *ctx.temperature > 95.0 && hot_hours >= HEATWAVE_HOURS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn context<'a>(
        profile: &'a RegionProfile,
        precipitation: &'a PrecipitationService,
    ) -> ExtremeContext<'a> {
        ExtremeContext {
            profile,
            season: Season::Summer,
            condition: WeatherCondition::Thunderstorm,
            temperature: Fahrenheit::new(88.0),
            humidity: Percent::new(75.0),
            wind_speed: MilesPerHour::new(30.0),
            pressure: Hectopascals::new(995.0),
            pressure_trend: -2.0,
            instability: 9.5,
            precipitation,
            history: &[],
        }
    }

    #[test]
    fn test_tornado_preconditions() {
        let profile = RegionProfile::temperate_grassland();
        let precipitation = PrecipitationService::new();
        let mut ctx = context(&profile, &precipitation);
        assert!(ExtremeWeatherService::tornado_possible(&ctx));
        ctx.condition = WeatherCondition::Rain;
        assert!(!ExtremeWeatherService::tornado_possible(&ctx));
    }

    #[test]
    fn test_hurricane_needs_tropical_coast() {
        let inland = RegionProfile::temperate_grassland();
        let mut tropical = RegionProfile::tropical_rainforest();
        tropical.maritime_influence = crate::core_types::units::Fraction::new(0.9);
        let precipitation = PrecipitationService::new();
        let mut ctx = context(&tropical, &precipitation);
        ctx.wind_speed = MilesPerHour::new(60.0);
        assert!(ExtremeWeatherService::hurricane_possible(&ctx));
        ctx.profile = &inland;
        assert!(!ExtremeWeatherService::hurricane_possible(&ctx));
    }

    #[test]
    fn test_disabled_never_fires() {
        let profile = RegionProfile::temperate_grassland();
        let precipitation = PrecipitationService::new();
        let ctx = context(&profile, &precipitation);
        let service = ExtremeWeatherService::new(ExtremeWeatherConfig {
            enabled: false,
            probability_scale: 1e9,
        });
        let mut rng = StdRng::seed_from_u64(0);
        assert!(service.check(&ctx, &mut rng).is_none());
    }

    #[test]
    fn test_scaled_probability_fires() {
        let mut profile = RegionProfile::temperate_grassland();
        profile.special_factors = crate::region::SpecialFactors::default();
        let precipitation = PrecipitationService::new();
        let ctx = context(&profile, &precipitation);
        let service = ExtremeWeatherService::new(ExtremeWeatherConfig {
            enabled: true,
            probability_scale: 1e6,
        });
        let mut rng = StdRng::seed_from_u64(5);
        let event = service.check(&ctx, &mut rng);
        assert!(matches!(event, Some(ExtremeEvent::Tornado { rating }) if rating <= 5));
    }

    #[test]
    fn test_tornado_ratings_skew_weak() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut counts = [0_u32; 6];
        for _ in 0..10_000 {
            counts[pick(&TORNADO_WEIGHTS, &mut rng)] += 1;
        }
        assert!(counts[0] > counts[2]);
        assert!(counts[2] > counts[5]);
        assert!(counts[0] + counts[1] + counts[2] > 8000);
    }

    #[test]
    fn test_geological_events_need_activity() {
        let mut quiet = RegionProfile::temperate_grassland();
        quiet.special_factors = crate::region::SpecialFactors::default();
        let mut active = quiet.clone();
        active.special_factors = active.special_factors.with_geology(1.0, 1.0);

        let service = ExtremeWeatherService::new(ExtremeWeatherConfig {
            enabled: true,
            probability_scale: 1e7,
        });
        let mut rng = StdRng::seed_from_u64(3);
        assert!(service.check_geological(&quiet, &mut rng).is_none());
        let event = service.check_geological(&active, &mut rng).unwrap();
        assert!(event.is_geological());
        if let ExtremeEvent::Earthquake { magnitude } = event {
            assert!((3.0..9.0).contains(&magnitude));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ExtremeEvent::Tornado { rating: 3 }.to_string(), "EF3 Tornado");
        assert_eq!(
            ExtremeEvent::Flood {
                severity: Severity::Severe
            }
            .to_string(),
            "Severe Flood"
        );
    }
}
