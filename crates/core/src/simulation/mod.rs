//! The hourly simulation loop and rolling forecast window
//!
//! [`WeatherSimulation`] owns every service, the region profile and the
//! forecast window. Each generated hour runs the pipeline described in
//! [`crate::weather`] and appends one [`ForecastEntry`]; advancing time
//! appends new hours at the tail and drops the same number from the head,
//! so the window always slides forward from the last published hour.
//!
//! One simulation models one region's timeline. It is not meant to be
//! shared between threads while mutating; use one instance per timeline.

pub mod config;

pub use config::{SimulationConfig, MAX_FORECAST_HOURS, MIN_FORECAST_HOURS};

use crate::calendar::{MeteorologicalSeasons, SeasonResolver, SimpleSolarModel, SolarProvider};
use crate::core_types::condition::{WeatherCondition, WindIntensity};
use crate::core_types::forecast::{AtmosphericState, CelestialInfo, ForecastEntry, MeteoSnapshot};
use crate::core_types::season::{Season, SeasonSelection};
use crate::core_types::units::Fahrenheit;
use crate::error::Result;
use crate::region::{normalize_biome_key, RegionProfile, RegionProfileService};
use crate::weather::{
    AtmosphericService, CelestialEvents, ConditionInputs, DefaultEffects, EffectsTable,
    ExtremeContext, ExtremeWeatherService, HourContext, PrecipitationFeedback,
    PrecipitationService, SystemContext, TemperatureInputs, TemperatureService,
    ThunderstormState, WeatherConditionService, WeatherSystem, WeatherSystemService, WindInputs,
    WindService,
};
use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Hours of precipitation history the feedback terms look at
const RECENT_PRECIPITATION_WINDOW: usize = 6;

/// Drop minutes and seconds
fn top_of_hour(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}

/// Hourly weather simulation for one region
///
/// Generic over the random source so runs can be made reproducible; the
/// default [`StdRng`] is seeded from the OS by [`new`](Self::new).
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use weather_sim_core::{SeasonSelection, WeatherSimulation};
///
/// let start = NaiveDate::from_ymd_opt(2024, 7, 15)
///     .and_then(|d| d.and_hms_opt(12, 0, 0))
///     .unwrap();
/// let mut sim = WeatherSimulation::seeded(7);
/// let now = sim.initialize("desert", SeasonSelection::Auto, start);
/// assert_eq!(sim.get_24_hour_forecast().len(), 24);
///
/// sim.advance_time(3, "desert", SeasonSelection::Auto, start);
/// assert_eq!(sim.forecast().len(), 24);
/// assert_ne!(sim.get_current_weather().map(|e| e.timestamp), Some(now.timestamp));
/// ```
pub struct WeatherSimulation<R: Rng = StdRng> {
    rng: R,
    config: SimulationConfig,

    regions: RegionProfileService,
    profile: Option<Arc<RegionProfile>>,
    selection: SeasonSelection,
    season: Season,

    systems: WeatherSystemService,
    atmosphere: AtmosphericService,
    wind: WindService,
    conditions: WeatherConditionService,
    precipitation: PrecipitationService,
    extreme: ExtremeWeatherService,

    seasons: Box<dyn SeasonResolver>,
    solar: Box<dyn SolarProvider>,
    effects: Box<dyn EffectsTable>,

    forecast: Vec<ForecastEntry>,
}

impl WeatherSimulation<StdRng> {
    /// Create a simulation with an OS-seeded random source
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a reproducible simulation
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for WeatherSimulation<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> fmt::Debug for WeatherSimulation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherSimulation")
            .field("biome", &self.profile.as_ref().map(|p| p.biome.as_str()))
            .field("season", &self.season)
            .field("systems", &self.systems.len())
            .field("forecast_hours", &self.forecast.len())
            .field("thunderstorm", self.conditions.state())
            .finish_non_exhaustive()
    }
}

impl<R: Rng> WeatherSimulation<R> {
    /// Create a simulation drawing from `rng`
    pub fn with_rng(rng: R) -> Self {
        let config = SimulationConfig::default();
        WeatherSimulation {
            rng,
            extreme: ExtremeWeatherService::new(config.extreme_weather),
            config,
            regions: RegionProfileService::new(),
            profile: None,
            selection: SeasonSelection::Auto,
            season: Season::Spring,
            systems: WeatherSystemService::new(),
            atmosphere: AtmosphericService::new(),
            wind: WindService::new(),
            conditions: WeatherConditionService::new(),
            precipitation: PrecipitationService::new(),
            seasons: Box::new(MeteorologicalSeasons),
            solar: Box::new(SimpleSolarModel),
            effects: Box::new(DefaultEffects),
            forecast: Vec::new(),
        }
    }

    /// Replace the configuration (validated)
    ///
    /// Takes effect at the next [`initialize`](Self::initialize).
    pub fn with_config(mut self, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        self.extreme = ExtremeWeatherService::new(config.extreme_weather);
        self.config = config;
        Ok(self)
    }

    /// Replace the season resolver
    pub fn with_season_resolver(mut self, resolver: impl SeasonResolver + 'static) -> Self {
        self.seasons = Box::new(resolver);
        self
    }

    /// Replace the daylight provider
    pub fn with_solar_provider(mut self, provider: impl SolarProvider + 'static) -> Self {
        self.solar = Box::new(provider);
        self
    }

    /// Replace the effects text table
    pub fn with_effects_table(mut self, table: impl EffectsTable + 'static) -> Self {
        self.effects = Box::new(table);
        self
    }

    // ═══════════════════════════════════════════════════════════════════
    // PUBLIC CONTRACT
    // ═══════════════════════════════════════════════════════════════════

    /// Start a fresh timeline for `biome` at `start`
    ///
    /// Resets every counter, seeds weather systems, and generates the full
    /// forecast window. Returns the first hour.
    pub fn initialize(
        &mut self,
        biome: &str,
        season: SeasonSelection,
        start: NaiveDateTime,
    ) -> ForecastEntry {
        let start = top_of_hour(start);
        let profile = self.regions.get_profile(biome, &self.config.profile_overrides);
        self.selection = season;
        self.season = self.resolve_season(&profile, start);

        self.forecast.clear();
        self.atmosphere.reset();
        self.precipitation.reset();
        self.conditions.reset();
        self.wind.reset(&mut self.rng);
        self.systems.initialize(self.season, &mut self.rng);
        self.profile = Some(Arc::clone(&profile));

        info!(
            biome = %profile.biome,
            season = %self.season,
            start = %start,
            latitude = profile.latitude,
            systems = self.systems.len(),
            "Initialized weather simulation"
        );

        let first = self.generate_hour(&profile, start);
        self.forecast.push(first.clone());
        let mut timestamp = start;
        while self.forecast.len() < self.config.forecast_hours {
            timestamp += TimeDelta::hours(1);
            let entry = self.generate_hour(&profile, timestamp);
            self.forecast.push(entry);
        }
        first
    }

    /// Move the window forward by `hours`
    ///
    /// New hours continue from the last generated hour; the same number are
    /// dropped from the head, so the entry that was at index `hours` becomes
    /// the current one unchanged. A different biome (or a call before any
    /// initialization) starts a fresh timeline at `date` instead; otherwise
    /// `date` is ignored. A fixed `season` applies to the new hours.
    pub fn advance_time(
        &mut self,
        hours: u32,
        biome: &str,
        season: SeasonSelection,
        date: NaiveDateTime,
    ) -> ForecastEntry {
        let Some(profile) = self.profile.clone() else {
            return self.initialize(biome, season, date);
        };
        let requested = normalize_biome_key(biome).unwrap_or(RegionProfileService::DEFAULT_BIOME);
        if requested != profile.biome {
            info!(from = %profile.biome, to = requested, "Region changed, restarting timeline");
            return self.initialize(biome, season, date);
        }
        let Some(last) = self.forecast.last().map(|e| e.timestamp) else {
            return self.initialize(biome, season, date);
        };

        self.selection = season;
        let mut timestamp = last;
        for _ in 0..hours {
            timestamp += TimeDelta::hours(1);
            let entry = self.generate_hour(&profile, timestamp);
            self.forecast.push(entry);
            // keep the window bounded even for very long advances
            if self.forecast.len() > self.config.forecast_hours {
                let excess = self.forecast.len() - self.config.forecast_hours;
                self.forecast.drain(..excess);
            }
        }
        debug!(hours, window = self.forecast.len(), "Advanced forecast window");

        match self.forecast.first() {
            Some(current) => current.clone(),
            None => self.initialize(biome, season, date),
        }
    }

    /// The next 24 hours, starting with the current one
    #[must_use]
    pub fn get_24_hour_forecast(&self) -> &[ForecastEntry] {
        let end = self.forecast.len().min(MIN_FORECAST_HOURS);
        &self.forecast[..end]
    }

    /// The current hour, if initialized
    #[must_use]
    pub fn get_current_weather(&self) -> Option<&ForecastEntry> {
        self.forecast.first()
    }

    // ═══════════════════════════════════════════════════════════════════
    // INSPECTION
    // ═══════════════════════════════════════════════════════════════════

    /// The whole forecast window
    #[must_use]
    pub fn forecast(&self) -> &[ForecastEntry] {
        &self.forecast
    }

    /// Live weather systems
    #[must_use]
    pub fn active_systems(&self) -> &[WeatherSystem] {
        self.systems.systems()
    }

    /// Thunderstorm state machine values
    #[must_use]
    pub fn thunderstorm_state(&self) -> &ThunderstormState {
        self.conditions.state()
    }

    /// Region being simulated, if initialized
    #[must_use]
    pub fn profile(&self) -> Option<&RegionProfile> {
        self.profile.as_deref()
    }

    /// Season of the most recently generated hour
    #[must_use]
    pub fn season(&self) -> Season {
        self.season
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Precipitation history
    #[must_use]
    pub fn precipitation(&self) -> &PrecipitationService {
        &self.precipitation
    }

    // ═══════════════════════════════════════════════════════════════════
    // HOURLY PIPELINE
    // ═══════════════════════════════════════════════════════════════════

    fn resolve_season(&self, profile: &RegionProfile, timestamp: NaiveDateTime) -> Season {
        match self.selection {
            SeasonSelection::Auto => self.seasons.resolve(timestamp.date(), profile.latitude),
            SeasonSelection::Fixed(season) => season,
        }
    }

    /// Compute and return one hour; does not touch the window
    fn generate_hour(&mut self, profile: &RegionProfile, timestamp: NaiveDateTime) -> ForecastEntry {
        let previous: Option<MeteoSnapshot> = self.forecast.last().map(|e| e.meteo);
        let previous_condition: Option<WeatherCondition> = self.forecast.last().map(|e| e.condition);

        // Hour 0 keeps the freshly seeded systems
        if previous.is_some() {
            let context = SystemContext {
                thunderstorm_active: self.conditions.state().is_active(),
                storm_cooldown_active: self.atmosphere.is_storm_cooldown_active(),
            };
            self.systems.update(1, context, &mut self.rng);
        }

        let date = timestamp.date();
        let hour = timestamp.hour();
        let season = self.resolve_season(profile, timestamp);
        self.season = season;
        let baseline = RegionProfileService::seasonal_baseline(profile, season);
        let daylight = self.solar.daylight(date, profile.latitude);
        let is_daytime = daylight.is_daytime(f64::from(hour));

        let ctx = HourContext {
            profile,
            baseline: &baseline,
            day_of_year: date.ordinal(),
            hour,
            systems: self.systems.systems(),
        };
        let prev = previous.map(|m| m.atmosphere);
        let prev_temperature = prev.map_or(baseline.temperature, |a| *a.temperature);
        let feedback = PrecipitationFeedback {
            recent: self.precipitation.recent_precipitation(RECENT_PRECIPITATION_WINDOW),
            exhaustion: self.precipitation.exhaustion(),
        };

        let humidity = self.atmosphere.calculate_humidity(
            &ctx,
            prev_temperature,
            feedback,
            prev.map(|a| a.humidity),
            &mut self.rng,
        );
        let pressure =
            self.atmosphere
                .calculate_pressure(&ctx, prev.map(|a| a.pressure), &mut self.rng);
        let pressure_trend = self.atmosphere.pressure_trend();
        let cloud_cover = self.atmosphere.calculate_cloud_cover(
            &ctx,
            humidity,
            prev_temperature,
            prev.map(|a| a.cloud_cover),
            &mut self.rng,
        );

        let temperature = TemperatureService::calculate(
            &ctx,
            &TemperatureInputs {
                season,
                is_daytime,
                cloud_cover,
                wind_speed: self.wind.speed(),
                previous: prev.map(|a| a.temperature),
            },
        );

        let (wind_speed, wind_direction) = self.wind.update_wind_factors(
            &WindInputs {
                pressure,
                pressure_trend,
                temperature_change: *temperature - prev_temperature,
                hour,
                terrain_roughness: *profile.terrain_roughness,
            },
            ctx.systems,
            &mut self.rng,
        );

        let instability =
            AtmosphericService::calculate_instability(*temperature, pressure, pressure_trend, humidity);
        let precipitation_potential = self.atmosphere.calculate_precipitation_potential(
            &ctx,
            humidity,
            cloud_cover,
            instability,
            feedback,
        );

        let condition = self.conditions.determine_condition(
            &ConditionInputs {
                temperature,
                humidity,
                cloud_cover,
                wind_speed,
                precipitation_potential,
                instability,
                storm_cooldown_active: self.atmosphere.is_storm_cooldown_active(),
            },
            &mut self.rng,
        );
        let temperature = TemperatureService::validate_temperature_for_condition(temperature, condition);
        WindService::validate_wind_for_condition(wind_speed, condition);

        self.precipitation.record_condition(condition, &mut self.rng);
        self.atmosphere.update_storm_cooldown(previous_condition, condition);

        let sky = if self.config.celestial_events {
            WeatherConditionService::generate_celestial_events(&mut self.rng)
        } else {
            CelestialEvents::default()
        };

        let extreme_event = self.extreme.check(
            &ExtremeContext {
                profile,
                season,
                condition,
                temperature,
                humidity,
                wind_speed,
                pressure,
                pressure_trend,
                instability,
                precipitation: &self.precipitation,
                history: &self.forecast,
            },
            &mut self.rng,
        );

        let feels_like: Fahrenheit = TemperatureService::feels_like(temperature, wind_speed, humidity);

        let meteo = MeteoSnapshot {
            atmosphere: AtmosphericState {
                temperature,
                humidity,
                pressure,
                cloud_cover,
            },
            precipitation_potential,
            instability,
            pressure_trend,
            wind_speed,
            wind_direction,
        };

        ForecastEntry {
            hour,
            timestamp,
            condition,
            temperature,
            feels_like,
            wind_direction,
            wind_speed,
            wind_intensity: WindIntensity::from_speed(*wind_speed),
            effects: self.effects.effects(condition),
            celestial: CelestialInfo {
                is_daytime,
                sunrise_hour: daylight.sunrise_hour,
                sunset_hour: daylight.sunset_hour,
                day_length: daylight.day_length,
                shooting_star: sky.shooting_star,
                meteor_impact: sky.meteor_impact,
            },
            extreme_event,
            meteo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Daylight;
    use chrono::NaiveDate;

    fn start(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    struct AlwaysDark;

    impl SolarProvider for AlwaysDark {
        fn daylight(&self, _date: chrono::NaiveDate, _latitude: f64) -> Daylight {
            Daylight {
                sunrise_hour: 12.0,
                sunset_hour: 12.0,
                day_length: 0.0,
            }
        }
    }

    struct Silent;

    impl EffectsTable for Silent {
        fn effects(&self, _condition: WeatherCondition) -> String {
            "-".to_string()
        }
    }

    #[test]
    fn test_initialize_fills_window() {
        let mut sim = WeatherSimulation::seeded(1);
        let first = sim.initialize("temperate-forest", SeasonSelection::Auto, start(4, 10, 6));
        assert_eq!(sim.forecast().len(), MIN_FORECAST_HOURS);
        assert_eq!(first.hour, 6);
        assert_eq!(sim.get_current_weather(), Some(&first));
        assert_eq!(sim.season(), Season::Spring);
        for (i, pair) in sim.forecast().windows(2).enumerate() {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, TimeDelta::hours(1), "entry {i}");
        }
    }

    #[test]
    fn test_start_is_truncated_to_hour() {
        let mut sim = WeatherSimulation::seeded(2);
        let at = start(1, 5, 9).with_minute(42).unwrap();
        let first = sim.initialize("coastal", SeasonSelection::Auto, at);
        assert_eq!(first.timestamp, start(1, 5, 9));
    }

    #[test]
    fn test_fixed_season_overrides_calendar() {
        let mut sim = WeatherSimulation::seeded(3);
        sim.initialize("mediterranean", Season::Winter.into(), start(7, 1, 12));
        assert_eq!(sim.season(), Season::Winter);
    }

    #[test]
    fn test_region_change_restarts() {
        let mut sim = WeatherSimulation::seeded(4);
        sim.initialize("desert", SeasonSelection::Auto, start(7, 1, 0));
        let restarted = sim.advance_time(2, "tundra", SeasonSelection::Auto, start(12, 1, 0));
        assert_eq!(restarted.timestamp, start(12, 1, 0));
        assert_eq!(sim.profile().map(|p| p.biome.as_str()), Some("tundra"));
    }

    #[test]
    fn test_advance_before_initialize() {
        let mut sim = WeatherSimulation::seeded(5);
        let entry = sim.advance_time(3, "swamp", SeasonSelection::Auto, start(6, 1, 0));
        assert_eq!(entry.timestamp, start(6, 1, 0));
        assert_eq!(sim.forecast().len(), MIN_FORECAST_HOURS);
    }

    #[test]
    fn test_long_advance_keeps_window() {
        let mut sim = WeatherSimulation::seeded(6);
        sim.initialize("boreal-forest", SeasonSelection::Auto, start(2, 1, 0));
        let current = sim.advance_time(100, "boreal-forest", SeasonSelection::Auto, start(2, 1, 0));
        assert_eq!(sim.forecast().len(), MIN_FORECAST_HOURS);
        assert_eq!(current.timestamp, start(2, 5, 4));
    }

    #[test]
    fn test_custom_collaborators() {
        let mut sim = WeatherSimulation::seeded(7)
            .with_solar_provider(AlwaysDark)
            .with_effects_table(Silent);
        sim.initialize("polar-ice", SeasonSelection::Auto, start(6, 21, 12));
        assert!(sim.forecast().iter().all(|e| !e.celestial.is_daytime));
        assert!(sim.forecast().iter().all(|e| e.effects == "-"));
    }

    #[test]
    fn test_config_window_and_validation() {
        let mut sim = WeatherSimulation::seeded(8)
            .with_config(SimulationConfig::week_ahead())
            .unwrap();
        sim.initialize("coastal", SeasonSelection::Auto, start(3, 3, 3));
        assert_eq!(sim.forecast().len(), 24 * 7);
        assert_eq!(sim.get_24_hour_forecast().len(), 24);

        let bad = SimulationConfig {
            forecast_hours: 6,
            ..SimulationConfig::default()
        };
        assert!(WeatherSimulation::seeded(8).with_config(bad).is_err());
    }

    #[test]
    fn test_same_seed_same_forecast() {
        let run = |seed| {
            let mut sim = WeatherSimulation::seeded(seed);
            sim.initialize("temperate-grassland", SeasonSelection::Auto, start(5, 20, 0));
            sim.advance_time(10, "temperate-grassland", SeasonSelection::Auto, start(5, 20, 0));
            sim.forecast().to_vec()
        };
        assert_eq!(run(42), run(42));
    }
}
