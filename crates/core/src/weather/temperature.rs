//! Air temperature
//!
//! The hourly temperature is built up in layers:
//!
//! 1. **Base**: half the season's own mean, half an annual cosine through
//!    the region's seasonal means, plus a diurnal curve (low near 04:30,
//!    high near 14:00)
//! 2. **Elevation**: -3.5°F per 1000 ft
//! 3. **Maritime damping**: pulls toward the annual mean
//! 4. **Advection** from fronts and pressure cells, scaled by centrality
//! 5. **Cloud radiative effect**: cools by day, insulates by night
//! 6. **Surface factors**: permafrost, sea ice, forest canopy, currents,
//!    snow cover
//! 7. **Wind chill** feedback in subarctic and polar bands
//!
//! The result is blended 70/30 with the previous hour and clamped to the
//! latitude band's hard bounds.

use super::systems::SystemKind;
use super::{blend, HourContext};
use crate::core_types::condition::WeatherCondition;
use crate::core_types::season::Season;
use crate::core_types::units::{Fahrenheit, MilesPerHour, Percent};
use crate::region::{RegionProfile, SeasonalBaseline};
use std::f64::consts::PI;

/// Lapse rate in °F per 1000 ft
pub const LAPSE_RATE_PER_1000_FT: f64 = 3.5;
/// Day of year the northern-hemisphere annual curve peaks on (mid-July)
const WARMEST_DAY: f64 = 196.0;
/// Diurnal minimum and maximum (fractional hours)
const DAILY_LOW_HOUR: f64 = 4.5;
const DAILY_HIGH_HOUR: f64 = 14.0;

/// Per-hour temperature inputs beyond the shared [`HourContext`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureInputs {
    /// Current season
    pub season: Season,
    /// Whether the sun is up
    pub is_daytime: bool,
    /// This hour's cloud cover
    pub cloud_cover: Percent,
    /// Most recent wind speed
    pub wind_speed: MilesPerHour,
    /// Previous hour's temperature (None on the first hour)
    pub previous: Option<Fahrenheit>,
}

/// Diurnal shape in [-1, 1]: -1 at 04:30, +1 at 14:00
///
/// Warming takes 9.5 hours, cooling the remaining 14.5.
fn diurnal_shape(hour: f64) -> f64 {
    let hour = hour.rem_euclid(24.0);
    if (DAILY_LOW_HOUR..DAILY_HIGH_HOUR).contains(&hour) {
        -(PI * (hour - DAILY_LOW_HOUR) / (DAILY_HIGH_HOUR - DAILY_LOW_HOUR)).cos()
    } else {
        let since_high = if hour >= DAILY_HIGH_HOUR {
            hour - DAILY_HIGH_HOUR
        } else {
            hour + 24.0 - DAILY_HIGH_HOUR
        };
        (PI * since_high / (24.0 - (DAILY_HIGH_HOUR - DAILY_LOW_HOUR))).cos()
    }
}

/// NWS wind chill (°F, mph)
#[must_use]
pub fn wind_chill(temperature: f64, wind_mph: f64) -> f64 {
    let v = wind_mph.max(0.0).powf(0.16);
    35.74 + 0.6215 * temperature - 35.75 * v + 0.4275 * temperature * v
}

/// Rothfusz heat index regression (°F, % RH)
#[must_use]
pub fn heat_index(temperature: f64, humidity: f64) -> f64 {
    let t = temperature;
    let r = humidity.clamp(0.0, 100.0);
    -42.379 + 2.049_015_23 * t + 10.143_331_27 * r
        - 0.224_755_41 * t * r
        - 0.006_837_83 * t * t
        - 0.054_817_17 * r * r
        + 0.001_228_74 * t * t * r
        + 0.000_852_82 * t * r * r
        - 0.000_001_99 * t * t * r * r
}

/// Temperature model
///
/// Stateless; the previous hour's value is passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureService;

impl TemperatureService {
    /// Base temperature before advection, clouds and surface factors
    ///
    /// Includes the seasonal and diurnal curves, the elevation lapse and
    /// maritime damping. Southern-hemisphere regions have the annual curve
    /// shifted by half a year.
    #[must_use]
    pub fn base_temperature(
        profile: &RegionProfile,
        baseline: &SeasonalBaseline,
        day_of_year: u32,
        hour: u32,
    ) -> f64 {
        let band = profile.latitude_band();
        let annual = profile.temperature.annual;

        let warmest = if profile.is_southern() {
            (WARMEST_DAY + 182.0) % 365.0
        } else {
            WARMEST_DAY
        };
        let amplitude = profile.temperature.seasonal_amplitude() * band.amplitude_factor();
        let phase = 2.0 * PI * (f64::from(day_of_year) - warmest) / 365.0;
        let annual_curve = annual + amplitude * phase.cos();
        let seasonal = 0.5 * baseline.temperature + 0.5 * annual_curve;

        let maritime = *profile.maritime_influence;
        let swing = baseline.temperature_variance.clamp(3.0, 20.0)
            * band.diurnal_factor()
            * (1.0 - 0.5 * maritime);
        let mut temperature = seasonal + swing * diurnal_shape(f64::from(hour));

        temperature -= LAPSE_RATE_PER_1000_FT * profile.elevation.thousands();
        temperature -= (temperature - annual) * maritime * 0.3;
        temperature
    }

    /// Warming/cooling from live systems
    ///
    /// Cold fronts hit hardest when fresh (-15°F) and ease to -5°F as they
    /// age. Warm fronts ramp up over their first six hours to +10°F.
    #[must_use]
    pub fn advection(ctx: &HourContext<'_>, is_daytime: bool) -> f64 {
        ctx.systems
            .iter()
            .map(|system| {
                let influence = system.influence();
                match system.kind {
                    SystemKind::ColdFront => -(15.0 - 10.0 * system.age_ratio()) * influence,
                    SystemKind::WarmFront => {
                        let ramp = (f64::from(system.age) / 6.0).min(1.0);
                        10.0 * influence * ramp
                    }
                    // clear skies under a high: sunny days, radiative nights
                    SystemKind::HighPressure if is_daytime => 2.0 * influence,
                    SystemKind::HighPressure => -2.0 * influence,
                    SystemKind::LowPressure => -influence,
                }
            })
            .sum()
    }

    /// Cloud radiative effect, attenuated at high latitude
    #[must_use]
    pub fn cloud_effect(profile: &RegionProfile, cloud_cover: Percent, is_daytime: bool) -> f64 {
        let cover = cloud_cover.to_fraction().value();
        let effect = if is_daytime { -10.0 * cover } else { 5.0 * cover };
        effect * profile.latitude_band().cloud_radiative_factor()
    }

    /// Surface special-factor effects
    #[must_use]
    pub fn special_factor_effect(profile: &RegionProfile, season: Season, is_daytime: bool) -> f64 {
        let factors = &profile.special_factors;
        let mut effect = 0.0;

        effect -= factors.permafrost() * if season == Season::Summer { 3.0 } else { 5.0 };
        effect -= factors.sea_ice() * if season == Season::Winter { 8.0 } else { 3.0 };
        effect += factors.forest_density() * if is_daytime { -2.0 } else { 1.5 };
        effect += factors.warm_current() * if season == Season::Winter { 4.0 } else { 2.0 };
        if season == Season::Summer && is_daytime {
            effect -= factors.cold_current() * 4.0;
        }
        let snow_depth = match season {
            Season::Winter => 4.0,
            Season::Spring | Season::Fall => 2.0,
            Season::Summer => 0.0,
        };
        effect -= factors.snow_cover() * snow_depth;
        effect
    }

    /// Full hourly temperature
    #[must_use]
    pub fn calculate(ctx: &HourContext<'_>, inputs: &TemperatureInputs) -> Fahrenheit {
        let profile = ctx.profile;
        let band = profile.latitude_band();

        let mut temperature =
            Self::base_temperature(profile, ctx.baseline, ctx.day_of_year, ctx.hour);
        temperature += Self::advection(ctx, inputs.is_daytime);
        temperature += Self::cloud_effect(profile, inputs.cloud_cover, inputs.is_daytime);
        temperature += Self::special_factor_effect(profile, inputs.season, inputs.is_daytime);

        let wind = *inputs.wind_speed;
        if band.has_wind_chill() && wind > 5.0 && temperature < Fahrenheit::FREEZING.value() {
            temperature += (wind_chill(temperature, wind) - temperature) * 0.3;
        }

        let blended = blend(temperature, inputs.previous.map(Fahrenheit::value), 0.7);
        let (min, max) = band.temperature_bounds(inputs.season);
        let finite = if blended.is_finite() { blended } else { ctx.baseline.temperature };
        Fahrenheit::new(finite).clamp_to(min, max)
    }

    /// Apparent temperature
    ///
    /// Wind chill at or below 50°F with wind above 3 mph, heat index at or
    /// above 80°F, otherwise the air temperature.
    #[must_use]
    pub fn feels_like(
        temperature: Fahrenheit,
        wind_speed: MilesPerHour,
        humidity: Percent,
    ) -> Fahrenheit {
        let t = *temperature;
        if t <= 50.0 && *wind_speed > 3.0 {
            Fahrenheit::new(wind_chill(t, *wind_speed).min(t))
        } else if t >= 80.0 {
            Fahrenheit::new(heat_index(t, *humidity).max(t))
        } else {
            temperature
        }
    }

    /// Clamp a temperature into the range a condition is plausible in
    #[must_use]
    pub fn validate_temperature_for_condition(
        temperature: Fahrenheit,
        condition: WeatherCondition,
    ) -> Fahrenheit {
        Fahrenheit::new(condition.temperature_bound().clamp(*temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{RegionProfileService, SpecialFactors};
    use crate::weather::systems::WeatherSystem;
    use approx::assert_relative_eq;

    fn summer_noon<T>(profile: &RegionProfile, f: impl FnOnce(&HourContext<'_>) -> T) -> T {
        let baseline = RegionProfileService::seasonal_baseline(profile, Season::Summer);
        let systems: [WeatherSystem; 0] = [];
        let ctx = HourContext {
            profile,
            baseline: &baseline,
            day_of_year: 196,
            hour: 12,
            systems: &systems,
        };
        f(&ctx)
    }

    fn inputs(season: Season, is_daytime: bool, previous: Option<f64>) -> TemperatureInputs {
        TemperatureInputs {
            season,
            is_daytime,
            cloud_cover: Percent::ZERO,
            wind_speed: MilesPerHour::new(0.0),
            previous: previous.map(Fahrenheit::new),
        }
    }

    #[test]
    fn test_diurnal_shape_extremes() {
        assert_relative_eq!(diurnal_shape(4.5), -1.0, epsilon = 1e-12);
        assert_relative_eq!(diurnal_shape(14.0), 1.0, epsilon = 1e-12);
        assert!(diurnal_shape(9.0) < diurnal_shape(12.0));
        assert!(diurnal_shape(20.0) > diurnal_shape(2.0));
    }

    #[test]
    fn test_afternoon_warmer_than_dawn() {
        let profile = RegionProfile::temperate_grassland();
        let baseline = RegionProfileService::seasonal_baseline(&profile, Season::Summer);
        let dawn = TemperatureService::base_temperature(&profile, &baseline, 196, 5);
        let afternoon = TemperatureService::base_temperature(&profile, &baseline, 196, 14);
        assert!(afternoon - dawn > 10.0);
    }

    #[test]
    fn test_southern_hemisphere_is_shifted() {
        let north = RegionProfile::temperate_forest();
        let mut south = north.clone();
        south.latitude = -north.latitude;
        let baseline = RegionProfileService::seasonal_baseline(&north, Season::Summer);
        let n = TemperatureService::base_temperature(&north, &baseline, 196, 12);
        let s = TemperatureService::base_temperature(&south, &baseline, 196, 12);
        assert!(n > s);
    }

    #[test]
    fn test_elevation_lapse() {
        let low = RegionProfile::temperate_forest();
        let mut high = low.clone();
        high.elevation = crate::core_types::units::Feet::new(*low.elevation + 2000.0);
        let baseline = RegionProfileService::seasonal_baseline(&low, Season::Spring);
        let a = TemperatureService::base_temperature(&low, &baseline, 100, 12);
        let b = TemperatureService::base_temperature(&high, &baseline, 100, 12);
        let damping = 1.0 - 0.3 * *low.maritime_influence;
        assert_relative_eq!(a - b, 7.0 * damping, epsilon = 1e-9);
    }

    #[test]
    fn test_desert_summer_noon_is_hot() {
        let profile = RegionProfile::desert();
        let t = summer_noon(&profile, |ctx| {
            TemperatureService::calculate(ctx, &inputs(Season::Summer, true, None))
        });
        let mean = profile.temperature.summer.mean;
        let variance = profile.temperature.summer.variance;
        assert!((*t - mean).abs() <= variance + 10.0, "t = {t}");
    }

    #[test]
    fn test_inertia_blend() {
        let profile = RegionProfile::coastal();
        let fresh = summer_noon(&profile, |ctx| {
            TemperatureService::calculate(ctx, &inputs(Season::Summer, true, None))
        });
        let blended = summer_noon(&profile, |ctx| {
            TemperatureService::calculate(ctx, &inputs(Season::Summer, true, Some(40.0)))
        });
        assert_relative_eq!(*blended, *fresh * 0.7 + 40.0 * 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_polar_summer_cap() {
        let mut profile = RegionProfile::polar_ice();
        profile.special_factors = SpecialFactors::default();
        let t = summer_noon(&profile, |ctx| {
            TemperatureService::calculate(ctx, &inputs(Season::Summer, true, Some(200.0)))
        });
        assert!(*t <= 45.0);
    }

    #[test]
    fn test_clouds_cool_days_and_warm_nights() {
        let profile = RegionProfile::temperate_forest();
        let overcast = Percent::new(100.0);
        assert_relative_eq!(TemperatureService::cloud_effect(&profile, overcast, true), -10.0);
        assert_relative_eq!(TemperatureService::cloud_effect(&profile, overcast, false), 5.0);
        let polar = RegionProfile::tundra();
        assert!(TemperatureService::cloud_effect(&polar, overcast, true) > -10.0);
    }

    #[test]
    fn test_special_factors() {
        let mut profile = RegionProfile::temperate_forest();
        profile.special_factors = SpecialFactors::default().with_sea_ice(1.0);
        let winter = TemperatureService::special_factor_effect(&profile, Season::Winter, true);
        let summer = TemperatureService::special_factor_effect(&profile, Season::Summer, true);
        assert_relative_eq!(winter, -8.0);
        assert_relative_eq!(summer, -3.0);
    }

    #[test]
    fn test_feels_like() {
        let cold = TemperatureService::feels_like(
            Fahrenheit::new(20.0),
            MilesPerHour::new(20.0),
            Percent::new(50.0),
        );
        assert!(*cold < 20.0);

        let muggy = TemperatureService::feels_like(
            Fahrenheit::new(95.0),
            MilesPerHour::new(5.0),
            Percent::new(70.0),
        );
        assert!(*muggy > 110.0);

        let mild = TemperatureService::feels_like(
            Fahrenheit::new(65.0),
            MilesPerHour::new(10.0),
            Percent::new(50.0),
        );
        assert_relative_eq!(*mild, 65.0);
    }

    #[test]
    fn test_condition_clamp() {
        let snow = TemperatureService::validate_temperature_for_condition(
            Fahrenheit::new(38.0),
            WeatherCondition::Snow,
        );
        assert_relative_eq!(*snow, 32.0);
        let clear = TemperatureService::validate_temperature_for_condition(
            Fahrenheit::new(38.0),
            WeatherCondition::ClearSkies,
        );
        assert_relative_eq!(*clear, 38.0);
    }
}
