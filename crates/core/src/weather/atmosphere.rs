//! Humidity, pressure, cloud cover and precipitation potential
//!
//! Every quantity is computed fresh each hour from the region, season,
//! hour and live weather systems, then blended with the previous hour's
//! value so the state evolves smoothly:
//!
//! | Quantity       | New | Previous |
//! |----------------|-----|----------|
//! | Humidity       | 80% | 20%      |
//! | Pressure       | 60% | 40%      |
//! | Cloud cover    | 70% | 30%      |
//!
//! The service also owns the pressure history (for the tendency) and the
//! post-thunderstorm cooldown counter.

use super::systems::SystemKind;
use super::{blend, HourContext};
use crate::core_types::condition::WeatherCondition;
use crate::core_types::units::{Hectopascals, Percent};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f64::consts::PI;

/// Pressure samples retained
const PRESSURE_HISTORY_HOURS: usize = 24;
/// Hours of dampened convection after a thunderstorm ends
pub const STORM_COOLDOWN_HOURS: u32 = 6;
/// Exhaustion level past which rain stops feeding itself
const SELF_LIMIT_EXHAUSTION: f64 = 6.0;

/// Precipitation feedback inputs, read from the precipitation history
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrecipitationFeedback {
    /// Weighted recent precipitation (0-1)
    pub recent: f64,
    /// Exhaustion counter (0-12)
    pub exhaustion: f64,
}

/// Derives the non-temperature scalars and owns pressure history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtmosphericService {
    pressure_history: VecDeque<f64>,
    storm_cooldown: u32,
}

impl AtmosphericService {
    /// Create an empty service
    #[must_use]
    pub fn new() -> Self {
        AtmosphericService {
            pressure_history: VecDeque::with_capacity(PRESSURE_HISTORY_HOURS),
            storm_cooldown: 0,
        }
    }

    /// Clear pressure history and cooldown (new simulation)
    pub fn reset(&mut self) {
        self.pressure_history.clear();
        self.storm_cooldown = 0;
    }

    /// Hours of post-storm cooldown remaining
    #[must_use]
    pub fn storm_cooldown(&self) -> u32 {
        self.storm_cooldown
    }

    /// Whether the post-storm cooldown is running
    #[must_use]
    pub fn is_storm_cooldown_active(&self) -> bool {
        self.storm_cooldown > 0
    }

    // ═══════════════════════════════════════════════════════════════════
    // HUMIDITY
    // ═══════════════════════════════════════════════════════════════════

    /// Relative humidity for the hour
    ///
    /// `temperature` is the most recent air temperature; warm departures
    /// from the seasonal mean dry the air out.
    pub fn calculate_humidity(
        &self,
        ctx: &HourContext<'_>,
        temperature: f64,
        precipitation: PrecipitationFeedback,
        previous: Option<Percent>,
        rng: &mut impl Rng,
    ) -> Percent {
        let baseline = ctx.baseline;
        let mut humidity =
            baseline.humidity + rng.random_range(-1.0..=1.0) * baseline.humidity_variance * 0.3;

        // Seasonal offset around the profile's humidity peak
        let peak = if ctx.profile.is_southern() {
            (f64::from(ctx.profile.humidity.peak_day) + 182.0) % 365.0
        } else {
            f64::from(ctx.profile.humidity.peak_day)
        };
        humidity += 5.0 * (2.0 * PI * (f64::from(ctx.day_of_year) - peak) / 365.0).cos();

        // Diurnal cycle, most humid around 02:00
        humidity += 8.0 * (2.0 * PI * (f64::from(ctx.hour) - 2.0) / 24.0).cos();

        let temperature = if temperature.is_finite() { temperature } else { baseline.temperature };
        humidity -= 0.6 * (temperature - baseline.temperature);
        humidity += 10.0 * *ctx.profile.maritime_influence;

        for system in ctx.systems {
            let influence = system.influence();
            humidity += match system.kind {
                SystemKind::LowPressure => 10.0 * influence,
                SystemKind::WarmFront => 15.0 * influence,
                SystemKind::HighPressure => -10.0 * influence,
                SystemKind::ColdFront if system.is_young() => 12.0 * influence,
                SystemKind::ColdFront => -8.0 * influence,
            };
        }

        let attenuation = (1.0 - precipitation.exhaustion / 12.0).max(0.0);
        humidity += precipitation.recent * 20.0 * attenuation;

        let blended = blend(humidity, previous.map(Percent::value), 0.8);
        Percent::clamped(blended)
    }

    // ═══════════════════════════════════════════════════════════════════
    // PRESSURE
    // ═══════════════════════════════════════════════════════════════════

    /// Sea-level pressure for the hour; also appends it to the history
    pub fn calculate_pressure(
        &mut self,
        ctx: &HourContext<'_>,
        previous: Option<Hectopascals>,
        rng: &mut impl Rng,
    ) -> Hectopascals {
        // Semidiurnal tide: peaks near 10:00 and 22:00
        let tide = (4.0 * PI * (f64::from(ctx.hour) - 10.0) / 24.0).cos();
        let mut pressure = 1013.0 + ctx.baseline.pressure_offset + tide;

        for system in ctx.systems {
            let influence = system.influence();
            pressure += match system.kind {
                SystemKind::HighPressure => 15.0 * influence,
                SystemKind::LowPressure => -15.0 * influence,
                SystemKind::ColdFront if system.is_young() => -8.0 * influence,
                SystemKind::ColdFront => 5.0 * influence,
                SystemKind::WarmFront => -6.0 * influence,
            };
        }

        pressure += rng.random_range(-1.0..=1.0);
        let pressure = Hectopascals::clamped(blend(pressure, previous.map(Hectopascals::value), 0.6));

        if self.pressure_history.len() == PRESSURE_HISTORY_HOURS {
            self.pressure_history.pop_front();
        }
        self.pressure_history.push_back(*pressure);
        pressure
    }

    /// Pressure tendency over the last three hours (hPa/hour)
    ///
    /// Zero until four samples exist.
    #[must_use]
    pub fn pressure_trend(&self) -> f64 {
        let len = self.pressure_history.len();
        if len < 4 {
            return 0.0;
        }
        (self.pressure_history[len - 1] - self.pressure_history[len - 4]) / 3.0
    }

    // ═══════════════════════════════════════════════════════════════════
    // CLOUD COVER
    // ═══════════════════════════════════════════════════════════════════

    /// Cloud cover for the hour
    pub fn calculate_cloud_cover(
        &self,
        ctx: &HourContext<'_>,
        humidity: Percent,
        temperature: f64,
        previous: Option<Percent>,
        rng: &mut impl Rng,
    ) -> Percent {
        let mut cloud = ((*humidity - 30.0) / 60.0).clamp(0.0, 1.0) * 70.0;

        let trend = self.pressure_trend();
        if trend < 0.0 {
            cloud += (-trend * 15.0).min(20.0);
        }

        for system in ctx.systems {
            let influence = system.influence();
            cloud += match system.kind {
                SystemKind::WarmFront => 30.0 * influence,
                SystemKind::ColdFront | SystemKind::LowPressure => 20.0 * influence,
                SystemKind::HighPressure => -25.0 * influence,
            };
        }

        if (13..=17).contains(&ctx.hour) && temperature > 70.0 {
            cloud += rng.random_range(5.0..=10.0);
        }

        cloud -= f64::from(self.storm_cooldown) * 3.0;
        cloud += rng.random_range(-5.0..=5.0);

        Percent::clamped(blend(cloud, previous.map(Percent::value), 0.7))
    }

    // ═══════════════════════════════════════════════════════════════════
    // CONVECTION AND PRECIPITATION
    // ═══════════════════════════════════════════════════════════════════

    /// Convective instability score (0-10)
    ///
    /// Heat, low pressure, falling pressure and moisture each contribute a
    /// capped share: at most 4.5, 3, 2 and 1.5 points respectively.
    #[must_use]
    pub fn calculate_instability(
        temperature: f64,
        pressure: Hectopascals,
        pressure_trend: f64,
        humidity: Percent,
    ) -> f64 {
        let heat = ((temperature - 55.0) / 10.0).clamp(0.0, 4.5);
        let low = ((1015.0 - *pressure) / 6.0).clamp(0.0, 3.0);
        let falling = (-pressure_trend * 1.5).clamp(0.0, 2.0);
        let moisture = ((*humidity - 50.0) / 20.0).clamp(0.0, 1.5);
        let total = heat + low + falling + moisture;
        if total.is_finite() {
            total.clamp(0.0, 10.0)
        } else {
            0.0
        }
    }

    /// Chance-like precipitation potential (0-100)
    ///
    /// Recent rain reinforces itself only while the exhaustion counter is
    /// below 6; past that its contribution shrinks linearly to nothing at
    /// 12, which is what eventually ends long rain spells.
    #[must_use]
    pub fn calculate_precipitation_potential(
        &self,
        ctx: &HourContext<'_>,
        humidity: Percent,
        cloud_cover: Percent,
        instability: f64,
        precipitation: PrecipitationFeedback,
    ) -> f64 {
        let mut potential = (humidity.to_fraction().value() * cloud_cover.to_fraction().value())
            .powf(0.8)
            * 70.0;

        let trend = self.pressure_trend();
        if trend < -0.5 {
            potential += (-trend * 8.0).min(15.0);
        }
        if instability > 5.0 {
            potential += (instability - 5.0) * 3.0;
        }

        for system in ctx.systems {
            potential += match system.kind {
                SystemKind::LowPressure => 8.0,
                SystemKind::WarmFront => 12.0,
                SystemKind::ColdFront if system.is_young() => 15.0,
                SystemKind::ColdFront => 0.0,
                SystemKind::HighPressure => -15.0,
            } * system.influence();
        }

        let feedback = precipitation.recent * 15.0;
        potential += if precipitation.exhaustion < SELF_LIMIT_EXHAUSTION {
            feedback
        } else {
            feedback * (1.0 - (precipitation.exhaustion - SELF_LIMIT_EXHAUSTION) / 6.0).max(0.0)
        };

        if self.is_storm_cooldown_active() {
            potential *= 0.7;
        }

        if potential.is_finite() {
            potential.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Start or tick down the post-thunderstorm cooldown
    ///
    /// A thunderstorm hour followed by a non-thunderstorm hour starts a
    /// fresh six-hour cooldown; otherwise a running cooldown loses an hour.
    pub fn update_storm_cooldown(
        &mut self,
        previous: Option<WeatherCondition>,
        current: WeatherCondition,
    ) {
        if previous == Some(WeatherCondition::Thunderstorm)
            && current != WeatherCondition::Thunderstorm
        {
            self.storm_cooldown = STORM_COOLDOWN_HOURS;
        } else {
            self.storm_cooldown = self.storm_cooldown.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::season::Season;
    use crate::region::{RegionProfile, RegionProfileService};
    use crate::weather::systems::WeatherSystem;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn with_ctx<T>(
        profile: &RegionProfile,
        hour: u32,
        systems: &[WeatherSystem],
        f: impl FnOnce(&HourContext<'_>) -> T,
    ) -> T {
        let baseline = RegionProfileService::seasonal_baseline(profile, Season::Summer);
        let ctx = HourContext {
            profile,
            baseline: &baseline,
            day_of_year: 196,
            hour,
            systems,
        };
        f(&ctx)
    }

    #[test]
    fn test_pressure_trend_uses_three_hours() {
        let mut service = AtmosphericService::new();
        for p in [1010.0, 1012.0, 1008.0, 1004.0, 1001.0] {
            service.pressure_history.push_back(p);
        }
        // (1001 - 1012) / 3
        assert_relative_eq!(service.pressure_trend(), -11.0 / 3.0);
    }

    #[test]
    fn test_trend_zero_without_history() {
        let service = AtmosphericService::new();
        assert_eq!(service.pressure_trend(), 0.0);
    }

    #[test]
    fn test_pressure_stays_in_bounds() {
        let profile = RegionProfile::coastal();
        let mut rng = StdRng::seed_from_u64(3);
        let mut service = AtmosphericService::new();
        let mut previous = None;
        for hour in 0..48 {
            let p = with_ctx(&profile, hour % 24, &[], |ctx| {
                service.calculate_pressure(ctx, previous, &mut rng)
            });
            assert!((Hectopascals::MIN..=Hectopascals::MAX).contains(&*p));
            previous = Some(p);
        }
        assert_eq!(service.pressure_history.len(), PRESSURE_HISTORY_HOURS);
    }

    #[test]
    fn test_humidity_blends_with_previous() {
        let profile = RegionProfile::desert();
        let service = AtmosphericService::new();
        let fresh = with_ctx(&profile, 12, &[], |ctx| {
            service.calculate_humidity(
                ctx,
                95.0,
                PrecipitationFeedback::default(),
                None,
                &mut StdRng::seed_from_u64(1),
            )
        });
        let blended = with_ctx(&profile, 12, &[], |ctx| {
            service.calculate_humidity(
                ctx,
                95.0,
                PrecipitationFeedback::default(),
                Some(Percent::new(100.0)),
                &mut StdRng::seed_from_u64(1),
            )
        });
        assert!(*blended > *fresh);
        assert!((0.0..=100.0).contains(&*blended));
    }

    #[test]
    fn test_instability_components() {
        // 4.5 + 3 + 2 + 1.5
        let max = AtmosphericService::calculate_instability(
            120.0,
            Hectopascals::new(980.0),
            -5.0,
            Percent::new(100.0),
        );
        assert_relative_eq!(max, 10.0);

        let calm = AtmosphericService::calculate_instability(
            50.0,
            Hectopascals::new(1025.0),
            1.0,
            Percent::new(30.0),
        );
        assert_relative_eq!(calm, 0.0);
    }

    #[test]
    fn test_exhaustion_limits_feedback() {
        let profile = RegionProfile::temperate_forest();
        let service = AtmosphericService::new();
        let potential = |exhaustion| {
            with_ctx(&profile, 6, &[], |ctx| {
                service.calculate_precipitation_potential(
                    ctx,
                    Percent::new(70.0),
                    Percent::new(70.0),
                    0.0,
                    PrecipitationFeedback {
                        recent: 1.0,
                        exhaustion,
                    },
                )
            })
        };
        let fresh = potential(0.0);
        let half = potential(9.0);
        let spent = potential(12.0);
        assert_relative_eq!(fresh - spent, 15.0, epsilon = 1e-9);
        assert_relative_eq!(half - spent, 7.5, epsilon = 1e-9);
    }

    #[test]
    fn test_storm_cooldown_cycle() {
        let mut service = AtmosphericService::new();
        service.update_storm_cooldown(
            Some(WeatherCondition::Thunderstorm),
            WeatherCondition::HeavyRain,
        );
        assert_eq!(service.storm_cooldown(), STORM_COOLDOWN_HOURS);

        for _ in 0..STORM_COOLDOWN_HOURS {
            service.update_storm_cooldown(Some(WeatherCondition::Rain), WeatherCondition::Rain);
        }
        assert!(!service.is_storm_cooldown_active());
    }

    #[test]
    fn test_cooldown_dampens_potential() {
        let profile = RegionProfile::swamp();
        let mut service = AtmosphericService::new();
        let calc = |service: &AtmosphericService| {
            with_ctx(&profile, 6, &[], |ctx| {
                service.calculate_precipitation_potential(
                    ctx,
                    Percent::new(90.0),
                    Percent::new(90.0),
                    0.0,
                    PrecipitationFeedback::default(),
                )
            })
        };
        let before = calc(&service);
        service.update_storm_cooldown(
            Some(WeatherCondition::Thunderstorm),
            WeatherCondition::HeavyRain,
        );
        assert_relative_eq!(calc(&service), before * 0.7, epsilon = 1e-9);
    }
}
