//! Surface wind
//!
//! Speed chases a target derived from the pressure gradient, nearby
//! systems, temperature change and the afternoon mixing peak, but may only
//! move a bounded amount per hour. Direction is persistent: it wanders
//! occasionally and shifts one compass point when a front passes overhead.

use super::systems::{SystemId, SystemKind, WeatherSystem};
use crate::core_types::condition::{CompassDirection, WeatherCondition};
use crate::core_types::units::{Hectopascals, MilesPerHour};
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Largest change in sustained speed per hour (before noise)
pub const MAX_HOURLY_CHANGE: f64 = 8.0;
/// Upper bound on sustained wind speed
pub const MAX_WIND_SPEED: f64 = 80.0;
/// Centrality above which a front forces a direction shift
const FRONT_SHIFT_CENTRALITY: f64 = 0.8;
/// Hourly chance of a one-point direction wobble
const WOBBLE_CHANCE: f64 = 0.1;

/// Inputs to one wind step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindInputs {
    /// Current sea-level pressure
    pub pressure: Hectopascals,
    /// Pressure tendency (hPa/hour)
    pub pressure_trend: f64,
    /// Temperature change since the previous hour (°F)
    pub temperature_change: f64,
    /// Hour of day (0-23)
    pub hour: u32,
    /// Terrain roughness (0-1)
    pub terrain_roughness: f64,
}

/// Wind speed that is unusual for the hour's condition
///
/// Purely informational: the speed is not changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindAdvisory {
    /// Condition the speed was checked against
    pub condition: WeatherCondition,
    /// The speed that was flagged
    pub speed: MilesPerHour,
    /// Typical lower bound for the condition, if any
    pub expected_min: Option<f64>,
    /// Typical upper bound for the condition, if any
    pub expected_max: Option<f64>,
}

impl fmt::Display for WindAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is atypical for {}", self.speed, self.condition)?;
        match (self.expected_min, self.expected_max) {
            (Some(min), Some(max)) => write!(f, " (expected {min:.0}-{max:.0} mph)"),
            (Some(min), None) => write!(f, " (expected at least {min:.0} mph)"),
            (None, Some(max)) => write!(f, " (expected at most {max:.0} mph)"),
            (None, None) => Ok(()),
        }
    }
}

/// Wind state with gradual change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindService {
    speed: Option<MilesPerHour>,
    direction: CompassDirection,
    /// Fronts that have already turned the wind
    shifted_by: FxHashSet<SystemId>,
}

impl WindService {
    /// Create a service with no history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous speed and pick a random prevailing direction
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.speed = None;
        self.direction = CompassDirection::ALL[rng.random_range(0..CompassDirection::ALL.len())];
        self.shifted_by.clear();
    }

    /// Current sustained speed (5 mph before the first update)
    #[must_use]
    pub fn speed(&self) -> MilesPerHour {
        self.speed.unwrap_or_else(|| MilesPerHour::new(5.0))
    }

    /// Current direction
    #[must_use]
    pub fn direction(&self) -> CompassDirection {
        self.direction
    }

    /// Speed the wind is being pulled toward this hour
    ///
    /// gradient × 3, where the gradient combines tendency and departure
    /// from standard pressure, plus system, thermal and diurnal terms.
    /// Rough terrain slows it by up to 30%.
    pub fn target_speed(
        inputs: &WindInputs,
        systems: &[WeatherSystem],
        rng: &mut impl Rng,
    ) -> f64 {
        let gradient = inputs.pressure_trend.abs() * 2.0 + (*inputs.pressure - 1013.0).abs() / 5.0;
        let mut target = 5.0 + gradient * 3.0;

        for system in systems {
            let influence = system.influence();
            target += match system.kind {
                SystemKind::LowPressure => 8.0 * influence,
                SystemKind::ColdFront | SystemKind::WarmFront => 10.0 * influence,
                SystemKind::HighPressure => -5.0 * influence,
            };
        }

        target += inputs.temperature_change.abs() * 0.15;

        if (9..=21).contains(&inputs.hour) {
            let phase = std::f64::consts::PI * (f64::from(inputs.hour) - 9.0) / 12.0;
            target += 4.0 * phase.sin();
        }

        target *= 1.0 - 0.3 * inputs.terrain_roughness.clamp(0.0, 1.0);
        target += rng.random_range(-2.0..=2.0);
        target.clamp(0.0, MAX_WIND_SPEED)
    }

    /// Advance the wind one hour
    ///
    /// The first call after [`reset`](Self::reset) snaps straight to the
    /// target; later calls move at most [`MAX_HOURLY_CHANGE`] ± 1.5 mph.
    pub fn update_wind_factors(
        &mut self,
        inputs: &WindInputs,
        systems: &[WeatherSystem],
        rng: &mut impl Rng,
    ) -> (MilesPerHour, CompassDirection) {
        let target = Self::target_speed(inputs, systems, rng);

        let speed = match self.speed {
            None => target,
            Some(previous) => {
                let step = (target - *previous).clamp(-MAX_HOURLY_CHANGE, MAX_HOURLY_CHANGE);
                (*previous + step + rng.random_range(-1.5..=1.5)).clamp(0.0, MAX_WIND_SPEED)
            }
        };
        self.speed = Some(MilesPerHour::new(speed));

        self.update_direction(systems, rng);
        (self.speed(), self.direction)
    }

    fn update_direction(&mut self, systems: &[WeatherSystem], rng: &mut impl Rng) {
        self.shifted_by
            .retain(|id| systems.iter().any(|s| s.id == *id));

        let passing_front = systems.iter().find(|s| {
            s.kind.is_front()
                && s.centrality() > FRONT_SHIFT_CENTRALITY
                && !self.shifted_by.contains(&s.id)
        });

        if let Some(front) = passing_front {
            // Cold fronts veer the wind, warm fronts back it
            let step = if front.kind == SystemKind::ColdFront { 1 } else { -1 };
            self.direction = self.direction.rotate(step);
            self.shifted_by.insert(front.id);
        } else if rng.random_bool(WOBBLE_CHANCE) {
            let step = if rng.random_bool(0.5) { 1 } else { -1 };
            self.direction = self.direction.rotate(step);
        }
    }

    /// Flag a speed that is unusual for `condition`
    ///
    /// Logs a warning and returns the advisory; never alters the wind.
    pub fn validate_wind_for_condition(
        speed: MilesPerHour,
        condition: WeatherCondition,
    ) -> Option<WindAdvisory> {
        let (expected_min, expected_max) = match condition {
            WeatherCondition::Fog | WeatherCondition::HeavyFog => (None, Some(10.0)),
            WeatherCondition::HighHumidityHaze => (None, Some(15.0)),
            WeatherCondition::ClearSkies => (None, Some(45.0)),
            WeatherCondition::Blizzard => (Some(25.0), None),
            WeatherCondition::ColdWinds => (Some(20.0), None),
            WeatherCondition::Thunderstorm => (Some(5.0), None),
            _ => (None, None),
        };

        let below = expected_min.is_some_and(|min| *speed < min);
        let above = expected_max.is_some_and(|max| *speed > max);
        if !(below || above) {
            return None;
        }

        let advisory = WindAdvisory {
            condition,
            speed,
            expected_min,
            expected_max,
        };
        warn!(%advisory, "Atypical wind speed");
        Some(advisory)
    }
}
