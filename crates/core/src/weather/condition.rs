//! Condition classification and the thunderstorm life cycle
//!
//! Each hour's continuous state is reduced to one [`WeatherCondition`].
//! Thunderstorms are stateful: once one starts it persists while the
//! atmosphere supports it, burns through its energy, and always ends in a
//! forced storm cycle that steps down Heavy Rain → Rain → Light Clouds
//! before ordinary classification resumes.

use crate::core_types::condition::WeatherCondition;
use crate::core_types::units::{Fahrenheit, MilesPerHour, Percent};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Thunderstorms never outlast this many consecutive hours
pub const MAX_THUNDERSTORM_HOURS: u32 = 4;
/// Hourly energy retention of an active thunderstorm
const ENERGY_DECAY: f64 = 0.8;
/// Below this energy a thunderstorm collapses
const MIN_ENERGY: f64 = 2.0;
/// Storm-cycle length range (hours)
const STORM_CYCLE_HOURS: std::ops::RangeInclusive<u32> = 6..=12;

/// Thunderstorm state machine
///
/// Idle while `duration == 0 && storm_cycle_stage == 0`; active while
/// `duration > 0`; decaying while `storm_cycle_stage > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThunderstormState {
    /// Hours the current thunderstorm has lasted
    pub duration: u32,
    /// Remaining convective energy
    pub energy: f64,
    /// Hours left in the forced post-storm decay
    pub storm_cycle_stage: u32,
    /// Condition returned for the previous hour
    pub last_condition: Option<WeatherCondition>,
}

impl ThunderstormState {
    /// Whether a thunderstorm is in progress
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.duration > 0
    }

    /// Whether the forced decay sequence is running
    #[must_use]
    pub fn in_storm_cycle(&self) -> bool {
        self.storm_cycle_stage > 0
    }
}

/// Continuous state the classifier looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionInputs {
    /// Air temperature
    pub temperature: Fahrenheit,
    /// Relative humidity
    pub humidity: Percent,
    /// Cloud cover
    pub cloud_cover: Percent,
    /// Sustained wind
    pub wind_speed: MilesPerHour,
    /// Precipitation potential (0-100)
    pub precipitation_potential: f64,
    /// Instability (0-10)
    pub instability: f64,
    /// Post-storm cooldown is running
    pub storm_cooldown_active: bool,
}

impl ConditionInputs {
    fn thunderstorm_eligible(&self) -> bool {
        self.precipitation_potential > 65.0 && *self.temperature > 60.0 && self.instability > 7.0
    }
}

/// Rare sky events for one hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CelestialEvents {
    /// A shooting star is visible
    pub shooting_star: bool,
    /// ...and it reached the ground
    pub meteor_impact: bool,
}

/// Classifies hours and runs the thunderstorm state machine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherConditionService {
    state: ThunderstormState,
}

impl WeatherConditionService {
    /// Create an idle classifier
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to idle (new simulation)
    pub fn reset(&mut self) {
        self.state = ThunderstormState::default();
    }

    /// Current state machine values
    #[must_use]
    pub fn state(&self) -> &ThunderstormState {
        &self.state
    }

    /// Classify one hour
    ///
    /// In order: a running storm cycle wins outright; otherwise the base
    /// classification (with temperature, wind, haze and fog overrides) is
    /// computed, then the thunderstorm checks may replace it.
    pub fn determine_condition(
        &mut self,
        inputs: &ConditionInputs,
        rng: &mut impl Rng,
    ) -> WeatherCondition {
        let condition = self.classify(inputs, rng);
        self.state.last_condition = Some(condition);
        condition
    }

    fn classify(&mut self, inputs: &ConditionInputs, rng: &mut impl Rng) -> WeatherCondition {
        if self.state.in_storm_cycle() {
            return self.step_storm_cycle();
        }

        let base = Self::classify_base(inputs);
        let eligible = inputs.thunderstorm_eligible();
        let was_thunderstorm = self.state.last_condition == Some(WeatherCondition::Thunderstorm);

        if was_thunderstorm {
            if !eligible {
                return self.enter_storm_cycle(rng, "conditions collapsed");
            }

            self.state.duration += 1;
            self.state.energy *= ENERGY_DECAY;
            if self.state.duration > MAX_THUNDERSTORM_HOURS || self.state.energy < MIN_ENERGY {
                return self.enter_storm_cycle(rng, "storm exhausted");
            }
            if self.state.duration >= 2 {
                let end_chance = (0.25 * f64::from(self.state.duration - 1)).min(1.0);
                if rng.random_bool(end_chance) {
                    return self.enter_storm_cycle(rng, "storm ended");
                }
            }
            return WeatherCondition::Thunderstorm;
        }

        if eligible && !inputs.storm_cooldown_active {
            self.state.duration = 1;
            self.state.energy = inputs.instability * 0.6;
            debug!(
                energy = self.state.energy,
                instability = inputs.instability,
                "Thunderstorm started"
            );
            return WeatherCondition::Thunderstorm;
        }

        self.state.duration = 0;
        self.state.energy = 0.0;
        base
    }

    fn enter_storm_cycle(&mut self, rng: &mut impl Rng, reason: &str) -> WeatherCondition {
        self.state.storm_cycle_stage = rng.random_range(STORM_CYCLE_HOURS);
        debug!(
            reason,
            duration = self.state.duration,
            stage = self.state.storm_cycle_stage,
            "Thunderstorm entering storm cycle"
        );
        self.state.duration = 0;
        self.state.energy = 0.0;
        self.step_storm_cycle()
    }

    fn step_storm_cycle(&mut self) -> WeatherCondition {
        let condition = Self::storm_cycle_condition(self.state.storm_cycle_stage);
        self.state.storm_cycle_stage = self.state.storm_cycle_stage.saturating_sub(1);
        condition
    }

    /// Condition for a storm-cycle stage (hours remaining)
    #[must_use]
    pub fn storm_cycle_condition(stage: u32) -> WeatherCondition {
        match stage {
            6.. => WeatherCondition::HeavyRain,
            3..=5 => WeatherCondition::Rain,
            _ => WeatherCondition::LightClouds,
        }
    }

    /// Base classification plus overrides, ignoring thunderstorm state
    ///
    /// Precipitation needs potential above 75; at or below 32°F it falls as
    /// snow (a blizzard in 35+ mph wind). Otherwise cloud cover decides.
    #[must_use]
    pub fn classify_base(inputs: &ConditionInputs) -> WeatherCondition {
        let t = *inputs.temperature;
        let potential = inputs.precipitation_potential;
        let cloud = *inputs.cloud_cover;

        let base = if potential > 75.0 {
            if t <= 32.0 {
                if *inputs.wind_speed >= 35.0 {
                    WeatherCondition::Blizzard
                } else {
                    WeatherCondition::Snow
                }
            } else if potential > 90.0 {
                WeatherCondition::HeavyRain
            } else {
                WeatherCondition::Rain
            }
        } else if cloud > 80.0 {
            WeatherCondition::HeavyClouds
        } else if cloud > 40.0 {
            WeatherCondition::LightClouds
        } else {
            WeatherCondition::ClearSkies
        };

        Self::apply_overrides(base, inputs)
    }

    fn apply_overrides(base: WeatherCondition, inputs: &ConditionInputs) -> WeatherCondition {
        let t = *inputs.temperature;
        let humidity = *inputs.humidity;
        let cloud = *inputs.cloud_cover;
        let wind = *inputs.wind_speed;
        let precipitating = base.is_precipitating();

        let mut condition = base;
        if !precipitating && t > 95.0 && cloud < 30.0 {
            condition = WeatherCondition::ScorchingHeat;
        }
        if t < 20.0 && !matches!(base, WeatherCondition::Snow | WeatherCondition::Blizzard) {
            condition = WeatherCondition::FreezingCold;
        }
        if !precipitating && wind > 25.0 && t < 40.0 {
            condition = WeatherCondition::ColdWinds;
        }
        if !precipitating && t > 85.0 && humidity > 70.0 && cloud < 40.0 {
            condition = WeatherCondition::HighHumidityHaze;
        }
        // fog outside its own temperature range would be clamped into it
        if !precipitating
            && humidity > 90.0
            && (30.0..=80.0).contains(&cloud)
            && wind < 5.0
            && t < 60.0
            && WeatherCondition::Fog.temperature_bound().contains(t)
        {
            condition = if humidity > 97.0 {
                WeatherCondition::HeavyFog
            } else {
                WeatherCondition::Fog
            };
        }
        condition
    }

    /// Roll for a shooting star (1%) and, given one, a meteor impact (5%)
    pub fn generate_celestial_events(rng: &mut impl Rng) -> CelestialEvents {
        let shooting_star = rng.random_bool(0.01);
        let meteor_impact = shooting_star && rng.random_bool(0.05);
        if meteor_impact {
            debug!("Meteor impact");
        }
        CelestialEvents {
            shooting_star,
            meteor_impact,
        }
    }
}
