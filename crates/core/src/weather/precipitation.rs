//! Rolling precipitation history
//!
//! Tracks how much has fallen over the last day and how "spent" the
//! atmosphere is. The exhaustion counter grows while it rains and decays
//! while dry; the atmospheric model reads it to throttle the
//! rain-begets-rain feedback loop.

use crate::core_types::condition::WeatherCondition;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of hourly samples retained
pub const HISTORY_HOURS: usize = 24;

/// Exhaustion never exceeds this
pub const MAX_EXHAUSTION: f64 = 12.0;

/// Rainfall rate (in/hr) treated as "fully wet" when normalizing
const SATURATION_RATE: f64 = 0.3;

/// Hourly precipitation history and exhaustion counter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrecipitationService {
    /// Hourly amounts in inches, oldest first
    history: VecDeque<f64>,
    exhaustion: f64,
}

impl PrecipitationService {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        PrecipitationService {
            history: VecDeque::with_capacity(HISTORY_HOURS),
            exhaustion: 0.0,
        }
    }

    /// Forget everything (new simulation)
    pub fn reset(&mut self) {
        self.history.clear();
        self.exhaustion = 0.0;
    }

    /// Record one hour of precipitation (inches)
    ///
    /// Negative or non-finite amounts are recorded as zero.
    pub fn record(&mut self, amount: f64) {
        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        if self.history.len() == HISTORY_HOURS {
            self.history.pop_front();
        }
        self.history.push_back(amount);

        if amount > 0.0 {
            self.exhaustion = (self.exhaustion + 1.0).min(MAX_EXHAUSTION);
        } else {
            self.exhaustion = (self.exhaustion - 0.5).max(0.0);
        }
    }

    /// Record the amount implied by an hour's condition
    pub fn record_condition(&mut self, condition: WeatherCondition, rng: &mut impl Rng) -> f64 {
        let amount = Self::amount_for(condition, rng);
        self.record(amount);
        amount
    }

    /// Typical hourly amount (inches) for a condition
    pub fn amount_for(condition: WeatherCondition, rng: &mut impl Rng) -> f64 {
        match condition {
            WeatherCondition::Thunderstorm => rng.random_range(0.5..=1.0),
            WeatherCondition::HeavyRain => 0.3,
            WeatherCondition::Rain | WeatherCondition::Blizzard => 0.1,
            WeatherCondition::Snow => 0.05,
            _ => 0.0,
        }
    }

    /// Weighted recent precipitation over the last `window` hours, 0-1
    ///
    /// The newest hour weighs `window`, the oldest weighs 1.
    #[must_use]
    pub fn recent_precipitation(&self, window: usize) -> f64 {
        let window = window.min(self.history.len());
        if window == 0 {
            return 0.0;
        }

        let (weighted, weights) = self
            .history
            .iter()
            .rev()
            .take(window)
            .enumerate()
            .fold((0.0, 0.0), |(sum, total), (i, amount)| {
                let weight = (window - i) as f64;
                (sum + amount * weight, total + weight)
            });

        (weighted / weights / SATURATION_RATE).clamp(0.0, 1.0)
    }

    /// Total precipitation over the last `hours` hours (inches)
    #[must_use]
    pub fn total_precipitation(&self, hours: usize) -> f64 {
        self.history.iter().rev().take(hours).sum()
    }

    /// Current exhaustion counter (0-12)
    #[must_use]
    pub fn exhaustion(&self) -> f64 {
        self.exhaustion
    }

    /// Hours recorded so far (at most 24)
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// A full day on record with effectively no precipitation
    #[must_use]
    pub fn is_drought_condition(&self) -> bool {
        self.history.len() == HISTORY_HOURS && self.total_precipitation(HISTORY_HOURS) < 0.01
    }

    /// Heavy accumulation over the day or a very wet last few hours
    #[must_use]
    pub fn is_flood_risk_present(&self) -> bool {
        self.total_precipitation(HISTORY_HOURS) > 2.0 || self.recent_precipitation(6) > 0.8
    }
}
