//! Hourly weather services
//!
//! Each service owns one slice of the model. The simulation calls them in a
//! fixed order every hour:
//!
//! 1. [`WeatherSystemService`] ages, moves and spawns pressure systems
//! 2. [`AtmosphericService`] derives humidity, pressure and cloud cover
//! 3. [`TemperatureService`] derives air temperature
//! 4. [`WindService`] steps the wind toward its target
//! 5. [`AtmosphericService`] derives instability and precipitation potential
//! 6. [`WeatherConditionService`] classifies the hour
//! 7. [`PrecipitationService`] records what fell
//! 8. [`ExtremeWeatherService`] samples rare events

pub mod atmosphere;
pub mod condition;
pub mod effects;
pub mod extreme;
pub mod precipitation;
pub mod systems;
pub mod temperature;
pub mod wind;

pub use atmosphere::{AtmosphericService, PrecipitationFeedback};
pub use condition::{CelestialEvents, ConditionInputs, ThunderstormState, WeatherConditionService};
pub use effects::{DefaultEffects, EffectsTable};
pub use extreme::{ExtremeContext, ExtremeEvent, ExtremeWeatherConfig, ExtremeWeatherService, Severity};
pub use precipitation::PrecipitationService;
pub use systems::{SystemContext, SystemId, SystemKind, WeatherSystem, WeatherSystemService};
pub use temperature::{TemperatureInputs, TemperatureService};
pub use wind::{WindAdvisory, WindInputs, WindService};

use crate::region::{RegionProfile, SeasonalBaseline};

/// Where and when an hour is being computed
#[derive(Debug, Clone, Copy)]
pub struct HourContext<'a> {
    /// Region being simulated
    pub profile: &'a RegionProfile,
    /// Seasonal expectation for the current season
    pub baseline: &'a SeasonalBaseline,
    /// Day of year (1-366)
    pub day_of_year: u32,
    /// Hour of day (0-23)
    pub hour: u32,
    /// Live weather systems
    pub systems: &'a [WeatherSystem],
}

/// Inertia blend: `weight_new` of the fresh value, the rest from `previous`
///
/// The first hour has no previous value and takes the fresh value as is.
pub(crate) fn blend(new: f64, previous: Option<f64>, weight_new: f64) -> f64 {
    match previous {
        Some(prev) if prev.is_finite() => new * weight_new + prev * (1.0 - weight_new),
        _ => new,
    }
}
