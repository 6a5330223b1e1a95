//! Weather Simulation Core Library
//!
//! Hour-by-hour weather for a fictional region, aimed at tabletop game
//! facilitators. A static [`RegionProfile`] (biome, latitude, elevation,
//! maritime exposure) is turned into a continuously evolving forecast
//! driven by drifting pressure systems and fronts, a thunderstorm life
//! cycle, and rare extreme events.
//!
//! ## Overview
//!
//! - [`region`]: biome presets and seasonal baselines
//! - [`weather`]: the cooperating hourly services
//! - [`calendar`]: season resolution and daylight (replaceable)
//! - [`simulation`]: the hourly loop and rolling forecast window
//!
//! ```
//! use chrono::NaiveDate;
//! use weather_sim_core::{Season, WeatherSimulation};
//!
//! let noon = NaiveDate::from_ymd_opt(2024, 7, 15)
//!     .and_then(|d| d.and_hms_opt(12, 0, 0))
//!     .unwrap();
//! let mut sim = WeatherSimulation::seeded(42);
//! let now = sim.initialize("desert", Season::Summer.into(), noon);
//! println!("{} {} feels like {}", now.condition, now.temperature, now.feels_like);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Region and calendar inputs
pub mod calendar;
pub mod region;

// Hourly services and the loop that drives them
pub mod simulation;
pub mod weather;

// Re-export core types
pub use core_types::{
    AtmosphericState, CelestialInfo, CompassDirection, Fahrenheit, ForecastEntry, Hectopascals,
    LatitudeBand, MeteoSnapshot, MilesPerHour, Percent, Season, SeasonSelection, WeatherCondition,
    WindIntensity, parse_timestamp,
};
pub use error::{Result, WeatherError};

// Re-export collaborators and region types
pub use calendar::{Daylight, MeteorologicalSeasons, SeasonResolver, SimpleSolarModel, SolarProvider};
pub use region::{ProfileOverrides, RegionProfile, RegionProfileService, SpecialFactors};
pub use weather::{DefaultEffects, EffectsTable, ExtremeEvent, ExtremeWeatherConfig};

// Re-export the simulation
pub use simulation::{SimulationConfig, WeatherSimulation};
