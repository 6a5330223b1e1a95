//! End-to-end scenarios
mod common;

use approx::assert_abs_diff_eq;
use common::at;
use weather_sim_core::{
    RegionProfile, Season, SeasonSelection, SimulationConfig, WeatherCondition, WeatherSimulation,
};

#[test]
fn desert_summer_noon_is_hot_and_dry() {
    let desert = RegionProfile::desert();
    let summer = desert.temperature.summer;

    for seed in 0..20 {
        let mut sim = WeatherSimulation::seeded(seed);
        let now = sim.initialize("desert", Season::Summer.into(), at(2024, 7, 15, 12));
        assert!(
            (*now.temperature - summer.mean).abs() <= summer.variance + 20.0,
            "seed {seed}: {}",
            now.temperature
        );
        assert!(!now.condition.is_precipitating(), "seed {seed}: {}", now.condition);
        assert!(now.celestial.is_daytime);
    }
}

#[test]
fn thunderstorms_decay_through_heavy_rain() {
    let mut storms = 0;
    for seed in 0..30 {
        let start = at(2024, 7, 1, 0);
        let mut sim = WeatherSimulation::seeded(seed).with_config(SimulationConfig::mundane()).unwrap();
        sim.initialize("tropical-rainforest", SeasonSelection::Auto, start);

        let mut history = sim.forecast().to_vec();
        for _ in 0..20 {
            sim.advance_time(24, "tropical-rainforest", SeasonSelection::Auto, start);
            history.extend_from_slice(sim.forecast());
        }

        let mut run = 0;
        for pair in history.windows(2) {
            if pair[0].condition == WeatherCondition::Thunderstorm {
                run += 1;
                assert!(run <= 4, "seed {seed}: thunderstorm lasted {run} hours");
                if pair[1].condition != WeatherCondition::Thunderstorm {
                    storms += 1;
                    assert_eq!(
                        pair[1].condition,
                        WeatherCondition::HeavyRain,
                        "seed {seed} at {}",
                        pair[1].timestamp
                    );
                }
            } else {
                run = 0;
            }
        }
    }
    tracing::info!(storms, "thunderstorms observed");
    assert!(storms > 0, "no thunderstorms formed");
}

#[test]
fn polar_winter_stays_below_freezing_cap() {
    let mut sim = WeatherSimulation::seeded(12);
    sim.initialize("polar-ice", SeasonSelection::Auto, at(2024, 1, 10, 0));
    assert_eq!(sim.season(), Season::Winter);
    for entry in sim.forecast() {
        assert!(*entry.temperature <= 32.0);
        assert!(entry.celestial.day_length < 2.0);
    }
}

#[test]
fn unknown_biome_uses_default_region() {
    let mut sim = WeatherSimulation::seeded(1);
    sim.initialize("sunken-city", SeasonSelection::Auto, at(2024, 5, 5, 5));
    let profile = sim.profile().unwrap();
    assert_eq!(profile.biome, "temperate-forest");
    assert_abs_diff_eq!(profile.latitude, RegionProfile::temperate_forest().latitude);

    // the alias resolves to the same region: no restart
    let current = sim.advance_time(1, "forest", SeasonSelection::Auto, at(2030, 1, 1, 0));
    assert_eq!(current.timestamp, at(2024, 5, 5, 6));
}

#[test]
fn extreme_events_are_annotations() {
    let config = SimulationConfig {
        extreme_weather: weather_sim_core::ExtremeWeatherConfig {
            enabled: true,
            probability_scale: 1e6,
        },
        ..SimulationConfig::default()
    };
    let mut sim = WeatherSimulation::seeded(8).with_config(config).unwrap();
    sim.initialize("desert", SeasonSelection::Auto, at(2024, 7, 1, 0));
    sim.advance_time(48, "desert", SeasonSelection::Auto, at(2024, 7, 1, 0));

    // desert carries seismic activity, so scaled-up sampling finds events
    let events = sim.forecast().iter().filter(|e| e.extreme_event.is_some()).count();
    assert!(events > 0);
    for entry in sim.forecast() {
        assert!((0.0..=100.0).contains(&*entry.humidity()));
    }
}
