//! Range and bound properties that must hold for every generated hour
mod common;

use common::at;
use weather_sim_core::region::KNOWN_BIOMES;
use weather_sim_core::{
    ForecastEntry, MeteorologicalSeasons, RegionProfile, Season, SeasonResolver, SeasonSelection,
    WeatherSimulation,
};

fn check_entry(profile: &RegionProfile, season: Season, entry: &ForecastEntry) {
    let meteo = entry.snapshot();
    let (min, max) = profile.latitude_band().temperature_bounds(season);
    let t = *entry.temperature;
    assert!(
        (min..=max).contains(&t),
        "{} {}: temperature {t} outside {min}..{max}",
        profile.biome,
        entry.timestamp
    );
    assert!(
        entry.condition.temperature_bound().contains(t),
        "{} {}: {} at {t}°F",
        profile.biome,
        entry.timestamp,
        entry.condition
    );
    assert!((0.0..=100.0).contains(&*entry.humidity()));
    assert!((0.0..=100.0).contains(&*entry.cloud_cover()));
    assert!((970.0..=1050.0).contains(&*entry.pressure()));
    assert!((0.0..=100.0).contains(&meteo.precipitation_potential));
    assert!((0.0..=10.0).contains(&meteo.instability));
    assert!((0.0..=80.0).contains(&*entry.wind_speed));
    assert_eq!(meteo.wind_speed, entry.wind_speed);
    assert_eq!(meteo.atmosphere.temperature, entry.temperature);
}

#[test]
fn every_biome_stays_in_range_for_a_month() {
    for (i, biome) in KNOWN_BIOMES.iter().enumerate() {
        for month in [1, 7] {
            let start = at(2024, month, 1, 0);
            let mut sim = WeatherSimulation::seeded(1000 + i as u64 + u64::from(month));
            sim.initialize(biome, SeasonSelection::Auto, start);
            let profile = sim.profile().unwrap().clone();

            for _ in 0..30 {
                sim.advance_time(24, biome, SeasonSelection::Auto, start);
                assert!(sim.forecast().len() >= 24);
                assert!(!sim.active_systems().is_empty());
                for entry in sim.forecast() {
                    let season = MeteorologicalSeasons.resolve(entry.timestamp.date(), profile.latitude);
                    check_entry(&profile, season, entry);
                }
            }
        }
    }
}

#[test]
fn fixed_season_bounds_hold() {
    for season in Season::ALL {
        let start = at(2024, 3, 15, 0);
        let mut sim = WeatherSimulation::seeded(77);
        sim.initialize("polar-ice", season.into(), start);
        let profile = sim.profile().unwrap().clone();
        for _ in 0..10 {
            sim.advance_time(24, "polar-ice", season.into(), start);
            for entry in sim.forecast() {
                check_entry(&profile, season, entry);
            }
        }
    }
}

#[test]
fn window_is_always_full_and_hourly() {
    let start = at(2024, 10, 3, 17);
    let mut sim = WeatherSimulation::seeded(5);
    sim.initialize("coastal", SeasonSelection::Auto, start);
    for hours in [0, 1, 5, 23, 24, 25, 72] {
        sim.advance_time(hours, "coastal", SeasonSelection::Auto, start);
        let forecast = sim.get_24_hour_forecast();
        assert_eq!(forecast.len(), 24);
        for pair in forecast.windows(2) {
            assert_eq!((pair[1].timestamp - pair[0].timestamp).num_hours(), 1);
        }
        assert_eq!(sim.get_current_weather(), forecast.first());
    }
}

#[test]
fn southern_hemisphere_override_flips_seasons() {
    let config = weather_sim_core::SimulationConfig {
        profile_overrides: weather_sim_core::ProfileOverrides {
            latitude: Some(-38.0),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut sim = WeatherSimulation::seeded(9).with_config(config).unwrap();
    sim.initialize("temperate-grassland", SeasonSelection::Auto, at(2024, 1, 10, 12));
    assert_eq!(sim.season(), Season::Summer);
    assert!(sim.profile().unwrap().is_southern());
}
